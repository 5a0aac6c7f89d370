pub mod assemble;
pub mod engine;
pub mod query;
pub mod rank;
pub mod suggest;
