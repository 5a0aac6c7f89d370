pub mod compile;
pub mod detect;
pub mod plan;
pub mod spec;
