pub mod pattern;
pub mod store;
