pub mod log;
pub mod picker;
pub mod term;
