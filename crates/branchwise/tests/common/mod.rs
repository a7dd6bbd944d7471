#![allow(dead_code)]

pub mod git;
pub mod test_env;

pub use test_env::TestEnv;
