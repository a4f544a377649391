#![forbid(unsafe_code)]

pub mod audit;
pub mod cli;
pub mod error;
pub mod input;
pub mod logging;
pub mod render;
pub mod toggle;

pub use cli::{run, run_from_env};
