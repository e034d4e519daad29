//! Command-line interface definitions

pub mod args;

pub use args::{parse_init_value, Args, SubCommand};
