//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod all;
pub mod input;
pub mod lesson;
pub mod modules;
