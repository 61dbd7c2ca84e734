//! Library components of the `codetree` command-line tool.

pub mod input;
pub mod logging;
pub mod render;
