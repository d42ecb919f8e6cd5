//! Command-line interface module.

mod args;
pub mod split;
pub mod tweak;

pub use args::{IoArgs, SliceCli, TweakCli, TweakCommand};
