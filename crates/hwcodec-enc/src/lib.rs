#![doc = include_str!("../README.md")]

pub mod bootstrap;
pub mod context;
pub mod format;
pub mod poll;
pub mod stats;
