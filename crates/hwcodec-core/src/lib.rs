#![doc = include_str!("../README.md")]

pub mod codec_traits;
pub mod error;
pub mod types;
