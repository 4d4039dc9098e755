//! # flicker-encode
//!
//! Encoding module: serializes palette-indexed animations into animated GIF
//! byte streams.

pub mod gif;

pub use crate::gif::AnimationEncoder;
