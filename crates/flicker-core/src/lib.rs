//! # flicker-core
//!
//! Core types and primitives for the Flicker animated GIF generator.
//! This crate contains foundational types shared across all Flicker crates:
//! colors, gradients and palettes, frames, effect options, the countdown
//! translation table, content hashing and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod hash;
pub mod i18n;
pub mod palette;

pub use config::*;

pub use color::Color;
pub use error::{FlickerError, FlickerResult};
pub use frame::{Animation, FrameBuffer, IndexedFrame};
pub use palette::{Gradient, Palette};
