//! # flicker-render
//!
//! The Flicker rendering engine. Takes effect options and produces
//! palette-indexed animation frames: fonts, text layout, the ink canvas,
//! the palette quantizer and the six effect descriptors.
//! Single-threaded and CPU-only; every call builds its own canvas.

pub mod canvas;
pub mod effects;
pub mod font;
pub mod layout;
pub mod pipeline;
pub mod quantize;

pub use canvas::{Canvas, TextAnchor};
pub use effects::{Effect, EffectState};
pub use font::{FontFace, GlyphFace, Typeface};
pub use layout::Layout;
pub use pipeline::{render, render_at, RenderPipeline, RenderResult};
pub use quantize::PaletteQuantizer;
