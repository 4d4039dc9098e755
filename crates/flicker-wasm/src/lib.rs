//! # flicker-wasm
//!
//! WebAssembly bindings for the Flicker engine. Every builder takes an
//! options JSON string and returns the GIF as base64; errors surface as JS
//! exceptions.

use base64::Engine;
use chrono::{DateTime, Utc};
use flicker_core::{EffectOptions, FlickerError, FlickerResult};
use flicker_render::RenderPipeline;
use wasm_bindgen::prelude::*;

fn js_error(e: FlickerError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(target_arch = "wasm32")]
fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_else(Utc::now)
}

#[cfg(not(target_arch = "wasm32"))]
fn now() -> DateTime<Utc> {
    Utc::now()
}

fn encode_base64(options: &EffectOptions) -> FlickerResult<String> {
    let bytes = RenderPipeline::render(options, now())?.encode()?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

fn build_tagged(options_json: &str) -> FlickerResult<String> {
    encode_base64(&EffectOptions::from_json(options_json)?)
}

fn build_untagged(effect: &str, options_json: &str) -> FlickerResult<String> {
    let json = if options_json.trim().is_empty() {
        "{}"
    } else {
        options_json
    };
    encode_base64(&EffectOptions::from_untagged_json(effect, json)?)
}

fn effects_json() -> FlickerResult<String> {
    let mut listing = serde_json::Map::new();
    for name in EffectOptions::NAMES {
        if let Some(options) = EffectOptions::defaults(name) {
            listing.insert(name.to_string(), serde_json::to_value(&options)?);
        }
    }
    Ok(serde_json::to_string(&listing)?)
}

/// Render a tagged options document (`{"effect": "countdown", ...}`) and
/// return the GIF as base64.
#[wasm_bindgen]
pub fn build(options_json: &str) -> Result<String, JsValue> {
    build_tagged(options_json).map_err(js_error)
}

/// Render a tagged options document and return the raw GIF bytes.
#[wasm_bindgen]
pub fn render(options_json: &str) -> Result<Vec<u8>, JsValue> {
    let options = EffectOptions::from_json(options_json).map_err(js_error)?;
    RenderPipeline::render(&options, now())
        .and_then(|result| result.encode())
        .map_err(js_error)
}

/// Render one frame and return its RGBA pixels, `width * height * 4` bytes.
#[wasm_bindgen(js_name = renderFrame)]
pub fn render_frame(options_json: &str, frame_index: u32) -> Result<Vec<u8>, JsValue> {
    let options = EffectOptions::from_json(options_json).map_err(js_error)?;
    let buffer = RenderPipeline::render_frame_index(&options, now(), frame_index as usize)
        .map_err(js_error)?;
    Ok(buffer.data)
}

#[wasm_bindgen(js_name = buildCountdown)]
pub fn build_countdown(options_json: &str) -> Result<String, JsValue> {
    build_untagged("countdown", options_json).map_err(js_error)
}

#[wasm_bindgen(js_name = buildLedBanner)]
pub fn build_led_banner(options_json: &str) -> Result<String, JsValue> {
    build_untagged("led-banner", options_json).map_err(js_error)
}

#[wasm_bindgen(js_name = buildFlashingLetters)]
pub fn build_flashing_letters(options_json: &str) -> Result<String, JsValue> {
    build_untagged("flashing-letters", options_json).map_err(js_error)
}

#[wasm_bindgen(js_name = buildFlashingText)]
pub fn build_flashing_text(options_json: &str) -> Result<String, JsValue> {
    build_untagged("flashing-text", options_json).map_err(js_error)
}

#[wasm_bindgen(js_name = buildColorVaryingText)]
pub fn build_color_varying_text(options_json: &str) -> Result<String, JsValue> {
    build_untagged("color-varying-text", options_json).map_err(js_error)
}

#[wasm_bindgen(js_name = buildTypingText)]
pub fn build_typing_text(options_json: &str) -> Result<String, JsValue> {
    build_untagged("typing-text", options_json).map_err(js_error)
}

/// Default options of every effect, keyed by effect name.
#[wasm_bindgen]
pub fn effects() -> Result<String, JsValue> {
    effects_json().map_err(js_error)
}

/// Get the version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
