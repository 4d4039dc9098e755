use chrono::{DateTime, Utc};

use flicker_core::frame::{Animation, FrameBuffer};
use flicker_core::hash::{self, ContentHash};
use flicker_core::{EffectOptions, FlickerError, FlickerResult};
use flicker_encode::AnimationEncoder;

use crate::canvas::Canvas;
use crate::effects::Effect;
use crate::quantize::PaletteQuantizer;

/// Result of a complete render.
pub struct RenderResult {
    /// Name of the rendered effect.
    pub effect: &'static str,
    /// All indexed frames in order, with their delays.
    pub animation: Animation,
}

impl RenderResult {
    pub fn frame_count(&self) -> usize {
        self.animation.frame_count()
    }

    /// Content hash of every frame (indices, palettes and delays).
    ///
    /// Identical options rendered at the same instant produce the same hash,
    /// except for flashing letters without a seed.
    pub fn content_hash(&self) -> ContentHash {
        hash::hash_animation(&self.animation)
    }

    /// Content hash of a single frame by index.
    pub fn frame_hash(&self, index: usize) -> Option<ContentHash> {
        self.animation.frames.get(index).map(hash::hash_frame)
    }

    /// Encode to GIF bytes.
    pub fn encode(&self) -> FlickerResult<Vec<u8>> {
        AnimationEncoder::encode(&self.animation)
    }
}

/// The render pipeline: options in, indexed animation out.
pub struct RenderPipeline;

impl RenderPipeline {
    /// Render every frame of an effect. `now` is the instant a countdown
    /// counts from.
    pub fn render(options: &EffectOptions, now: DateTime<Utc>) -> FlickerResult<RenderResult> {
        let mut effect = Effect::prepare(options, now)?;
        let (width, height) = effect.size();
        let frame_count = effect.frame_count();
        let delay = effect.delay();

        let mut animation = Animation::new(width, height);
        let mut current = effect.gradient(0);
        let mut quantizer = PaletteQuantizer::new(current.palette());

        for index in 0..frame_count {
            let state = effect.frame_state(index);
            let mut canvas = Canvas::new(width, height);
            effect.compose(&state, &mut canvas)?;

            let gradient = effect.gradient(index);
            if gradient != current {
                quantizer = PaletteQuantizer::new(gradient.palette());
                current = gradient;
            }
            let frame = quantizer.to_indexed(&canvas.to_frame_buffer(&gradient), delay)?;
            animation.push(frame);
        }

        tracing::info!(
            "Rendered {} ({} frames, {}x{}, delay={}cs)",
            effect.name(),
            frame_count,
            width,
            height,
            delay
        );

        Ok(RenderResult {
            effect: effect.name(),
            animation,
        })
    }

    /// Render one frame as a full-color buffer. Used for previews.
    ///
    /// Earlier frame states are still computed so that random draws match
    /// what the full render of the same seed would show.
    pub fn render_frame_index(
        options: &EffectOptions,
        now: DateTime<Utc>,
        index: usize,
    ) -> FlickerResult<FrameBuffer> {
        let mut effect = Effect::prepare(options, now)?;
        let frame_count = effect.frame_count();
        if index >= frame_count {
            return Err(FlickerError::InvalidArgument(format!(
                "frame {} out of range, {} has {} frames",
                index,
                effect.name(),
                frame_count
            )));
        }

        let mut state = effect.frame_state(0);
        for i in 1..=index {
            state = effect.frame_state(i);
        }

        let (width, height) = effect.size();
        let mut canvas = Canvas::new(width, height);
        effect.compose(&state, &mut canvas)?;
        Ok(canvas.to_frame_buffer(&effect.gradient(index)))
    }
}

/// Render an effect to GIF bytes, counting down from the current instant.
pub fn render(options: &EffectOptions) -> FlickerResult<Vec<u8>> {
    render_at(options, Utc::now())
}

/// Render an effect to GIF bytes with an injected "now".
pub fn render_at(options: &EffectOptions, now: DateTime<Utc>) -> FlickerResult<Vec<u8>> {
    let result = RenderPipeline::render(options, now)?;
    let bytes = result.encode()?;
    tracing::info!(
        "Encoded {} to {} bytes ({})",
        result.effect,
        bytes.len(),
        result.content_hash()
    );
    Ok(bytes)
}
