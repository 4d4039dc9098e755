use std::borrow::Cow;
use std::path::Path;

use flicker_core::frame::Animation;
use flicker_core::FlickerError;

/// Native GIF89a encoder over the `gif` crate.
///
/// Frames are already palette-indexed, so no quantization happens here: the
/// indices and palettes are written exactly as given. When every frame
/// shares one palette it becomes the global color table; otherwise each
/// frame carries its own local table.
pub struct AnimationEncoder;

impl AnimationEncoder {
    /// Encode an animation into an in-memory GIF byte stream that loops forever.
    pub fn encode(animation: &Animation) -> Result<Vec<u8>, FlickerError> {
        if animation.frames.is_empty() {
            return Err(FlickerError::Encode("no frames to encode for GIF".into()));
        }

        let width = to_u16(animation.width, "width")?;
        let height = to_u16(animation.height, "height")?;

        let shared = animation.shared_palette().map(|p| p.to_rgb_bytes());
        let global: &[u8] = shared.as_deref().unwrap_or(&[]);

        let mut encoder = gif::Encoder::new(Vec::new(), width, height, global)
            .map_err(|e| FlickerError::Encode(format!("failed to write GIF header: {}", e)))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| FlickerError::Encode(format!("failed to set GIF repeat: {}", e)))?;

        for (i, frame) in animation.frames.iter().enumerate() {
            if frame.width != animation.width || frame.height != animation.height {
                return Err(FlickerError::Encode(format!(
                    "frame {} has dimensions {}x{}, expected {}x{}",
                    i, frame.width, frame.height, animation.width, animation.height
                )));
            }
            let expected = (frame.width as usize) * (frame.height as usize);
            if frame.indices.len() != expected {
                return Err(FlickerError::Encode(format!(
                    "frame {} has {} indices, expected {}",
                    i,
                    frame.indices.len(),
                    expected
                )));
            }

            let gif_frame = gif::Frame {
                width,
                height,
                delay: frame.delay,
                buffer: Cow::Borrowed(&frame.indices),
                palette: if shared.is_some() {
                    None
                } else {
                    Some(frame.palette.to_rgb_bytes())
                },
                ..gif::Frame::default()
            };

            encoder.write_frame(&gif_frame).map_err(|e| {
                FlickerError::Encode(format!("failed to encode GIF frame {}: {}", i, e))
            })?;
        }

        let bytes = encoder
            .into_inner()
            .map_err(|e| FlickerError::Encode(format!("failed to finalize GIF: {}", e)))?;

        tracing::debug!(
            "Encoded {} frames to GIF ({}x{}, {} palette, {} bytes)",
            animation.frames.len(),
            width,
            height,
            if shared.is_some() { "global" } else { "per-frame" },
            bytes.len(),
        );

        Ok(bytes)
    }

    /// Encode an animation and write it to a `.gif` file.
    pub fn encode_to_file(animation: &Animation, output_path: &Path) -> Result<(), FlickerError> {
        let bytes = Self::encode(animation)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, &bytes)?;
        tracing::info!(
            "Wrote GIF to {} ({} bytes)",
            output_path.display(),
            bytes.len()
        );
        Ok(())
    }
}

fn to_u16(value: u32, what: &str) -> Result<u16, FlickerError> {
    u16::try_from(value)
        .map_err(|_| FlickerError::Encode(format!("GIF {} {} exceeds 65535", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flicker_core::{Color, Gradient, IndexedFrame};

    fn frame(gradient: Gradient, fill: u8, delay: u16) -> IndexedFrame {
        IndexedFrame {
            width: 4,
            height: 3,
            indices: vec![fill; 12],
            palette: gradient.palette(),
            delay,
        }
    }

    fn decode(bytes: &[u8]) -> (Option<Vec<u8>>, Vec<(u16, Vec<u8>, Option<Vec<u8>>)>) {
        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);
        let mut decoder = options.read_info(bytes).unwrap();
        let global = decoder.global_palette().map(|p| p.to_vec());
        let mut frames = Vec::new();
        while let Some(f) = decoder.read_next_frame().unwrap() {
            frames.push((f.delay, f.buffer.to_vec(), f.palette.clone()));
        }
        (global, frames)
    }

    #[test]
    fn test_gif_encode_empty_animation() {
        let result = AnimationEncoder::encode(&Animation::new(4, 3));
        assert!(result.is_err());
    }

    #[test]
    fn test_gif_header_and_trailer() {
        let mut anim = Animation::new(4, 3);
        anim.push(frame(Gradient::new(Color::BLACK, Color::WHITE), 0, 10));
        let bytes = AnimationEncoder::encode(&anim).unwrap();
        assert_eq!(&bytes[..6], b"GIF89a");
        assert_eq!(bytes.last(), Some(&0x3B));
    }

    #[test]
    fn test_shared_palette_is_global() {
        let mono = Gradient::new(Color::BLACK, Color::WHITE);
        let mut anim = Animation::new(4, 3);
        anim.push(frame(mono, 0, 10));
        anim.push(frame(mono, 1, 0));
        anim.push(frame(mono, 200, 7));

        let bytes = AnimationEncoder::encode(&anim).unwrap();
        let (global, frames) = decode(&bytes);

        assert_eq!(global, Some(mono.palette().to_rgb_bytes()));
        assert_eq!(frames.len(), 3);
        assert_eq!(
            frames.iter().map(|f| f.0).collect::<Vec<_>>(),
            vec![10, 0, 7]
        );
        assert_eq!(frames[1].1, vec![1; 12]);
        assert_eq!(frames[2].1, vec![200; 12]);
        assert!(frames.iter().all(|f| f.2.is_none()));
    }

    #[test]
    fn test_distinct_palettes_are_local() {
        let red = Gradient::new(Color::RED, Color::WHITE);
        let blue = Gradient::new(Color::BLUE, Color::BLACK);
        let mut anim = Animation::new(4, 3);
        anim.push(frame(red, 0, 10));
        anim.push(frame(blue, 0, 10));

        let bytes = AnimationEncoder::encode(&anim).unwrap();
        let (_, frames) = decode(&bytes);

        assert_eq!(frames[0].2, Some(red.palette().to_rgb_bytes()));
        assert_eq!(frames[1].2, Some(blue.palette().to_rgb_bytes()));
    }

    #[test]
    fn test_mismatched_frame_is_rejected() {
        let mono = Gradient::new(Color::BLACK, Color::WHITE);
        let mut anim = Animation::new(4, 3);
        let mut bad = frame(mono, 0, 10);
        bad.indices.truncate(5);
        anim.push(bad);
        assert!(AnimationEncoder::encode(&anim).is_err());
    }

    #[test]
    fn test_encode_to_file() {
        let mut anim = Animation::new(4, 3);
        anim.push(frame(Gradient::new(Color::BLACK, Color::WHITE), 1, 10));

        let out = std::env::temp_dir().join("flicker_test_encode.gif");
        AnimationEncoder::encode_to_file(&anim, &out).unwrap();
        let meta = std::fs::metadata(&out).unwrap();
        assert!(meta.len() > 0);
        let _ = std::fs::remove_file(&out);
    }
}
