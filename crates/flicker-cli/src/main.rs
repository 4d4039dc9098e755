use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use base64::Engine;
use clap::{Parser, Subcommand};
use flicker_core::{parse_override, EffectOptions};
use flicker_encode::AnimationEncoder;
use flicker_render::RenderPipeline;

#[derive(Parser)]
#[command(
    name = "flicker",
    version,
    about = "Flicker: animated GIF effects",
    long_about = "Flicker renders small animated GIFs for e-mail and web banners:\ncountdown timers, scrolling LED banners, flashing and typing text."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an effect to a GIF
    Render {
        /// Effect name (see `flicker effects`)
        #[arg()]
        effect: String,

        /// JSON or TOML options file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override one option, e.g. --set text=SALE --set frames=20
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Output file path (default: <effect>.gif)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write the result to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Write base64 text instead of binary GIF data
        #[arg(long)]
        base64: bool,
    },

    /// Render a single frame to a PNG
    Preview {
        /// Effect name (see `flicker effects`)
        #[arg()]
        effect: String,

        /// JSON or TOML options file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override one option
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Frame index to render
        #[arg(long, short, default_value_t = 0)]
        frame: usize,

        /// Output PNG path (default: <effect>_<frame>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List effects with their default options as JSON
    Effects,

    /// Display version and engine info
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs always go to stderr so that --stdout output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render {
            effect,
            config,
            overrides,
            output,
            stdout,
            base64,
        } => cmd_render(&effect, config.as_deref(), &overrides, output, stdout, base64),
        Commands::Preview {
            effect,
            config,
            overrides,
            frame,
            output,
        } => cmd_preview(&effect, config.as_deref(), &overrides, frame, output),
        Commands::Effects => cmd_effects(),
        Commands::Info => cmd_info(),
    }
}

/// Resolve options: defaults or a file, then `--set` overrides.
fn load_options(effect: &str, config: Option<&Path>, overrides: &[String]) -> Result<EffectOptions> {
    let base = match config {
        Some(path) => {
            let options = EffectOptions::load_from_file(path)
                .with_context(|| format!("failed to load options: {}", path.display()))?;
            if options.name() != effect {
                anyhow::bail!(
                    "{} describes '{}', not '{}'",
                    path.display(),
                    options.name(),
                    effect
                );
            }
            options
        }
        None => EffectOptions::defaults(effect).with_context(|| {
            format!(
                "unknown effect '{}' (expected one of: {})",
                effect,
                EffectOptions::NAMES.join(", ")
            )
        })?,
    };

    let pairs = overrides
        .iter()
        .map(|arg| parse_override(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let options = base.with_overrides(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
    Ok(options)
}

fn cmd_render(
    effect: &str,
    config: Option<&Path>,
    overrides: &[String],
    output: Option<PathBuf>,
    stdout: bool,
    as_base64: bool,
) -> Result<()> {
    let start = Instant::now();
    let options = load_options(effect, config, overrides)?;
    let result = RenderPipeline::render(&options, chrono::Utc::now())?;

    if stdout {
        let bytes = result.encode()?;
        let mut out = std::io::stdout().lock();
        if as_base64 {
            writeln!(out, "{}", base64::engine::general_purpose::STANDARD.encode(&bytes))?;
        } else {
            out.write_all(&bytes)?;
        }
        out.flush()?;
        return Ok(());
    }

    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.gif", effect)));
    if as_base64 {
        let bytes = result.encode()?;
        std::fs::write(&output, base64::engine::general_purpose::STANDARD.encode(&bytes))
            .with_context(|| format!("failed to write {}", output.display()))?;
    } else {
        AnimationEncoder::encode_to_file(&result.animation, &output)
            .with_context(|| format!("failed to write {}", output.display()))?;
    }

    tracing::info!(
        "Wrote {} ({} frames, {}) in {:.2?}",
        output.display(),
        result.frame_count(),
        result.content_hash(),
        start.elapsed()
    );
    Ok(())
}

fn cmd_preview(
    effect: &str,
    config: Option<&Path>,
    overrides: &[String],
    frame: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let options = load_options(effect, config, overrides)?;
    let buffer = RenderPipeline::render_frame_index(&options, chrono::Utc::now(), frame)?;
    let (width, height) = (buffer.width, buffer.height);
    let image = image::RgbaImage::from_raw(width, height, buffer.data)
        .context("frame buffer does not match its dimensions")?;

    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}_{}.png", effect, frame)));
    image
        .save(&output)
        .with_context(|| format!("failed to save preview: {}", output.display()))?;
    tracing::info!("Wrote frame {} of {} to {}", frame, effect, output.display());
    Ok(())
}

fn cmd_effects() -> Result<()> {
    let mut listing = serde_json::Map::new();
    for name in EffectOptions::NAMES {
        if let Some(options) = EffectOptions::defaults(name) {
            listing.insert(name.to_string(), serde_json::to_value(&options)?);
        }
    }
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

fn cmd_info() -> Result<()> {
    println!("Flicker animated GIF engine");
    println!("   Version:   {}", env!("CARGO_PKG_VERSION"));
    println!("   Renderer:  CPU (single-threaded)");
    println!("   Encoder:   GIF89a, 256-color palettes");
    println!("   Effects:   {}", EffectOptions::NAMES.join(", "));
    println!(
        "   Fonts:     {}",
        flicker_render::font::font_names().collect::<Vec<_>>().join(", ")
    );
    println!(
        "   Languages: {}",
        flicker_core::i18n::languages().collect::<Vec<_>>().join(" ")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render_flags() {
        let cli = Cli::try_parse_from([
            "flicker", "render", "led-banner", "--set", "text=HI", "--set", "frames=5", "--stdout",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                effect,
                overrides,
                stdout,
                base64,
                ..
            } => {
                assert_eq!(effect, "led-banner");
                assert_eq!(overrides, vec!["text=HI", "frames=5"]);
                assert!(stdout);
                assert!(!base64);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_output_conflicts_with_stdout() {
        let result = Cli::try_parse_from([
            "flicker", "render", "countdown", "--stdout", "-o", "x.gif",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_options_applies_overrides() {
        let options = load_options(
            "flashing-text",
            None,
            &["text=HELLO".to_string(), "words=3".to_string()],
        )
        .unwrap();
        match options {
            EffectOptions::FlashingText(o) => {
                assert_eq!(o.text, "HELLO");
                assert_eq!(o.words, 3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_load_options_rejects_unknown_effect() {
        assert!(load_options("fireworks", None, &[]).is_err());
    }

    #[test]
    fn test_load_options_rejects_malformed_override() {
        assert!(load_options("countdown", None, &["frames".to_string()]).is_err());
    }

    #[test]
    fn test_config_file_must_match_effect() {
        let path = std::env::temp_dir().join(format!("flicker-cli-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"effect": "typing-text", "text": "GO"}"#).unwrap();
        assert!(load_options("typing-text", Some(path.as_path()), &[]).is_ok());
        assert!(load_options("countdown", Some(path.as_path()), &[]).is_err());
        std::fs::remove_file(&path).ok();
    }
}
