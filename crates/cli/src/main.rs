#![deny(unsafe_code)]
//! Headless CLI for the zettacars particle background.
//!
//! Subcommands:
//! - `simulate` runs the particle field N frames on a recording surface
//! - `schema` prints the particle parameter schema and a resolved page config

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use glam::DVec2;
use serde_json::{json, Value};
use std::process;
use tracing_subscriber::EnvFilter;
use zettacars_ui_core::{Animation, FrameLoop, HeadlessSurface, PageConfig, Theme, UiError, Viewport};
use zettacars_ui_particles::ParticleField;

#[derive(Parser)]
#[command(name = "zettacars-ui", about = "Headless tools for the zettacars landing page")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the particle field for N frames on a headless surface.
    Simulate {
        /// Viewport width in CSS pixels.
        #[arg(short = 'W', long, default_value_t = 1280.0)]
        width: f64,

        /// Viewport height in CSS pixels.
        #[arg(short = 'H', long, default_value_t = 800.0)]
        height: f64,

        /// Device pixel ratio reported by the viewport.
        #[arg(long, default_value_t = 1.0)]
        pixel_ratio: f64,

        /// Number of frames to draw.
        #[arg(short, long, default_value_t = 600)]
        frames: u64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Theme: light or dark.
        #[arg(short, long, default_value = "dark")]
        theme: String,

        /// Resize the viewport to WIDTHxHEIGHT halfway through.
        #[arg(long)]
        resize_to: Option<String>,

        /// Particle parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Include every particle in the output.
        #[arg(long)]
        dump: bool,
    },
    /// Print the particle parameter schema and the page config for a profile.
    Schema {
        /// Page profile (full, minimal).
        #[arg(short, long, default_value = "full")]
        profile: String,
    },
}

struct SimulateArgs {
    viewport: Viewport,
    frames: u64,
    seed: u64,
    theme: Theme,
    resize_to: Option<(f64, f64)>,
    params: Value,
}

/// Parses `WIDTHxHEIGHT` into positive CSS extents.
fn parse_extent(raw: &str) -> Result<(f64, f64), CliError> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| CliError::Input(format!("expected WIDTHxHEIGHT, got '{raw}'")))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| CliError::Input(format!("bad extent '{s}': {e}")))
    };
    let (w, h) = (parse(w)?, parse(h)?);
    check_extent(w, h)?;
    Ok((w, h))
}

fn check_extent(width: f64, height: f64) -> Result<(), CliError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(UiError::InvalidDimensions.into())
    }
}

fn simulate(args: &SimulateArgs) -> Result<(FrameLoop<ParticleField>, HeadlessSurface), CliError> {
    check_extent(args.viewport.width, args.viewport.height)?;
    let mut surface = HeadlessSurface::new(args.viewport);
    let field = ParticleField::from_json(&mut surface, args.theme, args.seed, &args.params);
    let mut frame_loop = FrameLoop::new(field);

    let halfway = args.frames / 2;
    for frame in 0..args.frames {
        if frame == halfway {
            if let Some((w, h)) = args.resize_to {
                surface.set_viewport(Viewport::new(w, h, args.viewport.device_pixel_ratio));
                frame_loop.resize(&mut surface);
                tracing::debug!(frame, width = w, height = h, "viewport resized");
            }
        }
        if frame_loop.tick(&mut surface).is_break() {
            break;
        }
    }
    Ok((frame_loop, surface))
}

fn report(frame_loop: &FrameLoop<ParticleField>, surface: &HeadlessSurface, dump: bool) -> Value {
    let field = frame_loop.animation();
    let size = field.size();
    let bounds = field.bounds();
    let in_bounds = field
        .particles()
        .iter()
        .filter(|p| p.position.cmpge(DVec2::ZERO).all() && p.position.cmple(bounds).all())
        .count();
    let mut out = json!({
        "frames": frame_loop.frames(),
        "theme": field.theme(),
        "particles": field.len(),
        "in_bounds": in_bounds,
        "backing": [size.backing_width(), size.backing_height()],
        "css": [size.css_width, size.css_height],
        "pixel_ratio": size.pixel_ratio,
        "links_last_frame": surface.line_count(),
        "dots_last_frame": surface.circle_count(),
        "params": field.params(),
    });
    if dump {
        out["dump"] = json!(field.particles());
    }
    out
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema { profile } => {
            let profile = profile.parse()?;
            let config = PageConfig::for_profile(profile);
            let info = json!({
                "profiles": zettacars_ui_core::Profile::list_names(),
                "config": config,
                "particle_params": zettacars_ui_particles::param_schema(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Simulate {
            width,
            height,
            pixel_ratio,
            frames,
            seed,
            theme,
            resize_to,
            params,
            dump,
        } => {
            let params: Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let args = SimulateArgs {
                viewport: Viewport::new(width, height, pixel_ratio),
                frames,
                seed,
                theme: theme.parse()?,
                resize_to: resize_to.as_deref().map(parse_extent).transpose()?,
                params,
            };

            let (frame_loop, surface) = simulate(&args)?;
            let summary = report(&frame_loop, &surface, dump);
            tracing::info!(frames = frame_loop.frames(), seed, "simulation finished");

            if cli.json || dump {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{} frames, {} particles ({} in bounds), {}x{} backing at ratio {}, {} links / {} dots in last frame",
                    summary["frames"],
                    summary["particles"],
                    summary["in_bounds"],
                    summary["backing"][0],
                    summary["backing"][1],
                    summary["pixel_ratio"],
                    summary["links_last_frame"],
                    summary["dots_last_frame"],
                );
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(frames: u64) -> SimulateArgs {
        SimulateArgs {
            viewport: Viewport::new(800.0, 600.0, 1.0),
            frames,
            seed: 7,
            theme: Theme::Dark,
            resize_to: None,
            params: json!({}),
        }
    }

    #[test]
    fn simulate_runs_requested_frames() {
        let (frame_loop, surface) = simulate(&args(30)).unwrap();
        assert_eq!(frame_loop.frames(), 30);
        assert_eq!(surface.frames_cleared(), 30);
        assert_eq!(surface.circle_count(), 70);
    }

    #[test]
    fn simulate_is_deterministic_for_a_seed() {
        let (a, _) = simulate(&args(50)).unwrap();
        let (b, _) = simulate(&args(50)).unwrap();
        assert_eq!(a.animation().particles(), b.animation().particles());
    }

    #[test]
    fn simulate_applies_halfway_resize() {
        let mut a = args(20);
        a.resize_to = Some((400.0, 300.0));
        let (frame_loop, surface) = simulate(&a).unwrap();
        let size = surface.size().unwrap();
        assert_eq!(size.css_width, 400.0);
        assert_eq!(frame_loop.animation().size().backing_height(), 300);
    }

    #[test]
    fn simulate_rejects_empty_viewport() {
        let mut a = args(1);
        a.viewport = Viewport::new(0.0, 600.0, 1.0);
        let err = simulate(&a).err().unwrap();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn parse_extent_accepts_both_separators() {
        assert_eq!(parse_extent("640x480").unwrap(), (640.0, 480.0));
        assert_eq!(parse_extent("1024X768").unwrap(), (1024.0, 768.0));
    }

    #[test]
    fn parse_extent_rejects_garbage() {
        assert_eq!(parse_extent("640").unwrap_err().exit_code(), 12);
        assert_eq!(parse_extent("ax480").unwrap_err().exit_code(), 12);
        assert_eq!(parse_extent("0x480").unwrap_err().exit_code(), 10);
    }

    #[test]
    fn report_counts_particles_and_dump_is_optional() {
        let (frame_loop, surface) = simulate(&args(5)).unwrap();
        let summary = report(&frame_loop, &surface, false);
        assert_eq!(summary["particles"], 70);
        // A particle may sit one step past an edge before it turns back.
        assert!(summary["in_bounds"].as_u64().unwrap() >= 65);
        assert_eq!(summary["theme"], "dark");
        assert!(summary.get("dump").is_none());

        let dumped = report(&frame_loop, &surface, true);
        assert_eq!(dumped["dump"].as_array().map(Vec::len), Some(70));
    }
}
