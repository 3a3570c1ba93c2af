#![deny(unsafe_code)]
//! CLI binary for the constellation background.
//!
//! Subcommands:
//! - `render` — run a field headlessly for N frames, write the last frame as PNG
//! - `trace` — run a field headlessly, print the last frame's draw calls as JSON
//! - `list` — print page presets and field parameters

mod error;
mod logging;

use clap::{Args, Parser, Subcommand};
use constellation_core::field::FieldParams;
use constellation_core::{FieldSeed, PagePreset, RecordingSurface, Srgb};
use constellation_raster::Raster;
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "constellation", about = "Headless renderer for the constellation background")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every command that runs a field.
#[derive(Args)]
struct FieldArgs {
    /// Page preset (home, skills, project, contact).
    #[arg(long, default_value = "home")]
    preset: String,

    /// Surface width in pixels.
    #[arg(short = 'W', long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels.
    #[arg(short = 'H', long, default_value_t = 720)]
    height: u32,

    /// Number of frames to advance.
    #[arg(short, long, default_value_t = 120)]
    frames: usize,

    /// PRNG seed for the particle layout.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Field parameter overrides as a JSON object.
    #[arg(long, default_value = "{}")]
    params: String,
}

impl FieldArgs {
    fn to_seed(&self) -> Result<FieldSeed, CliError> {
        let params: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        if !params.is_object() {
            return Err(CliError::Input("--params must be a JSON object".into()));
        }
        let mut seed = FieldSeed::new(&self.preset, self.width, self.height, self.seed);
        seed.params = params;
        seed.frames = self.frames;
        seed.validate()?;
        Ok(seed)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Advance a field for N frames and write the last frame as PNG.
    Render {
        #[command(flatten)]
        field: FieldArgs,

        /// Opaque background color as #rrggbb (transparent if omitted).
        #[arg(short, long)]
        background: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "constellation.png")]
        output: PathBuf,
    },
    /// Advance a field for N frames and print the last frame's draw calls.
    Trace {
        #[command(flatten)]
        field: FieldArgs,
    },
    /// List page presets and field parameters.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let names = PagePreset::list_names();
            if cli.json {
                let presets = names
                    .iter()
                    .map(|&name| -> Result<serde_json::Value, CliError> {
                        let preset = PagePreset::from_name(name)?;
                        Ok(serde_json::json!({
                            "name": name,
                            "canvas_id": preset.canvas_id(),
                            "parallax_layers": preset.parallax_layers(),
                            "params": preset.params().to_json(),
                        }))
                    })
                    .collect::<Result<Vec<_>, CliError>>()?;
                let info = serde_json::json!({
                    "presets": presets,
                    "param_schema": FieldParams::schema(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                for &name in names {
                    let preset = PagePreset::from_name(name)?;
                    println!("  {name:<8} #{}", preset.canvas_id());
                }
                println!("Parameters:");
                let schema = FieldParams::schema();
                if let Some(params) = schema.as_object() {
                    for (key, spec) in params {
                        println!("  {key:<20} default {}", spec["default"]);
                    }
                }
            }
        }
        Command::Render {
            field,
            background,
            output,
        } => {
            let seed = field.to_seed()?;
            let mut raster = Raster::new(seed.width, seed.height)?;
            if let Some(hex) = background {
                let bg = Srgb::from_hex(&hex).map_err(|e| CliError::Input(e.to_string()))?;
                raster = raster.with_background(bg);
            }

            let animation = seed.play(raster)?;
            constellation_raster::snapshot::write_png(animation.surface(), &output)?;

            let links = animation.field().map_or(0, |f| f.links().len());
            if cli.json {
                let info = serde_json::json!({
                    "preset": seed.preset,
                    "width": seed.width,
                    "height": seed.height,
                    "frames": animation.frames_drawn(),
                    "seed": seed.seed,
                    "links": links,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, {} frames, seed {}, {links} links) -> {}",
                    seed.preset,
                    seed.width,
                    seed.height,
                    animation.frames_drawn(),
                    seed.seed,
                    output.display()
                );
            }
        }
        Command::Trace { field } => {
            let seed = field.to_seed()?;
            let surface = RecordingSurface::new(seed.width as f64, seed.height as f64);
            let animation = seed.play(surface)?;
            let particles = animation.field().map_or(&[][..], |f| f.particles());
            let trace = serde_json::json!({
                "preset": seed.preset,
                "frames": animation.frames_drawn(),
                "particles": particles,
                "commands": animation.surface().commands(),
            });
            println!("{}", serde_json::to_string_pretty(&trace)?);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let _logger = logging::setup()
        .map_err(|e| eprintln!("warning: logging disabled: {e}"))
        .ok();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        log::debug!("exiting with code {}", e.exit_code());
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
