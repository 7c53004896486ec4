#![deny(unsafe_code)]
//! CLI binary for the chaos-cycle particle system.
//!
//! Subcommands:
//! - `render` runs a preset headless for N ticks and writes a PNG
//! - `list` prints presets, force modules, and color modes

mod error;

use chaos_cycle_core::{ColorMode, ForceField, ModuleKind, Preset, SimulationLoop, Xorshift64};
use chaos_cycle_raster::HeadlessHost;
use clap::{Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(name = "chaos-cycle", about = "Chaotic particle field renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a preset for N ticks and write a PNG of the final frame.
    Render {
        /// Preset name (chaos-cycle, alien-chaos).
        #[arg(long, default_value = "chaos-cycle")]
        preset: String,

        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 512)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 512)]
        height: usize,

        /// Number of ticks (frames at 60 Hz).
        #[arg(short, long, default_value_t = 600)]
        ticks: usize,

        /// PRNG seed for deterministic output. Defaults to the system clock.
        #[arg(long)]
        seed: Option<u64>,

        /// Replace the preset's modules with this comma-separated list.
        #[arg(long, value_delimiter = ',')]
        modules: Option<Vec<String>>,

        /// Disable these modules (comma-separated).
        #[arg(long, value_delimiter = ',')]
        disable: Vec<String>,

        /// Color mode (hsl, oklch, white, or #rrggbb).
        #[arg(long)]
        color: Option<String>,

        /// Config overrides as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// List presets, force modules, and color modes.
    List,
}

fn build_field(names: &[String], rng: &mut Xorshift64) -> Result<ForceField, CliError> {
    names.iter().try_fold(ForceField::new(), |field, name| {
        Ok(field.with(ModuleKind::from_name(name.trim())?.build(rng)))
    })
}

/// The given seed, or the wall clock in nanoseconds.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let presets = Preset::list_names();
            let modules = ModuleKind::list_names();
            let colors = ColorMode::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "presets": presets,
                    "modules": modules,
                    "colors": colors,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                for name in presets {
                    println!("  {name}");
                }
                println!("Modules:");
                println!("  {}", modules.join(", "));
                println!("Colors:");
                println!("  {}", colors.join(", "));
            }
        }
        Command::Render {
            preset,
            width,
            height,
            ticks,
            seed,
            modules,
            disable,
            color,
            params,
            output,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let seed = resolve_seed(seed);
            log::info!("seed {seed}");

            // particle layout depends on the seed alone, not on the roster
            let mut rng = Xorshift64::new(seed);
            let mut module_rng = rng.fork();
            let (mut config, mut field) = Preset::from_name(&preset)?.build(&mut module_rng);
            if let Some(names) = &modules {
                field = build_field(names, &mut module_rng)?;
            }
            if let Some(color) = &color {
                config.style.color = ColorMode::from_name(color)?;
            }
            config.apply_json(&params);
            for name in &disable {
                if !field.set_enabled(name.trim(), false) {
                    return Err(CliError::Input(format!(
                        "cannot disable {name:?}: not in roster [{}]",
                        field.names().join(", ")
                    )));
                }
            }
            let enabled: Vec<String> = field.enabled_names().iter().map(|s| s.to_string()).collect();

            let mut host = HeadlessHost::new(width, height)?;
            let mut sim = SimulationLoop::new(config, field)?;
            sim.start(&mut host, &mut rng)?;
            let frames = chaos_cycle_raster::run(&mut sim, &mut host, ticks);
            sim.stop(&mut host);

            chaos_cycle_raster::snapshot::write_png(host.surface(), &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "preset": preset,
                    "width": width,
                    "height": height,
                    "ticks": frames,
                    "seed": seed,
                    "modules": enabled,
                    "particles": sim.particles().len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {preset} ({width}x{height}, {frames} ticks, seed {seed}, modules [{}]) -> {}",
                    enabled.join(", "),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_json()).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
