#![deny(unsafe_code)]
//! CLI binary for the HueVault color engine.
//!
//! Subcommands:
//! - `generate`: a fresh palette, optionally pinned or with a fixed scheme
//! - `regenerate <HEX>...`: replace every color not named by `--lock`
//! - `expand <HEX>...`: append colors up to `--size`
//! - `simulate <HEX>...`: color-vision deficiency simulation
//! - `list`: available schemes, deficiencies and engine parameters
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use huevault_core::color::rgb_to_hsv;
use huevault_core::palette::expand_seed;
use huevault_core::{
    Deficiency, EngineConfig, Generation, Palette, PaletteEngine, Rgb, Scheme, Xorshift64,
};
use serde_json::{json, Value};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "huevault", about = "Palette generation and color-vision simulation")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Engine parameters as a JSON string (see `list` for keys).
    #[arg(long, global = true, default_value = "{}")]
    params: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a fresh palette.
    Generate {
        /// Number of colors (at least 2).
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// PRNG seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,

        /// Leading colors to keep verbatim (repeatable).
        #[arg(long = "pin", value_name = "HEX")]
        pinned: Vec<String>,

        /// Hue scheme to use instead of a random one (see `list`).
        #[arg(long)]
        scheme: Option<String>,
    },
    /// Replace every color whose index is not locked.
    Regenerate {
        /// Current palette colors.
        #[arg(required = true, value_name = "HEX")]
        colors: Vec<String>,

        /// Index to keep (repeatable).
        #[arg(long = "lock", value_name = "IDX")]
        locked: Vec<usize>,

        /// PRNG seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Append colors until the palette reaches a target size.
    Expand {
        /// Current palette colors.
        #[arg(required = true, value_name = "HEX")]
        colors: Vec<String>,

        /// Target palette size.
        #[arg(short, long)]
        size: usize,

        /// PRNG seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show how colors appear under a color-vision deficiency.
    Simulate {
        /// Colors to simulate.
        #[arg(required = true, value_name = "HEX")]
        colors: Vec<String>,

        /// Deficiency kind (protanopia, deuteranopia, tritanopia).
        #[arg(short, long)]
        kind: String,
    },
    /// List schemes, deficiencies and engine parameters.
    List,
}

fn engine_from_params(params: &str) -> Result<PaletteEngine, CliError> {
    let params: Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    Ok(PaletteEngine::new(EngineConfig::from_json(&params))?)
}

/// Hex, RGB triple and HSV triple for one color.
fn color_json(c: Rgb) -> Value {
    let hsv = rgb_to_hsv(c);
    json!({
        "hex": c.to_hex(),
        "rgb": [c.r, c.g, c.b],
        "hsv": [hsv.h, hsv.s, hsv.v],
    })
}

fn generation_json(g: &Generation) -> Value {
    json!({
        "palette": g.palette,
        "colors": g.palette.iter().map(|&c| color_json(c)).collect::<Vec<_>>(),
        "scheme": g.scheme,
        "outcomes": g.outcomes,
    })
}

fn print_generation(g: &Generation, json_mode: bool) -> Result<(), CliError> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&generation_json(g))?);
        return Ok(());
    }
    for c in &g.palette {
        println!("{c}");
    }
    if let Some(scheme) = g.scheme {
        eprintln!("scheme: {scheme}");
    }
    let exhausted = g.exhausted_count();
    if exhausted > 0 {
        eprintln!("{exhausted} color(s) could not keep the minimum distance");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let schemes: Vec<&str> = Scheme::ALL.iter().map(|s| s.name()).collect();
            let deficiencies: Vec<&str> = Deficiency::ALL.iter().map(|d| d.name()).collect();
            let params = EngineConfig::schema();
            if cli.json {
                let info = json!({
                    "schemes": schemes,
                    "deficiencies": deficiencies,
                    "params": params,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Schemes:");
                println!("  {}", schemes.join(", "));
                println!("Deficiencies:");
                println!("  {}", deficiencies.join(", "));
                println!("Params:");
                if let Some(entries) = params.as_object() {
                    for (name, entry) in entries {
                        println!("  {name} (default {})", entry["default"]);
                    }
                }
            }
        }
        Command::Generate {
            count,
            seed,
            pinned,
            scheme,
        } => {
            let engine = engine_from_params(&cli.params)?;
            let scheme = scheme.as_deref().map(str::parse::<Scheme>).transpose()?;
            let mut rng = Xorshift64::from_seed(seed);
            let generation = if pinned.is_empty() {
                engine.generate_with_scheme(count, scheme, &mut rng)
            } else {
                let pinned = Palette::from_hex(&pinned[..])?;
                engine.generate_with_pinned(count, &pinned, scheme, &mut rng)
            };
            print_generation(&generation, cli.json)?;
        }
        Command::Regenerate {
            colors,
            locked,
            seed,
        } => {
            let engine = engine_from_params(&cli.params)?;
            let palette = Palette::from_hex(&colors[..])?;
            let mut rng = Xorshift64::from_seed(seed);
            let generation = engine.regenerate(&palette, &locked, &mut rng);
            print_generation(&generation, cli.json)?;
        }
        Command::Expand { colors, size, seed } => {
            let engine = engine_from_params(&cli.params)?;
            let palette = Palette::from_hex(&colors[..])?;
            let mut rng = Xorshift64::from_seed(expand_seed(seed, palette.len()));
            let generation = engine.expand(&palette, size, &mut rng);
            print_generation(&generation, cli.json)?;
        }
        Command::Simulate { colors, kind } => {
            let deficiency: Deficiency = kind.parse()?;
            let palette = Palette::from_hex(&colors[..])?;
            let simulated = deficiency.simulate_palette(&palette);
            if cli.json {
                let pairs: Vec<Value> = palette
                    .iter()
                    .zip(simulated.iter())
                    .map(|(&from, &to)| json!({"input": from, "simulated": color_json(to)}))
                    .collect();
                let info = json!({"kind": deficiency, "colors": pairs});
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for (from, to) in palette.iter().zip(simulated.iter()) {
                    println!("{from} -> {to}");
                }
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
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
