//! # GALAXIA Render
//!
//! Renders a TOML configuration and optionally writes the raw RGBA bytes.
//!
//! ```text
//! galaxia_render <config.toml> [out.rgba]
//! ```
//!
//! Without a config path the classic spiral preset is rendered.

use std::process::ExitCode;
use std::time::Instant;

use galaxia::{cache, Synthesizer, SynthesisConfig, SynthesizerConfig};

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let output_path = args.next();

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    GALAXIA RENDER v{}", env!("CARGO_PKG_VERSION"));
    println!("═══════════════════════════════════════════════════════════════════");
    println!();

    let config = match config_path.as_deref() {
        Some(path) => match SynthesisConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("  ✗ {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SynthesisConfig::default(),
    };

    let structural = &config.structural;
    let cosmetic = &config.cosmetic;
    println!("  Config:      {}", config_path.as_deref().unwrap_or("<classic spiral>"));
    println!("  Morphology:  {}", structural.morphology.kind());
    println!("  Size:        {}x{}", structural.width, structural.height);
    println!("  Seed:        {}", structural.seed);
    println!("  Structural:  {}", cache::structural_hash(structural));
    println!("  Cosmetic:    {}", cache::cosmetic_hash(cosmetic));
    println!("  Config hash: {}", cache::config_hash(structural, cosmetic));
    println!();

    let synth = Synthesizer::new(SynthesizerConfig::default());
    let start = Instant::now();
    let image = match synth.synthesize(structural, cosmetic) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("  ✗ {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("  ✓ Rendered in {:.1} ms", start.elapsed().as_secs_f64() * 1000.0);

    if let Some(path) = output_path {
        if let Err(e) = std::fs::write(&path, image.as_raw()) {
            eprintln!("  ✗ could not write {path}: {e}");
            return ExitCode::FAILURE;
        }
        println!("  ✓ Wrote {} bytes of RGBA to {path}", image.as_raw().len());
    }

    ExitCode::SUCCESS
}
