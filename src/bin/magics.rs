//! Magic number generator - search, verify and print slider magics
//!
//! Usage: cargo run --release --bin magics -- --seed 42 --verify
//!
//! The tables go to stdout as Rust arrays, progress and stats to stderr.

use std::time::Instant;

use chess_rules::magic::{MagicEntry, MagicSearchConfig, MagicTables, DEFAULT_MAX_ATTEMPTS};
use chess_rules::Slider;
use clap::{Parser, ValueEnum};
use color_eyre::eyre::{bail, Result};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SliderArg {
    Rook,
    Bishop,
    Both,
}

impl SliderArg {
    fn sliders(self) -> Vec<Slider> {
        match self {
            SliderArg::Rook => vec![Slider::Rook],
            SliderArg::Bishop => vec![Slider::Bishop],
            SliderArg::Both => Slider::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "magics")]
#[command(about = "Search magic multipliers for rook and bishop attack tables")]
struct Args {
    /// Base seed; omit to draw one from entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on a square after this many candidates
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u64,

    /// Which slider tables to print
    #[arg(long, value_enum, default_value_t = SliderArg::Both)]
    slider: SliderArg,

    /// Re-check every blocker subset against the ray cast
    #[arg(long)]
    verify: bool,
}

fn print_table(slider: Slider, entries: &[MagicEntry]) {
    println!(
        "pub const {}_MAGICS: [u64; 64] = [",
        slider.to_human().to_uppercase()
    );
    for row in entries.chunks(4) {
        let line = row
            .iter()
            .map(|e| format!("0x{:016X}", e.magic))
            .collect::<Vec<_>>()
            .join(", ");
        println!("    {},", line);
    }
    println!("];\n");
}

fn print_stats(slider: Slider, entries: &[MagicEntry]) {
    let total: u64 = entries.iter().map(|e| e.attempts).sum();
    let worst = entries
        .iter()
        .enumerate()
        .max_by_key(|(_, e)| e.attempts)
        .map(|(sq, e)| (sq, e.attempts))
        .unwrap_or((0, 0));
    eprintln!(
        "{:>6}: {:>10} attempts total, {:>8.1} avg, worst square {} ({} attempts)",
        slider.to_human(),
        total,
        total as f64 / entries.len().max(1) as f64,
        worst.0,
        worst.1
    );
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let timestamp = chrono::Utc::now().to_rfc3339();
    eprintln!("Magic search");
    eprintln!("============");
    eprintln!("Time:         {}", timestamp);
    eprintln!("Max attempts: {}\n", args.max_attempts);

    let config = MagicSearchConfig {
        seed: args.seed,
        max_attempts: args.max_attempts,
    };

    let start = Instant::now();
    let tables = MagicTables::build(&config)?;
    eprintln!("Seed:         {}", tables.seed);
    eprintln!("Search took:  {:.2?}", start.elapsed());
    eprintln!("Table slots:  {}\n", tables.table_len());

    if args.verify {
        let start = Instant::now();
        if let Some((slider, sq, occ)) = tables.first_mismatch() {
            bail!("{slider} table for square {sq} disagrees with the ray cast at occupancy 0x{occ:016X}");
        }
        eprintln!("Verified all blocker subsets in {:.2?}\n", start.elapsed());
    }

    println!("// generated {} with seed {}\n", timestamp, tables.seed);
    for slider in args.slider.sliders() {
        let entries = match slider {
            Slider::Rook => &tables.rook,
            Slider::Bishop => &tables.bishop,
        };
        print_stats(slider, entries);
        print_table(slider, entries);
    }

    Ok(())
}
