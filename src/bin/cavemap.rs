// src/bin/cavemap.rs
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use cavemap_core::{CaveMap, Difficulty};

#[derive(Parser)]
#[command(name = "cavemap", version, about = "Generate and inspect cave maps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a map and print it (optionally saving it to a file).
    Generate {
        /// Map size parameter, 2..=5.
        #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(2..=5))]
        size: u32,
        /// RNG seed for reproducible maps.
        #[arg(long)]
        seed: Option<u64>,
        /// Write the map file here.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load a map file and print its contents and profile parameters.
    Show {
        file: PathBuf,
        /// balanced, survivor or explorer.
        #[arg(short, long, default_value = "balanced")]
        profile: String,
        /// Scale the budget for a difficulty (easy or hard).
        #[arg(short, long)]
        difficulty: Option<String>,
    },
    /// Score an explicit path (comma-separated vertex ids) against the
    /// optimum for a profile.
    Score {
        file: PathBuf,
        /// balanced, survivor or explorer.
        #[arg(short, long, default_value = "balanced")]
        profile: String,
        /// Path walked, e.g. "0,4,2,7".
        path: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    match Cli::parse().command {
        Commands::Generate { size, seed, output } => generate(size, seed, output.as_deref()),
        Commands::Show { file, profile, difficulty } => show(&file, &profile, difficulty.as_deref()),
        Commands::Score { file, profile, path } => score(&file, &profile, &path),
    }
}

fn generate(size: u32, seed: Option<u64>, output: Option<&std::path::Path>) -> Result<()> {
    let map = match seed {
        Some(seed) => CaveMap::generate_seeded(size, seed)?,
        None => CaveMap::generate(size)?,
    };
    print_map(&map);
    if let Some(path) = output {
        map.save(path)?;
        println!("{} {}", "saved to".green(), path.display());
    }
    Ok(())
}

fn show(file: &std::path::Path, profile: &str, difficulty: Option<&str>) -> Result<()> {
    let map = CaveMap::load(file)?;
    print_map(&map);
    let params = map.get_parameters(profile)?;
    println!(
        "{} risk {} / cost {} via {}",
        profile.cyan().bold(),
        params.risk,
        params.cost,
        join_path(&params.path)
    );
    if let Some(name) = difficulty {
        let difficulty: Difficulty = name.parse()?;
        let (life, stamina) = params.budget(difficulty);
        println!("{name} budget: life {life} / stamina {stamina}");
    }
    Ok(())
}

fn score(file: &std::path::Path, profile: &str, path: &str) -> Result<()> {
    let map = CaveMap::load(file)?;
    let walked = parse_path(path)?;
    let (cost, risk) = map.get_stamina_life(&walked)?;
    let best = map.get_parameters(profile)?;
    println!("walked: risk {risk} / cost {cost}");
    println!(
        "{} optimum: risk {} / cost {}",
        profile.cyan().bold(),
        best.risk,
        best.cost
    );
    Ok(())
}

fn parse_path(raw: &str) -> Result<Vec<usize>> {
    raw.split(',')
        .map(|token| {
            token
                .trim()
                .parse()
                .with_context(|| format!("invalid vertex id {token:?}"))
        })
        .collect()
}

fn print_map(map: &CaveMap) {
    println!("{} (size {})", "cave map".bold(), map.size());
    for (id, (x, y)) in map.vertices() {
        let label = if id == 0 {
            "start".green().to_string()
        } else if id == map.exit() {
            "exit".green().to_string()
        } else if let Some(power) = map.entity_power(id) {
            format!("{}", format!("entity/{power}").red())
        } else {
            String::new()
        };
        println!("  {id:>3} at ({x:>2}, {y:>2}) {label}");
    }
    for edge in map.edges() {
        println!("  {} -> {} (weight {})", edge.from, edge.to, edge.weight);
    }
    println!(
        "  frontier: {}",
        map.frontier()
            .iter()
            .map(|(risk, entry)| format!("{risk}:{}", entry.cost))
            .collect::<Vec<_>>()
            .join(" ")
    );
}

fn join_path(path: &[usize]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
