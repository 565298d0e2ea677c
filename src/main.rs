use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use countdown_env::{
    all_level_configs, format_number, generate_batch, GameLevel, GameState, GeneratorConfig,
    PuzzleGenerator,
};

// ============================================================================
// 命令列介面
// ============================================================================

#[derive(Debug, Parser)]
#[command(author, version, about = "Arithmetic numbers puzzle engine")]
struct Cli {
    /// Generator configuration JSON (missing fields use defaults)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a new game and print its record as JSON
    New {
        /// Level: 1-4 or easy / medium / hard / very-hard
        #[arg(long, default_value = "easy")]
        level: String,
        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Apply moves ("first,second,op") to a saved game
    Play {
        /// Saved game record
        #[arg(long, value_name = "FILE")]
        state: PathBuf,
        /// Write the updated record here
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Moves, e.g. 0,1,+ 2,0,*
        #[arg(value_name = "MOVE")]
        moves: Vec<String>,
    },
    /// Generate many games in parallel, one JSON record per line
    Batch {
        #[arg(long, default_value = "easy")]
        level: String,
        #[arg(long, default_value_t = 10)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Print the level table
    Levels,
}

// ============================================================================
// 子命令
// ============================================================================

fn load_generator(path: Option<&PathBuf>) -> Result<PuzzleGenerator> {
    let config = match path {
        Some(path) => GeneratorConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    Ok(PuzzleGenerator::new(config))
}

/// 解析 "first,second,op"
fn parse_move(text: &str) -> Result<(i64, i64, String)> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [first, second, op] = parts.as_slice() else {
        bail!("move must look like first,second,op: {:?}", text);
    };
    let first = first.parse().with_context(|| format!("bad first index in {:?}", text))?;
    let second = second.parse().with_context(|| format!("bad second index in {:?}", text))?;
    Ok((first, second, op.to_string()))
}

fn run_new(generator: &PuzzleGenerator, level: &str, seed: Option<u64>) -> Result<()> {
    let level = GameLevel::parse(level)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let state = GameState::new_game(generator, &mut rng, level);
    info!(
        "new {:?} game: {:?} -> {}",
        level,
        state.numbers(),
        format_number(state.target())
    );
    println!("{}", state.to_json()?);
    Ok(())
}

fn run_play(state_path: &PathBuf, out: Option<&PathBuf>, moves: &[String]) -> Result<()> {
    let text = fs::read_to_string(state_path)
        .with_context(|| format!("reading {}", state_path.display()))?;
    let mut state = GameState::from_json(&text)
        .with_context(|| format!("loading game from {}", state_path.display()))?;

    for text in moves {
        let (first, second, op) = parse_move(text)?;
        state
            .add_play_raw(first, second, &op)
            .with_context(|| format!("invalid move {:?}", text))?;
    }

    println!("target:  {}", format_number(state.target()));
    println!("numbers: {}", state.labels().join("  |  "));
    match state.current_result() {
        Some(result) if state.is_solved() => println!("solved:  {}", format_number(result)),
        Some(result) => println!("result:  {} (not the target)", format_number(result)),
        None => println!("remaining: {}", state.current_numbers().len()),
    }

    if let Some(out) = out {
        fs::write(out, state.to_json()?).with_context(|| format!("writing {}", out.display()))?;
        info!("saved {} plays to {}", state.plays().len(), out.display());
    }
    Ok(())
}

fn run_batch(generator: &PuzzleGenerator, level: &str, count: usize, seed: u64) -> Result<()> {
    let level = GameLevel::parse(level)?;
    for state in generate_batch(generator, level, count, seed) {
        println!("{}", state.to_json()?);
    }
    Ok(())
}

fn run_levels() -> Result<()> {
    for config in all_level_configs() {
        println!("{}", serde_json::to_string(config)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let generator = load_generator(cli.config.as_ref())?;
    match &cli.command {
        Command::New { level, seed } => run_new(&generator, level, *seed),
        Command::Play { state, out, moves } => run_play(state, out.as_ref(), moves),
        Command::Batch { level, count, seed } => run_batch(&generator, level, *count, *seed),
        Command::Levels => run_levels(),
    }
}
