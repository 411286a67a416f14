//! CLI for maze generation

use anyhow::Context;
use clap::Parser;
use log::info;

use braided_maze::maze_generator::MazeGenerator;

/// Generate a random maze and print it as ASCII art
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze height in cells
    #[arg(short = 'r', long, default_value_t = 10)]
    height: usize,

    /// Maze width in cells
    #[arg(short, long, default_value_t = 10)]
    width: usize,

    /// How likely the maze is to have loops, out of 10
    #[arg(short, long, default_value_t = 5)]
    braidiness: u32,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print at half width, every other character
    #[arg(long)]
    compact: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();
    info!("Generating maze with {:?}", args);

    let mut gen = MazeGenerator::new(args.seed);
    let maze = gen
        .generate_maze(args.width, args.height, args.braidiness)
        .context("Could not generate maze")?;

    if args.compact {
        maze.render_compact().for_each(|line| println!("{}", line));
    } else {
        maze.render().for_each(|line| println!("{}", line));
    }
    Ok(())
}
