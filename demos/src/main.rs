//! `labyrinth`: generate mazes and watch the search algorithms solve them.
//!
//! Run: cargo run --bin labyrinth -- solve --rows 21 --cols 41 --all

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use labyrinth_core::Cell;
use labyrinth_demos::{
    DEFAULT_COLS, DEFAULT_ROWS, GridSource, Overlay, endpoints, parse_cell, render, summary,
};
use labyrinth_paths::{Algorithm, DriverConfig, DriverEvent, SolveProgress, TraceDriver};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "labyrinth")]
#[command(about = "Grid pathfinding and maze generation demos")]
struct Cmd {
    /// Log debug output from the engine
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate a maze and print or save it
    Generate {
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: i32,
        #[arg(long, default_value_t = DEFAULT_COLS)]
        cols: i32,
        #[arg(long)]
        seed: Option<u64>,
        /// Write the maze in the text exchange format instead of drawing it
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Solve a grid and draw the resulting path
    Solve {
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long, default_value = "astar")]
        algorithm: Algorithm,
        /// Run every algorithm
        #[arg(long)]
        all: bool,
    },
    /// Animate a traced solve
    Trace {
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long, default_value = "astar")]
        algorithm: Algorithm,
        /// Delay between steps, in milliseconds
        #[arg(long, default_value_t = 100)]
        interval: u64,
        /// Print every step as a JSON line instead of drawing frames
        #[arg(long)]
        json: bool,
        /// Stop animating after this many steps and jump to the result
        #[arg(long)]
        skip_after: Option<usize>,
    },
}

#[derive(Args)]
struct GridArgs {
    /// Load the grid from a file
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: i32,
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: i32,
    #[arg(long)]
    seed: Option<u64>,
    /// Use an empty grid instead of a maze
    #[arg(long)]
    empty: bool,
    /// Start cell as ROW,COL (default: bottom-right corner)
    #[arg(long, value_parser = parse_cell)]
    source: Option<Cell>,
    /// Goal cell as ROW,COL (default: top-left corner)
    #[arg(long, value_parser = parse_cell)]
    target: Option<Cell>,
}

impl GridArgs {
    fn grid_source(&self) -> GridSource {
        match (&self.input, self.empty) {
            (Some(path), _) => GridSource::File(path.clone()),
            (None, true) => GridSource::Empty {
                rows: self.rows,
                cols: self.cols,
            },
            (None, false) => GridSource::Maze {
                rows: self.rows,
                cols: self.cols,
                seed: self.seed,
            },
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let filter = if cmd.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cmd.action {
        Action::Generate {
            rows,
            cols,
            seed,
            output,
        } => generate(rows, cols, seed, output),
        Action::Solve {
            grid,
            algorithm,
            all,
        } => solve(&grid, algorithm, all),
        Action::Trace {
            grid,
            algorithm,
            interval,
            json,
            skip_after,
        } => trace(&grid, algorithm, Duration::from_millis(interval), json, skip_after),
    }
}

fn generate(rows: i32, cols: i32, seed: Option<u64>, output: Option<PathBuf>) -> Result<()> {
    let maze = GridSource::Maze { rows, cols, seed }.build()?;
    match output {
        Some(path) => labyrinth_io::save(&maze, path)?,
        None => print!("{}", render(&maze, &Overlay::default())),
    }
    Ok(())
}

fn solve(args: &GridArgs, algorithm: Algorithm, all: bool) -> Result<()> {
    let mut grid = args.grid_source().build()?;
    let (source, target) = endpoints(&mut grid, args.source, args.target)?;
    log::info!("solving {}x{} grid from {source} to {target}", grid.rows(), grid.cols());
    let algorithms: Vec<Algorithm> = if all {
        Algorithm::ALL.to_vec()
    } else {
        vec![algorithm]
    };
    for algo in algorithms {
        let path = algo.solve(&grid, source, target);
        println!("{algo}: {}", summary(source, target, &path));
        let overlay = Overlay {
            source: Some(source),
            target: Some(target),
            path: &path,
            ..Overlay::default()
        };
        println!("{}", render(&grid, &overlay));
    }
    Ok(())
}

fn trace(
    args: &GridArgs,
    algorithm: Algorithm,
    interval: Duration,
    json: bool,
    skip_after: Option<usize>,
) -> Result<()> {
    let mut grid = args.grid_source().build()?;
    let (source, target) = endpoints(&mut grid, args.source, args.target)?;
    let config = DriverConfig {
        interval,
        ..DriverConfig::default()
    };
    let driver = TraceDriver::spawn(algorithm, grid.clone(), source, target, config);
    let mut progress = SolveProgress::new(source, target);
    let mut final_path = Vec::new();

    for event in driver.iter() {
        match event {
            DriverEvent::Step(step) => {
                progress.apply(&step);
                if json {
                    println!("{}", serde_json::to_string(&step)?);
                } else if skip_after.is_none_or(|n| progress.steps_applied() <= n) {
                    let current = progress.current();
                    let partial = progress.partial_path().to_vec();
                    let overlay = Overlay {
                        source: Some(source),
                        target: Some(target),
                        path: &partial,
                        used: Some(progress.used()),
                        current,
                    };
                    // Clear screen and home the cursor between frames.
                    print!("\x1b[2J\x1b[H{}", render(&grid, &overlay));
                    println!("step {}", progress.steps_applied());
                }
                if skip_after == Some(progress.steps_applied()) {
                    driver.skip();
                }
            }
            DriverEvent::Finished { path } => final_path = path,
        }
    }
    driver.join();

    if !json {
        let overlay = Overlay {
            source: Some(source),
            target: Some(target),
            path: &final_path,
            used: Some(progress.used()),
            current: None,
        };
        print!("{}", render(&grid, &overlay));
    }
    println!(
        "{algorithm}: {} ({} steps)",
        summary(source, target, &final_path),
        progress.steps_applied()
    );
    Ok(())
}
