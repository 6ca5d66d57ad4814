use docopt::Docopt;
use serde_derive::{Deserialize, Serialize};
use mazes::{
    cells::Coordinate,
    rng::RngSource,
    serialization::MazeArrays,
    Maze,
};
use std::{
    io,
    io::prelude::*,
    fs::File,
};
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--grid-size=<n>] [--seed=<s>] [--out=<path>] [--show-solution]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n, at least 2 [default: 8].
    --seed=<s>             Seed the random source so the same maze comes out every time.
    --out=<path>           Output file path for the JSON maze arrays. Written to stdout if not given.
    --show-solution        Include the cells on the path from the start to the finish.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: usize,
    flag_seed: Option<u64>,
    flag_out: String,
    flag_show_solution: bool,
}

#[derive(Debug, Serialize)]
struct DriverOutput {
    #[serde(flatten)]
    arrays: MazeArrays,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Vec<Coordinate>>,
}

// Create the Error, ErrorKind, ResultExt, and Result types for the driver.
// The library's own errors are chained in through `links`.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazes::errors::Error, ::mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Json(::serde_json::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let maze = match args.flag_seed {
        Some(seed) => Maze::generate(args.flag_grid_size, &mut RngSource::seeded(seed))?,
        None => Maze::generate(args.flag_grid_size, &mut RngSource::from_entropy())?,
    };
    info!(size = args.flag_grid_size,
          seed = ?args.flag_seed,
          tiles = maze.tiles().len(),
          "generated maze");

    let output = DriverOutput {
        arrays: maze.arrays(),
        solution: if args.flag_show_solution { maze.solution() } else { None },
    };
    let json = serde_json::to_string_pretty(&output)?;

    if args.flag_out.is_empty() {
        println!("{}", json);
    } else {
        write_text_to_file(&json, &args.flag_out)
            .chain_err(|| format!("Failed to write maze arrays to file {}", args.flag_out))?;
        info!(path = %args.flag_out, "wrote maze arrays");
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
