// Copyright (c) 2022 Bastiaan Marinus van de Weerd

mod grid;
mod ints;

use anyhow::{bail, Context as _, Result};
use clap::Parser;


macro_rules! days {
	( $( $day:literal => [ $( $part:ident ),+ ] ),+ $(,)? ) => { paste::paste! {
		$( mod [<day $day>]; )+

		#[allow(clippy::zero_prefixed_literal)]
		const DAYS: &[u8] = &[ $( $day ),+ ];

		/// Returns the label and answer of each part of the given day’s puzzle.
		#[allow(clippy::zero_prefixed_literal)]
		fn solve(day: u8, input: &str) -> Result<Vec<(&'static str, String)>> {
			Ok(match day {
				$( $day => vec![ $(
					(stringify!($part), [<day $day>]::$part(input)
						.with_context(|| format!("Day {day}, {}", stringify!($part)))?
						.to_string()),
				)+ ], )+
				_ => bail!("No solution for day {day} (available: {DAYS:?})"),
			})
		}
	} }
}

days! {
	09 => [part1, part2],
	12 => [part1, part2],
	17 => [part1, part2],
	20 => [part1, part2],
	21 => [part1, part2],
	23 => [part1, part2],
	25 => [part1],
}


/// Lifts a puzzle-specific error (which only implements [`Debug`](std::fmt::Debug))
/// into an [`anyhow::Error`].
pub(crate) fn invalid_input(err: impl std::fmt::Debug) -> anyhow::Error {
	anyhow::anyhow!("Invalid input: {err:?}")
}


#[derive(Parser)]
#[command(name = "advent23")]
#[command(about = "Solves a day of Advent of Code 2023, reading the puzzle input from stdin")]
struct Cli {
	/// Day of the puzzle to solve
	day: u8,

	/// Log more (repeat for even more)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn main() -> Result<()> {
	use {std::io::Read as _, tracing::Level};

	let cli = Cli::parse();

	let level = match cli.verbose {
		0 => Level::WARN,
		1 => Level::INFO,
		2 => Level::DEBUG,
		_ => Level::TRACE,
	};
	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_writer(std::io::stderr)
		.init();

	let mut input = String::new();
	std::io::stdin().read_to_string(&mut input)
		.context("Failed to read puzzle input from stdin")?;
	tracing::info!(day = cli.day, len = input.len(), "solving");

	for (part, answer) in solve(cli.day, input.trim_end())? {
		println!("{part} {answer}");
	}

	Ok(())
}
