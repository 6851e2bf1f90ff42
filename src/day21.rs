// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use anyhow::Result;
use crate::grid::{Grid, DIRS};


#[derive(Clone, Copy, PartialEq, Eq)]
enum Tile { Plot, Rock }

struct Garden {
	map: Grid<Tile>,
	start: [usize; 2],
}

#[allow(dead_code)]
#[derive(Debug)]
enum ExtrapolationError {
	NotSquare { width: usize, height: usize },
	OffCenter { start: [usize; 2] },
	RockInRow(usize),
	RockInColumn(usize),
	OutOfRange { samples: [usize; 3], t: usize },
}

impl Garden {
	/// Returns the number of plots (on the infinitely repeating map) in which the elf can end up
	/// after exactly `steps` steps.
	///
	/// A plot first reached after `d` steps can be reached again after `d + 2`, `d + 4`, etc.
	/// steps (by stepping back and forth), so those are the plots at most `steps` away with the
	/// same parity.
	fn reachable(&self, steps: usize) -> usize {
		use std::collections::{HashSet, VecDeque};

		let start = [self.start[0] as isize, self.start[1] as isize];
		let mut queue = VecDeque::from([(start, 0)]);
		let mut seen = HashSet::from([start]);
		let mut count = 0;

		while let Some((pos, dist)) = queue.pop_front() {
			if dist % 2 == steps % 2 { count += 1 }
			if dist == steps { continue }

			for dir in DIRS {
				let [dx, dy] = dir.delta();
				let next = [pos[0] + dx, pos[1] + dy];
				if *self.map.get_wrapped(next) == Tile::Rock { continue }
				if !seen.insert(next) { continue }
				queue.push_back((next, dist + 1));
			}
		}

		count
	}

	/// Checks what makes the number of reachable plots grow quadratically (for every map size
	/// further), once the first few maps around the starting one are filled in: the elf starts
	/// at the center of a square map, and can walk straight out to the edges and along them.
	fn check_extrapolatable(&self) -> Result<(), ExtrapolationError> {
		use ExtrapolationError::*;

		let (width, height) = (self.map.width(), self.map.height());
		if width != height { return Err(NotSquare { width, height }) }
		if self.start != [width / 2, height / 2] { return Err(OffCenter { start: self.start }) }

		for y in [0, self.start[1], height - 1] {
			if self.map.row(y).contains(&Tile::Rock) { return Err(RockInRow(y)) }
		}
		for x in [0, self.start[0], width - 1] {
			if self.map.column(x).any(|&t| t == Tile::Rock) { return Err(RockInColumn(x)) }
		}

		Ok(())
	}

	/// Like [`Self::reachable`], but for a `steps` far too large to walk them all.
	///
	/// Samples the number of reachable plots at three points a map size apart and extrapolates
	/// the quadratic through them.
	fn reachable_extrapolated(&self, steps: usize) -> Result<usize, ExtrapolationError> {
		self.check_extrapolatable()?;

		let size = self.map.width();
		let (offset, t) = (steps % size, steps / size);
		let [a, b, c] = [0, 1, 2].map(|i| self.reachable(offset + i * size));
		tracing::debug!(size, offset, samples = ?[a, b, c], t, "extrapolating reachable plots");

		Quadratic::fit(a, b, c).at(t)
			.ok_or(ExtrapolationError::OutOfRange { samples: [a, b, c], t })
	}
}


/// A quadratic sequence, from its first value and first & second forward differences.
#[cfg_attr(test, derive(Debug, PartialEq))]
struct Quadratic { a: i64, ab: i64, abc: i64 }

impl Quadratic {
	/// Fits the quadratic with `a`, `b`, and `c` as its values at 0, 1, and 2.
	fn fit(a: usize, b: usize, c: usize) -> Self {
		let (a, b, c) = (a as i64, b as i64, c as i64);
		Quadratic { a, ab: b - a, abc: (c - b) - (b - a) }
	}

	/// Returns the value at `t`, unless it’s negative or doesn’t fit.
	fn at(&self, t: usize) -> Option<usize> {
		let t = i64::try_from(t).ok()?;
		let triangle = t.checked_mul(t - 1)? / 2;
		let value = self.ab.checked_mul(t)?
			.checked_add(self.abc.checked_mul(triangle)?)?
			.checked_add(self.a)?;
		usize::try_from(value).ok()
	}
}


fn part1_impl<const STEPS: usize>(input_garden: &Garden) -> usize {
	input_garden.reachable(STEPS)
}

pub(crate) fn part1(input: &str) -> Result<usize> {
	Ok(part1_impl::<64>(&parsing::try_garden_from_str(input).map_err(crate::invalid_input)?))
}


fn part2_impl<const STEPS: usize>(input_garden: &Garden) -> Result<usize, ExtrapolationError> {
	input_garden.reachable_extrapolated(STEPS)
}

pub(crate) fn part2(input: &str) -> Result<usize> {
	let garden = parsing::try_garden_from_str(input).map_err(crate::invalid_input)?;
	part2_impl::<26_501_365>(&garden).map_err(crate::invalid_input)
}


mod parsing {
	use crate::grid::parsing::{try_grid_from_str, GridError};
	use super::{Garden, Tile};

	#[derive(Clone, Copy, PartialEq, Eq)]
	enum Cell { Tile(Tile), Start }

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum GardenError {
		Grid(GridError),
		DuplicateStart { first: [usize; 2], second: [usize; 2] },
		RockAtStart,
	}

	pub(super) fn try_garden_from_str(s: &str) -> Result<Garden, GardenError> {
		let cells = try_grid_from_str(s, |c| match c {
			'.' => Some(Cell::Tile(Tile::Plot)),
			'#' => Some(Cell::Tile(Tile::Rock)),
			'S' => Some(Cell::Start),
			_ => None,
		}).map_err(GardenError::Grid)?;

		let mut start = None;
		for (pos, &cell) in cells.positions() {
			if cell != Cell::Start { continue }
			if let Some(first) = start.replace(pos) {
				return Err(GardenError::DuplicateStart { first, second: pos })
			}
		}
		// Without a marked start, the elf starts in the middle
		let start = start.unwrap_or([cells.width() / 2, cells.height() / 2]);
		if cells.get(start) == Some(&Cell::Tile(Tile::Rock)) { return Err(GardenError::RockAtStart) }

		let map = cells.map(|cell| match cell { Cell::Tile(tile) => tile, Cell::Start => Tile::Plot });
		Ok(Garden { map, start })
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	const INPUT: &str = indoc::indoc! { "
		...........
		.....###.#.
		.###.##..#.
		..#.#...#..
		....#.#....
		.##..S####.
		.##..#...#.
		.......##..
		.##.#.####.
		.##..##.##.
		...........
	" };

	fn input_garden_from_str(s: &str) -> Garden {
		parsing::try_garden_from_str(s).unwrap()
	}

	fn open_garden(size: usize) -> Garden {
		input_garden_from_str(&vec![".".repeat(size); size].join("\n"))
	}

	#[test]
	fn part1() {
		let garden = input_garden_from_str(INPUT);
		assert_eq!(garden.start, [5, 5]);
		assert_eq!(part1_impl::<6>(&garden), 16);
	}

	#[test]
	fn infinite() {
		let garden = input_garden_from_str(INPUT);
		assert_eq!(garden.reachable(10), 50);
		assert_eq!(garden.reachable(50), 1594);
		assert_eq!(garden.reachable(100), 6536);
	}

	#[test]
	fn small_steps() {
		let garden = input_garden_from_str(INPUT);
		assert_eq!(garden.reachable(0), 1);
		assert_eq!(garden.reachable(1), 2);
		assert_eq!(garden.reachable(2), 4);

		assert_eq!(open_garden(5).reachable(0), 1);
		assert_eq!(open_garden(5).reachable(2), 9);
	}

	#[test]
	fn monotonic() {
		let garden = input_garden_from_str(INPUT);
		for parity in 0..2 {
			let counts = (parity..40).step_by(2).map(|s| garden.reachable(s)).collect::<Vec<_>>();
			assert!(counts.windows(2).all(|w| w[0] <= w[1]), "{counts:?}");
		}
	}

	#[test]
	fn quadratic() {
		let (a, b, c) = (3_usize, 17, 59);
		let quadratic = Quadratic::fit(a, b, c);
		assert_eq!([0, 1, 2].map(|t| quadratic.at(t)), [Some(a), Some(b), Some(c)]);
		assert_eq!(quadratic, Quadratic { a: 3, ab: 14, abc: 28 });
		assert_eq!(quadratic.at(3), Some(129));

		// Shrinking samples run negative, and huge `t`s overflow
		let shrinking = Quadratic::fit(10, 5, 0);
		assert_eq!(shrinking.at(2), Some(0));
		assert_eq!(shrinking.at(3), None);
		assert_eq!(quadratic.at(usize::MAX), None);
		assert_eq!(quadratic.at(1 << 40), None);
	}

	#[test]
	fn part2() {
		// On an open map, exactly the plots within `steps` with the right parity are reachable
		let garden = open_garden(5);
		for steps in [2, 7, 102, 1_003] {
			assert_eq!(garden.reachable_extrapolated(steps).unwrap(), (steps + 1) * (steps + 1));
		}
		assert_eq!(garden.reachable_extrapolated(102).unwrap(), garden.reachable(102));
		assert_eq!(part2_impl::<26_501_365>(&open_garden(11)).unwrap(), 26_501_366 * 26_501_366);
	}

	#[test]
	fn not_extrapolatable() {
		assert!(matches!(input_garden_from_str(INPUT).reachable_extrapolated(5_000),
			Err(ExtrapolationError::RockInRow(5))));
		assert!(matches!(input_garden_from_str("...\n...").reachable_extrapolated(5_000),
			Err(ExtrapolationError::NotSquare { width: 3, height: 2 })));
		assert!(matches!(input_garden_from_str("S..\n...\n...").reachable_extrapolated(5_000),
			Err(ExtrapolationError::OffCenter { start: [0, 0] })));
		assert!(matches!(input_garden_from_str(".....\n.....\n..S..\n.....\n...#.").reachable_extrapolated(5_000),
			Err(ExtrapolationError::RockInRow(4))));
	}
}
