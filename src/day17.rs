// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use anyhow::{Context as _, Result};
use crate::grid::{Dir, Grid};


type HeatLossMap = Grid<u8>;

/// Number of buckets in the queue; must exceed the largest heat loss of a single block.
const WINDOW: usize = 10;


#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct Crucible {
	pos: [usize; 2],
	dir: Dir,
	/// Blocks moved in `dir` without turning.
	run: u8,
}

/// Returns the least heat lost getting a crucible from the top-left to the bottom-right block,
/// or `None` if it can’t get there within the given run limits.
///
/// The crucible must move at least `min_run` blocks in a direction before it can turn (or stop
/// at the end) and at most `max_run` blocks before it must turn. It never reverses.
fn min_heat_loss(map: &HeatLossMap, min_run: u8, max_run: u8) -> Option<usize> {
	use std::collections::{HashMap, hash_map::Entry::*};

	// Dijkstra, with a bucket queue instead of a heap. Heat losses are
	// single digits, so all queued costs lie within `WINDOW` of the one
	// being processed and each bucket only ever holds a single cost.
	let mut buckets: [Vec<Crucible>; WINDOW] = Default::default();
	let mut best = HashMap::new();
	let mut queued = 0_usize;

	let goal = [map.width() - 1, map.height() - 1];

	for dir in [Dir::East, Dir::South] {
		let crucible = Crucible { pos: [0, 0], dir, run: 0 };
		best.insert(crucible, 0);
		buckets[0].push(crucible);
		queued += 1;
	}

	let mut cost = 0;
	while queued > 0 {
		while let Some(crucible) = buckets[cost % WINDOW].pop() {
			queued -= 1;
			if best.get(&crucible).map_or(false, |&c| c < cost) { continue }

			if crucible.pos == goal && crucible.run >= min_run {
				tracing::debug!(min_run, max_run, cost, "crucible reached the goal");
				return Some(cost)
			}

			let straight = (crucible.run < max_run)
				.then_some((crucible.dir, crucible.run + 1));
			let turns = (crucible.run >= min_run)
				.then(|| [(crucible.dir.turn_left(), 1), (crucible.dir.turn_right(), 1)]);

			for (dir, run) in straight.into_iter().chain(turns.into_iter().flatten()) {
				let Some(pos) = map.step(crucible.pos, dir) else { continue };
				let Some(&loss) = map.get(pos) else { continue };
				let next = Crucible { pos, dir, run };
				let next_cost = cost + loss as usize;
				match best.entry(next) {
					Vacant(entry) => { entry.insert(next_cost); }
					Occupied(mut entry) => {
						if next_cost >= *entry.get() { continue }
						*entry.get_mut() = next_cost;
					}
				}
				buckets[next_cost % WINDOW].push(next);
				queued += 1;
			}
		}
		cost += 1;
	}

	None
}


fn part_impl(map: &HeatLossMap, min_run: u8, max_run: u8) -> Result<usize> {
	min_heat_loss(map, min_run, max_run)
		.with_context(|| format!("No path for a crucible moving {min_run} to {max_run} blocks at a time"))
}

fn part1_impl(input_map: &HeatLossMap) -> Result<usize> {
	part_impl(input_map, 0, 3)
}

pub(crate) fn part1(input: &str) -> Result<usize> {
	part1_impl(&parsing::try_map_from_str(input).map_err(crate::invalid_input)?)
}


fn part2_impl(input_map: &HeatLossMap) -> Result<usize> {
	part_impl(input_map, 4, 10)
}

pub(crate) fn part2(input: &str) -> Result<usize> {
	part2_impl(&parsing::try_map_from_str(input).map_err(crate::invalid_input)?)
}


mod parsing {
	use crate::grid::parsing::{try_grid_from_str, GridError};
	use super::HeatLossMap;

	pub(super) fn try_map_from_str(s: &str) -> Result<HeatLossMap, GridError> {
		try_grid_from_str(s, |c| c.to_digit(10).map(|d| d as u8))
	}
}
