// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use anyhow::{Context as _, Result};
use crate::grid::{Dir, Grid};


#[derive(Clone, Copy, PartialEq, Eq)]
enum Tile { Path, Forest, Slope(Dir) }

struct Trails {
	map: Grid<Tile>,
	start: [usize; 2],
	goal: [usize; 2],
}

/// The trails between junctions (and the start and goal), with their lengths.
struct Hike {
	/// Per junction, the junctions reachable from it and the steps it takes to get there.
	edges: Vec<Vec<(usize, usize)>>,
	start: usize,
	goal: usize,
}

#[allow(dead_code)]
#[derive(Debug)]
enum HikeError {
	TooManyJunctions(usize),
}

impl Trails {
	fn is_open(&self, pos: [usize; 2]) -> bool {
		!matches!(self.map.get(pos), None | Some(Tile::Forest))
	}

	/// Returns the positions one step from `pos`, which are forced downhill on slippery slopes.
	fn moves(&self, pos: [usize; 2], slippery: bool) -> impl Iterator<Item = [usize; 2]> + '_ {
		let downhill = match self.map.get(pos) {
			Some(&Tile::Slope(dir)) if slippery => Some(dir),
			_ => None,
		};
		self.map.adjacent(pos)
			.filter(move |&(next, dir)| downhill.map_or(true, |d| d == dir) && self.is_open(next))
			.map(|(next, _)| next)
	}

	fn hike(&self, slippery: bool) -> Result<Hike, HikeError> {
		use std::collections::HashMap;

		let mut junctions = vec![self.start];
		junctions.extend(self.map.positions()
			.filter(|&(pos, &tile)| tile == Tile::Path
				&& pos != self.start && pos != self.goal
				&& self.map.adjacent(pos).filter(|&(next, _)| self.is_open(next)).count() > 2)
			.map(|(pos, _)| pos));
		junctions.push(self.goal);
		if junctions.len() > u64::BITS as usize { return Err(HikeError::TooManyJunctions(junctions.len())) }

		let index = junctions.iter().enumerate()
			.map(|(i, &pos)| (pos, i))
			.collect::<HashMap<_, _>>();
		let max_len = self.map.width() * self.map.height();

		let mut edges = vec![Vec::new(); junctions.len()];
		for (from, &pos) in junctions.iter().enumerate() {
			if from == junctions.len() - 1 { continue }
			for next in self.moves(pos, slippery) {
				// Follow the trail until the next junction, unless it’s a dead end
				let (mut last, mut curr, mut len) = (pos, next, 1);
				while len <= max_len {
					if let Some(&to) = index.get(&curr) {
						edges[from].push((to, len));
						break
					}
					let Some(next) = self.moves(curr, slippery).find(|&p| p != last) else { break };
					(last, curr, len) = (curr, next, len + 1);
				}
			}
		}

		tracing::debug!(slippery, junctions = junctions.len(),
			trails = edges.iter().map(Vec::len).sum::<usize>(), "mapped hiking trails");

		Ok(Hike { edges, start: 0, goal: junctions.len() - 1 })
	}
}

impl Hike {
	/// Returns the number of steps of the longest hike from start to goal that never visits the
	/// same junction twice, or `None` if the goal can’t be reached at all.
	fn longest(&self) -> Option<usize> {
		// Depth-first, through every possible hike
		let mut longest = None;
		let mut stack = vec![(self.start, 1_u64 << self.start, 0)];
		while let Some((junction, visited, steps)) = stack.pop() {
			if junction == self.goal {
				longest = longest.max(Some(steps));
				continue
			}
			for &(next, len) in &self.edges[junction] {
				if visited & 1 << next != 0 { continue }
				stack.push((next, visited | 1 << next, steps + len));
			}
		}
		longest
	}
}


fn part_impl(input_trails: &Trails, slippery: bool) -> Result<usize> {
	input_trails.hike(slippery)
		.map_err(crate::invalid_input)?
		.longest()
		.context("No hike from start to goal")
}

fn part1_impl(input_trails: &Trails) -> Result<usize> {
	part_impl(input_trails, true)
}

pub(crate) fn part1(input: &str) -> Result<usize> {
	part1_impl(&parsing::try_trails_from_str(input).map_err(crate::invalid_input)?)
}


fn part2_impl(input_trails: &Trails) -> Result<usize> {
	part_impl(input_trails, false)
}

pub(crate) fn part2(input: &str) -> Result<usize> {
	part2_impl(&parsing::try_trails_from_str(input).map_err(crate::invalid_input)?)
}


mod parsing {
	use crate::grid::{Dir, parsing::{try_grid_from_str, GridError}};
	use super::{Tile, Trails};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum TrailsError {
		Grid(GridError),
		NoStart,
		NoGoal,
	}

	pub(super) fn try_trails_from_str(s: &str) -> Result<Trails, TrailsError> {
		let map = try_grid_from_str(s, |c| match c {
			'.' => Some(Tile::Path),
			'#' => Some(Tile::Forest),
			'^' => Some(Tile::Slope(Dir::North)),
			'>' => Some(Tile::Slope(Dir::East)),
			'v' => Some(Tile::Slope(Dir::South)),
			'<' => Some(Tile::Slope(Dir::West)),
			_ => None,
		}).map_err(TrailsError::Grid)?;

		let path_in_row = |y: usize| map.row(y).iter().position(|&t| t == Tile::Path).map(|x| [x, y]);
		let start = path_in_row(0).ok_or(TrailsError::NoStart)?;
		let goal = path_in_row(map.height() - 1)
			.filter(|&goal| goal != start)
			.ok_or(TrailsError::NoGoal)?;

		Ok(Trails { map, start, goal })
	}
}
