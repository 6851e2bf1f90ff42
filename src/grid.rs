// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Debug))]
pub(crate) enum Dir { North, East, South, West }

pub(crate) const DIRS: [Dir; 4] = [Dir::North, Dir::East, Dir::South, Dir::West];

impl Dir {
	pub(crate) fn turn_right(&self) -> Self {
		use Dir::*;
		match self { North => East, East => South, South => West, West => North }
	}

	pub(crate) fn inv(&self) -> Self {
		use Dir::*;
		match self { North => South, East => West, South => North, West => East }
	}

	pub(crate) fn turn_left(&self) -> Self {
		self.turn_right().inv()
	}

	/// Returns the `[x, y]` offset of a single step (with `y` growing downwards).
	pub(crate) fn delta(&self) -> [isize; 2] {
		use Dir::*;
		match self { North => [0, -1], East => [1, 0], South => [0, 1], West => [-1, 0] }
	}
}


/// A rectangular, row-major grid of cells, addressed by `[x, y]`.
pub(crate) struct Grid<T> {
	cells: Vec<T>,
	width: usize,
}

impl<T> Grid<T> {
	pub(crate) fn width(&self) -> usize {
		self.width
	}

	pub(crate) fn height(&self) -> usize {
		self.cells.len() / self.width
	}

	pub(crate) fn get(&self, [x, y]: [usize; 2]) -> Option<&T> {
		(x < self.width && y < self.height()).then(|| &self.cells[y * self.width + x])
	}

	/// Looks up a cell as if the grid was tiled infinitely in all directions.
	pub(crate) fn get_wrapped(&self, [x, y]: [isize; 2]) -> &T {
		let x = x.rem_euclid(self.width as isize) as usize;
		let y = y.rem_euclid(self.height() as isize) as usize;
		&self.cells[y * self.width + x]
	}

	/// Returns the position one step from `pos` in direction `dir`, unless that’s off the grid.
	pub(crate) fn step(&self, [x, y]: [usize; 2], dir: Dir) -> Option<[usize; 2]> {
		let [dx, dy] = dir.delta();
		let (x, y) = (x.checked_add_signed(dx)?, y.checked_add_signed(dy)?);
		(x < self.width && y < self.height()).then_some([x, y])
	}

	pub(crate) fn adjacent(&self, pos: [usize; 2]) -> impl Iterator<Item = ([usize; 2], Dir)> + '_ {
		DIRS.into_iter().filter_map(move |dir| self.step(pos, dir).map(|pos| (pos, dir)))
	}

	pub(crate) fn row(&self, y: usize) -> &[T] {
		&self.cells[y * self.width..(y + 1) * self.width]
	}

	pub(crate) fn column(&self, x: usize) -> impl Iterator<Item = &T> {
		self.cells.iter().skip(x).step_by(self.width)
	}

	pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Grid<U> {
		Grid { cells: self.cells.into_iter().map(f).collect(), width: self.width }
	}

	pub(crate) fn positions(&self) -> impl Iterator<Item = ([usize; 2], &T)> {
		let width = self.width;
		self.cells.iter().enumerate().map(move |(i, cell)| ([i % width, i / width], cell))
	}
}


pub(crate) mod parsing {
	use super::Grid;

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(crate) enum GridError {
		Empty,
		Width { line: usize, width: usize, len: usize },
		Cell { line: usize, column: usize, found: char },
	}

	/// Parses a grid with one cell per character, classified by `cell`.
	pub(crate) fn try_grid_from_str<T>(
		s: &str,
		cell: impl Fn(char) -> Option<T>,
	) -> Result<Grid<T>, GridError> {
		use GridError::*;

		let mut cells = Vec::with_capacity(s.len());
		let mut width = None;
		for (l, line) in s.lines().enumerate() {
			let len = line.chars().count();
			let expected = *width.get_or_insert(len);
			if len == 0 || len != expected {
				return Err(Width { line: l + 1, width: expected, len })
			}
			for (c, chr) in line.chars().enumerate() {
				cells.push(cell(chr).ok_or(Cell { line: l + 1, column: c + 1, found: chr })?);
			}
		}

		let width = width.ok_or(Empty)?;
		Ok(Grid { cells, width })
	}
}
