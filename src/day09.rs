// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use anyhow::Result;


type History = Vec<i64>;

/// Returns the values that would come before the first and after the last value of `history`,
/// continuing the sequence by repeatedly taking differences until they’re all zero.
fn extrapolate(history: &[i64]) -> [i64; 2] {
	use itertools::Itertools as _;

	let mut firsts = Vec::new();
	let mut next = 0;
	let mut diffs = history.to_vec();
	while diffs.iter().any(|&d| d != 0) {
		firsts.push(diffs[0]);
		next += diffs[diffs.len() - 1];
		diffs = diffs.iter().tuple_windows().map(|(a, b)| b - a).collect();
	}
	let prev = firsts.into_iter().rev().fold(0, |prev, first| first - prev);
	[prev, next]
}


fn part1_impl(input_histories: &[History]) -> i64 {
	input_histories.iter().map(|h| extrapolate(h)[1]).sum()
}

pub(crate) fn part1(input: &str) -> Result<i64> {
	Ok(part1_impl(&parsing::try_histories_from_str(input).map_err(crate::invalid_input)?))
}


fn part2_impl(input_histories: &[History]) -> i64 {
	input_histories.iter().map(|h| extrapolate(h)[0]).sum()
}

pub(crate) fn part2(input: &str) -> Result<i64> {
	Ok(part2_impl(&parsing::try_histories_from_str(input).map_err(crate::invalid_input)?))
}


mod parsing {
	use crate::ints::ints;
	use super::History;

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum HistoriesError {
		Empty,
		EmptyHistory { line: usize },
	}

	pub(super) fn try_histories_from_str(s: &str) -> Result<Vec<History>, HistoriesError> {
		if s.is_empty() { return Err(HistoriesError::Empty) }
		s.lines()
			.enumerate()
			.map(|(l, line)| {
				let history = ints(line).collect::<History>();
				if history.is_empty() { return Err(HistoriesError::EmptyHistory { line: l + 1 }) }
				Ok(history)
			})
			.collect()
	}
}
