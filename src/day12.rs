// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use anyhow::Result;


#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Spring { Operational, Damaged, Unknown }

struct Record {
	springs: Vec<Spring>,
	/// Sizes of the contiguous groups of damaged springs, in order.
	groups: Vec<usize>,
}

impl Record {
	/// Returns the number of ways to make the unknown springs operational or damaged, such that
	/// the damaged ones form exactly the record’s groups.
	fn arrangements(&self) -> u64 {
		use Spring::*;

		let (springs, groups) = (&self.springs[..], &self.groups[..]);
		let (n, m) = (springs.len(), groups.len());

		// `counts[idx(i, g)]` is the number of arrangements of `springs[i..]` matching
		// `groups[g..]`. `i` goes up to `n + 1`, since a group placed at the very end also
		// claims the (missing) separator after it.
		let idx = |i: usize, g: usize| i * (m + 1) + g;
		let mut counts = vec![0_u64; (n + 2) * (m + 1)];

		let mut none_damaged = true;
		for i in (0..=n + 1).rev() {
			if i < n && springs[i] == Damaged { none_damaged = false }
			counts[idx(i, m)] = u64::from(none_damaged);
			if i >= n { continue }

			for (g, &size) in groups.iter().enumerate().rev() {
				let mut count = 0;
				if springs[i] != Damaged {
					count += counts[idx(i + 1, g)];
				}
				let end = i + size;
				if end <= n
					&& !springs[i..end].contains(&Operational)
					&& springs.get(end) != Some(&Damaged) {
					count += counts[idx(end + 1, g + 1)];
				}
				counts[idx(i, g)] = count;
			}
		}

		counts[idx(0, 0)]
	}

	/// Returns the record repeated `N` times, with its copies of springs separated by unknowns.
	fn unfolded<const N: usize>(&self) -> Self {
		let mut springs = Vec::with_capacity(N * (self.springs.len() + 1));
		for i in 0..N {
			if i > 0 { springs.push(Spring::Unknown) }
			springs.extend_from_slice(&self.springs);
		}
		Record { springs, groups: self.groups.repeat(N) }
	}
}


fn part1_impl(input_records: &[Record]) -> u64 {
	input_records.iter().map(Record::arrangements).sum()
}

pub(crate) fn part1(input: &str) -> Result<u64> {
	Ok(part1_impl(&parsing::try_records_from_str(input).map_err(crate::invalid_input)?))
}


fn part2_impl(input_records: &[Record]) -> u64 {
	input_records.iter().map(|r| r.unfolded::<5>().arrangements()).sum()
}

pub(crate) fn part2(input: &str) -> Result<u64> {
	Ok(part2_impl(&parsing::try_records_from_str(input).map_err(crate::invalid_input)?))
}


mod parsing {
	use std::str::FromStr;
	use crate::ints::ints;
	use super::{Record, Spring};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum RecordError {
		MissingSpace,
		Condition { column: usize, found: char },
		Group { offset: usize, found: i64 },
		NoGroups,
	}

	impl FromStr for Record {
		type Err = RecordError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			use RecordError::*;
			let (springs, groups) = s.split_once(' ').ok_or(MissingSpace)?;
			let springs = springs.chars()
				.enumerate()
				.map(|(c, chr)| match chr {
					'.' => Ok(Spring::Operational),
					'#' => Ok(Spring::Damaged),
					'?' => Ok(Spring::Unknown),
					found => Err(Condition { column: c + 1, found }),
				})
				.collect::<Result<_, _>>()?;
			let groups = ints(groups)
				.enumerate()
				.map(|(offset, found)| match usize::try_from(found) {
					Ok(size) if size > 0 => Ok(size),
					_ => Err(Group { offset, found }),
				})
				.collect::<Result<Vec<_>, _>>()?;
			if groups.is_empty() { return Err(NoGroups) }
			Ok(Record { springs, groups })
		}
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) struct RecordsError { line: usize, source: RecordError }

	pub(super) fn try_records_from_str(s: &str) -> Result<Vec<Record>, RecordsError> {
		s.lines()
			.enumerate()
			.map(|(l, line)| line.parse()
				.map_err(|e| RecordsError { line: l + 1, source: e }))
			.collect()
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	const INPUT: &str = indoc::indoc! { "
		???.### 1,1,3
		.??..??...?##. 1,1,3
		?#?#?#?#?#?#?#? 1,3,1,6
		????.#...#... 4,1,1
		????.######..#####. 1,6,5
		?###???????? 3,2,1
	" };

	fn input_records_from_str(s: &str) -> Vec<Record> {
		parsing::try_records_from_str(s).unwrap()
	}

	#[test]
	fn arrangements() {
		let records = input_records_from_str(INPUT);
		assert_eq!(records.iter().map(Record::arrangements).collect::<Vec<_>>(), [1, 4, 1, 1, 4, 10]);
		assert_eq!(records.iter().map(|r| r.unfolded::<5>().arrangements()).collect::<Vec<_>>(),
			[1, 16384, 1, 16, 2500, 506250]);

		assert_eq!(input_records_from_str("# 1")[0].arrangements(), 1);
		assert_eq!(input_records_from_str("# 2")[0].arrangements(), 0);
		assert_eq!(input_records_from_str("??? 1")[0].arrangements(), 3);
		assert_eq!(input_records_from_str("#.# 1")[0].arrangements(), 0);
	}

	#[test]
	fn unfolding() {
		let record = input_records_from_str(".# 1")[0].unfolded::<5>();
		assert_eq!(record.springs.len(), 5 * 2 + 4);
		assert_eq!(record.springs[2], Spring::Unknown);
		assert_eq!(record.groups, [1; 5]);
	}

	#[test]
	fn part1() {
		assert_eq!(part1_impl(&input_records_from_str(INPUT)), 21);
	}

	#[test]
	fn part2() {
		assert_eq!(part2_impl(&input_records_from_str(INPUT)), 525152);
	}
}
