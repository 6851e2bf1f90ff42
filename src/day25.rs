// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use anyhow::Result;
use rand::Rng;


struct Wiring<'s> {
	components: Vec<&'s str>,
	/// Pairs of indices into `components`.
	wires: Vec<[usize; 2]>,
}

/// Disjoint sets of components, merged by size.
struct Groups {
	parents: Vec<usize>,
	sizes: Vec<usize>,
}

impl Groups {
	fn new(len: usize) -> Self {
		Groups { parents: (0..len).collect(), sizes: vec![1; len] }
	}

	fn find(&mut self, mut i: usize) -> usize {
		while self.parents[i] != i {
			self.parents[i] = self.parents[self.parents[i]];
			i = self.parents[i];
		}
		i
	}

	/// Merges the groups of `a` and `b`, returning whether they were separate before.
	fn union(&mut self, a: usize, b: usize) -> bool {
		let (a, b) = (self.find(a), self.find(b));
		if a == b { return false }
		let (big, small) = if self.sizes[a] >= self.sizes[b] { (a, b) } else { (b, a) };
		self.parents[small] = big;
		self.sizes[big] += self.sizes[small];
		true
	}
}

#[allow(dead_code)]
#[derive(Debug)]
enum CutError {
	TooFewComponents(usize),
	Disconnected { groups: usize },
	Exhausted { attempts: usize },
}

impl Wiring<'_> {
	/// Contracts randomly ordered wires until two groups remain, returning the number of wires
	/// between them and their sizes. Groups without any wire between them are disconnected.
	fn contract(&self, rng: &mut impl Rng) -> Result<(usize, [usize; 2]), CutError> {
		use rand::seq::SliceRandom as _;

		let mut wires = self.wires.clone();
		wires.shuffle(rng);

		let mut groups = Groups::new(self.components.len());
		let mut remaining = self.components.len();
		for &[a, b] in &wires {
			if remaining == 2 { break }
			if groups.union(a, b) { remaining -= 1 }
		}
		if remaining > 2 { return Err(CutError::Disconnected { groups: remaining }) }

		let mut cut = 0;
		let mut sides = None;
		for &[a, b] in &wires {
			let (a, b) = (groups.find(a), groups.find(b));
			if a == b { continue }
			cut += 1;
			sides = Some([a, b]);
		}

		let Some([a, b]) = sides else { return Err(CutError::Disconnected { groups: 2 }) };
		Ok((cut, [groups.sizes[a], groups.sizes[b]]))
	}

	/// Repeats random contractions until one cuts exactly `CUT` wires, returning the sizes of the
	/// two groups it leaves.
	fn min_cut<const CUT: usize>(&self, rng: &mut impl Rng, max_attempts: usize) -> Result<[usize; 2], CutError> {
		let len = self.components.len();
		if len < 2 { return Err(CutError::TooFewComponents(len)) }

		for attempt in 1..=max_attempts {
			let (cut, sizes) = self.contract(rng)?;
			tracing::trace!(attempt, cut, ?sizes, "contracted wiring");
			if cut == CUT {
				tracing::debug!(attempts = attempt, ?sizes, "found cut");
				return Ok(sizes)
			}
		}
		Err(CutError::Exhausted { attempts: max_attempts })
	}
}


const MAX_ATTEMPTS: usize = 10_000;

fn part1_impl(input_wiring: &Wiring, rng: &mut impl Rng) -> Result<usize> {
	let [a, b] = input_wiring.min_cut::<3>(rng, MAX_ATTEMPTS).map_err(crate::invalid_input)?;
	Ok(a * b)
}

pub(crate) fn part1(input: &str) -> Result<usize> {
	part1_impl(&parsing::try_wiring_from_str(input).map_err(crate::invalid_input)?, &mut rand::thread_rng())
}


mod parsing {
	use std::collections::HashMap;
	use super::Wiring;

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum WiringError {
		MissingColon { line: usize },
		MissingName { line: usize },
		NoConnections { line: usize },
		SelfConnection { line: usize, name: String },
	}

	pub(super) fn try_wiring_from_str(s: &str) -> Result<Wiring, WiringError> {
		use WiringError::*;

		let mut components = Vec::<&str>::new();
		let mut indices = HashMap::<&str, usize>::new();
		let mut index = |name| *indices.entry(name).or_insert_with(|| {
			components.push(name);
			components.len() - 1
		});

		let mut wires = Vec::new();
		for (l, text) in s.lines().enumerate() {
			let line = l + 1;
			let (name, others) = text.split_once(':').ok_or(MissingColon { line })?;
			let name = name.trim();
			if name.is_empty() { return Err(MissingName { line }) }

			let from = index(name);
			let len = wires.len();
			for other in others.split_whitespace() {
				if other == name { return Err(SelfConnection { line, name: name.to_owned() }) }
				wires.push([from, index(other)]);
			}
			if wires.len() == len { return Err(NoConnections { line }) }
		}

		Ok(Wiring { components, wires })
	}
}
