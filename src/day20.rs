// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use anyhow::Result;


const BUTTON: &str = "button";
const BROADCASTER: &str = "broadcaster";
const RX: &str = "rx";


#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Pulse { Low, High }

#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Kind { Broadcaster, FlipFlop, Conjunction }

struct Module<'a> {
	name: &'a str,
	kind: Kind,
	outputs: Vec<&'a str>,
}

#[cfg_attr(test, derive(Debug, PartialEq))]
enum State<'a> {
	Relay,
	FlipFlop(bool),
	/// The last pulse received from each input.
	Conjunction(Vec<(&'a str, Pulse)>),
}

impl<'a> State<'a> {
	/// Updates the state for a pulse received from module `from`, and returns the pulse to send
	/// to all outputs (if any).
	fn receive(&mut self, from: &'a str, pulse: Pulse) -> Option<Pulse> {
		use Pulse::*;
		match self {
			State::Relay => Some(pulse),
			State::FlipFlop(_) if pulse == High => None,
			State::FlipFlop(on) => {
				*on = !*on;
				Some(if *on { High } else { Low })
			}
			State::Conjunction(memory) => {
				match memory.iter_mut().find(|(input, _)| *input == from) {
					Some((_, last)) => *last = pulse,
					None => memory.push((from, pulse)),
				}
				Some(if memory.iter().all(|&(_, last)| last == High) { Low } else { High })
			}
		}
	}
}


struct Machine<'a> {
	modules: Vec<Module<'a>>,
	index: std::collections::HashMap<&'a str, usize>,
	states: Vec<State<'a>>,
}

impl<'a> Machine<'a> {
	fn new(modules: Vec<Module<'a>>) -> Self {
		let index = modules.iter().enumerate().map(|(i, m)| (m.name, i)).collect();
		let mut machine = Machine { modules, index, states: Vec::new() };
		machine.reset();
		machine
	}

	fn module(&self, name: &str) -> Option<&Module<'a>> {
		self.index.get(name).map(|&i| &self.modules[i])
	}

	/// Returns the names of the modules sending pulses to module `name`, in definition order.
	fn inputs<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'a str> + 's {
		self.modules.iter()
			.filter(move |m| m.outputs.iter().any(|&output| output == name))
			.map(|m| m.name)
	}

	/// Puts all modules back in their initial state: flip-flops off, and conjunctions
	/// remembering a low pulse from each of their inputs.
	fn reset(&mut self) {
		self.states = self.modules.iter()
			.map(|module| match module.kind {
				Kind::Broadcaster => State::Relay,
				Kind::FlipFlop => State::FlipFlop(false),
				Kind::Conjunction => State::Conjunction(
					self.inputs(module.name).map(|input| (input, Pulse::Low)).collect()),
			})
			.collect();
	}

	/// Sends a low pulse from the button to module `trigger`, and processes all pulses that
	/// follow, in the order they’re sent. Calls `on_pulse` with the sender, pulse, and receiver
	/// of each (including the button’s, and those to modules without a definition).
	fn push_button(&mut self, trigger: &'a str, mut on_pulse: impl FnMut(&'a str, Pulse, &'a str)) {
		use std::collections::VecDeque;

		let mut queue = VecDeque::from([(BUTTON, Pulse::Low, trigger)]);
		while let Some((from, pulse, to)) = queue.pop_front() {
			on_pulse(from, pulse, to);
			let Some(&i) = self.index.get(to) else { continue };
			let Some(sent) = self.states[i].receive(from, pulse) else { continue };
			queue.extend(self.modules[i].outputs.iter().map(|&output| (to, sent, output)));
		}
	}

	/// Returns the first of `goals` found breadth-first along the outputs from `origin`.
	fn first_reachable(&self, origin: &'a str, goals: &[&'a str]) -> Option<&'a str> {
		use std::collections::{HashSet, VecDeque};

		let mut queue = VecDeque::from([origin]);
		let mut seen = HashSet::from([origin]);
		while let Some(name) = queue.pop_front() {
			if goals.contains(&name) { return Some(name) }
			for &output in self.module(name).into_iter().flat_map(|m| &m.outputs) {
				if seen.insert(output) { queue.push_back(output) }
			}
		}
		None
	}

	/// Returns the numbers of button presses (each triggering `trigger`) after which `goal`
	/// has received a low pulse for the first and second time, or `None` if that doesn’t
	/// happen within `max_presses`.
	fn presses_until_low_twice(&mut self, trigger: &'a str, goal: &str, max_presses: usize) -> Option<[usize; 2]> {
		let mut found = Vec::with_capacity(2);
		for presses in 1..=max_presses {
			let mut low = false;
			self.push_button(trigger, |_, pulse, to| low |= to == goal && pulse == Pulse::Low);
			if low {
				tracing::trace!(trigger, goal, presses, "goal received low pulse");
				found.push(presses);
				if let [first, second] = found[..] { return Some([first, second]) }
			}
		}
		None
	}
}


fn part1_impl<const PRESSES: usize>(mut input_machine: Machine) -> usize {
	let (mut low, mut high) = (0, 0);
	for _ in 0..PRESSES {
		input_machine.push_button(BROADCASTER, |_, pulse, _| match pulse {
			Pulse::Low => low += 1,
			Pulse::High => high += 1,
		});
	}
	tracing::debug!(low, high, "counted pulses");
	low * high
}

pub(crate) fn part1(input: &str) -> Result<usize> {
	Ok(part1_impl::<1000>(parsing::try_machine_from_str(input).map_err(crate::invalid_input)?))
}


#[allow(dead_code)]
#[derive(Debug)]
enum RxError<'a> {
	NoRx,
	Feeders(Vec<&'a str>),
	NotConjunction(&'a str),
	NoGoal { origin: &'a str },
	SharedGoal { goal: &'a str, origins: [&'a str; 2] },
	Unmeasured { goal: &'a str },
	NeverLow { origin: &'a str, goal: &'a str },
	Aperiodic { origin: &'a str, goal: &'a str, first: usize, second: usize },
}

/// Returns the fewest button presses after which `rx` receives a low pulse.
///
/// Assumes `rx` is fed by a single conjunction, each of whose inputs (the goals) is reached from
/// exactly one of the broadcaster’s outputs (the origins) through a subsystem of its own. Each subsystem
/// sends a low pulse to its goal once every so many presses, starting at that many presses,
/// and `rx` receives a low pulse once all do so during the same press.
fn part2_impl(mut input_machine: Machine) -> Result<usize, RxError> {
	use RxError::*;

	const MAX_PRESSES: usize = 1 << 20;

	let feeders = input_machine.inputs(RX).collect::<Vec<_>>();
	let feeder = match feeders.len() {
		0 => return Err(NoRx),
		1 => feeders[0],
		_ => return Err(Feeders(feeders)),
	};
	if input_machine.module(feeder).map(|m| m.kind) != Some(Kind::Conjunction) {
		return Err(NotConjunction(feeder))
	}
	let goals = input_machine.inputs(feeder).collect::<Vec<_>>();

	let origins = input_machine.module(BROADCASTER)
		.map(|m| m.outputs.clone())
		.unwrap_or_default();

	let mut subsystems: Vec<(&str, &str)> = Vec::with_capacity(origins.len());
	for origin in origins {
		let goal = input_machine.first_reachable(origin, &goals).ok_or(NoGoal { origin })?;
		if let Some(&(other, _)) = subsystems.iter().find(|&&(_, g)| g == goal) {
			return Err(SharedGoal { goal, origins: [other, origin] })
		}
		subsystems.push((origin, goal));
	}
	if let Some(&goal) = goals.iter().find(|&&goal| subsystems.iter().all(|&(_, g)| g != goal)) {
		return Err(Unmeasured { goal })
	}

	let mut periods = Vec::with_capacity(subsystems.len());
	for (origin, goal) in subsystems {
		input_machine.reset();
		let [first, second] = input_machine.presses_until_low_twice(origin, goal, MAX_PRESSES)
			.ok_or(NeverLow { origin, goal })?;
		if second != 2 * first { return Err(Aperiodic { origin, goal, first, second }) }

		tracing::debug!(origin, goal, period = first, "found subsystem period");
		periods.push(first);
	}

	Ok(periods.into_iter().fold(1, num_integer::lcm))
}

pub(crate) fn part2(input: &str) -> Result<usize> {
	let machine = parsing::try_machine_from_str(input).map_err(crate::invalid_input)?;
	part2_impl(machine).map_err(crate::invalid_input)
}


mod parsing {
	use super::{BROADCASTER, Kind, Machine, Module};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum ModuleError<'a> {
		MissingArrow,
		MissingName,
		Untyped(&'a str),
		MissingOutput { offset: usize },
	}

	impl<'a> TryFrom<&'a str> for Module<'a> {
		type Error = ModuleError<'a>;
		fn try_from(s: &'a str) -> Result<Self, Self::Error> {
			use ModuleError::*;
			let (name, outputs) = s.split_once(" -> ").ok_or(MissingArrow)?;
			let (kind, name) = match name.as_bytes().first() {
				Some(b'%') => (Kind::FlipFlop, &name[1..]),
				Some(b'&') => (Kind::Conjunction, &name[1..]),
				_ if name == BROADCASTER => (Kind::Broadcaster, name),
				_ if name.is_empty() => return Err(MissingName),
				_ => return Err(Untyped(name)),
			};
			if name.is_empty() { return Err(MissingName) }
			let outputs = outputs.split(", ")
				.enumerate()
				.map(|(offset, output)| if output.is_empty() { Err(MissingOutput { offset }) } else { Ok(output) })
				.collect::<Result<_, _>>()?;
			Ok(Module { name, kind, outputs })
		}
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum MachineError<'a> {
		Empty,
		Module { line: usize, source: ModuleError<'a> },
		Duplicate { line: usize, name: &'a str },
		MissingBroadcaster,
	}

	pub(super) fn try_machine_from_str(s: &str) -> Result<Machine, MachineError> {
		use std::collections::HashSet;

		if s.is_empty() { return Err(MachineError::Empty) }

		let mut names = HashSet::new();
		let modules = s.lines()
			.enumerate()
			.map(|(l, line)| {
				let module = Module::try_from(line)
					.map_err(|e| MachineError::Module { line: l + 1, source: e })?;
				if !names.insert(module.name) {
					return Err(MachineError::Duplicate { line: l + 1, name: module.name })
				}
				Ok(module)
			})
			.collect::<Result<Vec<_>, _>>()?;

		if !names.contains(BROADCASTER) { return Err(MachineError::MissingBroadcaster) }

		Ok(Machine::new(modules))
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	const INPUTS: [&str; 4] = [
		indoc::indoc! { "
			broadcaster -> a, b, c
			%a -> b
			%b -> c
			%c -> inv
			&inv -> a
		" },
		indoc::indoc! { "
			broadcaster -> a
			%a -> inv, con
			&inv -> b
			%b -> con
			&con -> output
		" },
		// Two subsystems: a two-bit counter that resets at 3, and a lone flip-flop
		indoc::indoc! { "
			broadcaster -> x0, y0
			%x0 -> x1, c
			%x1 -> c
			&c -> g, x0
			&g -> final
			%y0 -> h
			&h -> final
			&final -> rx
		" },
		// A two-bit counter that never resets
		indoc::indoc! { "
			broadcaster -> a1
			%a1 -> a2, ca
			%a2 -> ca
			&ca -> ia
			&ia -> final
			&final -> rx
		" },
	];

	fn input_machine_from_str(s: &str) -> Machine {
		parsing::try_machine_from_str(s).unwrap()
	}

	fn pulses<'a>(machine: &mut Machine<'a>, trigger: &'a str) -> Vec<(&'a str, Pulse, &'a str)> {
		let mut pulses = Vec::new();
		machine.push_button(trigger, |from, pulse, to| pulses.push((from, pulse, to)));
		pulses
	}

	#[test]
	fn flip_flop() {
		use Pulse::*;
		let mut state = State::FlipFlop(false);
		assert_eq!(state.receive("a", High), None);
		assert_eq!(state, State::FlipFlop(false));
		assert_eq!(state.receive("a", Low), Some(High));
		assert_eq!(state, State::FlipFlop(true));
		assert_eq!(state.receive("a", High), None);
		assert_eq!(state.receive("a", Low), Some(Low));
		assert_eq!(state, State::FlipFlop(false));
	}

	#[test]
	fn conjunction() {
		use Pulse::*;
		let mut state = State::Conjunction(vec![("a", Low), ("b", Low)]);
		assert_eq!(state.receive("a", High), Some(High));
		assert_eq!(state.receive("b", High), Some(Low));
		assert_eq!(state.receive("b", High), Some(Low));
		assert_eq!(state.receive("a", Low), Some(High));
		assert_eq!(state, State::Conjunction(vec![("a", Low), ("b", High)]));
	}

	#[test]
	fn single_flip_flop() {
		use Pulse::*;
		let mut machine = input_machine_from_str("broadcaster -> a\n%a -> sink");
		assert_eq!(pulses(&mut machine, BROADCASTER), [
			(BUTTON, Low, BROADCASTER),
			(BROADCASTER, Low, "a"),
			("a", High, "sink"),
		]);
		assert_eq!(part1_impl::<1>(input_machine_from_str("broadcaster -> a\n%a -> sink")), 2);
	}

	#[test]
	fn part1() {
		assert_eq!(part1_impl::<1000>(input_machine_from_str(INPUTS[0])), 32_000_000);
		assert_eq!(part1_impl::<1000>(input_machine_from_str(INPUTS[1])), 11_687_500);
	}

	#[test]
	fn reset() {
		let mut machine = input_machine_from_str(INPUTS[1]);
		let first = pulses(&mut machine, BROADCASTER);
		assert_ne!(pulses(&mut machine, BROADCASTER), first);
		machine.reset();
		assert_eq!(pulses(&mut machine, BROADCASTER), first);
	}

	#[test]
	fn part2() {
		let mut machine = input_machine_from_str(INPUTS[2]);
		assert_eq!(machine.first_reachable("x0", &["g", "h"]), Some("g"));
		assert_eq!(machine.presses_until_low_twice("x0", "g", 100), Some([3, 6]));
		machine.reset();
		assert_eq!(machine.presses_until_low_twice("y0", "h", 100), Some([2, 4]));

		assert_eq!(part2_impl(input_machine_from_str(INPUTS[2])).unwrap(), 6);
	}

	#[test]
	fn part2_errors() {
		assert!(matches!(part2_impl(input_machine_from_str(INPUTS[0])), Err(RxError::NoRx)));
		assert!(matches!(part2_impl(input_machine_from_str(INPUTS[3])),
			Err(RxError::Aperiodic { origin: "a1", goal: "ia", first: 3, second: 7 })));
		assert!(matches!(part2_impl(input_machine_from_str("broadcaster -> a\n%a -> rx")),
			Err(RxError::NotConjunction("a"))));

		// Both origins lead to `g`, so nothing measures `h`
		assert!(matches!(part2_impl(input_machine_from_str(indoc::indoc! { "
			broadcaster -> a, b
			%a -> g
			%b -> g
			&g -> final
			&h -> final
			&final -> rx
		" })), Err(RxError::SharedGoal { goal: "g", origins: ["a", "b"] })));
		assert!(matches!(part2_impl(input_machine_from_str(indoc::indoc! { "
			broadcaster -> a
			%a -> g
			&g -> final
			&h -> final
			&final -> rx
		" })), Err(RxError::Unmeasured { goal: "h" })));
	}

	#[test]
	fn parsing() {
		use parsing::{try_machine_from_str, MachineError, ModuleError};
		assert!(matches!(try_machine_from_str(""), Err(MachineError::Empty)));
		assert!(matches!(try_machine_from_str("broadcaster a"),
			Err(MachineError::Module { line: 1, source: ModuleError::MissingArrow })));
		assert!(matches!(try_machine_from_str("broadcaster -> a\nfoo -> a"),
			Err(MachineError::Module { line: 2, source: ModuleError::Untyped("foo") })));
		assert!(matches!(try_machine_from_str("broadcaster -> a\n%a -> b\n&a -> b"),
			Err(MachineError::Duplicate { line: 3, name: "a" })));
		assert!(matches!(try_machine_from_str("%a -> b"), Err(MachineError::MissingBroadcaster)));

		let machine = input_machine_from_str(INPUTS[1]);
		assert_eq!(machine.inputs("con").collect::<Vec<_>>(), ["a", "b"]);
		assert_eq!(machine.module("inv").map(|m| m.kind), Some(Kind::Conjunction));
		assert_eq!(machine.module("output").map(|m| m.kind), None);
	}
}
