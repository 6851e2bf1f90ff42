// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Returns an iterator over the signed integers in `s`, in order of appearance.
///
/// A `-` only counts as a sign when a digit immediately follows it; it is
/// skipped like any other non-digit otherwise (so `a-b` or `1 - 2` don’t
/// produce negative numbers out of thin air).
pub(crate) fn ints(s: &str) -> impl Iterator<Item = i64> + '_ {
	let bytes = s.as_bytes();
	let mut i = 0;
	std::iter::from_fn(move || {
		while i < bytes.len() {
			let negative = bytes[i] == b'-'
				&& bytes.get(i + 1).map_or(false, u8::is_ascii_digit);
			if !negative && !bytes[i].is_ascii_digit() { i += 1; continue }
			if negative { i += 1 }

			let mut value = 0_i64;
			while let Some(&digit @ b'0'..=b'9') = bytes.get(i) {
				value = value.saturating_mul(10).saturating_add(i64::from(digit - b'0'));
				i += 1;
			}
			return Some(if negative { -value } else { value })
		}
		None
	})
}


#[cfg(test)]
mod tests {
	use super::ints;

	#[test]
	fn signs() {
		assert_eq!(ints("0 3 -6 9").collect::<Vec<_>>(), [0, 3, -6, 9]);
		assert_eq!(ints("x=-3, y=4..-12").collect::<Vec<_>>(), [-3, 4, -12]);
		assert_eq!(ints("10-5").collect::<Vec<_>>(), [10, -5]);
		assert_eq!(ints("--7").collect::<Vec<_>>(), [-7]);
	}

	#[test]
	fn separators() {
		assert_eq!(ints("1,1,3").collect::<Vec<_>>(), [1, 1, 3]);
		assert_eq!(ints("Time:      7  15   30").collect::<Vec<_>>(), [7, 15, 30]);
		assert_eq!(ints("1 - 2").collect::<Vec<_>>(), [1, 2]);
		assert_eq!(ints("trailing-").count(), 0);
	}

	#[test]
	fn empty() {
		assert_eq!(ints("").count(), 0);
		assert_eq!(ints("no digits - here").count(), 0);
	}
}
