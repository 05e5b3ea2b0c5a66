use std::fmt;

use crate::codec::Value;

/// One step from a parent node to a child node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStep {
	/// Positional field of the top level or of a tuple.
	Field(usize),
	/// Element of a list, fixed array, or set.
	Index(usize),
	/// Key of the n-th map entry.
	Key(usize),
	/// Value of the n-th map entry.
	Value(usize),
}

/// Location of a node inside a value tree, rooted at the top-level sequence.
///
/// Rendered as `$` followed by `.N` for positional fields, `[N]` for
/// elements, and `[N].key` / `[N].value` for map entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl NodePath {
	/// Path addressing the top-level sequence itself.
	pub fn root() -> Self {
		Self::default()
	}

	/// Parse the rendered path syntax back into steps. The leading `$` is optional.
	pub fn parse(input: &str) -> Option<Self> {
		let bytes = input.as_bytes();
		let mut idx = usize::from(bytes.first() == Some(&b'$'));
		let mut steps = Vec::new();

		while idx < bytes.len() {
			match bytes[idx] {
				b'.' => {
					let (number, next) = parse_number(bytes, idx + 1)?;
					steps.push(PathStep::Field(number));
					idx = next;
				}
				b'[' => {
					let (number, next) = parse_number(bytes, idx + 1)?;
					if bytes.get(next) != Some(&b']') {
						return None;
					}
					idx = next + 1;

					let rest = &input[idx..];
					if rest.starts_with(".key") {
						steps.push(PathStep::Key(number));
						idx += ".key".len();
					} else if rest.starts_with(".value") {
						steps.push(PathStep::Value(number));
						idx += ".value".len();
					} else {
						steps.push(PathStep::Index(number));
					}
				}
				_ => return None,
			}
		}

		Some(Self { steps })
	}

	/// Resolve this path against a top-level value sequence.
	pub fn select<'v>(&self, values: &'v [Value]) -> Option<&'v Value> {
		let (first, rest) = self.steps.split_first()?;
		let PathStep::Field(idx) = *first else {
			return None;
		};

		let mut node = values.get(idx)?;
		for step in rest {
			node = match (*step, node) {
				(PathStep::Field(idx), Value::Tuple(items)) => items.get(idx)?,
				(PathStep::Index(idx), Value::List(items) | Value::Array(items) | Value::Set(items)) => items.get(idx)?,
				(PathStep::Key(idx), Value::Map(entries)) => &entries.get(idx)?.0,
				(PathStep::Value(idx), Value::Map(entries)) => &entries.get(idx)?.1,
				_ => return None,
			};
		}
		Some(node)
	}

	pub(crate) fn from_steps(steps: &[PathStep]) -> Self {
		Self { steps: steps.to_vec() }
	}
}

impl fmt::Display for NodePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("$")?;
		for step in &self.steps {
			match step {
				PathStep::Field(idx) => write!(f, ".{idx}")?,
				PathStep::Index(idx) => write!(f, "[{idx}]")?,
				PathStep::Key(idx) => write!(f, "[{idx}].key")?,
				PathStep::Value(idx) => write!(f, "[{idx}].value")?,
			}
		}
		Ok(())
	}
}

fn parse_number(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
	let mut idx = start;
	let mut number = 0_usize;
	while let Some(byte) = bytes.get(idx).filter(|byte| byte.is_ascii_digit()) {
		number = number.checked_mul(10)?.checked_add(usize::from(byte - b'0'))?;
		idx += 1;
	}
	if idx == start { None } else { Some((number, idx)) }
}
