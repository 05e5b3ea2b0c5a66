use crate::codec::{Atom, Descriptor, PackError, Result};

/// Limits applied while parsing descriptor text.
#[derive(Debug, Clone)]
pub struct ParseOptions {
	/// Maximum container nesting depth.
	pub max_depth: u32,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self { max_depth: 64 }
	}
}

/// Parse a whole format string into its top-level descriptor sequence.
pub(crate) fn parse_fields(input: &str, opt: &ParseOptions) -> Result<Vec<Descriptor>> {
	let mut parser = Parser {
		input,
		bytes: input.as_bytes(),
		pos: 0,
		max_depth: opt.max_depth,
	};

	let mut fields = Vec::new();
	while parser.peek().is_some() {
		fields.push(parser.descriptor(0)?);
	}
	Ok(fields)
}

fn traced(at: usize, node: Descriptor) -> Descriptor {
	tracing::trace!(at, kind = node.kind(), "parsed container node");
	node
}

struct Parser<'a> {
	input: &'a str,
	bytes: &'a [u8],
	pos: usize,
	max_depth: u32,
}

impl Parser<'_> {
	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn descriptor(&mut self, depth: u32) -> Result<Descriptor> {
		let Some(byte) = self.peek() else {
			return Err(self.end("descriptor"));
		};

		match byte {
			b'[' => {
				let open = self.open(depth)?;
				let node = if self.peek().is_some_and(|byte| byte.is_ascii_digit()) {
					let len = self.array_len()?;
					let elem = self.descriptor(depth + 1)?;
					Descriptor::Array { len, elem: Box::new(elem) }
				} else {
					Descriptor::List(Box::new(self.descriptor(depth + 1)?))
				};
				self.close(b']', "']'")?;
				Ok(traced(open, node))
			}
			b'{' => {
				let open = self.open(depth)?;
				let first = self.descriptor(depth + 1)?;
				let node = match self.peek() {
					Some(b':') => {
						self.pos += 1;
						let value = self.descriptor(depth + 1)?;
						self.close(b'}', "'}'")?;
						Descriptor::Map {
							key: Box::new(first),
							value: Box::new(value),
						}
					}
					Some(b'}') => {
						self.pos += 1;
						Descriptor::Set(Box::new(first))
					}
					Some(_) => return Err(self.unexpected("':' or '}'")),
					None => return Err(self.end("':' or '}'")),
				};
				Ok(traced(open, node))
			}
			b'(' => {
				let open = self.open(depth)?;
				if self.peek() == Some(b')') {
					return Err(PackError::EmptyTuple { at: open });
				}

				let mut children = Vec::new();
				loop {
					match self.peek() {
						Some(b')') => {
							self.pos += 1;
							return Ok(traced(open, Descriptor::Tuple(children)));
						}
						Some(_) => children.push(self.descriptor(depth + 1)?),
						None => return Err(self.end("')'")),
					}
				}
			}
			code => {
				let atom = Atom::from_code(code).ok_or_else(|| self.unexpected("descriptor"))?;
				self.pos += 1;
				Ok(Descriptor::Atom(atom))
			}
		}
	}

	/// Consume an opening bracket, enforcing the depth ceiling.
	fn open(&mut self, depth: u32) -> Result<usize> {
		let at = self.pos;
		if depth >= self.max_depth {
			return Err(PackError::NestingTooDeep { at, max_depth: self.max_depth });
		}
		self.pos += 1;
		Ok(at)
	}

	fn close(&mut self, byte: u8, expected: &'static str) -> Result<()> {
		match self.peek() {
			Some(found) if found == byte => {
				self.pos += 1;
				Ok(())
			}
			Some(_) => Err(self.unexpected(expected)),
			None => Err(self.end(expected)),
		}
	}

	fn array_len(&mut self) -> Result<usize> {
		let start = self.pos;
		let mut len = 0_usize;
		while let Some(byte) = self.peek().filter(u8::is_ascii_digit) {
			len = len
				.checked_mul(10)
				.and_then(|len| len.checked_add(usize::from(byte - b'0')))
				.ok_or(PackError::ArrayLenOverflow { at: start })?;
			self.pos += 1;
		}
		Ok(len)
	}

	fn unexpected(&self, expected: &'static str) -> PackError {
		let found = self.input[self.pos..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
		PackError::UnexpectedChar {
			at: self.pos,
			found,
			expected,
		}
	}

	fn end(&self, expected: &'static str) -> PackError {
		PackError::UnexpectedEnd { at: self.pos, expected }
	}
}

#[cfg(test)]
mod tests;
