use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::hash_map::Entry;

use crate::codec::bytes::Cursor;
use crate::codec::{Atom, Descriptor, PackError, Result, Value};

/// Runtime limits and behavior switches for decoding.
///
/// Counts of elements that occupy at least one byte are already bounded by
/// the input length, so `max_elements` is unlimited by default. Elements with
/// a zero minimum size (`[0i]`, tuples of them) cost no input bytes, and only
/// `max_zero_width_elements` bounds how many of them a count prefix can ask for.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum element count accepted from a count prefix or fixed array.
	pub max_elements: usize,
	/// Maximum count prefix accepted for elements whose minimum size is zero.
	pub max_zero_width_elements: usize,
	/// Error when bytes remain after the last top-level field.
	pub strict: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_elements: usize::MAX,
			max_zero_width_elements: 1 << 16,
			strict: false,
		}
	}
}

impl DecodeOptions {
	/// Defaults with trailing-byte rejection enabled.
	pub fn strict() -> Self {
		Self {
			strict: true,
			..Self::default()
		}
	}
}

/// Decode one value per top-level descriptor from `bytes`.
pub(crate) fn decode_fields(fields: &[Descriptor], bytes: &[u8], opt: &DecodeOptions) -> Result<Vec<Value>> {
	let mut decoder = Decoder {
		cursor: Cursor::new(bytes),
		opt,
	};

	let values = fields.iter().map(|field| decoder.value(field)).collect::<Result<Vec<_>>>()?;

	let leftover = decoder.cursor.remaining();
	if leftover > 0 {
		let at = decoder.cursor.pos();
		if opt.strict {
			return Err(PackError::TrailingBytes { at, leftover });
		}
		tracing::debug!(at, leftover, "ignoring trailing bytes after last field");
	}

	Ok(values)
}

struct Decoder<'a, 'o> {
	cursor: Cursor<'a>,
	opt: &'o DecodeOptions,
}

impl Decoder<'_, '_> {
	fn value(&mut self, desc: &Descriptor) -> Result<Value> {
		match desc {
			Descriptor::Atom(atom) => self.atom(*atom),
			Descriptor::List(elem) => {
				let count = self.count(elem.min_size())?;
				let mut items = Vec::with_capacity(self.capacity(count));
				for _ in 0..count {
					items.push(self.value(elem)?);
				}
				Ok(Value::List(items))
			}
			Descriptor::Array { len, elem } => {
				self.check_fixed(*len, elem.min_size())?;
				let mut items = Vec::with_capacity(self.capacity(*len));
				for _ in 0..*len {
					items.push(self.value(elem)?);
				}
				Ok(Value::Array(items))
			}
			Descriptor::Set(elem) => {
				let count = self.count(elem.min_size())?;
				let mut seen = HashSet::with_capacity(self.capacity(count));
				let mut items = Vec::with_capacity(self.capacity(count));
				for _ in 0..count {
					let item = self.value(elem)?;
					if seen.insert(item.clone()) {
						items.push(item);
					}
				}
				Ok(Value::Set(items))
			}
			Descriptor::Map { key, value } => {
				let count = self.count(key.min_size().saturating_add(value.min_size()))?;
				let mut index: HashMap<Value, usize> = HashMap::with_capacity(self.capacity(count));
				let mut entries: Vec<(Value, Value)> = Vec::with_capacity(self.capacity(count));
				for _ in 0..count {
					let k = self.value(key)?;
					let v = self.value(value)?;
					match index.entry(k) {
						Entry::Occupied(slot) => entries[*slot.get()].1 = v,
						Entry::Vacant(slot) => {
							entries.push((slot.key().clone(), v));
							slot.insert(entries.len() - 1);
						}
					}
				}
				Ok(Value::Map(entries))
			}
			Descriptor::Tuple(children) => {
				let items = children.iter().map(|child| self.value(child)).collect::<Result<Vec<_>>>()?;
				Ok(Value::Tuple(items))
			}
		}
	}

	fn atom(&mut self, atom: Atom) -> Result<Value> {
		let cursor = &mut self.cursor;
		Ok(match atom {
			Atom::Bool => Value::Bool(cursor.read_u8()? != 0),
			Atom::Char => Value::Char(char::from(cursor.read_u8()?)),
			Atom::I8 => Value::Int(i64::from(i8::from_le_bytes(cursor.read_array()?))),
			Atom::U8 => Value::UInt(u64::from(cursor.read_u8()?)),
			Atom::I16 => Value::Int(i64::from(i16::from_le_bytes(cursor.read_array()?))),
			Atom::U16 => Value::UInt(u64::from(cursor.read_u16_le()?)),
			Atom::I32 => Value::Int(i64::from(i32::from_le_bytes(cursor.read_array()?))),
			Atom::U32 => Value::UInt(u64::from(cursor.read_u32_le()?)),
			Atom::I64 => Value::Int(i64::from_le_bytes(cursor.read_array()?)),
			Atom::U64 | Atom::Size => Value::UInt(cursor.read_u64_le()?),
			Atom::F32 => Value::F32(f32::from_le_bytes(cursor.read_array()?)),
			Atom::F64 => Value::F64(f64::from_le_bytes(cursor.read_array()?)),
			Atom::Str => {
				let len = cursor.read_u32_le()? as usize;
				let at = cursor.pos();
				let raw = cursor.read_exact(len)?;
				let text = std::str::from_utf8(raw).map_err(|_| PackError::InvalidUtf8 { at })?;
				Value::Str(text.to_owned())
			}
		})
	}

	/// Read a count prefix and reject counts the remaining input cannot hold.
	fn count(&mut self, elem_min: usize) -> Result<usize> {
		let at = self.cursor.pos();
		let count = self.cursor.read_u32_le()? as usize;
		let max = if elem_min == 0 {
			self.opt.max_elements.min(self.opt.max_zero_width_elements)
		} else {
			self.opt.max_elements
		};
		if count > max {
			return Err(PackError::TooManyElements { at, count, max });
		}
		self.check_need(count, elem_min)?;
		Ok(count)
	}

	fn check_fixed(&self, len: usize, elem_min: usize) -> Result<()> {
		if len > self.opt.max_elements {
			return Err(PackError::TooManyElements {
				at: self.cursor.pos(),
				count: len,
				max: self.opt.max_elements,
			});
		}
		self.check_need(len, elem_min)
	}

	fn check_need(&self, count: usize, elem_min: usize) -> Result<()> {
		let need = count.saturating_mul(elem_min);
		let rem = self.cursor.remaining();
		if need > rem {
			return Err(PackError::Truncated {
				at: self.cursor.pos(),
				need,
				rem,
			});
		}
		Ok(())
	}

	/// Preallocation bound; zero-width elements never reserve more than the input length.
	fn capacity(&self, count: usize) -> usize {
		count.min(self.cursor.remaining().max(1))
	}
}
