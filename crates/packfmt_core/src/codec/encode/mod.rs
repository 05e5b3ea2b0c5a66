use crate::codec::value::{distinct_elements, distinct_entries};
use crate::codec::{Atom, Descriptor, NodePath, PackError, PathStep, Result, Value};

/// Append the encoding of `values` against `fields` to `out`.
///
/// On failure `out` is truncated back to its original length.
pub(crate) fn encode_fields(fields: &[Descriptor], values: &[Value], out: &mut Vec<u8>) -> Result<()> {
	let start = out.len();
	let result = Encoder { out: &mut *out, path: Vec::new() }.fields(fields, values);
	if result.is_err() {
		out.truncate(start);
	}
	result
}

struct Encoder<'o> {
	out: &'o mut Vec<u8>,
	path: Vec<PathStep>,
}

impl Encoder<'_> {
	fn fields(&mut self, fields: &[Descriptor], values: &[Value]) -> Result<()> {
		if fields.len() != values.len() {
			return Err(PackError::Arity {
				path: self.path(),
				expected: fields.len(),
				got: values.len(),
			});
		}

		for (idx, (field, value)) in fields.iter().zip(values).enumerate() {
			self.path.push(PathStep::Field(idx));
			self.value(field, value)?;
			self.path.pop();
		}
		Ok(())
	}

	fn value(&mut self, desc: &Descriptor, value: &Value) -> Result<()> {
		match (desc, value) {
			(Descriptor::Atom(atom), _) => self.atom(*atom, value),
			(Descriptor::List(elem), Value::List(items)) => {
				self.len_prefix(items.len())?;
				self.elements(elem, items.iter())
			}
			(Descriptor::Array { len, elem }, Value::Array(items)) => {
				if items.len() != *len {
					return Err(PackError::Length {
						path: self.path(),
						expected: *len,
						got: items.len(),
					});
				}
				self.elements(elem, items.iter())
			}
			(Descriptor::Set(elem), Value::Set(items)) => {
				let distinct = distinct_elements(items);
				self.len_prefix(distinct.len())?;
				self.elements(elem, distinct.into_iter())
			}
			(Descriptor::Map { key, value }, Value::Map(entries)) => {
				let distinct = distinct_entries(entries);
				self.len_prefix(distinct.len())?;
				for (idx, (k, v)) in distinct.into_iter().enumerate() {
					self.path.push(PathStep::Key(idx));
					self.value(key, k)?;
					self.path.pop();
					self.path.push(PathStep::Value(idx));
					self.value(value, v)?;
					self.path.pop();
				}
				Ok(())
			}
			(Descriptor::Tuple(children), Value::Tuple(items)) => self.fields(children, items),
			_ => Err(self.mismatch(desc.kind(), value)),
		}
	}

	fn elements<'v>(&mut self, elem: &Descriptor, items: impl Iterator<Item = &'v Value>) -> Result<()> {
		for (idx, item) in items.enumerate() {
			self.path.push(PathStep::Index(idx));
			self.value(elem, item)?;
			self.path.pop();
		}
		Ok(())
	}

	fn atom(&mut self, atom: Atom, value: &Value) -> Result<()> {
		match (atom, value) {
			(Atom::Bool, Value::Bool(v)) => self.out.push(u8::from(*v)),
			(Atom::Char, Value::Char(v)) => {
				let byte: u8 = self.fit(atom, *v)?;
				self.out.push(byte);
			}
			(Atom::I8, Value::Int(v)) => {
				let v: i8 = self.fit(atom, *v)?;
				self.emit(&v.to_le_bytes());
			}
			(Atom::I16, Value::Int(v)) => {
				let v: i16 = self.fit(atom, *v)?;
				self.emit(&v.to_le_bytes());
			}
			(Atom::I32, Value::Int(v)) => {
				let v: i32 = self.fit(atom, *v)?;
				self.emit(&v.to_le_bytes());
			}
			(Atom::I64, Value::Int(v)) => self.emit(&v.to_le_bytes()),
			(Atom::U8, Value::UInt(v)) => {
				let v: u8 = self.fit(atom, *v)?;
				self.emit(&v.to_le_bytes());
			}
			(Atom::U16, Value::UInt(v)) => {
				let v: u16 = self.fit(atom, *v)?;
				self.emit(&v.to_le_bytes());
			}
			(Atom::U32, Value::UInt(v)) => {
				let v: u32 = self.fit(atom, *v)?;
				self.emit(&v.to_le_bytes());
			}
			(Atom::U64 | Atom::Size, Value::UInt(v)) => self.emit(&v.to_le_bytes()),
			(Atom::F32, Value::F32(v)) => self.emit(&v.to_le_bytes()),
			(Atom::F64, Value::F64(v)) => self.emit(&v.to_le_bytes()),
			(Atom::Str, Value::Str(v)) => {
				self.len_prefix(v.len())?;
				self.emit(v.as_bytes());
			}
			_ => return Err(self.mismatch(atom.name(), value)),
		}
		Ok(())
	}

	/// Narrow a value to the atom's storage type.
	fn fit<T, S>(&self, atom: Atom, value: S) -> Result<T>
	where
		T: TryFrom<S>,
		S: Copy + std::fmt::Display,
	{
		T::try_from(value).map_err(|_| PackError::OutOfRange {
			path: self.path(),
			atom: atom.name(),
			value: value.to_string(),
		})
	}

	fn len_prefix(&mut self, len: usize) -> Result<()> {
		let prefix = u32::try_from(len).map_err(|_| PackError::LengthPrefixOverflow { path: self.path(), len })?;
		self.emit(&prefix.to_le_bytes());
		Ok(())
	}

	fn emit(&mut self, bytes: &[u8]) {
		self.out.extend_from_slice(bytes);
	}

	fn path(&self) -> NodePath {
		NodePath::from_steps(&self.path)
	}

	fn mismatch(&self, expected: &'static str, value: &Value) -> PackError {
		PackError::TypeMismatch {
			path: self.path(),
			expected,
			got: value.kind(),
		}
	}
}

#[cfg(test)]
mod tests;
