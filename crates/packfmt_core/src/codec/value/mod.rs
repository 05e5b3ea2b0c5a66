use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::{DefaultHasher, Hash, Hasher};

/// Dynamically typed value tree exchanged with the encoder and decoder.
///
/// Equality is an equivalence relation: floats compare by bit pattern, sets
/// compare by distinct membership, and maps compare as key-to-value mappings
/// after duplicate keys collapse (first position, last value). `Hash` agrees
/// with that equality.
#[derive(Debug, Clone)]
pub enum Value {
	/// Boolean.
	Bool(bool),
	/// Single-byte character (code point up to `0xFF`).
	Char(char),
	/// Signed integer for `b`, `h`, `i`, `q`.
	Int(i64),
	/// Unsigned integer for `B`, `H`, `I`, `Q`, `N`.
	UInt(u64),
	/// Single-precision float.
	F32(f32),
	/// Double-precision float.
	F64(f64),
	/// UTF-8 text.
	Str(String),
	/// Variable-length ordered sequence.
	List(Vec<Value>),
	/// Fixed-length ordered sequence.
	Array(Vec<Value>),
	/// Key/value pairs in iteration order.
	Map(Vec<(Value, Value)>),
	/// Elements in iteration order; duplicates are tolerated.
	Set(Vec<Value>),
	/// Heterogeneous positional values.
	Tuple(Vec<Value>),
}

impl Value {
	/// Stable lowercase label of the variant.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::Char(_) => "char",
			Self::Int(_) => "int",
			Self::UInt(_) => "uint",
			Self::F32(_) => "f32",
			Self::F64(_) => "f64",
			Self::Str(_) => "string",
			Self::List(_) => "list",
			Self::Array(_) => "array",
			Self::Map(_) => "map",
			Self::Set(_) => "set",
			Self::Tuple(_) => "tuple",
		}
	}

	/// Element slice of a list, array, set, or tuple.
	pub fn as_slice(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) | Self::Array(items) | Self::Set(items) | Self::Tuple(items) => Some(items),
			_ => None,
		}
	}

	/// Build a set from any iterator of convertible items.
	pub fn set_of<I, T>(items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Value>,
	{
		Self::Set(items.into_iter().map(Into::into).collect())
	}

	/// Build a list from any iterator of convertible items.
	pub fn list_of<I, T>(items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Value>,
	{
		Self::List(items.into_iter().map(Into::into).collect())
	}

	/// Build a fixed array from any iterator of convertible items.
	pub fn array_of<I, T>(items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Value>,
	{
		Self::Array(items.into_iter().map(Into::into).collect())
	}

	/// Build a map from any iterator of convertible pairs.
	pub fn map_of<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<Value>,
		V: Into<Value>,
	{
		Self::Map(entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}

/// Distinct elements, keeping the first occurrence of each.
pub(crate) fn distinct_elements(items: &[Value]) -> Vec<&Value> {
	let mut seen = HashSet::with_capacity(items.len());
	items.iter().filter(|item| seen.insert(*item)).collect()
}

/// Distinct map entries: each key keeps its first position and its last value.
pub(crate) fn distinct_entries(entries: &[(Value, Value)]) -> Vec<(&Value, &Value)> {
	let mut index: HashMap<&Value, usize> = HashMap::with_capacity(entries.len());
	let mut out: Vec<(&Value, &Value)> = Vec::with_capacity(entries.len());
	for (key, value) in entries {
		match index.entry(key) {
			Entry::Occupied(slot) => out[*slot.get()].1 = value,
			Entry::Vacant(slot) => {
				slot.insert(out.len());
				out.push((key, value));
			}
		}
	}
	out
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Char(a), Self::Char(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::UInt(a), Self::UInt(b)) => a == b,
			(Self::F32(a), Self::F32(b)) => a.to_bits() == b.to_bits(),
			(Self::F64(a), Self::F64(b)) => a.to_bits() == b.to_bits(),
			(Self::Str(a), Self::Str(b)) => a == b,
			(Self::List(a), Self::List(b)) | (Self::Array(a), Self::Array(b)) | (Self::Tuple(a), Self::Tuple(b)) => a == b,
			(Self::Set(a), Self::Set(b)) => {
				let a: HashSet<&Value> = a.iter().collect();
				let b: HashSet<&Value> = b.iter().collect();
				a == b
			}
			(Self::Map(a), Self::Map(b)) => {
				let a: HashMap<&Value, &Value> = a.iter().map(|(key, value)| (key, value)).collect();
				let b: HashMap<&Value, &Value> = b.iter().map(|(key, value)| (key, value)).collect();
				a == b
			}
			_ => false,
		}
	}
}

impl Eq for Value {}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Self::Bool(v) => v.hash(state),
			Self::Char(v) => v.hash(state),
			Self::Int(v) => v.hash(state),
			Self::UInt(v) => v.hash(state),
			Self::F32(v) => v.to_bits().hash(state),
			Self::F64(v) => v.to_bits().hash(state),
			Self::Str(v) => v.hash(state),
			Self::List(items) | Self::Array(items) | Self::Tuple(items) => items.hash(state),
			Self::Set(items) => {
				let distinct = distinct_elements(items);
				distinct.len().hash(state);
				unordered_digest(distinct.iter()).hash(state);
			}
			Self::Map(entries) => {
				let distinct = distinct_entries(entries);
				distinct.len().hash(state);
				unordered_digest(distinct.iter()).hash(state);
			}
		}
	}
}

/// Order-independent combination of per-item digests.
fn unordered_digest<I, T>(items: I) -> u64
where
	I: Iterator<Item = T>,
	T: Hash,
{
	items.fold(0_u64, |acc, item| {
		let mut hasher = DefaultHasher::new();
		item.hash(&mut hasher);
		acc.wrapping_add(hasher.finish())
	})
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<char> for Value {
	fn from(value: char) -> Self {
		Self::Char(value)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Self::F32(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::F64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

macro_rules! impl_from_int {
	($variant:ident, $wide:ty: $($ty:ty),+) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::$variant(<$wide>::from(value))
				}
			}
		)+
	};
}

impl_from_int!(Int, i64: i8, i16, i32, i64);
impl_from_int!(UInt, u64: u8, u16, u32, u64);
