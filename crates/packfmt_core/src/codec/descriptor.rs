use std::fmt;

/// Fixed-width (or length-prefixed, for `s`) primitive leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Atom {
	/// `?` boolean, one byte.
	Bool,
	/// `c` single-byte character.
	Char,
	/// `b` signed 8-bit integer.
	I8,
	/// `B` unsigned 8-bit integer.
	U8,
	/// `h` signed 16-bit integer.
	I16,
	/// `H` unsigned 16-bit integer.
	U16,
	/// `i` signed 32-bit integer.
	I32,
	/// `I` unsigned 32-bit integer.
	U32,
	/// `q` signed 64-bit integer.
	I64,
	/// `Q` unsigned 64-bit integer.
	U64,
	/// `N` size value, stored as unsigned 64-bit.
	Size,
	/// `f` IEEE-754 single.
	F32,
	/// `d` IEEE-754 double.
	F64,
	/// `s` UTF-8 text behind a 4-byte byte-count prefix.
	Str,
}

impl Atom {
	/// Every atom, in grammar order.
	pub const ALL: [Self; 14] = [
		Self::Bool,
		Self::Char,
		Self::I8,
		Self::U8,
		Self::I16,
		Self::U16,
		Self::I32,
		Self::U32,
		Self::I64,
		Self::U64,
		Self::Size,
		Self::F32,
		Self::F64,
		Self::Str,
	];

	/// Look up an atom by its descriptor code.
	pub fn from_code(code: u8) -> Option<Self> {
		Some(match code {
			b'?' => Self::Bool,
			b'c' => Self::Char,
			b'b' => Self::I8,
			b'B' => Self::U8,
			b'h' => Self::I16,
			b'H' => Self::U16,
			b'i' => Self::I32,
			b'I' => Self::U32,
			b'q' => Self::I64,
			b'Q' => Self::U64,
			b'N' => Self::Size,
			b'f' => Self::F32,
			b'd' => Self::F64,
			b's' => Self::Str,
			_ => return None,
		})
	}

	/// Descriptor code for this atom.
	pub fn code(self) -> char {
		match self {
			Self::Bool => '?',
			Self::Char => 'c',
			Self::I8 => 'b',
			Self::U8 => 'B',
			Self::I16 => 'h',
			Self::U16 => 'H',
			Self::I32 => 'i',
			Self::U32 => 'I',
			Self::I64 => 'q',
			Self::U64 => 'Q',
			Self::Size => 'N',
			Self::F32 => 'f',
			Self::F64 => 'd',
			Self::Str => 's',
		}
	}

	/// Stable lowercase label.
	pub fn name(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Char => "char",
			Self::I8 => "i8",
			Self::U8 => "u8",
			Self::I16 => "i16",
			Self::U16 => "u16",
			Self::I32 => "i32",
			Self::U32 => "u32",
			Self::I64 => "i64",
			Self::U64 => "u64",
			Self::Size => "size",
			Self::F32 => "f32",
			Self::F64 => "f64",
			Self::Str => "string",
		}
	}

	/// Encoded width in bytes; `None` for the variable-length string atom.
	pub fn width(self) -> Option<usize> {
		match self {
			Self::Bool | Self::Char | Self::I8 | Self::U8 => Some(1),
			Self::I16 | Self::U16 => Some(2),
			Self::I32 | Self::U32 | Self::F32 => Some(4),
			Self::I64 | Self::U64 | Self::Size | Self::F64 => Some(8),
			Self::Str => None,
		}
	}

	/// Smallest number of bytes one encoded value occupies.
	pub fn min_size(self) -> usize {
		self.width().unwrap_or(LEN_PREFIX_SIZE)
	}
}

/// Size of the count/length prefix in front of strings, lists, maps and sets.
pub const LEN_PREFIX_SIZE: usize = 4;

/// One parsed node of a format descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Descriptor {
	/// Primitive leaf.
	Atom(Atom),
	/// `[D]` count-prefixed homogeneous sequence.
	List(Box<Descriptor>),
	/// `[nD]` fixed-length homogeneous sequence, no prefix.
	Array {
		/// Element count fixed at parse time.
		len: usize,
		/// Element descriptor.
		elem: Box<Descriptor>,
	},
	/// `{K:V}` count-prefixed key/value pairs.
	Map {
		/// Key descriptor.
		key: Box<Descriptor>,
		/// Value descriptor.
		value: Box<Descriptor>,
	},
	/// `{D}` count-prefixed deduplicated elements.
	Set(Box<Descriptor>),
	/// `(D+)` fixed-arity heterogeneous sequence.
	Tuple(Vec<Descriptor>),
}

impl Descriptor {
	/// Stable lowercase label of the node kind.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Atom(atom) => atom.name(),
			Self::List(_) => "list",
			Self::Array { .. } => "array",
			Self::Map { .. } => "map",
			Self::Set(_) => "set",
			Self::Tuple(_) => "tuple",
		}
	}

	/// Smallest number of bytes one encoded value occupies.
	pub fn min_size(&self) -> usize {
		match self {
			Self::Atom(atom) => atom.min_size(),
			Self::List(_) | Self::Map { .. } | Self::Set(_) => LEN_PREFIX_SIZE,
			Self::Array { len, elem } => len.saturating_mul(elem.min_size()),
			Self::Tuple(children) => min_size_of(children),
		}
	}

	/// Nesting depth; atoms are 0.
	pub fn depth(&self) -> usize {
		match self {
			Self::Atom(_) => 0,
			Self::List(elem) | Self::Array { elem, .. } | Self::Set(elem) => 1 + elem.depth(),
			Self::Map { key, value } => 1 + key.depth().max(value.depth()),
			Self::Tuple(children) => 1 + children.iter().map(Self::depth).max().unwrap_or(0),
		}
	}
}

pub(crate) fn min_size_of(nodes: &[Descriptor]) -> usize {
	nodes.iter().fold(0_usize, |acc, node| acc.saturating_add(node.min_size()))
}

impl From<Atom> for Descriptor {
	fn from(atom: Atom) -> Self {
		Self::Atom(atom)
	}
}

impl fmt::Display for Atom {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.code())
	}
}

impl fmt::Display for Descriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Atom(atom) => write!(f, "{atom}"),
			Self::List(elem) => write!(f, "[{elem}]"),
			Self::Array { len, elem } => write!(f, "[{len}{elem}]"),
			Self::Map { key, value } => write!(f, "{{{key}:{value}}}"),
			Self::Set(elem) => write!(f, "{{{elem}}}"),
			Self::Tuple(children) => {
				f.write_str("(")?;
				for child in children {
					write!(f, "{child}")?;
				}
				f.write_str(")")
			}
		}
	}
}
