use thiserror::Error;

use crate::codec::NodePath;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, PackError>;

/// Coarse error category, independent of the detailed variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Descriptor text is not grammatically valid.
	Format,
	/// Top-level or tuple value count does not match the descriptor.
	Arity,
	/// Value shape or range is incompatible with the descriptor node.
	Type,
	/// Fixed array length or length prefix mismatch.
	Length,
	/// Input bytes ended before decoding completed.
	Truncated,
	/// Decoded bytes were rejected by a decode-time guard.
	Decode,
}

impl ErrorKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Format => "format",
			Self::Arity => "arity",
			Self::Type => "type",
			Self::Length => "length",
			Self::Truncated => "truncated",
			Self::Decode => "decode",
		}
	}
}

/// Errors produced while parsing descriptors, encoding values, and decoding bytes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PackError {
	/// A character that does not fit the grammar at this position.
	#[error("format: unexpected {found:?} at offset {at}, expected {expected}")]
	UnexpectedChar {
		/// Byte offset in the descriptor text.
		at: usize,
		/// Offending character.
		found: char,
		/// What the parser was looking for.
		expected: &'static str,
	},
	/// Descriptor text ended inside an unfinished node.
	#[error("format: unexpected end of descriptor at offset {at}, expected {expected}")]
	UnexpectedEnd {
		/// Byte offset in the descriptor text.
		at: usize,
		/// What the parser was looking for.
		expected: &'static str,
	},
	/// A tuple with no children.
	#[error("format: empty tuple at offset {at}")]
	EmptyTuple {
		/// Offset of the opening parenthesis.
		at: usize,
	},
	/// Fixed array length literal does not fit in `usize`.
	#[error("format: array length at offset {at} overflows")]
	ArrayLenOverflow {
		/// Offset of the first digit.
		at: usize,
	},
	/// Descriptor nesting exceeded the configured depth.
	#[error("format: nesting deeper than {max_depth} at offset {at}")]
	NestingTooDeep {
		/// Offset of the opening bracket that exceeded the limit.
		at: usize,
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// A hand-built descriptor tree is nested deeper than the configured depth.
	#[error("format: field {field} nests {depth} levels, deeper than {max_depth}")]
	TreeTooDeep {
		/// Index of the offending top-level field.
		field: usize,
		/// Nesting depth of that field.
		depth: usize,
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Value count does not match the number of positional descriptors.
	#[error("arity mismatch at {path}: expected {expected} values, got {got}")]
	Arity {
		/// Location of the offending sequence.
		path: NodePath,
		/// Descriptor arity.
		expected: usize,
		/// Supplied value count.
		got: usize,
	},
	/// Value variant is incompatible with the descriptor node.
	#[error("type mismatch at {path}: expected {expected}, got {got}")]
	TypeMismatch {
		/// Location of the offending value.
		path: NodePath,
		/// Descriptor kind.
		expected: &'static str,
		/// Supplied value kind.
		got: &'static str,
	},
	/// Value does not fit the atom's width.
	#[error("value out of range at {path}: {value} does not fit {atom}")]
	OutOfRange {
		/// Location of the offending value.
		path: NodePath,
		/// Atom name.
		atom: &'static str,
		/// Rendered offending value.
		value: String,
	},
	/// Fixed array received the wrong number of elements.
	#[error("length mismatch at {path}: expected {expected} elements, got {got}")]
	Length {
		/// Location of the offending array.
		path: NodePath,
		/// Declared array length.
		expected: usize,
		/// Supplied element count.
		got: usize,
	},
	/// Container or string is too long for a 4-byte length prefix.
	#[error("length {len} at {path} exceeds the 4-byte length prefix")]
	LengthPrefixOverflow {
		/// Location of the offending value.
		path: NodePath,
		/// Element or byte count.
		len: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("truncated data at offset {at}, need {need} bytes, remaining {rem}")]
	Truncated {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// String payload is not valid UTF-8.
	#[error("invalid utf-8 string payload at offset {at}")]
	InvalidUtf8 {
		/// Offset of the string payload.
		at: usize,
	},
	/// Decoded element count exceeded the configured limit.
	#[error("element count {count} at offset {at} exceeds limit {max}")]
	TooManyElements {
		/// Offset of the count prefix.
		at: usize,
		/// Requested element count.
		count: usize,
		/// Maximum permitted element count.
		max: usize,
	},
	/// Strict decoding left bytes after the last field.
	#[error("{leftover} trailing bytes at offset {at}")]
	TrailingBytes {
		/// Offset of the first unconsumed byte.
		at: usize,
		/// Unconsumed bytes.
		leftover: usize,
	},
}

impl PackError {
	/// Category of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::UnexpectedChar { .. }
			| Self::UnexpectedEnd { .. }
			| Self::EmptyTuple { .. }
			| Self::ArrayLenOverflow { .. }
			| Self::NestingTooDeep { .. }
			| Self::TreeTooDeep { .. } => ErrorKind::Format,
			Self::Arity { .. } => ErrorKind::Arity,
			Self::TypeMismatch { .. } | Self::OutOfRange { .. } => ErrorKind::Type,
			Self::Length { .. } | Self::LengthPrefixOverflow { .. } => ErrorKind::Length,
			Self::Truncated { .. } => ErrorKind::Truncated,
			Self::InvalidUtf8 { .. } | Self::TooManyElements { .. } | Self::TrailingBytes { .. } => ErrorKind::Decode,
		}
	}

	/// Node path for encode-time errors.
	pub fn path(&self) -> Option<&NodePath> {
		match self {
			Self::Arity { path, .. }
			| Self::TypeMismatch { path, .. }
			| Self::OutOfRange { path, .. }
			| Self::Length { path, .. }
			| Self::LengthPrefixOverflow { path, .. } => Some(path),
			_ => None,
		}
	}
}
