use std::fmt;
use std::str::FromStr;

use crate::codec::decode::decode_fields;
use crate::codec::descriptor::min_size_of;
use crate::codec::encode::encode_fields;
use crate::codec::parse::parse_fields;
use crate::codec::{DecodeOptions, Descriptor, PackError, ParseOptions, Result, Value};

/// A parsed format string: the implicit top-level tuple of descriptors.
///
/// Immutable after parsing; share it behind an `Arc` to encode and decode
/// from several threads at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Format {
	fields: Vec<Descriptor>,
}

impl Format {
	/// Parse descriptor text with default limits.
	pub fn parse(input: &str) -> Result<Self> {
		Self::parse_with(input, &ParseOptions::default())
	}

	/// Parse descriptor text with explicit limits.
	pub fn parse_with(input: &str, opt: &ParseOptions) -> Result<Self> {
		let fields = parse_fields(input, opt)?;
		tracing::debug!(format = input, fields = fields.len(), "parsed format");
		Ok(Self { fields })
	}

	/// Build a format from already constructed descriptors, with the default depth limit.
	pub fn from_fields(fields: Vec<Descriptor>) -> Result<Self> {
		Self::from_fields_with(fields, &ParseOptions::default())
	}

	/// Build a format from already constructed descriptors.
	///
	/// Each field is held to `opt.max_depth`, the same ceiling the parser
	/// applies to descriptor text.
	pub fn from_fields_with(fields: Vec<Descriptor>, opt: &ParseOptions) -> Result<Self> {
		let max_depth = usize::try_from(opt.max_depth).unwrap_or(usize::MAX);
		if let Some((field, depth)) = fields.iter().map(Descriptor::depth).enumerate().find(|(_, depth)| *depth > max_depth) {
			return Err(PackError::TreeTooDeep {
				field,
				depth,
				max_depth: opt.max_depth,
			});
		}
		Ok(Self { fields })
	}

	/// Top-level descriptors in positional order.
	pub fn fields(&self) -> &[Descriptor] {
		&self.fields
	}

	/// Number of top-level fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether the format has no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Smallest number of bytes any encoding of this format occupies.
	pub fn min_size(&self) -> usize {
		min_size_of(&self.fields)
	}

	/// Encode one value per top-level field.
	pub fn encode(&self, values: &[Value]) -> Result<Vec<u8>> {
		let mut out = Vec::with_capacity(self.min_size());
		self.encode_into(values, &mut out)?;
		Ok(out)
	}

	/// Append the encoding to `out`; `out` is left unchanged on failure.
	pub fn encode_into(&self, values: &[Value], out: &mut Vec<u8>) -> Result<()> {
		let start = out.len();
		encode_fields(&self.fields, values, out)?;
		tracing::trace!(fields = self.fields.len(), bytes = out.len() - start, "encoded values");
		Ok(())
	}

	/// Decode one value per top-level field with default limits.
	pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Value>> {
		self.decode_with(bytes, &DecodeOptions::default())
	}

	/// Decode one value per top-level field with explicit limits.
	pub fn decode_with(&self, bytes: &[u8], opt: &DecodeOptions) -> Result<Vec<Value>> {
		let values = decode_fields(&self.fields, bytes, opt)?;
		tracing::trace!(fields = self.fields.len(), bytes = bytes.len(), "decoded values");
		Ok(values)
	}
}

impl FromStr for Format {
	type Err = PackError;

	fn from_str(input: &str) -> Result<Self> {
		Self::parse(input)
	}
}

impl fmt::Display for Format {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for field in &self.fields {
			write!(f, "{field}")?;
		}
		Ok(())
	}
}

/// Parse a format string.
pub fn parse(format: &str) -> Result<Format> {
	Format::parse(format)
}

/// Parse `format` and encode `values` against it.
pub fn encode(format: &str, values: &[Value]) -> Result<Vec<u8>> {
	Format::parse(format)?.encode(values)
}

/// Parse `format` and decode `bytes` against it.
pub fn decode(format: &str, bytes: &[u8]) -> Result<Vec<Value>> {
	Format::parse(format)?.decode(bytes)
}
