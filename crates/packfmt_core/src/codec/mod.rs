mod bytes;
mod decode;
mod descriptor;
mod encode;
mod error;
mod format;
#[cfg(feature = "json")]
pub mod json;
mod parse;
mod path;
mod value;

/// Decoder limits.
pub use decode::DecodeOptions;
/// Descriptor tree types.
pub use descriptor::{Atom, Descriptor, LEN_PREFIX_SIZE};
/// Error and result aliases.
pub use error::{ErrorKind, PackError, Result};
/// Parsed format and one-shot entry points.
pub use format::{Format, decode, encode, parse};
/// Parser limits.
pub use parse::ParseOptions;
/// Value-tree locations used in encode errors.
pub use path::{NodePath, PathStep};
/// Dynamically typed values.
pub use value::Value;
