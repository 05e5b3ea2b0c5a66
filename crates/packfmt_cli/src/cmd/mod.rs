/// Value-to-bytes command.
pub mod encode;
/// Bytes-to-value command.
pub mod decode;
/// Descriptor tree command.
pub mod inspect;

mod error;
mod util;

pub use error::{CliError, Result};
