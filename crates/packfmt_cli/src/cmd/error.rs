use std::path::PathBuf;

use packfmt::codec::PackError;
use thiserror::Error;

/// Result type for command handlers.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Pack(#[from] PackError),

	#[error("json: {0}")]
	Json(#[from] serde_json::Error),

	#[error("invalid hex input: {0}")]
	Hex(#[from] hex::FromHexError),

	#[error("{}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("one of --hex or --input is required")]
	MissingInput,

	#[error("invalid node path: {path}")]
	InvalidPath { path: String },

	#[error("no node at {path}")]
	NoSuchNode { path: String },
}
