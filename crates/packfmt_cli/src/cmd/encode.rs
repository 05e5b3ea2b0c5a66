use std::path::PathBuf;

use packfmt::codec::Format;
use packfmt::codec::json::values_from_json;

use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	/// Format descriptor, e.g. `?[i]{s:d}`.
	#[arg(long)]
	pub format: String,
	/// Top-level values as a JSON array, one element per field.
	#[arg(long)]
	pub values: String,
	/// Write raw bytes to this file instead of printing hex.
	#[arg(long)]
	pub out: Option<PathBuf>,
}

/// Encode JSON values and print lowercase hex, or write raw bytes to `--out`.
pub fn run(args: Args) -> Result<()> {
	let Args { format, values, out } = args;

	let format: Format = format.parse()?;
	let json: serde_json::Value = serde_json::from_str(&values)?;
	let values = values_from_json(&format, &json)?;
	let bytes = format.encode(&values)?;

	match out {
		Some(path) => {
			std::fs::write(&path, &bytes).map_err(|source| CliError::Io { path: path.clone(), source })?;
			tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote encoded bytes");
		}
		None => println!("{}", hex::encode(&bytes)),
	}

	Ok(())
}
