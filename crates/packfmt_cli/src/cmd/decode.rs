use std::path::PathBuf;

use packfmt::codec::json::{value_to_json, values_to_json};
use packfmt::codec::{DecodeOptions, Format, NodePath};

use crate::cmd::util::emit_json;
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["hex", "input"])))]
pub struct Args {
	/// Format descriptor, e.g. `?[i]{s:d}`.
	#[arg(long)]
	pub format: String,
	/// Encoded bytes as hex.
	#[arg(long)]
	pub hex: Option<String>,
	/// File holding the raw encoded bytes.
	#[arg(long)]
	pub input: Option<PathBuf>,
	/// Reject bytes left over after the last field.
	#[arg(long)]
	pub strict: bool,
	/// Largest element count accepted from a count prefix.
	#[arg(long = "max-elements")]
	pub max_elements: Option<usize>,
	/// Print only the node at this path, e.g. `$.2[0].value`.
	#[arg(long)]
	pub select: Option<String>,
}

/// Decode bytes and print the values as JSON.
pub fn run(args: Args) -> Result<()> {
	let Args {
		format,
		hex: hex_text,
		input,
		strict,
		max_elements,
		select,
	} = args;

	let format: Format = format.parse()?;
	let bytes = match (hex_text, input) {
		(Some(text), _) => hex::decode(text.trim())?,
		(None, Some(path)) => std::fs::read(&path).map_err(|source| CliError::Io { path, source })?,
		(None, None) => return Err(CliError::MissingInput),
	};

	let mut options = DecodeOptions {
		strict,
		..DecodeOptions::default()
	};
	if let Some(max_elements) = max_elements {
		options.max_elements = max_elements;
	}

	let values = format.decode_with(&bytes, &options)?;
	tracing::debug!(fields = values.len(), bytes = bytes.len(), "decoded input");

	let json = match select {
		Some(expr) => {
			let path = NodePath::parse(&expr).ok_or_else(|| CliError::InvalidPath { path: expr.clone() })?;
			let node = path.select(&values).ok_or(CliError::NoSuchNode { path: expr })?;
			value_to_json(node)
		}
		None => values_to_json(&values),
	};

	emit_json(&json)
}
