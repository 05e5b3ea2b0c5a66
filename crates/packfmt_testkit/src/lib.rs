//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// One encode/decode fixture case.
#[derive(Debug, Clone, Deserialize)]
pub struct Case {
	/// Short case label used in assertion messages.
	pub name: String,
	/// Descriptor text.
	pub format: String,
	/// Top-level values as a JSON array.
	pub values: serde_json::Value,
	/// Expected encoding as lowercase hex.
	pub hex: String,
}

impl Case {
	/// Expected encoding bytes.
	pub fn bytes(&self) -> Vec<u8> {
		hex::decode(&self.hex).unwrap_or_else(|err| panic!("fixture {} has invalid hex: {err}", self.name))
	}
}

/// One fixture case that must fail.
#[derive(Debug, Clone, Deserialize)]
pub struct FailureCase {
	/// Short case label used in assertion messages.
	pub name: String,
	/// Descriptor text.
	pub format: String,
	/// Values to encode, when the failure is an encode failure.
	#[serde(default)]
	pub values: Option<serde_json::Value>,
	/// Bytes to decode, when the failure is a decode failure.
	#[serde(default)]
	pub hex: Option<String>,
	/// Expected error kind label.
	pub kind: String,
}

impl FailureCase {
	/// Bytes to decode, if any.
	pub fn bytes(&self) -> Option<Vec<u8>> {
		self.hex
			.as_ref()
			.map(|hex| hex::decode(hex).unwrap_or_else(|err| panic!("fixture {} has invalid hex: {err}", self.name)))
	}
}

/// Render bytes as lowercase hex, matching fixture `hex` fields.
pub fn to_hex(bytes: &[u8]) -> String {
	hex::encode(bytes)
}

/// Load a JSON array fixture from `<workspace>/fixtures`.
pub fn load_fixture<T: for<'de> Deserialize<'de>>(name: &str) -> Vec<T> {
	let path = fixture_path(name);
	let raw = std::fs::read(&path).unwrap_or_else(|err| panic!("fixture {} unreadable: {err}", path.display()));
	serde_json::from_slice(&raw).unwrap_or_else(|err| panic!("fixture {} is not valid json: {err}", path.display()))
}
