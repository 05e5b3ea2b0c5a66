use serde::Serialize;

use crate::cmd::Result;

/// Print a payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize + ?Sized>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}
