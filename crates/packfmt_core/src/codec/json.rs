//! Conversion between JSON documents and [`Value`] trees.
//!
//! JSON carries no width or signedness information, so conversion into
//! values is guided by a descriptor. The mapping is:
//! `?` bool, `c` one-character string, integer atoms numbers, `f`/`d`
//! numbers, `s` string, list/array/set/tuple arrays, and maps either an
//! array of `[key, value]` pairs or an object. Object keys for string and
//! char key descriptors are taken as-is; other keys are parsed as JSON text
//! (`"1"`, `"true"`, `"[1,2]"`) and then converted through the key descriptor.

use serde_json::{Number, Value as Json};

use crate::codec::{Atom, Descriptor, Format, NodePath, PackError, PathStep, Result, Value};

/// Convert a JSON array holding one element per top-level field.
pub fn values_from_json(format: &Format, json: &Json) -> Result<Vec<Value>> {
	let mut path = Vec::new();
	let Json::Array(items) = json else {
		return Err(mismatch(&path, "array", json));
	};
	fields_from_json(format.fields(), items, &mut path)
}

/// Render a value tree as JSON. Maps render as arrays of `[key, value]` pairs.
pub fn value_to_json(value: &Value) -> Json {
	match value {
		Value::Bool(v) => Json::Bool(*v),
		Value::Char(v) => Json::String(v.to_string()),
		Value::Int(v) => Json::from(*v),
		Value::UInt(v) => Json::from(*v),
		Value::F32(v) => float_to_json(f64::from(*v)),
		Value::F64(v) => float_to_json(*v),
		Value::Str(v) => Json::String(v.clone()),
		Value::List(items) | Value::Array(items) | Value::Set(items) | Value::Tuple(items) => Json::Array(items.iter().map(value_to_json).collect()),
		Value::Map(entries) => Json::Array(
			entries
				.iter()
				.map(|(key, value)| Json::Array(vec![value_to_json(key), value_to_json(value)]))
				.collect(),
		),
	}
}

/// Render a top-level value sequence as a JSON array.
pub fn values_to_json(values: &[Value]) -> Json {
	Json::Array(values.iter().map(value_to_json).collect())
}

fn float_to_json(value: f64) -> Json {
	Number::from_f64(value).map_or(Json::Null, Json::Number)
}

fn fields_from_json(fields: &[Descriptor], items: &[Json], path: &mut Vec<PathStep>) -> Result<Vec<Value>> {
	if fields.len() != items.len() {
		return Err(PackError::Arity {
			path: NodePath::from_steps(path),
			expected: fields.len(),
			got: items.len(),
		});
	}

	let mut out = Vec::with_capacity(items.len());
	for (idx, (field, item)) in fields.iter().zip(items).enumerate() {
		path.push(PathStep::Field(idx));
		out.push(from_json(field, item, path)?);
		path.pop();
	}
	Ok(out)
}

fn from_json(desc: &Descriptor, json: &Json, path: &mut Vec<PathStep>) -> Result<Value> {
	match (desc, json) {
		(Descriptor::Atom(atom), _) => atom_from_json(*atom, json, path),
		(Descriptor::List(elem), Json::Array(items)) => Ok(Value::List(elements_from_json(elem, items, path)?)),
		(Descriptor::Array { elem, .. }, Json::Array(items)) => Ok(Value::Array(elements_from_json(elem, items, path)?)),
		(Descriptor::Set(elem), Json::Array(items)) => Ok(Value::Set(elements_from_json(elem, items, path)?)),
		(Descriptor::Map { key, value }, Json::Array(pairs)) => {
			let mut entries = Vec::with_capacity(pairs.len());
			for (idx, pair) in pairs.iter().enumerate() {
				let Some([k, v]) = pair.as_array().and_then(|pair| <&[Json; 2]>::try_from(pair.as_slice()).ok()) else {
					path.push(PathStep::Index(idx));
					return Err(mismatch(path, "[key, value] pair", pair));
				};
				entries.push(entry_from_json(key, value, k, v, idx, path)?);
			}
			Ok(Value::Map(entries))
		}
		(Descriptor::Map { key, value }, Json::Object(object)) => {
			let mut entries = Vec::with_capacity(object.len());
			for (idx, (k, v)) in object.iter().enumerate() {
				entries.push(entry_from_json(key, value, &object_key(key, k), v, idx, path)?);
			}
			Ok(Value::Map(entries))
		}
		(Descriptor::Tuple(children), Json::Array(items)) => Ok(Value::Tuple(fields_from_json(children, items, path)?)),
		_ => Err(mismatch(path, desc.kind(), json)),
	}
}

/// JSON object keys are always strings. Keys for non-string descriptors are
/// read as JSON text, so `"1"` becomes `1` for `{i:s}`.
fn object_key(key: &Descriptor, text: &str) -> Json {
	match key {
		Descriptor::Atom(Atom::Str | Atom::Char) => Json::String(text.to_owned()),
		_ => serde_json::from_str(text).unwrap_or_else(|_| Json::String(text.to_owned())),
	}
}

fn entry_from_json(key: &Descriptor, value: &Descriptor, k: &Json, v: &Json, idx: usize, path: &mut Vec<PathStep>) -> Result<(Value, Value)> {
	path.push(PathStep::Key(idx));
	let k = from_json(key, k, path)?;
	path.pop();
	path.push(PathStep::Value(idx));
	let v = from_json(value, v, path)?;
	path.pop();
	Ok((k, v))
}

fn elements_from_json(elem: &Descriptor, items: &[Json], path: &mut Vec<PathStep>) -> Result<Vec<Value>> {
	let mut out = Vec::with_capacity(items.len());
	for (idx, item) in items.iter().enumerate() {
		path.push(PathStep::Index(idx));
		out.push(from_json(elem, item, path)?);
		path.pop();
	}
	Ok(out)
}

fn atom_from_json(atom: Atom, json: &Json, path: &[PathStep]) -> Result<Value> {
	let value = match (atom, json) {
		(Atom::Bool, Json::Bool(v)) => Value::Bool(*v),
		(Atom::Char, Json::String(text)) => {
			let mut chars = text.chars();
			match (chars.next(), chars.next()) {
				(Some(ch), None) => Value::Char(ch),
				_ => return Err(mismatch(path, "one-character string", json)),
			}
		}
		(Atom::I8 | Atom::I16 | Atom::I32 | Atom::I64, Json::Number(number)) => match number.as_i64() {
			Some(v) => Value::Int(v),
			None => return Err(out_of_range(path, atom, number)),
		},
		(Atom::U8 | Atom::U16 | Atom::U32 | Atom::U64 | Atom::Size, Json::Number(number)) => match number.as_u64() {
			Some(v) => Value::UInt(v),
			None => return Err(out_of_range(path, atom, number)),
		},
		(Atom::F32, Json::Number(number)) => Value::F32(number.as_f64().unwrap_or(f64::NAN) as f32),
		(Atom::F64, Json::Number(number)) => Value::F64(number.as_f64().unwrap_or(f64::NAN)),
		(Atom::Str, Json::String(text)) => Value::Str(text.clone()),
		_ => return Err(mismatch(path, atom.name(), json)),
	};
	Ok(value)
}

fn mismatch(path: &[PathStep], expected: &'static str, json: &Json) -> PackError {
	PackError::TypeMismatch {
		path: NodePath::from_steps(path),
		expected,
		got: json_kind(json),
	}
}

fn out_of_range(path: &[PathStep], atom: Atom, number: &Number) -> PackError {
	PackError::OutOfRange {
		path: NodePath::from_steps(path),
		atom: atom.name(),
		value: number.to_string(),
	}
}

fn json_kind(json: &Json) -> &'static str {
	match json {
		Json::Null => "null",
		Json::Bool(_) => "bool",
		Json::Number(number) if number.is_f64() => "float",
		Json::Number(_) => "integer",
		Json::String(_) => "string",
		Json::Array(_) => "array",
		Json::Object(_) => "object",
	}
}
