use hex_literal::hex;

use super::encode_fields;
use crate::codec::parse::{ParseOptions, parse_fields};
use crate::codec::{ErrorKind, NodePath, PackError, Value};

fn encode(format: &str, values: &[Value]) -> Result<Vec<u8>, PackError> {
	let fields = parse_fields(format, &ParseOptions::default()).expect("format parses");
	let mut out = Vec::new();
	encode_fields(&fields, values, &mut out)?;
	Ok(out)
}

fn path(rendered: &str) -> NodePath {
	NodePath::parse(rendered).expect("path parses")
}

#[test]
fn bool_and_char_take_one_byte_each() {
	let bytes = encode("?c", &[Value::Bool(true), Value::Char('x')]).expect("encodes");
	assert_eq!(bytes, hex!("01 78"));
}

#[test]
fn list_has_count_prefix_then_elements() {
	let bytes = encode("[i]", &[Value::list_of([0_i32, 1, 2, 3])]).expect("encodes");
	assert_eq!(bytes, hex!("04000000 00000000 01000000 02000000 03000000"));
}

#[test]
fn fixed_array_has_no_prefix() {
	let bytes = encode("[3c]", &[Value::array_of(['a', 'b', 'c'])]).expect("encodes");
	assert_eq!(bytes, hex!("61 62 63"));
}

#[test]
fn integers_and_floats_are_little_endian() {
	let values = [
		Value::from(-2_i8),
		Value::from(0xBEEF_u16),
		Value::from(-1_i32),
		Value::from(0x0102_0304_u32),
		Value::from(i64::MIN),
		Value::UInt(7),
		Value::F32(1.0),
		Value::F64(-2.5),
	];
	let bytes = encode("bHiIqNfd", &values).expect("encodes");
	assert_eq!(
		bytes,
		hex!("fe efbe ffffffff 04030201 0000000000000080 0700000000000000 0000803f 00000000000004c0")
	);
}

#[test]
fn string_prefix_counts_utf8_bytes() {
	let bytes = encode("ss", &[Value::from("Hi"), Value::from("é")]).expect("encodes");
	assert_eq!(bytes, hex!("02000000 4869 02000000 c3a9"));
}

#[test]
fn map_emits_key_then_value_per_entry() {
	let bytes = encode("{c:i}", &[Value::map_of([('a', 5_i32), ('b', 19)])]).expect("encodes");
	assert_eq!(bytes, hex!("02000000 61 05000000 62 13000000"));
}

#[test]
fn set_is_deduplicated_before_counting() {
	let bytes = encode("{I}", &[Value::set_of([1_u32, 1, 1, 2, 1])]).expect("encodes");
	assert_eq!(bytes, hex!("02000000 01000000 02000000"));
}

#[test]
fn duplicate_map_keys_collapse_to_last_value() {
	let entries = Value::Map(vec![
		(Value::Char('k'), Value::Int(1)),
		(Value::Char('k'), Value::Int(2)),
	]);
	let bytes = encode("{c:i}", &[entries]).expect("encodes");
	assert_eq!(bytes, hex!("01000000 6b 02000000"));
}

#[test]
fn tuples_concatenate_without_separators() {
	let values = [Value::Tuple(vec![Value::from("Hello"), Value::Tuple(vec![Value::F64(0.5), Value::UInt(21)])])];
	let bytes = encode("(s(dI))", &values).expect("encodes");
	assert_eq!(bytes, hex!("05000000 48656c6c6f 000000000000e03f 15000000"));
}

#[test]
fn top_level_arity_mismatch_is_reported() {
	let format = "?cifs[i][[d]][3c]{c:i}{I}(cif)(s(dI))";
	let err = encode(format, &[Value::Bool(false), Value::Char('a'), Value::Int(5)]).expect_err("3 of 12 values");
	assert_eq!(
		err,
		PackError::Arity {
			path: NodePath::root(),
			expected: 12,
			got: 3,
		}
	);
	assert_eq!(err.kind(), ErrorKind::Arity);
}

#[test]
fn tuple_arity_mismatch_carries_path() {
	let err = encode("?(cif)", &[Value::Bool(true), Value::Tuple(vec![Value::Char('a')])]).expect_err("short tuple");
	assert_eq!(
		err,
		PackError::Arity {
			path: path("$.1"),
			expected: 3,
			got: 1,
		}
	);
}

#[test]
fn fixed_array_length_mismatch_is_reported() {
	let err = encode("[3c]", &[Value::array_of(['a', 'b'])]).expect_err("two of three");
	assert_eq!(
		err,
		PackError::Length {
			path: path("$.0"),
			expected: 3,
			got: 2,
		}
	);
	assert_eq!(err.kind(), ErrorKind::Length);
}

#[test]
fn shape_mismatch_reports_nested_path() {
	let values = [Value::Tuple(vec![Value::Char('a'), Value::map_of([(1_i32, 2_i32)])])];
	let err = encode("(c[i])", &values).expect_err("map where list expected");
	assert_eq!(
		err,
		PackError::TypeMismatch {
			path: path("$.0.1"),
			expected: "list",
			got: "map",
		}
	);
	assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn map_value_mismatch_points_at_entry_value() {
	let values = [Value::map_of([('a', Value::Int(1)), ('b', Value::from("x"))])];
	let err = encode("{c:i}", &values).expect_err("string where i32 expected");
	assert_eq!(err.path(), Some(&path("$.0[1].value")));
}

#[test]
fn signedness_is_strict() {
	let err = encode("I", &[Value::Int(5)]).expect_err("signed value for unsigned atom");
	assert!(matches!(err, PackError::TypeMismatch { expected: "u32", got: "int", .. }));
}

#[test]
fn out_of_range_integers_and_chars_are_rejected() {
	let err = encode("b", &[Value::Int(200)]).expect_err("200 does not fit i8");
	assert_eq!(
		err,
		PackError::OutOfRange {
			path: path("$.0"),
			atom: "i8",
			value: "200".to_owned(),
		}
	);

	let err = encode("[c]", &[Value::list_of(['a', '€'])]).expect_err("euro sign is wider than a byte");
	assert!(matches!(err, PackError::OutOfRange { atom: "char", .. }));
	assert_eq!(err.path(), Some(&path("$.0[1]")));

	encode("c", &[Value::Char('é')]).expect("latin-1 fits one byte");
}

#[test]
fn failed_encode_leaves_buffer_untouched() {
	let fields = parse_fields("ii", &ParseOptions::default()).expect("format parses");
	let mut out = vec![0xAA];
	let err = encode_fields(&fields, &[Value::Int(1), Value::from("oops")], &mut out).expect_err("second field mismatches");
	assert_eq!(err.kind(), ErrorKind::Type);
	assert_eq!(out, vec![0xAA]);
}

#[test]
fn empty_format_encodes_nothing() {
	assert_eq!(encode("", &[]).expect("encodes"), Vec::<u8>::new());
}
