use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

use super::{ParseOptions, parse_fields};
use crate::codec::{Atom, Descriptor, ErrorKind, PackError};

/// Collects the `kind` field of every event.
#[derive(Clone, Default)]
struct KindLog(Arc<Mutex<Vec<String>>>);

struct KindField(Option<String>);

impl Visit for KindField {
	fn record_str(&mut self, field: &Field, value: &str) {
		if field.name() == "kind" {
			self.0 = Some(value.to_owned());
		}
	}

	fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

impl<S: tracing::Subscriber> Layer<S> for KindLog {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
		let mut visitor = KindField(None);
		event.record(&mut visitor);
		if let Some(kind) = visitor.0 {
			self.0.lock().expect("log lock").push(kind);
		}
	}
}

fn parse(input: &str) -> Result<Vec<Descriptor>, PackError> {
	parse_fields(input, &ParseOptions::default())
}

fn atom(atom: Atom) -> Descriptor {
	Descriptor::Atom(atom)
}

#[test]
fn parses_every_atom_code() {
	let fields = parse("?cbBhHiIqQNfds").expect("atoms parse");
	let atoms: Vec<Descriptor> = Atom::ALL.into_iter().map(Descriptor::Atom).collect();
	assert_eq!(fields, atoms);
}

#[test]
fn empty_format_has_no_fields() {
	assert_eq!(parse("").expect("empty format parses"), Vec::new());
}

#[test]
fn distinguishes_list_from_array_by_leading_digits() {
	let fields = parse("[i][3c][0d]").expect("brackets parse");
	assert_eq!(
		fields,
		vec![
			Descriptor::List(Box::new(atom(Atom::I32))),
			Descriptor::Array {
				len: 3,
				elem: Box::new(atom(Atom::Char)),
			},
			Descriptor::Array {
				len: 0,
				elem: Box::new(atom(Atom::F64)),
			},
		]
	);
}

#[test]
fn distinguishes_map_from_set_by_colon() {
	let fields = parse("{c:i}{I}{{c}:[s]}").expect("braces parse");
	assert_eq!(
		fields,
		vec![
			Descriptor::Map {
				key: Box::new(atom(Atom::Char)),
				value: Box::new(atom(Atom::I32)),
			},
			Descriptor::Set(Box::new(atom(Atom::U32))),
			Descriptor::Map {
				key: Box::new(Descriptor::Set(Box::new(atom(Atom::Char)))),
				value: Box::new(Descriptor::List(Box::new(atom(Atom::Str)))),
			},
		]
	);
}

#[test]
fn parses_the_full_demo_format() {
	let fields = parse("?cifs[i][[d]][3c]{c:i}{I}(cif)(s(dI))").expect("demo format parses");
	assert_eq!(fields.len(), 12);
	assert_eq!(
		fields[11],
		Descriptor::Tuple(vec![atom(Atom::Str), Descriptor::Tuple(vec![atom(Atom::F64), atom(Atom::U32)])])
	);
	assert_eq!(fields[6], Descriptor::List(Box::new(Descriptor::List(Box::new(atom(Atom::F64))))));
}

#[test]
fn reports_unknown_atom_with_position() {
	let err = parse("ix").expect_err("x is not an atom");
	assert_eq!(
		err,
		PackError::UnexpectedChar {
			at: 1,
			found: 'x',
			expected: "descriptor",
		}
	);
	assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn reports_non_ascii_character_whole() {
	let err = parse("ié").expect_err("non-ascii is not an atom");
	assert!(matches!(err, PackError::UnexpectedChar { at: 1, found: 'é', .. }));
}

#[test]
fn rejects_unbalanced_nesting() {
	assert!(matches!(parse("[i"), Err(PackError::UnexpectedEnd { at: 2, expected: "']'" })));
	assert!(matches!(parse("i]"), Err(PackError::UnexpectedChar { at: 1, found: ']', .. })));
	assert!(matches!(parse("(ci"), Err(PackError::UnexpectedEnd { at: 3, expected: "')'" })));
	assert!(matches!(parse("[i)"), Err(PackError::UnexpectedChar { at: 2, found: ')', .. })));
	assert!(matches!(parse("{c:i"), Err(PackError::UnexpectedEnd { at: 4, expected: "'}'" })));
}

#[test]
fn rejects_array_without_element() {
	assert!(matches!(parse("[3]"), Err(PackError::UnexpectedChar { at: 2, found: ']', .. })));
	assert!(matches!(parse("[12"), Err(PackError::UnexpectedEnd { at: 3, .. })));
}

#[test]
fn rejects_incomplete_maps_and_sets() {
	assert!(matches!(parse("{}"), Err(PackError::UnexpectedChar { at: 1, found: '}', .. })));
	assert!(matches!(parse("{c:}"), Err(PackError::UnexpectedChar { at: 3, found: '}', .. })));
	assert!(matches!(parse("{ci}"), Err(PackError::UnexpectedChar { at: 2, found: 'i', expected: "':' or '}'" })));
	assert!(matches!(parse("{c"), Err(PackError::UnexpectedEnd { at: 2, .. })));
}

#[test]
fn rejects_empty_list_and_tuple() {
	assert!(matches!(parse("[]"), Err(PackError::UnexpectedChar { at: 1, found: ']', .. })));
	assert_eq!(parse("i()"), Err(PackError::EmptyTuple { at: 1 }));
}

#[test]
fn rejects_overflowing_array_length() {
	let err = parse("[99999999999999999999999i]").expect_err("length overflows usize");
	assert_eq!(err, PackError::ArrayLenOverflow { at: 1 });
}

#[test]
fn enforces_nesting_ceiling() {
	let opt = ParseOptions { max_depth: 3 };
	parse_fields("[[[i]]]", &opt).expect("three levels fit");

	let err = parse_fields("[[[[i]]]]", &opt).expect_err("four levels exceed");
	assert_eq!(err, PackError::NestingTooDeep { at: 3, max_depth: 3 });
}

#[test]
fn default_ceiling_rejects_pathological_nesting() {
	let deep = format!("{}i{}", "(".repeat(10_000), ")".repeat(10_000));
	let err = parse(&deep).expect_err("deep nesting is rejected");
	assert!(matches!(err, PackError::NestingTooDeep { max_depth: 64, .. }));
}

#[test]
fn every_container_node_is_traced() {
	let log = KindLog::default();
	let subscriber = tracing_subscriber::registry().with(log.clone());
	tracing::subscriber::with_default(subscriber, || {
		parse("[i]{c:i}{I}(cd)[2s]").expect("format parses");
	});

	let kinds = log.0.lock().expect("log lock").clone();
	assert_eq!(kinds, vec!["list", "map", "set", "tuple", "array"]);
}
