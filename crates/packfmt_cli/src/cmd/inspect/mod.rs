use packfmt::codec::{Descriptor, Format};

use crate::cmd::Result;
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	/// Format descriptor, e.g. `?[i]{s:d}`.
	#[arg(long)]
	pub format: String,
	#[arg(long)]
	pub json: bool,
}

/// Parse a descriptor and print its tree.
pub fn run(args: Args) -> Result<()> {
	let format: Format = args.format.parse()?;

	if args.json {
		return emit_json(&report(&format));
	}

	println!("format: {format}");
	println!("fields: {}", format.len());
	println!("min_size: {}", format.min_size());
	for line in render_tree(&format) {
		println!("{line}");
	}
	Ok(())
}

/// One line per descriptor node, children indented under their parent.
pub(crate) fn render_tree(format: &Format) -> Vec<String> {
	let mut out = Vec::new();
	for (idx, field) in format.fields().iter().enumerate() {
		push_node(&mut out, &format!(".{idx}"), field, 0);
	}
	out
}

fn push_node(out: &mut Vec<String>, label: &str, desc: &Descriptor, indent: usize) {
	let pad = "  ".repeat(indent);
	out.push(format!("{pad}{label} {} {desc} min={}", desc.kind(), desc.min_size()));
	for (child_label, child) in children(desc) {
		push_node(out, &child_label, child, indent + 1);
	}
}

fn children(desc: &Descriptor) -> Vec<(String, &Descriptor)> {
	match desc {
		Descriptor::Atom(_) => Vec::new(),
		Descriptor::List(elem) | Descriptor::Set(elem) => vec![("[]".to_owned(), elem.as_ref())],
		Descriptor::Array { len, elem } => vec![(format!("[{len}]"), elem.as_ref())],
		Descriptor::Map { key, value } => vec![("key".to_owned(), key.as_ref()), ("value".to_owned(), value.as_ref())],
		Descriptor::Tuple(items) => items.iter().enumerate().map(|(idx, item)| (format!(".{idx}"), item)).collect(),
	}
}

pub(crate) fn report(format: &Format) -> InspectJson {
	InspectJson {
		canonical: format.to_string(),
		fields: format.len(),
		min_size: format.min_size(),
		tree: format.fields().iter().map(node_json).collect(),
	}
}

fn node_json(desc: &Descriptor) -> NodeJson {
	NodeJson {
		kind: desc.kind().to_owned(),
		descriptor: desc.to_string(),
		min_size: desc.min_size(),
		len: match desc {
			Descriptor::Array { len, .. } => Some(*len),
			_ => None,
		},
		children: children(desc).into_iter().map(|(_, child)| node_json(child)).collect(),
	}
}

#[derive(serde::Serialize)]
pub(crate) struct InspectJson {
	canonical: String,
	fields: usize,
	min_size: usize,
	tree: Vec<NodeJson>,
}

#[derive(serde::Serialize)]
struct NodeJson {
	kind: String,
	descriptor: String,
	min_size: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	len: Option<usize>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	children: Vec<NodeJson>,
}
