#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "packfmt", about = "Encode and decode values against compact binary format descriptors")]
struct Cli {
	/// Log parse and decode diagnostics to stderr.
	#[arg(short, long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Encode a JSON array of values.
	Encode(cmd::encode::Args),
	/// Decode bytes into a JSON array of values.
	Decode(cmd::decode::Args),
	/// Show the parsed descriptor tree.
	Inspect(cmd::inspect::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing(verbose: bool) {
	let fallback = if verbose { "packfmt=debug,warn" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(command: Commands) -> cmd::Result<()> {
	match command {
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Inspect(args) => cmd::inspect::run(args),
	}
}
