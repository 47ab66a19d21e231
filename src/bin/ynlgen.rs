//! Generate Rust bindings from a YAML netlink specification.
//!
//! Usage:
//!   ynlgen [OPTIONS] SPEC.yaml > family.rs
//!
//! Options:
//!   -p, --package NAME     module name (default: the spec's `name`)
//!   --inline-module        wrap the output in `pub mod NAME { ... }`
//!   --constants PATH       module holding the protocol constants (default: libc)
//!   --runtime PATH         runtime module path (default: ynlgen::runtime)
//!   --resolve-family       look the family ID up by name instead of using the control family
//!   -o, --output FILE      write to FILE instead of stdout
//!   -v                     more logging (repeatable); RUST_LOG overrides

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ynlgen::{Channel, Config};

#[derive(Debug, Parser)]
#[command(name = "ynlgen", version, about = "Generate Rust bindings from a YAML netlink specification")]
struct Args {
    /// YAML netlink specification, e.g. nlctrl.yaml
    spec: PathBuf,

    /// Module name for the generated code (default: the spec's name)
    #[arg(short, long)]
    package: Option<String>,

    /// Wrap the output in `pub mod <package> { ... }`
    #[arg(long)]
    inline_module: bool,

    /// Path of the module exposing the protocol constants
    #[arg(long, default_value = "libc")]
    constants: String,

    /// Path of the runtime the generated code links against
    #[arg(long, default_value = "ynlgen::runtime")]
    runtime: String,

    /// Resolve the family ID by name instead of using the control family
    #[arg(long)]
    resolve_family: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let spec = ynlgen::spec::parse_file(&args.spec)
        .with_context(|| format!("failed to parse YAML netlink file {}", args.spec.display()))?;

    let cfg = Config {
        package: args.package,
        inline_module: args.inline_module,
        constants: args.constants,
        runtime: args.runtime,
        channel: if args.resolve_family {
            Channel::ResolveByName
        } else {
            Channel::Control
        },
        ..Config::default()
    };
    let code = ynlgen::generate(&spec, &cfg).context("failed to generate code")?;

    match &args.output {
        Some(path) => std::fs::write(path, &code)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(code.as_bytes())
            .context("failed to write to stdout")?,
    }
    tracing::info!(family = %spec.name, bytes = code.len(), "generated bindings");
    Ok(())
}
