use std::path::Path;
use std::process;

use clap::CommandFactory;
use clap::Parser;
use htmerge_cli::HtmergeCli;
use htmerge_cli::default_output_path;
use htmerge_core::MergeConfig;
use htmerge_core::MergeNotice;
use htmerge_core::MergeOutput;
use htmerge_core::RelativeTo;
use htmerge_core::merge_file;
use htmerge_core::write_output;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = HtmergeCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(&args, use_color);

	let Some(source) = args.source.as_deref() else {
		println!("{}", HtmergeCli::command().render_help());
		return;
	};

	if let Err(e) = run_merge(&args, source) {
		match e.downcast::<htmerge_core::MergeError>() {
			Ok(merge_err) => {
				let report: miette::Report = (*merge_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Diagnostics go to stderr so `--dry-run` output stays clean. `RUST_LOG`
/// overrides the level picked from the flags.
fn init_tracing(args: &HtmergeCli, use_color: bool) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn load_config(args: &HtmergeCli, source: &Path) -> Result<MergeConfig, Box<dyn std::error::Error>> {
	let mut config = match &args.config {
		Some(path) => MergeConfig::load_from(path)?,
		None => {
			let dir = source
				.parent()
				.filter(|parent| !parent.as_os_str().is_empty())
				.unwrap_or_else(|| Path::new("."));
			MergeConfig::load(dir)?.unwrap_or_default()
		}
	};

	if args.relative_to_source {
		config.resources.relative_to = RelativeTo::Source;
	}

	Ok(config)
}

fn run_merge(args: &HtmergeCli, source: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let config = load_config(args, source)?;
	let output = merge_file(source, &config)?;

	if args.dry_run {
		print!("{}", output.as_str());
		return Ok(());
	}

	let output_path = args
		.output
		.clone()
		.unwrap_or_else(|| default_output_path(source, &config.output.prefix));

	tracing::info!(path = %output_path.display(), "writing");
	write_output(&output_path, &output)?;

	if !args.quiet {
		print_summary(&output, &output_path);
	}

	Ok(())
}

fn print_summary(output: &MergeOutput, output_path: &Path) {
	let loaded = output.inlined.iter().filter(|reference| reference.loaded).count();
	println!(
		"{} {loaded} resource(s) into {}",
		colored!("Inlined", green),
		output_path.display()
	);

	for notice in &output.notices {
		match notice {
			MergeNotice::UnreadableResource { line, path, reason } => {
				println!(
					"{} line {line}: could not read `{path}` ({reason})",
					colored!("warning:", yellow)
				);
			}
			MergeNotice::MalformedReference { line, kind } => {
				println!(
					"{} line {line}: {kind} reference has no usable path",
					colored!("warning:", yellow)
				);
			}
		}
	}
}
