use std::path::Path;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Inline the local scripts and stylesheets of a html page into one self-contained file.",
	long_about = "htmerge reads a html document line by line and replaces every \
	              `<script src=...></script>` and `<link rel=\"stylesheet\" href=...>` line with \
	              the referenced file wrapped in `<script>` or `<style>` tags.\n\nResources that \
	              cannot be read are replaced by a placeholder comment and the merge carries \
	              on.\n\nExamples:\n  htmerge index.html             Write merged_index.html\n  \
	              htmerge index.html bundle.html Write bundle.html\n  htmerge --dry-run index.html  \
	              Print the merged document"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct HtmergeCli {
	/// The html document to merge. Without it the usage text is printed and
	/// nothing is merged.
	pub source: Option<PathBuf>,

	/// Where to write the merged document. Defaults to the source file name
	/// with the configured prefix (`merged_`), next to the source. An
	/// existing file is overwritten.
	pub output: Option<PathBuf>,

	/// Path to a config file. By default `htmerge.toml`, `.htmerge.toml` or
	/// `.config/htmerge.toml` in the source document's directory is used.
	#[arg(long, short)]
	pub config: Option<PathBuf>,

	/// Resolve referenced paths against the source document's directory
	/// instead of the working directory.
	#[arg(long, default_value_t = false)]
	pub relative_to_source: bool,

	/// Print the merged document to stdout instead of writing it.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false, conflicts_with = "quiet")]
	pub verbose: bool,

	/// Only report errors.
	#[arg(long, short, default_value_t = false)]
	pub quiet: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

impl HtmergeCli {
	/// Log filter used when `RUST_LOG` is not set.
	pub fn log_filter(&self) -> &'static str {
		if self.verbose {
			"debug"
		} else if self.quiet {
			"error"
		} else {
			"info"
		}
	}
}

/// Build the default output path by prefixing the source file name.
///
/// `site/index.html` with prefix `merged_` becomes `site/merged_index.html`.
pub fn default_output_path(source: &Path, prefix: &str) -> PathBuf {
	let file_name = source
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default();

	source.with_file_name(format!("{prefix}{file_name}"))
}

#[cfg(test)]
mod __tests;
