use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MergeError {
	#[error(transparent)]
	#[diagnostic(code(htmerge::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read source document `{}`", path.display())]
	#[diagnostic(
		code(htmerge::source_read),
		help("check that the source document exists and is readable utf-8 text")
	)]
	SourceRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write merged output to `{}`", path.display())]
	#[diagnostic(
		code(htmerge::output_write),
		help("check that the output directory exists and is writable")
	)]
	OutputWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to read config file `{}`", path.display())]
	#[diagnostic(code(htmerge::config_read))]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(htmerge::config_parse),
		help("check that htmerge.toml is valid TOML with [output], [markers] and/or [resources] sections")
	)]
	ConfigParse(String),
}

pub type MergeResult<T> = Result<T, MergeError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
