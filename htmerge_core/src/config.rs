use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::MergeError;
use crate::MergeResult;
use crate::classify::DEFAULT_SCRIPT_CLOSE;
use crate::classify::DEFAULT_SCRIPT_OPEN;
use crate::classify::DEFAULT_STYLE_OPEN;
use crate::classify::ScriptTagDetector;
use crate::classify::StyleTagDetector;
use crate::engine::MergeOptions;
use crate::resolver::DEFAULT_PLACEHOLDER;
use crate::resolver::FsLoader;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["htmerge.toml", ".htmerge.toml", ".config/htmerge.toml"];

/// Default prefix for output file names derived from the source file name.
pub const DEFAULT_OUTPUT_PREFIX: &str = "merged_";

/// Configuration loaded from an `htmerge.toml` file.
///
/// ```toml
/// [output]
/// prefix = "merged_"
///
/// [markers]
/// script_open = "<script src"
/// script_close = "</script>"
/// style_open = "<link "
///
/// [resources]
/// relative_to = "source"
/// placeholder = "/* FILE READ ERROR */"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MergeConfig {
	#[serde(default)]
	pub output: OutputConfig,
	#[serde(default)]
	pub markers: MarkerConfig,
	#[serde(default)]
	pub resources: ResourceConfig,
}

/// Output naming.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
	/// Literal prepended to the source file name to build the default output
	/// file name.
	#[serde(default = "default_prefix")]
	pub prefix: String,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			prefix: default_prefix(),
		}
	}
}

/// Substrings that mark a line as a reference tag.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MarkerConfig {
	#[serde(default = "default_script_open")]
	pub script_open: String,
	#[serde(default = "default_script_close")]
	pub script_close: String,
	#[serde(default = "default_style_open")]
	pub style_open: String,
}

impl Default for MarkerConfig {
	fn default() -> Self {
		Self {
			script_open: default_script_open(),
			script_close: default_script_close(),
			style_open: default_style_open(),
		}
	}
}

impl MarkerConfig {
	pub fn script_detector(&self) -> ScriptTagDetector {
		ScriptTagDetector::new(&self.script_open, &self.script_close)
	}

	pub fn style_detector(&self) -> StyleTagDetector {
		StyleTagDetector::new(&self.style_open)
	}
}

/// Directory that referenced resource paths are resolved against.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RelativeTo {
	/// The process working directory.
	#[default]
	Cwd,
	/// The directory containing the source document.
	Source,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ResourceConfig {
	#[serde(default)]
	pub relative_to: RelativeTo,
	/// Text emitted in place of a resource that could not be read.
	#[serde(default = "default_placeholder")]
	pub placeholder: String,
}

impl Default for ResourceConfig {
	fn default() -> Self {
		Self {
			relative_to: RelativeTo::default(),
			placeholder: default_placeholder(),
		}
	}
}

fn default_prefix() -> String {
	DEFAULT_OUTPUT_PREFIX.to_string()
}

fn default_script_open() -> String {
	DEFAULT_SCRIPT_OPEN.to_string()
}

fn default_script_close() -> String {
	DEFAULT_SCRIPT_CLOSE.to_string()
}

fn default_style_open() -> String {
	DEFAULT_STYLE_OPEN.to_string()
}

fn default_placeholder() -> String {
	DEFAULT_PLACEHOLDER.to_string()
}

impl MergeConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(dir: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| dir.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file in `dir`.
	/// Returns `None` if no candidate exists.
	pub fn load(dir: &Path) -> MergeResult<Option<MergeConfig>> {
		let Some(config_path) = Self::resolve_path(dir) else {
			return Ok(None);
		};

		Self::load_from(&config_path).map(Some)
	}

	/// Load the config from an explicit path.
	pub fn load_from(path: &Path) -> MergeResult<MergeConfig> {
		let content = std::fs::read_to_string(path).map_err(|source| {
			MergeError::ConfigRead {
				path: path.to_path_buf(),
				source,
			}
		})?;

		Self::from_toml(&content)
	}

	pub fn from_toml(content: &str) -> MergeResult<MergeConfig> {
		toml::from_str(content).map_err(|e| MergeError::ConfigParse(e.to_string()))
	}

	/// Build the resource loader for a merge of the document at `source`.
	pub fn loader_for(&self, source: &Path) -> FsLoader {
		match self.resources.relative_to {
			RelativeTo::Cwd => FsLoader::new(),
			RelativeTo::Source => {
				FsLoader::relative_to(source.parent().unwrap_or_else(|| Path::new("")))
			}
		}
	}

	pub fn options(&self) -> MergeOptions {
		MergeOptions {
			placeholder: self.resources.placeholder.clone(),
		}
	}
}
