use std::fmt;

use crate::resolver::HREF;
use crate::resolver::ReferenceFragment;
use crate::resolver::extract_script_path;
use crate::resolver::extract_style_path;

pub const DEFAULT_SCRIPT_OPEN: &str = "<script src";
pub const DEFAULT_SCRIPT_CLOSE: &str = "</script>";
pub const DEFAULT_STYLE_OPEN: &str = "<link ";

/// Substrings a stylesheet line must contain besides the opening marker.
/// Each is checked on its own, in no particular order.
const STYLE_REQUIRED: [&str; 4] = ["stylesheet", "rel", HREF, ">"];

/// The kind of external resource a reference line points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
	Script,
	Style,
}

impl fmt::Display for ReferenceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Script => f.write_str("script"),
			Self::Style => f.write_str("style"),
		}
	}
}

/// Per-line decision made by a [`LineClassifier`]. Carries no state from one
/// line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClassification {
	ScriptReference,
	StyleReference,
	Plain,
}

impl LineClassification {
	pub fn reference_kind(self) -> Option<ReferenceKind> {
		match self {
			Self::ScriptReference => Some(ReferenceKind::Script),
			Self::StyleReference => Some(ReferenceKind::Style),
			Self::Plain => None,
		}
	}
}

/// Recognizes reference tags in a single line of the host document.
///
/// The merge engine only relies on this trait, so the substring matching in
/// [`TagClassifier`] can be replaced by a real parser.
pub trait LineClassifier {
	fn classify(&self, line: &str) -> LineClassification;

	/// Pull the raw path fragment out of a line previously classified as a
	/// reference of `kind`.
	fn extract<'a>(&self, line: &'a str, kind: ReferenceKind) -> ReferenceFragment<'a>;
}

/// Detects `<script src=...></script>` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTagDetector {
	pub open: String,
	pub close: String,
}

impl ScriptTagDetector {
	pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
		Self {
			open: open.into(),
			close: close.into(),
		}
	}

	/// Both markers must be on the same line. A tag closed on the following
	/// line is not recognized.
	pub fn matches(&self, line: &str) -> bool {
		line.contains(&self.open) && line.contains(&self.close)
	}

	pub fn extract<'a>(&self, line: &'a str) -> ReferenceFragment<'a> {
		extract_script_path(line, &self.open)
	}
}

impl Default for ScriptTagDetector {
	fn default() -> Self {
		Self::new(DEFAULT_SCRIPT_OPEN, DEFAULT_SCRIPT_CLOSE)
	}
}

/// Detects `<link rel="stylesheet" href=...>` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTagDetector {
	pub open: String,
}

impl StyleTagDetector {
	pub fn new(open: impl Into<String>) -> Self {
		Self { open: open.into() }
	}

	pub fn matches(&self, line: &str) -> bool {
		line.contains(&self.open) && STYLE_REQUIRED.iter().all(|needle| line.contains(needle))
	}

	pub fn extract<'a>(&self, line: &'a str) -> ReferenceFragment<'a> {
		extract_style_path(line)
	}
}

impl Default for StyleTagDetector {
	fn default() -> Self {
		Self::new(DEFAULT_STYLE_OPEN)
	}
}

/// Substring based classifier. Script detection takes precedence over
/// stylesheet detection.
#[derive(Debug, Clone, Copy)]
pub struct TagClassifier<'d> {
	script: &'d ScriptTagDetector,
	style: &'d StyleTagDetector,
}

impl<'d> TagClassifier<'d> {
	pub fn new(script: &'d ScriptTagDetector, style: &'d StyleTagDetector) -> Self {
		Self { script, style }
	}
}

impl LineClassifier for TagClassifier<'_> {
	fn classify(&self, line: &str) -> LineClassification {
		if self.script.matches(line) {
			LineClassification::ScriptReference
		} else if self.style.matches(line) {
			LineClassification::StyleReference
		} else {
			LineClassification::Plain
		}
	}

	fn extract<'a>(&self, line: &'a str, kind: ReferenceKind) -> ReferenceFragment<'a> {
		match kind {
			ReferenceKind::Script => self.script.extract(line),
			ReferenceKind::Style => self.style.extract(line),
		}
	}
}
