use std::fmt;
use std::path::Path;
use std::path::PathBuf;

/// Attribute name that precedes the path of a stylesheet reference.
pub const HREF: &str = "href";

/// Text substituted for the content of a resource that could not be read.
pub const DEFAULT_PLACEHOLDER: &str = "/* FILE READ ERROR */";

/// Characters that never survive path cleaning.
const FILTERED_CHARS: [char; 6] = ['"', '\'', ' ', '>', '&', '|'];

/// A half-open byte range `start..end` into a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
	pub start: usize,
	pub end: usize,
}

impl Span {
	pub fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}

	/// The text covered by this span. Out of range spans produce an empty
	/// string instead of panicking.
	pub fn slice<'a>(&self, line: &'a str) -> &'a str {
		line.get(self.start..self.end).unwrap_or_default()
	}

	pub fn is_empty(&self) -> bool {
		self.start >= self.end
	}
}

/// The raw, still quoted attribute value of a reference tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceFragment<'a> {
	raw: &'a str,
	malformed: bool,
}

impl<'a> ReferenceFragment<'a> {
	fn from_span(line: &'a str, span: Option<Span>) -> Self {
		match span {
			Some(span) => Self {
				raw: span.slice(line),
				malformed: false,
			},
			None => Self {
				raw: "",
				malformed: true,
			},
		}
	}

	pub fn as_str(&self) -> &'a str {
		self.raw
	}

	/// True when the tag was missing one of its delimiters and the fragment
	/// fell back to an empty string.
	pub fn is_malformed(&self) -> bool {
		self.malformed
	}

	/// Strip the quoting noise from this fragment.
	pub fn resolve(&self) -> ResolvedPath {
		clean_path(self.raw)
	}
}

/// A resource path with quotes, spaces and shell-ish delimiters removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResolvedPath(String);

impl ResolvedPath {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for ResolvedPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for ResolvedPath {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Locate the attribute value of a script reference.
///
/// The span starts after the first `=` following `open_marker` and ends at
/// the first `>` anywhere in the line. Returns `None` when the marker, the
/// `=` or the `>` is missing, or when the `>` comes before the value starts.
pub fn script_span(line: &str, open_marker: &str) -> Option<Span> {
	let marker = line.find(open_marker)?;
	let equals = marker + line[marker..].find('=')?;
	let start = equals + 1;
	let end = line.find('>')?;

	(start <= end).then(|| Span::new(start, end))
}

/// Locate the attribute value of a stylesheet reference.
///
/// Everything before the first `href` is ignored. Within the remainder the
/// span starts after the first `=` and stops one character short of the
/// first `>`, trimming what is assumed to be the closing quote. Returns `None`
/// when `href`, the `=` or the `>` is missing, or when the bounds cross.
pub fn style_span(line: &str) -> Option<Span> {
	let offset = line.find(HREF)? + HREF.len();
	let rest = &line[offset..];
	let start = rest.find('=')? + 1;
	let closing = rest.find('>')?;
	let (end, _) = rest[..closing].char_indices().next_back()?;

	(start <= end).then(|| Span::new(offset + start, offset + end))
}

/// Extract the raw path fragment of a line already classified as a script
/// reference.
pub fn extract_script_path<'a>(line: &'a str, open_marker: &str) -> ReferenceFragment<'a> {
	ReferenceFragment::from_span(line, script_span(line, open_marker))
}

/// Extract the raw path fragment of a line already classified as a
/// stylesheet reference.
pub fn extract_style_path(line: &str) -> ReferenceFragment<'_> {
	ReferenceFragment::from_span(line, style_span(line))
}

fn is_quote(ch: char) -> bool {
	ch == '"' || ch == '\''
}

/// Carve-out for relative path prefixes such as `./` and `../`. The
/// disjunction holds for every character, so it never excludes anything.
#[allow(clippy::nonminimal_bool, clippy::overly_complex_bool_expr)]
fn keeps_prefix_char(index: usize, ch: char) -> bool {
	index > 3 || ch != '/' || ch != '.'
}

/// Filter a reference fragment down to a usable path.
///
/// Quotes, spaces, `>`, `&` and `|` are dropped. The second quote character
/// ends the scan, so only the first quoted span contributes to the path.
pub fn clean_path(fragment: &str) -> ResolvedPath {
	let mut path = String::with_capacity(fragment.len());
	let mut quotes = 0;

	for (index, ch) in fragment.chars().enumerate() {
		if is_quote(ch) {
			quotes += 1;
			if quotes > 1 {
				break;
			}
		} else if !FILTERED_CHARS.contains(&ch) && keeps_prefix_char(index, ch) {
			path.push(ch);
		}
	}

	ResolvedPath(path)
}

/// Read access to referenced resources.
pub trait ResourceLoader {
	/// Read the full text of the resource at `path`.
	fn load(&self, path: &str) -> std::io::Result<String>;
}

impl<T: ResourceLoader + ?Sized> ResourceLoader for &T {
	fn load(&self, path: &str) -> std::io::Result<String> {
		(**self).load(path)
	}
}

/// Loads resources from the local filesystem.
///
/// Paths are resolved against `base` when one is set, and against the
/// process working directory otherwise. Absolute paths ignore the base.
#[derive(Debug, Clone, Default)]
pub struct FsLoader {
	base: Option<PathBuf>,
}

impl FsLoader {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn relative_to(base: impl Into<PathBuf>) -> Self {
		Self {
			base: Some(base.into()),
		}
	}

	pub fn base(&self) -> Option<&Path> {
		self.base.as_deref()
	}

	fn resolve(&self, path: &str) -> PathBuf {
		match &self.base {
			Some(base) => base.join(path),
			None => PathBuf::from(path),
		}
	}
}

impl ResourceLoader for FsLoader {
	fn load(&self, path: &str) -> std::io::Result<String> {
		std::fs::read_to_string(self.resolve(path))
	}
}

/// Outcome of loading a referenced resource. Read failures are carried as a
/// value so one missing file never aborts a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
	Loaded(String),
	Unreadable { path: String, reason: String },
}

impl Resource {
	pub fn is_loaded(&self) -> bool {
		matches!(self, Self::Loaded(_))
	}

	/// The loaded text, or `placeholder` when the resource was unreadable.
	pub fn content_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
		match self {
			Self::Loaded(content) => content,
			Self::Unreadable { .. } => placeholder,
		}
	}
}

/// Read the resource at `path`, logging and recovering from any failure.
pub fn load_resource(loader: &impl ResourceLoader, path: &ResolvedPath) -> Resource {
	match loader.load(path.as_str()) {
		Ok(content) => Resource::Loaded(content),
		Err(error) => {
			tracing::error!(path = %path, %error, "FILE READ ERROR");
			Resource::Unreadable {
				path: path.to_string(),
				reason: error.to_string(),
			}
		}
	}
}
