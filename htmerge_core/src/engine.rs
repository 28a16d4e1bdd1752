use std::path::Path;

use crate::MergeError;
use crate::MergeResult;
use crate::classify::LineClassifier;
use crate::classify::ReferenceKind;
use crate::classify::ScriptTagDetector;
use crate::classify::StyleTagDetector;
use crate::classify::TagClassifier;
use crate::config::MergeConfig;
use crate::resolver::DEFAULT_PLACEHOLDER;
use crate::resolver::ResolvedPath;
use crate::resolver::Resource;
use crate::resolver::ResourceLoader;
use crate::resolver::load_resource;

/// Options that shape the emitted text without affecting detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
	/// Text emitted in place of a resource that could not be read.
	pub placeholder: String,
}

impl Default for MergeOptions {
	fn default() -> Self {
		Self {
			placeholder: DEFAULT_PLACEHOLDER.to_string(),
		}
	}
}

/// A reference line that was replaced by an inline block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinedReference {
	pub kind: ReferenceKind,
	/// 1-indexed line number in the source document.
	pub line: usize,
	/// The cleaned path named in the inserted comment.
	pub path: ResolvedPath,
	/// False when the placeholder was emitted instead of the resource.
	pub loaded: bool,
}

/// A recovered problem encountered during a merge. None of these stop the
/// merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeNotice {
	/// The referenced resource could not be read and the placeholder was
	/// inlined instead.
	UnreadableResource {
		line: usize,
		path: String,
		reason: String,
	},
	/// A reference tag was recognized but its path delimiters were missing,
	/// so the path fell back to an empty string.
	MalformedReference { line: usize, kind: ReferenceKind },
}

/// The merged document along with what happened while producing it.
#[derive(Debug, Clone, Default)]
pub struct MergeOutput {
	/// The accumulated output text. Starts with a newline, because a newline
	/// separator is written before every source line.
	pub text: String,
	/// Every inline block in document order.
	pub inlined: Vec<InlinedReference>,
	pub notices: Vec<MergeNotice>,
}

impl MergeOutput {
	pub fn as_str(&self) -> &str {
		&self.text
	}

	/// Returns true if at least one placeholder was emitted.
	pub fn has_failures(&self) -> bool {
		self.inlined.iter().any(|reference| !reference.loaded)
	}

	pub fn into_text(self) -> String {
		self.text
	}
}

/// Merge `source` using the substring detectors for script and stylesheet
/// tags and the default placeholder.
pub fn merge(
	source: &str,
	script: &ScriptTagDetector,
	style: &StyleTagDetector,
	loader: &impl ResourceLoader,
) -> MergeOutput {
	merge_with(
		source,
		&TagClassifier::new(script, style),
		loader,
		&MergeOptions::default(),
	)
}

/// Scan `source` line by line, replacing every reference line recognized by
/// `classifier` with an inline block and copying all other lines verbatim.
///
/// A newline is written before each line, including the first. Lines are
/// split on `\n` only, so a trailing newline in the source yields a final
/// empty line and any `\r` stays attached to its line.
pub fn merge_with(
	source: &str,
	classifier: &impl LineClassifier,
	loader: &impl ResourceLoader,
	options: &MergeOptions,
) -> MergeOutput {
	tracing::debug!(bytes = source.len(), "scanning document");

	let mut output = MergeOutput {
		text: String::with_capacity(source.len() + 1),
		..MergeOutput::default()
	};

	for (index, line) in source.split('\n').enumerate() {
		output.text.push('\n');

		match classifier.classify(line).reference_kind() {
			Some(kind) => inline_reference(&mut output, classifier, loader, options, line, index + 1, kind),
			None => output.text.push_str(line),
		}
	}

	output
}

fn inline_reference(
	output: &mut MergeOutput,
	classifier: &impl LineClassifier,
	loader: &impl ResourceLoader,
	options: &MergeOptions,
	line: &str,
	line_number: usize,
	kind: ReferenceKind,
) {
	let fragment = classifier.extract(line, kind);

	if fragment.is_malformed() {
		tracing::warn!(%kind, line = line_number, "reference tag is missing its path delimiters");
		output.notices.push(MergeNotice::MalformedReference {
			line: line_number,
			kind,
		});
	}

	let path = fragment.resolve();
	tracing::info!(
		%kind,
		line = line_number,
		fragment = fragment.as_str(),
		path = %path,
		"getting {kind} block"
	);

	let resource = load_resource(loader, &path);
	if let Resource::Unreadable { path, reason } = &resource {
		output.notices.push(MergeNotice::UnreadableResource {
			line: line_number,
			path: path.clone(),
			reason: reason.clone(),
		});
	}

	push_inline_block(
		&mut output.text,
		kind,
		&path,
		resource.content_or(&options.placeholder),
	);
	tracing::info!(%kind, path = %path, "done");

	output.inlined.push(InlinedReference {
		kind,
		line: line_number,
		path,
		loaded: resource.is_loaded(),
	});
}

fn push_inline_block(text: &mut String, kind: ReferenceKind, path: &ResolvedPath, content: &str) {
	let (comment, open, close) = match kind {
		ReferenceKind::Script => ("Inserted file ", "<script>", "</script>"),
		ReferenceKind::Style => ("Inserted File. ", "<style>", "</style>"),
	};

	text.push_str("\n<!-- ");
	text.push_str(comment);
	text.push_str(path.as_str());
	text.push_str(". -->\n");
	text.push_str(open);
	text.push('\n');
	text.push_str(content);
	text.push('\n');
	text.push_str(close);
	text.push('\n');
}

/// Read the host document. Failure here is fatal for the merge.
pub fn read_source(path: &Path) -> MergeResult<String> {
	std::fs::read_to_string(path).map_err(|source| {
		MergeError::SourceRead {
			path: path.to_path_buf(),
			source,
		}
	})
}

/// Write the merged text to `path`, replacing any existing file.
pub fn write_output(path: &Path, output: &MergeOutput) -> MergeResult<()> {
	std::fs::write(path, output.as_str()).map_err(|source| {
		MergeError::OutputWrite {
			path: path.to_path_buf(),
			source,
		}
	})
}

/// Read the document at `source_path` and merge it using the detectors,
/// loader and placeholder described by `config`.
pub fn merge_file(source_path: &Path, config: &MergeConfig) -> MergeResult<MergeOutput> {
	let source = read_source(source_path)?;
	tracing::info!(path = %source_path.display(), "searching file");

	let script = config.markers.script_detector();
	let style = config.markers.style_detector();
	let loader = config.loader_for(source_path);

	Ok(merge_with(
		&source,
		&TagClassifier::new(&script, &style),
		&loader,
		&config.options(),
	))
}
