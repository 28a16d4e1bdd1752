use std::collections::HashMap;
use std::io;

use crate::ResourceLoader;
use crate::ScriptTagDetector;
use crate::StyleTagDetector;

/// In-memory resources keyed by cleaned path.
#[derive(Debug, Default)]
pub struct MemoryLoader {
	files: HashMap<String, String>,
}

impl MemoryLoader {
	pub fn with(mut self, path: &str, content: &str) -> Self {
		self.files.insert(path.to_string(), content.to_string());
		self
	}
}

impl ResourceLoader for MemoryLoader {
	fn load(&self, path: &str) -> io::Result<String> {
		self.files
			.get(path)
			.cloned()
			.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no such resource: {path}")))
	}
}

pub fn detectors() -> (ScriptTagDetector, StyleTagDetector) {
	(ScriptTagDetector::default(), StyleTagDetector::default())
}

pub const PAGE: &str = "<html>\n<head>\n<link rel=\"stylesheet\" href=\"a.css\">\n</head>\n<body>\n<script \
                        src=\"foo.js\"></script>\n</body>\n</html>";
