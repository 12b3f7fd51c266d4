use std::path::{Path, PathBuf};

use retlang_diagnostic::sources::Cached;

pub type SourceId = usize;

pub type SourceMap = Vec<Cached<Source>>;

/// A program's raw bytes, plus a lossily decoded copy for diagnostics.
#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    pub path: Option<PathBuf>,

    pub bytes: Vec<u8>,
    text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, path: Option<PathBuf>, bytes: Vec<u8>) -> Self {
        let text = String::from_utf8_lossy(&bytes).into_owned();

        Self {
            name: name.into(),
            path,

            bytes,
            text,
        }
    }
}

impl retlang_diagnostic::sources::Source for Source {
    fn name_str(&self) -> &str {
        &self.name
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn source_str(&self) -> &str {
        &self.text
    }
}
