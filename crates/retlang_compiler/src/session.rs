use std::path::PathBuf;

use retlang_diagnostic::sources::Cached;
use target_lexicon::Triple;

use crate::diagnostics::{DiagnosticEmitter, IntoDiagnostic};
use crate::sourcemap::{Source, SourceId, SourceMap};

pub struct ErrorsEmitted;

/// State for one run of the compiler.
pub struct Session<D: DiagnosticEmitter> {
    pub target: Triple,
    pub sources: SourceMap,
    pub diagnostics: D,
}

impl<D: DiagnosticEmitter> Session<D> {
    pub fn new(target: Triple, diagnostics: D) -> Self {
        Self {
            target,
            sources: SourceMap::new(),
            diagnostics,
        }
    }

    pub fn add_source(
        &mut self,
        name: impl Into<String>,
        path: Option<PathBuf>,
        bytes: Vec<u8>,
    ) -> SourceId {
        self.sources.push(Cached::new(Source::new(name, path, bytes)));
        self.sources.len() - 1
    }

    /// Emits an error diagnostic.
    pub fn report<Context>(
        &mut self,
        diagnostic: impl IntoDiagnostic<Context>,
        cx: &Context,
    ) -> ErrorsEmitted {
        let diagnostic = diagnostic.into_diagnostic(cx);
        self.diagnostics.emit_diagnostic(diagnostic, &self.sources);

        ErrorsEmitted
    }
}
