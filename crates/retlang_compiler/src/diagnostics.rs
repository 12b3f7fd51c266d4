use retlang_backend::CodegenError;
use retlang_diagnostic::termcolor::{ColorChoice, StandardStream};
use retlang_diagnostic::{Config, Snippet};
use retlang_frontend::{LexerError, LexerErrorKind, ParseError};

use crate::sourcemap::{SourceId, SourceMap};

pub type Diagnostic = retlang_diagnostic::Diagnostic<SourceMap>;

pub trait DiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, _sources: &SourceMap) {
        self.push(diagnostic);
    }
}

#[derive(Debug)]
pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    pub config: Config,
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        Self {
            stream: StandardStream::stderr(ColorChoice::Auto),
            config: Config::default(),
        }
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap) {
        // nowhere left to report a failure to write to stderr
        let _ = diagnostic.write_to_stream(sources, &self.config, &mut self.stream);
    }
}

pub trait IntoDiagnostic<Context: ?Sized> {
    fn into_diagnostic(self, cx: &Context) -> Diagnostic;
}

impl IntoDiagnostic<SourceId> for LexerError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        let diagnostic = Diagnostic::error().with_message("syntax error");

        let diagnostic = match &self.kind {
            LexerErrorKind::InvalidCharacter { .. } => diagnostic.with_id("E0001"),
            LexerErrorKind::InvalidToken { .. } => diagnostic
                .with_id("E0002")
                .with_note("`return` is the only word the language knows"),
        };

        diagnostic.with_snippet(Snippet::primary(
            self.kind.to_string(),
            *source_id,
            self.span,
        ))
    }
}

impl IntoDiagnostic<SourceId> for ParseError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        let message = self.to_string();

        match self {
            ParseError::InvalidExpression { span, .. } => Diagnostic::error()
                .with_id("E0003")
                .with_message(message)
                .with_snippet(Snippet::primary(
                    "expected an integer literal here",
                    *source_id,
                    span,
                )),

            ParseError::MissingSemicolon { span, .. } => Diagnostic::error()
                .with_id("E0004")
                .with_message(message)
                .with_snippet(Snippet::primary("expected `;` here", *source_id, span)),

            ParseError::MultipleReturnStatements { first, second } => Diagnostic::error()
                .with_id("E0005")
                .with_message(message)
                .with_snippet(Snippet::secondary(
                    "first return statement",
                    *source_id,
                    first,
                ))
                .with_snippet(Snippet::primary(
                    "second return statement",
                    *source_id,
                    second,
                ))
                .with_note("a program may only return once"),
        }
    }
}

impl IntoDiagnostic<SourceId> for CodegenError {
    fn into_diagnostic(self, _source_id: &SourceId) -> Diagnostic {
        match self {
            CodegenError::MissingReturnStatement => Diagnostic::error()
                .with_id("E0006")
                .with_message("no return statement")
                .with_note("a program must contain a statement like `return 0;`"),
        }
    }
}
