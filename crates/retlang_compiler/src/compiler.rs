use std::path::PathBuf;

use retlang_backend::assembler::Assembler;
use retlang_frontend::ReturnPolicy;

use crate::diagnostics::{DiagnosticEmitter, IntoDiagnostic};
use crate::session::Session;
use crate::sourcemap::SourceId;
use crate::{CompilerError, CompilerResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub return_policy: ReturnPolicy,
}

/// Where a successful build puts its result.
#[derive(Debug, Clone)]
pub enum Output {
    Stdout,
    Files {
        asm: PathBuf,
        object: Option<ObjectOutput>,
    },
}

#[derive(Debug, Clone)]
pub struct ObjectOutput {
    pub path: PathBuf,
    pub assembler: Assembler,
}

/// Lexes, parses and generates assembly for one source. The first error is
/// reported to the session and nothing is returned.
pub fn compile<D: DiagnosticEmitter>(
    session: &mut Session<D>,
    source_id: SourceId,
    options: CompileOptions,
) -> CompilerResult<String> {
    let bytes = &session
        .sources
        .get(source_id)
        .ok_or(CompilerError::UnknownSource(source_id))?
        .as_source()
        .bytes;

    let tokens = retlang_frontend::lex(bytes);
    let tokens = check(session, tokens, source_id)?;

    let statement = retlang_frontend::parse(tokens, options.return_policy);
    let statement = check(session, statement, source_id)?;

    let asm = retlang_backend::generate(statement.as_ref());
    check(session, asm, source_id)
}

/// Compiles and then writes the assembly, and possibly an object file, to `output`.
pub fn build<D: DiagnosticEmitter>(
    session: &mut Session<D>,
    source_id: SourceId,
    options: CompileOptions,
    output: &Output,
) -> CompilerResult<()> {
    let asm = compile(session, source_id, options)?;

    match output {
        Output::Stdout => println!("{asm}"),

        Output::Files { asm: asm_path, object } => {
            std::fs::write(asm_path, asm)?;
            println!("wrote {}", asm_path.display());

            if let Some(object) = object {
                object.assembler.assemble(asm_path, &object.path)?;
                println!("wrote {}", object.path.display());
            }
        }
    }

    Ok(())
}

fn check<D, T, E>(
    session: &mut Session<D>,
    result: Result<T, E>,
    source_id: SourceId,
) -> CompilerResult<T>
where
    D: DiagnosticEmitter,
    E: IntoDiagnostic<SourceId>,
{
    result.map_err(|err| {
        session.report(err, &source_id);
        CompilerError::HadErrors
    })
}
