mod cli;
mod compiler;
mod diagnostics;
mod input;
mod session;
mod sourcemap;


use std::path::PathBuf;

use clap::Parser as _;
use cli::{BuildArgs, Cli, Command};
use retlang_backend::assembler::{Assembler, AssemblerError};
use retlang_backend::BackendError;
use retlang_frontend::ReturnPolicy;
use target_lexicon::Triple;

use crate::compiler::{CompileOptions, ObjectOutput, Output};
use crate::diagnostics::{DiagnosticEmitter, PrettyDiagnosticEmitter};
use crate::input::InputLimit;
use crate::session::Session;
use crate::sourcemap::SourceId;

#[derive(thiserror::Error, Debug)]
enum CompilerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("input file `{0}` does not exist")]
    InputNotFound(String),

    #[error("no source with id {0}")]
    UnknownSource(SourceId),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Assembler(#[from] AssemblerError),

    #[error("errors while compiling")]
    HadErrors,
}

type CompilerResult<T> = Result<T, CompilerError>;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> CompilerResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => {
            let mut job = BuildJob::from_args(args, PrettyDiagnosticEmitter::default())?;

            if matches!(job.output, Output::Files { .. }) {
                let name = &job.session.sources[job.source_id].as_source().name;
                println!("building {name}...");
            }

            compiler::build(&mut job.session, job.source_id, job.options, &job.output)
        }
    }
}

/// A build with its input loaded and every flag resolved.
struct BuildJob<D: DiagnosticEmitter> {
    session: Session<D>,
    source_id: SourceId,
    options: CompileOptions,
    output: Output,
}

impl<D: DiagnosticEmitter> BuildJob<D> {
    fn from_args(args: BuildArgs, diagnostics: D) -> CompilerResult<Self> {
        let limit = if args.no_truncate {
            InputLimit::Unlimited
        } else {
            InputLimit::default()
        };

        let (name, path, bytes) = if args.source {
            ("<unnamed>".to_owned(), None, limit.apply(args.input.into_bytes()))
        } else {
            let path = PathBuf::from(&args.input);
            let bytes = input::read_source(&path, limit)?;
            (args.input, Some(path), bytes)
        };

        let target = args.target.unwrap_or_else(Triple::host);
        let mut session = Session::new(target, diagnostics);

        let output = if args.print {
            Output::Stdout
        } else {
            let object = if args.no_assemble {
                None
            } else {
                let assembler = match args.assembler {
                    Some(cmd) => Assembler::Custom(cmd, args.assembler_args),
                    None => Assembler::for_target(&session.target)?,
                };

                Some(ObjectOutput {
                    path: args.object,
                    assembler,
                })
            };

            Output::Files {
                asm: args.output,
                object,
            }
        };

        let options = CompileOptions {
            return_policy: if args.reject_multiple_returns {
                ReturnPolicy::RejectMultiple
            } else {
                ReturnPolicy::LastWins
            },
        };

        let source_id = session.add_source(name, path, bytes);

        Ok(Self {
            session,
            source_id,
            options,
            output,
        })
    }
}
