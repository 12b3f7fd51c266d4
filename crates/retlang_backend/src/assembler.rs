use std::ffi::OsStr;
use std::process::Command;

use target_lexicon::{Architecture, BinaryFormat, OperatingSystem, Triple};

use crate::{BackendError, BackendResult};

#[derive(thiserror::Error, Debug)]
pub enum AssemblerError {
    #[error("couldn't run assembler: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "assembler exited with code {code} and stderr output:\n{}",
        String::from_utf8_lossy(.stderr)
    )]
    Exited { code: i32, stderr: Vec<u8> },

    #[error(
        "assembler terminated with stderr output:\n{}",
        String::from_utf8_lossy(.stderr)
    )]
    Terminated { stderr: Vec<u8> },
}

/// The external tool that turns generated assembly into an object file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembler {
    /// `nasm -f <format> -o <object> <source>`
    Nasm { format: &'static str },

    /// `<cmd> <args...> -o <object> <source>`
    Custom(String, Vec<String>),
}

impl Assembler {
    /// Picks the nasm output format for `target`. Only Linux targets are
    /// accepted, since the generated code exits with `int 80h`.
    pub fn for_target(target: &Triple) -> BackendResult<Self> {
        if target.operating_system != OperatingSystem::Linux {
            return Err(BackendError::UnsupportedOs(target.operating_system));
        }

        let format = match (target.architecture, target.binary_format) {
            (Architecture::X86_32(_), BinaryFormat::Elf) => "elf32",
            (Architecture::X86_64, BinaryFormat::Elf) => "elf64",

            (arch @ (Architecture::X86_32(_) | Architecture::X86_64), format) => {
                return Err(BackendError::UnsupportedFormat { arch, format });
            }

            (arch, _) => return Err(BackendError::UnsupportedArch(arch)),
        };

        Ok(Self::Nasm { format })
    }

    pub fn assemble<P0: AsRef<OsStr>, P1: AsRef<OsStr>>(
        &self,
        asm_file: P0,
        object_file: P1,
    ) -> Result<(), AssemblerError> {
        let mut cmd = match self {
            Self::Nasm { format } => {
                let mut cmd = Command::new("nasm");
                cmd.arg("-f").arg(format);
                cmd
            }

            Self::Custom(cmd, args) => {
                let mut cmd = Command::new(cmd);
                cmd.args(args);
                cmd
            }
        };

        cmd.arg("-o");
        cmd.arg(object_file);
        cmd.arg(asm_file);

        let output = cmd.output()?;

        if output.status.success() {
            Ok(())
        } else {
            match output.status.code() {
                Some(code) => Err(AssemblerError::Exited {
                    code,
                    stderr: output.stderr,
                }),

                None => Err(AssemblerError::Terminated {
                    stderr: output.stderr,
                }),
            }
        }
    }
}
