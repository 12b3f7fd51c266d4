use target_lexicon::{Architecture, BinaryFormat, OperatingSystem};

pub mod assembler;
pub mod codegen;

pub use codegen::{generate, CodegenError};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendError {
    #[error("unsupported architecture: {0}")]
    UnsupportedArch(Architecture),

    #[error("unsupported object format {format} for {arch}")]
    UnsupportedFormat {
        arch: Architecture,
        format: BinaryFormat,
    },

    #[error("unsupported operating system: {0}")]
    UnsupportedOs(OperatingSystem),
}

pub type BackendResult<T> = Result<T, BackendError>;
