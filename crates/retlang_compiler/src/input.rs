use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::{CompilerError, CompilerResult};

/// Size of the input buffer in the reference toolchain; later bytes are dropped.
pub const LEGACY_BUFFER_SIZE: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLimit {
    /// Keep at most this many bytes.
    Truncate(usize),
    Unlimited,
}

impl Default for InputLimit {
    fn default() -> Self {
        Self::Truncate(LEGACY_BUFFER_SIZE)
    }
}

impl InputLimit {
    pub fn apply(self, mut bytes: Vec<u8>) -> Vec<u8> {
        if let Self::Truncate(limit) = self {
            bytes.truncate(limit);
        }
        bytes
    }
}

pub fn read_source(path: &Path, limit: InputLimit) -> CompilerResult<Vec<u8>> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => CompilerError::InputNotFound(path.display().to_string()),
        _ => CompilerError::Io(err),
    })?;

    let mut bytes = vec![];
    match limit {
        InputLimit::Truncate(limit) => file.take(limit as u64).read_to_end(&mut bytes)?,
        InputLimit::Unlimited => (&file).read_to_end(&mut bytes)?,
    };

    Ok(bytes)
}
