//! Input source abstraction for file and stdin.
//!
//! The [`Input`] enum lets the same pipeline read from a file path or from
//! standard input, for Unix pipeline integration. With the `gzip` feature
//! enabled, files ending in `.gz` are decompressed transparently.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::error::KhistError;

/// Input source for a histogram run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Input {
    /// Read from a file at the specified path.
    File(PathBuf),
    /// Read from standard input.
    #[default]
    Stdin,
}

impl Input {
    /// Creates an `Input` from a path; `"-"` means stdin.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Creates an `Input` from an optional path; `None` or `"-"` means stdin.
    #[must_use]
    pub fn from_option(path: Option<&Path>) -> Self {
        path.map_or(Self::Stdin, Self::from_path)
    }

    /// Opens the source as a buffered reader.
    pub fn open(&self) -> Result<Box<dyn BufRead>, KhistError> {
        match self {
            Self::Stdin => Ok(Box::new(BufReader::new(std::io::stdin()))),
            Self::File(path) => {
                let file =
                    File::open(path).map_err(|source| KhistError::Read { source })?;
                #[cfg(feature = "gzip")]
                if path.extension().is_some_and(|ext| ext == "gz") {
                    return Ok(Box::new(BufReader::new(flate2::read::GzDecoder::new(
                        file,
                    ))));
                }
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}
