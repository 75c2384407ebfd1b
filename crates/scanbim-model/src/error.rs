// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for import operations
//!
//! Only file-level failures surface here. Irregular statements and dangling
//! references inside a file are absorbed by the parser and resolver.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for import operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors that can occur while importing a file
#[derive(Error, Debug)]
pub enum ImportError {
    /// The file could not be read at the given path
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid UTF-8
    #[error("Invalid text encoding in {path}: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl ImportError {
    /// Create a read error for `path`
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ImportError::Read {
            path: path.into(),
            source,
        }
    }

    /// Create an encoding error for `path`
    pub fn encoding(path: impl Into<PathBuf>, source: std::string::FromUtf8Error) -> Self {
        ImportError::Encoding {
            path: path.into(),
            source,
        }
    }
}
