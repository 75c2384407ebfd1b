// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for E57 import

use std::path::PathBuf;
use thiserror::Error;

/// E57 import result type
pub type Result<T> = std::result::Result<T, Error>;

/// E57 import errors
#[derive(Error, Debug)]
pub enum Error {
    /// The container could not be opened or its XML section is invalid
    #[error("Failed to open E57 file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: e57::Error,
    },

    /// Reading the points of one scan failed
    #[error("Failed to read scan {index}: {source}")]
    Scan {
        index: usize,
        #[source]
        source: e57::Error,
    },
}

impl Error {
    /// Create an open error for `path`
    pub fn open(path: impl Into<PathBuf>, source: e57::Error) -> Self {
        Error::Open {
            path: path.into(),
            source,
        }
    }

    /// Create a scan error
    pub fn scan(index: usize, source: e57::Error) -> Self {
        Error::Scan { index, source }
    }
}
