// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry processing

use thiserror::Error;

/// Geometry processing result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry processing errors
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry processing error
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Triangulation error
    #[error("Triangulation error: {0}")]
    Triangulation(String),
}

impl Error {
    /// Create a geometry error
    pub fn geometry(msg: impl Into<String>) -> Self {
        Error::Geometry(msg.into())
    }

    /// Create a triangulation error
    pub fn triangulation(msg: impl Into<String>) -> Self {
        Error::Triangulation(msg.into())
    }
}
