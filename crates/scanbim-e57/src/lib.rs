// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! scanbim-e57 - E57 laser scan importer
//!
//! Reads every point cloud of an E57 container through the `e57` crate and
//! returns one [`Scan`](scanbim_model::Scan) per cloud: sensor-local points,
//! the sensor pose, points transformed to global coordinates and optional
//! RGB colors.
//!
//! # Example
//!
//! ```ignore
//! use scanbim_e57::read_e57;
//!
//! let scans = read_e57("site.e57")?;
//! for scan in scans.scans() {
//!     println!("{}: {} points", scan.name, scan.point_count());
//! }
//! ```

mod error;
mod reader;
mod scan;

pub use error::{Error, Result};
pub use reader::ScanReader;
pub use scan::{color_to_bytes, ScanHeader};

use scanbim_model::ScanCollection;
use std::path::Path;

/// Read all scans of an E57 file with default settings
pub fn read_e57(path: impl AsRef<Path>) -> Result<ScanCollection> {
    ScanReader::new().read(path.as_ref())
}

/// Read all scans, reporting progress per scan
pub fn read_e57_with_progress(
    path: impl AsRef<Path>,
    on_progress: impl Fn(&str, f32) + Send + 'static,
) -> Result<ScanCollection> {
    ScanReader::new().read_with_progress(path.as_ref(), Box::new(on_progress))
}
