// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ScanReader - reads every point cloud of an E57 container

use crate::error::{Error, Result};
use crate::scan::{PointAccumulator, ScanHeader};

use e57::{E57Reader, PointCloud};
use scanbim_model::{GeometryImporter, ProgressCallback, Scan, ScanCollection, ScanFailure};
use std::io::{Read, Seek};
use std::path::Path;

/// Upper bound for the per-scan preallocation taken from the header
const MAX_PREALLOCATED_POINTS: usize = 1 << 24;

/// E57 container reader
///
/// A scan whose points fail to decode is recorded in
/// [`ScanCollection::failures`] and reading continues, unless
/// [`fail_fast`](Self::fail_fast) is set.
#[derive(Clone, Debug, Default)]
pub struct ScanReader {
    /// Abort on the first scan that fails to read
    pub fail_fast: bool,
    /// Derive gray colors from intensity when a scan has no color channels
    pub intensity_to_color: bool,
}

impl ScanReader {
    /// Create a reader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether a failing scan aborts the whole read
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    /// Set whether intensity-only scans get gray colors
    pub fn intensity_to_color(mut self, enabled: bool) -> Self {
        self.intensity_to_color = enabled;
        self
    }

    /// Read all scans of the container at `path`
    pub fn read(&self, path: &Path) -> Result<ScanCollection> {
        self.read_impl(path, None)
    }

    /// Read with progress reporting, one step per scan
    pub fn read_with_progress(
        &self,
        path: &Path,
        on_progress: ProgressCallback,
    ) -> Result<ScanCollection> {
        self.read_impl(path, Some(on_progress))
    }

    fn read_impl(
        &self,
        path: &Path,
        on_progress: Option<ProgressCallback>,
    ) -> Result<ScanCollection> {
        let report = |phase: &str, percent: f32| {
            if let Some(callback) = &on_progress {
                callback(phase, percent);
            }
        };

        report("Opening container", 0.0);
        let mut reader = E57Reader::from_file(path).map_err(|e| Error::open(path, e))?;
        let pointclouds = reader.pointclouds();
        log::debug!("{}: {} point clouds", path.display(), pointclouds.len());

        let mut scans = Vec::with_capacity(pointclouds.len());
        let mut failures = Vec::new();

        for (index, pc) in pointclouds.iter().enumerate() {
            report(
                &format!("Reading scan {}/{}", index + 1, pointclouds.len()),
                100.0 * index as f32 / pointclouds.len() as f32,
            );

            match self.read_scan(&mut reader, index, pc) {
                Ok(scan) => scans.push(scan),
                Err(e) if self.fail_fast => return Err(e),
                Err(e) => {
                    log::warn!("Skipping scan {}: {}", index, e);
                    failures.push(ScanFailure {
                        index,
                        name: pc.name.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let collection = ScanCollection::new(scans, failures);
        report("Done", 100.0);
        log::info!(
            "Read {}: {} scans, {} points, colors: {}, {} failed",
            path.display(),
            collection.len(),
            collection.total_points(),
            collection.has_colors(),
            collection.failures().len()
        );
        Ok(collection)
    }

    /// Read the points of one point cloud in sensor coordinates
    fn read_scan<T: Read + Seek>(
        &self,
        reader: &mut E57Reader<T>,
        index: usize,
        pc: &PointCloud,
    ) -> Result<Scan> {
        let header = ScanHeader::from_pointcloud(index, pc, self.intensity_to_color);
        let capacity = usize::try_from(header.records)
            .unwrap_or(usize::MAX)
            .min(MAX_PREALLOCATED_POINTS);

        let mut iter = reader
            .pointcloud_simple(pc)
            .map_err(|e| Error::scan(index, e))?;
        iter.spherical_to_cartesian(true);
        iter.cartesian_to_spherical(false);
        iter.intensity_to_color(self.intensity_to_color);
        iter.apply_pose(false);

        let mut points = PointAccumulator::new(header.colored, capacity);
        for point in iter {
            let point = point.map_err(|e| Error::scan(index, e))?;
            points.push(&point.cartesian, point.color.as_ref());
        }

        if points.skipped() > 0 {
            log::debug!(
                "Scan {} ({}): skipped {} points without cartesian coordinates",
                index,
                header.name,
                points.skipped()
            );
        }

        Ok(points.into_scan(header))
    }
}

impl GeometryImporter for ScanReader {
    type Output = ScanCollection;
    type Error = Error;

    fn extensions(&self) -> &'static [&'static str] {
        &["e57"]
    }

    fn import_file(&self, path: &Path) -> Result<ScanCollection> {
        self.read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flags() {
        let reader = ScanReader::new().fail_fast(true).intensity_to_color(true);
        assert!(reader.fail_fast);
        assert!(reader.intensity_to_color);
        assert!(!ScanReader::new().fail_fast);
    }

    #[test]
    fn test_accepts_e57_only() {
        let reader = ScanReader::new();
        assert!(reader.accepts(Path::new("site.E57")));
        assert!(!reader.accepts(Path::new("model.ifc")));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = ScanReader::new()
            .read(Path::new("/nonexistent/dir/scan.e57"))
            .unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }
}
