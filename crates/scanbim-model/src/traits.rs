// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for file importers

use std::path::Path;

/// Progress callback type for import operations
///
/// Receives (phase_name, percent_complete).
pub type ProgressCallback = Box<dyn Fn(&str, f32) + Send>;

/// File-level import interface
///
/// Each supported format implements this trait so a host can pick an importer
/// by file extension and call it with a path.
///
/// # Example
///
/// ```ignore
/// use scanbim_model::GeometryImporter;
///
/// fn import_any<I: GeometryImporter>(importer: &I, path: &Path) -> Option<I::Output> {
///     importer.accepts(path).then(|| importer.import_file(path).ok()).flatten()
/// }
/// ```
pub trait GeometryImporter: Send + Sync {
    /// Geometry produced by a successful import
    type Output;
    /// Error returned for file-level failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lower-case file extensions this importer handles, without the dot
    fn extensions(&self) -> &'static [&'static str];

    /// Import the file at `path`
    fn import_file(&self, path: &Path) -> Result<Self::Output, Self::Error>;

    /// Check whether `path` has one of the supported extensions
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;

    impl GeometryImporter for Dummy {
        type Output = ();
        type Error = std::io::Error;

        fn extensions(&self) -> &'static [&'static str] {
            &["ifc"]
        }

        fn import_file(&self, _path: &Path) -> Result<(), std::io::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_accepts_is_case_insensitive() {
        assert!(Dummy.accepts(Path::new("model.IFC")));
        assert!(Dummy.accepts(Path::new("/a/b/model.ifc")));
        assert!(!Dummy.accepts(Path::new("scan.e57")));
        assert!(!Dummy.accepts(Path::new("noext")));
    }
}
