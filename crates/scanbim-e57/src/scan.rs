// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-scan point extraction

use e57::{CartesianCoordinate, Color, PointCloud, RecordName};
use scanbim_geometry::to_global;
use scanbim_model::{Pose, Scan};

/// Header data of one point cloud
#[derive(Clone, Debug, PartialEq)]
pub struct ScanHeader {
    pub index: usize,
    pub name: String,
    pub guid: Option<String>,
    pub pose: Pose,
    /// Whether points will carry colors
    pub colored: bool,
    /// Declared record count, used as capacity hint
    pub records: u64,
}

impl ScanHeader {
    /// Read name, pose and color layout of a point cloud
    ///
    /// With `intensity_to_color`, intensity-only clouds count as colored.
    pub fn from_pointcloud(index: usize, pc: &PointCloud, intensity_to_color: bool) -> Self {
        let name = pc
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("scan_{index}"));

        let pose = pc
            .transform
            .as_ref()
            .map(|t| {
                Pose::new(
                    [t.translation.x, t.translation.y, t.translation.z],
                    [t.rotation.w, t.rotation.x, t.rotation.y, t.rotation.z],
                )
            })
            .unwrap_or_default();

        let has_channel = |wanted: RecordName| pc.prototype.iter().any(|r| r.name == wanted);
        let colored = has_channel(RecordName::ColorRed)
            || (intensity_to_color && has_channel(RecordName::Intensity));

        Self {
            index,
            name,
            guid: pc.guid.clone(),
            pose,
            colored,
            records: pc.records,
        }
    }
}

/// Collects local points and colors with matching lengths
pub(crate) struct PointAccumulator {
    points: Vec<[f32; 3]>,
    colors: Option<Vec<[u8; 3]>>,
    skipped: usize,
}

impl PointAccumulator {
    pub(crate) fn new(colored: bool, capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            colors: colored.then(|| Vec::with_capacity(capacity)),
            skipped: 0,
        }
    }

    /// Add one point; points without a valid cartesian coordinate are dropped
    /// together with their color
    pub(crate) fn push(&mut self, cartesian: &CartesianCoordinate, color: Option<&Color>) {
        let &CartesianCoordinate::Valid { x, y, z } = cartesian else {
            self.skipped += 1;
            return;
        };

        self.points.push([x as f32, y as f32, z as f32]);
        if let Some(colors) = &mut self.colors {
            colors.push(color.map(color_to_bytes).unwrap_or([0, 0, 0]));
        }
    }

    pub(crate) fn skipped(&self) -> usize {
        self.skipped
    }

    /// Finish the scan, computing global points from the pose
    pub(crate) fn into_scan(self, header: ScanHeader) -> Scan {
        let points_global = to_global(&self.points, &header.pose);
        Scan {
            index: header.index,
            name: header.name,
            guid: header.guid,
            points_local: self.points,
            pose: header.pose,
            points_global,
            colors: self.colors,
        }
    }
}

/// Convert a normalized color to bytes
pub fn color_to_bytes(color: &Color) -> [u8; 3] {
    [
        channel_to_byte(color.red),
        channel_to_byte(color.green),
        channel_to_byte(color.blue),
    ]
}

/// `round(c * 255)` clamped to `0..=255`
fn channel_to_byte(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(red: f32, green: f32, blue: f32) -> Color {
        Color { red, green, blue }
    }

    #[test]
    fn test_channel_to_byte() {
        assert_eq!(channel_to_byte(0.0), 0);
        assert_eq!(channel_to_byte(1.0), 255);
        assert_eq!(channel_to_byte(0.5), 128);
        assert_eq!(channel_to_byte(1.7), 255);
        assert_eq!(channel_to_byte(-0.2), 0);
    }

    #[test]
    fn test_color_to_bytes() {
        assert_eq!(color_to_bytes(&color(1.0, 0.0, 0.2)), [255, 0, 51]);
    }

    #[test]
    fn test_invalid_points_skipped_with_color() {
        let mut acc = PointAccumulator::new(true, 3);
        acc.push(
            &CartesianCoordinate::Valid { x: 1.0, y: 2.0, z: 3.0 },
            Some(&color(1.0, 1.0, 1.0)),
        );
        acc.push(&CartesianCoordinate::Invalid, Some(&color(0.0, 0.0, 0.0)));
        acc.push(
            &CartesianCoordinate::Valid { x: 4.0, y: 5.0, z: 6.0 },
            Some(&color(0.0, 1.0, 0.0)),
        );
        assert_eq!(acc.skipped(), 1);

        let header = ScanHeader {
            index: 0,
            name: "scan_0".to_string(),
            guid: None,
            pose: Pose::new([1.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]),
            colored: true,
            records: 3,
        };
        let scan = acc.into_scan(header);

        assert_eq!(scan.points_local, vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(scan.points_global, vec![[2.0, 2.0, 3.0], [5.0, 5.0, 6.0]]);
        assert_eq!(scan.colors, Some(vec![[255, 255, 255], [0, 255, 0]]));
    }

    #[test]
    fn test_uncolored_scan_has_no_colors() {
        let mut acc = PointAccumulator::new(false, 1);
        acc.push(
            &CartesianCoordinate::Valid { x: 0.0, y: 0.0, z: 0.0 },
            Some(&color(1.0, 0.0, 0.0)),
        );
        let header = ScanHeader {
            index: 2,
            name: "scan_2".to_string(),
            guid: None,
            pose: Pose::IDENTITY,
            colored: false,
            records: 1,
        };
        let scan = acc.into_scan(header);
        assert!(!scan.has_colors());
        assert_eq!(scan.points_global, scan.points_local);
    }
}
