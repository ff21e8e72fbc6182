//! Validated page dimensions shared by the rig builder and the sheet model.

use crate::constants::{PAGE_DEPTH, PAGE_HEIGHT, PAGE_HEIGHT_SEGMENTS, PAGE_SEGMENTS, PAGE_WIDTH};
use crate::error::GeometryError;

/// Dimensions and subdivision of a single page.
///
/// The bend axis runs along +X from the spine (x = 0) to the free edge
/// (x = `width`). Construct through [`PageGeometry::new`] so that the rig
/// and the sheet never see degenerate values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    width: f32,
    height: f32,
    depth: f32,
    segments: usize,
    height_segments: usize,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            depth: PAGE_DEPTH,
            segments: PAGE_SEGMENTS as usize,
            height_segments: PAGE_HEIGHT_SEGMENTS as usize,
        }
    }
}

impl PageGeometry {
    /// Create page geometry, rejecting sizes the rig cannot represent.
    ///
    /// Joint indices are stored as `u16`, so `segments` may not exceed
    /// `u16::MAX` (the chain then holds `u16::MAX + 1` joints).
    pub fn new(
        width: f32,
        height: f32,
        depth: f32,
        segments: u32,
        height_segments: u32,
    ) -> Result<Self, GeometryError> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        check_dimension("depth", depth)?;

        if segments == 0 {
            return Err(GeometryError::NoSegments("bend"));
        }
        if height_segments == 0 {
            return Err(GeometryError::NoSegments("height"));
        }
        if segments > u16::MAX as u32 {
            return Err(GeometryError::TooManySegments(segments));
        }

        Ok(Self {
            width,
            height,
            depth,
            segments: segments as usize,
            height_segments: height_segments as usize,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Number of bend segments (N).
    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn height_segments(&self) -> usize {
        self.height_segments
    }

    /// Distance between neighbouring joints (W / N).
    pub fn segment_width(&self) -> f32 {
        self.width / self.segments as f32
    }

    /// Number of joints in the bone chain (N + 1).
    pub fn joint_count(&self) -> usize {
        self.segments + 1
    }
}

fn check_dimension(axis: &'static str, value: f32) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidDimension { axis, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_book() {
        let geometry = PageGeometry::default();
        assert_eq!(geometry.segments(), 30);
        assert_eq!(geometry.joint_count(), 31);
        assert!((geometry.segment_width() - 0.042_666_668).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        assert!(matches!(
            PageGeometry::new(0.0, 1.0, 0.01, 4, 1),
            Err(GeometryError::InvalidDimension { axis: "width", .. })
        ));
        assert!(matches!(
            PageGeometry::new(1.0, f32::NAN, 0.01, 4, 1),
            Err(GeometryError::InvalidDimension { axis: "height", .. })
        ));
        assert!(matches!(
            PageGeometry::new(1.0, 1.0, -0.01, 4, 1),
            Err(GeometryError::InvalidDimension { axis: "depth", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_segment_counts() {
        assert_eq!(
            PageGeometry::new(1.0, 1.0, 0.01, 0, 1),
            Err(GeometryError::NoSegments("bend"))
        );
        assert_eq!(
            PageGeometry::new(1.0, 1.0, 0.01, 4, 0),
            Err(GeometryError::NoSegments("height"))
        );
        assert_eq!(
            PageGeometry::new(1.0, 1.0, 0.01, 70_000, 1),
            Err(GeometryError::TooManySegments(70_000))
        );
        assert!(PageGeometry::new(1.0, 1.0, 0.01, u16::MAX as u32, 1).is_ok());
    }
}
