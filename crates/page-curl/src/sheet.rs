//! Subdivided page sheet with per-vertex skin bindings.
//!
//! The sheet is a thin box spanning `width x height x depth`, subdivided
//! `segments` times across the width so that each bend segment has its own
//! column of vertices. It is laid out with the spine at x = 0 and the free
//! edge at x = `width`, which is the frame the bone chain is built in.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::PageGeometry;
use crate::skin::{bind_vertex, skin_positions, SkinBinding};

/// Face group of the sheet, used to pick a material per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetFace {
    /// +Z side, shows the page's front image
    Front,
    /// -Z side, shows the page's back image
    Back,
    /// The four thin edges
    Edge,
}

impl SheetFace {
    pub const ALL: [SheetFace; 3] = [SheetFace::Front, SheetFace::Back, SheetFace::Edge];
}

/// Triangle mesh of one page in its rest pose.
#[derive(Debug, Clone)]
pub struct PageSheet {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<[f32; 2]>,
    bindings: Vec<SkinBinding>,
    front: Vec<u32>,
    back: Vec<u32>,
    edge: Vec<u32>,
}

impl PageSheet {
    /// Build the sheet for `geometry` and bind it to a chain of matching size.
    pub fn build(geometry: &PageGeometry) -> Self {
        let mut sheet = Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            bindings: Vec::new(),
            front: Vec::new(),
            back: Vec::new(),
            edge: Vec::new(),
        };

        let width = geometry.width();
        let height = geometry.height();
        let depth = geometry.depth();
        let segments = geometry.segments();
        let rows = geometry.height_segments();
        let center = Vec3::new(width * 0.5, 0.0, 0.0);
        let half_depth = Vec3::new(0.0, 0.0, depth * 0.5);
        let half_height = Vec3::new(0.0, height * 0.5, 0.0);

        // Printed sides
        sheet.push_grid(
            SheetFace::Front,
            center + half_depth,
            Vec3::new(width, 0.0, 0.0),
            Vec3::new(0.0, height, 0.0),
            segments,
            rows,
        );
        sheet.push_grid(
            SheetFace::Back,
            center - half_depth,
            Vec3::new(-width, 0.0, 0.0),
            Vec3::new(0.0, height, 0.0),
            segments,
            rows,
        );

        // Free edge and spine edge
        sheet.push_grid(
            SheetFace::Edge,
            center + Vec3::new(width * 0.5, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -depth),
            Vec3::new(0.0, height, 0.0),
            1,
            rows,
        );
        sheet.push_grid(
            SheetFace::Edge,
            center - Vec3::new(width * 0.5, 0.0, 0.0),
            Vec3::new(0.0, 0.0, depth),
            Vec3::new(0.0, height, 0.0),
            1,
            rows,
        );

        // Top and bottom edges
        sheet.push_grid(
            SheetFace::Edge,
            center + half_height,
            Vec3::new(width, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -depth),
            segments,
            1,
        );
        sheet.push_grid(
            SheetFace::Edge,
            center - half_height,
            Vec3::new(width, 0.0, 0.0),
            Vec3::new(0.0, 0.0, depth),
            segments,
            1,
        );

        sheet.bindings = sheet
            .positions
            .iter()
            .map(|position| bind_vertex(position.x, width, segments))
            .collect();

        debug!(
            "Built page sheet: {} vertices, {} triangles",
            sheet.vertex_count(),
            sheet.triangle_count()
        );

        sheet
    }

    /// Append a subdivided quad centred on `center` spanning `u` by `v`.
    ///
    /// The face normal is `u x v`; triangles wind counter-clockwise when seen
    /// from that side.
    fn push_grid(
        &mut self,
        face: SheetFace,
        center: Vec3,
        u: Vec3,
        v: Vec3,
        u_segments: usize,
        v_segments: usize,
    ) {
        let base = self.positions.len() as u32;
        let normal = u.cross(v).normalize_or_zero();
        let columns = u_segments + 1;

        for j in 0..=v_segments {
            let t = j as f32 / v_segments as f32;
            for i in 0..=u_segments {
                let s = i as f32 / u_segments as f32;
                self.positions.push(center + u * (s - 0.5) + v * (t - 0.5));
                self.normals.push(normal);
                self.uvs.push([s, 1.0 - t]);
            }
        }

        let indices = match face {
            SheetFace::Front => &mut self.front,
            SheetFace::Back => &mut self.back,
            SheetFace::Edge => &mut self.edge,
        };
        for j in 0..v_segments {
            for i in 0..u_segments {
                let a = base + (j * columns + i) as u32;
                let b = a + 1;
                let c = a + 1 + columns as u32;
                let d = a + columns as u32;
                indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        (self.front.len() + self.back.len() + self.edge.len()) / 3
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn bindings(&self) -> &[SkinBinding] {
        &self.bindings
    }

    /// Triangle indices of one face group, into the shared vertex arrays.
    pub fn indices(&self, face: SheetFace) -> &[u32] {
        match face {
            SheetFace::Front => &self.front,
            SheetFace::Back => &self.back,
            SheetFace::Edge => &self.edge,
        }
    }

    /// Deform the sheet on the CPU with per-joint skinning matrices.
    pub fn skin_positions(&self, matrices: &[Mat4]) -> Vec<Vec3> {
        skin_positions(&self.positions, &self.bindings, matrices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::BoneChain;
    use std::f32::consts::FRAC_PI_2;

    fn small_geometry() -> PageGeometry {
        PageGeometry::new(1.0, 2.0, 0.02, 4, 2).unwrap()
    }

    #[test]
    fn test_vertex_and_triangle_counts() {
        let sheet = PageSheet::build(&small_geometry());
        // Front/back: 5x3 each, side edges: 2x3 each, top/bottom: 5x2 each
        assert_eq!(sheet.vertex_count(), 15 * 2 + 6 * 2 + 10 * 2);
        assert_eq!(sheet.indices(SheetFace::Front).len() / 3, 4 * 2 * 2);
        assert_eq!(sheet.indices(SheetFace::Back).len() / 3, 4 * 2 * 2);
        assert_eq!(sheet.indices(SheetFace::Edge).len() / 3, 2 * 2 * 2 + 4 * 2 * 2);
        assert_eq!(sheet.bindings().len(), sheet.vertex_count());
        assert_eq!(sheet.uvs().len(), sheet.vertex_count());
    }

    #[test]
    fn test_sheet_spans_spine_to_edge() {
        let sheet = PageSheet::build(&small_geometry());
        let min_x = sheet.positions().iter().map(|p| p.x).fold(f32::MAX, f32::min);
        let max_x = sheet.positions().iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!(min_x.abs() < 1e-6);
        assert!((max_x - 1.0).abs() < 1e-6);

        let max_z = sheet.positions().iter().map(|p| p.z.abs()).fold(0.0, f32::max);
        assert!((max_z - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_indices_in_range() {
        let sheet = PageSheet::build(&PageGeometry::default());
        let count = sheet.vertex_count() as u32;
        for face in SheetFace::ALL {
            assert!(!sheet.indices(face).is_empty());
            assert!(sheet.indices(face).iter().all(|&i| i < count));
        }
    }

    #[test]
    fn test_triangles_wind_toward_normals() {
        let sheet = PageSheet::build(&small_geometry());
        for face in SheetFace::ALL {
            for triangle in sheet.indices(face).chunks(3) {
                let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
                let p = sheet.positions();
                let geometric = (p[b] - p[a]).cross(p[c] - p[a]);
                assert!(geometric.dot(sheet.normals()[a]) > 0.0);
            }
        }
    }

    #[test]
    fn test_front_and_back_normals() {
        let sheet = PageSheet::build(&small_geometry());
        let front = sheet.indices(SheetFace::Front)[0] as usize;
        let back = sheet.indices(SheetFace::Back)[0] as usize;
        assert_eq!(sheet.normals()[front], Vec3::Z);
        assert_eq!(sheet.normals()[back], Vec3::NEG_Z);
    }

    #[test]
    fn test_vertices_bound_to_bracketing_joints() {
        let geometry = small_geometry();
        let sheet = PageSheet::build(&geometry);
        for (position, binding) in sheet.positions().iter().zip(sheet.bindings()) {
            let lower = binding.joints[0] as f32 * geometry.segment_width();
            let upper = binding.joints[1] as f32 * geometry.segment_width();
            assert!(position.x >= lower - 1e-5 && position.x <= upper + 1e-5);
            assert!((binding.weight_sum() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_rest_skinning_keeps_sheet_and_turned_sheet_folds() {
        let geometry = small_geometry();
        let sheet = PageSheet::build(&geometry);
        let mut chain = BoneChain::from_geometry(&geometry);

        let rest = sheet.skin_positions(&chain.skinning_matrices());
        for (a, b) in rest.iter().zip(sheet.positions()) {
            assert!((*a - *b).length() < 1e-5);
        }

        chain.joints_mut()[0].angle = -FRAC_PI_2;
        let turned = sheet.skin_positions(&chain.skinning_matrices());
        // A fully turned page stands on the +Z side of the spine
        for (deformed, original) in turned.iter().zip(sheet.positions()) {
            assert!((deformed.z - original.x).abs() < 1e-4);
            assert!((deformed.y - original.y).abs() < 1e-5);
        }
    }
}
