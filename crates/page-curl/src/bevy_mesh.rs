//! Conversion of the page sheet into skinned Bevy meshes.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::prelude::*;

use crate::sheet::{PageSheet, SheetFace};

impl PageSheet {
    /// Build a skinned Bevy mesh containing one face group of the sheet.
    ///
    /// Every mesh carries the full vertex set so all groups share joint
    /// indices; only the triangle list differs.
    pub fn to_bevy_mesh(&self, face: SheetFace) -> Mesh {
        let positions: Vec<[f32; 3]> = self.positions().iter().map(|p| p.to_array()).collect();
        let normals: Vec<[f32; 3]> = self.normals().iter().map(|n| n.to_array()).collect();
        let joint_indices: Vec<[u16; 4]> = self.bindings().iter().map(|b| b.joints).collect();
        let joint_weights: Vec<[f32; 4]> = self.bindings().iter().map(|b| b.weights).collect();

        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
            .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs().to_vec())
            .with_inserted_attribute(
                Mesh::ATTRIBUTE_JOINT_INDEX,
                VertexAttributeValues::Uint16x4(joint_indices),
            )
            .with_inserted_attribute(Mesh::ATTRIBUTE_JOINT_WEIGHT, joint_weights)
            .with_inserted_indices(Indices::U32(self.indices(face).to_vec()))
    }
}
