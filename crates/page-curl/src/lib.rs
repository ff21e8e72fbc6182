//! Procedural page curl for a book of flexible pages.
//!
//! This crate turns a discrete reading position into a continuous bend of
//! every page:
//! - [`rig::BoneChain`] - the linear joint chain spanning a page
//! - [`skin`] - per-vertex bindings between the sheet and the chain
//! - [`sheet::PageSheet`] - the subdivided page mesh in its rest pose
//! - [`solver::CurvatureSolver`] - target pose and damping, once per frame
//! - [`stack::PageStack`] - per-page state derived from the current page
//! - [`book::Book`] - pages plus the scheduled tick tying it together
//!
//! The crate is engine independent. With the `bevy` feature the sheet can be
//! converted into a skinned Bevy mesh.

pub mod book;
pub mod constants;
pub mod damp;
pub mod error;
pub mod geometry;
pub mod rig;
pub mod sheet;
pub mod skin;
pub mod solver;
pub mod stack;

#[cfg(feature = "bevy")]
mod bevy_mesh;

pub use book::{Book, Page};
pub use constants::*;
pub use error::GeometryError;
pub use geometry::PageGeometry;
pub use rig::{BoneChain, Joint};
pub use sheet::{PageSheet, SheetFace};
pub use skin::SkinBinding;
pub use solver::{CurlProfile, CurvatureSolver};
pub use stack::{PageStack, PageState};
