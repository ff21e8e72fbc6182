//! Bevy scene for Flipbook
//!
//! Spawns one skinned entity hierarchy per page of the configured catalog and
//! animates it with the page-curl [`Book`](page_curl::Book), held as a
//! resource. The host drives the book by writing the [`CurrentPage`]
//! resource.

use bevy::prelude::*;
use flipbook_config::BookConfig;

mod camera;
mod lighting;
mod pages;

pub use camera::{CameraControllerPlugin, MainCamera, OrbitCamera};
pub use lighting::{BookLighting, KeyLight, LightingPlugin};
pub use pages::{
    book_from_config, spawn_book, sync_page_joints, tick_book, BookRoot, CurrentPage,
    PageChanged, PageJoint, PageJoints, PageRoot,
};

/// Systems of the book, in execution order
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookSystems {
    /// Tick the book with the current page
    Tick,
    /// Copy page rigs onto joint transforms
    SyncJoints,
}

/// Book pages, their state and animation
pub struct BookPlugin {
    pub config: BookConfig,
}

impl BookPlugin {
    pub fn new(config: BookConfig) -> Self {
        Self { config }
    }
}

impl Default for BookPlugin {
    fn default() -> Self {
        Self::new(BookConfig::default())
    }
}

impl Plugin for BookPlugin {
    fn build(&self, app: &mut App) {
        let book = book_from_config(&self.config);
        let start = book.current_page();

        app.insert_resource(book)
            .insert_resource(self.config.clone())
            .insert_resource(CurrentPage(start))
            .add_message::<PageChanged>()
            .configure_sets(Update, (BookSystems::Tick, BookSystems::SyncJoints).chain())
            .add_systems(Startup, spawn_book)
            .add_systems(
                Update,
                (
                    tick_book.in_set(BookSystems::Tick),
                    sync_page_joints.in_set(BookSystems::SyncJoints),
                ),
            );
    }
}

/// Book with camera and lighting
pub struct ScenePlugin {
    pub config: BookConfig,
}

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(BookPlugin::new(self.config.clone()))
            .add_plugins(CameraControllerPlugin)
            .add_plugins(LightingPlugin);
    }
}
