//! Flipbook - procedural page-curl book viewer
//!
//! Set `FLIPBOOK_CONFIG` to a JSON book config to change the page catalog,
//! geometry or curl tuning.

use bevy::prelude::*;
use bevy::window::WindowResolution;
use flipbook_scene::ScenePlugin;

mod config;
mod input;

use config::FlipbookConfig;

fn main() {
    let config = FlipbookConfig::from_env();

    let window_config = Window {
        title: config.display.title.clone(),
        resolution: WindowResolution::new(config.display.width, config.display.height)
            .with_scale_factor_override(config.display.scale),
        present_mode: bevy::window::PresentMode::AutoVsync,
        ..default()
    };

    let book = config.book.clone();

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.16, 0.17, 0.2)))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window_config),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    ..default()
                }),
        )
        .insert_resource(config.display.clone())
        .insert_resource(config)
        .add_systems(Startup, config::report_config)
        .add_plugins(ScenePlugin { config: book })
        .add_plugins(input::InputPlugin)
        .run();
}
