//! Key light and ambient fill for the book

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

/// Marker component for the key directional light
#[derive(Component)]
pub struct KeyLight;

/// Lighting of the reading scene.
///
/// Changing the resource re-applies it to the key light and the ambient light.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BookLighting {
    /// Direction toward the light source
    pub key_direction: Vec3,
    pub key_color: Color,
    /// Illuminance in lux
    pub key_illuminance: f32,
    pub shadows: bool,
    pub ambient_color: Color,
    pub ambient_brightness: f32,
}

impl Default for BookLighting {
    fn default() -> Self {
        Self {
            key_direction: Vec3::new(0.6, 1.0, 1.4),
            // Warm reading lamp
            key_color: Color::srgb(1.0, 0.96, 0.9),
            key_illuminance: 6000.0,
            shadows: true,
            ambient_color: Color::srgb(0.85, 0.88, 1.0),
            ambient_brightness: 400.0,
        }
    }
}

impl BookLighting {
    /// Key light transform shining along `-key_direction`.
    pub fn key_transform(&self) -> Transform {
        let direction = self.key_direction.normalize_or(Vec3::Y);
        Transform::default().looking_to(-direction, Vec3::Y)
    }
}

pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BookLighting>()
            .add_systems(Startup, spawn_lighting)
            .add_systems(
                Update,
                apply_lighting.run_if(resource_changed::<BookLighting>),
            );
    }
}

fn spawn_lighting(mut commands: Commands, lighting: Res<BookLighting>) {
    commands.spawn((
        DirectionalLight {
            illuminance: lighting.key_illuminance,
            color: lighting.key_color,
            shadows_enabled: lighting.shadows,
            ..default()
        },
        lighting.key_transform(),
        KeyLight,
    ));

    commands.insert_resource(GlobalAmbientLight {
        color: lighting.ambient_color,
        brightness: lighting.ambient_brightness,
        ..default()
    });

    info!("Book lighting initialized");
}

fn apply_lighting(
    lighting: Res<BookLighting>,
    mut key_query: Query<(&mut DirectionalLight, &mut Transform), With<KeyLight>>,
    ambient: Option<ResMut<GlobalAmbientLight>>,
) {
    for (mut light, mut transform) in key_query.iter_mut() {
        light.illuminance = lighting.key_illuminance;
        light.color = lighting.key_color;
        light.shadows_enabled = lighting.shadows;
        *transform = lighting.key_transform();
    }

    if let Some(mut ambient) = ambient {
        ambient.color = lighting.ambient_color;
        ambient.brightness = lighting.ambient_brightness;
    }

    debug!("Book lighting updated");
}
