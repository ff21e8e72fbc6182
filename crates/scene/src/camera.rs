//! Orbit camera around the book
//!
//! Controls:
//! - Left mouse drag: Orbit around target
//! - Scroll wheel: Dolly (zoom)

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseButton, MouseMotion, MouseWheel};
use bevy::prelude::*;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Camera orbit controller state
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Distance from target
    pub distance: f32,
    /// Horizontal angle (yaw) in radians, 0 looks down -Z
    pub yaw: f32,
    /// Vertical angle (pitch) in radians above the horizon
    pub pitch: f32,
    /// Radians per pixel of drag
    pub orbit_sensitivity: f32,
    /// Fraction of the distance per scroll line
    pub zoom_sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 4.0,
            yaw: -0.12,
            pitch: 0.25,
            orbit_sensitivity: 0.005,
            zoom_sensitivity: 0.1,
            min_distance: 1.0,
            max_distance: 12.0,
        }
    }
}

impl OrbitCamera {
    /// Camera position from the orbit parameters
    pub fn position(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        self.target
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }

    /// Apply a drag of `delta` pixels
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.orbit_sensitivity;
        // Just below straight up/down
        self.pitch = (self.pitch - delta.y * self.orbit_sensitivity).clamp(-1.5, 1.5);
    }

    /// Apply `lines` of scroll, positive zooms in
    pub fn zoom(&mut self, lines: f32) {
        let distance = self.distance * (1.0 - lines * self.zoom_sensitivity);
        self.distance = distance.clamp(self.min_distance, self.max_distance);
    }
}

pub struct CameraControllerPlugin;

impl Plugin for CameraControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera).add_systems(
            Update,
            (
                camera_orbit_system,
                camera_zoom_system,
                update_camera_transform
                    .after(camera_orbit_system)
                    .after(camera_zoom_system),
            ),
        );
    }
}

fn spawn_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((
        Camera3d::default(),
        orbit.transform(),
        Tonemapping::Reinhard,
        MainCamera,
        orbit,
    ));
}

fn camera_orbit_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut motion_events: MessageReader<MouseMotion>,
    mut camera_query: Query<&mut OrbitCamera>,
) {
    if !mouse_button.pressed(MouseButton::Left) {
        motion_events.clear();
        return;
    }

    let delta: Vec2 = motion_events.read().map(|event| event.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }

    for mut orbit in camera_query.iter_mut() {
        orbit.orbit(delta);
    }
}

fn camera_zoom_system(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut OrbitCamera>,
) {
    let lines: f32 = scroll_events.read().map(|event| event.y).sum();
    if lines == 0.0 {
        return;
    }

    for mut orbit in camera_query.iter_mut() {
        orbit.zoom(lines);
    }
}

fn update_camera_transform(
    mut camera_query: Query<
        (&OrbitCamera, &mut Transform),
        (With<MainCamera>, Changed<OrbitCamera>),
    >,
) {
    for (orbit, mut transform) in camera_query.iter_mut() {
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_keeps_distance() {
        let orbit = OrbitCamera {
            target: Vec3::new(0.5, 0.0, 0.0),
            ..default()
        };
        assert!((orbit.position().distance(orbit.target) - orbit.distance).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut orbit = OrbitCamera::default();
        orbit.orbit(Vec2::new(0.0, -10_000.0));
        assert_eq!(orbit.pitch, 1.5);
    }

    #[test]
    fn test_zoom_respects_limits() {
        let mut orbit = OrbitCamera::default();
        orbit.zoom(100.0);
        assert_eq!(orbit.distance, orbit.min_distance);
        orbit.zoom(-1000.0);
        assert_eq!(orbit.distance, orbit.max_distance);
    }
}
