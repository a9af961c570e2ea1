//! The live 3D backdrop: one rotating wireframe sphere seen through a perspective camera.

pub mod camera;
pub mod controller;
pub mod mesh;

use crate::foundation::core::Rgb8;

fn default_radius() -> f32 {
    5.0
}
fn default_segments() -> u32 {
    32
}
fn default_color() -> Rgb8 {
    Rgb8::from_hex_u32(0x16a34a)
}
fn default_fov() -> f32 {
    75.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    1000.0
}
fn default_camera_z() -> f32 {
    10.0
}
fn default_rotation_step() -> f32 {
    0.005
}

/// Parameters of the globe scene. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_segments")]
    pub width_segments: u32,
    #[serde(default = "default_segments")]
    pub height_segments: u32,
    #[serde(default = "default_color")]
    pub color: Rgb8,
    /// Vertical field of view, in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_camera_z")]
    pub camera_z: f32,
    /// Y rotation added per rendered frame, in radians.
    #[serde(default = "default_rotation_step")]
    pub rotation_step: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            width_segments: default_segments(),
            height_segments: default_segments(),
            color: default_color(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            camera_z: default_camera_z(),
            rotation_step: default_rotation_step(),
        }
    }
}
