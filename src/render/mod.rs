//! Render surfaces for the globe scene.
//!
//! [`SceneRenderer`] is the seam between the scene controller and a pixel backend. The CPU
//! backend rasterizes with `vello_cpu`; the null backend keeps the bookkeeping without pixels.

pub mod cpu;
pub mod null;

use crate::foundation::error::VerdantResult;
use crate::scene::camera::PerspectiveCamera;
use crate::scene::mesh::Scene;

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Converts premultiplied pixels to straight alpha in place.
    pub fn unpremultiply(&mut self) {
        if !self.premultiplied {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
    }
}

pub trait SceneRenderer {
    /// Reallocates the surface when the size differs from the current one.
    fn set_size(&mut self, width: u32, height: u32) -> VerdantResult<()>;

    fn size(&self) -> (u32, u32);

    /// Times `set_size` allocated a new surface.
    fn reallocations(&self) -> u64;

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> VerdantResult<()>;

    /// Copy of the last rendered frame, when the backend keeps pixels.
    fn snapshot(&self) -> Option<FrameRGBA>;

    /// Frees the surface. Rendering afterwards is an error.
    fn release(&mut self);

    fn is_released(&self) -> bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Cpu,
    Null,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Straight RGBA written before each frame; transparent when unset.
    pub clear_rgba: Option<[u8; 4]>,
    pub line_width: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_rgba: None,
            line_width: 1.0,
        }
    }
}

pub fn create_renderer(
    kind: BackendKind,
    settings: &RenderSettings,
    width: u32,
    height: u32,
) -> VerdantResult<Box<dyn SceneRenderer>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(cpu::CpuRenderer::new(
            settings.clone(),
            width,
            height,
        )?)),
        BackendKind::Null => Ok(Box::new(null::NullRenderer::new(width, height))),
    }
}
