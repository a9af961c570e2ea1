use crate::foundation::error::{VerdantError, VerdantResult};
use crate::render::{FrameRGBA, SceneRenderer};
use crate::scene::camera::PerspectiveCamera;
use crate::scene::mesh::Scene;

/// Renderer without pixels, for headless hosts.
#[derive(Debug)]
pub struct NullRenderer {
    width: u32,
    height: u32,
    renders: u64,
    reallocations: u64,
    released: bool,
}

impl NullRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            renders: 0,
            reallocations: 0,
            released: false,
        }
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }
}

impl SceneRenderer for NullRenderer {
    fn set_size(&mut self, width: u32, height: u32) -> VerdantResult<()> {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.reallocations += 1;
        }
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn reallocations(&self) -> u64 {
        self.reallocations
    }

    fn render(&mut self, _scene: &Scene, _camera: &PerspectiveCamera) -> VerdantResult<()> {
        if self.released {
            return Err(VerdantError::render("renderer was released"));
        }
        self.renders += 1;
        Ok(())
    }

    fn snapshot(&self) -> Option<FrameRGBA> {
        None
    }

    fn release(&mut self) {
        self.released = true;
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/null.rs"]
mod tests;
