use crate::foundation::error::{VerdantError, VerdantResult};
use crate::render::{FrameRGBA, RenderSettings, SceneRenderer};
use crate::scene::camera::{PerspectiveCamera, project};
use crate::scene::mesh::Scene;

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    fn new(width: u32, height: u32) -> VerdantResult<Self> {
        if width == 0 || height == 0 {
            return Err(VerdantError::render(format!(
                "cannot allocate a {width}x{height} surface"
            )));
        }
        let width: u16 = width
            .try_into()
            .map_err(|_| VerdantError::render("surface width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| VerdantError::render("surface height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }
}

/// Rasterizes the projected wireframe into a premultiplied RGBA8 pixmap.
pub struct CpuRenderer {
    settings: RenderSettings,
    surface: Option<CpuSurface>,
    width: u32,
    height: u32,
    reallocations: u64,
}

impl CpuRenderer {
    pub fn new(settings: RenderSettings, width: u32, height: u32) -> VerdantResult<Self> {
        Ok(Self {
            settings,
            surface: Some(CpuSurface::new(width, height)?),
            width,
            height,
            reallocations: 0,
        })
    }
}

impl SceneRenderer for CpuRenderer {
    fn set_size(&mut self, width: u32, height: u32) -> VerdantResult<()> {
        if self.surface.is_some() && (width, height) == (self.width, self.height) {
            return Ok(());
        }
        self.surface = Some(CpuSurface::new(width, height)?);
        self.width = width;
        self.height = height;
        self.reallocations += 1;
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn reallocations(&self) -> u64 {
        self.reallocations
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> VerdantResult<()> {
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| VerdantError::render("renderer was released"))?;

        let clear = self
            .settings
            .clear_rgba
            .map(|[r, g, b, a]| premul_rgba8(r, g, b, a))
            .unwrap_or([0, 0, 0, 0]);
        clear_pixmap(&mut surface.pixmap, clear);

        let mesh = &scene.globe;
        let mvp = camera.view_projection() * mesh.model_matrix();
        let (w, h) = (f32::from(surface.width), f32::from(surface.height));
        let screen: Vec<_> = mesh
            .geometry
            .positions
            .iter()
            .map(|&p| project(mvp, p, w, h))
            .collect();

        let mut path = vello_cpu::kurbo::BezPath::new();
        for &[a, b] in mesh.edges() {
            let (Some(Some(pa)), Some(Some(pb))) =
                (screen.get(a as usize), screen.get(b as usize))
            else {
                continue;
            };
            path.move_to((f64::from(pa.x), f64::from(pa.y)));
            path.line_to((f64::from(pb.x), f64::from(pb.y)));
        }

        let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            mesh.color.r,
            mesh.color.g,
            mesh.color.b,
            255,
        ));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(self.settings.line_width));
        ctx.stroke_path(&path);
        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);
        Ok(())
    }

    fn snapshot(&self) -> Option<FrameRGBA> {
        let surface = self.surface.as_ref()?;
        Some(FrameRGBA {
            width: u32::from(surface.width),
            height: u32::from(surface.height),
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn release(&mut self) {
        self.surface = None;
    }

    fn is_released(&self) -> bool {
        self.surface.is_none()
    }
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = u16::from(a) + 1;
    let premul = |c: u8| -> u8 { ((u16::from(c) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
