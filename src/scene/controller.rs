use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec3;

use crate::dom::document::NodeId;
use crate::foundation::core::{Rect, Viewport};
use crate::host::environment::Host;
use crate::render::{BackendKind, FrameRGBA, RenderSettings, SceneRenderer, create_renderer};
use crate::scene::SceneConfig;
use crate::scene::camera::PerspectiveCamera;
use crate::scene::mesh::{Scene, SphereGeometry, WireframeMesh};

/// Controller handle shared with the render loop. The loop holds a `Weak`.
pub type SharedScene = Rc<RefCell<SceneController>>;

/// Counters exposed for inspection.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RenderStats {
    pub frames_rendered: u64,
    pub running: bool,
    pub disposed: bool,
    pub width: u32,
    pub height: u32,
    pub aspect: f32,
    /// Surface reallocations since initialize.
    pub reallocations: u64,
    pub rotation_y: f32,
}

/// Owns the globe scene, its camera and render surface, and the self-scheduling render loop.
pub struct SceneController {
    container: NodeId,
    canvas: NodeId,
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: Box<dyn SceneRenderer>,
    rotation_step: f32,
    frames_rendered: u64,
    running: bool,
    disposed: bool,
}

impl SceneController {
    /// Builds the scene inside `container`. Returns `None` (after logging) when the container
    /// is missing or detached, or when the render surface cannot be allocated.
    #[tracing::instrument(skip_all, fields(container = ?container.map(|c| c.0)))]
    pub fn initialize(
        host: &mut Host,
        container: Option<NodeId>,
        config: &SceneConfig,
        backend: BackendKind,
        settings: &RenderSettings,
    ) -> Option<Self> {
        let Some(container) = container else {
            tracing::warn!("no scene container, skipping 3D scene");
            return None;
        };
        if !host.document().is_connected(container) {
            tracing::warn!("scene container is not attached, skipping 3D scene");
            return None;
        }

        let vp = host.viewport();
        let renderer = match create_renderer(backend, settings, vp.width, vp.height) {
            Ok(r) => r,
            Err(err) => {
                tracing::warn!(%err, viewport = %vp, "render surface unavailable, skipping 3D scene");
                return None;
            }
        };

        let mut camera = PerspectiveCamera::new(
            config.fov,
            vp.aspect().unwrap_or(1.0),
            config.near,
            config.far,
        );
        camera.position = Vec3::new(0.0, 0.0, config.camera_z);

        let geometry = SphereGeometry::new(config.radius, config.width_segments, config.height_segments);
        let scene = Scene {
            globe: WireframeMesh::new(geometry, config.color),
        };

        let doc = host.document_mut();
        let canvas = doc.create_element("canvas");
        if let Some(el) = doc.element_mut(canvas) {
            el.layout = Rect::new(0.0, 0.0, f64::from(vp.width), f64::from(vp.height));
        }
        if let Err(err) = doc.append_child(container, canvas) {
            tracing::warn!(%err, "could not attach render surface");
            return None;
        }

        tracing::debug!(
            backend = ?backend,
            edges = scene.globe.edges().len(),
            "scene initialized"
        );
        Some(Self {
            container,
            canvas,
            scene,
            camera,
            renderer,
            rotation_step: config.rotation_step,
            frames_rendered: 0,
            running: false,
            disposed: false,
        })
    }

    /// Renders the first frame now and keeps rendering once per animation frame.
    pub fn start(this: &SharedScene, host: &mut Host) {
        this.borrow_mut().running = true;
        render_loop(Rc::downgrade(this), host);
    }

    /// One loop iteration. Returns whether the loop should continue.
    fn advance(&mut self, host: &Host) -> bool {
        if self.disposed || !self.running {
            return false;
        }
        if !host.document().is_connected(self.container) {
            tracing::debug!("scene container detached, stopping render loop");
            self.running = false;
            return false;
        }
        self.scene.globe.rotation.y += self.rotation_step;
        if let Err(err) = self.renderer.render(&self.scene, &self.camera) {
            tracing::warn!(%err, "render failed, stopping render loop");
            self.running = false;
            return false;
        }
        self.frames_rendered += 1;
        true
    }

    /// Matches camera and surface to a new viewport. Repeating the current size is a no-op.
    /// The camera changes only once the surface was resized, so both always agree.
    pub fn on_resize(&mut self, host: &mut Host, viewport: Viewport) {
        if self.disposed {
            return;
        }
        let Some(aspect) = viewport.aspect().filter(|_| !viewport.is_empty()) else {
            tracing::debug!(%viewport, "ignoring resize to an empty viewport");
            return;
        };
        if (viewport.width, viewport.height) == self.renderer.size() {
            return;
        }
        if let Err(err) = self.renderer.set_size(viewport.width, viewport.height) {
            tracing::warn!(%err, %viewport, "could not resize render surface");
            return;
        }
        self.camera.set_aspect(aspect);
        if let Some(el) = host.document_mut().element_mut(self.canvas) {
            el.layout = Rect::new(0.0, 0.0, f64::from(viewport.width), f64::from(viewport.height));
        }
    }

    /// Stops the loop, removes the surface element if it is still in the container and
    /// releases the pixels. Returns `false` when already disposed.
    pub fn dispose(&mut self, host: &mut Host) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        self.running = false;

        let doc = host.document_mut();
        if doc.parent(self.canvas) == Some(self.container)
            && let Err(err) = doc.remove_child(self.container, self.canvas)
        {
            tracing::debug!(%err, "render surface already gone");
        }
        self.renderer.release();
        true
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn canvas(&self) -> NodeId {
        self.canvas
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_released(&self) -> bool {
        self.renderer.is_released()
    }

    pub fn snapshot(&self) -> Option<FrameRGBA> {
        self.renderer.snapshot()
    }

    pub fn stats(&self) -> RenderStats {
        let (width, height) = self.renderer.size();
        RenderStats {
            frames_rendered: self.frames_rendered,
            running: self.running,
            disposed: self.disposed,
            width,
            height,
            aspect: self.camera.aspect,
            reallocations: self.renderer.reallocations(),
            rotation_y: self.scene.globe.rotation.y,
        }
    }
}

fn render_loop(weak: Weak<RefCell<SceneController>>, host: &mut Host) {
    let Some(ctl) = weak.upgrade() else {
        return;
    };
    if !ctl.borrow_mut().advance(host) {
        return;
    }
    host.request_animation_frame(Box::new(move |h: &mut Host, _now: f64| render_loop(weak, h)));
}

#[cfg(test)]
#[path = "../../tests/unit/scene/controller.rs"]
mod tests;
