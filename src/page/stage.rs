use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::engine::{SharedEngine, TweenEngine};
use crate::animation::plugins;
use crate::animation::ticker::Ticker;
use crate::dom::document::NodeId;
use crate::foundation::core::Viewport;
use crate::host::environment::Host;
use crate::host::listeners::ListenerId;
use crate::interaction::hover::HoverInteractionBinder;
use crate::page::config::StageConfig;
use crate::page::preference::MotionPreference;
use crate::scene::controller::{RenderStats, SceneController, SharedScene};
use crate::scroll::descriptor::AnimationTable;
use crate::scroll::registry::{BuildReport, ScrollAnimationRegistry};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Mounted,
    /// Terminal: a stage is never remounted.
    Unmounted,
}

/// Snapshot of a stage for logs and the CLI.
#[derive(Clone, Debug, serde::Serialize)]
pub struct StageReport {
    pub state: LifecycleState,
    pub reduced_motion: bool,
    pub render: Option<RenderStats>,
    pub animations: BuildReport,
    pub active_tweens: usize,
    pub hover_targets: usize,
}

/// One mounted page instance: owns the render loop, the resize listener, the animation
/// ticker, every scroll binding and every hover listener, and tears them down together.
pub struct Stage {
    state: LifecycleState,
    motion: MotionPreference,
    engine: SharedEngine,
    scene: Option<SharedScene>,
    resize_listener: Option<ListenerId>,
    ticker: Ticker,
    registry: ScrollAnimationRegistry,
    hover: HoverInteractionBinder,
}

impl Stage {
    /// Sets everything up against `host`. Missing pieces (no container, no matching elements,
    /// no surface) are logged and skipped; mounting itself never fails.
    #[tracing::instrument(skip_all, fields(viewport = %host.viewport()))]
    pub fn mount(host: &mut Host, container: Option<NodeId>, config: &StageConfig) -> Self {
        plugins::ensure_registered();
        let motion = MotionPreference::detect(host);

        let scene = SceneController::initialize(
            host,
            container,
            &config.scene,
            config.backend,
            &config.render,
        )
        .map(|ctl| Rc::new(RefCell::new(ctl)));
        if let Some(scene) = &scene {
            SceneController::start(scene, host);
        }

        let resize_listener = scene.as_ref().map(|scene| {
            let weak = Rc::downgrade(scene);
            host.add_resize_listener(Rc::new(move |h: &mut Host, vp: Viewport| {
                if let Some(ctl) = weak.upgrade() {
                    ctl.borrow_mut().on_resize(h, vp);
                }
            }))
        });

        let engine = TweenEngine::shared();
        let ticker = Ticker::start(host, &engine);

        let table = config.animation_table().unwrap_or_else(|err| {
            tracing::warn!(%err, "animation table unavailable, no scroll animations");
            AnimationTable::default()
        });
        let registry =
            ScrollAnimationRegistry::build(host, &table, motion.reduced_motion(), &engine);
        let hover =
            HoverInteractionBinder::attach(host, &config.hover, &engine, motion.allows_motion());

        tracing::info!(
            scene = scene.is_some(),
            reduced_motion = motion.reduced_motion(),
            bindings = registry.report().bindings,
            hover_targets = hover.targets().len(),
            "stage mounted"
        );
        Self {
            state: LifecycleState::Mounted,
            motion,
            engine,
            scene,
            resize_listener,
            ticker,
            registry,
            hover,
        }
    }

    /// Tears down in reverse dependency order. Only the first call does anything; it returns
    /// `true`.
    #[tracing::instrument(skip_all)]
    pub fn unmount(&mut self, host: &mut Host) -> bool {
        if self.state == LifecycleState::Unmounted {
            tracing::debug!("stage already unmounted");
            return false;
        }
        self.state = LifecycleState::Unmounted;

        self.hover.detach(host);
        if let Some(id) = self.resize_listener.take() {
            host.remove_resize_listener(id);
        }
        self.registry.destroy(host);
        self.ticker.stop();
        let killed = self.engine.borrow_mut().clear();
        if let Some(scene) = &self.scene {
            scene.borrow_mut().dispose(host);
        }

        tracing::info!(killed_tweens = killed, "stage unmounted");
        true
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.state == LifecycleState::Mounted
    }

    pub fn reduced_motion(&self) -> bool {
        self.motion.reduced_motion()
    }

    /// `None` when no scene was created.
    pub fn render_stats(&self) -> Option<RenderStats> {
        self.scene.as_ref().map(|s| s.borrow().stats())
    }

    pub fn registry_report(&self) -> &BuildReport {
        self.registry.report()
    }

    pub fn scene(&self) -> Option<&SharedScene> {
        self.scene.as_ref()
    }

    pub fn active_tweens(&self) -> usize {
        self.engine.borrow().active_count()
    }

    pub fn hover_targets(&self) -> &[NodeId] {
        self.hover.targets()
    }

    pub fn report(&self) -> StageReport {
        StageReport {
            state: self.state,
            reduced_motion: self.reduced_motion(),
            render: self.render_stats(),
            animations: self.registry.report().clone(),
            active_tweens: self.active_tweens(),
            hover_targets: self.hover.targets().len(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/stage.rs"]
mod tests;
