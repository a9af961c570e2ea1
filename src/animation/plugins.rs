use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::animation::ease::{self, Ease};
use crate::foundation::error::VerdantResult;

const PLUGIN_NAMES: &[&str] = &["eases", "scroll-trigger"];

/// Builds a curve from its registered name and the numbers inside its parentheses.
pub type EaseBuilder = fn(&str, &[f64]) -> VerdantResult<Ease>;

/// Animation extensions installed for the whole process, including the named-ease registry
/// every `Ease` parse resolves against.
#[derive(Debug)]
pub struct PluginSet {
    names: &'static [&'static str],
    eases: BTreeMap<&'static str, EaseBuilder>,
}

impl PluginSet {
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name)
    }

    /// Builder registered under an ease name such as `power2.out` or `back`.
    pub fn ease(&self, name: &str) -> Option<EaseBuilder> {
        self.eases.get(name).copied()
    }

    pub fn ease_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.eases.keys().copied()
    }
}

static PLUGINS: OnceLock<PluginSet> = OnceLock::new();

/// Registers the animation plugins on first call; later calls return the same set.
pub fn ensure_registered() -> &'static PluginSet {
    PLUGINS.get_or_init(|| {
        let eases: BTreeMap<_, _> = ease::builtin_eases().into_iter().collect();
        tracing::info!(plugins = ?PLUGIN_NAMES, eases = eases.len(), "registering animation plugins");
        PluginSet {
            names: PLUGIN_NAMES,
            eases,
        }
    })
}

pub fn is_registered() -> bool {
    PLUGINS.get().is_some()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/plugins.rs"]
mod tests;
