use crate::foundation::error::VerdantResult;
use crate::interaction::hover::HoverConfig;
use crate::render::{BackendKind, RenderSettings};
use crate::scene::SceneConfig;
use crate::scroll::descriptor::AnimationTable;

/// Everything a [`crate::Stage`] mounts with. Every field has a default, so `{}` is valid
/// JSON for the stock landing page.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    pub backend: BackendKind,
    pub render: RenderSettings,
    pub scene: SceneConfig,
    pub hover: HoverConfig,
    /// Scroll animations; the landing-page table when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animations: Option<AnimationTable>,
}

impl StageConfig {
    /// Default config on the pixel-free backend.
    pub fn headless() -> Self {
        Self {
            backend: BackendKind::Null,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> VerdantResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        if let Some(table) = &config.animations {
            table.validate()?;
        }
        Ok(config)
    }

    /// The configured table, or the landing-page table.
    pub fn animation_table(&self) -> VerdantResult<AnimationTable> {
        match &self.animations {
            Some(table) => Ok(table.clone()),
            None => AnimationTable::homepage(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/config.rs"]
mod tests;
