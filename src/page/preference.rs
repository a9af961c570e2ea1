use crate::host::environment::{Host, REDUCED_MOTION_QUERY};

/// Reduced-motion gate, read once per mount and constant afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MotionPreference {
    reduced: bool,
}

impl MotionPreference {
    /// Queries the host's reduced-motion media signal. A host that cannot answer allows
    /// motion.
    pub fn detect(host: &Host) -> Self {
        let reduced = match host.match_media(REDUCED_MOTION_QUERY) {
            Some(v) => v,
            None => {
                tracing::debug!("reduced-motion signal unavailable, allowing motion");
                false
            }
        };
        Self { reduced }
    }

    pub fn reduced_motion(self) -> bool {
        self.reduced
    }

    pub fn allows_motion(self) -> bool {
        !self.reduced
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/preference.rs"]
mod tests;
