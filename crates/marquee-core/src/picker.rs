//! State machine for the active recommendation model.
//!
//! The picker does no I/O: it consumes completion events and returns
//! [`PickerCmd`]s for the shell to execute. The server owns the truth
//! about which model is active — after a confirmed switch the picker
//! waits out a settle delay, then re-fetches the catalog instead of
//! flipping any flag locally, because the switch is not guaranteed to be
//! synchronously visible to the next read.

use std::time::Duration;

use marquee_api::types::{ModelCatalog, ModelEntry, SwitchOutcome};

use crate::notify::Severity;

/// Wait between a confirmed switch and the authoritative catalog re-poll.
pub const SETTLE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Switching,
}

/// Commands the shell executes on the picker's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerCmd {
    FetchCatalog,
    SwitchModel(String),
    Notify(Severity, String),
    ScheduleSettle(Duration),
}

#[derive(Debug, Default)]
pub struct ModelPicker {
    pub phase: PickerPhase,
    pub models: Vec<ModelEntry>,
    pub current: Option<String>,
}

impl ModelPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kick off (or re-run) the catalog load.
    pub fn start(&mut self) -> Vec<PickerCmd> {
        self.phase = PickerPhase::Loading;
        vec![PickerCmd::FetchCatalog]
    }

    /// Catalog fetch resolved.
    ///
    /// On failure the picker still lands in `Loaded` — with an empty
    /// catalog — so the rest of the page keeps working.
    pub fn catalog_loaded(&mut self, result: Result<ModelCatalog, String>) -> Vec<PickerCmd> {
        self.phase = PickerPhase::Loaded;
        match result {
            Ok(catalog) => {
                self.current = catalog.current.clone().or_else(|| {
                    catalog
                        .models
                        .iter()
                        .find(|m| m.is_current)
                        .map(|m| m.version.clone())
                });
                self.models = catalog.models;
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("model catalog load failed: {e}");
                self.models.clear();
                self.current = None;
                vec![PickerCmd::Notify(
                    Severity::Error,
                    format!("Could not load the model catalog: {e}"),
                )]
            }
        }
    }

    /// User picked a model version. Only meaningful from `Loaded`.
    pub fn select(&mut self, version: &str) -> Vec<PickerCmd> {
        if self.phase != PickerPhase::Loaded {
            return Vec::new();
        }
        self.phase = PickerPhase::Switching;
        vec![
            PickerCmd::Notify(
                Severity::Info,
                "Switching model, this may take a moment...".into(),
            ),
            PickerCmd::SwitchModel(version.to_string()),
        ]
    }

    /// Switch request resolved.
    pub fn switch_resolved(&mut self, result: Result<SwitchOutcome, String>) -> Vec<PickerCmd> {
        match result {
            Ok(outcome) if outcome.success => {
                // Stay in Switching until the settle delay elapses; the
                // catalog re-poll is what confirms the new state.
                vec![
                    PickerCmd::Notify(Severity::Success, outcome.message),
                    PickerCmd::ScheduleSettle(SETTLE_DELAY),
                ]
            }
            Ok(outcome) => {
                // Explicit rejection: no reason to assume server state
                // changed, so no re-poll.
                self.phase = PickerPhase::Loaded;
                vec![PickerCmd::Notify(
                    Severity::Error,
                    format!("Model switch failed: {}", outcome.message),
                )]
            }
            Err(e) => {
                self.phase = PickerPhase::Loaded;
                tracing::warn!("model switch request failed: {e}");
                vec![PickerCmd::Notify(
                    Severity::Error,
                    "Model switch request failed".into(),
                )]
            }
        }
    }

    /// Settle delay elapsed after a confirmed switch: reload the catalog.
    pub fn settle_elapsed(&mut self) -> Vec<PickerCmd> {
        self.start()
    }

    /// The catalog entry the server reports as active, if any.
    pub fn current_entry(&self) -> Option<&ModelEntry> {
        let version = self.current.as_deref()?;
        self.models.iter().find(|m| m.version == version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(current: &str) -> ModelCatalog {
        ModelCatalog {
            models: vec![
                ModelEntry {
                    version: "v1".into(),
                    display_name: "Baseline".into(),
                    is_current: current == "v1",
                },
                ModelEntry {
                    version: "v2".into(),
                    display_name: "Two-tower".into(),
                    is_current: current == "v2",
                },
            ],
            current: Some(current.to_string()),
        }
    }

    fn loaded_picker() -> ModelPicker {
        let mut picker = ModelPicker::new();
        picker.start();
        picker.catalog_loaded(Ok(catalog("v1")));
        picker
    }

    fn notified(cmds: &[PickerCmd]) -> Vec<(Severity, &str)> {
        cmds.iter()
            .filter_map(|c| match c {
                PickerCmd::Notify(sev, msg) => Some((*sev, msg.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initialize_loads_catalog() {
        let mut picker = ModelPicker::new();
        assert_eq!(picker.start(), vec![PickerCmd::FetchCatalog]);
        assert_eq!(picker.phase, PickerPhase::Loading);

        let cmds = picker.catalog_loaded(Ok(catalog("v1")));
        assert!(cmds.is_empty());
        assert_eq!(picker.phase, PickerPhase::Loaded);
        assert_eq!(picker.current_entry().map(|m| m.version.as_str()), Some("v1"));
    }

    #[test]
    fn test_initialize_failure_degrades_to_empty_catalog() {
        let mut picker = ModelPicker::new();
        picker.start();
        let cmds = picker.catalog_loaded(Err("connection refused".into()));

        assert_eq!(picker.phase, PickerPhase::Loaded);
        assert!(picker.models.is_empty());
        let notes = notified(&cmds);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].0, Severity::Error);
    }

    #[test]
    fn test_switch_success_path() {
        let mut picker = loaded_picker();

        let cmds = picker.select("v2");
        assert_eq!(picker.phase, PickerPhase::Switching);
        assert_eq!(notified(&cmds)[0].0, Severity::Info);
        assert!(cmds.contains(&PickerCmd::SwitchModel("v2".into())));

        let cmds = picker.switch_resolved(Ok(SwitchOutcome {
            success: true,
            message: "Switched to Two-tower".into(),
            current_model: Some("v2".into()),
        }));
        assert_eq!(
            notified(&cmds),
            vec![(Severity::Success, "Switched to Two-tower")]
        );
        assert!(cmds.contains(&PickerCmd::ScheduleSettle(SETTLE_DELAY)));

        // Exactly one re-poll after the settle delay, and the reloaded
        // catalog's current flag is the server's, not a local flip.
        let cmds = picker.settle_elapsed();
        assert_eq!(
            cmds.iter()
                .filter(|c| **c == PickerCmd::FetchCatalog)
                .count(),
            1
        );
        picker.catalog_loaded(Ok(catalog("v2")));
        let entry = picker.current_entry().unwrap();
        assert_eq!(entry.version, "v2");
        assert!(entry.is_current);
    }

    #[test]
    fn test_switch_rejection_does_not_repoll() {
        let mut picker = loaded_picker();
        picker.select("v9");

        let cmds = picker.switch_resolved(Ok(SwitchOutcome {
            success: false,
            message: "unknown model version".into(),
            current_model: None,
        }));

        assert_eq!(picker.phase, PickerPhase::Loaded);
        let notes = notified(&cmds);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].0, Severity::Error);
        assert!(notes[0].1.contains("unknown model version"));
        assert!(!cmds.contains(&PickerCmd::FetchCatalog));
        assert!(!cmds
            .iter()
            .any(|c| matches!(c, PickerCmd::ScheduleSettle(_))));
    }

    #[test]
    fn test_switch_connectivity_failure_returns_to_loaded() {
        let mut picker = loaded_picker();
        picker.select("v2");

        let cmds = picker.switch_resolved(Err("timed out".into()));
        assert_eq!(picker.phase, PickerPhase::Loaded);
        assert_eq!(
            notified(&cmds),
            vec![(Severity::Error, "Model switch request failed")]
        );
        // Still selectable afterwards — the user retries by re-picking.
        assert!(!picker.select("v2").is_empty());
    }

    #[test]
    fn test_select_ignored_outside_loaded() {
        let mut picker = ModelPicker::new();
        assert!(picker.select("v1").is_empty());

        picker.start();
        assert!(picker.select("v1").is_empty());

        let mut picker = loaded_picker();
        picker.select("v2");
        // Already switching: a second pick is a no-op.
        assert!(picker.select("v1").is_empty());
    }
}
