//! Modal binding configuration.
//!
//! Pages with several refresh modals (plugin settings, playlist entries,
//! ...) can describe their bindings in YAML instead of hard-coding ids.
//!
//! # Example Config (YAML)
//!
//! ```yaml
//! modals:
//!   - modal_id: "refresh-settings-modal"
//!     prefix: "modal"
//!
//!   - modal_id: "edit-playlist-modal"
//!     prefix: "edit"
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use inkframe_refresh::config::ControllerConfig;
//!
//! let config = ControllerConfig::load("config/modals.yaml")?;
//! let binding = config.binding("edit-playlist-modal").unwrap();
//! let controller = binding.controller(document);
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::controller::RefreshSettingsController;
use crate::dom::Document;
use crate::Error;

/// Where one refresh modal lives in the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModalBinding {
    /// Id of the modal container
    pub modal_id: String,
    /// Prefix of the modal's control ids
    pub prefix: String,
}

impl ModalBinding {
    /// Create a binding.
    pub fn new(modal_id: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            modal_id: modal_id.into(),
            prefix: prefix.into(),
        }
    }

    /// Build a controller for this binding over `document`.
    pub fn controller<D: Document>(&self, document: D) -> RefreshSettingsController<D> {
        RefreshSettingsController::new(document, self.modal_id.as_str(), &self.prefix)
    }
}

/// All modal bindings for a page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControllerConfig {
    /// Modal bindings, in page order
    #[serde(default)]
    pub modals: Vec<ModalBinding>,
}

impl ControllerConfig {
    /// Load bindings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read modal config '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse bindings from a YAML string.
    ///
    /// Rejects bindings with an empty id or prefix.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(format!("Invalid modal config YAML: {}", e)))?;

        if let Some(bad) = config
            .modals
            .iter()
            .find(|m| m.modal_id.trim().is_empty() || m.prefix.trim().is_empty())
        {
            return Err(Error::Config(format!(
                "Modal binding needs both modal_id and prefix: {:?}",
                bad
            )));
        }

        tracing::debug!("Loaded {} refresh modal bindings", config.modals.len());
        Ok(config)
    }

    /// Find the binding for a modal id.
    pub fn binding(&self, modal_id: &str) -> Option<&ModalBinding> {
        self.modals.iter().find(|m| m.modal_id == modal_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
modals:
  - modal_id: "refresh-settings-modal"
    prefix: "modal"
  - modal_id: "edit-modal"
    prefix: "edit"
"#;
        let config = ControllerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.modals.len(), 2);
        assert_eq!(
            config.binding("edit-modal"),
            Some(&ModalBinding::new("edit-modal", "edit"))
        );
        assert_eq!(config.binding("missing"), None);
    }

    #[test]
    fn test_empty_config() {
        let config = ControllerConfig::from_yaml("{}").unwrap();
        assert!(config.modals.is_empty());
    }

    #[test]
    fn test_rejects_blank_prefix() {
        let yaml = r#"
modals:
  - modal_id: "edit-modal"
    prefix: ""
"#;
        assert!(matches!(
            ControllerConfig::from_yaml(yaml),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ControllerConfig::from_yaml("modals: [").unwrap_err();
        assert!(err.to_string().contains("Invalid modal config YAML"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ControllerConfig::load("/nonexistent/modals.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/modals.yaml"));
    }

    #[test]
    fn test_binding_controller() {
        let binding = ModalBinding::new("edit-modal", "edit");
        let doc = MemoryDocument::refresh_modal("edit-modal", "edit");
        let controller = binding.controller(doc);
        assert!(controller.is_initialized());
        assert_eq!(controller.fields().unit_select, "edit-unit");
    }
}
