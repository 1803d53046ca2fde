//! # inkframe-refresh
//!
//! The refresh settings dialog for e-ink frame configuration UIs.
//!
//! Every plugin shown on the frame is regenerated on one of two schedules:
//! - **Interval**: every N minutes, hours or days
//! - **Scheduled**: once a day at a wall-clock time (`HH:MM`)
//!
//! This crate provides the controller behind the modal that edits that
//! choice:
//! - Keeps the two radio groups mutually exclusive whichever way the user
//!   gets into them (click, radio, tab focus)
//! - Prefills the form from stored settings, picking a readable unit
//! - Validates input and hands a normalized payload to your async handler
//! - Optional axum extractor that re-validates the payload server-side
//!
//! It only captures intent. Running refreshes and persisting settings are up
//! to the caller.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use inkframe_refresh::{MemoryDocument, OpenRequest, RefreshSettingsController, StoredRefresh};
//!
//! let doc = MemoryDocument::refresh_modal("refresh-settings-modal", "modal");
//! let mut controller = RefreshSettingsController::new(doc, "refresh-settings-modal", "modal");
//!
//! controller.open(Some(
//!     OpenRequest::new().with_refresh_settings(StoredRefresh::interval(3600)),
//! ));
//!
//! controller
//!     .submit(|form, context| async move {
//!         save_refresh_settings(form, context).await
//!     })
//!     .await;
//! ```
//!
//! ## Stored Format
//!
//! | Setting | JSON |
//! |---------|------|
//! | Interval | `{"interval": 3600}` (seconds) |
//! | Scheduled | `{"scheduled": "08:00"}` |
//!
//! ## Feature Flags
//!
//! - `axum` - Axum extractor for submitted refresh forms
//! - `config` - YAML modal binding configuration
//! - `full` - All features

pub mod controller;
pub mod dom;
mod error;
pub mod notify;
pub mod settings;

pub use controller::{
    FieldIds, OpenRequest, PendingSubmit, RefreshSettingsController, SubmitOutcome, UiEvent,
};
pub use dom::{Document, Element, ElementKind, MemoryDocument};
pub use error::Error;
pub use notify::Notifier;
pub use settings::{
    calculate_seconds, seconds_to_unit, FormData, RefreshSettings, RefreshType, StoredRefresh,
    TimeUnit, ValidationError, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

// Optional modules
#[cfg(feature = "config")]
pub mod config;
#[cfg(feature = "config")]
pub use config::{ControllerConfig, ModalBinding};

#[cfg(feature = "axum")]
pub mod axum_ext;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(SECONDS_PER_MINUTE, 60);
        assert_eq!(SECONDS_PER_HOUR, 3600);
        assert_eq!(SECONDS_PER_DAY, 86400);
    }

    #[test]
    fn test_stored_settings_prefill_and_normalize() {
        let stored: StoredRefresh = serde_json::from_str(r#"{"interval": 172800}"#).unwrap();
        let doc = MemoryDocument::refresh_modal("m", "p");
        let mut controller = RefreshSettingsController::new(doc, "m", "p");
        controller.open(Some(OpenRequest::new().with_refresh_settings(stored.clone())));

        let form = controller.form_data();
        assert_eq!(form, FormData::interval(2, TimeUnit::Day));
        assert_eq!(StoredRefresh::from(form.into_settings().unwrap()), stored);
    }
}
