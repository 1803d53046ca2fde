//! Refresh settings modal controller.
//!
//! The modal offers two mutually exclusive ways to refresh a plugin:
//! every N minutes/hours/days, or once a day at a fixed time. The controller
//! keeps the two radio groups consistent with what the user is editing,
//! prefills the form from stored settings, validates it, and hands the
//! result to a caller-supplied async handler.
//!
//! # Element ids
//!
//! For a prefix `p` the controller expects these elements inside the modal:
//!
//! | Id | Element |
//! |----|---------|
//! | `p-refresh-interval` | interval radio |
//! | `p-refresh-scheduled` | scheduled radio |
//! | `p-interval` | interval value input |
//! | `p-unit` | interval unit select |
//! | `p-scheduled` | scheduled time input |
//! | `p-group-interval` | interval group container |
//! | `p-group-scheduled` | scheduled group container |
//!
//! # Example
//!
//! ```
//! use inkframe_refresh::{
//!     MemoryDocument, OpenRequest, RefreshSettingsController, StoredRefresh, SubmitOutcome,
//! };
//!
//! let doc = MemoryDocument::refresh_modal("edit-modal", "edit");
//! let mut controller = RefreshSettingsController::new(doc, "edit-modal", "edit");
//!
//! controller.open(Some(OpenRequest::new().with_refresh_settings(StoredRefresh::interval(7200))));
//! assert!(controller.is_open());
//!
//! let pending = controller.begin_submit().unwrap();
//! assert_eq!(pending.form_data.interval, Some(2));
//!
//! let outcome = controller.finish_submit(Ok::<(), String>(()));
//! assert!(matches!(outcome, SubmitOutcome::Closed));
//! assert!(!controller.is_open());
//! ```

use std::fmt;
use std::future::Future;

use serde_json::Value;

use crate::dom::{Document, ElementKind};
use crate::error::Error;
use crate::notify::{error_message, Notifier};
use crate::settings::{seconds_to_unit, FormData, RefreshSettings, RefreshType, StoredRefresh};

/// Ids of the controls the controller drives, derived from a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIds {
    /// Interval radio
    pub interval_radio: String,
    /// Scheduled radio
    pub scheduled_radio: String,
    /// Interval value input
    pub interval_input: String,
    /// Scheduled time input
    pub scheduled_input: String,
    /// Interval unit select
    pub unit_select: String,
    /// Interval group container
    pub interval_group: String,
    /// Scheduled group container
    pub scheduled_group: String,
}

impl FieldIds {
    /// Derive ids as `{prefix}-{suffix}`.
    pub fn new(prefix: &str) -> Self {
        let id = |suffix: &str| format!("{}-{}", prefix, suffix);
        Self {
            interval_radio: id("refresh-interval"),
            scheduled_radio: id("refresh-scheduled"),
            interval_input: id("interval"),
            scheduled_input: id("scheduled"),
            unit_select: id("unit"),
            interval_group: id("group-interval"),
            scheduled_group: id("group-scheduled"),
        }
    }

    fn all(&self) -> [&str; 7] {
        [
            &self.interval_radio,
            &self.scheduled_radio,
            &self.interval_input,
            &self.scheduled_input,
            &self.unit_select,
            &self.interval_group,
            &self.scheduled_group,
        ]
    }

    fn radio(&self, refresh_type: RefreshType) -> &str {
        match refresh_type {
            RefreshType::Interval => &self.interval_radio,
            RefreshType::Scheduled => &self.scheduled_radio,
        }
    }

    fn primary_field(&self, refresh_type: RefreshType) -> &str {
        match refresh_type {
            RefreshType::Interval => &self.interval_input,
            RefreshType::Scheduled => &self.scheduled_input,
        }
    }

    fn group(&self, refresh_type: RefreshType) -> &str {
        match refresh_type {
            RefreshType::Interval => &self.interval_group,
            RefreshType::Scheduled => &self.scheduled_group,
        }
    }
}

/// A user interaction routed to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Click on the element with this id
    Click(String),
    /// Focus moved to the element with this id
    Focus(String),
}

/// Arguments to [`RefreshSettingsController::open`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenRequest {
    /// Caller context, handed back to the submit handler untouched
    pub context: Option<Value>,
    /// Settings to prefill the form with
    pub refresh_settings: Option<StoredRefresh>,
}

impl OpenRequest {
    /// Empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the caller context.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the settings to prefill.
    #[must_use]
    pub fn with_refresh_settings(mut self, settings: impl Into<StoredRefresh>) -> Self {
        self.refresh_settings = Some(settings.into());
        self
    }

    /// Build a request from a page's JSON open payload.
    ///
    /// The `refreshSettings` key, if present, is read as the prefill. The
    /// whole payload becomes the caller context.
    ///
    /// # Example
    ///
    /// ```
    /// use inkframe_refresh::{OpenRequest, StoredRefresh};
    /// use serde_json::json;
    ///
    /// let request = OpenRequest::from_value(json!({
    ///     "pluginId": "clock",
    ///     "refreshSettings": {"scheduled": "08:00"}
    /// }))
    /// .unwrap();
    /// assert_eq!(request.refresh_settings, Some(StoredRefresh::scheduled("08:00")));
    /// ```
    pub fn from_value(data: Value) -> Result<Self, Error> {
        let refresh_settings = match data.get("refreshSettings") {
            None | Some(Value::Null) => None,
            Some(settings) => Some(serde_json::from_value(settings.clone())?),
        };
        Ok(Self {
            context: Some(data),
            refresh_settings,
        })
    }
}

impl From<RefreshSettings> for OpenRequest {
    fn from(settings: RefreshSettings) -> Self {
        Self::new().with_refresh_settings(settings)
    }
}

/// A validated submit waiting on its handler.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmit {
    /// Validated form payload
    pub form_data: FormData,
    /// Context from the last `open`
    pub context: Option<Value>,
}

/// How a submit ended.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Handler succeeded and the modal was closed
    Closed,
    /// Submit never reached the handler
    Rejected(Error),
    /// Handler failed with this message; the modal stays open
    Failed(String),
}

/// Controller for one refresh settings modal.
///
/// Owns its document and all per-modal state. If the modal or any of its
/// controls is missing at construction the controller logs the problem and
/// ignores every later call.
pub struct RefreshSettingsController<D> {
    document: D,
    modal_id: String,
    fields: FieldIds,
    initialized: bool,
    notifier: Option<Box<dyn Notifier>>,
    current_data: Option<Value>,
    submitting: bool,
}

impl<D: fmt::Debug> fmt::Debug for RefreshSettingsController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshSettingsController")
            .field("document", &self.document)
            .field("modal_id", &self.modal_id)
            .field("fields", &self.fields)
            .field("initialized", &self.initialized)
            .field("notifier", &self.notifier.is_some())
            .field("current_data", &self.current_data)
            .field("submitting", &self.submitting)
            .finish()
    }
}

impl<D: Document> RefreshSettingsController<D> {
    /// Bind a controller to `modal_id` with controls named `{prefix}-...`.
    ///
    /// Never fails: an unresolvable modal leaves the controller inert.
    pub fn new(document: D, modal_id: impl Into<String>, prefix: &str) -> Self {
        let modal_id = modal_id.into();
        let fields = FieldIds::new(prefix);
        let initialized = match resolve(&document, &modal_id, &fields) {
            Ok(()) => {
                tracing::debug!("Refresh settings controller bound to '{}'", modal_id);
                true
            }
            Err(e) => {
                tracing::error!("Refresh settings modal '{}' unavailable: {}", modal_id, e);
                false
            }
        };

        Self {
            document,
            modal_id,
            fields,
            initialized,
            notifier: None,
            current_data: None,
            submitting: false,
        }
    }

    /// Like [`new`](Self::new), but returns the resolution error.
    pub fn try_new(document: D, modal_id: impl Into<String>, prefix: &str) -> Result<Self, Error> {
        let modal_id = modal_id.into();
        let fields = FieldIds::new(prefix);
        resolve(&document, &modal_id, &fields)?;
        Ok(Self {
            document,
            modal_id,
            fields,
            initialized: true,
            notifier: None,
            current_data: None,
            submitting: false,
        })
    }

    /// Use `notifier` instead of the document's alert for error messages.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Whether construction resolved every element.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the modal is currently shown.
    pub fn is_open(&self) -> bool {
        self.initialized && self.document.is_visible(&self.modal_id)
    }

    /// Whether a submit is waiting on its handler.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Resolved control ids.
    pub fn fields(&self) -> &FieldIds {
        &self.fields
    }

    /// Context from the last `open`.
    pub fn current_data(&self) -> Option<&Value> {
        self.current_data.as_ref()
    }

    /// The underlying document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access to the document, for user edits.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Route a user interaction.
    ///
    /// Returns the group the interaction selected, if any.
    pub fn handle_event(&mut self, event: &UiEvent) -> Option<RefreshType> {
        if !self.initialized {
            return None;
        }

        let selected = match event {
            UiEvent::Click(target) => self.click_target(target),
            UiEvent::Focus(target) => self.focus_target(target),
        }?;

        let focus = matches!(event, UiEvent::Click(_));
        self.select(selected, focus);
        Some(selected)
    }

    /// Group a click on `target` selects.
    fn click_target(&self, target: &str) -> Option<RefreshType> {
        [RefreshType::Interval, RefreshType::Scheduled]
            .into_iter()
            .find(|&refresh_type| {
                if target == self.fields.radio(refresh_type) {
                    return true;
                }
                // Fields handle themselves through focus
                let on_field = self
                    .document
                    .kind(target)
                    .is_some_and(|kind| kind.is_field() || kind == ElementKind::Radio);
                !on_field && self.document.contains(self.fields.group(refresh_type), target)
            })
    }

    /// Group focusing `target` selects.
    fn focus_target(&self, target: &str) -> Option<RefreshType> {
        let is_field = self.document.kind(target).is_some_and(ElementKind::is_field);
        if !is_field {
            return None;
        }
        [RefreshType::Interval, RefreshType::Scheduled]
            .into_iter()
            .find(|&refresh_type| self.document.contains(self.fields.group(refresh_type), target))
    }

    /// Check one radio, uncheck the other, optionally focus the group's field.
    pub fn select(&mut self, refresh_type: RefreshType, focus: bool) {
        if !self.initialized {
            return;
        }
        let other = match refresh_type {
            RefreshType::Interval => RefreshType::Scheduled,
            RefreshType::Scheduled => RefreshType::Interval,
        };
        self.document.set_checked(self.fields.radio(refresh_type), true);
        self.document.set_checked(self.fields.radio(other), false);
        if focus {
            self.document.focus(self.fields.primary_field(refresh_type));
        }
        tracing::debug!("Refresh type selected: {:?}", refresh_type);
    }

    /// Group whose radio is checked, if any.
    pub fn selected_type(&self) -> Option<RefreshType> {
        if self.document.is_checked(&self.fields.interval_radio) {
            Some(RefreshType::Interval)
        } else if self.document.is_checked(&self.fields.scheduled_radio) {
            Some(RefreshType::Scheduled)
        } else {
            None
        }
    }

    /// Fill the form from stored settings.
    ///
    /// Settings with neither an interval nor a time leave the form untouched.
    pub fn prepopulate(&mut self, settings: &StoredRefresh) {
        if !self.initialized {
            return;
        }
        match settings.settings() {
            Some(RefreshSettings::Interval(seconds)) => {
                let (value, unit) = seconds_to_unit(seconds);
                self.select(RefreshType::Interval, false);
                self.document
                    .set_value(&self.fields.interval_input, &value.to_string());
                self.document.set_value(&self.fields.unit_select, unit.as_str());
                tracing::debug!("Prefilled interval {}s as {} {}", seconds, value, unit);
            }
            Some(RefreshSettings::Scheduled(time)) => {
                self.select(RefreshType::Scheduled, false);
                self.document.set_value(&self.fields.scheduled_input, &time);
                tracing::debug!("Prefilled scheduled time {}", time);
            }
            None => {}
        }
    }

    /// Read the form as it stands.
    ///
    /// The checked radio decides the type, whatever else is filled in.
    pub fn form_data(&self) -> FormData {
        if !self.initialized {
            return FormData::default();
        }
        match self.selected_type() {
            Some(RefreshType::Interval) => FormData {
                refresh_type: Some(RefreshType::Interval),
                interval: self
                    .document
                    .value(&self.fields.interval_input)
                    .as_deref()
                    .and_then(parse_interval),
                unit: self
                    .document
                    .value(&self.fields.unit_select)
                    .and_then(|unit| unit.parse().ok()),
                refresh_time: None,
            },
            Some(RefreshType::Scheduled) => FormData {
                refresh_type: Some(RefreshType::Scheduled),
                refresh_time: self.document.value(&self.fields.scheduled_input),
                ..FormData::default()
            },
            None => FormData::default(),
        }
    }

    /// Show the modal, replacing the caller context and prefilling if asked.
    pub fn open(&mut self, request: Option<OpenRequest>) {
        if !self.initialized {
            return;
        }
        let request = request.unwrap_or_default();
        self.current_data = request.context;
        if let Some(settings) = &request.refresh_settings {
            self.prepopulate(settings);
        }
        self.document.set_visible(&self.modal_id, true);
        tracing::info!("Opened refresh settings modal '{}'", self.modal_id);
    }

    /// Hide the modal. Field values are kept.
    pub fn close(&mut self) {
        if !self.initialized {
            return;
        }
        self.document.set_visible(&self.modal_id, false);
        tracing::debug!("Closed refresh settings modal '{}'", self.modal_id);
    }

    /// Validate the form and mark a submit as in flight.
    ///
    /// Validation failures are shown to the user before being returned.
    /// Only one submit may be in flight; a second call is rejected until
    /// [`finish_submit`](Self::finish_submit) runs.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit, Error> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        if self.submitting {
            tracing::warn!(
                "Ignoring submit for '{}': previous submit still pending",
                self.modal_id
            );
            return Err(Error::SubmitInProgress);
        }

        let form_data = self.form_data();
        if let Err(e) = form_data.validate() {
            tracing::warn!("Refresh settings rejected: {}", e);
            self.notify(&error_message(&e));
            return Err(e.into());
        }

        self.submitting = true;
        Ok(PendingSubmit {
            form_data,
            context: self.current_data.clone(),
        })
    }

    /// Apply the handler's result: close on success, report on failure.
    ///
    /// Ignored unless a [`begin_submit`](Self::begin_submit) is pending.
    pub fn finish_submit<E: fmt::Display>(&mut self, result: Result<(), E>) -> SubmitOutcome {
        if !self.initialized {
            return SubmitOutcome::Rejected(Error::NotInitialized);
        }
        if !self.submitting {
            tracing::warn!(
                "Ignoring submit result for '{}': no submit pending",
                self.modal_id
            );
            return SubmitOutcome::Rejected(Error::NoSubmitPending);
        }
        self.submitting = false;
        match result {
            Ok(()) => {
                tracing::info!("Refresh settings saved for '{}'", self.modal_id);
                self.close();
                SubmitOutcome::Closed
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!("Refresh settings submit failed: {}", message);
                self.notify(&error_message(&message));
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Validate, run `handler`, and close or report.
    ///
    /// `handler` receives the form payload and the context from the last
    /// `open`. It does the actual saving and may fail with any displayable
    /// error.
    pub async fn submit<F, Fut, E>(&mut self, handler: F) -> SubmitOutcome
    where
        F: FnOnce(FormData, Option<Value>) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: fmt::Display,
    {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(e) => return SubmitOutcome::Rejected(e),
        };
        let result = handler(pending.form_data, pending.context).await;
        self.finish_submit(result)
    }

    fn notify(&mut self, message: &str) {
        match &self.notifier {
            Some(notifier) => notifier.show_response(message),
            None => self.document.alert(message),
        }
    }
}

/// Check the modal exists and every control lives inside it.
fn resolve<D: Document>(document: &D, modal_id: &str, fields: &FieldIds) -> Result<(), Error> {
    if !document.has_element(modal_id) {
        return Err(Error::MissingElement {
            id: modal_id.to_string(),
        });
    }
    for id in fields.all() {
        if !document.has_element(id) {
            return Err(Error::MissingElement { id: id.to_string() });
        }
        if !document.contains(modal_id, id) {
            return Err(Error::NotInModal {
                id: id.to_string(),
                modal_id: modal_id.to_string(),
            });
        }
    }
    Ok(())
}

/// Parse the interval input, truncating decimals like a number field would.
fn parse_interval(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    })
}
