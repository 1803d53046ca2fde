//! Drive the refresh settings modal without a browser.
//!
//! Run with:
//! ```sh
//! cargo run --example headless_modal
//! ```

use inkframe_refresh::{
    Document, MemoryDocument, OpenRequest, RefreshSettingsController, StoredRefresh,
    SubmitOutcome, UiEvent,
};
use serde_json::json;

#[tokio::main]
async fn main() {
    let doc = MemoryDocument::refresh_modal("refresh-settings-modal", "modal");
    let mut controller = RefreshSettingsController::new(doc, "refresh-settings-modal", "modal")
        .with_notifier(|message: &str| println!("[popup] {}", message));

    // Open with the plugin's stored setting: every 2 hours
    controller.open(Some(
        OpenRequest::new()
            .with_context(json!({"plugin_id": "weather", "instance": "Home"}))
            .with_refresh_settings(StoredRefresh::interval(7200)),
    ));
    println!("Prefilled: {:?}", controller.form_data());

    // User tabs into the time field and types a time
    controller.handle_event(&UiEvent::Focus("modal-scheduled".to_string()));
    controller.document_mut().set_value("modal-scheduled", "");

    // Empty time is rejected before the handler runs
    let outcome = controller
        .submit(|_, _| async { Ok::<(), String>(()) })
        .await;
    println!("First submit: {:?}", outcome);

    controller.document_mut().set_value("modal-scheduled", "06:30");

    // Pretend the server is down
    let outcome = controller
        .submit(|_, _| async { Err::<(), _>("network down") })
        .await;
    println!("Second submit: {:?}", outcome);

    let outcome = controller
        .submit(|form, context| async move {
            let settings = form.into_settings().map_err(|e| e.to_string())?;
            println!(
                "Saving {} for {}",
                serde_json::to_string(&settings).map_err(|e| e.to_string())?,
                context.unwrap_or_default()
            );
            Ok::<(), String>(())
        })
        .await;

    match outcome {
        SubmitOutcome::Closed => println!(
            "Saved; modal visible: {}",
            controller.document().is_visible("refresh-settings-modal")
        ),
        other => println!("Not saved: {:?}", other),
    }
}
