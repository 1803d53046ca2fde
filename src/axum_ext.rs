//! Axum integration for the server side of the refresh modal.
//!
//! The modal posts its [`FormData`] as JSON. [`RefreshForm`] re-validates it
//! on the server and normalizes it into a [`RefreshSettings`], so handlers
//! only ever see a usable setting.
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::post, Json};
//! use inkframe_refresh::axum_ext::RefreshForm;
//!
//! async fn save(RefreshForm(settings): RefreshForm) -> Json<serde_json::Value> {
//!     tracing::info!("New refresh setting: {:?}", settings);
//!     Json(serde_json::json!({"success": true}))
//! }
//!
//! let app = Router::new().route("/refresh_settings", post(save));
//! ```

use axum::extract::{FromRequest, Request};
use axum::Json;
use http::StatusCode;

use crate::{FormData, RefreshSettings};

/// Extract a validated refresh setting from a JSON form body.
///
/// Rejects with `400 Bad Request` and the validation message when the
/// payload breaks a form rule, or with the JSON rejection's status when the
/// body can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshForm(pub RefreshSettings);

impl<S> FromRequest<S> for RefreshForm
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(form) = Json::<FormData>::from_request(req, state)
            .await
            .map_err(|rejection| (rejection.status(), rejection.body_text()))?;

        let settings = form.into_settings().map_err(|e| {
            tracing::debug!("Rejected refresh form: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        })?;

        Ok(RefreshForm(settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::header::CONTENT_TYPE;

    fn json_request(body: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_scheduled() {
        let req = json_request(r#"{"refreshType":"scheduled","refreshTime":"14:30"}"#);
        let RefreshForm(settings) = RefreshForm::from_request(req, &()).await.unwrap();
        assert_eq!(settings, RefreshSettings::Scheduled("14:30".to_string()));
    }

    #[tokio::test]
    async fn test_normalizes_interval() {
        let req = json_request(r#"{"refreshType":"interval","interval":3,"unit":"hour"}"#);
        let RefreshForm(settings) = RefreshForm::from_request(req, &()).await.unwrap();
        assert_eq!(settings, RefreshSettings::Interval(10800));
    }

    #[tokio::test]
    async fn test_rejects_zero_interval() {
        let req = json_request(r#"{"refreshType":"interval","interval":0,"unit":"minute"}"#);
        let (status, message) = RefreshForm::from_request(req, &()).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("interval"));
    }

    #[tokio::test]
    async fn test_rejects_missing_type() {
        let req = json_request(r#"{"refreshTime":"14:30"}"#);
        let (status, message) = RefreshForm::from_request(req, &()).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("refresh type"));
    }

    #[tokio::test]
    async fn test_rejects_non_json() {
        let req = http::Request::builder()
            .method("POST")
            .body(Body::from("refreshType=interval"))
            .unwrap();
        let (status, _) = RefreshForm::from_request(req, &()).await.unwrap_err();
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
