//! Thin clients for each publishing target.

pub mod html;
pub mod instagram;
pub mod note;
pub mod threads;
pub mod twitter;

pub use html::{render_page, sanitize_filename};
pub use instagram::InstagramClient;
pub use note::NoteClient;
pub use threads::ThreadsClient;
pub use twitter::TwitterClient;

use serde_json::Value;
use tracing::warn;

use crate::common::Platform;
use crate::domains::publishing::error::PublishError;

/// Send a request and read a JSON body, mapping failures to `PublishError`.
pub(crate) async fn send_json(
    platform: Platform,
    request: reqwest::RequestBuilder,
) -> Result<Value, PublishError> {
    let response = request.send().await.map_err(|e| {
        warn!(platform = %platform, error = %e, "Publish request failed");
        PublishError::Network {
            platform,
            message: e.to_string(),
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(platform = %platform, status = %status, error = %body, "Publish API error");
        return Err(PublishError::Api {
            platform,
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    response.json().await.map_err(|e| PublishError::Parse {
        platform,
        message: e.to_string(),
    })
}

/// Graph API (`error.message`), Twitter (`detail`), or the raw body.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    json.pointer("/error/message")
        .or_else(|| json.get("detail"))
        .or_else(|| json.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

/// Read an id that may be a string or a number.
pub(crate) fn id_at(value: &Value, pointer: &str) -> Option<String> {
    match value.pointer(pointer)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn require_id(
    platform: Platform,
    value: &Value,
    pointer: &str,
) -> Result<String, PublishError> {
    id_at(value, pointer).ok_or_else(|| PublishError::Parse {
        platform,
        message: format!("response has no id at {}", pointer),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_prefers_structured_fields() {
        assert_eq!(
            error_message(r#"{"error": {"message": "Invalid OAuth access token", "code": 190}}"#),
            "Invalid OAuth access token"
        );
        assert_eq!(
            error_message(r#"{"title": "Unauthorized", "detail": "Unauthorized"}"#),
            "Unauthorized"
        );
        assert_eq!(error_message("upstream down"), "upstream down");
    }

    #[test]
    fn ids_may_be_numbers_or_strings() {
        let value = json!({"id": "1789", "data": {"id": 42}});
        assert_eq!(id_at(&value, "/id").as_deref(), Some("1789"));
        assert_eq!(id_at(&value, "/data/id").as_deref(), Some("42"));
        assert!(id_at(&value, "/missing").is_none());
        assert!(require_id(Platform::Thread, &value, "/nope").is_err());
    }
}
