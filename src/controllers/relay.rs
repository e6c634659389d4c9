//! Delivery of booking inquiries to the formsubmit.co AJAX relay.

use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;
use web_sys::FormData;

use crate::config;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not build form payload: {0}")]
    Payload(String),
    #[error("relay unreachable: {0}")]
    Transport(#[from] gloo_net::Error),
    #[error("relay answered with status {0}")]
    Status(u16),
}

/// Body of a relay answer. Only read for logging; the status decides success.
#[derive(Debug, Default, Deserialize)]
pub struct RelayReply {
    #[serde(default)]
    pub success: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Fixed fields sent along with every inquiry.
pub fn metadata_fields() -> [(&'static str, &'static str); 2] {
    [
        ("_subject", config::FORM_SUBJECT),
        ("_captcha", "false"),  // formsubmit would otherwise answer with a challenge page
    ]
}

pub async fn deliver(data: FormData) -> Result<RelayReply, SubmitError> {
    for (name, value) in metadata_fields() {
        data.append_with_str(name, value)
            .map_err(|err| SubmitError::Payload(format!("{:?}", err)))?;
    }

    let response = Request::post(config::get_form_endpoint())
        .header("Accept", "application/json")
        .body(data)
        .send()
        .await?;

    if !response.ok() {
        return Err(SubmitError::Status(response.status()));
    }
    Ok(response.json::<RelayReply>().await.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_disables_captcha_and_sets_subject() {
        let fields = metadata_fields();
        assert!(fields.contains(&("_captcha", "false")));
        assert!(fields.contains(&("_subject", "New Booking Inquiry — CHALYMAN")));
    }

    #[test]
    fn reads_relay_reply() {
        let reply: RelayReply = serde_json::from_str(
            r#"{"success":"true","message":"The form was submitted successfully."}"#,
        )
        .unwrap();
        assert_eq!(reply.success, Some(serde_json::json!("true")));
        assert_eq!(reply.message.as_deref(), Some("The form was submitted successfully."));
    }

    #[test]
    fn reply_fields_are_optional() {
        let reply: RelayReply = serde_json::from_str(r#"{"unexpected": 1}"#).unwrap();
        assert!(reply.success.is_none());
        assert!(reply.message.is_none());
    }

    #[test]
    fn status_error_names_the_code() {
        assert_eq!(SubmitError::Status(503).to_string(), "relay answered with status 503");
    }
}
