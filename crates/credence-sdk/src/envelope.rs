//! Response envelope shared by every API endpoint.

use crate::error::SdkError;
use serde::Deserialize;

/// `{ success, data?, error? }` wrapper around every payload
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Fail unless the server reported success
    pub fn check(self) -> Result<Self, SdkError> {
        if self.success {
            Ok(self)
        } else {
            Err(SdkError::Api(
                self.error
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            ))
        }
    }

    /// Unwrap the payload of a successful response
    pub fn into_data(self) -> Result<T, SdkError> {
        self.check()?
            .data
            .ok_or_else(|| SdkError::Api("Response carried no data".to_string()))
    }
}

/// Loose view of a 2xx body whose payload is ignored
#[derive(Debug, Deserialize)]
struct Ack {
    success: Option<bool>,
    error: Option<String>,
}

/// Accept a 2xx body unless it explicitly reports `success: false`
///
/// Empty bodies, non-JSON bodies and bodies without a `success` field all
/// count as success.
pub(crate) fn acknowledge(body: &str) -> Result<(), SdkError> {
    match serde_json::from_str::<Ack>(body) {
        Ok(Ack {
            success: Some(false),
            error,
        }) => Err(SdkError::Api(
            error.unwrap_or_else(|| "Request was not successful".to_string()),
        )),
        _ => Ok(()),
    }
}

/// Best-effort error text for a non-2xx body
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        Ok(Envelope {
            error: Some(error), ..
        }) => error,
        _ if body.trim().is_empty() => "Unknown error".to_string(),
        _ => body.to_string(),
    }
}
