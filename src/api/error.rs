//! Provider wire error envelope
//!
//! Every failed request is answered with a `CloudError` body of the shape
//! `{"error":{"code":...,"message":...,"target":...}}`. The envelope is a
//! backward-compatibility contract: codes, targets, and message templates
//! are parsed by clients and must be reproduced exactly across versions.

use serde::{Deserialize, Serialize};

use crate::immutable::PropertyChange;

/// HTTP status paired with client-error envelopes
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Wire error codes emitted by the validation layer
pub mod codes {
    /// A client-issued update changed a field not declared mutable
    pub const PROPERTY_CHANGE_NOT_ALLOWED: &str = "PropertyChangeNotAllowed";

    /// A request parameter failed shape validation
    pub const INVALID_PARAMETER: &str = "InvalidParameter";

    /// The resource ID in the body disagrees with the request URL
    pub const MISMATCHING_RESOURCE_ID: &str = "MismatchingResourceID";

    /// The resource name in the body disagrees with the request URL
    pub const MISMATCHING_RESOURCE_NAME: &str = "MismatchingResourceName";

    /// The resource type in the body disagrees with the request URL
    pub const MISMATCHING_RESOURCE_TYPE: &str = "MismatchingResourceType";

    /// The request body could not be deserialized
    pub const INVALID_REQUEST_CONTENT: &str = "InvalidRequestContent";
}

/// Inner error body of the provider envelope
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CloudErrorBody {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable description
    pub message: String,

    /// External path of the field the error refers to, if any
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,
}

/// Provider error envelope as rendered on the wire
///
/// Serializes to `{"error":{...}}`; the HTTP status code travels out of band.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CloudError {
    /// Error body under the `error` key
    #[serde(rename = "error")]
    pub body: CloudErrorBody,

    /// HTTP status code to answer with (not serialized)
    #[serde(skip, default = "default_status")]
    pub status_code: u16,
}

fn default_status() -> u16 {
    STATUS_BAD_REQUEST
}

impl CloudError {
    /// Create an error envelope with the given status, code, target, and message
    pub fn new(
        status_code: u16,
        code: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            body: CloudErrorBody {
                code: code.into(),
                message: message.into(),
                target: target.into(),
            },
            status_code,
        }
    }

    /// 400 `InvalidParameter` for a request-shape failure
    pub fn invalid_parameter(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            STATUS_BAD_REQUEST,
            codes::INVALID_PARAMETER,
            target,
            message,
        )
    }

    /// 400 `PropertyChangeNotAllowed` for a rejected immutable-field change
    ///
    /// The message template is fixed; only the target path varies. Call
    /// sites must never alter the target string, since clients parse it to
    /// locate the offending field.
    pub fn property_change_not_allowed(target: impl Into<String>) -> Self {
        let target = target.into();
        let message = format!("Changing property '{target}' is not allowed.");
        Self::new(
            STATUS_BAD_REQUEST,
            codes::PROPERTY_CHANGE_NOT_ALLOWED,
            target,
            message,
        )
    }

    /// 400 `InvalidRequestContent` for an undeserializable request body
    pub fn invalid_request_content(message: impl Into<String>) -> Self {
        Self::new(
            STATUS_BAD_REQUEST,
            codes::INVALID_REQUEST_CONTENT,
            "",
            message,
        )
    }

    /// 400 `MismatchingResourceID` for a body/URL resource ID disagreement
    pub fn mismatching_resource_id(body_id: &str, url_id: &str) -> Self {
        Self::new(
            STATUS_BAD_REQUEST,
            codes::MISMATCHING_RESOURCE_ID,
            "id",
            format!("The provided resource ID '{body_id}' did not match the name in the Url '{url_id}'."),
        )
    }

    /// 400 `MismatchingResourceName` for a body/URL resource name disagreement
    pub fn mismatching_resource_name(body_name: &str, url_name: &str) -> Self {
        Self::new(
            STATUS_BAD_REQUEST,
            codes::MISMATCHING_RESOURCE_NAME,
            "name",
            format!("The provided resource name '{body_name}' did not match the name in the Url '{url_name}'."),
        )
    }

    /// 400 `MismatchingResourceType` for a body/URL resource type disagreement
    pub fn mismatching_resource_type(body_type: &str, url_type: &str) -> Self {
        Self::new(
            STATUS_BAD_REQUEST,
            codes::MISMATCHING_RESOURCE_TYPE,
            "type",
            format!("The provided resource type '{body_type}' did not match the type in the Url '{url_type}'."),
        )
    }
}

impl std::fmt::Display for CloudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}: {}: {}",
            self.status_code, self.body.code, self.body.target, self.body.message
        )
    }
}

impl std::error::Error for CloudError {}

impl From<PropertyChange> for CloudError {
    fn from(change: PropertyChange) -> Self {
        Self::property_change_not_allowed(change.target)
    }
}

impl From<crate::Error> for CloudError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::Validation(msg) => Self::invalid_parameter("", msg),
            crate::Error::Serialization(msg) => Self::invalid_request_content(msg),
        }
    }
}
