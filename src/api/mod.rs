//! Versioned external API surface
//!
//! Each module under here is one independently-evolving wire version of the
//! provider's external API. A version owns its resource types, its per-field
//! mutability tables, and its static validator; versions never share type
//! definitions, so a field can change shape or mutability between versions
//! without affecting the others.
//!
//! - [`v20231122`] - GA cluster API
//! - [`v20240812preview`] - preview API: clusters with workload identity,
//!   OpenShift versions, maintenance resources (MIMO), and platform workload
//!   identity role sets
//! - [`admin`] - administrative PATCH surface with the wider admin
//!   mutability table
//!
//! All static validators follow the same composed contract: validate the
//! request shape on the desired resource alone, then - only when a persisted
//! current document exists - run the immutable-field engine and translate
//! the first violation into the provider's [`error::CloudError`] envelope.

pub mod admin;
pub mod error;
pub mod v20231122;
pub mod v20240812preview;

pub use error::{CloudError, CloudErrorBody};

/// Deserialize a JSON request body into a versioned external type
///
/// The message wraps serde's diagnostic so clients see which field failed
/// to parse; converting the error into a [`CloudError`] yields the 400
/// `InvalidRequestContent` envelope.
pub fn read_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> crate::Result<T> {
    serde_json::from_slice(body).map_err(|err| {
        crate::Error::serialization(format!(
            "The request content was invalid and could not be deserialized: {err}"
        ))
    })
}

/// Resolve an `api-version` query value to a supported wire version
///
/// Frontends call this before reading the body to pick the versioned module
/// a request routes to; converting the error into a [`CloudError`] yields a
/// 400 for versions this provider does not serve.
pub fn resolve_api_version(version: &str) -> crate::Result<&'static str> {
    match version {
        v20231122::API_VERSION => Ok(v20231122::API_VERSION),
        v20240812preview::API_VERSION => Ok(v20240812preview::API_VERSION),
        _ => Err(crate::Error::validation(format!(
            "unknown api version '{version}'"
        ))),
    }
}

/// ARM-style case-insensitive identifier comparison
///
/// Resource IDs, names, and types are normalized by the frontend but may
/// reach the body in any casing the client chose.
pub(crate) fn ids_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Check body ID/name/type against the request URL-derived values
///
/// Empty body fields are allowed: clients commonly omit them on PUT and the
/// frontend fills them in from the URL after validation.
pub(crate) fn validate_resource_identity(
    body_id: &str,
    body_name: &str,
    body_type: &str,
    url_id: &str,
    url_name: &str,
    url_type: &str,
) -> Result<(), CloudError> {
    if !body_id.is_empty() && !ids_match(body_id, url_id) {
        return Err(CloudError::mismatching_resource_id(body_id, url_id));
    }
    if !body_name.is_empty() && !ids_match(body_name, url_name) {
        return Err(CloudError::mismatching_resource_name(body_name, url_name));
    }
    if !body_type.is_empty() && !ids_match(body_type, url_type) {
        return Err(CloudError::mismatching_resource_type(body_type, url_type));
    }
    Ok(())
}
