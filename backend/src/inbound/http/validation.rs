//! Shared request-shape helpers for inbound HTTP adapters.
//!
//! Handlers only check that a request can be read at all: well-formed JSON
//! and path identifiers that parse. Business validation belongs to the
//! domain services.

use std::str::FromStr;

use actix_web::web;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Message returned when a request body is not valid JSON for the endpoint.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON in request body";

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Path segment carrying a resource identifier.
pub(crate) const ID_FIELD: FieldName = FieldName::new("id");

pub(crate) fn invalid_identifier_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
    }))
}

/// Parse a path identifier such as [`crate::domain::UserId`].
///
/// Malformed values become [`crate::domain::ErrorCode::InvalidRequest`].
pub(crate) fn parse_path_id<T: FromStr>(value: &str, field: FieldName) -> Result<T, Error> {
    T::from_str(value).map_err(|_| invalid_identifier_error(field, value))
}

/// JSON extractor configuration shared by every handler.
///
/// Unreadable bodies, wrong content types and type mismatches all map to one
/// `INVALID_REQUEST` response so clients see the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request(INVALID_JSON_MESSAGE).into()
    })
}

/// Deserialise a field where `null` and absence mean different things.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`: an
/// absent key stays `None`, an explicit `null` becomes `Some(None)`.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
