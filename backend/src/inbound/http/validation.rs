//! Field-level validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` error whose `details` name the
//! offending field and a stable machine-readable code.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, GeoPoint, GeoValidationError};

/// Validation error codes surfaced in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidUuid,
    InvalidCoordinate,
    InvalidEnum,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidCoordinate => "invalid_coordinate",
            Self::InvalidEnum => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names.
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

pub(crate) fn field_error(
    field: FieldName,
    code: ValidationCode,
    message: impl Into<String>,
    value: impl Into<serde_json::Value>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value.into(),
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        field_error(
            field,
            ValidationCode::InvalidUuid,
            format!("{} must be a valid UUID", field.as_str()),
            value,
        )
    })
}

/// Parse a coordinate pair, attributing failures to the offending field.
pub(crate) fn parse_geo_point(latitude: f64, longitude: f64) -> Result<GeoPoint, Error> {
    GeoPoint::new(latitude, longitude).map_err(|err| {
        let (field, value) = match err {
            GeoValidationError::LatitudeOutOfRange { value } => (FieldName::new("latitude"), value),
            GeoValidationError::LongitudeOutOfRange { value } => {
                (FieldName::new("longitude"), value)
            }
        };
        field_error(
            field,
            ValidationCode::InvalidCoordinate,
            err.to_string(),
            value.to_string(),
        )
    })
}

/// Parse a lowercase enum label through its `FromStr` implementation.
pub(crate) fn parse_label<T>(
    value: &str,
    field: FieldName,
    allowed: &'static str,
) -> Result<T, Error>
where
    T: std::str::FromStr,
{
    value.parse::<T>().map_err(|_| {
        field_error(
            field,
            ValidationCode::InvalidEnum,
            format!("{} must be one of {allowed}", field.as_str()),
            value,
        )
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::{DeliveryMethod, ErrorCode};

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error.details().and_then(|d| d.get(key)).and_then(Value::as_str)
    }

    #[rstest]
    #[case(91.0, 0.0, "latitude")]
    #[case(0.0, -200.0, "longitude")]
    fn coordinates_name_the_bad_field(
        #[case] latitude: f64,
        #[case] longitude: f64,
        #[case] field: &str,
    ) {
        let err = parse_geo_point(latitude, longitude).expect_err("out of range");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "field"), Some(field));
        assert_eq!(detail(&err, "code"), Some("invalid_coordinate"));
    }

    #[rstest]
    fn uuids_are_parsed_or_reported() {
        let err = parse_uuid("nope", FieldName::new("productId")).expect_err("bad uuid");
        assert_eq!(detail(&err, "field"), Some("productId"));
        assert_eq!(detail(&err, "value"), Some("nope"));
        assert!(parse_uuid("00000000-0000-0000-0000-000000000000", FieldName::new("id")).is_ok());
    }

    #[rstest]
    fn labels_list_allowed_values() {
        let err = parse_label::<DeliveryMethod>(
            "drone",
            FieldName::new("deliveryMethod"),
            "pickup, delivery",
        )
        .expect_err("unknown method");
        assert_eq!(err.message(), "deliveryMethod must be one of pickup, delivery");
    }
}
