//! Geographic value objects and great-circle distance.
//!
//! Coordinates are validated on construction and never clamped. Distances are
//! computed with the haversine formula over a spherical Earth of mean radius
//! [`EARTH_RADIUS_METERS`].

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for all distance computations.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Validation errors raised when constructing a [`GeoPoint`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeoValidationError {
    /// Latitude was outside `[-90, 90]` or not finite.
    #[error("latitude must be a finite value between -90 and 90, got {value}")]
    LatitudeOutOfRange { value: f64 },
    /// Longitude was outside `[-180, 180]` or not finite.
    #[error("longitude must be a finite value between -180 and 180, got {value}")]
    LongitudeOutOfRange { value: f64 },
}

/// Immutable WGS84 coordinate pair in decimal degrees.
///
/// # Examples
/// ```
/// use backend::domain::GeoPoint;
///
/// let tashkent = GeoPoint::new(41.2995, 69.2401)?;
/// assert_eq!(tashkent.latitude(), 41.2995);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// # Ok::<(), backend::domain::GeoValidationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoPointDto", into = "GeoPointDto")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validate and construct a point.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoValidationError::LatitudeOutOfRange { value: latitude });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoValidationError::LongitudeOutOfRange { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance_meters(*self, *other)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct GeoPointDto {
    latitude: f64,
    longitude: f64,
}

impl From<GeoPoint> for GeoPointDto {
    fn from(value: GeoPoint) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl TryFrom<GeoPointDto> for GeoPoint {
    type Error = GeoValidationError;

    fn try_from(value: GeoPointDto) -> Result<Self, Self::Error> {
        Self::new(value.latitude, value.longitude)
    }
}

/// Haversine distance between two points in meters.
///
/// Symmetric, zero for identical points, and free of NaN for antipodal or
/// nearly coincident inputs: the haversine term is clamped to `[0, 1]` before
/// the inverse sine.
///
/// # Examples
/// ```
/// use backend::domain::{GeoPoint, distance_meters};
///
/// let a = GeoPoint::new(41.0, 69.0)?;
/// let b = GeoPoint::new(41.01, 69.01)?;
/// let d = distance_meters(a, b);
/// assert!(d > 1_300.0 && d < 1_450.0);
/// assert_eq!(distance_meters(a, a), 0.0);
/// # Ok::<(), backend::domain::GeoValidationError>(())
/// ```
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let central_angle = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_METERS * central_angle
}

#[cfg(test)]
mod tests {
    //! Distance properties and coordinate validation.

    use rstest::rstest;

    use super::*;

    const EPSILON_METERS: f64 = 1e-3;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude).expect("fixture coordinates are valid")
    }

    fn sample_points() -> Vec<GeoPoint> {
        vec![
            point(41.0, 69.0),
            point(41.01, 69.01),
            point(41.2995, 69.2401),
            point(-33.8688, 151.2093),
            point(51.5074, -0.1278),
            point(90.0, 0.0),
            point(-90.0, 180.0),
            point(0.0, -180.0),
            point(0.0, 180.0),
            point(12.5, -45.25),
        ]
    }

    #[rstest]
    #[case(90.5, 0.0)]
    #[case(-90.5, 0.0)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    fn rejects_invalid_latitude(#[case] latitude: f64, #[case] longitude: f64) {
        let err = GeoPoint::new(latitude, longitude).expect_err("latitude out of range");
        assert!(matches!(err, GeoValidationError::LatitudeOutOfRange { .. }));
    }

    #[rstest]
    #[case(0.0, 180.1)]
    #[case(0.0, -181.0)]
    #[case(0.0, f64::NAN)]
    fn rejects_invalid_longitude(#[case] latitude: f64, #[case] longitude: f64) {
        let err = GeoPoint::new(latitude, longitude).expect_err("longitude out of range");
        assert!(matches!(err, GeoValidationError::LongitudeOutOfRange { .. }));
    }

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    fn accepts_boundary_values(#[case] latitude: f64, #[case] longitude: f64) {
        assert!(GeoPoint::new(latitude, longitude).is_ok());
    }

    #[rstest]
    fn distance_is_symmetric() {
        let points = sample_points();
        for a in &points {
            for b in &points {
                assert_eq!(distance_meters(*a, *b), distance_meters(*b, *a));
            }
        }
    }

    #[rstest]
    fn distance_to_self_is_zero() {
        for a in sample_points() {
            assert_eq!(distance_meters(a, a), 0.0);
        }
    }

    #[rstest]
    fn distance_satisfies_triangle_inequality() {
        let points = sample_points();
        for a in &points {
            for b in &points {
                for c in &points {
                    let direct = distance_meters(*a, *c);
                    let via = distance_meters(*a, *b) + distance_meters(*b, *c);
                    assert!(
                        direct <= via + EPSILON_METERS,
                        "triangle inequality violated: {direct} > {via}"
                    );
                }
            }
        }
    }

    #[rstest]
    fn antipodal_points_yield_half_circumference() {
        let d = distance_meters(point(0.0, 0.0), point(0.0, 180.0));
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!(d.is_finite());
        assert!((d - half_circumference).abs() < 1.0);
    }

    #[rstest]
    fn nearly_identical_points_are_finite_and_small() {
        let d = distance_meters(point(41.0, 69.0), point(41.000_000_001, 69.000_000_001));
        assert!(d.is_finite());
        assert!(d < 0.001);
    }

    #[rstest]
    fn known_city_pair_is_close_to_reference() {
        // London to Paris is roughly 343.5 km on the haversine sphere.
        let d = distance_meters(point(51.5074, -0.1278), point(48.8566, 2.3522));
        assert!((d - 343_500.0).abs() < 1_500.0, "unexpected distance {d}");
    }

    #[rstest]
    fn serde_rejects_out_of_range_payloads() {
        let result = serde_json::from_str::<GeoPoint>(r#"{"latitude": 100.0, "longitude": 0.0}"#);
        assert!(result.is_err());
    }
}
