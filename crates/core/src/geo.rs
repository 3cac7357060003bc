//! Coordinate projection seam.
//!
//! Survey coordinates arrive from devices as latitude/longitude pairs. The
//! canonical store keeps longitude/latitude in WGS84. A deployment that
//! surveys in a local datum swaps in its own [`CoordinateProjector`].

/// A canonical WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    #[error("coordinate is not a finite number")]
    NotFinite,

    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Converts device coordinates to canonical longitude/latitude.
pub trait CoordinateProjector: Send + Sync {
    fn project(&self, latitude: f64, longitude: f64) -> Result<GeoPoint, ProjectionError>;
}

/// Identity projection for devices that already report WGS84.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wgs84Projector;

impl CoordinateProjector for Wgs84Projector {
    fn project(&self, latitude: f64, longitude: f64) -> Result<GeoPoint, ProjectionError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(ProjectionError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ProjectionError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ProjectionError::LongitudeOutOfRange(longitude));
        }
        Ok(GeoPoint {
            longitude,
            latitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn passes_valid_coordinates_through() {
        let point = Wgs84Projector.project(-23.55, -46.63).unwrap();
        assert_eq!(point.latitude, -23.55);
        assert_eq!(point.longitude, -46.63);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_matches!(
            Wgs84Projector.project(123.0, 0.0),
            Err(ProjectionError::LatitudeOutOfRange(_))
        );
        assert_matches!(
            Wgs84Projector.project(0.0, -190.0),
            Err(ProjectionError::LongitudeOutOfRange(_))
        );
    }

    #[test]
    fn rejects_nan() {
        assert_matches!(
            Wgs84Projector.project(f64::NAN, 0.0),
            Err(ProjectionError::NotFinite)
        );
    }
}
