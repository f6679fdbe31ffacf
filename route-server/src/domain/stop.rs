//! Bus stop types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Opaque identifier of a bus stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(pub u32);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated WGS84 coordinate.
///
/// # Examples
///
/// ```
/// use route_server::domain::Coordinate;
///
/// let sule = Coordinate::new(16.7745, 96.1588).unwrap();
/// assert_eq!(sule.latitude(), 16.7745);
///
/// // Out of range is rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(DomainError::CoordinateOutOfRange {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build an optional coordinate from a pair of optional parts.
    ///
    /// Both parts present gives `Some`, both absent gives `None`, and a
    /// single present part is an error.
    pub fn from_parts(
        stop: StopId,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, DomainError> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).map(Some),
            (None, None) => Ok(None),
            _ => Err(DomainError::PartialCoordinate(stop)),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A bus stop with bilingual (English/Myanmar) names.
///
/// The road qualifier distinguishes stops that share a name. `None` and
/// `Some("")` are kept apart: both count as "no road" when resolving
/// names, but they are different stored values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub id: StopId,
    pub name_en: String,
    pub name_mm: String,
    pub road_en: Option<String>,
    pub road_mm: Option<String>,
    pub coordinate: Option<Coordinate>,
}

impl Stop {
    /// Create a stop with names only.
    pub fn new(id: StopId, name_en: impl Into<String>, name_mm: impl Into<String>) -> Self {
        Self {
            id,
            name_en: name_en.into(),
            name_mm: name_mm.into(),
            road_en: None,
            road_mm: None,
            coordinate: None,
        }
    }

    /// Set the road qualifiers.
    pub fn with_road(mut self, road_en: impl Into<String>, road_mm: impl Into<String>) -> Self {
        self.road_en = Some(road_en.into());
        self.road_mm = Some(road_mm.into());
        self
    }

    /// Set the coordinate.
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    /// The English display name, e.g. "Sule (Maha Bandula Road)".
    ///
    /// This is the same form accepted by `StopQuery::parse`.
    pub fn display_name(&self) -> String {
        match self.road_en.as_deref() {
            Some(road) if !road.is_empty() => format!("{} ({})", self.name_en, road),
            _ => self.name_en.clone(),
        }
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
