use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical place users can save, post about, or review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub google_place_id: Option<String>,
}

impl Location {
    #[must_use]
    pub fn new(
        id: Uuid,
        name: String,
        latitude: f64,
        longitude: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self { id, name, address: None, latitude, longitude, created_at, google_place_id: None }
    }

    /// Bounding-box proximity: both axis deltas strictly below `threshold_deg`.
    ///
    /// NaN coordinates never match.
    #[must_use]
    pub fn is_near(&self, other: &Self, threshold_deg: f64) -> bool {
        (self.latitude - other.latitude).abs() < threshold_deg
            && (self.longitude - other.longitude).abs() < threshold_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lng: f64) -> Location {
        Location::new(Uuid::new_v4(), "Cafe".to_owned(), lat, lng, Utc::now())
    }

    #[test]
    fn near_is_symmetric() {
        let a = at(59.9139, 10.7522);
        let b = at(59.91395, 10.75215);
        assert!(a.is_near(&b, 0.0001));
        assert!(b.is_near(&a, 0.0001));
    }

    #[test]
    fn longitude_alone_can_separate() {
        let a = at(10.0, 20.0);
        let b = at(10.0, 20.0002);
        assert!(!a.is_near(&b, 0.0001));
    }

    #[test]
    fn nan_never_matches() {
        let a = at(f64::NAN, 0.0);
        let b = at(f64::NAN, 0.0);
        assert!(!a.is_near(&b, 0.0001));
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{
            "id": "6f1c1f0e-3a5b-4d8e-9a51-1f1f1f1f1f1f",
            "name": "Bakery",
            "latitude": 1.5,
            "longitude": 2.5,
            "created_at": "2024-03-01T10:00:00Z"
        }"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.name, "Bakery");
        assert!(loc.address.is_none());
        assert!(loc.google_place_id.is_none());
    }
}
