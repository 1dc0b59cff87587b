use serde::{Deserialize, Serialize};

/// Fixed-point scale for cache keys: 4 decimal places, roughly a 10 m grid.
const KEY_SCALE: f64 = 10_000.0;

/// A pointer position over the map, in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSample {
    pub lat: f64,
    pub lng: f64,
}

impl CoordinateSample {
    pub fn new(lat: f64, lng: f64) -> Self {
        CoordinateSample { lat, lng }
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::from(*self)
    }
}

/// Coordinate rounded to 4 decimals, stored as integers so it can be hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    lat_e4: i64,
    lng_e4: i64,
}

impl CacheKey {
    /// Centre of the cell, as the coordinate actually sent upstream.
    pub fn sample(&self) -> CoordinateSample {
        CoordinateSample::new(self.latitude(), self.longitude())
    }

    pub fn latitude(&self) -> f64 {
        self.lat_e4 as f64 / KEY_SCALE
    }

    pub fn longitude(&self) -> f64 {
        self.lng_e4 as f64 / KEY_SCALE
    }

    /// Query-string form of both components, always with 4 decimals.
    pub fn query_pair(&self) -> (String, String) {
        (
            format!("{:.4}", self.latitude()),
            format!("{:.4}", self.longitude()),
        )
    }
}

impl From<CoordinateSample> for CacheKey {
    fn from(sample: CoordinateSample) -> Self {
        CacheKey {
            lat_e4: (sample.lat * KEY_SCALE).round() as i64,
            lng_e4: (sample.lng * KEY_SCALE).round() as i64,
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude(), self.longitude())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_key_rounds_to_four_decimals() {
        let key = CoordinateSample::new(47.1234567, 8.1234567).cache_key();
        assert_eq!(key.to_string(), "47.1235, 8.1235");
        assert_eq!(
            key.query_pair(),
            ("47.1235".to_string(), "8.1235".to_string())
        );
    }

    #[test]
    fn test_key_sample_is_cell_centre() {
        let key = CoordinateSample::new(47.1234567, 8.1234567).cache_key();
        assert_eq!(key.sample(), CoordinateSample::new(47.1235, 8.1235));
        assert_eq!(key.sample().cache_key(), key);
    }

    #[test]
    fn test_neighbouring_sample_shares_key() {
        let a = CoordinateSample::new(47.1234567, 8.1234567).cache_key();
        let b = CoordinateSample::new(47.12351, 8.12349).cache_key();
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_coordinates_round_symmetrically() {
        let key = CoordinateSample::new(-33.86785, -151.20732).cache_key();
        assert_eq!(key.to_string(), "-33.8679, -151.2073");
    }

    // Any jitter well inside a cell must land on the cell's key.
    #[test]
    fn test_random_samples_within_cell_collapse() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            let lat: f64 = rng.random_range(-85.0..85.0);
            let lng: f64 = rng.random_range(-180.0..180.0);
            let centre = CoordinateSample::new(lat, lng).cache_key();

            let jitter_lat = rng.random_range(-0.00004..0.00004);
            let jitter_lng = rng.random_range(-0.00004..0.00004);
            let nearby =
                CoordinateSample::new(centre.latitude() + jitter_lat, centre.longitude() + jitter_lng)
                    .cache_key();

            assert_eq!(centre, nearby, "lat={lat}, lng={lng}");
        }
    }
}
