//! City Registry
//!
//! The fixed set of cities the server knows about. Built once at startup and
//! only read afterwards, so it is shared across connections behind an `Arc`
//! without any locking.

/// Cities served by default, in canonical lowercase form
pub const DEFAULT_CITIES: &[&str] = &[
    "bari", "roma", "milano", "napoli", "torino", "palermo", "genova", "bologna", "firenze",
    "venezia",
];

/// Immutable, ordered set of recognized city names
#[derive(Debug, Clone)]
pub struct CityRegistry {
    /// Canonical lowercase names, in registration order
    cities: Vec<String>,
}

impl CityRegistry {
    /// Build a registry from arbitrary names
    ///
    /// Names are lowercased so lookups stay case-insensitive.
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            cities: cities
                .into_iter()
                .map(|c| c.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// True if `name` matches a registered city, ignoring case
    ///
    /// Exact match only: no trimming, no partial matches.
    pub fn lookup(&self, name: &str) -> bool {
        let candidate = name.to_lowercase();
        self.cities.iter().any(|c| *c == candidate)
    }

    /// Registered names in order
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CITIES)
    }
}
