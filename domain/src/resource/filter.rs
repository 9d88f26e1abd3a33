//! Catalog filtering
//!
//! Filters are by category, or by postal code plus a radius in miles.
//! Radius matching uses great-circle distance against resource coordinates;
//! resources without coordinates fall back to exact postal-code equality.

use serde::{Deserialize, Serialize};

use super::entities::{Category, Resource};

const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance between two points, in miles
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Which resources a catalog fetch should return
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_miles: Option<f64>,
    /// Caller's coordinates for radius matching, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<(f64, f64)>,
}

impl CatalogFilter {
    /// Match everything
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn near(postal_code: impl Into<String>, radius_miles: f64) -> Self {
        Self {
            postal_code: Some(postal_code.into()),
            radius_miles: Some(radius_miles),
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, latitude: f64, longitude: f64) -> Self {
        self.origin = Some((latitude, longitude));
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category.is_none() && self.postal_code.is_none() && self.radius_miles.is_none()
    }

    /// Whether a resource passes this filter
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(category) = &self.category {
            if resource.category != *category {
                return false;
            }
        }

        if self.postal_code.is_none() && self.radius_miles.is_none() {
            return true;
        }

        // Radius matching needs both an origin and resource coordinates;
        // anything missing degrades to exact postal-code equality.
        if let (Some(radius), Some((lat, lon)), Some((r_lat, r_lon))) =
            (self.radius_miles, self.origin, resource.coordinates())
        {
            return haversine_miles(lat, lon, r_lat, r_lon) <= radius;
        }

        match (&self.postal_code, &resource.postal_code) {
            (Some(wanted), Some(actual)) => wanted == actual,
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}
