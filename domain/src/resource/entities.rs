//! Resource and category types

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Resource category (Value Object)
///
/// The well-known categories are first-class variants, but the storage layer
/// treats categories as free text, so anything else parses into
/// [`Category::Other`] instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    HomeCare,
    AssistedLiving,
    IndependentLiving,
    MemoryCare,
    CareManagement,
    Hospice,
    Other(String),
}

impl Category {
    /// Display name, also the stored form
    pub fn as_str(&self) -> &str {
        match self {
            Category::HomeCare => "Home Care",
            Category::AssistedLiving => "Assisted Living",
            Category::IndependentLiving => "Independent Living",
            Category::MemoryCare => "Memory Care",
            Category::CareManagement => "Care Management",
            Category::Hospice => "Hospice",
            Category::Other(s) => s,
        }
    }

    /// The known categories, in display order
    pub fn well_known() -> Vec<Category> {
        vec![
            Category::HomeCare,
            Category::AssistedLiving,
            Category::IndependentLiving,
            Category::MemoryCare,
            Category::CareManagement,
            Category::Hospice,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Accept "Home Care", "home care", and "home-care" alike.
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        Ok(match normalized.as_str() {
            "home care" => Category::HomeCare,
            "assisted living" => Category::AssistedLiving,
            "independent living" => Category::IndependentLiving,
            "memory care" => Category::MemoryCare,
            "care management" => Category::CareManagement,
            "hospice" => Category::Hospice,
            _ => Category::Other(s.trim().to_string()),
        })
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}

/// A care-provider record (Entity)
///
/// Seeded at process start or fetched from a directory; read-only for the
/// life of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u32,
    pub category: Category,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Contact email, the outreach recipient
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Human-readable hours, e.g. "Mon-Fri 8am-6pm"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Resource {
    pub fn new(
        id: u32,
        category: Category,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category,
            name: name.into(),
            company: None,
            street: None,
            city: None,
            state: None,
            postal_code: None,
            email: email.into(),
            phone: None,
            website: None,
            hours: None,
            description: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_address(
        mut self,
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        self.street = Some(street.into());
        self.city = Some(city.into());
        self.state = Some(state.into());
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_hours(mut self, hours: impl Into<String>) -> Self {
        self.hours = Some(hours.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Company name when present, otherwise the resource name
    pub fn display_name(&self) -> &str {
        self.company.as_deref().unwrap_or(&self.name)
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}
