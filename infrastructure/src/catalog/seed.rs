//! Built-in seed catalog

use askedith_application::ports::resource_catalog::{CatalogError, ResourceCatalog};
use askedith_domain::resource::{CatalogFilter, Category, Resource};
use async_trait::async_trait;

/// The fixed in-process resource list, filtered locally
///
/// Serves the default offline experience; the HTTP catalog replaces it when
/// a directory service is configured.
pub struct SeedCatalog {
    resources: Vec<Resource>,
}

impl SeedCatalog {
    pub fn new() -> Self {
        Self {
            resources: seed_resources(),
        }
    }
}

impl Default for SeedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceCatalog for SeedCatalog {
    async fn fetch(&self, filter: &CatalogFilter) -> Result<Vec<Resource>, CatalogError> {
        Ok(self
            .resources
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}

fn seed_resources() -> Vec<Resource> {
    vec![
        Resource::new(
            1,
            Category::HomeCare,
            "Sunrise Home Care",
            "intake@sunrisehomecare.example.com",
        )
        .with_company("Sunrise Home Care LLC")
        .with_address("2200 Lyndale Ave S", "Minneapolis", "MN", "55405")
        .with_phone("(612) 555-0137")
        .with_website("https://sunrisehomecare.example.com")
        .with_hours("Mon-Fri 8am-6pm")
        .with_description("In-home aides for daily living, meals, and companionship")
        .with_coordinates(44.9597, -93.2882),
        Resource::new(
            2,
            Category::AssistedLiving,
            "Maple Grove Assisted Living",
            "admissions@maplegroveliving.example.com",
        )
        .with_address("11800 Elm Creek Blvd", "Maple Grove", "MN", "55369")
        .with_phone("(763) 555-0114")
        .with_website("https://maplegroveliving.example.com")
        .with_hours("Daily 9am-5pm")
        .with_description("Private apartments with 24-hour staff and memory care wing")
        .with_coordinates(45.0724, -93.4558),
        Resource::new(
            3,
            Category::CareManagement,
            "Cedar Care Management",
            "hello@cedarcaremgmt.example.com",
        )
        .with_address("901 S 9th St", "Minneapolis", "MN", "55404")
        .with_phone("(612) 555-0190")
        .with_website("https://cedarcaremgmt.example.com")
        .with_description("Licensed care managers who coordinate providers and budgets")
        .with_coordinates(44.9712, -93.2615),
    ]
}
