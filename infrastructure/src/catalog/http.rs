//! HTTP catalog adapter

use askedith_application::ports::resource_catalog::{CatalogError, ResourceCatalog};
use askedith_domain::resource::{CatalogFilter, Resource};
use async_trait::async_trait;
use tracing::debug;

/// Directory service returning a JSON array of resources
///
/// `GET <base>/resources` with optional `category` / `postal_code` /
/// `radius` query parameters; the service does the filtering.
pub struct HttpCatalog {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ResourceCatalog for HttpCatalog {
    async fn fetch(&self, filter: &CatalogFilter) -> Result<Vec<Resource>, CatalogError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(category) = &filter.category {
            query.push(("category", category.as_str().to_string()));
        }
        if let Some(postal_code) = &filter.postal_code {
            query.push(("postal_code", postal_code.clone()));
        }
        if let Some(radius) = filter.radius_miles {
            query.push(("radius", radius.to_string()));
        }

        let url = format!("{}/resources", self.base_url);
        debug!("Fetching resources from {} ({} filters)", url, query.len());

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askedith_domain::resource::Category;

    #[test]
    fn base_url_is_normalized() {
        let catalog = HttpCatalog::new("https://directory.askedith.example.com/");
        assert_eq!(catalog.base_url, "https://directory.askedith.example.com");
    }

    // The adapter's contract with the wire: a plain JSON array of records.
    #[test]
    fn wire_array_deserializes_into_resources() {
        let json = r#"[
            {
                "id": 12,
                "category": "Home Care",
                "name": "Beacon Aides",
                "email": "intake@beacon.example.com",
                "postal_code": "55401",
                "latitude": 44.98,
                "longitude": -93.26
            },
            {
                "id": 13,
                "category": "Respite Care",
                "name": "Harbor Respite",
                "email": "hello@harbor.example.com"
            }
        ]"#;

        let resources: Vec<Resource> = serde_json::from_str(json).unwrap();

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].category, Category::HomeCare);
        assert_eq!(resources[0].coordinates(), Some((44.98, -93.26)));
        // Unknown categories stay as free text rather than failing.
        assert_eq!(
            resources[1].category,
            Category::Other("Respite Care".to_string())
        );
        assert!(resources[1].postal_code.is_none());
    }
}
