//! Fetch resources use case
//!
//! Queries the catalog and returns matches in a stable display order
//! (category, then provider name).

use crate::ports::resource_catalog::{CatalogError, ResourceCatalog};
use askedith_domain::resource::{CatalogFilter, Resource};
use std::sync::Arc;
use tracing::info;

/// Use case for looking up care resources
pub struct FetchResourcesUseCase<C: ResourceCatalog> {
    catalog: Arc<C>,
}

impl<C: ResourceCatalog> FetchResourcesUseCase<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    pub async fn execute(&self, filter: &CatalogFilter) -> Result<Vec<Resource>, CatalogError> {
        let mut resources = self.catalog.fetch(filter).await?;
        resources.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.display_name().cmp(b.display_name()))
        });
        info!("Catalog returned {} resources", resources.len());
        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askedith_domain::resource::Category;
    use async_trait::async_trait;

    struct FixedCatalog {
        resources: Vec<Resource>,
    }

    #[async_trait]
    impl ResourceCatalog for FixedCatalog {
        async fn fetch(&self, filter: &CatalogFilter) -> Result<Vec<Resource>, CatalogError> {
            Ok(self
                .resources
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect())
        }
    }

    struct BrokenCatalog;

    #[async_trait]
    impl ResourceCatalog for BrokenCatalog {
        async fn fetch(&self, _filter: &CatalogFilter) -> Result<Vec<Resource>, CatalogError> {
            Err(CatalogError::Network("connection refused".into()))
        }
    }

    fn entries() -> Vec<Resource> {
        vec![
            Resource::new(1, Category::MemoryCare, "Willow Lane", "willow@example.com"),
            Resource::new(2, Category::HomeCare, "Beacon Aides", "beacon@example.com"),
            Resource::new(3, Category::HomeCare, "Aster Care", "aster@example.com"),
        ]
    }

    #[tokio::test]
    async fn results_come_back_grouped_and_ordered() {
        let use_case = FetchResourcesUseCase::new(Arc::new(FixedCatalog {
            resources: entries(),
        }));

        let resources = use_case.execute(&CatalogFilter::all()).await.unwrap();

        let names: Vec<_> = resources.iter().map(|r| r.display_name()).collect();
        assert_eq!(names, vec!["Aster Care", "Beacon Aides", "Willow Lane"]);
    }

    #[tokio::test]
    async fn category_filter_is_forwarded() {
        let use_case = FetchResourcesUseCase::new(Arc::new(FixedCatalog {
            resources: entries(),
        }));

        let resources = use_case
            .execute(&CatalogFilter::by_category(Category::HomeCare))
            .await
            .unwrap();

        assert_eq!(resources.len(), 2);
        assert!(resources.iter().all(|r| r.category == Category::HomeCare));
    }

    #[tokio::test]
    async fn catalog_errors_propagate() {
        let use_case = FetchResourcesUseCase::new(Arc::new(BrokenCatalog));
        let err = use_case.execute(&CatalogFilter::all()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }
}
