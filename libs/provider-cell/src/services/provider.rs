use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{CreateProviderRequest, Provider, ProviderError};

pub struct ProviderService {
    store: StoreClient,
}

impl ProviderService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn list_providers(&self) -> Result<Vec<Provider>, ProviderError> {
        debug!("Listing providers");

        let result = self
            .store
            .select("/rest/v1/providers?order=created_at.asc")
            .await
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        let providers: Vec<Provider> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Provider>, _>>()
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        Ok(providers)
    }

    pub async fn create_provider(
        &self,
        request: CreateProviderRequest,
    ) -> Result<Provider, ProviderError> {
        debug!("Creating provider: {}", request.name);

        let provider_data = json!({
            "name": request.name
        });

        let result = self
            .store
            .insert_returning("/rest/v1/providers", provider_data)
            .await
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::DatabaseError("Failed to create provider".to_string()))?;

        serde_json::from_value(row).map_err(|e| ProviderError::DatabaseError(e.to_string()))
    }

    pub async fn get_provider(&self, provider_id: Uuid) -> Result<Provider, ProviderError> {
        debug!("Fetching provider: {}", provider_id);

        let path = format!("/rest/v1/providers?id=eq.{}", provider_id);
        let result = self
            .store
            .select(&path)
            .await
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or(ProviderError::NotFound)?;

        serde_json::from_value(row).map_err(|e| ProviderError::DatabaseError(e.to_string()))
    }
}
