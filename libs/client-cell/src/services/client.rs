use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{Client, ClientError, CreateClientRequest};

pub struct ClientService {
    store: StoreClient,
}

impl ClientService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, ClientError> {
        debug!("Listing clients");

        let result = self
            .store
            .select("/rest/v1/clients?order=created_at.asc")
            .await
            .map_err(|e| ClientError::DatabaseError(e.to_string()))?;

        let clients: Vec<Client> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Client>, _>>()
            .map_err(|e| ClientError::DatabaseError(e.to_string()))?;

        Ok(clients)
    }

    pub async fn create_client(&self, request: CreateClientRequest) -> Result<Client, ClientError> {
        debug!("Creating client: {}", request.name);

        let client_data = json!({
            "name": request.name
        });

        let result = self
            .store
            .insert_returning("/rest/v1/clients", client_data)
            .await
            .map_err(|e| ClientError::DatabaseError(e.to_string()))?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::DatabaseError("Failed to create client".to_string()))?;

        serde_json::from_value(row).map_err(|e| ClientError::DatabaseError(e.to_string()))
    }

    pub async fn get_client(&self, client_id: Uuid) -> Result<Client, ClientError> {
        debug!("Fetching client: {}", client_id);

        let path = format!("/rest/v1/clients?id=eq.{}", client_id);
        let result = self
            .store
            .select(&path)
            .await
            .map_err(|e| ClientError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or(ClientError::NotFound)?;

        serde_json::from_value(row).map_err(|e| ClientError::DatabaseError(e.to_string()))
    }
}
