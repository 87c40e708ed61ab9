use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::analyzer::charts::CompanyData;
use crate::error::AppError;
use crate::parser::normalizer::ticket_from_api_object;
use crate::parser::pipeline::ensure_ticket_ids;
use crate::parser::types::Ticket;

/// Resposta da sonda de status (`GET /`).
#[derive(Debug, Clone, Deserialize)]
pub struct BackendStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub endpoints: HashMap<String, String>,
}

/// Resposta de `/api/update/{empresa}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub log: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Resposta de `/api/rebuild`.
#[derive(Debug, Clone, Deserialize)]
pub struct RebuildResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Cliente fino do backend de sincronização. Todos os payloads de tickets
/// chegam como JSON cru e passam pelo mesmo normalizador do import de
/// arquivos, de modo que as duas origens produzem tickets idênticos.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "GET");
        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "POST");
        let response = self.http.post(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    fn normalize(raw: Vec<Value>) -> Vec<Ticket> {
        let mut tickets: Vec<Ticket> = raw.iter().map(ticket_from_api_object).collect();
        let synthesized = ensure_ticket_ids(&mut tickets);
        if synthesized > 0 {
            tracing::debug!(synthesized, "ids sintetizados em payload da API");
        }
        tickets
    }

    pub async fn status(&self) -> Result<BackendStatus, AppError> {
        self.get_json("/").await
    }

    pub async fn get_tickets(&self) -> Result<Vec<Ticket>, AppError> {
        let raw: Vec<Value> = self.get_json("/api/tickets").await?;
        Ok(Self::normalize(raw))
    }

    pub async fn get_tenant_tickets(&self, tenant: &str) -> Result<Vec<Ticket>, AppError> {
        let raw: Vec<Value> = self.get_json(&format!("/api/tenant/{tenant}")).await?;
        Ok(Self::normalize(raw))
    }

    pub async fn get_companies(&self) -> Result<Vec<CompanyData>, AppError> {
        self.get_json("/api/companies").await
    }

    /// Grupos são repassados como JSON cru: o formato é definido pelo
    /// backend e não participa da análise.
    pub async fn get_groups(&self) -> Result<Vec<Value>, AppError> {
        self.get_json("/api/groups").await
    }

    pub async fn get_tenants(&self) -> Result<Vec<String>, AppError> {
        self.get_json("/api/tenants").await
    }

    pub async fn update_company(&self, empresa: &str) -> Result<UpdateResponse, AppError> {
        self.post_json(&format!("/api/update/{empresa}")).await
    }

    pub async fn rebuild(&self) -> Result<RebuildResponse, AppError> {
        self.post_json("/api/rebuild").await
    }
}
