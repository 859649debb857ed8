//! HTTP client for the Planning Center Services API.

use crate::{
    basic_auth_header, Document, PlanPersonResource, PlanResource, RosterSource, ServiceRecords,
    TeamPositionResource, TeamResource, UpstreamQuery,
};
use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use rota_config::UpstreamConfig;
use rota_core::{RotaError, RotaResult};
use serde::de::DeserializeOwned;
use shaku::Component;
use tracing::{debug, warn};

/// Service name reported in upstream errors.
const SERVICE_NAME: &str = "planning-center";

/// Read-only Planning Center client.
///
/// Holds the encoded credentials; one instance is shared by every request.
#[derive(Clone, Component)]
#[shaku(interface = RosterSource)]
pub struct PlanningCenterClient {
    client: Client,
    base_url: String,
    authorization: String,
    member_page_size: u32,
    team_page_size: u32,
}

impl PlanningCenterClient {
    /// Creates a new client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> RotaResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| RotaError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authorization: basic_auth_header(&config.app_id, &config.app_secret),
            member_page_size: config.member_page_size,
            team_page_size: config.team_page_size,
        }
    }

    /// Component parameters for wiring this client into a DI module.
    pub fn parameters(config: &UpstreamConfig) -> RotaResult<PlanningCenterClientParameters> {
        let client = Self::new(config)?;
        Ok(PlanningCenterClientParameters {
            client: client.client,
            base_url: client.base_url,
            authorization: client.authorization,
            member_page_size: client.member_page_size,
            team_page_size: client.team_page_size,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches the next future plan for a service type.
    ///
    /// Pass-through parameters such as `offset` are forwarded, but cannot
    /// override the filter, ordering or page size.
    pub async fn next_plan(
        &self,
        service_type_id: &str,
        passthrough: &UpstreamQuery,
    ) -> RotaResult<PlanResource> {
        let mut query = passthrough.clone();
        query.insert("filter".to_string(), "future".to_string());
        query.insert("order".to_string(), "sort_date".to_string());
        query.insert("per_page".to_string(), "1".to_string());
        query.insert("fields[Plan]".to_string(), "short_dates,sort_date".to_string());

        let url = self.url(&format!("/service_types/{}/plans", service_type_id));
        let doc: Document<PlanResource> = self.get_document(&url, &query).await?;

        doc.data.into_iter().next().ok_or_else(|| {
            RotaError::external(
                SERVICE_NAME,
                format!("no upcoming plan for service type {}", service_type_id),
            )
        })
    }

    /// Fetches the people scheduled on a plan.
    pub async fn plan_members(&self, plan: &PlanResource) -> RotaResult<Vec<PlanPersonResource>> {
        let mut query = UpstreamQuery::new();
        query.insert("per_page".to_string(), self.member_page_size.to_string());
        query.insert(
            "fields[PlanPerson]".to_string(),
            "name,status,photo_thumbnail,team_position_name,team".to_string(),
        );

        let url = format!("{}/team_members", plan.links.self_link.trim_end_matches('/'));
        let doc: Document<PlanPersonResource> = self.get_document(&url, &query).await?;
        Ok(doc.data)
    }

    /// Fetches a service type's teams with their position definitions.
    pub async fn teams(
        &self,
        service_type_id: &str,
    ) -> RotaResult<(Vec<TeamResource>, Vec<TeamPositionResource>)> {
        let mut query = UpstreamQuery::new();
        query.insert("include".to_string(), "team_positions".to_string());
        query.insert("per_page".to_string(), self.team_page_size.to_string());
        query.insert("fields[Team]".to_string(), "name,team_positions".to_string());
        query.insert("fields[TeamPosition]".to_string(), "name,sequence".to_string());

        let url = self.url(&format!("/service_types/{}/teams", service_type_id));
        let doc: Document<TeamResource, TeamPositionResource> =
            self.get_document(&url, &query).await?;
        Ok((doc.data, doc.included))
    }

    async fn get_document<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &UpstreamQuery,
    ) -> RotaResult<T> {
        debug!("Upstream GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.authorization)
            .query(query)
            .send()
            .await
            .map_err(|e| RotaError::external(SERVICE_NAME, format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upstream GET {} returned {}: {}", url, status, body);
            return Err(RotaError::external(
                SERVICE_NAME,
                format!("HTTP {} from {}", status, url),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| RotaError::external(SERVICE_NAME, format!("malformed payload: {}", e)))
    }
}

#[async_trait]
impl RosterSource for PlanningCenterClient {
    async fn fetch_service(
        &self,
        service_type_id: &str,
        query: &UpstreamQuery,
    ) -> RotaResult<ServiceRecords> {
        let plan = self.next_plan(service_type_id, query).await?;

        let (members, (teams, positions)) =
            tokio::try_join!(self.plan_members(&plan), self.teams(service_type_id))?;

        debug!(
            "Fetched service type {}: plan {}, {} teams, {} positions, {} members",
            service_type_id,
            plan.id,
            teams.len(),
            positions.len(),
            members.len()
        );

        Ok(ServiceRecords {
            plan,
            teams,
            positions,
            members,
        })
    }
}
