use crate::domain::model::{RegistrationResponse, Service, TicketReceipt, TicketRequest};
use crate::domain::ports::{ConfigProvider, TicketBackend};
use crate::utils::error::{KioskError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Ticket backend reached over HTTP under `{base_url}/api`.
#[derive(Debug, Clone)]
pub struct HttpTicketBackend {
    client: Client,
    api_base: String,
}

impl HttpTicketBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: format!("{}/api", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.base_url(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(KioskError::BackendError {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TicketBackend for HttpTicketBackend {
    async fn services(&self) -> Result<Vec<Service>> {
        let url = self.endpoint("services");
        tracing::debug!("Fetching services from: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("Services response status: {}", response.status());

        let services: Vec<Service> = Self::check_status(response).await?.json().await?;
        tracing::debug!("Received {} services", services.len());
        Ok(services)
    }

    async fn register(&self, request: &TicketRequest) -> Result<TicketReceipt> {
        let url = self.endpoint("ticket-registration");
        tracing::debug!(
            "Registering ticket at {} for service {} (with DPI: {})",
            url,
            request.id_service,
            request.dpi.is_some()
        );

        let response = self.client.post(&url).json(request).send().await?;
        tracing::debug!("Registration response status: {}", response.status());

        let payload: RegistrationResponse = Self::check_status(response).await?.json().await?;
        payload
            .into_receipt()
            .ok_or_else(|| KioskError::MalformedResponseError {
                message: "registration response carries no ticket number".to_string(),
            })
    }
}
