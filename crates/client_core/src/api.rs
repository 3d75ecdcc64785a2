//! Transport seam between the controller and the spool assignment API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{Printer, Spool, SpoolId},
    error::ErrorBody,
    protocol::{AssignRequest, AssignResponse, PrintersResponse},
};
use tracing::debug;
use url::Url;

use crate::error::ControllerError;

/// Request timeout used by [`HttpSpoolApi::new`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait SpoolApi: Send + Sync {
    /// `GET /api/spool/{spool_id}`
    async fn get_spool(&self, spool_id: &SpoolId) -> Result<Spool, ControllerError>;
    /// `GET /api/printers`
    async fn list_printers(&self) -> Result<Vec<Printer>, ControllerError>;
    /// `POST /api/assign`
    async fn assign(&self, request: &AssignRequest) -> Result<AssignResponse, ControllerError>;
}

pub struct HttpSpoolApi {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpSpoolApi {
    pub fn new(base_url: Url) -> Result<Self, ControllerError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, ControllerError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ControllerError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ControllerError::Transport(format!("invalid server url: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl SpoolApi for HttpSpoolApi {
    async fn get_spool(&self, spool_id: &SpoolId) -> Result<Spool, ControllerError> {
        let url = self.endpoint(&["api", "spool", spool_id.as_str()])?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            debug!(status = %response.status(), spool_id = %spool_id, "spool lookup rejected");
            return Err(ControllerError::SpoolNotFound);
        }
        Ok(response.json().await?)
    }

    async fn list_printers(&self) -> Result<Vec<Printer>, ControllerError> {
        let url = self.endpoint(&["api", "printers"])?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            debug!(status = %response.status(), "printer listing rejected");
            return Err(ControllerError::PrintersUnavailable);
        }
        let body: PrintersResponse = response.json().await?;
        Ok(body.printers)
    }

    async fn assign(&self, request: &AssignRequest) -> Result<AssignResponse, ControllerError> {
        let url = self.endpoint(&["api", "assign"])?;
        let response = self.http.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await.unwrap_or_default();

        if status.is_success() {
            // A 2xx is enough; the body is informational.
            return Ok(serde_json::from_slice(&body).unwrap_or_default());
        }

        debug!(%status, printer_id = %request.printer_id, "assignment rejected");
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message().map(str::to_owned));
        Err(message.map_or(ControllerError::AssignFailed, ControllerError::Rejected))
    }
}
