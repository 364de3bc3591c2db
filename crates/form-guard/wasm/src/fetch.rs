//! Availability checks over `fetch`

use async_trait::async_trait;
use form_guard_core::{AvailabilityClient, AvailabilityError, AvailabilityRequest, AvailabilityResponse};
use gloo_net::http::Request;

/// POSTs availability checks to the registration endpoint
#[derive(Debug, Clone)]
pub struct FetchAvailabilityClient {
    endpoint: String,
}

impl FetchAvailabilityClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl AvailabilityClient for FetchAvailabilityClient {
    async fn check(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<AvailabilityResponse, AvailabilityError> {
        let response = Request::post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .map_err(|e| AvailabilityError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| AvailabilityError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(AvailabilityError::Status(response.status()));
        }

        response
            .json::<AvailabilityResponse>()
            .await
            .map_err(|e| AvailabilityError::Decode(e.to_string()))
    }
}
