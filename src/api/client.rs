// HTTP client for the portal backend.
//
// Every call carries the bearer token when the session has one. A missing token is not
// checked here; the backend rejects the call and the HTTP error surfaces as a generic
// failure like any other.

use std::time::Duration;

use reqwest::RequestBuilder;
use url::Url;

use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::session::SessionContext;

pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl PortalClient {
    pub fn new(config: &PortalConfig, auth_token: Option<String>) -> Result<Self, PortalError> {
        // Validate the base URL up front so endpoint construction can't surprise us
        // mid-save.
        Url::parse(&config.api_base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    pub fn from_session(
        config: &PortalConfig,
        session: &SessionContext,
    ) -> Result<Self, PortalError> {
        Self::new(config, session.auth_token.clone())
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, PortalError> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    pub(crate) fn put(&self, url: Url) -> RequestBuilder {
        self.authorize(self.http.put(url))
    }

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.authorize(self.http.get(url))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}
