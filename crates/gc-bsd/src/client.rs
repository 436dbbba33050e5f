//! HTTP client for the BSD API.
//!
//! Every call is signed with the instance's API id and secret: `api_mac` is
//! the hex HMAC-SHA1 of `api_id\napi_ts\napi_path\nquery` where `query` is the
//! unencoded query string without the mac itself.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use sha1::Sha1;
use tracing::debug;
use url::Url;

use crate::config::BsdConfig;
use crate::directory::{ConstituentGroupRecord, ConstituentRecord, FormRecord, RemoteDirectory};
use crate::error::{BsdError, BsdResult};
use crate::xml;

/// API version sent with every request.
const API_VERSION: &str = "2";

/// Path prefix of every API call.
const API_ROOT: &str = "/page/api";

type HmacSha1 = Hmac<Sha1>;

/// BSD API client.
#[derive(Clone)]
pub struct BsdClient {
    config: BsdConfig,
    client: reqwest::Client,
}

impl BsdClient {
    pub fn new(config: BsdConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    /// Create a client from the `BSD_*` environment variables.
    pub fn from_env() -> BsdResult<Self> {
        Ok(Self::new(BsdConfig::from_env()?))
    }

    pub fn config(&self) -> &BsdConfig {
        &self.config
    }

    /// Compute the request signature for a path and unencoded query string.
    fn sign(&self, api_ts: i64, api_path: &str, query: &str) -> BsdResult<String> {
        let message = format!("{}\n{}\n{}\n{}", self.config.api_id, api_ts, api_path, query);
        let mut mac = HmacSha1::new_from_slice(self.config.api_secret.as_bytes())
            .map_err(|e| BsdError::Config(e.to_string()))?;
        mac.update(message.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Build the signed URL of an API call.
    fn signed_url(&self, call: &str, params: &[(&str, &str)]) -> BsdResult<Url> {
        let api_path = format!("{}/{}", API_ROOT, call);
        let api_ts = chrono::Utc::now().timestamp();
        let api_ts_str = api_ts.to_string();

        let mut pairs: Vec<(&str, &str)> = vec![
            ("api_ver", API_VERSION),
            ("api_id", self.config.api_id.as_str()),
            ("api_ts", api_ts_str.as_str()),
        ];
        pairs.extend_from_slice(params);

        let query = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let api_mac = self.sign(api_ts, &api_path, &query)?;

        let mut url = Url::parse(&self.config.base_url())
            .and_then(|base| base.join(&api_path))
            .map_err(|e| BsdError::Config(format!("invalid BSD host '{}': {}", self.config.host, e)))?;
        url.query_pairs_mut()
            .extend_pairs(pairs.iter())
            .append_pair("api_mac", &api_mac);
        Ok(url)
    }

    /// Perform a signed GET and return the response body.
    async fn call(&self, call: &str, params: &[(&str, &str)]) -> BsdResult<String> {
        let url = self.signed_url(call, params)?;
        debug!(call = %call, "Calling BSD API");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            debug!(call = %call, status = status.as_u16(), "BSD API call failed");
            return Err(BsdError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl RemoteDirectory for BsdClient {
    async fn get_constituent_by_email(&self, email: &str) -> BsdResult<Option<ConstituentRecord>> {
        let body = self
            .call(
                "cons/get_constituents_by_email",
                &[("emails", email), ("bundles", "cons_email")],
            )
            .await?;
        let constituents = xml::parse_constituents(&body)?;
        debug!(found = constituents.len(), "Looked up constituent by email");
        Ok(constituents.into_iter().next())
    }

    async fn get_form(&self, form_id: &str) -> BsdResult<FormRecord> {
        let body = self
            .call("signup/get_form", &[("signup_form_id", form_id)])
            .await?;
        xml::parse_form(&body)
    }

    async fn get_constituent_group(&self, group_id: &str) -> BsdResult<Option<ConstituentGroupRecord>> {
        let body = self
            .call("cons_group/get_constituent_group", &[("cons_group_id", group_id)])
            .await?;
        xml::parse_group(&body)
    }
}
