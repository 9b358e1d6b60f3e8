use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};

use super::client::{ApiRequest, Transport};
use super::error::GatewayError;

pub const DEFAULT_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn resolve(user_supplied: &str, fallback: Option<&str>) -> Result<Self, GatewayError> {
        let user_supplied = user_supplied.trim();
        if !user_supplied.is_empty() {
            return Ok(Self(user_supplied.to_owned()));
        }

        fallback
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| Self(key.to_owned()))
            .ok_or(GatewayError::MissingCredential)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    pub api_base: String,
    pub page_size: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            page_size: 100,
        }
    }
}

pub struct NotionGateway {
    config: GatewayConfig,
    transport: Arc<dyn Transport>,
}

impl NotionGateway {
    pub fn new(config: GatewayConfig, transport: Arc<dyn Transport>) -> Self {
        let api_base = config.api_base.trim_end_matches('/').to_owned();
        Self {
            config: GatewayConfig { api_base, ..config },
            transport,
        }
    }

    pub fn fetch_dataset(
        &self,
        dataset_id: &str,
        credential: &Credential,
    ) -> Result<Value, GatewayError> {
        let dataset_id = dataset_id.trim();
        if dataset_id.is_empty() {
            return Err(GatewayError::MissingParameter("databaseId"));
        }

        let url = format!("{}/databases/{dataset_id}/query", self.config.api_base);
        let mut results = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen_cursors = HashSet::new();
        let mut pages = 0usize;

        loop {
            let mut body = json!({ "page_size": self.config.page_size });
            if let Some(cursor) = &cursor {
                body["start_cursor"] = Value::String(cursor.clone());
            }

            let mut page = self.send(ApiRequest::post(url.clone(), body), credential)?;
            pages += 1;

            match page.get_mut("results").map(Value::take) {
                Some(Value::Array(batch)) => results.extend(batch),
                _ => {
                    return Err(GatewayError::MalformedResponse(format!(
                        "query page {pages} of database {dataset_id} has no results list"
                    )));
                }
            }

            let has_more = page
                .get("has_more")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let next_cursor = page
                .get("next_cursor")
                .and_then(Value::as_str)
                .map(str::to_owned);

            match next_cursor {
                Some(next) if has_more => {
                    if !seen_cursors.insert(next.clone()) {
                        return Err(GatewayError::MalformedResponse(format!(
                            "database {dataset_id} repeated cursor {next}"
                        )));
                    }
                    cursor = Some(next);
                }
                _ => break,
            }
        }

        debug!(
            dataset_id,
            pages,
            records = results.len(),
            "fetched Notion database"
        );
        Ok(Value::Array(results))
    }

    pub fn fetch_page(&self, page_id: &str, credential: &Credential) -> Result<Value, GatewayError> {
        let page_id = page_id.trim();
        if page_id.is_empty() {
            return Err(GatewayError::MissingParameter("pageId"));
        }

        let url = format!("{}/pages/{page_id}", self.config.api_base);
        let page = self.send(ApiRequest::get(url), credential)?;
        debug!(page_id, "fetched Notion page");
        Ok(page)
    }

    fn send(&self, request: ApiRequest, credential: &Credential) -> Result<Value, GatewayError> {
        let request = request
            .with_header("Authorization", credential.bearer())
            .with_header("Notion-Version", NOTION_VERSION.to_owned());

        let response = self.transport.send(&request).inspect_err(|error| {
            warn!(url = %request.url, %error, "Notion request failed");
        })?;

        if !(200..300).contains(&response.status) {
            let detail = response
                .body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default();
            warn!(
                url = %request.url,
                status = response.status,
                detail,
                "Notion returned an error status"
            );
            return Err(GatewayError::Upstream {
                status: response.status,
            });
        }

        Ok(response.body)
    }
}
