use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use super::query::{Filter, SchoolQuery};
use super::SchoolStore;
use crate::config::DataConfig;
use crate::core::School;
use crate::errors::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Schools served by a PostgREST endpoint (for example a hosted Supabase
/// project). Read-only.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    endpoint: String,
}

impl RestStore {
    pub fn new(base_url: &str, table: &str, api_key: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            let apikey = HeaderValue::from_str(key)
                .map_err(|_| Error::Configuration("API key contains invalid characters".into()))?;
            let bearer = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|_| Error::Configuration("API key contains invalid characters".into()))?;
            headers.insert("apikey", apikey);
            headers.insert(AUTHORIZATION, bearer);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("gapmap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: table_endpoint(base_url, table),
        })
    }

    /// Build from `[data]`, reading the API key from the configured
    /// environment variable.
    pub fn from_config(base_url: &str, data: &DataConfig) -> Result<Self> {
        let api_key = std::env::var(&data.api_key_env).ok();
        if api_key.is_none() {
            log::warn!(
                "{} is not set; querying {} without an API key",
                data.api_key_env,
                base_url
            );
        }
        Self::new(base_url, &data.table, api_key.as_deref())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn table_endpoint(base_url: &str, table: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/rest/v1") {
        format!("{}/{}", base, table)
    } else {
        format!("{}/rest/v1/{}", base, table)
    }
}

/// Translate a query into PostgREST URL parameters.
pub fn postgrest_params(query: &SchoolQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    for filter in &query.filters {
        let (column, condition) = match filter {
            Filter::Eq(column, value) => (column.name().to_string(), format!("eq.{}", value.literal())),
            Filter::NameContains(text) => (
                "name".to_string(),
                format!("ilike.*{}*", strip_wildcards(text)),
            ),
            Filter::AtMost(column, max) => (column.name().to_string(), format!("lte.{}", max)),
            Filter::NotNull(column) => (column.name().to_string(), "not.is.null".to_string()),
            Filter::IdIn(ids) => {
                let members: Vec<String> = ids.iter().map(|id| quote_member(id)).collect();
                ("id".to_string(), format!("in.({})", members.join(",")))
            }
        };
        params.push((column, condition));
    }

    if let Some(column) = query.order_by {
        params.push(("order".to_string(), format!("{}.asc", column.name())));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

/// Double-quote an `in.(...)` member so `,` `(` `)` stay literal.
fn quote_member(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// PostgREST reads `*` (and Postgres `%`) as wildcards in `ilike`.
fn strip_wildcards(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '*' | '%')).collect()
}

impl SchoolStore for RestStore {
    fn fetch(&self, query: &SchoolQuery) -> Result<Vec<School>> {
        let params = postgrest_params(query);
        log::debug!("GET {} {:?}", self.endpoint, params);

        let response = self.client.get(&self.endpoint).query(&params).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Query(format!(
                "{} returned {}: {}",
                self.endpoint, status, body
            )));
        }

        let schools: Vec<School> = response.json()?;
        log::debug!("{} rows from {}", schools.len(), self.endpoint);
        Ok(schools)
    }

    fn describe(&self) -> String {
        format!("remote table {}", self.endpoint)
    }
}
