use std::collections::HashMap;

use serde_json::Value;

use crate::error::{ProcessingError, Result};
use crate::models::RawCheckout;
use crate::readers::ColumnMap;
use crate::utils::constants::{DEFAULT_API_BASE_URL, DEFAULT_API_LIMIT};

/// The query options the Socrata endpoint accepts, enumerated explicitly.
/// Forwarding an open-ended option bag would make the external contract
/// unauditable; anything not listed here is not sent.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub select: Option<String>,
    pub order: Option<String>,
    pub group: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub q: Option<String>,
    pub query: Option<String>,
    pub exclude_system_fields: Option<bool>,
}

/// Thin client for the Seattle open-data (Socrata) API: one synchronous
/// round trip per invocation, no pagination loop beyond the caller's
/// limit/offset, no retries.
pub struct SocrataClient {
    base_url: String,
    app_token: Option<String>,
    column_map: ColumnMap,
    http: reqwest::Client,
}

impl SocrataClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            app_token: None,
            column_map: ColumnMap::api_default(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_app_token(mut self, app_token: Option<String>) -> Self {
        self.app_token = app_token;
        self
    }

    pub fn with_column_map(mut self, column_map: ColumnMap) -> Self {
        self.column_map = column_map;
        self
    }

    /// Fetch rows of `dataset_id` whose `date_column` lies between
    /// `begin_date` and `end_date` (Socrata treats the range as
    /// `between`, end not inclusive for timestamps past the end date).
    /// Dates are `%Y-%m-%d` or `%Y-%m-%dT%H:%M:%S` strings.
    pub async fn fetch_date_range(
        &self,
        dataset_id: &str,
        date_column: &str,
        begin_date: &str,
        end_date: &str,
        options: &QueryOptions,
    ) -> Result<Vec<RawCheckout>> {
        let url = format!("https://{}/resource/{}.json", self.base_url, dataset_id);
        let params = build_params(date_column, begin_date, end_date, options);

        let mut request = self.http.get(&url).query(&params);
        if let Some(token) = &self.app_token {
            request = request.header("X-App-Token", token);
        }

        let response = request.send().await?.error_for_status()?;
        let rows: Vec<HashMap<String, Value>> = response.json().await?;

        rows.iter().map(|row| self.to_checkout(row)).collect()
    }

    fn to_checkout(&self, row: &HashMap<String, Value>) -> Result<RawCheckout> {
        let required = |name: &str| -> Result<String> {
            text_field(row, name).ok_or_else(|| {
                ProcessingError::Api(format!("API record is missing field '{}'", name))
            })
        };

        Ok(RawCheckout::new(
            required(&self.column_map.collection)?,
            required(&self.column_map.title)?,
            text_field(row, &self.column_map.subjects),
            required(&self.column_map.date)?,
        ))
    }
}

impl Default for SocrataClient {
    fn default() -> Self {
        Self::new()
    }
}

fn text_field(row: &HashMap<String, Value>, name: &str) -> Option<String> {
    match row.get(name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn build_params(
    date_column: &str,
    begin_date: &str,
    end_date: &str,
    options: &QueryOptions,
) -> Vec<(String, String)> {
    let mut params = vec![(
        "$where".to_string(),
        format!("{} between '{}' and '{}'", date_column, begin_date, end_date),
    )];

    let limit = options.limit.unwrap_or(DEFAULT_API_LIMIT);
    params.push(("$limit".to_string(), limit.to_string()));

    if let Some(select) = &options.select {
        params.push(("$select".to_string(), select.clone()));
    }
    if let Some(order) = &options.order {
        params.push(("$order".to_string(), order.clone()));
    }
    if let Some(group) = &options.group {
        params.push(("$group".to_string(), group.clone()));
    }
    if let Some(offset) = options.offset {
        params.push(("$offset".to_string(), offset.to_string()));
    }
    if let Some(q) = &options.q {
        params.push(("$q".to_string(), q.clone()));
    }
    if let Some(query) = &options.query {
        params.push(("$query".to_string(), query.clone()));
    }
    if let Some(exclude) = options.exclude_system_fields {
        params.push((
            "$$exclude_system_fields".to_string(),
            exclude.to_string(),
        ));
    }

    params
}
