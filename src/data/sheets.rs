//! Google Sheets `values` API integration.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::data::RowSource;
use crate::domain::RawTable;
use crate::error::{AppError, SourceError};

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DEFAULT_RANGE: &str = "Sheet1!A:M";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Auth {
    /// OAuth access token sent as a bearer header.
    Bearer(String),
    /// API key for publicly shared sheets.
    ApiKey(String),
}

pub struct SheetsClient {
    client: Client,
    auth: Auth,
    sheet_id: String,
    range: String,
}

impl SheetsClient {
    /// Build a client from flags, falling back to the environment (`.env`).
    ///
    /// - `SHEET_ID`, `SHEET_RANGE`: which values to read
    /// - `SHEETS_ACCESS_TOKEN` or `SHEETS_API_KEY`: credentials (token wins)
    pub fn from_env(sheet_id: Option<String>, range: Option<String>, timeout_secs: u64) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let sheet_id = sheet_id
            .or_else(|| std::env::var("SHEET_ID").ok())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::new(2, "Missing sheet id: pass `--sheet-id` or set SHEET_ID (.env)."))?;
        let range = range
            .or_else(|| std::env::var("SHEET_RANGE").ok())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RANGE.to_string());

        let auth = resolve_auth(
            std::env::var("SHEETS_ACCESS_TOKEN").ok(),
            std::env::var("SHEETS_API_KEY").ok(),
        )?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            auth,
            sheet_id,
            range,
        })
    }

    fn values_url(&self) -> Result<Url, SourceError> {
        let mut url = Url::parse(BASE_URL).map_err(|e| SourceError::Malformed(format!("bad API url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::Malformed("bad API url".to_string()))?
            .extend([self.sheet_id.as_str(), "values", self.range.as_str()]);
        Ok(url)
    }
}

impl RowSource for SheetsClient {
    fn describe(&self) -> String {
        format!("Google Sheet {} ({})", self.sheet_id, self.range)
    }

    fn fetch(&self) -> Result<RawTable, SourceError> {
        let mut req = self.client.get(self.values_url()?);
        req = match &self.auth {
            Auth::Bearer(token) => req.bearer_auth(token),
            Auth::ApiKey(key) => req.query(&[("key", key.as_str())]),
        };

        tracing::debug!(sheet_id = %self.sheet_id, range = %self.range, "requesting sheet values");
        let resp = req
            .send()
            .map_err(|e| SourceError::Transport(format!("Google Sheets API: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(status_error(status, &body, &self.describe()));
        }

        let body: ValuesResponse = resp
            .json()
            .map_err(|e| SourceError::Malformed(format!("Failed to parse Google Sheets response: {e}")))?;

        table_from_values(body.values, &self.describe())
    }
}

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn resolve_auth(access_token: Option<String>, api_key: Option<String>) -> Result<Auth, SourceError> {
    let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
    if let Some(token) = non_empty(access_token) {
        return Ok(Auth::Bearer(token));
    }
    if let Some(key) = non_empty(api_key) {
        return Ok(Auth::ApiKey(key));
    }
    Err(SourceError::MissingCredentials(
        "set SHEETS_ACCESS_TOKEN or SHEETS_API_KEY in the environment (.env).".to_string(),
    ))
}

fn status_error(status: StatusCode, body: &str, what: &str) -> SourceError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SourceError::Unauthorized(what.to_string()),
        StatusCode::NOT_FOUND => SourceError::NotFound(what.to_string()),
        _ => {
            let message = serde_json::from_str::<ErrorResponse>(body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());
            SourceError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}

/// Convert the API's value grid (first row = headers) to a `RawTable`.
fn table_from_values(values: Vec<Vec<Value>>, what: &str) -> Result<RawTable, SourceError> {
    let mut rows = values.into_iter().map(|row| row.into_iter().map(cell_text).collect::<Vec<String>>());

    let headers = rows.next().ok_or_else(|| SourceError::Empty(what.to_string()))?;
    Ok(RawTable::from_grid(headers, rows.collect()))
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
