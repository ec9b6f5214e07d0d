use std::time::Duration;

use finmap_config::Settings;
use finmap_protocol::{FileEntry, PredefinedElement, SaveResponse, SavedSheet, SheetPayload};

/// Mapping service API client (blocking).
#[derive(Clone)]
pub struct MappingClient {
    http: reqwest::blocking::Client,
    api_base: String,
}

/// Error type for mapping service operations.
#[derive(Debug)]
pub enum ApiError {
    /// Network error (DNS, refused connection, timeout).
    Network(String),
    /// HTTP error with status code and response body.
    Http(u16, String),
    /// Response body did not have the expected shape.
    Parse(String),
    /// The server processed the request and said no (save with
    /// `success: false`, or a 4xx validation response). Carries the
    /// server-provided message.
    Rejected(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Rejected(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Fallback message when a save fails and the server sends no detail.
const GENERIC_SAVE_ERROR: &str = "Failed to save data";

impl MappingClient {
    /// Create a client from the saved settings (plus env override).
    pub fn from_settings() -> Self {
        let settings = Settings::load();
        Self::new(&settings.server_url, Duration::from_secs(settings.timeout_secs))
    }

    /// Create a client with an explicit base URL.
    pub fn new(api_base: &str, timeout: Duration) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("finmap/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// List selectable source file names, in server order.
    /// Entries without a usable `fileName` are dropped.
    pub fn list_files(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/api/excel/files", self.api_base);
        let resp = self.get(&url, &[])?;
        let entries: Vec<FileEntry> =
            resp.json().map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(entries
            .into_iter()
            .map(|f| f.file_name)
            .filter(|name| !name.is_empty())
            .collect())
    }

    /// Fetch the predefined elements for a chosen source file.
    ///
    /// A body that is not a JSON array means the service has nothing
    /// predefined for this file; that is an empty list, not an error.
    pub fn predefined_elements(
        &self,
        sheet_name: &str,
    ) -> Result<Vec<PredefinedElement>, ApiError> {
        let url = format!("{}/api/excel/elements", self.api_base);
        let resp = self.get(&url, &[("sheetName", sheet_name)])?;
        let body: serde_json::Value =
            resp.json().map_err(|e| ApiError::Parse(e.to_string()))?;

        if !body.is_array() {
            return Ok(Vec::new());
        }
        serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Persist the full sheet collection in one request.
    ///
    /// Returns the server's success message. An HTTP-success response with
    /// `success: false` is a rejection carrying the server's message.
    pub fn save_templates(&self, sheets: &[SheetPayload]) -> Result<String, ApiError> {
        let url = format!("{}/api/excel/save", self.api_base);
        let resp = self.post_json(&url, sheets)?;
        let outcome: SaveResponse =
            resp.json().map_err(|e| ApiError::Parse(e.to_string()))?;

        if !outcome.success {
            let message = if outcome.message.is_empty() {
                GENERIC_SAVE_ERROR.to_string()
            } else {
                outcome.message
            };
            return Err(ApiError::Rejected(message));
        }
        Ok(outcome.message)
    }

    /// Read back every saved sheet.
    pub fn saved_data(&self) -> Result<Vec<SavedSheet>, ApiError> {
        let url = format!("{}/api/excel/data", self.api_base);
        let resp = self.get(&url, &[])?;
        resp.json().map_err(|e| ApiError::Parse(e.to_string()))
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check_status(response)
    }

    fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check_status(response)
    }

    fn check_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            if status == 400 || status == 422 {
                // Server-side validation: prefer the embedded message.
                let message = serde_json::from_str::<SaveResponse>(&body)
                    .map(|r| r.message)
                    .ok()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(body);
                return Err(ApiError::Rejected(message));
            }
            return Err(ApiError::Http(status, body));
        }
        Ok(response)
    }
}
