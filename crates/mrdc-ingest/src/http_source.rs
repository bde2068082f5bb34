use std::time::Duration;

use tracing::info;

use mrdc_model::RawTable;

use crate::error::IngestError;
use crate::json_source::json_rows_to_table;

/// Options for the HTTP JSON extractor.
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Sent as `x-api-key` when present.
    pub api_key: Option<String>,
    /// Request timeout; the client default applies when `None`.
    pub timeout: Option<Duration>,
}

/// GET a JSON array of objects from an API endpoint.
///
/// Retry and pagination policy belong to the collaborator behind the
/// endpoint, not here: one request, one table.
pub fn fetch_http_table(url: &str, options: &HttpOptions) -> Result<RawTable, IngestError> {
    let http_error = |message: String| IngestError::Http {
        url: url.to_string(),
        message,
    };

    let mut builder = reqwest::blocking::Client::builder();
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(|error| http_error(error.to_string()))?;

    let mut request = client.get(url);
    if let Some(api_key) = &options.api_key {
        request = request.header("x-api-key", api_key);
    }

    let response = request.send().map_err(|error| http_error(error.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(http_error(format!("server answered {status}")));
    }
    let body: serde_json::Value = response
        .json()
        .map_err(|error| http_error(error.to_string()))?;

    let table = json_rows_to_table(url, &body)?;
    info!(url, rows = table.height(), "http source fetched");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_host_is_a_descriptive_error() {
        let options = HttpOptions {
            api_key: None,
            timeout: Some(Duration::from_millis(200)),
        };
        let error = fetch_http_table("http://127.0.0.1:1/stores", &options).unwrap_err();
        assert!(matches!(error, IngestError::Http { .. }));
        assert!(error.to_string().contains("127.0.0.1"));
    }
}
