use std::time::Duration;

/// Remote sheet API client (blocking).
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::blocking::Client,
    api_base: String,
    token: Option<String>,
}

/// Error type for remote operations.
#[derive(Debug)]
pub enum RemoteError {
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// JSON parsing error
    Parse(String),
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteError::Network(msg) => write!(f, "Network error: {}", msg),
            RemoteError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            RemoteError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for RemoteError {}

/// A file visible in the configured folder.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    /// ISO-8601 modification time as reported by the server.
    pub modified_time: String,
}

impl SheetsClient {
    pub fn new(api_base: impl Into<String>, token: Option<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("rowdeck/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: api_base.into(),
            token,
        }
    }

    /// List files in a folder, most recently modified first.
    pub fn list_files(&self, folder_id: &str) -> Result<Vec<RemoteFile>, RemoteError> {
        let url = format!("{}/folders/{}/files", self.api_base, folder_id);
        let json = self.get_json(&url)?;

        let mut files: Vec<RemoteFile> = json["files"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .filter_map(|f| {
                Some(RemoteFile {
                    id: f["id"].as_str()?.to_string(),
                    name: f["name"].as_str()?.to_string(),
                    modified_time: f["modifiedTime"].as_str().unwrap_or("").to_string(),
                })
            })
            .collect();

        // ISO-8601 strings sort chronologically; newest first regardless of
        // server ordering.
        files.sort_by(|a, b| b.modified_time.cmp(&a.modified_time));
        Ok(files)
    }

    /// Sheet names of a file, in file order.
    pub fn list_sheet_names(&self, file_id: &str) -> Result<Vec<String>, RemoteError> {
        let url = format!("{}/files/{}/sheets", self.api_base, file_id);
        let json = self.get_json(&url)?;

        Ok(json["sheets"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .filter_map(|s| s.as_str().map(String::from))
            .collect())
    }

    /// One sheet's cells, row-major; the first row is headers. Non-string
    /// cells (numbers, booleans) flatten to their display text.
    pub fn get_values(&self, file_id: &str, sheet_name: &str) -> Result<Vec<Vec<String>>, RemoteError> {
        let url = format!("{}/files/{}/values", self.api_base, file_id);
        let json = self.get_json_with_query(&url, &[("sheet", sheet_name)])?;

        Ok(json["values"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .map(|row| {
                row.as_array()
                    .unwrap_or(&vec![])
                    .iter()
                    .map(cell_to_string)
                    .collect()
            })
            .collect())
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get_json(&self, url: &str) -> Result<serde_json::Value, RemoteError> {
        self.get_json_with_query(url, &[])
    }

    fn get_json_with_query(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, RemoteError> {
        let mut req = self.http.get(url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let response = req.send().map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RemoteError::Http(status, body));
        }

        response
            .json::<serde_json::Value>()
            .map_err(|e| RemoteError::Parse(e.to_string()))
    }
}

fn cell_to_string(cell: &serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn list_files_sorts_newest_first() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/folders/pasta1/files");
            then.status(200).json_body(json!({
                "files": [
                    {"id": "a", "name": "velho", "modifiedTime": "2026-01-01T00:00:00Z"},
                    {"id": "b", "name": "novo", "modifiedTime": "2026-08-01T00:00:00Z"},
                ]
            }));
        });

        let client = SheetsClient::new(server.base_url(), None);
        let files = client.list_files("pasta1").unwrap();

        assert_eq!(files[0].name, "novo");
        assert_eq!(files[1].name, "velho");
    }

    #[test]
    fn list_sheet_names_preserves_file_order() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/files/abc/sheets");
            then.status(200)
                .json_body(json!({"sheets": ["Estoque", "Compras"]}));
        });

        let client = SheetsClient::new(server.base_url(), None);
        let names = client.list_sheet_names("abc").unwrap();
        assert_eq!(names, vec!["Estoque", "Compras"]);
    }

    #[test]
    fn get_values_flattens_typed_cells() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/files/abc/values")
                .query_param("sheet", "Estoque");
            then.status(200).json_body(json!({
                "values": [["Descrição", "Custo"], ["Arroz", 10], ["Feijão", true]]
            }));
        });

        let client = SheetsClient::new(server.base_url(), None);
        let values = client.get_values("abc", "Estoque").unwrap();

        assert_eq!(values[1], vec!["Arroz", "10"]);
        assert_eq!(values[2], vec!["Feijão", "TRUE"]);
    }

    #[test]
    fn http_failure_maps_to_remote_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/files/abc/sheets");
            then.status(403).body("forbidden");
        });

        let client = SheetsClient::new(server.base_url(), None);
        match client.list_sheet_names("abc") {
            Err(RemoteError::Http(403, body)) => assert_eq!(body, "forbidden"),
            other => panic!("expected HTTP error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn token_is_sent_as_bearer_auth() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/files/abc/sheets")
                .header("authorization", "Bearer segredo");
            then.status(200).json_body(json!({"sheets": []}));
        });

        let client = SheetsClient::new(server.base_url(), Some("segredo".to_string()));
        client.list_sheet_names("abc").unwrap();
        mock.assert();
    }
}
