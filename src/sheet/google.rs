//! Google Sheets backend (Sheets v4 + Drive v3 REST, synchronous `ureq`).
//!
//! Obtaining the OAuth access token is outside this crate: the token is
//! handed in by the caller (usually read from an environment variable).

use crate::errors::{AppError, AppResult};
use crate::sheet::SheetSource;
use crate::sheet::address::CellAddress;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use url::Url;

const DRIVE_FILES_ENDPOINT: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

pub struct GoogleSheet {
    agent: ureq::Agent,
    token: String,
    spreadsheet_id: String,
    title: String,
}

fn api_error(context: &str, err: ureq::Error) -> AppError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            AppError::SheetApi(format!("{context}: HTTP {code}: {body}"))
        }
        ureq::Error::Transport(transport) => {
            AppError::SheetApi(format!("{context}: transport error: {transport}"))
        }
    }
}

/// Read a response body and decode it as JSON.
fn read_json<T: DeserializeOwned>(response: ureq::Response) -> AppResult<T> {
    let body = response.into_string()?;
    Ok(serde_json::from_str(&body)?)
}

/// Grid of a `values.get` response body. A worksheet with no data has no
/// `values` key.
pub fn decode_values(body: &str) -> AppResult<Vec<Vec<String>>> {
    let range: ValueRange = serde_json::from_str(body)?;
    Ok(range.values)
}

/// `values` endpoint for `range`, with every path segment percent-encoded.
pub fn values_url(spreadsheet_id: &str, range: &str) -> AppResult<String> {
    let mut url = Url::parse(SHEETS_API_BASE)
        .map_err(|e| AppError::SheetApi(format!("invalid API base URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| AppError::SheetApi("API base URL cannot take a path".into()))?
        .push(spreadsheet_id)
        .push("values")
        .push(range);
    Ok(url.into())
}

/// Quote a worksheet title for use in an A1 range.
fn quoted(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

impl GoogleSheet {
    /// Open the spreadsheet called `name` and select its first worksheet.
    pub fn open(name: &str, token: &str, timeout_secs: u64) -> AppResult<Self> {
        if token.trim().is_empty() {
            return Err(AppError::Config("Google access token is empty".into()));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();
        let bearer = format!("Bearer {token}");

        let query = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            name.replace('\'', "\\'"),
            SPREADSHEET_MIME
        );
        let list: DriveFileList = agent
            .get(DRIVE_FILES_ENDPOINT)
            .set("Authorization", &bearer)
            .query("q", &query)
            .query("fields", "files(id)")
            .call()
            .map_err(|e| api_error("listing spreadsheets", e))
            .and_then(read_json)?;

        let spreadsheet_id = list
            .files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| AppError::SheetApi(format!("spreadsheet '{name}' not found")))?;

        let meta: SpreadsheetMeta = agent
            .get(&format!("{SHEETS_API_BASE}/{spreadsheet_id}"))
            .set("Authorization", &bearer)
            .query("fields", "sheets.properties.title")
            .call()
            .map_err(|e| api_error("reading spreadsheet metadata", e))
            .and_then(read_json)?;

        let title = meta
            .sheets
            .into_iter()
            .next()
            .map(|s| s.properties.title)
            .ok_or_else(|| AppError::SheetApi(format!("spreadsheet '{name}' has no worksheets")))?;

        Ok(Self {
            agent,
            token: bearer,
            spreadsheet_id,
            title,
        })
    }

    fn values_url(&self, range: &str) -> AppResult<String> {
        values_url(&self.spreadsheet_id, range)
    }
}

impl SheetSource for GoogleSheet {
    fn title(&self) -> &str {
        &self.title
    }

    fn fetch_values(&mut self) -> AppResult<Vec<Vec<String>>> {
        let body = self
            .agent
            .get(&self.values_url(&quoted(&self.title))?)
            .set("Authorization", &self.token)
            .call()
            .map_err(|e| api_error("reading worksheet values", e))?
            .into_string()?;
        decode_values(&body)
    }

    fn update_cell(&mut self, address: &CellAddress, value: &str) -> AppResult<()> {
        let range = format!("{}!{}", quoted(&self.title), address);
        self.agent
            .put(&self.values_url(&range)?)
            .set("Authorization", &self.token)
            .query("valueInputOption", "USER_ENTERED")
            .send_json(json!({ "range": range, "values": [[value]] }))
            .map_err(|e| api_error(&format!("writing cell {address}"), e))?;
        Ok(())
    }
}
