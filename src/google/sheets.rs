// sheets.rs
use crate::google::auth::{ServiceAccountKey, SCOPES};
use crate::google::GoogleError;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Clone, Deserialize)]
pub struct Spreadsheet {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Worksheet {
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub index: i64,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<Spreadsheet>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: Worksheet,
}

/// Blocking Sheets/Drive client holding one bearer token for the run.
pub struct SheetsClient {
    client: Client,
    token: String,
}

impl SheetsClient {
    pub fn authorize(key: &ServiceAccountKey) -> Result<Self, GoogleError> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        let token = key.access_token(&client, &SCOPES)?;
        info!(account = %key.client_email, "authorized with Google");
        Ok(Self { client, token })
    }

    /// First spreadsheet visible to the service account with exactly this title.
    pub fn open_by_title(&self, title: &str) -> Result<Spreadsheet, GoogleError> {
        let url = Url::parse_with_params(
            DRIVE_FILES_URL,
            &[
                ("q", drive_query(title).as_str()),
                ("fields", "files(id,name)"),
                ("includeItemsFromAllDrives", "true"),
                ("supportsAllDrives", "true"),
            ],
        )?;

        let list: FileList = self.send(self.client.get(url))?;
        list.files
            .into_iter()
            .next()
            .ok_or_else(|| GoogleError::SpreadsheetNotFound(title.to_string()))
    }

    pub fn first_worksheet(&self, spreadsheet: &Spreadsheet) -> Result<Worksheet, GoogleError> {
        let url = Url::parse_with_params(
            &format!("{SHEETS_URL}/{}", spreadsheet.id),
            &[("fields", "sheets.properties(sheetId,title,index)")],
        )?;

        let meta: SpreadsheetMeta = self.send(self.client.get(url))?;
        meta.sheets
            .into_iter()
            .map(|s| s.properties)
            .min_by_key(|w| w.index)
            .ok_or_else(|| GoogleError::NoWorksheet(spreadsheet.name.clone()))
    }

    /// Inserts `rows` so the first lands on 1-based `row`, pushing existing rows down.
    /// Insert and fill go in one batchUpdate, so the sheet either gets the whole
    /// batch or nothing. Cells are written as plain strings, never as formulas.
    pub fn insert_rows(
        &self,
        spreadsheet: &Spreadsheet,
        worksheet: &Worksheet,
        rows: &[Vec<String>],
        row: usize,
    ) -> Result<(), GoogleError> {
        let batch_url = Url::parse(&format!("{SHEETS_URL}/{}:batchUpdate", spreadsheet.id))?;
        debug!(rows = rows.len(), row, sheet = %worksheet.title, "sending batchUpdate");

        let _: Value = self.send(
            self.client
                .post(batch_url)
                .json(&insert_rows_request(worksheet.sheet_id, row, rows)),
        )?;

        info!(rows = rows.len(), sheet = %worksheet.title, "rows written to spreadsheet");
        Ok(())
    }

    fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, GoogleError> {
        let resp = req.bearer_auth(&self.token).send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(GoogleError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json()?)
    }
}

fn drive_query(title: &str) -> String {
    let escaped = title.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name = '{escaped}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false")
}

/// Blank rows at `row`, then the values written over them.
fn insert_rows_request(sheet_id: i64, row: usize, rows: &[Vec<String>]) -> Value {
    let start = row.saturating_sub(1);
    let cells: Vec<Value> = rows
        .iter()
        .map(|r| {
            let values: Vec<Value> = r
                .iter()
                .map(|v| json!({ "userEnteredValue": { "stringValue": v } }))
                .collect();
            json!({ "values": values })
        })
        .collect();

    json!({
        "requests": [
            {
                "insertDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": start,
                        "endIndex": start + rows.len(),
                    },
                    "inheritFromBefore": false,
                }
            },
            {
                "updateCells": {
                    "start": {
                        "sheetId": sheet_id,
                        "rowIndex": start,
                        "columnIndex": 0,
                    },
                    "rows": cells,
                    "fields": "userEnteredValue",
                }
            }
        ]
    })
}
