//! Wire models for the Google Drive v3 and Sheets v4 REST APIs

use serde::{Deserialize, Serialize};

/// MIME type Drive uses for folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// MIME type of uploaded reports
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Entry of a `files.list` response
#[derive(Debug, Clone, Deserialize)]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `files.list` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

/// Metadata sent when creating a folder or uploading a file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata<'a> {
    pub name: &'a str,
    pub parents: [&'a str; 1],
    pub mime_type: &'a str,
}

/// `files.create` response for an upload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    #[serde(default)]
    pub web_view_link: Option<String>,
    #[serde(default)]
    pub sha256_checksum: Option<String>,
}

/// Where a report ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredReport {
    pub folder_id: String,
    pub file_id: String,
    pub file_name: String,
    pub web_view_link: Option<String>,
    /// Local SHA-256 of the uploaded bytes, lowercase hex
    pub sha256: String,
}

/// Body of `spreadsheets.values.append`
#[derive(Debug, Clone, Serialize)]
pub struct ValueRange {
    pub values: Vec<Vec<String>>,
}

/// Part of the `spreadsheets.values.append` response we log
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    #[serde(default)]
    pub updates: Option<AppendUpdates>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendUpdates {
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: Option<u32>,
}
