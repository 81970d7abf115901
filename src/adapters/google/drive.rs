//! Google Drive v3 report store
//!
//! Reports are filed under `<root>/<Hospital Name - Location>/`. The
//! hospital folder is looked up by exact name and created when missing.

use super::http::{read_json, GoogleHttp};
use super::models::{
    FileList, FileMetadata, StoredReport, UploadedFile, FOLDER_MIME_TYPE, PDF_MIME_TYPE,
};
use super::ReportStore;
use crate::config::GoogleConfig;
use crate::domain::{DriveError, HospitalInfo, Result};
use crate::log_upload_complete;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Drive client storing reports under a fixed root folder
pub struct GoogleDriveClient {
    http: GoogleHttp,
    base_url: String,
    root_folder_id: String,
}

impl GoogleDriveClient {
    /// Creates a client from the `[google]` section
    pub fn new(config: &GoogleConfig) -> Result<Self> {
        Ok(Self {
            http: GoogleHttp::new(config)?,
            base_url: config.drive_api_base_url.trim_end_matches('/').to_string(),
            root_folder_id: config.drive_root_folder_id.clone(),
        })
    }

    /// Returns the id of `folder_name` under the root folder, creating it if
    /// no folder of that name exists
    pub async fn find_or_create_folder(&self, folder_name: &str) -> Result<String> {
        if let Some(id) = self.find_folder(folder_name).await? {
            tracing::info!(folder = %folder_name, folder_id = %id, "Using existing Drive folder");
            return Ok(id);
        }

        let id = self.create_folder(folder_name).await?;
        tracing::info!(folder = %folder_name, folder_id = %id, "Created Drive folder");
        Ok(id)
    }

    async fn find_folder(&self, folder_name: &str) -> Result<Option<String>> {
        let url = format!("{}/drive/v3/files", self.base_url);
        let query = folder_query(folder_name, &self.root_folder_id);

        let resp = self
            .http
            .send_with_retry("find folder", || {
                self.http.client().get(&url).query(&[
                    ("q", query.as_str()),
                    ("fields", "files(id,name)"),
                    ("spaces", "drive"),
                ])
            })
            .await?;

        let list: FileList = read_json(resp).await?;
        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    async fn create_folder(&self, folder_name: &str) -> Result<String> {
        let url = format!("{}/drive/v3/files", self.base_url);
        let metadata = FileMetadata {
            name: folder_name,
            parents: [self.root_folder_id.as_str()],
            mime_type: FOLDER_MIME_TYPE,
        };

        let resp = self
            .http
            .send_with_retry("create folder", || {
                self.http
                    .client()
                    .post(&url)
                    .query(&[("fields", "id")])
                    .json(&metadata)
            })
            .await
            .map_err(|e| match e {
                DriveError::ClientError { status: 404, .. } => {
                    DriveError::FolderNotFound(self.root_folder_id.clone())
                }
                other => other,
            })?;

        let created: UploadedFile = read_json(resp).await?;
        Ok(created.id)
    }

    /// Uploads PDF bytes into a folder and verifies the stored checksum
    pub async fn upload_pdf(
        &self,
        folder_id: &str,
        file_name: &str,
        pdf: &[u8],
    ) -> Result<StoredReport> {
        let url = format!("{}/upload/drive/v3/files", self.base_url);
        let metadata = FileMetadata {
            name: file_name,
            parents: [folder_id],
            mime_type: PDF_MIME_TYPE,
        };
        let boundary = format!("medroi-{}", uuid::Uuid::new_v4().simple());
        let body = multipart_related_body(&boundary, &serde_json::to_vec(&metadata)?, pdf);
        let content_type = format!("multipart/related; boundary={boundary}");

        let resp = self
            .http
            .send_with_retry("upload report", || {
                self.http
                    .client()
                    .post(&url)
                    .query(&[
                        ("uploadType", "multipart"),
                        ("fields", "id,webViewLink,sha256Checksum"),
                    ])
                    .header(reqwest::header::CONTENT_TYPE, content_type.as_str())
                    .body(body.clone())
            })
            .await
            .map_err(|e| match e {
                DriveError::ClientError { status, message } if status != 429 => {
                    DriveError::UploadFailed(format!("{status}: {message}"))
                }
                other => other,
            })?;

        let uploaded: UploadedFile = read_json(resp).await?;
        let local = sha256_hex(pdf);
        if let Some(remote) = &uploaded.sha256_checksum {
            if !remote.eq_ignore_ascii_case(&local) {
                return Err(DriveError::ChecksumMismatch {
                    local,
                    remote: remote.clone(),
                }
                .into());
            }
        }

        log_upload_complete!(file_name, uploaded.id, pdf.len());

        Ok(StoredReport {
            folder_id: folder_id.to_string(),
            file_id: uploaded.id,
            file_name: file_name.to_string(),
            web_view_link: uploaded.web_view_link,
            sha256: local,
        })
    }
}

#[async_trait]
impl ReportStore for GoogleDriveClient {
    async fn store_report(
        &self,
        hospital: &HospitalInfo,
        file_name: &str,
        pdf: &[u8],
    ) -> Result<StoredReport> {
        let folder_id = self.find_or_create_folder(&hospital.folder_name()).await?;
        self.upload_pdf(&folder_id, file_name, pdf).await
    }
}

/// Drive search query for a folder by exact name under a parent
pub fn folder_query(folder_name: &str, parent_id: &str) -> String {
    format!(
        "name='{}' and '{}' in parents and mimeType='{}' and trashed=false",
        escape_query_value(folder_name),
        escape_query_value(parent_id),
        FOLDER_MIME_TYPE
    )
}

fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Lowercase hex SHA-256
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

fn multipart_related_body(boundary: &str, metadata_json: &[u8], pdf: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(metadata_json.len() + pdf.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata_json);
    body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {PDF_MIME_TYPE}\r\n\r\n").as_bytes());
    body.extend_from_slice(pdf);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
