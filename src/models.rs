//! Data models for Google Drive API responses and the normalized report row.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Placeholder for metadata the remote did not send.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a file the remote returned without a name.
pub const UNTITLED: &str = "(untitled)";

/// Output format of [`SharedFileRecord::modified_time`].
pub const MODIFIED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One entry of a `files.list` response.
///
/// Every field is optional so a single incomplete entry never fails the
/// whole page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub shared: Option<bool>,
    #[serde(default)]
    pub sharing_user: Option<SharingUser>,
    #[serde(default)]
    pub modified_time: Option<String>,
}

/// The account that shared a file with the current user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharingUser {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Response from the files.list API endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A file shared with the current user, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFileRecord {
    pub name: String,
    pub mime_type: String,
    pub id: String,
    pub shared_by: String,
    pub modified_time: String,
}

impl SharedFileRecord {
    /// Normalize a remote entry. Returns `None` when the entry has no id.
    pub fn from_drive_file(file: DriveFile) -> Option<Self> {
        let id = file.id.filter(|id| !id.is_empty())?;

        let shared_by = file
            .sharing_user
            .and_then(|user| user.display_name)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let modified_time = match file.modified_time.as_deref() {
            Some(raw) => format_modified_time(raw).unwrap_or_else(|| {
                tracing::warn!(file_id = %id, modified_time = raw, "Unparseable modifiedTime");
                raw.to_string()
            }),
            None => NOT_AVAILABLE.to_string(),
        };

        Some(Self {
            name: file.name.unwrap_or_else(|| UNTITLED.to_string()),
            mime_type: file.mime_type.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            id,
            shared_by,
            modified_time,
        })
    }
}

/// Convert an RFC 3339 timestamp into UTC `YYYY-MM-DD HH:MM:SS`.
///
/// ```
/// use shared_with_me::models::format_modified_time;
///
/// assert_eq!(
///     format_modified_time("2024-01-15T10:30:00Z").as_deref(),
///     Some("2024-01-15 10:30:00")
/// );
/// ```
pub fn format_modified_time(raw: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).format(MODIFIED_TIME_FORMAT).to_string())
}

/// Google API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
}

/// Service account credentials from JSON file.
#[derive(Debug, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: Option<String>,
}

/// OAuth2 token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}
