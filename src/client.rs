//! Authenticated Google Drive API session for the "shared with me" listing.

use reqwest::Client;

use crate::enumerator::PageSource;
use crate::error::{DriveError, Result};
use crate::models::{ApiErrorResponse, FileListResponse};

/// Base URL for Google Drive API v3.
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Files shared with the authenticated account.
pub const SHARED_WITH_ME_QUERY: &str = "sharedWithMe = true";

/// Fields requested for every listed file.
pub const LIST_FIELDS: &str =
    "nextPageToken, files(id, name, mimeType, shared, sharingUser, modifiedTime)";

/// Default number of files requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// A ready-to-use handle for issuing authenticated Drive requests.
///
/// Never mutated by the listing; each request reads the token as is.
#[derive(Debug, Clone)]
pub struct DriveSession {
    access_token: String,
    base_url: String,
    page_size: u32,
    http: Client,
}

impl DriveSession {
    /// Create a session around a bearer token.
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            base_url: DRIVE_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            http: Client::new(),
        }
    }

    /// Point the session at another API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Request `page_size` files per page (at least one).
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The bearer token sent with every request.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The API base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of files shared with the current user.
    pub async fn list_shared_page(&self, page_token: Option<&str>) -> Result<FileListResponse> {
        let page_size = self.page_size.to_string();
        let mut request = self
            .http
            .get(format!("{}/files", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", SHARED_WITH_ME_QUERY),
                ("spaces", "drive"),
                ("fields", LIST_FIELDS),
                ("pageSize", page_size.as_str()),
            ]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&error_body) {
                return Err(DriveError::ApiError {
                    status: api_error.error.code,
                    message: api_error.error.message,
                });
            }
            return Err(DriveError::ApiError {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let list_response: FileListResponse = response.json().await?;
        Ok(list_response)
    }
}

impl PageSource for DriveSession {
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<FileListResponse> {
        self.list_shared_page(cursor).await
    }
}
