//! Paginated enumeration of the files shared with the current user.
//!
//! Pages are fetched one after another. The first failing page ends the
//! run, but everything accumulated before it is kept and returned together
//! with the error. A page token the remote already handed out also ends the
//! run, so a looping cursor cannot spin forever.

use std::collections::HashSet;

use crate::error::{DriveError, Result};
use crate::models::{FileListResponse, SharedFileRecord};

/// Something that can return one page of the "shared with me" listing.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetch the page identified by `cursor` (`None` for the first page).
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<FileListResponse>;
}

/// Outcome of one enumeration run.
#[derive(Debug, Default)]
pub struct Listing {
    /// Records in the order the remote returned them.
    pub records: Vec<SharedFileRecord>,
    /// Pages successfully consumed.
    pub pages: usize,
    /// The page fetch failure that cut the run short, if any.
    pub error: Option<DriveError>,
}

impl Listing {
    /// True when pagination ran until the remote reported no further page.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Collect every file shared with the current user.
///
/// Never fails: a page error stops pagination and is stored in
/// [`Listing::error`] next to the records gathered so far.
pub async fn enumerate<S: PageSource>(source: &S) -> Listing {
    let mut listing = Listing::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut seen_tokens: HashSet<String> = HashSet::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = match source.fetch_page(page_token.as_deref()).await {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!(page = listing.pages + 1, error = %e, "Failed to fetch page of shared files");
                listing.error = Some(e);
                break;
            }
        };
        listing.pages += 1;

        tracing::debug!(
            page = listing.pages,
            entries = page.files.len(),
            has_next = page.next_page_token.is_some(),
            "Fetched page"
        );

        for file in page.files {
            let Some(record) = SharedFileRecord::from_drive_file(file) else {
                tracing::warn!(page = listing.pages, "Skipping entry without an id");
                continue;
            };
            if !seen.insert(record.id.clone()) {
                tracing::debug!(file_id = %record.id, "Skipping duplicate entry");
                continue;
            }
            listing.records.push(record);
        }

        match page.next_page_token {
            Some(token) if !seen_tokens.insert(token.clone()) => {
                tracing::debug!(page = listing.pages, page_token = %token, "Page token repeated");
                listing.error = Some(DriveError::RepeatedPageToken(token));
                break;
            }
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    tracing::info!(
        files = listing.records.len(),
        pages = listing.pages,
        complete = listing.is_complete(),
        "Enumeration finished"
    );

    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DriveFile, SharingUser};
    use std::cell::RefCell;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Serves a fixed sequence of pages; `None` makes that page fail.
    struct StubSource {
        pages: Vec<Option<FileListResponse>>,
        cursors: RefCell<Vec<Option<String>>>,
    }

    impl StubSource {
        fn new(pages: Vec<Option<FileListResponse>>) -> Self {
            Self {
                pages,
                cursors: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.cursors.borrow().len()
        }
    }

    impl PageSource for StubSource {
        async fn fetch_page(&self, cursor: Option<&str>) -> Result<FileListResponse> {
            let index = self.calls();
            self.cursors.borrow_mut().push(cursor.map(str::to_string));
            match self.pages.get(index) {
                Some(Some(page)) => Ok(page.clone()),
                Some(None) => Err(DriveError::ApiError {
                    status: 500,
                    message: "backend error".to_string(),
                }),
                None => panic!("unexpected request for page {}", index + 1),
            }
        }
    }

    fn file(id: &str) -> DriveFile {
        DriveFile {
            id: Some(id.to_string()),
            name: Some(format!("{id}.txt")),
            mime_type: Some("text/plain".to_string()),
            shared: Some(true),
            sharing_user: Some(SharingUser {
                display_name: Some("Alice".to_string()),
            }),
            modified_time: Some("2024-01-15T10:30:00Z".to_string()),
        }
    }

    fn page(ids: &[&str], next: Option<&str>) -> Option<FileListResponse> {
        Some(FileListResponse {
            files: ids.iter().map(|id| file(id)).collect(),
            next_page_token: next.map(str::to_string),
        })
    }

    fn ids(listing: &Listing) -> Vec<&str> {
        listing.records.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_multi_page_order_and_count() {
        let source = StubSource::new(vec![
            page(&["a", "b"], Some("t1")),
            page(&["c"], Some("t2")),
            page(&["d", "e", "f"], None),
        ]);

        let listing = enumerate(&source).await;

        assert!(listing.is_complete());
        assert_eq!(listing.pages, 3);
        assert_eq!(ids(&listing), vec!["a", "b", "c", "d", "e", "f"]);
        assert_eq!(
            *source.cursors.borrow(),
            vec![None, Some("t1".to_string()), Some("t2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_stops_after_last_page() {
        let source = StubSource::new(vec![page(&["a"], Some("t1")), page(&["b"], None)]);

        enumerate(&source).await;

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_earlier_records() {
        let source = StubSource::new(vec![page(&["a", "b"], Some("t1")), None]);

        let listing = enumerate(&source).await;

        assert_eq!(ids(&listing), vec!["a", "b"]);
        assert_eq!(listing.pages, 1);
        assert!(matches!(
            listing.error,
            Some(DriveError::ApiError { status: 500, .. })
        ));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_first_page_failure_yields_empty() {
        let source = StubSource::new(vec![None]);

        let listing = enumerate(&source).await;

        assert!(listing.records.is_empty());
        assert!(!listing.is_complete());
        assert_eq!(listing.pages, 0);
    }

    #[tokio::test]
    async fn test_empty_result() {
        let source = StubSource::new(vec![page(&[], None)]);

        let listing = enumerate(&source).await;

        assert!(listing.records.is_empty());
        assert!(listing.is_complete());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_idempotent_runs() {
        let source = StubSource::new(vec![
            page(&["a", "b"], Some("t1")),
            page(&["c"], None),
            page(&["a", "b"], Some("t1")),
            page(&["c"], None),
        ]);

        let first = enumerate(&source).await;
        let second = enumerate(&source).await;

        assert_eq!(first.records, second.records);
        assert_eq!(
            *source.cursors.borrow(),
            vec![None, Some("t1".to_string()), None, Some("t1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_entries_without_id_and_duplicates_skipped() {
        let mut first = page(&["a"], Some("t1")).unwrap();
        first.files.push(DriveFile::default());
        let source = StubSource::new(vec![Some(first), page(&["a", "b"], None)]);

        let listing = enumerate(&source).await;

        assert_eq!(ids(&listing), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_repeated_page_token_stops() {
        let source = StubSource::new(vec![
            page(&["a"], Some("same")),
            page(&["b"], Some("same")),
        ]);

        let listing = enumerate(&source).await;

        assert_eq!(ids(&listing), vec!["a", "b"]);
        assert_eq!(listing.pages, 2);
        assert_eq!(source.calls(), 2);
        assert!(matches!(
            listing.error,
            Some(DriveError::RepeatedPageToken(ref token)) if token == "same"
        ));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_page_failure_is_logged() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let source = StubSource::new(vec![page(&["a", "b"], Some("t1")), None]);
        let listing = enumerate(&source).await;

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert_eq!(listing.records.len(), 2);
        assert!(output.contains("Failed to fetch page of shared files"));
        assert!(output.contains("page=2"));
        assert!(output.contains("API error (500): backend error"));
    }
}
