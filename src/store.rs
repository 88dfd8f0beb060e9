//! Album store: the persistence collaborator behind the editor.
//!
//! DESIGN
//! ======
//! `AlbumStore` is the contract the editor consumes: fetch an album, save one
//! page's content string, and add or remove pages. `FileAlbumStore` keeps one
//! album as a JSON document on disk. Every mutation is read-modify-write under
//! an async mutex and lands through a temp file and rename, so each write is
//! atomic. Ordering between concurrent saves of the same page is
//! last-write-wins.

use std::path::{Path, PathBuf};

use canvas::pages::{AlbumRecord, PageRecord, PageRemovalError, SaveResult};
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("album file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("album file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("album not found: {0}")]
    AlbumNotFound(String),
    #[error("page not found: {0}")]
    PageNotFound(String),
    #[error(transparent)]
    Removal(#[from] PageRemovalError),
}

/// Persistence contract consumed by the editor. Mockable in tests.
#[async_trait::async_trait]
pub trait AlbumStore: Send + Sync {
    /// Fetch an album with its pages in page order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlbumNotFound`] for an unknown id, or an I/O or
    /// decode error from the backing store.
    async fn get_album(&self, album_id: &str) -> Result<AlbumRecord, StoreError>;

    /// Replace one page's content string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PageNotFound`] for an unknown page, or an I/O or
    /// decode error from the backing store.
    async fn save_page_content(&self, page_id: &str, content: &str) -> Result<SaveResult, StoreError>;

    /// Insert a blank page before the back cover.
    ///
    /// # Errors
    ///
    /// Returns an I/O or decode error from the backing store.
    async fn add_page(&self) -> Result<PageRecord, StoreError>;

    /// Remove an inner page.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Removal`] when the page guard rejects the removal.
    async fn remove_page(&self, page_id: &str) -> Result<PageRecord, StoreError>;
}

/// One album stored as a JSON file.
pub struct FileAlbumStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileAlbumStore {
    /// Open an existing album file. Nothing is read until the first call.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    /// Write `album` to a new file at `path` and open it.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub async fn create(path: impl Into<PathBuf>, album: &AlbumRecord) -> Result<Self, StoreError> {
        let store = Self::open(path);
        store.write(album).await?;
        info!(path = %store.path.display(), album_id = %album.id, "album created");
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the album from disk with its pages in page order.
    ///
    /// # Errors
    ///
    /// Returns an I/O or decode error.
    pub async fn read(&self) -> Result<AlbumRecord, StoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let mut album: AlbumRecord = serde_json::from_slice(&bytes)?;
        album.sort_pages();
        Ok(album)
    }

    async fn write(&self, album: &AlbumRecord) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(album)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl AlbumStore for FileAlbumStore {
    async fn get_album(&self, album_id: &str) -> Result<AlbumRecord, StoreError> {
        let album = self.read().await?;
        if album.id != album_id {
            return Err(StoreError::AlbumNotFound(album_id.to_owned()));
        }
        Ok(album)
    }

    async fn save_page_content(&self, page_id: &str, content: &str) -> Result<SaveResult, StoreError> {
        let _guard = self.lock.lock().await;
        let mut album = self.read().await?;
        let page = album.page_mut(page_id).ok_or_else(|| StoreError::PageNotFound(page_id.to_owned()))?;
        page.content = Some(content.to_owned());
        self.write(&album).await?;
        debug!(page_id, bytes = content.len(), "page content saved");
        Ok(SaveResult { success: true })
    }

    async fn add_page(&self) -> Result<PageRecord, StoreError> {
        let _guard = self.lock.lock().await;
        let mut album = self.read().await?;
        let page = album.insert_page();
        self.write(&album).await?;
        info!(page_id = %page.id, page_number = page.page_number, "page added");
        Ok(page)
    }

    async fn remove_page(&self, page_id: &str) -> Result<PageRecord, StoreError> {
        let _guard = self.lock.lock().await;
        let mut album = self.read().await?;
        let page = album.remove_page(page_id)?;
        self.write(&album).await?;
        info!(page_id, "page removed");
        Ok(page)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
