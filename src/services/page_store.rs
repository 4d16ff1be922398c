use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::errors::WikiError;
use crate::routes::is_valid_title;
use crate::types::Page;

/// Stores each page as `{title}.txt` in one flat directory.
///
/// There is no caching and no locking: every load reads the file fresh, and
/// concurrent saves of the same title race with the last writer winning.
#[derive(Debug, Clone)]
pub struct PageStore {
    data_dir: PathBuf,
}

impl PageStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        debug!("Creating PageStore with data directory: {:?}", data_dir);
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File backing `title`
    pub fn page_path(&self, title: &str) -> PathBuf {
        self.data_dir.join(format!("{}.txt", title))
    }

    /// Read a page. Any read failure, not only a missing file, is reported
    /// as `NotFound`.
    pub fn load(&self, title: &str) -> Result<Page, WikiError> {
        if !is_valid_title(title) {
            debug!("Refusing to load invalid title {:?}", title);
            return Err(WikiError::NotFound);
        }

        let path = self.page_path(title);
        match fs::read(&path) {
            Ok(body) => {
                debug!("Loaded page {:?}, {} bytes", title, body.len());
                Ok(Page::new(title, body))
            }
            Err(e) => {
                debug!("Could not read {:?}: {}", path, e);
                Err(WikiError::NotFound)
            }
        }
    }

    /// Write a page, creating the data directory first if needed.
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        if !is_valid_title(&page.title) {
            return Err(WikiError::InvalidTitle(page.title.clone()));
        }

        self.ensure_data_dir().map_err(|e| {
            error!("Failed to create data directory {:?}: {}", self.data_dir, e);
            WikiError::Io(e)
        })?;

        let path = self.page_path(&page.title);
        write_private(&path, &page.body).map_err(|e| {
            error!("Failed to write {:?}: {}", path, e);
            WikiError::Io(e)
        })?;

        info!("Saved page {:?}, {} bytes", page.title, page.body.len());
        Ok(())
    }

    fn ensure_data_dir(&self) -> std::io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(&self.data_dir)
    }
}

/// Truncate-and-write, owner read/write only on unix.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)
}
