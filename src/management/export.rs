use std::{fmt, io::Error, path::PathBuf};

use crate::types::PlaylistSummary;

#[derive(Debug)]
pub enum ExportError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::IoError(e) => write!(f, "{}", e),
            ExportError::SerdeError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<Error> for ExportError {
    fn from(err: Error) -> Self {
        ExportError::IoError(err)
    }
}

/// File holding the last result of the playlist lister as JSON.
///
/// Each call overwrites the previous content.
#[derive(Debug, Clone)]
pub struct PlaylistExport {
    path: PathBuf,
}

impl PlaylistExport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub async fn persist(&self, playlists: &[PlaylistSummary]) -> Result<(), ExportError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(playlists).map_err(ExportError::SerdeError)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub async fn load(&self) -> Result<Vec<PlaylistSummary>, ExportError> {
        let content = async_fs::read_to_string(&self.path).await?;
        serde_json::from_str(&content).map_err(ExportError::SerdeError)
    }
}
