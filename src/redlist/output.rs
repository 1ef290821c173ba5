//! Redlist file output.

use std::path::Path;

use log::info;

use crate::config::OutputLayout;
use crate::error_handling::TriageError;

use super::Redlist;

impl Redlist {
    /// Writes the redlist artifact, replacing any existing file.
    ///
    /// # Errors
    ///
    /// `TriageError::OutputWrite` if the file cannot be created or written.
    pub async fn write_to(&self, path: &Path, layout: OutputLayout) -> Result<(), TriageError> {
        tokio::fs::write(path, self.render(layout))
            .await
            .map_err(|source| TriageError::OutputWrite {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Wrote {} redlist entries to {}", self.len(), path.display());
        Ok(())
    }
}
