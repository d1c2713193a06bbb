//! Image archive
//!
//! Item images are stored under `<output>/<images>/<category>/<name>`, with
//! both the category and the file name sanitized. The same path function
//! feeds the record's `image_path`, so the recorded path is the written one.

use crate::crawler::{fetch_bytes, FetchResult};
use crate::output::sanitize::sanitize_filename;
use reqwest::Client;
use std::path::{Path, PathBuf};
use url::Url;

/// Archive path of an image, relative to the output directory
///
/// Each name becomes exactly one path component below `images_dir`.
pub fn image_relative_path(images_dir: &str, category: &str, image_name: &str) -> PathBuf {
    Path::new(images_dir)
        .join(path_component(category))
        .join(path_component(image_name))
}

/// Sanitizes `name`; empty, `.` and `..` become underscores
fn path_component(name: &str) -> String {
    let name = sanitize_filename(name);
    if name.chars().all(|c| c == '.') {
        "_".repeat(name.len().max(1))
    } else {
        name
    }
}

/// What happened when archiving one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// Image written (or overwritten) at `path`
    Saved { path: PathBuf, bytes: usize },

    /// Nothing was written
    Failed { reason: String },
}

impl ArchiveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, ArchiveOutcome::Saved { .. })
    }
}

/// Downloads item images into the local archive
#[derive(Debug, Clone)]
pub struct ImageArchiver {
    client: Client,
    output_dir: PathBuf,
    images_dir: String,
}

impl ImageArchiver {
    /// Creates an archiver writing below `output_dir/images_dir`
    pub fn new(
        client: Client,
        output_dir: impl Into<PathBuf>,
        images_dir: impl Into<String>,
    ) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            images_dir: images_dir.into(),
        }
    }

    /// Name of the archive directory inside the output directory
    pub fn images_dir(&self) -> &str {
        &self.images_dir
    }

    /// Fetches `image_url` and stores it for `category` as `image_name`
    ///
    /// The file is only written after a successful status. Existing files are
    /// overwritten. Failures are logged and reported in the outcome, never
    /// raised.
    pub async fn archive(
        &self,
        image_url: &Url,
        category: &str,
        image_name: &str,
    ) -> ArchiveOutcome {
        let body = match fetch_bytes(&self.client, image_url).await {
            FetchResult::Success { body, .. } => body,
            failure => {
                let reason = failure.failure_reason().unwrap_or_default();
                tracing::warn!("Failed to download image {}: {}", image_url, reason);
                return ArchiveOutcome::Failed { reason };
            }
        };

        let path = self
            .output_dir
            .join(image_relative_path(&self.images_dir, category, image_name));

        match write_image(&path, &body).await {
            Ok(()) => {
                tracing::debug!("Saved {} ({} bytes)", path.display(), body.len());
                ArchiveOutcome::Saved {
                    path,
                    bytes: body.len(),
                }
            }
            Err(e) => {
                tracing::warn!("Failed to write image {}: {}", path.display(), e);
                ArchiveOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

async fn write_image(path: &Path, body: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, body).await
}
