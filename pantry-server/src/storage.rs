//! Local image object store
//!
//! Uploaded images land in `<root>/uploads/` as `<unix-millis>-<name>` and are
//! served back under `/uploads/`.

use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use pantry_common::time;

/// Largest accepted upload
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix the uploads directory is served under
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Accepted image types and the file extensions each may be stored under
const IMAGE_TYPES: &[(&str, &[&str])] = &[
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/png", &["png"]),
    ("image/gif", &["gif"]),
    ("image/webp", &["webp"]),
    ("image/avif", &["avif"]),
];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Only JPEG, PNG, GIF, WebP or AVIF images are allowed (got {0})")]
    InvalidFileType(String),

    #[error("File name {name:?} does not match content type {content_type}")]
    ExtensionMismatch { name: String, content_type: String },

    #[error("Image is {size} bytes; the limit is {limit} bytes")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Where an upload ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredImage {
    pub file_name: String,
    pub url: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl ImageStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            max_bytes: MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and write an image, returning its public URL
    pub async fn save(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredImage, StorageError> {
        // Parameters such as "; charset=" are not part of the type
        let content_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let extensions = allowed_extensions(&content_type)
            .ok_or_else(|| StorageError::InvalidFileType(content_type.clone()))?;
        if bytes.len() > self.max_bytes {
            return Err(StorageError::FileTooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        let clean = sanitize_file_name(original_name)
            .ok_or_else(|| StorageError::InvalidName(original_name.to_string()))?;
        // ServeDir picks the response type from the extension
        if !has_extension(&clean, extensions) {
            return Err(StorageError::ExtensionMismatch {
                name: clean,
                content_type,
            });
        }

        tokio::fs::create_dir_all(&self.dir).await?;

        let millis = time::unix_millis();
        let mut attempt = 0u32;
        let (file_name, file) = loop {
            let file_name = match attempt {
                0 => format!("{millis}-{clean}"),
                n => format!("{millis}-{n}-{clean}"),
            };
            let open = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&file_name))
                .await;
            match open {
                Ok(file) => break (file_name, file),
                Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < 16 => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        };

        write_or_discard(&self.dir.join(&file_name), file, bytes).await?;

        info!("Stored image {} ({} bytes)", file_name, bytes.len());
        Ok(StoredImage {
            url: format!("{UPLOADS_URL_PREFIX}/{file_name}"),
            file_name,
            content_type,
            size: bytes.len(),
        })
    }
}

fn allowed_extensions(content_type: &str) -> Option<&'static [&'static str]> {
    IMAGE_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, extensions)| *extensions)
}

fn has_extension(file_name: &str, extensions: &[&str]) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)),
        _ => false,
    }
}

/// Write the whole body or remove the partial file
async fn write_or_discard<W>(path: &Path, mut file: W, bytes: &[u8]) -> Result<(), StorageError>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        file.write_all(bytes).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            warn!("Failed to remove partial upload {}: {}", path.display(), remove_err);
        }
        return Err(e.into());
    }
    Ok(())
}

/// Keep ASCII alphanumerics, `-`, `_` and `.`; everything else becomes `-`
///
/// Directory components are dropped first. Returns `None` when nothing
/// usable is left (empty, or only dots).
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();

    let clean: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();

    if clean.chars().all(|c| c == '.') {
        None
    } else {
        Some(clean)
    }
}
