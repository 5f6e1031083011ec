use std::{
    io,
    path::{Path, PathBuf},
};

use anchor_client::solana_sdk::hash::hash;
use log::debug;
use serde::Serialize;
use thiserror::Error;
use tokio::fs;

use crate::metadata::PNG;

pub const JSON: &str = "application/json";

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("storage failure: {0}")]
    Storage(#[from] io::Error),
    #[error("cannot serialize JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw content handed to an [`Uploader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl GenericFile {
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    pub async fn read(path: impl AsRef<Path>, content_type: &str) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).await.map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(bytes, content_type))
    }

    fn extension(&self) -> &'static str {
        match self.content_type.as_str() {
            PNG => "png",
            JSON => "json",
            _ => "bin",
        }
    }
}

/// Storage that turns content into a URI other parties can fetch it from.
#[allow(async_fn_in_trait)]
pub trait Uploader {
    async fn upload(&self, file: GenericFile) -> Result<String, Error>;

    async fn upload_json<T: Serialize + Sync>(&self, value: &T) -> Result<String, Error> {
        let bytes = serde_json::to_vec(value)?;
        self.upload(GenericFile::new(bytes, JSON)).await
    }
}

/// Stores uploads in a local directory under their SHA-256 and serves them from `base_uri`.
///
/// Useful on localnet and for staging assets before they are mirrored to permanent storage.
#[derive(Debug, Clone)]
pub struct DirectoryUploader {
    directory: PathBuf,
    base_uri: String,
}

impl DirectoryUploader {
    pub fn new(directory: impl Into<PathBuf>, base_uri: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            base_uri: base_uri.into(),
        }
    }
}

impl Uploader for DirectoryUploader {
    async fn upload(&self, file: GenericFile) -> Result<String, Error> {
        let name = format!("{}.{}", hash(&file.bytes), file.extension());
        let path = self.directory.join(&name);

        fs::create_dir_all(&self.directory).await?;
        if fs::metadata(&path).await.is_err() {
            fs::write(&path, &file.bytes).await?;
            debug!("stored {} bytes at {}", file.bytes.len(), path.display());
        } else {
            debug!("{} already stored", path.display());
        }

        Ok(format!("{}/{}", self.base_uri.trim_end_matches('/'), name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("skinforge-{name}-{}", std::process::id()))
    }

    #[tokio::test]
    async fn directory_uploads_are_content_addressed() {
        let dir = scratch_dir("content");
        let uploader = DirectoryUploader::new(&dir, "https://cdn.example.com/");

        let first = uploader
            .upload(GenericFile::new(b"png bytes".to_vec(), PNG))
            .await
            .unwrap();
        let second = uploader
            .upload(GenericFile::new(b"png bytes".to_vec(), PNG))
            .await
            .unwrap();
        let other = uploader
            .upload(GenericFile::new(b"other".to_vec(), PNG))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert!(first.starts_with("https://cdn.example.com/"));
        assert!(first.ends_with(".png"));

        let name = first.rsplit('/').next().unwrap();
        assert_eq!(std::fs::read(dir.join(name)).unwrap(), b"png bytes");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn json_documents() {
        let dir = scratch_dir("json");
        let uploader = DirectoryUploader::new(&dir, "file://uploads");

        let uri = uploader
            .upload_json(&serde_json::json!({ "name": "DEF_Ak" }))
            .await
            .unwrap();
        assert!(uri.ends_with(".json"));

        let name = uri.rsplit('/').next().unwrap();
        let stored: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.join(name)).unwrap()).unwrap();
        assert_eq!(stored["name"], "DEF_Ak");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn reading_missing_file() {
        assert!(matches!(
            GenericFile::read("/no/such/texture.png", PNG).await,
            Err(Error::Read { .. })
        ));
    }
}
