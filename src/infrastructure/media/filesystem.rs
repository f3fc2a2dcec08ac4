use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;

use super::object_name;
use crate::application::ports::media_store::{MediaStore, StoredMedia};
use crate::domain::faculty_wear::ImageUpload;

pub const UPLOADS_ROUTE: &str = "/api/uploads";

/// Keeps images on local disk and serves them from [`UPLOADS_ROUTE`].
pub struct FsMediaStore {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl FsMediaStore {
    pub fn new(root: &str, public_base_url: Option<String>) -> Self {
        Self {
            root: PathBuf::from(root),
            public_base_url,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn url_for(&self, relative: &str) -> String {
        match self.public_base_url.as_deref() {
            Some(base) => format!("{}{}/{}", base.trim_end_matches('/'), UPLOADS_ROUTE, relative),
            None => format!("{}/{}", UPLOADS_ROUTE, relative),
        }
    }

    /// Maps a URL produced by this store back to a file under the root.
    /// Anything that could escape the root is refused.
    fn path_from_url(&self, url: &str) -> Option<PathBuf> {
        let (_, rest) = url.split_once(&format!("{UPLOADS_ROUTE}/"))?;
        let rest = rest.split(['?', '#']).next()?;
        let rel = Path::new(rest);
        if rest.is_empty()
            || !rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(rel))
    }
}

fn safe_folder(folder: &str) -> anyhow::Result<&str> {
    let trimmed = folder.trim_matches('/');
    anyhow::ensure!(
        Path::new(trimmed)
            .components()
            .all(|c| matches!(c, Component::Normal(_))),
        "invalid media folder {folder}"
    );
    Ok(trimmed)
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn upload_image(
        &self,
        image: &ImageUpload,
        folder: &str,
    ) -> anyhow::Result<StoredMedia> {
        let folder = safe_folder(folder)?;
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let name = object_name(image);
        let path = dir.join(&name);
        tokio::fs::write(&path, &image.bytes)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;

        let relative = if folder.is_empty() {
            name.clone()
        } else {
            format!("{folder}/{name}")
        };
        let public_id = relative
            .rsplit_once('.')
            .map(|(stem, _)| stem.to_string())
            .unwrap_or_else(|| relative.clone());
        Ok(StoredMedia {
            url: self.url_for(&relative),
            public_id,
            size: image.bytes.len() as i64,
        })
    }

    async fn delete_by_url(&self, url: &str) -> anyhow::Result<bool> {
        let Some(path) = self.path_from_url(url) else {
            tracing::warn!(url = %url, "media_url_outside_uploads");
            return Ok(false);
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
