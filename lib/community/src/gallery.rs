//! The memory gallery of campus photos.

use campus_gallery_core::{ImageId, Result};
use campus_gallery_platform_access::Session;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ContentError, authorize};

/// Hint used when an upload does not describe its image.
pub const DEFAULT_IMAGE_HINT: &str = "gallery image";

/// A photo in the memory gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryImage {
    id: ImageId,
    src: String,
    alt: String,
    title: String,
    tags: Vec<String>,
    hint: String,
}

impl MemoryImage {
    #[must_use]
    pub fn id(&self) -> ImageId {
        self.id
    }

    /// Image source: a storage reference or data URL.
    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    #[must_use]
    pub fn alt(&self) -> &str {
        &self.alt
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Returns true if the image carries the tag, ignoring ASCII case.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag.trim()))
    }
}

/// Form data for a new gallery image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    /// Selected file, as a storage reference or data URL.
    pub source: Option<String>,
    pub title: String,
    /// Comma-separated tags.
    pub tags: String,
    pub hint: Option<String>,
}

/// Splits a comma-separated tag list, trimming and dropping empty entries.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// In-memory gallery, newest image first.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    images: Vec<MemoryImage>,
}

impl Gallery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn images(&self) -> &[MemoryImage] {
        &self.images
    }

    #[must_use]
    pub fn get(&self, id: ImageId) -> Option<&MemoryImage> {
        self.images.iter().find(|i| i.id == id)
    }

    /// Images carrying the given tag.
    #[must_use]
    pub fn search(&self, tag: &str) -> Vec<&MemoryImage> {
        self.images.iter().filter(|i| i.has_tag(tag)).collect()
    }

    /// Adds an uploaded image to the top of the gallery.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the session may not manage content, or
    /// `MissingField` when no file was selected or the title is empty.
    pub fn upload(
        &mut self,
        session: &Session,
        upload: ImageUpload,
    ) -> Result<&MemoryImage, ContentError> {
        authorize(session, "upload images")?;

        let src = upload
            .source
            .filter(|s| !s.is_empty())
            .ok_or(ContentError::MissingField { field: "source" })?;
        let title = upload.title.trim().to_string();
        if title.is_empty() {
            return Err(ContentError::MissingField { field: "title" }.into());
        }

        let image = MemoryImage {
            id: ImageId::new(),
            src,
            alt: title.clone(),
            title,
            tags: parse_tags(&upload.tags),
            hint: upload
                .hint
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_HINT.to_string()),
        };
        info!(image_id = %image.id, title = %image.title, "image uploaded");
        self.images.insert(0, image);
        Ok(&self.images[0])
    }

    /// Removes an image and returns it.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` or `NotFound`.
    pub fn remove(
        &mut self,
        session: &Session,
        id: ImageId,
    ) -> Result<MemoryImage, ContentError> {
        authorize(session, "delete images")?;
        let index = self.images.iter().position(|i| i.id == id).ok_or_else(|| {
            ContentError::NotFound {
                kind: "image",
                id: id.to_string(),
            }
        })?;
        let image = self.images.remove(index);
        info!(image_id = %id, title = %image.title, "image deleted");
        Ok(image)
    }
}
