//! Image upload staging
//!
//! [`ImagePicker`] filters incoming files down to images and hands them to
//! the owner; it keeps no selection of its own. [`ImageSet`] is what the
//! owning form keeps: remote URLs it wants to keep plus newly staged files.

use std::path::Path;

use crate::ClientResult;

/// A local file staged for upload
#[derive(Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    /// Stage in-memory bytes; the content type is guessed from the name
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Stage with an explicit content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Read a file from disk and stage it
    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// File chooser / drop target
#[derive(Debug, Clone, Copy, Default)]
pub struct ImagePicker {
    pub multiple: bool,
}

impl ImagePicker {
    pub fn single() -> Self {
        Self { multiple: false }
    }

    pub fn multiple() -> Self {
        Self { multiple: true }
    }

    /// Drop non-images and pass the rest on.
    ///
    /// `on_accepted` runs only when at least one image survives the filter.
    /// A single picker forwards just the first image. Returns how many files
    /// were forwarded.
    pub fn accept<F>(&self, files: Vec<StagedFile>, on_accepted: F) -> usize
    where
        F: FnOnce(Vec<StagedFile>),
    {
        let mut images: Vec<StagedFile> = files.into_iter().filter(StagedFile::is_image).collect();
        if !self.multiple {
            images.truncate(1);
        }
        let count = images.len();
        if count > 0 {
            on_accepted(images);
        }
        count
    }
}

/// One preview tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Already uploaded, shown by URL
    Remote(String),
    /// Staged locally, shown by file name
    Staged(String),
}

/// Kept remote images followed by newly staged files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSet {
    existing: Vec<String>,
    staged: Vec<StagedFile>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from images already stored on the server
    pub fn with_existing(urls: impl IntoIterator<Item = String>) -> Self {
        Self {
            existing: urls.into_iter().collect(),
            staged: Vec::new(),
        }
    }

    /// Append newly staged files
    pub fn add(&mut self, files: Vec<StagedFile>) {
        self.staged.extend(files);
    }

    /// Replace everything with one staged file (single-image slots)
    pub fn replace(&mut self, file: StagedFile) {
        self.existing.clear();
        self.staged = vec![file];
    }

    /// Previews in display order: kept URLs first, then staged files
    pub fn previews(&self) -> Vec<Preview> {
        self.existing
            .iter()
            .cloned()
            .map(Preview::Remote)
            .chain(self.staged.iter().map(|f| Preview::Staged(f.file_name.clone())))
            .collect()
    }

    /// Remove the preview at `index` from whichever list it belongs to
    pub fn remove(&mut self, index: usize) -> Option<Preview> {
        if index < self.existing.len() {
            return Some(Preview::Remote(self.existing.remove(index)));
        }
        let staged_index = index - self.existing.len();
        if staged_index < self.staged.len() {
            return Some(Preview::Staged(self.staged.remove(staged_index).file_name));
        }
        None
    }

    pub fn existing(&self) -> &[String] {
        &self.existing
    }

    pub fn staged(&self) -> &[StagedFile] {
        &self.staged
    }

    pub fn len(&self) -> usize {
        self.existing.len() + self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.existing.clear();
        self.staged.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> StagedFile {
        StagedFile::new(name, vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn test_content_type_guess() {
        assert_eq!(png("a.png").content_type, "image/png");
        assert_eq!(StagedFile::new("photo.JPG", vec![]).content_type, "image/jpeg");
        assert!(!StagedFile::new("notes.txt", vec![]).is_image());
        assert_eq!(
            StagedFile::new("blob", vec![]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_picker_filters_non_images() {
        let picker = ImagePicker::multiple();
        let mut got = Vec::new();
        let n = picker.accept(
            vec![png("a.png"), StagedFile::new("doc.pdf", vec![]), png("b.png")],
            |files| got = files,
        );
        assert_eq!(n, 2);
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn test_picker_skips_callback_without_images() {
        let picker = ImagePicker::multiple();
        let mut called = false;
        let n = picker.accept(vec![StagedFile::new("doc.pdf", vec![])], |_| called = true);
        assert_eq!(n, 0);
        assert!(!called);
    }

    #[test]
    fn test_single_picker_takes_first() {
        let mut got = Vec::new();
        ImagePicker::single().accept(vec![png("a.png"), png("b.png")], |f| got = f);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].file_name, "a.png");
    }

    #[test]
    fn test_image_set_remove_by_preview_index() {
        let mut set = ImageSet::with_existing(vec!["u1.jpg".into(), "u2.jpg".into()]);
        set.add(vec![png("new.png")]);
        assert_eq!(
            set.previews(),
            vec![
                Preview::Remote("u1.jpg".into()),
                Preview::Remote("u2.jpg".into()),
                Preview::Staged("new.png".into()),
            ]
        );

        assert_eq!(set.remove(2), Some(Preview::Staged("new.png".into())));
        assert!(set.staged().is_empty());
        assert_eq!(set.remove(0), Some(Preview::Remote("u1.jpg".into())));
        assert_eq!(set.existing(), ["u2.jpg".to_string()]);
        assert_eq!(set.remove(5), None);
        assert_eq!(set.len(), 1);
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cup.webp");
        tokio::fs::write(&path, b"RIFF").await.unwrap();
        let file = StagedFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "cup.webp");
        assert_eq!(file.content_type, "image/webp");
        assert_eq!(file.len(), 4);
    }
}
