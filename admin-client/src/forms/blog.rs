//! Blog editor
//!
//! Top-level images and per-block icons are staged independently: a block
//! icon is sent as a file part when a new one is staged, otherwise as the
//! stored icon URL.

use std::sync::Arc;

use shared::FieldErrors;
use shared::models::{Blog, ContentBlock};

use crate::ClientResult;
use crate::api::CatalogApi;
use crate::client::{FormBody, HttpClient};
use crate::upload::{ImageSet, StagedFile};

/// One content block being edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockDraft {
    pub title: String,
    pub description: String,
    /// Stored icon URL, empty when none
    pub icon: String,
    /// Replacement icon, not yet uploaded
    pub staged_icon: Option<StagedFile>,
}

impl BlockDraft {
    pub fn from_block(block: &ContentBlock) -> Self {
        Self {
            title: block.title.clone(),
            description: block.description.clone(),
            icon: block.icon.clone(),
            staged_icon: None,
        }
    }

    /// Stage a new icon; non-images are ignored
    pub fn set_icon(&mut self, file: StagedFile) -> bool {
        if !file.is_image() {
            return false;
        }
        self.staged_icon = Some(file);
        true
    }

    /// Drop the staged icon, or the stored one when nothing is staged
    pub fn remove_icon(&mut self) {
        if self.staged_icon.take().is_none() {
            self.icon.clear();
        }
    }

    pub fn has_icon(&self) -> bool {
        self.staged_icon.is_some() || !self.icon.is_empty()
    }
}

/// Editable blog fields
#[derive(Debug, Clone, PartialEq)]
pub struct BlogDraft {
    pub title: String,
    pub description: String,
    pub images: ImageSet,
    pub content: Vec<BlockDraft>,
}

impl Default for BlogDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            images: ImageSet::new(),
            content: vec![BlockDraft::default()],
        }
    }
}

impl BlogDraft {
    pub fn from_blog(blog: &Blog) -> Self {
        let content = if blog.content.is_empty() {
            vec![BlockDraft::default()]
        } else {
            blog.content.iter().map(BlockDraft::from_block).collect()
        };
        Self {
            title: blog.title.clone(),
            description: blog.description.clone(),
            images: ImageSet::with_existing(blog.images.iter().cloned()),
            content,
        }
    }

    pub fn add_block(&mut self) {
        self.content.push(BlockDraft::default());
    }

    pub fn remove_block(&mut self, index: usize) -> Option<BlockDraft> {
        (index < self.content.len()).then(|| self.content.remove(index))
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(self.title.trim().is_empty(), "title", "Title is required");
        errors.check(
            self.description.trim().is_empty(),
            "description",
            "Description is required",
        );
        errors.check(
            self.content.is_empty(),
            "content",
            "At least one content block is required",
        );
        errors.into_result()
    }

    /// Build the multipart body; kept URLs are only sent when updating
    pub fn to_form(&self, updating: bool) -> Result<FormBody, FieldErrors> {
        self.validate()?;
        let mut form = FormBody::new()
            .text("title", self.title.trim())
            .text("description", self.description.trim());
        if updating {
            form = form.texts("existingImages[]", self.images.existing());
        }
        form = form.files("images", self.images.staged().iter().cloned());

        for (i, block) in self.content.iter().enumerate() {
            form.push_text(format!("content[{i}][title]"), &block.title);
            form.push_text(format!("content[{i}][description]"), &block.description);
            match &block.staged_icon {
                Some(file) => form.push_file(format!("content[{i}][icon]"), file.clone()),
                None => form.push_text(format!("content[{i}][icon]"), &block.icon),
            }
        }
        Ok(form)
    }
}

/// Create or edit one blog post
#[derive(Debug)]
pub struct BlogEditor<C> {
    api: Arc<CatalogApi<C>>,
    editing_id: Option<String>,
    pub draft: BlogDraft,
    pub errors: FieldErrors,
    pub error: Option<String>,
    pub submitting: bool,
}

impl<C: HttpClient> BlogEditor<C> {
    pub fn create(api: Arc<CatalogApi<C>>) -> Self {
        Self {
            api,
            editing_id: None,
            draft: BlogDraft::default(),
            errors: FieldErrors::new(),
            error: None,
            submitting: false,
        }
    }

    pub async fn edit(api: Arc<CatalogApi<C>>, id: &str) -> ClientResult<Self> {
        let blog = api.get_blog(id).await?;
        let mut editor = Self::create(api);
        editor.draft = BlogDraft::from_blog(&blog);
        editor.editing_id = Some(blog.id);
        Ok(editor)
    }

    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() { "Edit Blog" } else { "Create New Blog" }
    }

    pub fn touch(&mut self, field: &str) {
        self.errors.clear(field);
    }

    /// Validate and send; on success the editor is reset
    pub async fn submit(&mut self) -> ClientResult<Blog> {
        self.error = None;
        let form = match self.draft.to_form(self.is_edit()) {
            Ok(form) => form,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(errors.into());
            }
        };
        self.errors = FieldErrors::new();

        self.submitting = true;
        let result = match &self.editing_id {
            Some(id) => self.api.update_blog(id, form).await,
            None => self.api.create_blog(form).await,
        };
        self.submitting = false;

        match &result {
            Ok(_) => self.draft = BlogDraft::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Saving blog failed");
                self.error = Some(e.user_message("Failed to save blog!"));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PartValue;

    fn draft() -> BlogDraft {
        BlogDraft {
            title: "Eco packaging".into(),
            description: "Why paper".into(),
            images: ImageSet::with_existing(vec!["https://cdn/a.jpg".to_string()]),
            content: vec![
                BlockDraft {
                    title: "Step 1".into(),
                    description: "Collect".into(),
                    icon: "https://cdn/i1.png".into(),
                    staged_icon: None,
                },
                BlockDraft {
                    title: "Step 2".into(),
                    description: "Recycle".into(),
                    icon: "https://cdn/i2.png".into(),
                    staged_icon: Some(StagedFile::new("i2-new.png", vec![7])),
                },
            ],
        }
    }

    #[test]
    fn test_required_fields() {
        let mut empty = BlogDraft::default();
        empty.remove_block(0);
        let errors = empty.validate().unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("description"), Some("Description is required"));
        assert!(errors.get("content").is_some());
    }

    #[test]
    fn test_indexed_content_fields() {
        let form = draft().to_form(true).unwrap();
        assert_eq!(form.text_values("existingImages[]"), vec!["https://cdn/a.jpg"]);
        assert_eq!(form.text_value("content[0][title]"), Some("Step 1"));
        assert_eq!(form.text_value("content[0][icon]"), Some("https://cdn/i1.png"));
        assert_eq!(form.text_value("content[1][description]"), Some("Recycle"));

        let icon = form
            .parts()
            .iter()
            .find(|p| p.name == "content[1][icon]")
            .unwrap();
        assert!(matches!(&icon.value, PartValue::File(f) if f.file_name == "i2-new.png"));
    }

    #[test]
    fn test_create_omits_kept_urls() {
        let form = draft().to_form(false).unwrap();
        assert!(form.text_values("existingImages[]").is_empty());
    }

    #[test]
    fn test_icon_staging() {
        let mut block = BlockDraft {
            icon: "https://cdn/old.png".into(),
            ..Default::default()
        };
        assert!(!block.set_icon(StagedFile::new("notes.txt", vec![])));
        assert!(block.set_icon(StagedFile::new("new.png", vec![1])));

        block.remove_icon();
        assert!(block.staged_icon.is_none());
        assert_eq!(block.icon, "https://cdn/old.png");

        block.remove_icon();
        assert!(!block.has_icon());
    }
}
