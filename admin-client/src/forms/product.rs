//! Product editor

use std::sync::Arc;

use shared::FieldErrors;
use shared::models::Product;

use crate::ClientResult;
use crate::api::CatalogApi;
use crate::client::{FormBody, HttpClient};
use crate::upload::{ImageSet, StagedFile};

/// Editable product fields, kept as typed text until submit
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub material: String,
    pub size: String,
    pub quantity_per_pack: String,
    pub price_per_pack: String,
    pub description: String,
    pub is_active: bool,
    pub images: ImageSet,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            material: String::new(),
            size: String::new(),
            quantity_per_pack: String::new(),
            price_per_pack: String::new(),
            description: String::new(),
            is_active: true,
            images: ImageSet::new(),
        }
    }
}

impl ProductDraft {
    /// Prefill from a stored product; its images become kept URLs
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            material: product.material.clone(),
            size: product.size.clone().unwrap_or_default(),
            quantity_per_pack: product.quantity_per_pack.to_string(),
            price_per_pack: product.price_per_pack.to_string(),
            description: product.description.clone().unwrap_or_default(),
            is_active: product.is_active,
            images: ImageSet::with_existing(product.images.iter().cloned()),
        }
    }

    fn price(&self) -> Option<f64> {
        self.price_per_pack.trim().parse().ok()
    }

    fn quantity(&self) -> Option<f64> {
        self.quantity_per_pack.trim().parse().ok()
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        errors.check(name.is_empty(), "name", "Name is required");
        errors.check(
            name.chars().count() < 2,
            "name",
            "Name must be at least 2 characters",
        );
        errors.check(self.category.is_empty(), "category", "Category is required");
        errors.check(self.material.is_empty(), "material", "Material is required");
        errors.check(
            !self.price().is_some_and(|p| p > 0.0),
            "pricePerPack",
            "Price must be greater than 0",
        );
        errors.check(
            !self.quantity().is_some_and(|q| q >= 1.0),
            "quantityPerPack",
            "Quantity must be greater than 0",
        );
        errors.check(
            self.images.is_empty(),
            "images",
            "At least one image is required",
        );
        errors.into_result()
    }

    /// Build the multipart body; kept URLs are only sent when updating
    pub fn to_form(&self, updating: bool) -> Result<FormBody, FieldErrors> {
        self.validate()?;
        let mut form = FormBody::new()
            .text("name", self.name.trim())
            .text("category", &self.category)
            .text("material", &self.material)
            .text_opt("size", Some(self.size.trim()).filter(|s| !s.is_empty()))
            .text("quantityPerPack", self.quantity().unwrap_or_default())
            .text("pricePerPack", self.price().unwrap_or_default())
            .text("description", self.description.trim())
            .text("isActive", self.is_active);
        if updating {
            form = form.texts("existingImages", self.images.existing());
        }
        Ok(form.files("images", self.images.staged().iter().cloned()))
    }
}

/// Create or edit one product
#[derive(Debug)]
pub struct ProductEditor<C> {
    api: Arc<CatalogApi<C>>,
    editing_id: Option<String>,
    pub draft: ProductDraft,
    pub errors: FieldErrors,
    pub error: Option<String>,
    pub submitting: bool,
}

impl<C: HttpClient> ProductEditor<C> {
    /// Empty editor for a new product
    pub fn create(api: Arc<CatalogApi<C>>) -> Self {
        Self {
            api,
            editing_id: None,
            draft: ProductDraft::default(),
            errors: FieldErrors::new(),
            error: None,
            submitting: false,
        }
    }

    /// Editor prefilled from the stored product
    pub async fn edit(api: Arc<CatalogApi<C>>, id: &str) -> ClientResult<Self> {
        let product = api.get_product(id).await?;
        let mut editor = Self::create(api);
        editor.draft = ProductDraft::from_product(&product);
        editor.editing_id = Some(product.id);
        Ok(editor)
    }

    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Product"
        } else {
            "Create New Product"
        }
    }

    /// Clear the error of a field being edited
    pub fn touch(&mut self, field: &str) {
        self.errors.clear(field);
    }

    /// Stage picked images (non-images already filtered by the picker)
    pub fn add_images(&mut self, files: Vec<StagedFile>) {
        self.draft.images.add(files);
        self.errors.clear("images");
    }

    pub fn remove_image(&mut self, index: usize) {
        self.draft.images.remove(index);
    }

    /// Validate and send; nothing is sent when validation fails
    pub async fn submit(&mut self) -> ClientResult<Product> {
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
            Some(id) => self.api.update_product(id, form).await,
            None => self.api.create_product(form).await,
        };
        self.submitting = false;

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Saving product failed");
            self.error = Some(e.user_message("Failed to save product!"));
        }
        result
    }
}
