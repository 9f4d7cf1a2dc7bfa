//! Product editor form.
//!
//! The form owns the product draft and its [`VariantState`]. Builder
//! transitions are applied to the local state; collaborator calls (upload,
//! save) run between transitions, never during one.

use tracing::{info, warn};
use turbo_catalog::{BuilderConfig, CatalogError, ProductRecord, SkuField, VariantState};

use crate::api::{ImageUploader, ProductStore};
use crate::upload::ImageFile;
use crate::AdminError;

/// Axes offered on a new product.
pub const DEFAULT_AXES: [&str; 2] = ["Color", "Size"];

/// A product being created or edited.
#[derive(Debug, Clone)]
pub struct ProductForm {
    record: ProductRecord,
    state: VariantState,
}

impl ProductForm {
    /// Start a new product with one blank option slot per axis.
    pub fn new<I, S>(name: impl Into<String>, axes: I, config: BuilderConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            record: ProductRecord::new(name),
            state: VariantState::seeded(axes, config),
        }
    }

    /// Edit an existing product.
    pub fn from_record(record: ProductRecord, config: BuilderConfig) -> Self {
        let state = record.variant_state(config);
        Self { record, state }
    }

    pub fn state(&self) -> &VariantState {
        &self.state
    }

    /// Non-variant fields of the draft.
    pub fn record_mut(&mut self) -> &mut ProductRecord {
        &mut self.record
    }

    /// The full record with the current variant state written in.
    pub fn to_record(&self) -> ProductRecord {
        let mut record = self.record.clone();
        record.set_variants(self.state.clone());
        record
    }

    /// Apply a transition; on error the current state is kept.
    pub fn apply<F>(&mut self, transition: F) -> Result<(), CatalogError>
    where
        F: FnOnce(&VariantState) -> Result<VariantState, CatalogError>,
    {
        self.state = transition(&self.state)?;
        Ok(())
    }

    pub fn add_option(&mut self, axis: usize, value: impl Into<String>) -> Result<(), CatalogError> {
        self.apply(|s| s.add_option(axis, value))
    }

    pub fn set_option(
        &mut self,
        axis: usize,
        slot: usize,
        value: impl Into<String>,
    ) -> Result<(), CatalogError> {
        self.apply(|s| s.set_option(axis, slot, value))
    }

    pub fn delete_option(&mut self, axis: usize, slot: usize) -> Result<(), CatalogError> {
        self.apply(|s| s.delete_option(axis, slot))
    }

    pub fn update_cell(&mut self, sku: usize, field: SkuField, raw: &str) -> Result<(), CatalogError> {
        self.apply(|s| s.update_cell(sku, field, raw))
    }

    pub fn attach_axis_image(&mut self, axis: &str, image_ref: &str) -> Result<(), CatalogError> {
        self.apply(|s| s.attach_axis_image(axis, image_ref))
    }

    /// Upload an image and attach the returned reference to an axis.
    ///
    /// The axis, its free image slots and the file size are checked before
    /// anything is uploaded.
    pub fn upload_axis_image(
        &mut self,
        uploader: &dyn ImageUploader,
        axis: &str,
        file: &ImageFile,
    ) -> Result<String, AdminError> {
        self.state.check_can_attach(axis)?;
        if let Err(e) = file.ensure_within(self.state.config().max_image_bytes) {
            warn!(file = %file.file_name, size = file.size(), "image rejected before upload");
            return Err(e);
        }

        let image_ref = uploader.upload_image(file)?;
        self.attach_axis_image(axis, &image_ref)?;
        Ok(image_ref)
    }

    /// Create or update the product and adopt the server's record.
    pub fn submit(&mut self, store: &dyn ProductStore) -> Result<ProductRecord, AdminError> {
        let record = self.to_record();
        record.check_required()?;
        if !self.state.is_complete() {
            warn!(
                skus = record.sku_list.len(),
                expected = self.state.expected_sku_count(),
                "submitting a sku list that does not cover every combination"
            );
        }

        let saved = if record.is_new() {
            store.create_product(&record)?
        } else {
            store.update_product(&record)?
        };
        info!(id = ?saved.id, name = %saved.name, "product saved");

        *self = Self::from_record(saved.clone(), self.state.config().clone());
        Ok(saved)
    }
}
