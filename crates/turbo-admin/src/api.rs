//! Collaborator interfaces the product form depends on.

use turbo_catalog::{ProductId, ProductRecord};

use crate::upload::ImageFile;
use crate::AdminError;

/// Uploads an image and returns the reference to store on the product.
pub trait ImageUploader {
    fn upload_image(&self, file: &ImageFile) -> Result<String, AdminError>;
}

/// Persists product records.
pub trait ProductStore {
    /// Fetch a product by ID.
    fn fetch_product(&self, id: &ProductId) -> Result<ProductRecord, AdminError>;

    /// Create a product; the returned record carries the server ID.
    fn create_product(&self, product: &ProductRecord) -> Result<ProductRecord, AdminError>;

    /// Update an existing product.
    fn update_product(&self, product: &ProductRecord) -> Result<ProductRecord, AdminError>;
}
