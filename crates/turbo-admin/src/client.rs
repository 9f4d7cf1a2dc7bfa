//! REST client for the admin API.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};
use turbo_catalog::{ProductId, ProductRecord};

use crate::api::{ImageUploader, ProductStore};
use crate::request::{Method, RequestBuilder};
use crate::transport::{HttpTransport, Transport};
use crate::upload::ImageFile;
use crate::AdminError;

/// Client for the admin REST API.
///
/// Every request carries the bearer token and client ID when they are set.
pub struct AdminClient<T: Transport = HttpTransport> {
    transport: T,
    base_url: String,
    token: Option<String>,
    client_id: Option<String>,
}

#[derive(Deserialize)]
struct UploadedImage {
    url: String,
}

impl<T: Transport> AdminClient<T> {
    /// Create a client for an API base URL.
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            token: None,
            client_id: None,
        }
    }

    /// Authenticate requests with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Identify the calling client.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start a request for a path relative to the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };

        let mut builder = RequestBuilder::new(method, url).accept("application/json");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(client_id) = &self.client_id {
            builder = builder.client_id(client_id.clone());
        }
        builder
    }

    /// Send a request and unwrap the response payload.
    pub fn execute<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, AdminError> {
        debug!(method = request.method.as_str(), url = %request.url, "admin api request");
        let response = self.transport.send(request)?.error_for_status()?;
        response.data()
    }
}

impl<T: Transport> ImageUploader for AdminClient<T> {
    fn upload_image(&self, file: &ImageFile) -> Result<String, AdminError> {
        let request = self.request(Method::Post, "/upload/image").file(file.to_part());
        let uploaded: UploadedImage = self.execute(request)?;
        info!(file = %file.file_name, bytes = file.size(), url = %uploaded.url, "image uploaded");
        Ok(uploaded.url)
    }
}

impl<T: Transport> ProductStore for AdminClient<T> {
    fn fetch_product(&self, id: &ProductId) -> Result<ProductRecord, AdminError> {
        let request = self.request(Method::Get, &format!("/products/{}", id));
        self.execute(request)
    }

    fn create_product(&self, product: &ProductRecord) -> Result<ProductRecord, AdminError> {
        let request = self.request(Method::Post, "/products").json(product)?;
        let created = saved_record(self.execute(request)?)?;
        info!(id = ?created.id, skus = created.sku_list.len(), "product created");
        Ok(created)
    }

    fn update_product(&self, product: &ProductRecord) -> Result<ProductRecord, AdminError> {
        let id = product
            .id
            .as_ref()
            .ok_or(turbo_catalog::CatalogError::MissingField("id"))?;
        let request = self
            .request(Method::Put, &format!("/products/{}", id))
            .json(product)?;
        let updated = saved_record(self.execute(request)?)?;
        info!(%id, skus = updated.sku_list.len(), "product updated");
        Ok(updated)
    }
}

/// A save response must carry the product's ID; anything else is not a
/// product record and must not replace the caller's draft.
fn saved_record(record: ProductRecord) -> Result<ProductRecord, AdminError> {
    if record.id.is_none() {
        return Err(AdminError::ParseError(
            "save response did not contain a product id".to_string(),
        ));
    }
    Ok(record)
}
