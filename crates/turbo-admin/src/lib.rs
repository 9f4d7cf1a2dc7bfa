//! Admin API client and product form for the TurboCommerce back office.
//!
//! The variant builder in `turbo-catalog` is pure; this crate supplies the
//! collaborators around it:
//!
//! - [`AdminClient`] - REST client with bearer-token and client-id headers
//!   and uniform error unwrapping
//! - [`ImageUploader`] / [`ProductStore`] - the upload and persistence
//!   interfaces the form depends on
//! - [`SessionStore`] - file-backed session token storage
//! - [`ProductForm`] - owns a product draft and sequences builder
//!   transitions with uploads and saves
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use turbo_admin::prelude::*;
//!
//! let client = AdminClient::new("https://admin.example.com/api", HttpTransport::new(Duration::from_secs(30))?)
//!     .with_token(session.token)
//!     .with_client_id("dashboard");
//!
//! let mut form = ProductForm::new("Linen Shirt", DEFAULT_AXES, BuilderConfig::default());
//! form.set_option(0, 0, "Red")?;
//! form.set_option(1, 0, "M")?;
//! form.add_option(1, "")?;
//! form.upload_axis_image(&client, "Color", &ImageFile::from_path("red.png", 2 * 1024 * 1024)?)?;
//! let saved = form.submit(&client)?;
//! ```

mod api;
mod client;
mod error;
mod form;
mod request;
mod response;
mod session;
mod transport;
mod upload;

pub use api::{ImageUploader, ProductStore};
pub use client::AdminClient;
pub use error::AdminError;
pub use form::{ProductForm, DEFAULT_AXES};
pub use request::{FilePart, Method, RequestBody, RequestBuilder, CLIENT_ID_HEADER};
pub use response::Response;
pub use session::{Session, SessionStore};
pub use transport::{HttpTransport, Transport};
pub use upload::{ImageFile, UPLOAD_FIELD};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AdminClient, AdminError, HttpTransport, ImageFile, ImageUploader, ProductForm,
        ProductStore, Session, SessionStore, DEFAULT_AXES,
    };
    pub use turbo_catalog::prelude::*;
}
