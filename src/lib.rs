//! # Reinhardt REST Shortcuts
//!
//! Setup-time factories that turn a model description into a ready REST
//! endpoint, in the style of Django REST Framework.
//!
//! ## Overview
//!
//! - **Serializer factory** ([`serializers`]): a serializer exposing every model
//!   field plus a hyperlinked `url`, with camelCase output names and URL fields
//!   dropped unless the client asks for them
//! - **Viewset factory** ([`views`]): list/detail actions wired to the
//!   serializer, with search on text fields and ordering on scalar and date
//!   fields
//! - **Endpoint registrar** ([`urls`]): builds the viewset and registers it with
//!   a [`routers::DefaultRouter`]
//! - **Documentation helpers** ([`docs`]): describe search, ordering and
//!   pagination in the endpoint description
//!
//! Everything runs once while routes are being set up; request handling
//! belongs to the framework runtime.
//!
//! ## Quick Start
//!
//! ```
//! use reinhardt_rest_shortcuts::{FieldDescriptor, ModelDescriptor, ShortcutSettings};
//! use reinhardt_rest_shortcuts::routers::DefaultRouter;
//! use reinhardt_rest_shortcuts::urls::register_standard_endpoint;
//!
//! # fn main() -> reinhardt_rest_shortcuts::Result<()> {
//! let model = ModelDescriptor::builder("Article")
//!     .field(FieldDescriptor::scalar("id"))
//!     .field(FieldDescriptor::text("name"))
//!     .field(FieldDescriptor::date("created_at"))
//!     .field(FieldDescriptor::relation("owner", "User"))
//!     .build()?;
//!
//! let settings = ShortcutSettings::default().with_api_url_namespace("api");
//! let mut router = DefaultRouter::from_settings(&settings);
//! let viewset = register_standard_endpoint(&mut router, &model, None, &settings)?;
//!
//! assert_eq!(viewset.search_fields(), ["name"]);
//! assert_eq!(router.reverse("api:article-detail", &[("pk", "1")])?, "/article/1/");
//! # Ok(())
//! # }
//! ```

pub mod docs;
pub mod error;
pub mod inflection;
pub mod model;
pub mod routers;
pub mod serializers;
pub mod settings;
pub mod urls;
pub mod views;

pub use error::{Result, ShortcutError};
pub use model::{FieldDescriptor, FieldKind, Model, ModelDescriptor, ModelDescriptorBuilder};
pub use settings::ShortcutSettings;
