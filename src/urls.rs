//! Endpoint registration for models
//!
//! [`register_standard_endpoint`] is the one-call path from a model
//! description to routes: it builds the standard viewset (unless one is
//! given) and registers it with the router under a prefix derived from the
//! model name.

use crate::error::Result;
use crate::inflection::{dasherize, underscore};
use crate::model::{Model, ModelDescriptor};
use crate::routers::DefaultRouter;
use crate::settings::ShortcutSettings;
use crate::views::{ModelViewSet, create_standard_viewset};
use std::sync::Arc;

/// URL prefix of a model's endpoint, `BlogPost` -> `blog-post`
pub fn endpoint_name(model: &ModelDescriptor) -> String {
	dasherize(&underscore(model.name()))
}

/// Register the endpoint of `model` with `router`
///
/// The viewset is registered under the base name of its serializer, so
/// `BlogPost` yields `/blog-post/` (`blog-post-list`) and
/// `/blog-post/{pk}/` (`blog-post-detail`). Returns the registered viewset.
///
/// # Examples
///
/// ```
/// use reinhardt_rest_shortcuts::{FieldDescriptor, ModelDescriptor, ShortcutSettings};
/// use reinhardt_rest_shortcuts::routers::DefaultRouter;
/// use reinhardt_rest_shortcuts::urls::register_standard_endpoint;
///
/// let model = ModelDescriptor::builder("BlogPost")
///     .field(FieldDescriptor::scalar("id"))
///     .field(FieldDescriptor::text("title"))
///     .build()
///     .unwrap();
/// let settings = ShortcutSettings::default();
/// let mut router = DefaultRouter::from_settings(&settings);
///
/// register_standard_endpoint(&mut router, &model, None, &settings).unwrap();
/// assert_eq!(router.reverse("blog-post-detail", &[("pk", "1")]).unwrap(), "/blog-post/1/");
/// ```
pub fn register_standard_endpoint(
	router: &mut DefaultRouter,
	model: &ModelDescriptor,
	viewset: Option<ModelViewSet>,
	settings: &ShortcutSettings,
) -> Result<Arc<ModelViewSet>> {
	let viewset = match viewset {
		Some(viewset) => viewset,
		None => create_standard_viewset(model, None, settings)?,
	};
	let viewset = Arc::new(viewset);
	router.register(&endpoint_name(model), viewset.clone(), None)?;
	Ok(viewset)
}

/// [`register_standard_endpoint`] for a type implementing [`Model`]
pub fn register_model<M: Model>(
	router: &mut DefaultRouter,
	settings: &ShortcutSettings,
) -> Result<Arc<ModelViewSet>> {
	let model = M::describe()?;
	register_standard_endpoint(router, &model, None, settings)
}
