//! Router holding the route table built by viewset registrations
//!
//! Similar to Django REST Framework's `DefaultRouter`: registering a viewset
//! under a prefix creates a list route and a detail route, named
//! `{basename}-list` and `{basename}-detail`.
//!
//! ```
//! use reinhardt_rest_shortcuts::{FieldDescriptor, ModelDescriptor, ShortcutSettings};
//! use reinhardt_rest_shortcuts::routers::DefaultRouter;
//! use reinhardt_rest_shortcuts::views::create_standard_viewset;
//! use std::sync::Arc;
//!
//! let model = ModelDescriptor::builder("Article")
//!     .field(FieldDescriptor::scalar("id"))
//!     .build()
//!     .unwrap();
//! let viewset = create_standard_viewset(&model, None, &ShortcutSettings::default()).unwrap();
//!
//! let mut router = DefaultRouter::new();
//! router.register("articles", Arc::new(viewset), None).unwrap();
//! assert_eq!(router.reverse("article-detail", &[("pk", "1")]).unwrap(), "/articles/1/");
//! ```

mod route;

pub use route::Route;

use crate::error::{Result, ShortcutError};
use crate::settings::ShortcutSettings;
use crate::views::{Action, ModelViewSet};
use http::Method;
use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

/// Characters escaped in a reversed lookup value: all but RFC 3986 unreserved
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

/// Name-to-URL resolution used by hyperlinked serializer fields
pub trait ReverseUrl {
	fn reverse_url(&self, name: &str, params: &[(&str, &str)]) -> Result<String>;
}

/// A viewset registered under a URL prefix
#[derive(Debug, Clone)]
pub struct Registration {
	pub prefix: String,
	pub basename: String,
	pub viewset: Arc<ModelViewSet>,
}

/// Route matched by [`DefaultRouter::resolve`]
#[derive(Debug, Clone)]
pub struct ResolvedRoute<'r> {
	pub route: &'r Route,
	pub kwargs: HashMap<String, String>,
}

impl ResolvedRoute<'_> {
	/// Viewset action handling `method` on this route, if any
	pub fn action(&self, method: &Method) -> Option<Action> {
		self.route
			.method_map()
			.into_iter()
			.find_map(|(m, action)| (m == *method).then_some(action))
	}
}

/// Default router implementation
#[derive(Debug, Clone, Default)]
pub struct DefaultRouter {
	namespace: Option<String>,
	registry: Vec<Registration>,
	routes: Vec<Route>,
}

impl DefaultRouter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Router whose route names are prefixed with `namespace:`
	pub fn with_namespace(namespace: impl Into<String>) -> Self {
		Self {
			namespace: Some(namespace.into()),
			..Self::default()
		}
	}

	/// Router using the configured API URL namespace
	pub fn from_settings(settings: &ShortcutSettings) -> Self {
		match &settings.api_url_namespace {
			Some(namespace) => Self::with_namespace(namespace.clone()),
			None => Self::new(),
		}
	}

	pub fn namespace(&self) -> Option<&str> {
		self.namespace.as_deref()
	}

	pub fn registry(&self) -> &[Registration] {
		&self.registry
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// Register a viewset, creating its list and detail routes
	///
	/// `basename` defaults to the viewset's own. A basename can be registered
	/// only once; a repeated one is rejected and leaves the router unchanged.
	pub fn register(
		&mut self,
		prefix: &str,
		viewset: Arc<ModelViewSet>,
		basename: Option<&str>,
	) -> Result<()> {
		let prefix = prefix.trim_matches('/').to_string();
		let basename = basename.unwrap_or(viewset.basename()).to_string();

		if self.registry.iter().any(|r| r.basename == basename) {
			tracing::warn!("Rejected duplicate registration of basename `{}`", basename);
			return Err(ShortcutError::DuplicateBasename(basename));
		}

		let lookup_field = viewset.lookup_field();
		let lookup_regex = viewset.lookup_value_regex();
		let invalid = |source| ShortcutError::InvalidLookupRegex {
			pattern: lookup_regex.to_string(),
			source,
		};

		let base = if prefix.is_empty() {
			"/".to_string()
		} else {
			format!("/{}/", prefix)
		};
		let escaped = regex::escape(&base);
		let list_matcher = Regex::new(&format!("^{}$", escaped)).map_err(invalid)?;
		let detail_matcher = Regex::new(&format!(
			"^{}(?P<{}>{})/$",
			escaped, lookup_field, lookup_regex
		))
		.map_err(invalid)?;
		let lookup = Regex::new(&format!("^(?:{})$", lookup_regex)).map_err(invalid)?;

		// List/Create endpoint: /prefix/
		self.routes.push(Route {
			path: base.clone(),
			name: format!("{}-list", basename),
			namespace: self.namespace.clone(),
			basename: basename.clone(),
			detail: false,
			viewset: viewset.clone(),
			matcher: list_matcher,
			lookup: lookup.clone(),
		});

		// Detail endpoint: /prefix/{lookup_field}/
		self.routes.push(Route {
			path: format!("{}{{{}}}/", base, lookup_field),
			name: format!("{}-detail", basename),
			namespace: self.namespace.clone(),
			basename: basename.clone(),
			detail: true,
			viewset: viewset.clone(),
			matcher: detail_matcher,
			lookup,
		});

		tracing::debug!(
			"Registered {} at {} as `{}`",
			viewset.name(),
			base,
			basename
		);
		self.registry.push(Registration {
			prefix,
			basename,
			viewset,
		});
		Ok(())
	}

	/// Reverse a route name (`"basename-detail"` or `"namespace:basename-detail"`) to a path
	///
	/// The lookup value is percent-encoded into its path segment.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
		let route = self
			.routes
			.iter()
			.find(|r| r.full_name() == name)
			.ok_or_else(|| ShortcutError::NoReverseMatch(name.to_string()))?;

		if !route.detail {
			return Ok(route.path.clone());
		}

		let lookup_field = route.viewset.lookup_field();
		let value = params
			.iter()
			.find_map(|(k, v)| (*k == lookup_field).then_some(*v))
			.ok_or_else(|| ShortcutError::MissingParameter {
				route: name.to_string(),
				param: lookup_field.to_string(),
			})?;
		if !route.accepts_lookup(value) {
			return Err(ShortcutError::NoReverseMatch(format!(
				"{} with {}={}",
				name, lookup_field, value
			)));
		}
		let encoded = utf8_percent_encode(value, PATH_SEGMENT).to_string();
		Ok(route
			.path
			.replace(&format!("{{{}}}", lookup_field), &encoded))
	}

	/// Find the route matching a request path
	pub fn resolve(&self, path: &str) -> Option<ResolvedRoute<'_>> {
		self.routes.iter().find_map(|route| {
			route
				.matches(path)
				.map(|kwargs| ResolvedRoute { route, kwargs })
		})
	}

	/// Registered prefixes mapped to their list URLs, as shown by the API root view
	pub fn api_root(&self) -> IndexMap<String, String> {
		self.routes
			.iter()
			.filter(|r| !r.detail)
			.filter_map(|route| {
				self.registry
					.iter()
					.find(|reg| reg.basename == route.basename)
					.map(|reg| (reg.prefix.clone(), route.path.clone()))
			})
			.collect()
	}
}

impl ReverseUrl for DefaultRouter {
	fn reverse_url(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
		self.reverse(name, params)
	}
}
