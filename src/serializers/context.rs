//! Per-call serializer context
//!
//! Carries the request facts a serializer decides on (method, query parameters,
//! accepted renderer and user), the view's URL keyword arguments and the URL
//! reverser used for hyperlinked fields.

use crate::routers::ReverseUrl;
use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Renderer chosen by content negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Renderer {
	#[default]
	Json,
	/// The HTML browsable API
	BrowsableApi,
	Other,
}

/// The parts of an incoming request that influence serialization
#[derive(Debug, Clone)]
pub struct RequestContext {
	method: Method,
	query_params: HashMap<String, String>,
	accepted_renderer: Renderer,
	user: Option<Value>,
}

impl RequestContext {
	pub fn new(method: Method) -> Self {
		Self {
			method,
			query_params: HashMap::new(),
			accepted_renderer: Renderer::default(),
			user: None,
		}
	}

	pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query_params.insert(name.into(), value.into());
		self
	}

	pub fn with_renderer(mut self, renderer: Renderer) -> Self {
		self.accepted_renderer = renderer;
		self
	}

	/// Set the authenticated user, as the value stored in author/editor fields
	pub fn with_user(mut self, user: impl Into<Value>) -> Self {
		self.user = Some(user.into());
		self
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	pub fn query_param(&self, name: &str) -> Option<&str> {
		self.query_params.get(name).map(String::as_str)
	}

	pub fn accepted_renderer(&self) -> Renderer {
		self.accepted_renderer
	}

	/// Authenticated user, `None` for anonymous requests
	pub fn user(&self) -> Option<&Value> {
		self.user.as_ref().filter(|user| !user.is_null())
	}
}

/// Context passed to `to_representation` and `to_internal_value`
#[derive(Default, Clone)]
pub struct SerializerContext<'a> {
	request: Option<&'a RequestContext>,
	view_kwargs: HashMap<String, String>,
	reverser: Option<&'a dyn ReverseUrl>,
}

impl<'a> SerializerContext<'a> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_request(mut self, request: &'a RequestContext) -> Self {
		self.request = Some(request);
		self
	}

	/// Add a URL keyword argument of the current view, such as `pk`
	pub fn with_view_kwarg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.view_kwargs.insert(name.into(), value.into());
		self
	}

	pub fn with_reverser(mut self, reverser: &'a dyn ReverseUrl) -> Self {
		self.reverser = Some(reverser);
		self
	}

	pub fn request(&self) -> Option<&'a RequestContext> {
		self.request
	}

	pub fn view_kwarg(&self, name: &str) -> Option<&str> {
		self.view_kwargs.get(name).map(String::as_str)
	}

	pub fn reverser(&self) -> Option<&'a dyn ReverseUrl> {
		self.reverser
	}
}

impl fmt::Debug for SerializerContext<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SerializerContext")
			.field("request", &self.request)
			.field("view_kwargs", &self.view_kwargs)
			.field("reverser", &self.reverser.is_some())
			.finish()
	}
}
