use crate::views::{Action, ModelViewSet};
use http::Method;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

/// Route generated for a registered viewset
///
/// Each registration yields a list route (`/{prefix}/`) and a detail route
/// (`/{prefix}/{pk}/`).
#[derive(Debug, Clone)]
pub struct Route {
	pub path: String,
	pub name: String,
	/// Namespace for this route (e.g., "api")
	/// When present, forms "namespace:name"
	pub namespace: Option<String>,
	pub basename: String,
	pub detail: bool,
	pub(super) viewset: Arc<ModelViewSet>,
	pub(super) matcher: Regex,
	pub(super) lookup: Regex,
}

impl Route {
	/// `namespace:name`, or the bare name without a namespace
	pub fn full_name(&self) -> String {
		match &self.namespace {
			Some(ns) => format!("{}:{}", ns, self.name),
			None => self.name.clone(),
		}
	}

	pub fn viewset(&self) -> &Arc<ModelViewSet> {
		&self.viewset
	}

	/// HTTP methods this route answers and the viewset action each one runs
	pub fn method_map(&self) -> Vec<(Method, Action)> {
		self.viewset
			.actions()
			.iter()
			.filter(|action| action.is_detail() == self.detail)
			.map(|action| (action.method(), *action))
			.collect()
	}

	/// Match a request path, returning the percent-decoded URL kwargs
	pub(super) fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let captures = self.matcher.captures(path)?;
		let kwargs = self
			.matcher
			.capture_names()
			.flatten()
			.filter_map(|name| {
				captures.name(name).map(|m| {
					let value = percent_decode_str(m.as_str()).decode_utf8_lossy();
					(name.to_string(), value.into_owned())
				})
			})
			.collect();
		Some(kwargs)
	}

	/// Whether a value is accepted for the lookup parameter
	pub(super) fn accepts_lookup(&self, value: &str) -> bool {
		self.lookup.is_match(value)
	}
}
