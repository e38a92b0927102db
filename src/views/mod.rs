//! Model viewsets and the standard viewset factory
//!
//! A [`ModelViewSet`] bundles the list/detail actions of one model with its
//! serializer, the fields clients may search and order by, the lookup
//! pattern for detail URLs and the generated endpoint documentation.

mod builder;
mod filters;

pub use builder::ViewSetBuilder;
pub use filters::{OrderingTerm, parse_ordering, search_terms};

use crate::docs::ViewSetDoc;
use crate::error::Result;
use crate::model::ModelDescriptor;
use crate::serializers::ModelSerializer;
use crate::settings::ShortcutSettings;
use http::Method;
use std::sync::Arc;

/// Lookup value pattern accepting anything up to the next slash
pub const DEFAULT_LOOKUP_VALUE_REGEX: &str = "[^/]+";

/// Viewset action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
	List,
	Create,
	Retrieve,
	Update,
	PartialUpdate,
	Destroy,
}

impl Action {
	/// Every action of a model viewset
	pub const ALL: [Action; 6] = [
		Action::List,
		Action::Create,
		Action::Retrieve,
		Action::Update,
		Action::PartialUpdate,
		Action::Destroy,
	];

	pub fn name(&self) -> &'static str {
		match self {
			Action::List => "list",
			Action::Create => "create",
			Action::Retrieve => "retrieve",
			Action::Update => "update",
			Action::PartialUpdate => "partial_update",
			Action::Destroy => "destroy",
		}
	}

	pub fn method(&self) -> Method {
		match self {
			Action::List | Action::Retrieve => Method::GET,
			Action::Create => Method::POST,
			Action::Update => Method::PUT,
			Action::PartialUpdate => Method::PATCH,
			Action::Destroy => Method::DELETE,
		}
	}

	/// Whether the action works on a single object (detail route)
	pub fn is_detail(&self) -> bool {
		!matches!(self, Action::List | Action::Create)
	}
}

/// Configured list/detail handler for one model
#[derive(Debug, Clone)]
pub struct ModelViewSet {
	name: String,
	model: Arc<ModelDescriptor>,
	serializer: Arc<ModelSerializer>,
	search_fields: Vec<String>,
	ordering_fields: Vec<String>,
	default_ordering: Vec<OrderingTerm>,
	lookup_field: String,
	lookup_value_regex: String,
	actions: Vec<Action>,
	doc: ViewSetDoc,
	page_size: usize,
}

impl ModelViewSet {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn model(&self) -> &ModelDescriptor {
		&self.model
	}

	pub fn serializer(&self) -> &ModelSerializer {
		&self.serializer
	}

	/// Base name used for route names, taken from the serializer
	pub fn basename(&self) -> &str {
		self.serializer.default_base_name()
	}

	pub fn search_fields(&self) -> &[String] {
		&self.search_fields
	}

	pub fn ordering_fields(&self) -> &[String] {
		&self.ordering_fields
	}

	/// Ordering of the queryset when the client does not ask for one
	pub fn default_ordering(&self) -> &[OrderingTerm] {
		&self.default_ordering
	}

	pub fn lookup_field(&self) -> &str {
		&self.lookup_field
	}

	pub fn lookup_value_regex(&self) -> &str {
		&self.lookup_value_regex
	}

	pub fn actions(&self) -> &[Action] {
		&self.actions
	}

	pub fn doc(&self) -> &ViewSetDoc {
		&self.doc
	}

	pub fn page_size(&self) -> usize {
		self.page_size
	}

	/// Rendered endpoint description
	pub fn description(&self) -> Option<String> {
		self.doc.render()
	}

	/// Ordering for a request's `ordering` parameter value
	///
	/// Falls back to the default ordering when the parameter is absent or
	/// names no orderable field.
	pub fn resolve_ordering(&self, param: Option<&str>) -> Vec<OrderingTerm> {
		let requested = param
			.map(|value| parse_ordering(value, &self.ordering_fields))
			.unwrap_or_default();
		if requested.is_empty() {
			self.default_ordering.clone()
		} else {
			requested
		}
	}

	/// Search terms for a request's `search` parameter value
	///
	/// Empty when the viewset has no search fields.
	pub fn search_terms(&self, param: Option<&str>) -> Vec<String> {
		match param {
			Some(value) if !self.search_fields.is_empty() => search_terms(value),
			_ => Vec::new(),
		}
	}
}

/// Names of fields suitable for searching viewset results, in declaration order
pub fn get_fields_suitable_for_search(model: &ModelDescriptor) -> Vec<String> {
	model
		.searchable_field_names()
		.into_iter()
		.map(str::to_string)
		.collect()
}

/// Names of fields suitable for ordering viewset results, in declaration order
pub fn get_fields_suitable_for_ordering(model: &ModelDescriptor) -> Vec<String> {
	model
		.orderable_field_names()
		.into_iter()
		.map(str::to_string)
		.collect()
}

/// Viewset for `model` following the standard conventions
///
/// Uses `serializer` or the standard serializer, enables search and ordering
/// on the eligible fields, orders by primary key (if any) by default and documents
/// search, ordering and pagination.
///
/// # Examples
///
/// ```
/// use reinhardt_rest_shortcuts::{FieldDescriptor, ModelDescriptor, ShortcutSettings};
/// use reinhardt_rest_shortcuts::views::create_standard_viewset;
///
/// let model = ModelDescriptor::builder("Article")
///     .field(FieldDescriptor::scalar("id"))
///     .field(FieldDescriptor::text("name"))
///     .field(FieldDescriptor::date("created_at"))
///     .field(FieldDescriptor::relation("owner", "User"))
///     .build()
///     .unwrap();
/// let viewset = create_standard_viewset(&model, None, &ShortcutSettings::default()).unwrap();
/// assert_eq!(viewset.name(), "ArticlesViewSet");
/// assert_eq!(viewset.search_fields(), ["name"]);
/// assert_eq!(viewset.ordering_fields(), ["id", "created_at"]);
/// ```
pub fn create_standard_viewset(
	model: &ModelDescriptor,
	serializer: Option<ModelSerializer>,
	settings: &ShortcutSettings,
) -> Result<ModelViewSet> {
	let builder = ViewSetBuilder::new(model, settings);
	match serializer {
		Some(serializer) => builder.serializer(serializer),
		None => builder,
	}
	.build()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::FieldDescriptor;
	use crate::serializers::create_standard_serializer;
	use rstest::{fixture, rstest};

	#[fixture]
	fn model() -> ModelDescriptor {
		ModelDescriptor::builder("BlogPost")
			.field(FieldDescriptor::scalar("id"))
			.field(FieldDescriptor::text("name"))
			.field(FieldDescriptor::text("body").exclude_from_search())
			.field(FieldDescriptor::date("created_at"))
			.field(FieldDescriptor::relation("owner", "User"))
			.field(FieldDescriptor::from_type_name("payload", "serde_json::Value"))
			.build()
			.unwrap()
	}

	#[rstest]
	fn test_action_routing_metadata() {
		let detail: Vec<&str> = Action::ALL
			.iter()
			.filter(|a| a.is_detail())
			.map(|a| a.name())
			.collect();
		assert_eq!(detail, vec!["retrieve", "update", "partial_update", "destroy"]);
		assert_eq!(Action::PartialUpdate.method(), Method::PATCH);
		assert_eq!(Action::Create.method(), Method::POST);
	}

	#[rstest]
	fn test_suitable_fields(model: ModelDescriptor) {
		assert_eq!(get_fields_suitable_for_search(&model), vec!["name"]);
		assert_eq!(get_fields_suitable_for_ordering(&model), vec!["id", "created_at"]);
	}

	#[rstest]
	fn test_standard_viewset(model: ModelDescriptor) {
		let viewset = create_standard_viewset(&model, None, &ShortcutSettings::default()).unwrap();
		assert_eq!(viewset.name(), "BlogPostsViewSet");
		assert_eq!(viewset.serializer().name(), "BlogPostSerializer");
		assert_eq!(viewset.basename(), "blog-post");
		assert_eq!(viewset.search_fields(), ["name"]);
		assert_eq!(viewset.ordering_fields(), ["id", "created_at"]);
		assert_eq!(viewset.default_ordering(), [OrderingTerm::asc("id")]);
		assert_eq!(viewset.lookup_field(), "pk");
		assert_eq!(viewset.lookup_value_regex(), "[^/]+");
		assert_eq!(viewset.actions(), Action::ALL);
	}

	#[rstest]
	fn test_standard_viewset_description(model: ModelDescriptor) {
		let settings = ShortcutSettings::default().with_page_size(20);
		let viewset = create_standard_viewset(&model, None, &settings).unwrap();
		let description = viewset.description().unwrap();
		assert!(description.starts_with("This is blog posts API endpoint.\n\n"));
		assert!(description.contains("You can use following fields for search: name.\n"));
		assert!(description.contains("You can use following fields for ordering: id, created_at.\n"));
		assert!(description.contains("?ordering=id,created_at.\n"));
		assert!(description.ends_with("Page size is 20.\n"));
	}

	#[rstest]
	fn test_custom_serializer_is_used(model: ModelDescriptor) {
		let serializer = create_standard_serializer(&model, &ShortcutSettings::default())
			.with_name("CustomSerializer");
		let viewset =
			create_standard_viewset(&model, Some(serializer), &ShortcutSettings::default()).unwrap();
		assert_eq!(viewset.serializer().name(), "CustomSerializer");
	}

	#[rstest]
	#[case(None, vec![OrderingTerm::asc("id")])]
	#[case(Some("-created_at"), vec![OrderingTerm::desc("created_at")])]
	#[case(Some("name"), vec![OrderingTerm::asc("id")])]
	#[case(Some("created_at,-id"), vec![OrderingTerm::asc("created_at"), OrderingTerm::desc("id")])]
	fn test_resolve_ordering(
		model: ModelDescriptor,
		#[case] param: Option<&str>,
		#[case] expected: Vec<OrderingTerm>,
	) {
		let viewset = create_standard_viewset(&model, None, &ShortcutSettings::default()).unwrap();
		assert_eq!(viewset.resolve_ordering(param), expected);
	}

	#[rstest]
	fn test_search_terms_need_search_fields() {
		let model = ModelDescriptor::builder("Counter")
			.field(FieldDescriptor::scalar("id"))
			.build()
			.unwrap();
		let viewset = create_standard_viewset(&model, None, &ShortcutSettings::default()).unwrap();
		assert!(viewset.search_terms(Some("anything")).is_empty());
		assert!(viewset.description().unwrap().find("?search=").is_none());
	}
}
