//! Model serializers and the standard serializer factory
//!
//! [`create_standard_serializer`] declares every model field plus a `url`
//! hyperlinked identity field, renames `snake_case` output names to
//! `camelCase` for JavaScript clients and drops URL fields from output unless
//! the client asks for them.

mod context;
mod field;
mod lookup;

pub use context::{Renderer, RequestContext, SerializerContext};
pub use field::{DEFAULT_LOOKUP_FIELD, SerializerField, SerializerFieldKind};
pub use lookup::{get_entity_pk, get_optional_field_value, get_required_field_value};

use crate::error::{Result, ShortcutError, json_type_name};
use crate::inflection::{dasherize, underscore};
use crate::model::ModelDescriptor;
use crate::settings::ShortcutSettings;
use http::Method;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::{Arc, LazyLock};

/// Name of the hyperlinked identity field added by the standard serializer
pub const URL_FIELD_NAME: &str = "url";

static SNAKE_SEGMENT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new("_(.)").expect("SNAKE_SEGMENT: invalid regex pattern"));

/// Detail view name the router registers for a base name
///
/// # Examples
///
/// ```
/// use reinhardt_rest_shortcuts::serializers::generate_detail_view_name;
///
/// assert_eq!(generate_detail_view_name("foo", None), "foo-detail");
/// assert_eq!(generate_detail_view_name("foo", Some("bar")), "bar:foo-detail");
/// ```
pub fn generate_detail_view_name(base_name: &str, namespace: Option<&str>) -> String {
	match namespace {
		Some(namespace) => format!("{}:{}-detail", namespace, base_name),
		None => format!("{}-detail", base_name),
	}
}

/// Base name used when a model's viewset is registered with a router
///
/// ```
/// use reinhardt_rest_shortcuts::serializers::generate_serializer_base_name;
///
/// assert_eq!(generate_serializer_base_name("BlogPost"), "blog-post");
/// ```
pub fn generate_serializer_base_name(model_name: &str) -> String {
	dasherize(&underscore(model_name))
}

/// `created_at` -> `createdAt`; every `_x` becomes `X`
pub fn js_friendly_name(name: &str) -> String {
	SNAKE_SEGMENT
		.replace_all(name, |caps: &Captures<'_>| caps[1].to_uppercase())
		.into_owned()
}

/// Move a serializer field to a new output name, optionally relabeling it
///
/// The field keeps its position in the output.
pub fn rename_serializer_field(
	serializer: &mut ModelSerializer,
	source_name: &str,
	target_name: &str,
	display_name: Option<&str>,
) -> Result<()> {
	let (index, _, mut field) = serializer
		.fields
		.shift_remove_full(source_name)
		.ok_or_else(|| ShortcutError::UnknownField {
			owner: serializer.name.clone(),
			field: source_name.to_string(),
		})?;
	if let Some(label) = display_name {
		field.set_label(label.to_string());
	}
	serializer.fields.shift_insert(index, target_name.to_string(), field);
	Ok(())
}

/// Serializer configuration for one model
#[derive(Debug, Clone)]
pub struct ModelSerializer {
	name: String,
	model: Arc<ModelDescriptor>,
	default_base_name: String,
	fields: IndexMap<String, SerializerField>,
	optimize_url_fields: bool,
	explicit_url_field_names: Vec<String>,
	force_urls_param: String,
	editor_field_name: Option<String>,
	author_field_name: Option<String>,
}

impl ModelSerializer {
	/// Serializer declaring every model field under its own name, in
	/// declaration order
	pub fn for_model(model: &ModelDescriptor) -> Self {
		let fields = model
			.fields()
			.iter()
			.map(|field| (field.name().to_string(), SerializerField::from_model_field(field)))
			.collect();
		Self {
			name: format!("{}Serializer", model.name()),
			model: Arc::new(model.clone()),
			default_base_name: generate_serializer_base_name(model.name()),
			fields,
			optimize_url_fields: false,
			explicit_url_field_names: Vec::new(),
			force_urls_param: ShortcutSettings::default().force_urls_param,
			editor_field_name: None,
			author_field_name: None,
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	/// Insert a field right after the primary key, or first without one
	pub fn with_field_after_pk(mut self, name: impl Into<String>, field: SerializerField) -> Self {
		let index = self
			.model
			.primary_key()
			.and_then(|pk| self.fields.values().position(|f| f.source() == pk))
			.map_or(0, |i| i + 1);
		self.fields.shift_insert(index, name.into(), field);
		self
	}

	/// Append a field
	pub fn with_field(mut self, name: impl Into<String>, field: SerializerField) -> Self {
		self.fields.insert(name.into(), field);
		self
	}

	/// Reverse hyperlinked identity fields through `lookup_field`
	///
	/// Keeps the `url` field in step with the detail route of a viewset whose
	/// lookup field is not `pk`.
	pub fn with_lookup_field(mut self, lookup_field: &str) -> Self {
		for field in self.fields.values_mut() {
			if matches!(field.kind(), SerializerFieldKind::HyperlinkedIdentity { .. }) {
				field.set_lookup_field(lookup_field.to_string());
			}
		}
		self
	}

	/// Drop a field from the output
	pub fn without_field(mut self, name: &str) -> Self {
		self.fields.shift_remove(name);
		self
	}

	/// Rename every output field containing `_` to its camelCase form
	pub fn with_js_friendly_names(mut self) -> Self {
		self.fields = self
			.fields
			.into_iter()
			.map(|(name, field)| (js_friendly_name(&name), field))
			.collect();
		self
	}

	/// Strip URL fields from output unless forced or rendered for the browsable API
	pub fn with_url_field_optimization(mut self, force_urls_param: impl Into<String>) -> Self {
		self.optimize_url_fields = true;
		self.force_urls_param = force_urls_param.into();
		self
	}

	/// Treat the named output fields as URL fields for optimization
	pub fn with_explicit_url_fields<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.explicit_url_field_names
			.extend(names.into_iter().map(Into::into));
		self
	}

	/// Set this model field to the request user on `PUT` and `PATCH`
	pub fn with_editor_field(mut self, field_name: impl Into<String>) -> Self {
		self.editor_field_name = Some(field_name.into());
		self
	}

	/// Set this model field to the request user on `POST`
	pub fn with_author_field(mut self, field_name: impl Into<String>) -> Self {
		self.author_field_name = Some(field_name.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn model(&self) -> &ModelDescriptor {
		&self.model
	}

	/// Base name the serializer's viewset is registered under
	pub fn default_base_name(&self) -> &str {
		&self.default_base_name
	}

	pub fn fields(&self) -> &IndexMap<String, SerializerField> {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&SerializerField> {
		self.fields.get(name)
	}

	/// Output names of every declared field
	pub fn field_names(&self) -> Vec<&str> {
		self.fields.keys().map(String::as_str).collect()
	}

	pub fn editor_field_name(&self) -> Option<&str> {
		self.editor_field_name.as_deref()
	}

	pub fn author_field_name(&self) -> Option<&str> {
		self.author_field_name.as_deref()
	}

	/// Whether URL fields are dropped for this context
	///
	/// An explicit `forceUrls` query parameter wins (anything but `"false"`
	/// keeps URLs); otherwise URLs are kept only for the browsable API.
	pub fn removes_url_fields(&self, ctx: &SerializerContext<'_>) -> bool {
		if !self.optimize_url_fields {
			return false;
		}
		match ctx.request() {
			Some(request) => match request.query_param(&self.force_urls_param) {
				Some(force) => force == "false",
				None => request.accepted_renderer() != Renderer::BrowsableApi,
			},
			None => true,
		}
	}

	/// Output fields active for this context, in declaration order
	pub fn active_fields<'s>(
		&'s self,
		ctx: &SerializerContext<'_>,
	) -> impl Iterator<Item = (&'s str, &'s SerializerField)> + 's {
		let remove_urls = self.removes_url_fields(ctx);
		self.fields.iter().filter_map(move |(name, field)| {
			let is_url = field.is_url_field() || self.explicit_url_field_names.contains(name);
			(!(remove_urls && is_url)).then_some((name.as_str(), field))
		})
	}

	/// Serialize a record into a JSON object holding the active fields
	///
	/// Attributes missing from the record render as `null`. URL fields are
	/// reversed through the context's reverser.
	pub fn to_representation<T: Serialize>(
		&self,
		record: &T,
		ctx: &SerializerContext<'_>,
	) -> Result<Value> {
		let source = match serde_json::to_value(record)? {
			Value::Object(map) => map,
			other => return Err(ShortcutError::NotAnObject(json_type_name(&other))),
		};

		let mut output = Map::new();
		for (name, field) in self.active_fields(ctx) {
			let value = match field.kind() {
				SerializerFieldKind::Attribute(_) | SerializerFieldKind::PrimaryKeyRelated { .. } => {
					source.get(field.source()).cloned().unwrap_or(Value::Null)
				}
				SerializerFieldKind::HyperlinkedIdentity {
					view_name,
					lookup_field,
				} => {
					let attribute = if lookup_field == DEFAULT_LOOKUP_FIELD {
						self.model.primary_key()
					} else {
						Some(lookup_field.as_str())
					};
					let value = attribute.and_then(|attr| source.get(attr));
					self.reverse_url(name, view_name, lookup_field, value, ctx)?
				}
				SerializerFieldKind::HyperlinkedRelated {
					view_name,
					lookup_field,
				} => {
					let value = source.get(field.source());
					self.reverse_url(name, view_name, lookup_field, value, ctx)?
				}
			};
			output.insert(name.to_string(), value);
		}
		Ok(Value::Object(output))
	}

	fn reverse_url(
		&self,
		field_name: &str,
		view_name: &str,
		lookup_field: &str,
		value: Option<&Value>,
		ctx: &SerializerContext<'_>,
	) -> Result<Value> {
		let value = match value {
			None | Some(Value::Null) => return Ok(Value::Null),
			Some(Value::String(s)) => s.clone(),
			Some(other) => other.to_string(),
		};
		let reverser = ctx
			.reverser()
			.ok_or_else(|| ShortcutError::MissingReverser(field_name.to_string()))?;
		let url = reverser.reverse_url(view_name, &[(lookup_field, value.as_str())])?;
		Ok(Value::String(url))
	}

	/// Map incoming data to model field values
	///
	/// Output names are translated back to model field names. Read-only and
	/// undeclared keys are ignored. The request user is stamped into the
	/// author field on `POST` and the editor field on `PUT`/`PATCH`.
	pub fn to_internal_value(
		&self,
		data: &Value,
		ctx: &SerializerContext<'_>,
	) -> Result<Map<String, Value>> {
		let Value::Object(data) = data else {
			return Err(ShortcutError::NotAnObject(json_type_name(data)));
		};

		let mut internal = Map::new();
		for (key, value) in data {
			match self.fields.get(key) {
				Some(field) if !field.is_read_only() => {
					internal.insert(field.source().to_string(), value.clone());
				}
				Some(_) => {}
				None => tracing::debug!("{}: ignoring undeclared input `{}`", self.name, key),
			}
		}

		if let Some(request) = ctx.request()
			&& let Some(user) = request.user()
		{
			let method = request.method();
			let stamped = if *method == Method::PUT || *method == Method::PATCH {
				self.editor_field_name.as_deref()
			} else if *method == Method::POST {
				self.author_field_name.as_deref()
			} else {
				None
			};
			if let Some(field_name) = stamped {
				internal.insert(field_name.to_string(), user.clone());
			}
		}

		Ok(internal)
	}
}

/// Serializer for `model` following the standard conventions
///
/// Named `{Model}Serializer`, it declares all model fields and a `url` field
/// linking to the detail view, with camelCase output names and URL-field
/// optimization. A model without a primary key gets no `url` field.
///
/// # Examples
///
/// ```
/// use reinhardt_rest_shortcuts::{FieldDescriptor, ModelDescriptor, ShortcutSettings};
/// use reinhardt_rest_shortcuts::serializers::create_standard_serializer;
///
/// let model = ModelDescriptor::builder("BlogPost")
///     .field(FieldDescriptor::scalar("id"))
///     .field(FieldDescriptor::date("created_at"))
///     .build()
///     .unwrap();
/// let serializer = create_standard_serializer(&model, &ShortcutSettings::default());
/// assert_eq!(serializer.name(), "BlogPostSerializer");
/// assert_eq!(serializer.default_base_name(), "blog-post");
/// assert_eq!(serializer.field_names(), vec!["id", "url", "createdAt"]);
/// ```
pub fn create_standard_serializer(
	model: &ModelDescriptor,
	settings: &ShortcutSettings,
) -> ModelSerializer {
	standard_serializer(model, settings, DEFAULT_LOOKUP_FIELD)
}

/// Standard serializer whose `url` field reverses through `lookup_field`
///
/// The `url` field is left out when the lookup cannot be filled from a
/// record: `pk` on a model without primary key, or a field the model lacks.
pub(crate) fn standard_serializer(
	model: &ModelDescriptor,
	settings: &ShortcutSettings,
	lookup_field: &str,
) -> ModelSerializer {
	let mut serializer = ModelSerializer::for_model(model);
	let linkable = if lookup_field == DEFAULT_LOOKUP_FIELD {
		model.primary_key().is_some()
	} else {
		model.has_field(lookup_field)
	};
	if linkable {
		let view_name = generate_detail_view_name(
			serializer.default_base_name(),
			settings.api_url_namespace.as_deref(),
		);
		let url = SerializerField::hyperlinked_identity(view_name).with_lookup_field(lookup_field);
		serializer = serializer.with_field_after_pk(URL_FIELD_NAME, url);
	}
	let serializer = serializer
		.with_js_friendly_names()
		.with_url_field_optimization(settings.force_urls_param.clone());
	tracing::debug!(
		"Generated {} with fields [{}]",
		serializer.name(),
		serializer.field_names().join(", ")
	);
	serializer
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::FieldDescriptor;
	use crate::routers::ReverseUrl;
	use rstest::{fixture, rstest};
	use serde_json::json;

	struct StaticReverser;

	impl ReverseUrl for StaticReverser {
		fn reverse_url(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
			let (key, value) = params.first().copied().unwrap_or(("", ""));
			Ok(format!("/{}/{}={}/", name, key, value))
		}
	}

	#[fixture]
	fn model() -> ModelDescriptor {
		ModelDescriptor::builder("Article")
			.field(FieldDescriptor::text("name"))
			.field(FieldDescriptor::date("created_at"))
			.field(FieldDescriptor::relation("owner", "User"))
			.field(FieldDescriptor::scalar("id"))
			.build()
			.unwrap()
	}

	#[rstest]
	#[case("created_at", "createdAt")]
	#[case("a_b_c", "aBC")]
	#[case("_private", "Private")]
	#[case("plain", "plain")]
	fn test_js_friendly_name(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(js_friendly_name(input), expected);
	}

	#[rstest]
	fn test_for_model_keeps_declaration_order(model: ModelDescriptor) {
		let serializer = ModelSerializer::for_model(&model);
		assert_eq!(serializer.field_names(), vec!["name", "created_at", "owner", "id"]);
	}

	#[rstest]
	fn test_standard_serializer_fields(model: ModelDescriptor) {
		let serializer = create_standard_serializer(&model, &ShortcutSettings::default());
		assert_eq!(serializer.name(), "ArticleSerializer");
		assert_eq!(
			serializer.field_names(),
			vec!["name", "createdAt", "owner", "id", "url"]
		);
		assert_eq!(serializer.field("createdAt").unwrap().source(), "created_at");
		assert_eq!(
			serializer.field("url").unwrap().kind(),
			&SerializerFieldKind::HyperlinkedIdentity {
				view_name: "article-detail".to_string(),
				lookup_field: "pk".to_string(),
			}
		);
	}

	#[rstest]
	fn test_standard_serializer_without_primary_key() {
		let model = ModelDescriptor::builder("Entry")
			.field(FieldDescriptor::text("name"))
			.field(FieldDescriptor::date("created_at"))
			.build()
			.unwrap();
		let settings = ShortcutSettings::default();

		let serializer = create_standard_serializer(&model, &settings);
		assert_eq!(serializer.field_names(), vec!["name", "createdAt"]);

		let by_name = standard_serializer(&model, &settings, "name");
		assert_eq!(by_name.field_names(), vec!["url", "name", "createdAt"]);
		let missing = standard_serializer(&model, &settings, "slug");
		assert!(missing.field("url").is_none());
	}

	#[rstest]
	fn test_standard_serializer_uses_namespace(model: ModelDescriptor) {
		let settings = ShortcutSettings::default().with_api_url_namespace("api");
		let serializer = create_standard_serializer(&model, &settings);
		assert_eq!(
			serializer.field("url").unwrap().kind(),
			&SerializerFieldKind::HyperlinkedIdentity {
				view_name: "api:article-detail".to_string(),
				lookup_field: "pk".to_string(),
			}
		);
	}

	#[rstest]
	fn test_regeneration_is_stable(model: ModelDescriptor) {
		let settings = ShortcutSettings::default();
		let first = create_standard_serializer(&model, &settings);
		let second = create_standard_serializer(&model, &settings);
		assert_eq!(first.field_names(), second.field_names());
	}

	#[rstest]
	fn test_rename_moves_field(model: ModelDescriptor) {
		let mut serializer = ModelSerializer::for_model(&model);
		let original = serializer.field("name").cloned().unwrap();
		rename_serializer_field(&mut serializer, "name", "title", None).unwrap();
		assert!(serializer.field("name").is_none());
		assert_eq!(serializer.field("title"), Some(&original));
		assert_eq!(serializer.field_names(), vec!["title", "created_at", "owner", "id"]);
	}

	#[rstest]
	fn test_rename_updates_label(model: ModelDescriptor) {
		let mut serializer = ModelSerializer::for_model(&model);
		rename_serializer_field(&mut serializer, "owner", "author", Some("Author")).unwrap();
		assert_eq!(serializer.field("author").unwrap().label(), Some("Author"));
	}

	#[rstest]
	fn test_rename_unknown_field(model: ModelDescriptor) {
		let mut serializer = ModelSerializer::for_model(&model);
		let result = rename_serializer_field(&mut serializer, "missing", "x", None);
		assert!(matches!(result, Err(ShortcutError::UnknownField { .. })));
	}

	fn url_serializer(model: &ModelDescriptor) -> ModelSerializer {
		ModelSerializer::for_model(model)
			.with_field("id_field", SerializerField::hyperlinked_identity("foo"))
			.with_field("related_field", SerializerField::hyperlinked_related("owner", "foo"))
			.with_url_field_optimization("forceUrls")
	}

	#[rstest]
	fn test_url_fields_removed_by_default(model: ModelDescriptor) {
		let serializer = url_serializer(&model);
		let ctx = SerializerContext::new();
		assert_eq!(serializer.active_fields(&ctx).count(), 4);
	}

	#[rstest]
	#[case(Some("true"), Renderer::Json, 6)]
	#[case(Some("yes"), Renderer::Json, 6)]
	#[case(Some("false"), Renderer::BrowsableApi, 4)]
	#[case(None, Renderer::BrowsableApi, 6)]
	#[case(None, Renderer::Json, 4)]
	#[case(None, Renderer::Other, 4)]
	fn test_url_field_optimization(
		model: ModelDescriptor,
		#[case] force_urls: Option<&str>,
		#[case] renderer: Renderer,
		#[case] expected: usize,
	) {
		let serializer = url_serializer(&model);
		let mut request = RequestContext::new(Method::GET).with_renderer(renderer);
		if let Some(value) = force_urls {
			request = request.with_query_param("forceUrls", value);
		}
		let ctx = SerializerContext::new().with_request(&request);
		assert_eq!(serializer.active_fields(&ctx).count(), expected);
	}

	#[rstest]
	fn test_explicit_url_fields_are_removed(model: ModelDescriptor) {
		let serializer = url_serializer(&model).with_explicit_url_fields(["name"]);
		let ctx = SerializerContext::new();
		let names: Vec<&str> = serializer.active_fields(&ctx).map(|(n, _)| n).collect();
		assert_eq!(names, vec!["created_at", "owner", "id"]);
	}

	#[rstest]
	fn test_no_optimization_keeps_url_fields(model: ModelDescriptor) {
		let serializer = ModelSerializer::for_model(&model)
			.with_field("link", SerializerField::hyperlinked_identity("foo"));
		assert_eq!(serializer.active_fields(&SerializerContext::new()).count(), 5);
	}

	#[derive(Serialize)]
	struct Article {
		id: i64,
		name: String,
		created_at: String,
		owner: Option<i64>,
	}

	fn article() -> Article {
		Article {
			id: 7,
			name: "Hello".to_string(),
			created_at: "2024-01-01".to_string(),
			owner: Some(3),
		}
	}

	#[rstest]
	fn test_to_representation_without_urls(model: ModelDescriptor) {
		let serializer = create_standard_serializer(&model, &ShortcutSettings::default());
		let value = serializer
			.to_representation(&article(), &SerializerContext::new())
			.unwrap();
		assert_eq!(
			value,
			json!({"id": 7, "name": "Hello", "createdAt": "2024-01-01", "owner": 3})
		);
	}

	#[rstest]
	fn test_to_representation_with_urls(model: ModelDescriptor) {
		let serializer = create_standard_serializer(&model, &ShortcutSettings::default());
		let request = RequestContext::new(Method::GET).with_renderer(Renderer::BrowsableApi);
		let reverser = StaticReverser;
		let ctx = SerializerContext::new()
			.with_request(&request)
			.with_reverser(&reverser);
		let value = serializer.to_representation(&article(), &ctx).unwrap();
		assert_eq!(value["url"], json!("/article-detail/pk=7/"));
	}

	#[rstest]
	fn test_url_reverses_through_lookup_field(model: ModelDescriptor) {
		let serializer =
			create_standard_serializer(&model, &ShortcutSettings::default()).with_lookup_field("name");
		let request = RequestContext::new(Method::GET).with_query_param("forceUrls", "true");
		let reverser = StaticReverser;
		let ctx = SerializerContext::new()
			.with_request(&request)
			.with_reverser(&reverser);
		let value = serializer.to_representation(&article(), &ctx).unwrap();
		assert_eq!(value["url"], json!("/article-detail/name=Hello/"));
	}

	#[rstest]
	fn test_related_url_uses_own_value(model: ModelDescriptor) {
		let serializer = ModelSerializer::for_model(&model).with_field(
			"owner_url",
			SerializerField::hyperlinked_related("owner", "user-detail").with_lookup_field("uuid"),
		);
		let reverser = StaticReverser;
		let ctx = SerializerContext::new().with_reverser(&reverser);
		let value = serializer.to_representation(&article(), &ctx).unwrap();
		assert_eq!(value["owner_url"], json!("/user-detail/uuid=3/"));
	}

	#[rstest]
	fn test_to_representation_needs_reverser_for_urls(model: ModelDescriptor) {
		let serializer = create_standard_serializer(&model, &ShortcutSettings::default());
		let request = RequestContext::new(Method::GET).with_query_param("forceUrls", "true");
		let ctx = SerializerContext::new().with_request(&request);
		let result = serializer.to_representation(&article(), &ctx);
		assert!(matches!(result, Err(ShortcutError::MissingReverser(_))));
	}

	#[rstest]
	fn test_to_representation_rejects_non_objects(model: ModelDescriptor) {
		let serializer = ModelSerializer::for_model(&model);
		let result = serializer.to_representation(&vec![1, 2], &SerializerContext::new());
		assert!(matches!(result, Err(ShortcutError::NotAnObject("array"))));
	}

	#[rstest]
	fn test_to_internal_value_maps_names_back(model: ModelDescriptor) {
		let serializer = create_standard_serializer(&model, &ShortcutSettings::default());
		let data = json!({"id": 99, "url": "/x/", "name": "New", "createdAt": "2024-02-02", "extra": 1});
		let internal = serializer
			.to_internal_value(&data, &SerializerContext::new())
			.unwrap();
		assert_eq!(
			Value::Object(internal),
			json!({"name": "New", "created_at": "2024-02-02"})
		);
	}

	#[rstest]
	#[case(Method::POST, Some("author"), None)]
	#[case(Method::PUT, None, Some("editor"))]
	#[case(Method::PATCH, None, Some("editor"))]
	#[case(Method::GET, None, None)]
	fn test_user_stamping(
		model: ModelDescriptor,
		#[case] method: Method,
		#[case] author: Option<&str>,
		#[case] editor: Option<&str>,
	) {
		let serializer = ModelSerializer::for_model(&model)
			.with_author_field("author")
			.with_editor_field("editor");
		let request = RequestContext::new(method).with_user(json!(5));
		let ctx = SerializerContext::new().with_request(&request);
		let internal = serializer.to_internal_value(&json!({"name": "x"}), &ctx).unwrap();
		let user = json!(5);
		assert_eq!(author.and_then(|f| internal.get(f)), author.map(|_| &user));
		assert_eq!(editor.and_then(|f| internal.get(f)), editor.map(|_| &user));
		assert_eq!(internal.len(), 1 + usize::from(author.is_some()) + usize::from(editor.is_some()));
	}

	#[rstest]
	fn test_anonymous_request_is_not_stamped(model: ModelDescriptor) {
		let serializer = ModelSerializer::for_model(&model).with_author_field("author");
		let request = RequestContext::new(Method::POST).with_user(Value::Null);
		let ctx = SerializerContext::new().with_request(&request);
		let internal = serializer.to_internal_value(&json!({"name": "x"}), &ctx).unwrap();
		assert!(!internal.contains_key("author"));
	}
}
