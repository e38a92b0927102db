use super::{
	Action, DEFAULT_LOOKUP_VALUE_REGEX, ModelViewSet, OrderingTerm, get_fields_suitable_for_ordering,
	get_fields_suitable_for_search,
};
use crate::docs::{ViewSetDoc, append_ordering_info, append_pagination_info, append_search_info};
use crate::error::{Result, ShortcutError};
use crate::inflection::{humanize, pluralize, underscore};
use crate::model::{FieldDescriptor, ModelDescriptor};
use crate::serializers::{DEFAULT_LOOKUP_FIELD, ModelSerializer, standard_serializer};
use crate::settings::ShortcutSettings;
use regex::Regex;
use std::sync::Arc;

/// Builder for a [`ModelViewSet`]
///
/// Anything left unset follows the standard conventions: the standard
/// serializer, search and ordering on every eligible field, ordering by
/// primary key (if the model has one), a `pk` lookup matching `[^/]+` and all
/// model actions.
///
/// A custom serializer's hyperlinked identity fields are switched to the
/// viewset's lookup field, so `url` values reverse to its detail route.
pub struct ViewSetBuilder {
	model: Arc<ModelDescriptor>,
	settings: ShortcutSettings,
	serializer: Option<ModelSerializer>,
	name: Option<String>,
	search_fields: Option<Vec<String>>,
	ordering_fields: Option<Vec<String>>,
	default_ordering: Option<Vec<OrderingTerm>>,
	lookup_field: String,
	lookup_value_regex: String,
	actions: Vec<Action>,
	description: Option<Option<String>>,
	page_size: Option<usize>,
}

impl ViewSetBuilder {
	pub fn new(model: &ModelDescriptor, settings: &ShortcutSettings) -> Self {
		Self {
			model: Arc::new(model.clone()),
			settings: settings.clone(),
			serializer: None,
			name: None,
			search_fields: None,
			ordering_fields: None,
			default_ordering: None,
			lookup_field: DEFAULT_LOOKUP_FIELD.to_string(),
			lookup_value_regex: DEFAULT_LOOKUP_VALUE_REGEX.to_string(),
			actions: Action::ALL.to_vec(),
			description: None,
			page_size: None,
		}
	}

	pub fn serializer(mut self, serializer: ModelSerializer) -> Self {
		self.serializer = Some(serializer);
		self
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Restrict search to these fields; an empty list disables search
	pub fn search_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.search_fields = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	/// Restrict ordering to these fields; an empty list disables ordering
	pub fn ordering_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.ordering_fields = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	pub fn default_ordering(mut self, ordering: impl IntoIterator<Item = OrderingTerm>) -> Self {
		self.default_ordering = Some(ordering.into_iter().collect());
		self
	}

	pub fn lookup_field(mut self, field: impl Into<String>) -> Self {
		self.lookup_field = field.into();
		self
	}

	pub fn lookup_value_regex(mut self, regex: impl Into<String>) -> Self {
		self.lookup_value_regex = regex.into();
		self
	}

	pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
		self.actions = actions.into_iter().collect();
		self
	}

	/// Base description the capability sections are appended to
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(Some(description.into()));
		self
	}

	/// Build without any generated documentation
	pub fn undocumented(mut self) -> Self {
		self.description = Some(None);
		self
	}

	pub fn page_size(mut self, page_size: usize) -> Self {
		self.page_size = Some(page_size);
		self
	}

	pub fn build(self) -> Result<ModelViewSet> {
		let model = self.model;
		let name = self
			.name
			.unwrap_or_else(|| format!("{}ViewSet", pluralize(model.name())));

		if self.actions.is_empty() {
			return Err(ShortcutError::NoActions(name));
		}

		let search_fields = match self.search_fields {
			Some(fields) => {
				check_fields(&model, &fields, "search", |f| f.is_searchable())?;
				fields
			}
			None => get_fields_suitable_for_search(&model),
		};
		let ordering_fields = match self.ordering_fields {
			Some(fields) => {
				check_fields(&model, &fields, "ordering", |f| f.is_orderable())?;
				fields
			}
			None => get_fields_suitable_for_ordering(&model),
		};
		let default_ordering = match self.default_ordering {
			Some(ordering) => {
				let fields: Vec<String> = ordering.iter().map(|t| t.field.clone()).collect();
				check_fields(&model, &fields, "ordering", |f| {
					f.is_orderable() || f.is_primary_key()
				})?;
				ordering
			}
			None => model
				.primary_key()
				.map(OrderingTerm::asc)
				.into_iter()
				.collect(),
		};

		if self.lookup_field != DEFAULT_LOOKUP_FIELD && !model.has_field(&self.lookup_field) {
			return Err(unknown_field(&model, &self.lookup_field));
		}

		let lookup_pattern = format!("(?P<{}>{})", self.lookup_field, self.lookup_value_regex);
		Regex::new(&lookup_pattern).map_err(|source| ShortcutError::InvalidLookupRegex {
			pattern: self.lookup_value_regex.clone(),
			source,
		})?;

		let serializer = match self.serializer {
			Some(serializer) => serializer.with_lookup_field(&self.lookup_field),
			None => standard_serializer(&model, &self.settings, &self.lookup_field),
		};
		let page_size = self.page_size.unwrap_or(self.settings.page_size);

		let description = self.description.unwrap_or_else(|| {
			Some(format!(
				"This is {} API endpoint.\n",
				humanize(&underscore(&pluralize(model.name()))).to_lowercase()
			))
		});
		let mut doc = description.map_or_else(ViewSetDoc::undocumented, ViewSetDoc::new);
		append_search_info(&mut doc, &search_fields);
		if !ordering_fields.is_empty() {
			append_ordering_info(&mut doc, &ordering_fields)?;
		}
		append_pagination_info(&mut doc, page_size);

		tracing::debug!(
			"Built {} (search: [{}], ordering: [{}])",
			name,
			search_fields.join(", "),
			ordering_fields.join(", ")
		);

		Ok(ModelViewSet {
			name,
			model,
			serializer: Arc::new(serializer),
			search_fields,
			ordering_fields,
			default_ordering,
			lookup_field: self.lookup_field,
			lookup_value_regex: self.lookup_value_regex,
			actions: self.actions,
			doc,
			page_size,
		})
	}
}

fn unknown_field(model: &ModelDescriptor, field: &str) -> ShortcutError {
	ShortcutError::UnknownField {
		owner: model.name().to_string(),
		field: field.to_string(),
	}
}

fn check_fields(
	model: &ModelDescriptor,
	fields: &[String],
	purpose: &'static str,
	eligible: impl Fn(&FieldDescriptor) -> bool,
) -> Result<()> {
	for name in fields {
		let field = model.field(name).ok_or_else(|| unknown_field(model, name))?;
		if !eligible(field) {
			return Err(ShortcutError::IneligibleField {
				model: model.name().to_string(),
				field: name.clone(),
				purpose,
			});
		}
	}
	Ok(())
}
