//! Model descriptions consumed by the shortcut factories
//!
//! A [`ModelDescriptor`] is an explicit list of [`FieldDescriptor`]s. Search and
//! ordering eligibility is derived once from each field's [`FieldKind`]:
//!
//! | Kind       | Search | Ordering |
//! |------------|--------|----------|
//! | `Text`     | yes    | no       |
//! | `Scalar`   | no     | yes      |
//! | `Date`     | no     | yes      |
//! | `Relation` | no     | no       |
//! | `Other`    | no     | no       |

use crate::error::{Result, ShortcutError};
use std::collections::HashSet;

/// Broad category of a model field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
	/// Character data
	Text,
	/// Numbers, booleans, identifiers and other comparable scalars
	Scalar,
	/// Dates, times and timestamps
	Date,
	/// Reference to another model
	Relation,
	/// A type with no unambiguous mapping, kept as written
	Other(String),
}

impl FieldKind {
	/// Map a Rust (or ORM field) type name to a kind
	///
	/// `Option<T>` maps to the kind of `T`. Path prefixes such as `chrono::` are ignored.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_rest_shortcuts::FieldKind;
	///
	/// assert_eq!(FieldKind::from_type_name("String"), FieldKind::Text);
	/// assert_eq!(FieldKind::from_type_name("Option<i64>"), FieldKind::Scalar);
	/// assert_eq!(FieldKind::from_type_name("chrono::DateTime<Utc>"), FieldKind::Date);
	/// assert_eq!(FieldKind::from_type_name("ForeignKey<User>"), FieldKind::Relation);
	/// assert!(matches!(FieldKind::from_type_name("Vec<u8>"), FieldKind::Other(_)));
	/// ```
	pub fn from_type_name(type_name: &str) -> Self {
		let (head, inner) = split_type_name(type_name);
		match head {
			"Option" => inner.map_or_else(
				|| FieldKind::Other(type_name.trim().to_string()),
				FieldKind::from_type_name,
			),
			"String" | "str" | "&str" | "&'static str" | "CharField" | "SlugField" | "EmailField"
			| "URLField" => FieldKind::Text,
			"i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
			| "u128" | "usize" | "f32" | "f64" | "bool" | "char" | "Uuid" | "Decimal"
			| "IntegerField" | "BigIntegerField" | "AutoField" | "BigAutoField" | "FloatField"
			| "DecimalField" | "BooleanField" | "UUIDField" => FieldKind::Scalar,
			"NaiveDate" | "NaiveDateTime" | "NaiveTime" | "DateTime" | "Date" | "Time"
			| "OffsetDateTime" | "PrimitiveDateTime" | "DateField" | "DateTimeField"
			| "TimeField" => FieldKind::Date,
			"ForeignKey" | "OneToOne" | "ManyToMany" | "ForeignKeyField" | "OneToOneField"
			| "ManyToManyField" => FieldKind::Relation,
			_ => FieldKind::Other(type_name.trim().to_string()),
		}
	}

	pub fn is_search_eligible(&self) -> bool {
		matches!(self, FieldKind::Text)
	}

	pub fn is_order_eligible(&self) -> bool {
		matches!(self, FieldKind::Scalar | FieldKind::Date)
	}

	pub fn is_relation(&self) -> bool {
		matches!(self, FieldKind::Relation)
	}
}

/// Split `path::Head<Inner>` into `("Head", Some("Inner"))`
fn split_type_name(type_name: &str) -> (&str, Option<&str>) {
	let type_name = type_name.trim();
	let (path, inner) = match (type_name.find('<'), type_name.rfind('>')) {
		(Some(open), Some(close)) if open < close => {
			(&type_name[..open], Some(type_name[open + 1..close].trim()))
		}
		_ => (type_name, None),
	};
	let head = match path.rfind("::") {
		Some(idx) if !path.starts_with('&') => &path[idx + 2..],
		_ => path,
	};
	(head.trim(), inner)
}

/// Description of a single model field
///
/// Eligibility flags start from the kind's defaults and can only be narrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
	name: String,
	kind: FieldKind,
	searchable: bool,
	orderable: bool,
	primary_key: bool,
	nullable: bool,
	related_model: Option<String>,
}

impl FieldDescriptor {
	/// Create a field of the given kind
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			searchable: kind.is_search_eligible(),
			orderable: kind.is_order_eligible(),
			kind,
			primary_key: false,
			nullable: false,
			related_model: None,
		}
	}

	pub fn text(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Text)
	}

	pub fn scalar(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Scalar)
	}

	pub fn date(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Date)
	}

	/// Create a relation to the named model
	pub fn relation(name: impl Into<String>, related_model: impl Into<String>) -> Self {
		let mut field = Self::new(name, FieldKind::Relation);
		field.related_model = Some(related_model.into());
		field
	}

	/// Create a field from its type name, see [`FieldKind::from_type_name`]
	///
	/// `Option<T>` fields are marked nullable and the inner type of a relation
	/// becomes the related model.
	///
	/// ```
	/// use reinhardt_rest_shortcuts::{FieldDescriptor, FieldKind};
	///
	/// let field = FieldDescriptor::from_type_name("author", "Option<ForeignKey<User>>");
	/// assert_eq!(field.kind(), &FieldKind::Relation);
	/// assert!(field.is_nullable());
	/// assert_eq!(field.related_model(), Some("User"));
	/// ```
	pub fn from_type_name(name: impl Into<String>, type_name: &str) -> Self {
		let (head, inner) = split_type_name(type_name);
		let nullable = head == "Option";
		let target = if nullable { inner.unwrap_or(type_name) } else { type_name };
		let kind = FieldKind::from_type_name(target);
		let related_model = if kind.is_relation() {
			split_type_name(target).1.map(str::to_string)
		} else {
			None
		};
		let mut field = Self::new(name, kind);
		field.nullable = nullable;
		field.related_model = related_model;
		field
	}

	/// Mark this field as the model's primary key
	pub fn primary_key(mut self) -> Self {
		self.primary_key = true;
		self
	}

	pub fn nullable(mut self) -> Self {
		self.nullable = true;
		self
	}

	/// Keep this field out of search even if its kind allows it
	pub fn exclude_from_search(mut self) -> Self {
		self.searchable = false;
		self
	}

	/// Keep this field out of ordering even if its kind allows it
	pub fn exclude_from_ordering(mut self) -> Self {
		self.orderable = false;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> &FieldKind {
		&self.kind
	}

	pub fn is_searchable(&self) -> bool {
		self.searchable
	}

	pub fn is_orderable(&self) -> bool {
		self.orderable
	}

	pub fn is_primary_key(&self) -> bool {
		self.primary_key
	}

	pub fn is_nullable(&self) -> bool {
		self.nullable
	}

	pub fn related_model(&self) -> Option<&str> {
		self.related_model.as_deref()
	}
}

/// Caller-owned description of a model: its name and fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
	name: String,
	fields: Vec<FieldDescriptor>,
	primary_key: Option<String>,
}

impl ModelDescriptor {
	/// Start describing a model
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_rest_shortcuts::{FieldDescriptor, ModelDescriptor};
	///
	/// let model = ModelDescriptor::builder("Article")
	///     .field(FieldDescriptor::scalar("id"))
	///     .field(FieldDescriptor::text("title"))
	///     .build()
	///     .unwrap();
	/// assert_eq!(model.primary_key(), Some("id"));
	/// assert_eq!(model.field_names(), vec!["id", "title"]);
	/// ```
	pub fn builder(name: impl Into<String>) -> ModelDescriptorBuilder {
		ModelDescriptorBuilder {
			name: name.into(),
			fields: Vec::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn has_field(&self, name: &str) -> bool {
		self.field(name).is_some()
	}

	/// Name of the primary key field, if the model describes one
	pub fn primary_key(&self) -> Option<&str> {
		self.primary_key.as_deref()
	}

	pub fn field_names(&self) -> Vec<&str> {
		self.fields.iter().map(|f| f.name.as_str()).collect()
	}

	/// Names of searchable fields in declaration order
	pub fn searchable_field_names(&self) -> Vec<&str> {
		self.fields
			.iter()
			.filter(|f| f.searchable)
			.map(|f| f.name.as_str())
			.collect()
	}

	/// Names of orderable fields in declaration order
	pub fn orderable_field_names(&self) -> Vec<&str> {
		self.fields
			.iter()
			.filter(|f| f.orderable)
			.map(|f| f.name.as_str())
			.collect()
	}
}

/// Builder validating a [`ModelDescriptor`]
#[derive(Debug, Clone)]
pub struct ModelDescriptorBuilder {
	name: String,
	fields: Vec<FieldDescriptor>,
}

impl ModelDescriptorBuilder {
	pub fn field(mut self, field: FieldDescriptor) -> Self {
		self.fields.push(field);
		self
	}

	pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
		self.fields.extend(fields);
		self
	}

	/// Validate and build the descriptor
	///
	/// Fails when the model name is not an identifier, when a field name is
	/// empty or repeated, or when more than one field is marked as primary
	/// key. Without an explicitly marked primary key, a field named `id` is
	/// used; a model with neither has no primary key.
	pub fn build(self) -> Result<ModelDescriptor> {
		let invalid = |reason: String| ShortcutError::InvalidModel {
			model: self.name.clone(),
			reason,
		};

		if !is_identifier(&self.name) {
			return Err(invalid("model name must be a non-empty identifier".to_string()));
		}

		let mut seen = HashSet::new();
		for field in &self.fields {
			if field.name.trim().is_empty() {
				return Err(invalid("field names must not be empty".to_string()));
			}
			if !seen.insert(field.name.as_str()) {
				return Err(invalid(format!("duplicate field `{}`", field.name)));
			}
		}

		let marked: Vec<&FieldDescriptor> = self.fields.iter().filter(|f| f.primary_key).collect();
		let primary_key = match marked.as_slice() {
			[field] => Some(field.name.clone()),
			[] if seen.contains("id") => Some("id".to_string()),
			[] => None,
			_ => return Err(invalid("more than one primary key field".to_string())),
		};

		let mut fields = self.fields;
		for field in &mut fields {
			if primary_key.as_deref() == Some(field.name.as_str()) {
				field.primary_key = true;
			}
		}

		Ok(ModelDescriptor {
			name: self.name,
			fields,
			primary_key,
		})
	}
}

fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) if first.is_ascii_alphabetic() || first == '_' => {
			chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
		}
		_ => false,
	}
}

/// Types that can describe themselves to the shortcut factories
///
/// ```
/// use reinhardt_rest_shortcuts::{FieldDescriptor, Model, ModelDescriptor, Result};
///
/// struct Tag;
///
/// impl Model for Tag {
///     fn describe() -> Result<ModelDescriptor> {
///         ModelDescriptor::builder("Tag")
///             .field(FieldDescriptor::scalar("id"))
///             .field(FieldDescriptor::text("label"))
///             .build()
///     }
/// }
///
/// assert_eq!(Tag::describe().unwrap().name(), "Tag");
/// ```
pub trait Model {
	fn describe() -> Result<ModelDescriptor>;
}
