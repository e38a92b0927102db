//! Serializer field declarations

use crate::model::{FieldDescriptor, FieldKind};

/// Lookup used by hyperlinked fields unless configured otherwise
pub const DEFAULT_LOOKUP_FIELD: &str = "pk";

/// How a serializer field obtains its output value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializerFieldKind {
	/// Plain model attribute copied as-is
	Attribute(FieldKind),
	/// Related object represented by its primary key
	PrimaryKeyRelated { related_model: Option<String> },
	/// URL of the serialized object's own detail view
	///
	/// `lookup_field` names both the URL keyword argument and the record
	/// attribute filling it; `pk` stands for the model's primary key.
	HyperlinkedIdentity {
		view_name: String,
		lookup_field: String,
	},
	/// URL of a related object's detail view, looked up from the source value
	HyperlinkedRelated {
		view_name: String,
		lookup_field: String,
	},
}

/// One output field of a serializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerField {
	source: String,
	kind: SerializerFieldKind,
	label: Option<String>,
	read_only: bool,
}

impl SerializerField {
	/// Field mirroring a model field
	///
	/// Relations become primary key related fields and the primary key is read-only.
	pub fn from_model_field(field: &FieldDescriptor) -> Self {
		let kind = if field.kind().is_relation() {
			SerializerFieldKind::PrimaryKeyRelated {
				related_model: field.related_model().map(str::to_string),
			}
		} else {
			SerializerFieldKind::Attribute(field.kind().clone())
		};
		Self {
			source: field.name().to_string(),
			kind,
			label: None,
			read_only: field.is_primary_key(),
		}
	}

	/// Read-only URL of the object's detail view, sourced from the whole object
	pub fn hyperlinked_identity(view_name: impl Into<String>) -> Self {
		Self {
			source: "*".to_string(),
			kind: SerializerFieldKind::HyperlinkedIdentity {
				view_name: view_name.into(),
				lookup_field: DEFAULT_LOOKUP_FIELD.to_string(),
			},
			label: None,
			read_only: true,
		}
	}

	/// Read-only URL of a related object, sourced from the related primary key
	pub fn hyperlinked_related(source: impl Into<String>, view_name: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			kind: SerializerFieldKind::HyperlinkedRelated {
				view_name: view_name.into(),
				lookup_field: DEFAULT_LOOKUP_FIELD.to_string(),
			},
			label: None,
			read_only: true,
		}
	}

	/// Reverse this hyperlinked field through `lookup_field` instead of `pk`
	///
	/// Has no effect on non-URL fields.
	pub fn with_lookup_field(mut self, lookup_field: impl Into<String>) -> Self {
		self.set_lookup_field(lookup_field.into());
		self
	}

	pub(crate) fn set_lookup_field(&mut self, lookup_field: String) {
		match &mut self.kind {
			SerializerFieldKind::HyperlinkedIdentity {
				lookup_field: current,
				..
			}
			| SerializerFieldKind::HyperlinkedRelated {
				lookup_field: current,
				..
			} => *current = lookup_field,
			SerializerFieldKind::Attribute(_) | SerializerFieldKind::PrimaryKeyRelated { .. } => {}
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn read_only(mut self) -> Self {
		self.read_only = true;
		self
	}

	/// Model attribute this field reads from, `*` for the whole object
	pub fn source(&self) -> &str {
		&self.source
	}

	pub fn kind(&self) -> &SerializerFieldKind {
		&self.kind
	}

	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	pub(crate) fn set_label(&mut self, label: String) {
		self.label = Some(label);
	}

	pub fn is_read_only(&self) -> bool {
		self.read_only
	}

	/// Whether the field renders a URL
	pub fn is_url_field(&self) -> bool {
		matches!(
			self.kind,
			SerializerFieldKind::HyperlinkedIdentity { .. }
				| SerializerFieldKind::HyperlinkedRelated { .. }
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_relation_becomes_primary_key_related() {
		let field = SerializerField::from_model_field(&FieldDescriptor::relation("owner", "User"));
		assert_eq!(
			field.kind(),
			&SerializerFieldKind::PrimaryKeyRelated {
				related_model: Some("User".to_string())
			}
		);
		assert!(!field.is_read_only());
		assert!(!field.is_url_field());
	}

	#[rstest]
	fn test_primary_key_is_read_only() {
		let field = SerializerField::from_model_field(&FieldDescriptor::scalar("id").primary_key());
		assert!(field.is_read_only());
		assert_eq!(field.source(), "id");
	}

	#[rstest]
	fn test_url_fields() {
		assert!(SerializerField::hyperlinked_identity("post-detail").is_url_field());
		let related = SerializerField::hyperlinked_related("owner", "user-detail");
		assert!(related.is_url_field());
		assert!(related.is_read_only());
		assert_eq!(related.source(), "owner");
	}

	#[rstest]
	fn test_lookup_field_only_applies_to_url_fields() {
		let identity = SerializerField::hyperlinked_identity("tag-detail").with_lookup_field("slug");
		assert_eq!(
			identity.kind(),
			&SerializerFieldKind::HyperlinkedIdentity {
				view_name: "tag-detail".to_string(),
				lookup_field: "slug".to_string(),
			}
		);
		let plain = SerializerField::from_model_field(&FieldDescriptor::text("slug"));
		assert_eq!(plain.clone().with_lookup_field("slug"), plain);
	}
}
