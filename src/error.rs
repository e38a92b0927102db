//! Error type shared by every shortcut factory

/// Errors raised while generating serializers, viewsets or routes
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ShortcutError {
	#[error("Invalid model `{model}`: {reason}")]
	InvalidModel { model: String, reason: String },

	#[error("Field `{field}` does not exist on `{owner}`")]
	UnknownField { owner: String, field: String },

	#[error("Field `{field}` of `{model}` cannot be used for {purpose}")]
	IneligibleField {
		model: String,
		field: String,
		purpose: &'static str,
	},

	#[error("At least one ordering field is required")]
	NoOrderingFields,

	#[error("The `actions` list of `{0}` must not be empty")]
	NoActions(String),

	#[error("Invalid lookup value regex `{pattern}`: {source}")]
	InvalidLookupRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Basename `{0}` is already registered")]
	DuplicateBasename(String),

	#[error("Reverse for `{0}` not found")]
	NoReverseMatch(String),

	#[error("Missing parameter `{param}` for route `{route}`")]
	MissingParameter { route: String, param: String },

	#[error("Serializer context has no URL reverser for field `{0}`")]
	MissingReverser(String),

	#[error("Update or partial update is assumed: no primary key available for `{0}`")]
	PrimaryKeyUnavailable(String),

	#[error("Unexpectedly required field value is null: `{0}`")]
	RequiredValueMissing(String),

	#[error("Expected a JSON object, got {0}")]
	NotAnObject(&'static str),

	#[error("Settings error: {0}")]
	Settings(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShortcutError>;

/// Short name of a JSON value's type, used in error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "boolean",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}
