//! Field value lookups spanning incoming data and the stored entity
//!
//! During a partial update (`PATCH`) a field can be missing from the incoming
//! data. These helpers fall back to the stored entity, fetched by primary key.

use super::context::SerializerContext;
use crate::error::{Result, ShortcutError, json_type_name};
use serde::Serialize;
use serde_json::{Map, Value};

/// Primary key of the entity the serializer works on, taken from the view's URL kwargs
///
/// # Examples
///
/// ```
/// use reinhardt_rest_shortcuts::serializers::{SerializerContext, get_entity_pk};
///
/// let ctx = SerializerContext::new().with_view_kwarg("pk", "42");
/// assert_eq!(get_entity_pk(&ctx), Some("42"));
/// assert_eq!(get_entity_pk(&SerializerContext::new()), None);
/// ```
pub fn get_entity_pk<'c>(ctx: &'c SerializerContext<'_>) -> Option<&'c str> {
	ctx.view_kwarg("pk")
}

/// Value of a field from `data`, or from the stored entity when absent
///
/// Returns `None` when the field is absent from `data` and there is no
/// primary key to fetch the entity with. Null values are reported as `None`.
pub fn get_optional_field_value<M, F>(
	data: &Map<String, Value>,
	field_name: &str,
	pk: Option<&str>,
	fetch_model: F,
) -> Result<Option<Value>>
where
	M: Serialize,
	F: FnOnce(&str) -> Result<M>,
{
	if let Some(value) = data.get(field_name) {
		return Ok(Some(value.clone()).filter(|v| !v.is_null()));
	}
	let Some(pk) = pk else {
		return Ok(None);
	};
	let value = stored_field_value(fetch_model(pk)?, field_name)?;
	Ok(Some(value).filter(|v| !v.is_null()))
}

/// Value of a field from `data`, or from the stored entity when absent
///
/// Absent data is only valid for an update, so a missing primary key is an
/// error, as is a null value on the stored entity.
pub fn get_required_field_value<M, F>(
	data: &Map<String, Value>,
	field_name: &str,
	pk: Option<&str>,
	fetch_model: F,
) -> Result<Value>
where
	M: Serialize,
	F: FnOnce(&str) -> Result<M>,
{
	if let Some(value) = data.get(field_name) {
		return Ok(value.clone());
	}
	let pk = pk.ok_or_else(|| ShortcutError::PrimaryKeyUnavailable(field_name.to_string()))?;
	let value = stored_field_value(fetch_model(pk)?, field_name)?;
	if value.is_null() {
		return Err(ShortcutError::RequiredValueMissing(field_name.to_string()));
	}
	Ok(value)
}

fn stored_field_value<M: Serialize>(model: M, field_name: &str) -> Result<Value> {
	match serde_json::to_value(model)? {
		Value::Object(mut fields) => {
			fields
				.remove(field_name)
				.ok_or_else(|| ShortcutError::UnknownField {
					owner: "fetched model".to_string(),
					field: field_name.to_string(),
				})
		}
		other => Err(ShortcutError::NotAnObject(json_type_name(&other))),
	}
}
