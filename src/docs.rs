//! Generated documentation for viewsets
//!
//! The text is what the browsable API and `OPTIONS` responses show as the
//! endpoint description. Each helper owns one section of a [`ViewSetDoc`], so
//! applying a helper again replaces its section instead of stacking text.

use crate::error::{Result, ShortcutError};
use std::fmt;

/// Endpoint description plus generated capability sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSetDoc {
	description: Option<String>,
	search_fields: Option<Vec<String>>,
	ordering_fields: Option<Vec<String>>,
	page_size: Option<usize>,
}

impl ViewSetDoc {
	/// Documentation starting from a base description
	pub fn new(description: impl Into<String>) -> Self {
		Self {
			description: Some(description.into()),
			..Self::default()
		}
	}

	/// Documentation without a base description
	///
	/// The helpers leave such documentation untouched.
	pub fn undocumented() -> Self {
		Self::default()
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	pub fn search_fields(&self) -> Option<&[String]> {
		self.search_fields.as_deref()
	}

	pub fn ordering_fields(&self) -> Option<&[String]> {
		self.ordering_fields.as_deref()
	}

	pub fn page_size(&self) -> Option<usize> {
		self.page_size
	}

	/// Render the full text, or `None` for undocumented viewsets
	pub fn render(&self) -> Option<String> {
		let description = self.description.as_ref()?;
		let mut text = description.clone();
		if let Some(fields) = &self.search_fields {
			text.push('\n');
			text.push_str(&search_section(fields));
		}
		if let Some(fields) = &self.ordering_fields {
			text.push('\n');
			text.push_str(&ordering_section(fields));
		}
		if let Some(page_size) = self.page_size {
			text.push('\n');
			text.push_str(&pagination_section(page_size));
		}
		Some(text)
	}
}

impl fmt::Display for ViewSetDoc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render().unwrap_or_default())
	}
}

fn search_section(fields: &[String]) -> String {
	format!(
		"Specify \"?search=<search terms here>\" query parameter to search items.\n\
		 You can use following fields for search: {}.\n",
		fields.join(", ")
	)
}

fn ordering_section(fields: &[String]) -> String {
	// Non-empty, checked in append_ordering_info.
	let first = fields.first().map(String::as_str).unwrap_or_default();
	let mut text = format!(
		"Specify \"?ordering=<fields to order by here>\" query parameter to order results.\n\n\
		 You can use following fields for ordering: {}.\n\n\
		 To reverse ordering of a field prefix it with hyphen '-': ?ordering=-{}.\n",
		fields.join(", "),
		first
	);
	if fields.len() > 1 {
		text.push_str(&format!(
			"You can specify multiple orderings by separating them using comma: ?ordering={}.\n",
			fields[..2].join(",")
		));
	}
	text
}

fn pagination_section(page_size: usize) -> String {
	format!(
		"Specify \"?page=<page number>\" to get particular page. Page size is {}.\n",
		page_size
	)
}

/// Document the `search` query parameter and the fields it looks at
///
/// An empty field list removes the section, since nothing can be searched.
///
/// # Examples
///
/// ```
/// use reinhardt_rest_shortcuts::docs::{ViewSetDoc, append_search_info};
///
/// let mut doc = ViewSetDoc::new("Articles.\n");
/// append_search_info(&mut doc, &["title", "body"]);
/// assert!(doc.render().unwrap().contains("fields for search: title, body."));
///
/// append_search_info(&mut doc, &["title"]);
/// let text = doc.render().unwrap();
/// assert!(text.contains("fields for search: title."));
/// assert_eq!(text.matches("?search=").count(), 1);
/// ```
pub fn append_search_info<S: AsRef<str>>(doc: &mut ViewSetDoc, fields: &[S]) {
	if doc.description.is_none() {
		return;
	}
	doc.search_fields = if fields.is_empty() {
		None
	} else {
		Some(fields.iter().map(|f| f.as_ref().to_string()).collect())
	};
}

/// Document the `ordering` query parameter
///
/// Fails when `fields` is empty.
pub fn append_ordering_info<S: AsRef<str>>(doc: &mut ViewSetDoc, fields: &[S]) -> Result<()> {
	if fields.is_empty() {
		return Err(ShortcutError::NoOrderingFields);
	}
	if doc.description.is_some() {
		doc.ordering_fields = Some(fields.iter().map(|f| f.as_ref().to_string()).collect());
	}
	Ok(())
}

/// Document the `page` query parameter and the page size
pub fn append_pagination_info(doc: &mut ViewSetDoc, page_size: usize) {
	if doc.description.is_some() {
		doc.page_size = Some(page_size);
	}
}

/// Apply search, ordering and pagination documentation at once
pub fn append_search_ordering_and_pagination_info<S, O>(
	doc: &mut ViewSetDoc,
	search_fields: &[S],
	ordering_fields: &[O],
	page_size: usize,
) -> Result<()>
where
	S: AsRef<str>,
	O: AsRef<str>,
{
	append_search_info(doc, search_fields);
	append_ordering_info(doc, ordering_fields)?;
	append_pagination_info(doc, page_size);
	Ok(())
}
