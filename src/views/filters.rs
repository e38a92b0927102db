//! Search and ordering query parameter handling for a configured viewset

use std::fmt;

/// One term of an `?ordering=` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingTerm {
	pub field: String,
	pub descending: bool,
}

impl OrderingTerm {
	pub fn asc(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			descending: false,
		}
	}

	pub fn desc(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			descending: true,
		}
	}

	/// Parse `field` or `-field`
	pub fn parse(term: &str) -> Option<Self> {
		let term = term.trim();
		match term.strip_prefix('-') {
			Some("") => None,
			Some(field) => Some(Self::desc(field)),
			None if term.is_empty() => None,
			None => Some(Self::asc(term)),
		}
	}
}

impl fmt::Display for OrderingTerm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.descending {
			write!(f, "-{}", self.field)
		} else {
			f.write_str(&self.field)
		}
	}
}

/// Keep the terms of a comma separated ordering value naming allowed fields
///
/// Unknown fields are dropped, as Django REST Framework's `OrderingFilter` does.
pub fn parse_ordering<S: AsRef<str>>(value: &str, allowed: &[S]) -> Vec<OrderingTerm> {
	value
		.split(',')
		.filter_map(OrderingTerm::parse)
		.filter(|term| {
			let known = allowed.iter().any(|a| a.as_ref() == term.field);
			if !known {
				tracing::warn!("Ignoring ordering by unknown field `{}`", term.field);
			}
			known
		})
		.collect()
}

/// Split a search value into terms on whitespace and commas
///
/// ```
/// use reinhardt_rest_shortcuts::views::search_terms;
///
/// assert_eq!(search_terms(" rust, web  api "), vec!["rust", "web", "api"]);
/// ```
pub fn search_terms(value: &str) -> Vec<String> {
	value
		.split(|c: char| c.is_whitespace() || c == ',')
		.filter(|term| !term.is_empty())
		.map(str::to_string)
		.collect()
}
