//! Naming conventions used to derive route prefixes, base names and titles
//!
//! `BlogPost` becomes `blog-post` as a route prefix and basename,
//! `BlogPostsViewSet` as a viewset name and `blog posts` in documentation.

use heck::ToSnakeCase;
use regex::Regex;
use std::sync::LazyLock;

const UNCOUNTABLES: &[&str] = &[
	"equipment",
	"fish",
	"information",
	"jeans",
	"money",
	"news",
	"rice",
	"series",
	"sheep",
	"species",
];

// Highest priority first. `human` has to precede `man`.
const IRREGULARS: &[(&str, &str)] = &[
	("zombie", "zombies"),
	("cow", "kine"),
	("move", "moves"),
	("sex", "sexes"),
	("child", "children"),
	("human", "humans"),
	("man", "men"),
	("person", "people"),
];

// First matching rule wins, so specific rules come before general ones.
const PLURALS: &[(&str, &str)] = &[
	(r"(?i)(quiz)$", "${1}zes"),
	(r"(?i)^(oxen)$", "${1}"),
	(r"(?i)^(ox)$", "${1}en"),
	(r"(?i)(m|l)ice$", "${1}ice"),
	(r"(?i)(m|l)ouse$", "${1}ice"),
	(r"(?i)(passer)s?by$", "${1}sby"),
	(r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
	(r"(?i)(x|ch|ss|sh)$", "${1}es"),
	(r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
	(r"(?i)(hive)$", "${1}s"),
	(r"(?i)([lr])f$", "${1}ves"),
	(r"(?i)([^f])fe$", "${1}ves"),
	(r"(?i)sis$", "ses"),
	(r"(?i)([ti])a$", "${1}a"),
	(r"(?i)([ti])um$", "${1}a"),
	(r"(?i)(buffal|potat|tomat)o$", "${1}oes"),
	(r"(?i)(bu)s$", "${1}ses"),
	(r"(?i)(alias|status)$", "${1}es"),
	(r"(?i)(octop|vir)i$", "${1}i"),
	(r"(?i)(octop|vir)us$", "${1}i"),
	(r"(?i)^(ax|test)is$", "${1}es"),
	(r"(?i)s$", "s"),
	(r"$", "s"),
];

static PLURAL_RULES: LazyLock<Vec<(Regex, String)>> = LazyLock::new(|| {
	let irregular = IRREGULARS
		.iter()
		.flat_map(|(singular, plural)| irregular_rules(singular, plural));
	let regular = PLURALS
		.iter()
		.map(|(pattern, replacement)| (pattern.to_string(), replacement.to_string()));
	irregular
		.chain(regular)
		.map(|(pattern, replacement)| {
			let rule = Regex::new(&pattern).expect("PLURAL_RULES: invalid regex pattern");
			(rule, replacement)
		})
		.collect()
});

/// Rules turning either form of an irregular noun at the end of a word into
/// the plural, keeping the case of its first letter
fn irregular_rules(singular: &str, plural: &str) -> Vec<(String, String)> {
	let (plural_head, plural_tail) = plural.split_at(1);
	[plural, singular]
		.into_iter()
		.flat_map(|form| {
			let (head, tail) = form.split_at(1);
			[
				(
					format!("{}(?i:{})$", head.to_uppercase(), tail),
					format!("{}{}", plural_head.to_uppercase(), plural_tail),
				),
				(
					format!("{}(?i:{})$", head, tail),
					format!("{}{}", plural_head, plural_tail),
				),
			]
		})
		.collect()
}

/// Convert a `PascalCase` or `camelCase` name into `snake_case`
///
/// # Examples
///
/// ```
/// use reinhardt_rest_shortcuts::inflection::underscore;
///
/// assert_eq!(underscore("BlogPost"), "blog_post");
/// assert_eq!(underscore("HTMLPage"), "html_page");
/// ```
pub fn underscore(word: &str) -> String {
	word.to_snake_case()
}

/// Replace underscores with dashes
///
/// ```
/// use reinhardt_rest_shortcuts::inflection::dasherize;
///
/// assert_eq!(dasherize("blog_post"), "blog-post");
/// ```
pub fn dasherize(word: &str) -> String {
	word.replace('_', "-")
}

/// Turn an identifier into a capitalized, space separated phrase
///
/// A trailing `_id` is dropped, so `author_id` becomes `Author`.
///
/// ```
/// use reinhardt_rest_shortcuts::inflection::humanize;
///
/// assert_eq!(humanize("blog_posts"), "Blog posts");
/// assert_eq!(humanize("author_id"), "Author");
/// ```
pub fn humanize(word: &str) -> String {
	let word = word.strip_suffix("_id").unwrap_or(word);
	let spaced = word.trim_start_matches('_').replace('_', " ");
	let mut chars = spaced.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Return the English plural form of a word
///
/// Only the last word of a compound name is inflected and the case of the
/// matched prefix is preserved.
///
/// ```
/// use reinhardt_rest_shortcuts::inflection::pluralize;
///
/// assert_eq!(pluralize("BlogPost"), "BlogPosts");
/// assert_eq!(pluralize("Category"), "Categories");
/// assert_eq!(pluralize("SalesPerson"), "SalesPeople");
/// assert_eq!(pluralize("Woman"), "Women");
/// assert_eq!(pluralize("Sheep"), "Sheep");
/// ```
pub fn pluralize(word: &str) -> String {
	if word.is_empty() || UNCOUNTABLES.contains(&word.to_lowercase().as_str()) {
		return word.to_string();
	}
	PLURAL_RULES
		.iter()
		.find(|(rule, _)| rule.is_match(word))
		.map_or_else(
			|| word.to_string(),
			|(rule, replacement)| rule.replace(word, replacement.as_str()).into_owned(),
		)
}
