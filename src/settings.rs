//! Settings consulted by the shortcut factories
//!
//! Settings are layered the same way as the framework's configuration sources:
//! defaults, then an optional TOML file, then environment variables.
//!
//! ```toml
//! api_url_namespace = "api"
//! page_size = 25
//! force_urls_param = "forceUrls"
//! ```

use crate::error::{Result, ShortcutError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable overriding [`ShortcutSettings::api_url_namespace`]
pub const ENV_API_URL_NAMESPACE: &str = "REINHARDT_API_URL_NAMESPACE";

/// Environment variable overriding [`ShortcutSettings::page_size`]
pub const ENV_PAGE_SIZE: &str = "REINHARDT_PAGE_SIZE";

const DEFAULT_PAGE_SIZE: usize = 100;
const DEFAULT_FORCE_URLS_PARAM: &str = "forceUrls";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutSettings {
	/// URL namespace the API router is mounted under
	///
	/// When set, detail view names become `"{namespace}:{basename}-detail"`.
	pub api_url_namespace: Option<String>,
	/// Page size advertised in generated viewset documentation
	pub page_size: usize,
	/// Query parameter forcing URL fields in or out of serializer output
	pub force_urls_param: String,
}

impl Default for ShortcutSettings {
	fn default() -> Self {
		Self {
			api_url_namespace: None,
			page_size: DEFAULT_PAGE_SIZE,
			force_urls_param: DEFAULT_FORCE_URLS_PARAM.to_string(),
		}
	}
}

impl ShortcutSettings {
	/// Parse settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_rest_shortcuts::ShortcutSettings;
	///
	/// let settings = ShortcutSettings::from_toml_str("page_size = 20").unwrap();
	/// assert_eq!(settings.page_size, 20);
	/// assert_eq!(settings.force_urls_param, "forceUrls");
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Read and parse a TOML settings file
	pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
		let content = fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&content)
	}

	/// Apply `REINHARDT_API_URL_NAMESPACE` and `REINHARDT_PAGE_SIZE` on top of these settings
	///
	/// An empty namespace variable clears the namespace.
	pub fn with_env_overrides(mut self) -> Result<Self> {
		if let Ok(namespace) = env::var(ENV_API_URL_NAMESPACE) {
			let namespace = namespace.trim();
			self.api_url_namespace = (!namespace.is_empty()).then(|| namespace.to_string());
		}
		if let Ok(raw) = env::var(ENV_PAGE_SIZE) {
			self.page_size = raw.trim().parse().map_err(|_| {
				ShortcutError::Settings(format!("{} must be a positive integer, got `{}`", ENV_PAGE_SIZE, raw))
			})?;
		}
		self.validate()?;
		Ok(self)
	}

	pub fn with_api_url_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.api_url_namespace = Some(namespace.into());
		self
	}

	pub fn with_page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size;
		self
	}

	fn validate(&self) -> Result<()> {
		if self.page_size == 0 {
			return Err(ShortcutError::Settings(
				"page_size must be greater than zero".to_string(),
			));
		}
		if self.force_urls_param.trim().is_empty() {
			return Err(ShortcutError::Settings(
				"force_urls_param must not be empty".to_string(),
			));
		}
		if let Some(namespace) = &self.api_url_namespace
			&& (namespace.is_empty() || namespace.contains(':'))
		{
			return Err(ShortcutError::Settings(format!(
				"api_url_namespace `{}` must be non-empty and must not contain ':'",
				namespace
			)));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::io::Write;

	#[rstest]
	fn test_defaults() {
		let settings = ShortcutSettings::default();
		assert_eq!(settings.api_url_namespace, None);
		assert_eq!(settings.page_size, 100);
		assert_eq!(settings.force_urls_param, "forceUrls");
	}

	#[rstest]
	fn test_from_toml_str_overrides_given_keys() {
		let settings =
			ShortcutSettings::from_toml_str("api_url_namespace = \"api\"\npage_size = 25\n").unwrap();
		assert_eq!(settings.api_url_namespace.as_deref(), Some("api"));
		assert_eq!(settings.page_size, 25);
		assert_eq!(settings.force_urls_param, "forceUrls");
	}

	#[rstest]
	#[case("page_size = 0")]
	#[case("force_urls_param = \"\"")]
	#[case("api_url_namespace = \"a:b\"")]
	fn test_from_toml_str_rejects_invalid_values(#[case] source: &str) {
		let result = ShortcutSettings::from_toml_str(source);
		assert!(matches!(result, Err(ShortcutError::Settings(_))));
	}

	#[rstest]
	fn test_from_toml_str_reports_syntax_errors() {
		let result = ShortcutSettings::from_toml_str("page_size = ");
		assert!(matches!(result, Err(ShortcutError::Toml(_))));
	}

	#[rstest]
	fn test_from_toml_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "page_size = 10").unwrap();
		let settings = ShortcutSettings::from_toml_file(file.path()).unwrap();
		assert_eq!(settings.page_size, 10);
	}

	#[rstest]
	fn test_from_toml_file_missing() {
		let result = ShortcutSettings::from_toml_file("/nonexistent/shortcuts.toml");
		assert!(matches!(result, Err(ShortcutError::Io(_))));
	}

	#[rstest]
	#[serial(shortcut_env)]
	fn test_env_overrides() {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::set_var(ENV_API_URL_NAMESPACE, "v1");
			env::set_var(ENV_PAGE_SIZE, "50");
		}

		let settings = ShortcutSettings::default().with_env_overrides();

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		unsafe {
			env::remove_var(ENV_API_URL_NAMESPACE);
			env::remove_var(ENV_PAGE_SIZE);
		}

		let settings = settings.unwrap();
		assert_eq!(settings.api_url_namespace.as_deref(), Some("v1"));
		assert_eq!(settings.page_size, 50);
	}

	#[rstest]
	#[serial(shortcut_env)]
	fn test_env_overrides_rejects_bad_page_size() {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::set_var(ENV_PAGE_SIZE, "many");
		}

		let result = ShortcutSettings::default().with_env_overrides();

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		unsafe {
			env::remove_var(ENV_PAGE_SIZE);
		}

		assert!(matches!(result, Err(ShortcutError::Settings(_))));
	}

	#[rstest]
	#[serial(shortcut_env)]
	fn test_empty_env_namespace_clears_namespace() {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			env::set_var(ENV_API_URL_NAMESPACE, "");
		}

		let settings = ShortcutSettings::default()
			.with_api_url_namespace("api")
			.with_env_overrides();

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		unsafe {
			env::remove_var(ENV_API_URL_NAMESPACE);
		}

		assert_eq!(settings.unwrap().api_url_namespace, None);
	}
}
