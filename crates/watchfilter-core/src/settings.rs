//! Filter settings
//!
//! Global switches the compiler reads while building registries and
//! statements. Settings can be loaded from a TOML or JSON file, from a TOML
//! string, or from `WATCHFILTER_`-prefixed environment variables.
//!
//! ```rust
//! use watchfilter_core::settings::FilterSettings;
//!
//! let settings = FilterSettings::from_toml_str(
//!     r#"
//!     display_subprojects_issues = false
//!     locale = "fr"
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(!settings.display_subprojects_issues);
//! assert_eq!(settings.first_day_of_week(), chrono::Weekday::Mon);
//! ```

use std::path::PathBuf;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of every environment variable read by [`FilterSettings::from_env`].
pub const ENV_PREFIX: &str = "WATCHFILTER_";

/// Locales whose calendar week starts on Sunday.
const SUNDAY_FIRST_LOCALES: &[&str] = &["en", "ja", "pt-BR", "he"];

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("Failed to read {path}: {source}")]
	FileError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Unsupported settings format: {0}")]
	UnsupportedFormat(String),

	#[error("Invalid value for {key}: '{value}'")]
	InvalidValue { key: String, value: String },

	#[error("Validation error: {0}")]
	ValidationError(String),
}

/// Global filter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
	/// Include subproject issues when a filter has no subproject entry
	pub display_subprojects_issues: bool,

	/// Locale used to pick the first day of the week
	pub locale: String,

	/// Explicit first day of the week, 1 (Monday) to 7 (Sunday)
	pub first_day_of_week: Option<u32>,

	/// Identity substituted for "me" when the caller is anonymous
	pub me_sentinel: String,
}

impl Default for FilterSettings {
	fn default() -> Self {
		Self {
			display_subprojects_issues: true,
			locale: "en".to_string(),
			first_day_of_week: None,
			me_sentinel: "0".to_string(),
		}
	}
}

impl FilterSettings {
	/// Resolved first day of the week.
	///
	/// An explicit `first_day_of_week` wins; otherwise Sunday for the
	/// locales that start their week on Sunday and Monday for the rest.
	pub fn first_day_of_week(&self) -> Weekday {
		match self.first_day_of_week {
			Some(day @ 1..=7) => weekday_from_number(day),
			_ if SUNDAY_FIRST_LOCALES.contains(&self.locale.as_str()) => Weekday::Sun,
			_ => Weekday::Mon,
		}
	}

	/// Validate settings
	pub fn validate(&self) -> Result<(), SettingsError> {
		if let Some(day) = self.first_day_of_week
			&& !(1..=7).contains(&day)
		{
			return Err(SettingsError::ValidationError(format!(
				"first_day_of_week must be between 1 and 7, got {}",
				day
			)));
		}

		if self.locale.trim().is_empty() {
			return Err(SettingsError::ValidationError(
				"locale must not be empty".to_string(),
			));
		}

		Ok(())
	}

	/// Parse settings from a TOML document
	pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(contents)
			.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?;
		settings.validate()?;
		Ok(settings)
	}

	/// Load settings from a `.toml` or `.json` file
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|source| SettingsError::FileError {
			path: path.clone(),
			source,
		})?;

		let settings: Self = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => toml::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?,
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e)))?,
			_ => {
				return Err(SettingsError::UnsupportedFormat(
					"Supported formats: .toml, .json".to_string(),
				));
			}
		};

		settings.validate()?;
		Ok(settings)
	}

	/// Load settings from environment variables
	///
	/// Reads `WATCHFILTER_DISPLAY_SUBPROJECTS_ISSUES`, `WATCHFILTER_LOCALE`,
	/// `WATCHFILTER_FIRST_DAY_OF_WEEK` and `WATCHFILTER_ME_SENTINEL`; unset
	/// variables keep their defaults.
	pub fn from_env() -> Result<Self, SettingsError> {
		let mut settings = Self::default();

		if let Some(value) = env_var("DISPLAY_SUBPROJECTS_ISSUES") {
			settings.display_subprojects_issues =
				parse_bool(&value).ok_or_else(|| SettingsError::InvalidValue {
					key: format!("{}DISPLAY_SUBPROJECTS_ISSUES", ENV_PREFIX),
					value: value.clone(),
				})?;
		}

		if let Some(locale) = env_var("LOCALE") {
			settings.locale = locale;
		}

		if let Some(value) = env_var("FIRST_DAY_OF_WEEK") {
			let day = value
				.trim()
				.parse::<u32>()
				.map_err(|_| SettingsError::InvalidValue {
					key: format!("{}FIRST_DAY_OF_WEEK", ENV_PREFIX),
					value: value.clone(),
				})?;
			settings.first_day_of_week = Some(day);
		}

		if let Some(sentinel) = env_var("ME_SENTINEL") {
			settings.me_sentinel = sentinel;
		}

		settings.validate()?;
		Ok(settings)
	}
}

fn env_var(key: &str) -> Option<String> {
	std::env::var(format!("{}{}", ENV_PREFIX, key)).ok()
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Some(true),
		"false" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}

fn weekday_from_number(day: u32) -> Weekday {
	match day {
		1 => Weekday::Mon,
		2 => Weekday::Tue,
		3 => Weekday::Wed,
		4 => Weekday::Thu,
		5 => Weekday::Fri,
		6 => Weekday::Sat,
		_ => Weekday::Sun,
	}
}
