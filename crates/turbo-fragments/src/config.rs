//! Fragment resolution configuration.

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::localization::LocalizationRoot;

/// Where site pages and fragments live, and which fragment placement to use.
///
/// ```toml
/// site_root = "/content/"
/// fragments_root = "/content/experience-fragments/"
/// fragment_location = "footer"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentConfig {
    /// Path prefix of site pages.
    pub site_root: String,
    /// Path prefix of fragment storage; replaces `site_root` in localization paths.
    pub fragments_root: String,
    /// Placement of the fragment on the page. `None` selects fragments
    /// without a placement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment_location: Option<String>,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            site_root: "/content/".to_string(),
            fragments_root: "/content/experience-fragments/".to_string(),
            fragment_location: None,
        }
    }
}

impl FragmentConfig {
    /// Parse from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ContentError> {
        Ok(toml::from_str(text)?)
    }

    /// Parse from JSON text. Missing keys take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set the fragment placement.
    pub fn with_fragment_location(mut self, location: impl Into<String>) -> Self {
        self.fragment_location = Some(location.into());
        self
    }

    /// The search scope used when a page has no localization root.
    pub fn default_scope(&self) -> String {
        trim_trailing_slash(&self.fragments_root)
    }

    /// The search scope for a page's localization root.
    ///
    /// The site root prefix inside the localization path is swapped for the
    /// fragments root: `/content/site/en` becomes
    /// `/content/experience-fragments/site/en`.
    pub fn fragments_scope(&self, root: Option<&LocalizationRoot>) -> String {
        match root {
            Some(root) => trim_trailing_slash(&root.path().replacen(
                self.site_root.as_str(),
                self.fragments_root.as_str(),
                1,
            )),
            None => self.default_scope(),
        }
    }
}

fn trim_trailing_slash(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FragmentConfig::default();
        assert_eq!(config.default_scope(), "/content/experience-fragments");
        assert!(config.fragment_location.is_none());
    }

    #[test]
    fn test_from_toml() {
        let config = FragmentConfig::from_toml_str(r#"fragment_location = "footer""#).unwrap();
        assert_eq!(config.fragment_location.as_deref(), Some("footer"));
        assert_eq!(config.site_root, "/content/");

        let config = FragmentConfig::from_toml_str(
            "site_root = \"/sites/\"\nfragments_root = \"/fragments/\"\n",
        )
        .unwrap();
        assert_eq!(config.default_scope(), "/fragments");
    }

    #[test]
    fn test_from_json() {
        let config = FragmentConfig::from_json_str(r#"{"fragment_location": "header"}"#).unwrap();
        assert_eq!(config, FragmentConfig::default().with_fragment_location("header"));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            FragmentConfig::from_toml_str("fragment_location = 3"),
            Err(ContentError::Config(_))
        ));
    }

    #[test]
    fn test_fragments_scope() {
        let config = FragmentConfig::default();
        let root = LocalizationRoot::LanguageRoot("/content/venia/us/en".to_string());
        assert_eq!(
            config.fragments_scope(Some(&root)),
            "/content/experience-fragments/venia/us/en"
        );
        assert_eq!(config.fragments_scope(None), "/content/experience-fragments");
    }

    #[test]
    fn test_trim_root() {
        assert_eq!(trim_trailing_slash("/"), "/");
        assert_eq!(trim_trailing_slash("/a/"), "/a");
    }
}
