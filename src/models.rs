//! Core data types for the App Launcher.
//!
//! Wire types mirror the catalog endpoint's JSON; the normalized types are
//! what the filter engine and the UI consume.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order assigned to categories that arrive without one; pushes them last.
pub const DEFAULT_CATEGORY_ORDER: i64 = 999;

/// Tile background for apps that arrive without `icon_background_color`.
pub const DEFAULT_APP_BG_COLOR: &str = "rgba(0,0,0,0.1)";

/// A glyph painted directly instead of a fetched image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineIcon {
    pub glyph: String,
    /// CSS colour string used to tint the glyph
    pub tint: String,
}

/// Icon attached to an app entry.
///
/// Rendering dispatches on the tag: `Url` is fetched and drawn, `Inline` is
/// painted as text, `None` falls back to the placeholder tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Icon {
    Url(String),
    Inline(InlineIcon),
    #[default]
    None,
}

impl Icon {
    pub fn is_none(&self) -> bool {
        matches!(self, Icon::None)
    }
}

/// One launchable item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub name: String,
    pub english_name: Option<String>,
    pub keywords: Vec<String>,
    pub background_color: String,
    pub description: String,
    pub icon: Icon,
    /// Name of the owning category (join key, not an id)
    pub category: String,
    pub url: String,
}

impl AppEntry {
    /// Minimal entry with defaults for every optional field.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        AppEntry {
            name: name.into(),
            english_name: None,
            keywords: Vec::new(),
            background_color: DEFAULT_APP_BG_COLOR.to_string(),
            description: String::new(),
            icon: Icon::None,
            category: category.into(),
            url: String::new(),
        }
    }
}

/// A named grouping with display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Same as `name` in the normalized view
    pub id: String,
    pub name: String,
    pub order: i64,
}

impl Category {
    pub fn new(name: impl Into<String>, order: Option<i64>) -> Self {
        let name = name.into();
        Category {
            id: name.clone(),
            name,
            order: order.unwrap_or(DEFAULT_CATEGORY_ORDER),
        }
    }
}

/// Read-only snapshot of categories and their apps.
///
/// Replaced wholesale on every successful load; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub apps: Vec<AppEntry>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.apps.is_empty()
    }
}

/// Page-level status of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    /// Carries the HTTP status when the server answered
    Error { message: String, status: Option<u16> },
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::Idle => write!(f, "idle"),
            LoadStatus::Loading => write!(f, "loading"),
            LoadStatus::Success => write!(f, "success"),
            LoadStatus::Error { .. } => write!(f, "error"),
        }
    }
}

// ============================================================================
// WIRE TYPES
// ============================================================================

/// `{ "data": [...] }` envelope returned by the catalog endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    pub data: Option<Vec<BackendCategory>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendCategory {
    pub name: String,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub apps: Option<Vec<BackendApp>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendApp {
    pub name: String,
    #[serde(default, rename = "englishName")]
    pub english_name: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub icon_background_color: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<BackendIcon>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendIcon {
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_default_order() {
        let cat = Category::new("Tools", None);
        assert_eq!(cat.order, DEFAULT_CATEGORY_ORDER);
        assert_eq!(cat.id, "Tools");
    }

    #[test]
    fn test_app_entry_defaults() {
        let app = AppEntry::new("Alpha", "Tools");
        assert_eq!(app.background_color, DEFAULT_APP_BG_COLOR);
        assert!(app.icon.is_none());
        assert!(app.keywords.is_empty());
    }

    #[test]
    fn test_backend_app_optional_fields() {
        let json = r#"{"name":"Mail","description":"Inbox","url":"/mail"}"#;
        let app: BackendApp = serde_json::from_str(json).unwrap();
        assert!(app.english_name.is_none());
        assert!(app.icon.is_none());
        assert!(app.keywords.is_none());
    }

    #[test]
    fn test_load_status_display() {
        assert_eq!(LoadStatus::Loading.to_string(), "loading");
        let err = LoadStatus::Error { message: "x".into(), status: Some(500) };
        assert_eq!(err.to_string(), "error");
    }
}
