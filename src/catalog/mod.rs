//! Catalog Data Loader
//!
//! Fetches categories with nested apps from the catalog endpoint and
//! normalizes them into the flat shapes the filter engine and UI consume.
//!
//! A load either yields a complete `Catalog` or a `CatalogLoadError`; there is
//! no partially-populated result.

pub mod filter;

use crate::error::CatalogLoadError;
use crate::models::{
    AppEntry, BackendCategory, Catalog, CatalogResponse, Category, Icon, DEFAULT_APP_BG_COLOR,
};
use futures::future::{BoxFuture, FutureExt};
use std::time::Duration;

pub use filter::{matches_query, visible_groups, GroupedApps};

/// Source of catalog snapshots
///
/// The UI controller only sees this trait so tests can inject canned catalogs.
pub trait CatalogSource: Send + Sync {
    fn fetch(&self) -> BoxFuture<'static, Result<Catalog, CatalogLoadError>>;
}

/// Production catalog source: a single unauthenticated GET against the endpoint
#[derive(Clone, Debug)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCatalogSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CatalogLoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogLoadError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(HttpCatalogSource {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and normalize the catalog
    pub async fn load(&self) -> Result<Catalog, CatalogLoadError> {
        fetch_catalog(&self.client, &self.endpoint).await
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch(&self) -> BoxFuture<'static, Result<Catalog, CatalogLoadError>> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        async move { fetch_catalog(&client, &endpoint).await }.boxed()
    }
}

async fn fetch_catalog(client: &reqwest::Client, endpoint: &str) -> Result<Catalog, CatalogLoadError> {
    log::debug!("[Catalog] Fetching: {}", endpoint);

    let response = client
        .get(endpoint)
        .send()
        .await
        .map_err(|e| CatalogLoadError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("[Catalog] Endpoint answered HTTP {}", status.as_u16());
        return Err(CatalogLoadError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| CatalogLoadError::Network(format!("Failed to read response body: {}", e)))?;

    let catalog = parse_catalog(&body)?;
    log::info!(
        "[Catalog] Loaded {} categories, {} apps",
        catalog.categories.len(),
        catalog.apps.len()
    );
    Ok(catalog)
}

/// Parse a raw response body into a normalized catalog
pub fn parse_catalog(body: &str) -> Result<Catalog, CatalogLoadError> {
    let response: CatalogResponse = serde_json::from_str(body)
        .map_err(|e| CatalogLoadError::InvalidPayload(e.to_string()))?;

    let data = response.data.ok_or_else(|| {
        CatalogLoadError::InvalidPayload("Invalid response format: missing data array".to_string())
    })?;

    Ok(normalize(data))
}

/// Flatten backend categories into `Catalog`, filling defaults
///
/// Every app's `category` is set to its parent category's name.
pub fn normalize(data: Vec<BackendCategory>) -> Catalog {
    let mut categories = Vec::with_capacity(data.len());
    let mut apps = Vec::new();

    for backend_category in data {
        let category_name = backend_category.name;
        for app in backend_category.apps.unwrap_or_default() {
            let icon = match app.icon.and_then(|i| i.url) {
                Some(url) if !url.is_empty() => Icon::Url(url),
                _ => Icon::None,
            };
            apps.push(AppEntry {
                name: app.name,
                english_name: app.english_name,
                keywords: app.keywords.unwrap_or_default(),
                background_color: app
                    .icon_background_color
                    .unwrap_or_else(|| DEFAULT_APP_BG_COLOR.to_string()),
                description: app.description,
                icon,
                category: category_name.clone(),
                url: app.url,
            });
        }
        categories.push(Category::new(category_name, backend_category.order));
    }

    Catalog { categories, apps }
}

/// Resolve a possibly root-relative URL against the backend base URL
///
/// Empty input stays empty; anything already starting with `http` is returned
/// as-is.
pub fn resolve_url(base: &str, url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{}{}", base, url)
    }
}

/// Category names sorted by ascending `order`, ties kept in load order
pub fn category_names(categories: &[Category]) -> Vec<String> {
    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by_key(|c| c.order);
    sorted.into_iter().map(|c| c.name.clone()).collect()
}

/// Whether a category with this name exists in the loaded set
pub fn is_valid_category(categories: &[Category], name: &str) -> bool {
    categories.iter().any(|c| c.name == name)
}
