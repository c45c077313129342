//! Catalog Filter/Group Engine
//!
//! Derives the visible, grouped view of the catalog from the current search
//! query and category selection. Never mutates the catalog; every call builds
//! a fresh view borrowing the entries.

use crate::models::AppEntry;

/// Whether an entry matches the free-text query.
///
/// `name` and `description` are matched case-sensitively; `english_name` and
/// `keywords` are matched case-insensitively. The empty query matches all.
pub fn matches_query(app: &AppEntry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    if app.name.contains(query) || app.description.contains(query) {
        return true;
    }

    let query_lower = query.to_lowercase();
    if app
        .english_name
        .as_ref()
        .is_some_and(|en| en.to_lowercase().contains(&query_lower))
    {
        return true;
    }
    app.keywords
        .iter()
        .any(|k| k.to_lowercase().contains(&query_lower))
}

/// Whether an entry passes the category selection.
///
/// Narrow viewports ignore the selection entirely.
pub fn matches_category(app: &AppEntry, selected_category: &str, is_narrow: bool) -> bool {
    is_narrow || selected_category.is_empty() || app.category == selected_category
}

/// One category's slice of the visible result
#[derive(Debug, Clone, PartialEq)]
pub struct AppGroup<'a> {
    pub category: &'a str,
    pub apps: Vec<&'a AppEntry>,
    /// Position of each entry of `apps` in the slice that was filtered
    pub indices: Vec<usize>,
}

impl<'a> AppGroup<'a> {
    /// Entries paired with their catalog positions
    pub fn entries(&self) -> impl Iterator<Item = (usize, &'a AppEntry)> + '_ {
        self.indices.iter().copied().zip(self.apps.iter().copied())
    }
}

/// Ordered mapping from category name to its visible entries
///
/// Groups appear in first-seen order of the filtered entries, not by the
/// categories' `order` field. Only non-empty groups are present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedApps<'a> {
    groups: Vec<AppGroup<'a>>,
}

impl<'a> GroupedApps<'a> {
    /// No entry survived filtering ("no results")
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Total visible entries across all groups
    pub fn total_apps(&self) -> usize {
        self.groups.iter().map(|g| g.apps.len()).sum()
    }

    pub fn get(&self, category: &str) -> Option<&[&'a AppEntry]> {
        self.groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.apps.as_slice())
    }

    /// Category names in group order
    pub fn categories(&self) -> Vec<&'a str> {
        self.groups.iter().map(|g| g.category).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppGroup<'a>> {
        self.groups.iter()
    }

    fn push(&mut self, index: usize, app: &'a AppEntry) {
        match self.groups.iter_mut().find(|g| g.category == app.category) {
            Some(group) => {
                group.apps.push(app);
                group.indices.push(index);
            }
            None => self.groups.push(AppGroup {
                category: app.category.as_str(),
                apps: vec![app],
                indices: vec![index],
            }),
        }
    }
}

/// Compute the visible groups for the current query and selection
pub fn visible_groups<'a>(
    apps: &'a [AppEntry],
    query: &str,
    selected_category: &str,
    is_narrow: bool,
) -> GroupedApps<'a> {
    let mut grouped = GroupedApps::default();
    apps.iter()
        .enumerate()
        .filter(|(_, app)| matches_query(app, query))
        .filter(|(_, app)| matches_category(app, selected_category, is_narrow))
        .for_each(|(index, app)| grouped.push(index, app));
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(name: &str, category: &str) -> AppEntry {
        AppEntry::new(name, category)
    }

    fn sample() -> Vec<AppEntry> {
        vec![app("Alpha", "Tools"), app("Beta", "Tools"), app("Gamma", "Media")]
    }

    fn names(apps: &[&AppEntry]) -> Vec<String> {
        apps.iter().map(|a| a.name.clone()).collect()
    }

    #[test]
    fn test_empty_query_groups_in_insertion_order() {
        let apps = sample();
        let groups = visible_groups(&apps, "", "", false);
        // Media has the lower `order` in the catalog, but Tools was seen first.
        assert_eq!(groups.categories(), vec!["Tools", "Media"]);
        assert_eq!(names(groups.get("Tools").unwrap()), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let apps = sample();
        assert!(visible_groups(&apps, "alpha", "", false).is_empty());

        let groups = visible_groups(&apps, "Alpha", "", false);
        assert_eq!(groups.categories(), vec!["Tools"]);
        assert_eq!(names(groups.get("Tools").unwrap()), vec!["Alpha"]);
        assert!(groups.get("Media").is_none());
    }

    #[test]
    fn test_english_name_and_keywords_case_insensitive() {
        let mut apps = sample();
        apps[0].english_name = Some("Alpha Mail".to_string());
        apps[2].keywords = vec!["Video".to_string(), "STREAM".to_string()];

        let groups = visible_groups(&apps, "alpha", "", false);
        assert_eq!(names(groups.get("Tools").unwrap()), vec!["Alpha"]);
        assert!(groups.get("Media").is_none());

        let groups = visible_groups(&apps, "stream", "", false);
        assert_eq!(groups.categories(), vec!["Media"]);
    }

    #[test]
    fn test_description_match() {
        let mut apps = sample();
        apps[1].description = "Ticketing system".to_string();
        let groups = visible_groups(&apps, "Ticket", "", false);
        assert_eq!(groups.total_apps(), 1);
        assert!(visible_groups(&apps, "ticket", "", false).is_empty());
    }

    #[test]
    fn test_selected_category_on_wide_viewport() {
        let apps = sample();
        let groups = visible_groups(&apps, "", "Media", false);
        assert_eq!(groups.categories(), vec!["Media"]);
        assert_eq!(names(groups.get("Media").unwrap()), vec!["Gamma"]);
    }

    #[test]
    fn test_selected_category_ignored_on_narrow_viewport() {
        let apps = sample();
        let groups = visible_groups(&apps, "", "Media", true);
        assert_eq!(groups.categories(), vec!["Tools", "Media"]);
        assert_eq!(groups.total_apps(), 3);
    }

    #[test]
    fn test_no_results_is_empty() {
        let apps = sample();
        let groups = visible_groups(&apps, "zzz", "", false);
        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
    }

    #[test]
    fn test_interleaved_categories_keep_relative_order() {
        let apps = vec![
            app("One", "B"),
            app("Two", "A"),
            app("Three", "B"),
            app("Four", "A"),
        ];
        let groups = visible_groups(&apps, "", "", false);
        assert_eq!(groups.categories(), vec!["B", "A"]);
        assert_eq!(names(groups.get("B").unwrap()), vec!["One", "Three"]);
        assert_eq!(names(groups.get("A").unwrap()), vec!["Two", "Four"]);
    }

    #[test]
    fn test_groups_carry_catalog_positions() {
        let apps = vec![
            app("One", "B"),
            app("Two", "A"),
            app("Three", "B"),
            app("Four", "A"),
        ];
        let groups = visible_groups(&apps, "T", "", false);
        assert_eq!(groups.categories(), vec!["A", "B"]);
        let first: Vec<(usize, &str)> = groups
            .iter()
            .next()
            .unwrap()
            .entries()
            .map(|(i, a)| (i, a.name.as_str()))
            .collect();
        assert_eq!(first, vec![(1, "Two")]);
        assert_eq!(groups.iter().nth(1).unwrap().indices, vec![2]);
        for group in groups.iter() {
            for (index, entry) in group.entries() {
                assert!(std::ptr::eq(&apps[index], entry));
            }
        }
    }
}
