//! Route Table
//!
//! The client-side paths the shell understands, as an ordered list of
//! (pattern, page) pairs. `App` declares its `<Route>`s from this table
//! and the header builds its links from it, so the two cannot drift.

/// A routed page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    UploadMeal,
    MealHistory,
}

/// Ordered route table
pub const ROUTES: [(&str, Page); 3] = [
    ("/", Page::Home),
    ("/upload", Page::UploadMeal),
    ("/history", Page::MealHistory),
];

/// Marker rendered by the fallback page
pub const NOT_FOUND_ID: &str = "not-found";

impl Page {
    /// Route pattern
    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::UploadMeal => "/upload",
            Page::MealHistory => "/history",
        }
    }

    /// Navigation label
    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::UploadMeal => "Upload Meal",
            Page::MealHistory => "Meal History",
        }
    }

    /// Value of the `data-page` attribute on the page's root element
    pub fn id(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::UploadMeal => "upload-meal",
            Page::MealHistory => "meal-history",
        }
    }
}

/// Find the page for a location path
///
/// Query string and fragment are ignored and one trailing slash is
/// tolerated. Anything else must match a pattern exactly.
pub fn resolve(path: &str) -> Option<Page> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = match path {
        "" => "/",
        "/" => "/",
        p => p.strip_suffix('/').unwrap_or(p),
    };

    ROUTES
        .iter()
        .find(|(pattern, _)| *pattern == path)
        .map(|(_, page)| *page)
}

/// `data-page` marker expected for a path, including the fallback
pub fn page_id_for(path: &str) -> &'static str {
    resolve(path).map(Page::id).unwrap_or(NOT_FOUND_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defined_paths() {
        assert_eq!(resolve("/"), Some(Page::Home));
        assert_eq!(resolve("/upload"), Some(Page::UploadMeal));
        assert_eq!(resolve("/history"), Some(Page::MealHistory));
    }

    #[test]
    fn test_table_matches_page_paths() {
        for (pattern, page) in ROUTES {
            assert_eq!(page.path(), pattern);
            assert_eq!(resolve(pattern), Some(page));
        }
    }

    #[test]
    fn test_each_path_maps_to_exactly_one_page() {
        for (pattern, _) in ROUTES {
            let matches = ROUTES.iter().filter(|(p, _)| *p == pattern).count();
            assert_eq!(matches, 1, "{} is ambiguous", pattern);
        }
    }

    #[test]
    fn test_trailing_slash_query_and_fragment() {
        assert_eq!(resolve("/upload/"), Some(Page::UploadMeal));
        assert_eq!(resolve("/history?user=alice"), Some(Page::MealHistory));
        assert_eq!(resolve("/#top"), Some(Page::Home));
        assert_eq!(resolve(""), Some(Page::Home));
    }

    #[test]
    fn test_unmatched_paths() {
        assert_eq!(resolve("/xyz"), None);
        assert_eq!(resolve("/upload/extra"), None);
        assert_eq!(resolve("/History"), None);
        assert_eq!(page_id_for("/xyz"), NOT_FOUND_ID);
    }

    #[test]
    fn test_page_ids_are_distinct() {
        let ids: Vec<_> = ROUTES.iter().map(|(_, p)| p.id()).collect();
        assert_eq!(ids, vec!["home", "upload-meal", "meal-history"]);
        assert!(!ids.contains(&NOT_FOUND_ID));
    }
}
