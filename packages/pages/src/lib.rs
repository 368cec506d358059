include!(concat!(env!("OUT_DIR"), "/pages.rs"));

/// A landing-page record with its slug and raw YAML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub slug: &'static str,
    pub content: &'static str,
}

/// Get all embedded pages, ordered by slug
pub fn get_all_pages() -> Vec<Page> {
    PAGES
        .iter()
        .map(|&(slug, content)| Page { slug, content })
        .collect()
}

/// Get a page by slug
pub fn get_page(slug: &str) -> Option<Page> {
    PAGES
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|&(slug, content)| Page { slug, content })
}

/// List all page slugs
pub fn list_pages() -> Vec<&'static str> {
    PAGES.iter().map(|(slug, _)| *slug).collect()
}
