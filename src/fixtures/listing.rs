use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s[^>]*?href\s*=\s*["']([^"']*)["']"#).expect("Invalid regex")
});

/// One entry of a directory index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Local name of the file or directory.
    pub name: String,
    /// Absolute URL of the entry.
    pub url: String,
    pub is_dir: bool,
}

/// Extract the entries of an HTML directory index served at `base_url`.
///
/// Parent links, the site root, sort links (`?C=N;O=D`) and links leaving
/// the listing are skipped.
#[must_use]
pub fn parse_listing(html: &str, base_url: &str) -> Vec<ListingEntry> {
    HREF.captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .filter_map(|href| entry_for(href.as_str(), base_url))
        .collect()
}

fn entry_for(href: &str, base_url: &str) -> Option<ListingEntry> {
    let href = href.trim();
    if href.is_empty()
        || href == "../"
        || href == "/"
        || href.starts_with('?')
        || href.starts_with('#')
        || href.starts_with("..")
        || href.starts_with('/')
        || href.contains("://")
    {
        return None;
    }

    let is_dir = href.ends_with('/');
    let name = href.trim_end_matches('/').rsplit('/').next()?.to_string();
    if !is_plain_name(&name) {
        return None;
    }

    Some(ListingEntry {
        name,
        url: join_url(base_url, href),
        is_dir,
    })
}

/// A name that stays inside the directory it is joined onto.
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Join a relative `href` onto a base URL, inserting exactly one slash.
#[must_use]
pub fn join_url(base_url: &str, href: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        href.trim_start_matches("./")
    )
}
