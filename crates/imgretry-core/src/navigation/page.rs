//! Description page URL for an image title.

use url::Url;

use crate::error::NavigationError;

/// Wiki that hosts the file description pages.
pub const COMMONS_WIKI_BASE: &str = "https://commons.wikimedia.org/wiki/";

/// Build the description page URL for `title` under [`COMMONS_WIKI_BASE`].
pub fn description_url(title: &str) -> Result<Url, NavigationError> {
    let base = Url::parse(COMMONS_WIKI_BASE)?;
    description_url_under(&base, title)
}

/// Build the description page URL for `title` under `base`.
///
/// Spaces become underscores (the wiki's canonical form) and the title is
/// percent-encoded as a single path segment, so `/`, `?`, `#` and `%` inside
/// the title cannot change the URL structure.
pub fn description_url_under(base: &Url, title: &str) -> Result<Url, NavigationError> {
    if title.trim().is_empty() {
        return Err(NavigationError::EmptyTitle);
    }
    let normalized = title.replace(' ', "_");
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| NavigationError::InvalidBase(base.clone()))?
        .pop_if_empty()
        .push(&normalized);
    Ok(url)
}
