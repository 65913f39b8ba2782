//! Open an image's file description page in a new tab.
//!
//! Independent of the reload throttler: no shared state, no retries. The
//! element-to-title lookup belongs to the page; this module takes the title.

mod click;
mod opener;
mod page;

pub use click::{ClickEvent, MouseButton};
pub use opener::{EventDisposition, LinkOpener, Navigator, NAVIGATION_HINT};
pub use page::{description_url, description_url_under, COMMONS_WIKI_BASE};
