//! `imgretry open` – resolve a click on an image to its description page.

use anyhow::Result;
use imgretry_core::navigation::{
    ClickEvent, EventDisposition, LinkOpener, MouseButton, Navigator, NAVIGATION_HINT,
};
use url::Url;

/// Prints the URL instead of launching a browser.
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn open_in_new_context(&self, url: &Url) -> Result<()> {
        println!("{url}");
        Ok(())
    }
}

pub fn run_open(title: &str, button: MouseButton, ctrl: bool, meta: bool) -> Result<()> {
    let click = ClickEvent { button, ctrl, meta };
    let opener = LinkOpener::new(PrintNavigator);
    match opener.handle_click(title, &click)? {
        EventDisposition::PreventDefault { opened } => {
            tracing::info!(%opened, "description page opened");
        }
        EventDisposition::Ignored => {
            println!("click ignored. {NAVIGATION_HINT}");
        }
    }
    Ok(())
}
