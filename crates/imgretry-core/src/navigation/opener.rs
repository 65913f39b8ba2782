//! Open an image's description page on a qualifying click.

use anyhow::Result;
use url::Url;

use super::click::ClickEvent;
use super::page::description_url;

/// Text shown next to the gallery controls explaining the click gesture.
pub const NAVIGATION_HINT: &str = "Middle-click, control-click or command-click an image \
to open the file description page in a new tab.";

/// Opens URLs in a new browsing context (tab, window, external browser).
pub trait Navigator {
    fn open_in_new_context(&self, url: &Url) -> Result<()>;
}

/// What the event source should do with the event after handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDisposition {
    /// The page was opened; suppress the event's default action.
    PreventDefault { opened: Url },
    /// Not a navigation gesture; let the default action run.
    Ignored,
}

/// Click handler attached to each image.
#[derive(Debug)]
pub struct LinkOpener<N> {
    navigator: N,
}

impl<N: Navigator> LinkOpener<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }

    /// Handle a click on the image titled `title`.
    pub fn handle_click(&self, title: &str, click: &ClickEvent) -> Result<EventDisposition> {
        if !click.opens_in_new_context() {
            return Ok(EventDisposition::Ignored);
        }
        let url = description_url(title)?;
        self.navigator.open_in_new_context(&url)?;
        tracing::debug!(%url, "opened description page");
        Ok(EventDisposition::PreventDefault { opened: url })
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MouseButton;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNavigator {
        opened: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn open_in_new_context(&self, url: &Url) -> Result<()> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    struct FailingNavigator;

    impl Navigator for FailingNavigator {
        fn open_in_new_context(&self, _url: &Url) -> Result<()> {
            anyhow::bail!("popup blocked")
        }
    }

    #[test]
    fn ctrl_click_opens_and_prevents_default() {
        let opener = LinkOpener::new(RecordingNavigator::default());
        let click = ClickEvent::new(MouseButton::Primary).with_ctrl();
        let disposition = opener.handle_click("File:Sunset 2.jpg", &click).unwrap();
        match disposition {
            EventDisposition::PreventDefault { opened } => assert_eq!(
                opened.as_str(),
                "https://commons.wikimedia.org/wiki/File:Sunset_2.jpg"
            ),
            EventDisposition::Ignored => panic!("expected navigation"),
        }
        assert_eq!(opener.navigator().opened.borrow().len(), 1);
    }

    #[test]
    fn plain_click_is_ignored() {
        let opener = LinkOpener::new(RecordingNavigator::default());
        let click = ClickEvent::new(MouseButton::Primary);
        assert_eq!(
            opener.handle_click("File:X.jpg", &click).unwrap(),
            EventDisposition::Ignored
        );
        assert!(opener.navigator().opened.borrow().is_empty());
    }

    #[test]
    fn ignored_click_does_not_validate_title() {
        let opener = LinkOpener::new(RecordingNavigator::default());
        let click = ClickEvent::new(MouseButton::Secondary);
        assert_eq!(
            opener.handle_click("", &click).unwrap(),
            EventDisposition::Ignored
        );
    }

    #[test]
    fn navigator_failure_is_reported() {
        let opener = LinkOpener::new(FailingNavigator);
        let click = ClickEvent::new(MouseButton::Middle);
        let err = opener.handle_click("File:X.jpg", &click).unwrap_err();
        assert!(err.to_string().contains("popup blocked"));
    }

    #[test]
    fn hint_names_all_gestures() {
        assert!(NAVIGATION_HINT.contains("Middle-click"));
        assert!(NAVIGATION_HINT.contains("control-click"));
        assert!(NAVIGATION_HINT.contains("command-click"));
    }
}
