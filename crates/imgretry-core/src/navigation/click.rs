//! Click classification.

/// Mouse button as reported by the input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    /// Auxiliary (usually middle) button.
    Middle,
    Secondary,
    Other(u16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => MouseButton::Primary,
            1 => MouseButton::Middle,
            2 => MouseButton::Secondary,
            n => MouseButton::Other(n),
        }
    }
}

/// The parts of a click or auxclick event that matter for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub button: MouseButton,
    pub ctrl: bool,
    /// Command key on macOS.
    pub meta: bool,
}

impl ClickEvent {
    pub fn new(button: MouseButton) -> Self {
        Self {
            button,
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Middle click, or primary click with Ctrl or Cmd held.
    pub fn opens_in_new_context(&self) -> bool {
        match self.button {
            MouseButton::Middle => true,
            MouseButton::Primary => self.ctrl || self.meta,
            MouseButton::Secondary | MouseButton::Other(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_click_qualifies_with_or_without_modifiers() {
        assert!(ClickEvent::new(MouseButton::Middle).opens_in_new_context());
        assert!(ClickEvent::new(MouseButton::Middle)
            .with_ctrl()
            .opens_in_new_context());
    }

    #[test]
    fn primary_click_needs_ctrl_or_meta() {
        assert!(!ClickEvent::new(MouseButton::Primary).opens_in_new_context());
        assert!(ClickEvent::new(MouseButton::Primary)
            .with_ctrl()
            .opens_in_new_context());
        assert!(ClickEvent::new(MouseButton::Primary)
            .with_meta()
            .opens_in_new_context());
    }

    #[test]
    fn secondary_and_extra_buttons_never_qualify() {
        assert!(!ClickEvent::new(MouseButton::Secondary)
            .with_ctrl()
            .opens_in_new_context());
        assert!(!ClickEvent::new(MouseButton::from_code(4))
            .with_meta()
            .opens_in_new_context());
    }

    #[test]
    fn button_codes_follow_dom_numbering() {
        assert_eq!(MouseButton::from_code(0), MouseButton::Primary);
        assert_eq!(MouseButton::from_code(1), MouseButton::Middle);
        assert_eq!(MouseButton::from_code(2), MouseButton::Secondary);
        assert_eq!(MouseButton::from_code(3), MouseButton::Other(3));
    }
}
