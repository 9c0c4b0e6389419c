//! Mobile navigation menu

/// Open/closed state of the burger menu. While open the page body must not
/// scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Menu {
    open: bool,
}

impl Menu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Burger click. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Nav link click. Returns whether anything changed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut menu = Menu::default();
        assert!(menu.toggle());
        assert!(menu.is_open());
        assert!(!menu.toggle());
    }

    #[test]
    fn test_close() {
        let mut menu = Menu::default();
        assert!(!menu.close());
        menu.toggle();
        assert!(menu.close());
        assert!(!menu.is_open());
    }
}
