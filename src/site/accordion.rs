//! FAQ accordion: at most one item open at a time

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accordion {
    open: Vec<bool>,
}

impl Accordion {
    pub fn new(items: usize) -> Self {
        Self {
            open: vec![false; items],
        }
    }

    /// Start from the items' current open state.
    pub fn from_open(open: Vec<bool>) -> Self {
        Self { open }
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    pub fn open_item(&self) -> Option<usize> {
        self.open.iter().position(|open| *open)
    }

    /// Click on header `index`: close every other item and flip this one.
    ///
    /// Returns the new state of every item so the caller can update
    /// `active` classes and body heights in one pass. Out-of-range clicks
    /// change nothing.
    pub fn toggle(&mut self, index: usize) -> &[bool] {
        if index < self.open.len() {
            let was_open = self.open[index];
            self.open.iter_mut().for_each(|open| *open = false);
            self.open[index] = !was_open;
        }
        &self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let accordion = Accordion::new(4);
        assert_eq!(accordion.len(), 4);
        assert_eq!(accordion.open_item(), None);
    }

    #[test]
    fn test_toggle_opens_and_closes() {
        let mut accordion = Accordion::new(3);
        assert_eq!(accordion.toggle(1), &[false, true, false]);
        assert!(accordion.is_open(1));
        assert_eq!(accordion.toggle(1), &[false, false, false]);
        assert_eq!(accordion.open_item(), None);
    }

    #[test]
    fn test_opening_another_closes_previous() {
        let mut accordion = Accordion::new(3);
        accordion.toggle(0);
        accordion.toggle(2);
        assert_eq!(accordion.open_item(), Some(2));
        assert!(!accordion.is_open(0));
    }

    #[test]
    fn test_initial_state_from_page() {
        let mut accordion = Accordion::from_open(vec![true, false, true]);
        assert_eq!(accordion.open_item(), Some(0));
        // Any click leaves at most one item open
        assert_eq!(accordion.toggle(1), &[false, true, false]);

        let mut accordion = Accordion::from_open(vec![true, false, true]);
        assert_eq!(accordion.toggle(2), &[false, false, false]);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut accordion = Accordion::new(2);
        accordion.toggle(0);
        assert_eq!(accordion.toggle(7), &[true, false]);
        assert!(!accordion.is_open(7));
        assert!(Accordion::default().is_empty());
    }
}
