use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::state::{ListCursor, Navigable};

/// On/off switches over a fixed list (bot toggles, notification settings)
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleList {
    states: Vec<bool>,
    pub cursor: ListCursor,
}

impl ToggleList {
    pub fn new(initial: impl IntoIterator<Item = bool>) -> Self {
        let states: Vec<bool> = initial.into_iter().collect();
        let cursor = ListCursor::new(states.len());
        Self { states, cursor }
    }

    pub fn is_on(&self, index: usize) -> bool {
        self.states.get(index).copied().unwrap_or(false)
    }

    pub fn on_count(&self) -> usize {
        self.states.iter().filter(|on| **on).count()
    }

    /// Flip the highlighted switch, returning (index, new state)
    pub fn toggle_current(&mut self) -> Option<(usize, bool)> {
        let index = self.cursor.selected();
        let state = self.states.get_mut(index)?;
        *state = !*state;
        Some((index, *state))
    }

    /// Up/Down move, Space or Enter toggles
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<(usize, bool)> {
        match key.code {
            KeyCode::Up => {
                self.cursor.previous();
                None
            }
            KeyCode::Down => {
                self.cursor.next();
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_current(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_current() {
        let mut list = ToggleList::new([true, true, false]);
        assert_eq!(list.on_count(), 2);
        list.handle_key(KeyEvent::from(KeyCode::Down));
        list.handle_key(KeyEvent::from(KeyCode::Down));
        assert_eq!(list.handle_key(KeyEvent::from(KeyCode::Char(' '))), Some((2, true)));
        assert_eq!(list.on_count(), 3);
    }

    #[test]
    fn test_out_of_range_is_off() {
        let list = ToggleList::new([true]);
        assert!(!list.is_on(5));
    }

    #[test]
    fn test_empty_list_toggles_nothing() {
        let mut list = ToggleList::new([]);
        assert_eq!(list.toggle_current(), None);
        assert!(list.is_empty());
    }
}
