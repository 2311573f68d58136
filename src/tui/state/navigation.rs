//! Selection handling for lists, tab rows and grids
//!
//! Every screen that highlights one entry out of many implements
//! [`Navigable`] (or holds a [`ListCursor`]) so arrow keys behave the same
//! everywhere.

/// Types that keep a wrapping selection over a list
///
/// Implementors provide the three accessors; movement comes for free.
///
/// # Example
/// ```
/// use molada_pay::tui::state::Navigable;
///
/// struct NetworkPicker {
///     names: Vec<&'static str>,
///     selected: usize,
/// }
///
/// impl Navigable for NetworkPicker {
///     fn len(&self) -> usize {
///         self.names.len()
///     }
///
///     fn selected(&self) -> usize {
///         self.selected
///     }
///
///     fn set_selected(&mut self, index: usize) {
///         self.selected = index;
///     }
/// }
///
/// let mut picker = NetworkPicker { names: vec!["MTN", "Airtel", "Glo"], selected: 0 };
/// picker.previous();
/// assert_eq!(picker.selected(), 2);
/// picker.move_by(-2);
/// assert_eq!(picker.selected(), 0);
/// ```
pub trait Navigable {
    fn len(&self) -> usize;

    fn selected(&self) -> usize;

    fn set_selected(&mut self, index: usize);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Next entry, wrapping to the start
    fn next(&mut self) {
        self.move_by(1);
    }

    /// Previous entry, wrapping to the end
    fn previous(&mut self) {
        self.move_by(-1);
    }

    /// Move `delta` entries with wrap-around. Grids move by their column count.
    fn move_by(&mut self, delta: isize) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let len = len as isize;
        let target = (self.selected() as isize + delta).rem_euclid(len);
        self.set_selected(target as usize);
    }

    fn first(&mut self) {
        if !self.is_empty() {
            self.set_selected(0);
        }
    }

    fn last(&mut self) {
        let len = self.len();
        if len > 0 {
            self.set_selected(len - 1);
        }
    }
}

/// Selection over a fixed-length list, typically a `'static` catalog slice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    len: usize,
    selected: usize,
}

impl ListCursor {
    pub fn new(len: usize) -> Self {
        Self { len, selected: 0 }
    }

    pub fn at(len: usize, selected: usize) -> Self {
        Self {
            len,
            selected: selected.min(len.saturating_sub(1)),
        }
    }

    /// The highlighted element of `items`
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.selected)
    }

    /// Resize after the backing list changed, keeping the selection in range
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

impl Navigable for ListCursor {
    fn len(&self) -> usize {
        self.len
    }

    fn selected(&self) -> usize {
        self.selected
    }

    fn set_selected(&mut self, index: usize) {
        self.selected = index;
    }
}
