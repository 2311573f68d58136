use crate::tui::routes::Route;
use crate::tui::screen_trait::ScreenId;

/// Oldest entries are dropped beyond this many
const MAX_HISTORY: usize = 64;

/// ScreenStateMachine manages navigation state
///
/// Tracks the current route and the routes that led to it. Screens
/// themselves stay owned by `ScreenStates`; only routes are stored here.
pub struct ScreenStateMachine {
    current: Route,
    history: Vec<Route>,
}

impl Default for ScreenStateMachine {
    fn default() -> Self {
        Self::new(Route::new(ScreenId::Onboarding))
    }
}

impl ScreenStateMachine {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            history: vec![],
        }
    }

    /// Navigate to a route, remembering the current one
    pub fn go_to(&mut self, route: Route) {
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
    }

    /// Go back to the previous route
    ///
    /// Returns true if we went back, false if there's no history
    pub fn go_back(&mut self) -> bool {
        if let Some(previous) = self.history.pop() {
            self.current = previous;
            true
        } else {
            false
        }
    }

    /// Go back, or to the current screen's parent when history is empty
    pub fn go_back_or_parent(&mut self) {
        if !self.go_back() {
            let parent = self.current.screen.parent();
            if parent != self.current.screen {
                self.current = Route::new(parent);
            }
        }
    }

    pub fn current(&self) -> ScreenId {
        self.current.screen
    }

    pub fn current_route(&self) -> &Route {
        &self.current
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_to_and_back() {
        let mut sm = ScreenStateMachine::new(Route::new(ScreenId::Dashboard));
        sm.go_to(Route::parse("/bills?type=airtime"));
        assert_eq!(sm.current(), ScreenId::Bills);
        assert_eq!(sm.current_route().param("type"), Some("airtime"));

        assert!(sm.go_back());
        assert_eq!(sm.current(), ScreenId::Dashboard);
        assert!(!sm.go_back());
    }

    #[test]
    fn test_back_without_history_uses_parent() {
        let mut sm = ScreenStateMachine::new(Route::new(ScreenId::Sms));
        sm.go_back_or_parent();
        assert_eq!(sm.current(), ScreenId::Dashboard);

        let mut sm = ScreenStateMachine::default();
        sm.go_back_or_parent();
        assert_eq!(sm.current(), ScreenId::Onboarding);
    }

    #[test]
    fn test_history_is_capped() {
        let mut sm = ScreenStateMachine::default();
        for _ in 0..(MAX_HISTORY + 10) {
            sm.go_to(Route::new(ScreenId::Rewards));
        }
        assert_eq!(sm.history().len(), MAX_HISTORY);
    }
}
