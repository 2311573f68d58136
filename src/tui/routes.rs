//! Route table: maps `/path?key=value` strings onto screens.

use std::borrow::Cow;
use std::fmt;

use crate::tui::screen_trait::ScreenId;

/// A resolved location: the screen plus its decoded query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub screen: ScreenId,
    pub query: Vec<(String, String)>,
}

/// Query key under which the not-found screen keeps the path that missed
pub const UNMATCHED_PATH_PARAM: &str = "path";

impl Route {
    pub fn new(screen: ScreenId) -> Self {
        Self {
            screen,
            query: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Resolve a path. Unknown paths resolve to the not-found screen, which
    /// records the requested path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        let Some(screen) = ScreenId::from_path(path) else {
            return Route::new(ScreenId::NotFound).with_param(UNMATCHED_PATH_PARAM, path);
        };

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect();

        Self { screen, query }
    }

    /// First value for `key`, if present
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_path(&self) -> String {
        if self.query.is_empty() {
            return self.screen.path().to_string();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.screen.path(), query.join("&"))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

impl From<ScreenId> for Route {
    fn from(screen: ScreenId) -> Self {
        Route::new(screen)
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        // Malformed escapes are kept verbatim
        Err(_) => spaced,
    }
}
