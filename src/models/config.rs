use std::path::PathBuf;

use super::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub start_route: String,
    pub theme: Theme,
    pub log_file: PathBuf,
}

pub const DEFAULT_START_ROUTE: &str = "/";
pub const DEFAULT_LOG_FILE: &str = "molada-tui.log";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_route: DEFAULT_START_ROUTE.to_string(),
            theme: Theme::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Log destination alone, needed before the subscriber exists
    pub fn log_file_from_env() -> PathBuf {
        log_file(&|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, so tests don't touch the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let start_route = lookup("MOLADA_START_ROUTE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_START_ROUTE.to_string());

        // Routes are absolute paths; anything else would always land on not-found
        let start_route = if start_route.starts_with('/') {
            start_route
        } else {
            tracing::warn!(
                "MOLADA_START_ROUTE is set to {:?}, which is not an absolute route. Starting at {} instead.",
                start_route,
                DEFAULT_START_ROUTE
            );
            DEFAULT_START_ROUTE.to_string()
        };

        let theme = match lookup("MOLADA_THEME") {
            None => Theme::default(),
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    "MOLADA_THEME is set to {:?}, expected \"light\" or \"dark\". Using {}.",
                    raw,
                    Theme::default().as_str()
                );
                Theme::default()
            }),
        };

        Self {
            start_route,
            theme,
            log_file: log_file(&lookup),
        }
    }
}

fn log_file(lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup("MOLADA_LOG_FILE")
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.theme, Theme::Dark);
    }

    #[test]
    fn test_reads_all_variables() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("MOLADA_START_ROUTE", "/bills?type=cable"),
            ("MOLADA_THEME", "Light"),
            ("MOLADA_LOG_FILE", "/tmp/molada.log"),
        ]));
        assert_eq!(cfg.start_route, "/bills?type=cable");
        assert_eq!(cfg.theme, Theme::Light);
        assert_eq!(cfg.log_file, PathBuf::from("/tmp/molada.log"));
    }

    #[test]
    fn test_invalid_theme_falls_back_to_default() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("MOLADA_THEME", "sepia")]));
        assert_eq!(cfg.theme, Theme::Dark);
    }

    #[test]
    fn test_relative_start_route_falls_back_to_root() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("MOLADA_START_ROUTE", "dashboard")]));
        assert_eq!(cfg.start_route, "/");
    }
}
