//! Picks the `data-theme` every page is painted with.

use serde::Deserialize;

/// `localStorage` key a theme switcher writes the visitor's choice to.
const STORAGE_KEY: &str = "gitprofile-theme";
const FALLBACK_THEME: &str = "light";
const DARK_THEME: &str = "dark";

const DEFAULT_THEMES: &[&str] = &[
    "light", "dark", "cupcake", "bumblebee", "emerald", "corporate", "synthwave", "retro",
    "cyberpunk", "valentine", "halloween", "garden", "forest", "aqua", "lofi", "pastel",
    "fantasy", "wireframe", "black", "luxury", "dracula", "cmyk", "autumn", "business", "acid",
    "lemonade", "night", "coffee", "winter", "dim", "nord", "sunset",
];

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct ThemeConfig {
    pub default_theme: String,
    /// Hides the switcher; the default theme is then always used.
    pub disable_switch: bool,
    pub respect_prefers_color_scheme: bool,
    pub themes: Vec<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_theme: "lofi".to_string(),
            disable_switch: false,
            respect_prefers_color_scheme: false,
            themes: DEFAULT_THEMES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ThemeConfig {
    fn offers(&self, theme: &str) -> bool {
        self.themes.is_empty() || self.themes.iter().any(|t| t == theme)
    }

    /// Theme written into the markup, before any script runs.
    pub fn initial_theme(&self) -> &str {
        if self.offers(&self.default_theme) {
            return &self.default_theme;
        }
        self.themes.first().map_or(FALLBACK_THEME, String::as_str)
    }

    /// Inline script for the document head that applies a stored or
    /// system-preferred theme before first paint. `None` when the switch is disabled.
    pub fn bootstrap_script(&self) -> Option<String> {
        if self.disable_switch {
            return None;
        }
        let themes = serde_json::to_string(&self.themes).ok()?.replace("</", "<\\/");
        let mut script = format!(
            concat!(
                "(function(){{",
                "var d=document.documentElement;",
                "var themes={};",
                "var saved=localStorage.getItem(\"{}\");",
                "if(saved&&themes.indexOf(saved)>=0){{d.setAttribute(\"data-theme\",saved);return;}}",
            ),
            themes, STORAGE_KEY
        );
        // otherwise the initial theme already in the markup stays
        if self.respect_prefers_color_scheme && self.offers(DARK_THEME) {
            script.push_str(&format!(
                concat!(
                    "if(window.matchMedia(\"(prefers-color-scheme: dark)\").matches)",
                    "{{d.setAttribute(\"data-theme\",\"{}\");}}",
                ),
                DARK_THEME
            ));
        }
        script.push_str("})();");
        Some(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(default: &str, themes: &[&str]) -> ThemeConfig {
        ThemeConfig {
            default_theme: default.to_string(),
            themes: themes.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_theme_uses_listed_default() {
        assert_eq!(config("nord", &["light", "nord"]).initial_theme(), "nord");
        assert_eq!(config("nord", &[]).initial_theme(), "nord");
    }

    #[test]
    fn test_initial_theme_falls_back_to_first_listed() {
        assert_eq!(config("nope", &["dark", "light"]).initial_theme(), "dark");
    }

    #[test]
    fn test_default_config() {
        let theme = ThemeConfig::default();
        assert_eq!(theme.initial_theme(), "lofi");
        assert!(theme.themes.iter().any(|t| t == "nord"));
    }

    #[test]
    fn test_no_script_when_switch_disabled() {
        let theme = ThemeConfig {
            disable_switch: true,
            ..Default::default()
        };
        assert_eq!(theme.bootstrap_script(), None);
    }

    #[test]
    fn test_script_reads_storage_and_media_query() {
        let mut theme = config("nord", &["nord", "dark"]);
        let script = theme.bootstrap_script().unwrap();
        assert!(script.contains(r#"var themes=["nord","dark"];"#));
        assert!(script.contains(r#"localStorage.getItem("gitprofile-theme")"#));
        assert!(!script.contains("prefers-color-scheme"));

        theme.respect_prefers_color_scheme = true;
        let script = theme.bootstrap_script().unwrap();
        assert!(script.contains("prefers-color-scheme: dark"));
        assert!(script.ends_with("})();"));
    }

    #[test]
    fn test_light_system_keeps_configured_theme() {
        let mut theme = config("nord", &["nord", "dark"]);
        theme.respect_prefers_color_scheme = true;
        let script = theme.bootstrap_script().unwrap();
        assert!(script.contains(r#"{d.setAttribute("data-theme","dark");}"#));
        assert!(!script.contains(r#""light""#));
    }

    #[test]
    fn test_dark_preference_needs_dark_theme() {
        let mut theme = config("nord", &["nord", "cupcake"]);
        theme.respect_prefers_color_scheme = true;
        let script = theme.bootstrap_script().unwrap();
        assert!(!script.contains("prefers-color-scheme"));
        assert!(!script.contains(r#""dark""#));
    }
}
