use crate::desktop::DesktopSettings;

pub const INTERFACE_SCHEMA: &str = "org.gnome.desktop.interface";
pub const GTK_THEME_KEY: &str = "gtk-theme";

/// Light or dark appearance of the desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Light,
    Dark,
}

impl ThemeVariant {
    /// Classify a `gsettings get` value such as `'Adwaita-dark'\n`
    #[must_use]
    pub fn from_gtk_theme(raw: &str) -> Self {
        let name = raw.trim().trim_matches('\'');
        if name.to_ascii_lowercase().ends_with("-dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Query the current GTK theme; falls back to `Light` if the query fails
    pub async fn detect(settings: &dyn DesktopSettings) -> Self {
        match settings.get(INTERFACE_SCHEMA, GTK_THEME_KEY).await {
            Ok(raw) => Self::from_gtk_theme(&raw),
            Err(e) => {
                tracing::warn!("Failed to get `{GTK_THEME_KEY}` property: {e}");
                Self::Light
            }
        }
    }

    /// Background key that applies to this variant
    #[must_use]
    pub const fn background_key(self) -> &'static str {
        match self {
            Self::Light => "picture-uri",
            Self::Dark => "picture-uri-dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BgError, Result};
    use async_trait::async_trait;

    struct FixedTheme(Option<&'static str>);

    #[async_trait]
    impl DesktopSettings for FixedTheme {
        async fn get(&self, _schema: &str, _key: &str) -> Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| BgError::Command("no session".to_string()))
        }

        async fn set(&self, _schema: &str, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_from_gtk_theme() {
        assert_eq!(ThemeVariant::from_gtk_theme("'Adwaita-dark'\n"), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::from_gtk_theme("'Yaru-Dark'"), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::from_gtk_theme("'Adwaita'\n"), ThemeVariant::Light);
        assert_eq!(ThemeVariant::from_gtk_theme("'darkly'"), ThemeVariant::Light);
        assert_eq!(ThemeVariant::from_gtk_theme(""), ThemeVariant::Light);
    }

    #[test]
    fn test_background_keys() {
        assert_eq!(ThemeVariant::Light.background_key(), "picture-uri");
        assert_eq!(ThemeVariant::Dark.background_key(), "picture-uri-dark");
    }

    #[tokio::test]
    async fn test_detect_dark() {
        let variant = ThemeVariant::detect(&FixedTheme(Some("'Adwaita-dark'\n"))).await;
        assert_eq!(variant, ThemeVariant::Dark);
    }

    #[tokio::test]
    async fn test_detect_failure_defaults_to_light() {
        let variant = ThemeVariant::detect(&FixedTheme(None)).await;
        assert_eq!(variant, ThemeVariant::Light);
    }
}
