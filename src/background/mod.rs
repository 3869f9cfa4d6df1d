pub mod picker;

use crate::desktop::{DesktopSettings, ThemeVariant};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const BACKGROUND_SCHEMA: &str = "org.gnome.desktop.background";

/// Picks a random picture and hands it to the desktop settings store
pub struct Changer {
    settings: Arc<dyn DesktopSettings>,
    pictures_dir: PathBuf,
    rng: StdRng,
}

impl Changer {
    #[must_use]
    pub fn new(settings: Arc<dyn DesktopSettings>, pictures_dir: PathBuf) -> Self {
        Self {
            settings,
            pictures_dir,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the random source (for testing)
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn pictures_dir(&self) -> &Path {
        &self.pictures_dir
    }

    /// Change the background, returning the picture that was applied
    ///
    /// # Errors
    /// - Returns error if no picture can be selected
    /// - Returns error if the settings store rejects the new value
    pub async fn try_change(&mut self) -> Result<PathBuf> {
        let picture = picker::random_picture(&self.pictures_dir, &mut self.rng)?;
        let variant = ThemeVariant::detect(self.settings.as_ref()).await;

        self.settings
            .set(
                BACKGROUND_SCHEMA,
                variant.background_key(),
                &file_uri(&picture),
            )
            .await?;

        tracing::info!("Background changed to '{}'", picture.display());
        Ok(picture)
    }

    /// Best-effort change; failures are logged and swallowed
    pub async fn change_background(&mut self) -> Option<PathBuf> {
        match self.try_change().await {
            Ok(picture) => Some(picture),
            Err(e) => {
                tracing::error!("Error when changing background: {e}");
                None
            }
        }
    }
}

/// `file://` URI for a local path, made absolute when possible
#[must_use]
pub fn file_uri(path: &Path) -> String {
    let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}
