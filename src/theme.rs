//! Theme selection with persistence.
//!
//! The active theme is resolved at startup from the preference store, falling
//! back to the host's system preference when nothing is stored. Toggling
//! flips the `dark-theme` class on the root element, persists the choice, and
//! raises a notification.
//!
//! Persistence goes through the [`PreferenceStore`] trait; [`JsonStore`]
//! keeps a small JSON file on disk and [`MemoryStore`] backs tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::notify::{Notifier, Severity};
use crate::page::{ElementId, Page};
use crate::timer::Timers;

const DARK_CLASS: &str = "dark-theme";
const TOGGLE_MESSAGE: &str = "Theme updated!";
const THEME_KEY: &str = "theme";

/// The two supported themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The persisted name of this theme.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(StoreError::UnknownTheme(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Preference stores
// ---------------------------------------------------------------------------

/// Error reading or writing a preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference store i/o: {0}")]
    Io(#[from] io::Error),
    #[error("preference store format: {0}")]
    Format(#[from] serde_json::Error),
    #[error("unknown theme name: {0}")]
    UnknownTheme(String),
}

/// Backing storage for the theme preference.
pub trait PreferenceStore {
    /// The stored theme, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Theme>, StoreError>;

    /// Persist the given theme.
    fn save(&mut self, theme: Theme) -> Result<(), StoreError>;
}

/// In-memory store, for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    theme: Option<Theme>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a saved theme.
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme: Some(theme) }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<Theme>, StoreError> {
        Ok(self.theme)
    }

    fn save(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.theme = Some(theme);
        Ok(())
    }
}

/// File-backed store holding a flat JSON map, e.g. `{"theme":"dark"}`.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl PreferenceStore for JsonStore {
    fn load(&self) -> Result<Option<Theme>, StoreError> {
        let map = self.read_map()?;
        match map.get(THEME_KEY) {
            Some(value) => match value.parse::<Theme>() {
                Ok(theme) => Ok(Some(theme)),
                // Unrecognized values fall back to the system preference.
                Err(_) => {
                    warn!(value = value.as_str(), "ignoring unrecognized stored theme");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    fn save(&mut self, theme: Theme) -> Result<(), StoreError> {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(THEME_KEY.to_string(), theme.as_str().to_string());
        fs::write(&self.path, serde_json::to_string(&map)?)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ThemeController
// ---------------------------------------------------------------------------

/// Applies and persists the active theme.
pub struct ThemeController {
    root: ElementId,
    store: Box<dyn PreferenceStore>,
    current: Theme,
}

impl ThemeController {
    /// Resolve the initial theme and apply it to `root`.
    ///
    /// A stored preference wins; otherwise `system_prefers_dark` decides.
    /// Store read failures are logged and treated as no stored preference.
    pub fn new(
        page: &mut Page,
        root: ElementId,
        store: Box<dyn PreferenceStore>,
        system_prefers_dark: bool,
    ) -> Self {
        let stored = store.load().unwrap_or_else(|err| {
            warn!(%err, "failed to load theme preference");
            None
        });
        let current = stored.unwrap_or(if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });

        let mut controller = Self {
            root,
            store,
            current,
        };
        controller.apply(page);
        controller
    }

    /// The active theme.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme, persist it, and notify. Returns the save result; the
    /// visual flip happens even when persistence fails.
    pub fn toggle(
        &mut self,
        page: &mut Page,
        timers: &mut Timers,
        notifier: Option<&mut Notifier>,
    ) -> Result<(), StoreError> {
        self.current = self.current.toggled();
        self.apply(page);
        if let Some(notifier) = notifier {
            notifier.notify(page, timers, TOGGLE_MESSAGE, Severity::Info);
        }
        self.store.save(self.current).map_err(|err| {
            warn!(%err, "failed to persist theme preference");
            err
        })
    }

    fn apply(&mut self, page: &mut Page) {
        page.set_class(self.root, DARK_CLASS, self.current == Theme::Dark);
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("root", &self.root)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
