//! Process-wide construction settings.
//!
//! Install once at startup with [`init`], before any value is built. Code
//! that prefers not to rely on process state passes a [`Settings`] to the
//! `*_with` constructors instead.

use crate::{Error, Result};
use once_cell::sync::OnceCell;

/// Environment variable read by [`Settings::from_env`].
pub const CANONICALIZE_ENV: &str = "RHIZOME_COMPLEX_CANONICALIZE";

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Construction settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Collapse values whose imaginary part is an exact zero to a bare real.
    pub canonicalize: bool,
}

impl Settings {
    /// Defaults, overridden by `RHIZOME_COMPLEX_CANONICALIZE`.
    pub fn from_env() -> Settings {
        let mut settings = Settings::default();
        if let Ok(value) = std::env::var(CANONICALIZE_ENV) {
            settings.canonicalize = parse_flag(&value);
        }
        settings
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Installs the process-wide settings. Fails if they were already installed.
pub fn init(settings: Settings) -> Result<()> {
    SETTINGS.set(settings).map_err(|_| Error::Settings)?;
    log::debug!("complex settings installed: {settings:?}");
    Ok(())
}

/// The installed settings, or the defaults if none were installed.
pub fn current() -> Settings {
    SETTINGS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_off() {
        assert!(!Settings::default().canonicalize);
    }

    #[test]
    fn test_parse_flag() {
        for on in ["1", "true", "YES", " on "] {
            assert!(parse_flag(on), "{on}");
        }
        for off in ["0", "false", "", "maybe"] {
            assert!(!parse_flag(off), "{off}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_with_defaults() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, Settings::default());
        let s: Settings = serde_json::from_str(r#"{"canonicalize": true}"#).unwrap();
        assert!(s.canonicalize);
    }
}
