use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Compile-time variant of [`Rgb::from_hex`] for the palette table.
    const fn hex(value: u32) -> Self {
        Self((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub panel: Rgb,
    pub cart_area: Rgb,
    pub foreground: Rgb,
    pub accent: Rgb,
    pub muted: Rgb,
}

const LIGHT: Palette = Palette {
    background: Rgb::hex(0xe3f6fd),
    panel: Rgb::hex(0xf8f9fa),
    cart_area: Rgb::hex(0xfffbe7),
    foreground: Rgb::hex(0x22223b),
    accent: Rgb::hex(0x448aff),
    muted: Rgb::hex(0x9aa7b3),
};

const DARK: Palette = Palette {
    background: Rgb::hex(0x253655),
    panel: Rgb::hex(0x32475b),
    cart_area: Rgb::hex(0x22223b),
    foreground: Rgb::hex(0xe0eafc),
    accent: Rgb::hex(0xffd966),
    muted: Rgb::hex(0x9aa7b3),
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ThemeName {
    Light,
    #[default]
    Dark,
}

impl ThemeName {
    pub const ALL: [ThemeName; 2] = [ThemeName::Light, ThemeName::Dark];

    pub const fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "Light",
            ThemeName::Dark => "Dark",
        }
    }

    pub const fn palette(self) -> &'static Palette {
        match self {
            ThemeName::Light => &LIGHT,
            ThemeName::Dark => &DARK,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme: {0}")]
pub struct ThemeParseError(pub String);

impl FromStr for ThemeName {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ThemeParseError(s.to_string()))
    }
}

/// Holds the active theme. Switching never touches cart state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeStore {
    current: ThemeName,
}

impl ThemeStore {
    pub fn new(initial: ThemeName) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> ThemeName {
        self.current
    }

    pub fn palette(&self) -> &'static Palette {
        self.current.palette()
    }

    /// Unknown names leave the current theme in place and return false.
    pub fn apply(&mut self, name: &str) -> bool {
        match name.parse::<ThemeName>() {
            Ok(theme) => {
                self.current = theme;
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_table_matches_hex_values() {
        assert_eq!(Rgb::from_hex("#253655"), Some(DARK.background));
        assert_eq!(Rgb::from_hex("#448aff"), Some(LIGHT.accent));
        assert_eq!(LIGHT.cart_area.to_string(), "#fffbe7");
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert_eq!(Rgb::from_hex("253655"), None);
        assert_eq!(Rgb::from_hex("#25365"), None);
        assert_eq!(Rgb::from_hex("#zz3655"), None);
    }

    #[test]
    fn apply_switches_known_and_ignores_unknown() {
        let mut store = ThemeStore::default();
        assert_eq!(store.current(), ThemeName::Dark);
        assert!(store.apply("Light"));
        assert_eq!(store.current(), ThemeName::Light);
        assert!(!store.apply("Bogus"));
        assert!(!store.apply("dark"));
        assert_eq!(store.current(), ThemeName::Light);
        assert_eq!(store.palette(), &LIGHT);
    }

    #[test]
    fn theme_name_round_trips_through_json() {
        let json = serde_json::to_string(&ThemeName::Light).unwrap();
        assert_eq!(json, "\"Light\"");
        let back: ThemeName = serde_json::from_str("\"Dark\"").unwrap();
        assert_eq!(back, ThemeName::Dark);
    }
}
