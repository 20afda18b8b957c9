use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::grab::ShowState;

/// RGBA colour. Alpha 0 means "leave what is underneath".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    u8::MAX
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        let invalid = || LayoutError::InvalidCast(format!("`{text}` is not a hex colour"));
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |index: usize| {
            u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16).map_err(|_| invalid())
        };
        let a = if digits.len() == 8 { channel(3)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(1)?, channel(2)?, a))
    }
}

/// One colour per grab show state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateColors {
    pub inactive: Color,
    pub hovering: Color,
    pub focused: Color,
    pub active: Color,
}

impl StateColors {
    pub fn for_state(&self, state: ShowState) -> Color {
        match state {
            ShowState::Inactive => self.inactive,
            ShowState::Hovering => self.hovering,
            ShowState::Focused => self.focused,
            ShowState::Active => self.active,
        }
    }
}

/// Colours handed to every `paint` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Looked up by `LayoutNode::background`.
    pub backgrounds: BTreeMap<String, Color>,
    /// Table column stripes, cycled.
    pub stripes: Vec<Color>,
    pub text: Color,
    pub viewport: Color,
    pub grab: StateColors,
    pub spacer: StateColors,
    pub handle: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let mut backgrounds = BTreeMap::new();
        backgrounds.insert("panel".to_string(), Color::rgb(30, 30, 40));
        backgrounds.insert("status".to_string(), Color::rgb(50, 50, 70));
        Self {
            backgrounds,
            stripes: vec![Color::rgb(36, 36, 48), Color::rgb(44, 44, 58)],
            text: Color::rgb(220, 220, 220),
            viewport: Color::rgb(90, 90, 110),
            grab: StateColors {
                inactive: Color::TRANSPARENT,
                hovering: Color::rgb(80, 80, 160),
                focused: Color::rgb(100, 100, 200),
                active: Color::rgb(140, 140, 240),
            },
            spacer: StateColors {
                inactive: Color::rgb(60, 60, 60),
                hovering: Color::rgb(90, 90, 90),
                focused: Color::rgb(110, 110, 110),
                active: Color::rgb(150, 150, 150),
            },
            handle: Color::rgb(240, 200, 80),
        }
    }
}

impl Theme {
    pub fn background(&self, name: &str) -> Option<Color> {
        self.backgrounds.get(name).copied()
    }

    pub fn stripe(&self, column: usize) -> Option<Color> {
        if self.stripes.is_empty() {
            return None;
        }
        Some(self.stripes[column % self.stripes.len()])
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| LayoutError::InvalidCast(err.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| LayoutError::InvalidCast(err.to_string()))
    }
}
