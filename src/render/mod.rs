//! Paint surfaces, the ANSI terminal renderer and colour themes.

mod core;
mod theme;

pub use core::{AnsiRenderer, CellSurface, RendererSettings, Surface};
pub use theme::{Color, StateColors, Theme};
