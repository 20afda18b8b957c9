use std::io::Write;

use blake3::Hash;
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::geometry::{Rect, Size};

use super::theme::Color;

/// Paint target for layout items and grab handles.
pub trait Surface {
    fn size(&self) -> Size;

    fn fill_rect(&mut self, rect: &Rect, color: Color);

    fn put_str(&mut self, x: i32, y: i32, text: &str, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    /// `None` marks the trailing half of a wide glyph.
    ch: Option<char>,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: Some(' '),
            fg: Color::WHITE,
            bg: Color::TRANSPARENT,
        }
    }
}

/// In-memory character grid, one cell per layout unit.
#[derive(Debug, Clone)]
pub struct CellSurface {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl CellSurface {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    fn row(&self, y: i32) -> &[Cell] {
        let start = (y * self.width) as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Characters of row `y`, wide glyphs once.
    pub fn row_text(&self, y: i32) -> String {
        if y < 0 || y >= self.height {
            return String::new();
        }
        self.row(y).iter().filter_map(|cell| cell.ch).collect()
    }

    pub fn background_at(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|index| self.cells[index].bg)
    }

    pub fn foreground_at(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|index| self.cells[index].fg)
    }

    fn row_hash(&self, y: i32) -> Hash {
        let mut hasher = blake3::Hasher::new();
        for cell in self.row(y) {
            let ch = cell.ch.map_or(0, u32::from);
            hasher.update(&ch.to_le_bytes());
            hasher.update(&[cell.fg.r, cell.fg.g, cell.fg.b, cell.fg.a]);
            hasher.update(&[cell.bg.r, cell.bg.g, cell.bg.b, cell.bg.a]);
        }
        hasher.finalize()
    }
}

impl Surface for CellSurface {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        if color.is_transparent() {
            return;
        }
        let clip = rect.intersection(&Rect::new(0, 0, self.width, self.height));
        for y in clip.top()..clip.bottom() {
            for x in clip.left()..clip.right() {
                if let Some(index) = self.index(x, y) {
                    self.cells[index] = Cell {
                        ch: Some(' '),
                        fg: self.cells[index].fg,
                        bg: color,
                    };
                }
            }
        }
    }

    fn put_str(&mut self, x: i32, y: i32, text: &str, color: Color) {
        let mut column = x;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            if column + width > self.width {
                break;
            }
            if let Some(index) = self.index(column, y) {
                self.cells[index].ch = Some(ch);
                self.cells[index].fg = color;
                for extra in 1..width {
                    if let Some(tail) = self.index(column + extra, y) {
                        self.cells[tail].ch = None;
                    }
                }
            }
            column += width;
        }
    }
}

/// Renderer runtime parameters.
#[derive(Debug, Clone, Default)]
pub struct RendererSettings {
    pub restore_cursor: Option<(u16, u16)>,
}

/// ANSI escape code renderer writing a `CellSurface` to a terminal handle.
///
/// Rows whose content hash matches the previous frame are skipped.
pub struct AnsiRenderer {
    settings: RendererSettings,
    row_hashes: Vec<Hash>,
}

impl AnsiRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self {
            settings,
            row_hashes: Vec::new(),
        }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut RendererSettings {
        &mut self.settings
    }

    /// Forget the previous frame so the next render writes every row.
    pub fn invalidate(&mut self) {
        self.row_hashes.clear();
    }

    /// Write changed rows; returns how many were written.
    pub fn render(&mut self, writer: &mut impl Write, surface: &CellSurface) -> Result<usize> {
        if self.row_hashes.len() != surface.height as usize {
            self.row_hashes.clear();
        }

        let mut written = 0;
        for y in 0..surface.height {
            let hash = surface.row_hash(y);
            if self.row_hashes.get(y as usize) == Some(&hash) {
                continue;
            }
            render_row(writer, y, surface.row(y))?;
            written += 1;
            if let Some(slot) = self.row_hashes.get_mut(y as usize) {
                *slot = hash;
            } else {
                self.row_hashes.push(hash);
            }
        }

        if let Some((row, col)) = self.settings.restore_cursor {
            write!(writer, "\x1b[{};{}H", row + 1, col + 1)?;
        }

        writer.flush()?;
        Ok(written)
    }
}

fn render_row(writer: &mut impl Write, y: i32, cells: &[Cell]) -> Result<()> {
    write!(writer, "\x1b[{};1H", y + 1)?;
    let mut pen: Option<(Color, Color)> = None;
    for cell in cells {
        let Some(ch) = cell.ch else {
            continue;
        };
        if pen != Some((cell.fg, cell.bg)) {
            write!(writer, "\x1b[38;2;{};{};{}m", cell.fg.r, cell.fg.g, cell.fg.b)?;
            if cell.bg.is_transparent() {
                write!(writer, "\x1b[49m")?;
            } else {
                write!(writer, "\x1b[48;2;{};{};{}m", cell.bg.r, cell.bg.g, cell.bg.b)?;
            }
            pen = Some((cell.fg, cell.bg));
        }
        write!(writer, "{ch}")?;
    }
    write!(writer, "\x1b[0m")?;
    Ok(())
}
