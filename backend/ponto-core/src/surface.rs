// src/surface.rs
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

// --- Styling ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const DARK: Rgb = Rgb(40, 40, 40);
    pub const MUTED: Rgb = Rgb(100, 100, 100);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const HEADER_BLUE: Rgb = Rgb(59, 130, 246);
    pub const STRIPE: Rgb = Rgb(249, 250, 251);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Rgb,
    pub align: Align,
}

impl TextStyle {
    pub fn new(size: f32, color: Rgb) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
            color,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

/// Text carrying the generation time is tagged so content comparisons can skip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    Content,
    Timestamp,
}

/// Millimetres per typographic point.
pub const PT_TO_MM: f32 = 25.4 / 72.0;
const LINE_HEIGHT_FACTOR: f32 = 1.15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStyle {
    pub font_size: f32,
    pub cell_padding: f32,
    pub column_widths: Vec<f32>,
    pub head_fill: Rgb,
    pub head_text: Rgb,
    pub stripe_fill: Rgb,
    /// Render the last body row in bold (totals).
    pub bold_last_row: bool,
}

impl TableStyle {
    pub fn row_height(&self) -> f32 {
        self.font_size * PT_TO_MM * LINE_HEIGHT_FACTOR + 2.0 * self.cell_padding
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableBlock {
    pub head: Vec<String>,
    pub body: Vec<Vec<String>>,
    pub style: TableStyle,
}

impl TableBlock {
    /// Rendered height: header plus every body row.
    pub fn height(&self) -> f32 {
        (1 + self.body.len()) as f32 * self.style.row_height()
    }
}

// --- Surface Contract ---

/// Drawing backend for a paginated report. Coordinates are millimetres from
/// the top-left corner of the current page.
pub trait DocumentSurface {
    fn text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle, role: TextRole);

    /// Draws `table` with its top edge at `y` and returns the y just below it.
    fn table(&mut self, x: f32, y: f32, table: &TableBlock) -> f32;

    fn add_page(&mut self);

    fn page_count(&self) -> usize;
}

// --- Recording Surface ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
        role: TextRole,
    },
    Table {
        x: f32,
        y: f32,
        table: TableBlock,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordedPage {
    pub ops: Vec<DrawOp>,
}

impl RecordedPage {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Table { .. } => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableBlock> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Table { table, .. } => Some(table),
            DrawOp::Text { .. } => None,
        })
    }
}

/// In-memory surface that keeps every draw call. Starts with one blank page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordingSurface {
    pub pages: Vec<RecordedPage>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            pages: vec![RecordedPage::default()],
        }
    }

    fn current(&mut self) -> &mut RecordedPage {
        if self.pages.is_empty() {
            self.pages.push(RecordedPage::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// SHA-256 over every draw operation except timestamp text.
    pub fn content_digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (index, page) in self.pages.iter().enumerate() {
            hasher.update(format!("page:{}\n", index).as_bytes());
            for op in &page.ops {
                if let DrawOp::Text {
                    role: TextRole::Timestamp,
                    ..
                } = op
                {
                    continue;
                }
                // DrawOp only holds strings and numbers; serialization cannot fail.
                if let Ok(bytes) = serde_json::to_vec(op) {
                    hasher.update(&bytes);
                }
            }
        }
        hex::encode(hasher.finalize())
    }

    /// Plain-text rendering, one block per page.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                out.push_str("\u{c}\n");
            }
            for op in &page.ops {
                match op {
                    DrawOp::Text { text, .. } => {
                        let _ = writeln!(out, "{}", text);
                    }
                    DrawOp::Table { table, .. } => {
                        let _ = writeln!(out, "{}", table.head.join(" | "));
                        for row in &table.body {
                            let _ = writeln!(out, "{}", row.join(" | "));
                        }
                    }
                }
            }
        }
        out
    }
}

impl DocumentSurface for RecordingSurface {
    fn text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle, role: TextRole) {
        self.current().ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            style: *style,
            role,
        });
    }

    fn table(&mut self, x: f32, y: f32, table: &TableBlock) -> f32 {
        self.current().ops.push(DrawOp::Table {
            x,
            y,
            table: table.clone(),
        });
        y + table.height()
    }

    fn add_page(&mut self) {
        self.pages.push(RecordedPage::default());
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }
}
