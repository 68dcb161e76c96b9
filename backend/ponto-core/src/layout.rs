// src/layout.rs
use tracing::debug;

use crate::surface::{Align, DocumentSurface, Rgb, TableBlock, TextRole, TextStyle};

// --- Page Content ---

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// One line of text; `advance` is how far the cursor moves after it.
    /// With `keep_with_next` it never ends a page apart from the block after it.
    Text {
        text: String,
        style: TextStyle,
        role: TextRole,
        advance: f32,
        keep_with_next: bool,
    },
    /// Drawn as a unit, never split across pages.
    Table(TableBlock),
    Spacer(f32),
}

impl Block {
    pub fn text(text: impl Into<String>, style: TextStyle, advance: f32) -> Self {
        Block::Text {
            text: text.into(),
            style,
            role: TextRole::Content,
            advance,
            keep_with_next: false,
        }
    }

    /// A heading that moves to the next page together with the block after it.
    pub fn heading(text: impl Into<String>, style: TextStyle, advance: f32) -> Self {
        Block::Text {
            text: text.into(),
            style,
            role: TextRole::Content,
            advance,
            keep_with_next: true,
        }
    }

    pub fn timestamp(text: impl Into<String>, style: TextStyle, advance: f32) -> Self {
        Block::Text {
            text: text.into(),
            style,
            role: TextRole::Timestamp,
            advance,
            keep_with_next: false,
        }
    }

    fn keeps_with_next(&self) -> bool {
        matches!(self, Block::Text { keep_with_next: true, .. })
    }

    fn height(&self) -> f32 {
        match self {
            Block::Text { advance, .. } => *advance,
            Block::Table(table) => table.height(),
            Block::Spacer(height) => *height,
        }
    }
}

/// Content that always starts on a fresh page and may spill onto
/// continuation pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSection {
    pub blocks: Vec<Block>,
}

impl PageSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }
}

// --- Geometry ---

/// Page size and margins in millimetres. Defaults to A4 portrait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub footer_offset: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin: 15.0,
            footer_offset: 8.0,
        }
    }
}

impl PageGeometry {
    pub fn top(&self) -> f32 {
        self.margin
    }

    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn x_for(&self, align: Align) -> f32 {
        match align {
            Align::Left => self.margin,
            Align::Center => self.width / 2.0,
            Align::Right => self.width - self.margin,
        }
    }
}

// --- Pass 1: Layout ---

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub x: f32,
    pub y: f32,
    pub block: Block,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub items: Vec<PlacedBlock>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutDriver {
    geometry: PageGeometry,
}

impl LayoutDriver {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Positions every block. Each section opens a new page; a block that
    /// would cross the bottom margin moves to a continuation page.
    pub fn layout(&self, sections: &[PageSection]) -> Vec<LaidOutPage> {
        let top = self.geometry.top();
        let bottom = self.geometry.bottom();
        let mut pages: Vec<LaidOutPage> = Vec::new();

        for (section_index, section) in sections.iter().enumerate() {
            pages.push(LaidOutPage::default());
            let mut cursor_y = top;
            let mut held_with_previous = false;

            for (block_index, block) in section.blocks.iter().enumerate() {
                let height = block.height();

                if let Block::Spacer(_) = block {
                    cursor_y += height;
                    continue;
                }

                let needed = match section.blocks.get(block_index + 1) {
                    Some(next) if block.keeps_with_next() => height + next.height(),
                    _ => height,
                };

                // A block taller than a page still gets a page to itself.
                if !held_with_previous && cursor_y + needed > bottom && cursor_y > top {
                    debug!(
                        "Section {}: page break at y={:.1} for block of height {:.1}",
                        section_index, cursor_y, needed
                    );
                    pages.push(LaidOutPage::default());
                    cursor_y = top;
                }

                let x = match block {
                    Block::Text { style, .. } => self.geometry.x_for(style.align),
                    _ => self.geometry.margin,
                };
                if let Some(page) = pages.last_mut() {
                    page.items.push(PlacedBlock {
                        x,
                        y: cursor_y,
                        block: block.clone(),
                    });
                }
                cursor_y += height;
                held_with_previous = block.keeps_with_next();
            }
        }

        pages
    }
}

// --- Pass 2: Render ---

/// Footer drawn on every page once the total page count is known.
#[derive(Debug, Clone)]
pub struct Footer {
    pub generated_at: String,
}

impl Footer {
    pub fn page_marker(page: usize, total: usize) -> String {
        format!("Página {} de {}", page, total)
    }
}

/// Emits laid-out pages onto `surface`, which must start with one blank page.
pub fn render<S: DocumentSurface>(
    pages: &[LaidOutPage],
    geometry: &PageGeometry,
    footer: &Footer,
    surface: &mut S,
) {
    let total = pages.len();
    let footer_y = geometry.height - geometry.footer_offset;
    let footer_style = TextStyle::new(8.0, Rgb::MUTED);

    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            surface.add_page();
        }

        for item in &page.items {
            match &item.block {
                Block::Text {
                    text, style, role, ..
                } => surface.text(item.x, item.y, text, style, *role),
                Block::Table(table) => {
                    surface.table(item.x, item.y, table);
                }
                Block::Spacer(_) => {}
            }
        }

        surface.text(
            geometry.margin,
            footer_y,
            &format!("Gerado em: {}", footer.generated_at),
            &footer_style,
            TextRole::Timestamp,
        );
        surface.text(
            geometry.width - geometry.margin,
            footer_y,
            &Footer::page_marker(index + 1, total),
            &footer_style.right(),
            TextRole::Content,
        );
    }
}
