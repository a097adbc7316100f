//! Book, page and wall dimensions (millimetres) and the offsets derived from them.

use serde::{Deserialize, Serialize};

use crate::shoe::Variant;

/// Footprint of the closed book
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub width: f64,
    pub depth: f64,
}

/// Lateral (`x`) and vertical (`y`) page margins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub x: f64,
    pub y: f64,
}

/// Footprint of the open page block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub width: f64,
    pub depth: f64,
    pub margin: Margin,
}

/// Wall and base sizes.
///
/// `base_height` and `wall_width` are absent for variants that have no solid
/// tray; absent reads as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Walls {
    pub wall_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_width: Option<f64>,
}

impl Walls {
    pub fn base_height(&self) -> f64 {
        self.base_height.unwrap_or(0.0)
    }

    pub fn wall_width(&self) -> f64 {
        self.wall_width.unwrap_or(0.0)
    }
}

/// Offsets every face of a shoe is placed with.
///
/// Recomputed from scratch on each generation. Nothing is clamped:
/// `book_page_margin_x` goes negative when the page margin is smaller than
/// the depth margin, which moves the spine wall behind the book footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offsets {
    /// Lateral inset of the pocket
    pub margin_x: f64,
    /// Far lateral edge of the pocket
    pub page_margin_x: f64,
    /// Depth inset of the pocket
    pub margin_z: f64,
    /// Far depth edge of the pocket
    pub page_margin_z: f64,
    /// Height of the pocket floor
    pub shoe_height: f64,
    /// Signed depth offset of the spine wall, placed at `z = -book_page_margin_x`
    pub book_page_margin_x: f64,
    /// Base slab thickness actually used by the variant
    pub base_height: f64,
    pub wall_width: f64,
    /// Outer wall thickness modelled around the book footprint
    pub wall_margin: f64,
    /// Height of every wall top
    pub wall_top: f64,
}

impl Offsets {
    pub fn derive(book: &Book, page: &Page, walls: &Walls, variant: Variant) -> Self {
        let margin_x = (book.width - page.width).abs() / 2.0;
        let page_margin_x = page.width + margin_x;

        let margin_z = (book.depth - page.depth).abs() / 2.0;
        let page_margin_z = page.depth + margin_z;

        let (base_height, wall_width) = match variant {
            Variant::PagesOnly => (0.0, 0.0),
            Variant::Full | Variant::WithoutOuterWalls => (walls.base_height(), walls.wall_width()),
        };
        let wall_margin = match variant {
            Variant::Full => wall_width,
            Variant::WithoutOuterWalls | Variant::PagesOnly => 0.0,
        };

        let shoe_height = base_height + page.margin.y;

        Self {
            margin_x,
            page_margin_x,
            margin_z,
            page_margin_z,
            shoe_height,
            book_page_margin_x: page.margin.x - margin_z,
            base_height,
            wall_width,
            wall_margin,
            wall_top: shoe_height + walls.wall_height,
        }
    }

    /// Depth of the spine wall face
    pub fn spine_z(&self) -> f64 {
        -self.book_page_margin_x
    }

    /// Depth of the back panel, one wall width behind the spine wall
    pub fn back_z(&self) -> f64 {
        -self.wall_width - self.book_page_margin_x
    }
}
