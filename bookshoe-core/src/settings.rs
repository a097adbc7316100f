//! Settings bundle: the three dimension records as one JSON document.
//!
//! ```text
//! { "book":     { "width", "depth" },
//!   "bookPage": { "width", "depth", "margin": { "x", "y" } },
//!   "general":  { "wallHeight", "baseHeight"?, "wallWidth"? } }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dimensions::{Book, Margin, Page, Walls};
use crate::shoe::Variant;

/// Persistence key of the book record
pub const BOOK_KEY: &str = "book";
/// Persistence key of the page record
pub const PAGE_KEY: &str = "bookPage";
/// Persistence key of the walls record
pub const GENERAL_KEY: &str = "general";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("settings must be a JSON object")]
    NotAnObject,

    #[error("settings are missing the `{0}` section")]
    MissingSection(&'static str),

    #[error("{field} must be a non-negative number, got {value}")]
    InvalidDimension { field: Field, value: f64 },

    #[error("{field} is not used by the {variant} shoe")]
    UnusedField { field: Field, variant: Variant },
}

/// Everything a user can configure about a shoe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub book: Book,
    #[serde(rename = "bookPage")]
    pub page: Page,
    #[serde(rename = "general")]
    pub walls: Walls,
}

impl Settings {
    pub fn defaults(variant: Variant) -> Self {
        let (base_height, wall_width) = match variant {
            Variant::Full | Variant::WithoutOuterWalls => (Some(3.0), Some(3.0)),
            Variant::PagesOnly => (None, None),
        };

        Self {
            book: Book {
                width: 55.0,
                depth: 157.0,
            },
            page: Page {
                width: 49.0,
                depth: 151.0,
                margin: Margin { x: 3.0, y: 5.0 },
            },
            walls: Walls {
                wall_height: 40.0,
                base_height,
                wall_width,
            },
        }
    }

    /// Pretty JSON with two-space indentation
    pub fn to_json(&self) -> String {
        // Plain structs of f64 always serialize
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Parse and validate a settings document.
    ///
    /// All three sections must be present; nothing is filled in from defaults.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let object = value.as_object().ok_or(SettingsError::NotAnObject)?;

        for key in [BOOK_KEY, PAGE_KEY, GENERAL_KEY] {
            if !object.contains_key(key) {
                return Err(SettingsError::MissingSection(key));
            }
        }

        let settings: Settings = serde_json::from_value(value)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Fill the fields a document left out from `defaults`.
    ///
    /// Same result as storing each record and reading it back over the
    /// defaults, so a live session and a reloaded one agree.
    pub fn or_defaults(self, defaults: &Settings) -> Settings {
        Settings {
            walls: Walls {
                base_height: self.walls.base_height.or(defaults.walls.base_height),
                wall_width: self.walls.wall_width.or(defaults.walls.wall_width),
                ..self.walls
            },
            ..self
        }
    }

    /// Reject negative and non-finite dimensions
    pub fn validate(&self) -> Result<(), SettingsError> {
        for field in Field::ALL {
            if let Some(value) = self.get(field) {
                check_dimension(field, value)?;
            }
        }
        Ok(())
    }

    /// Current value of a field, `None` for an absent optional wall field
    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::BookWidth => Some(self.book.width),
            Field::BookDepth => Some(self.book.depth),
            Field::PageWidth => Some(self.page.width),
            Field::PageDepth => Some(self.page.depth),
            Field::PageMarginX => Some(self.page.margin.x),
            Field::PageMarginY => Some(self.page.margin.y),
            Field::WallHeight => Some(self.walls.wall_height),
            Field::BaseHeight => self.walls.base_height,
            Field::WallWidth => self.walls.wall_width,
        }
    }

    pub fn set(&mut self, field: Field, value: f64) -> Result<(), SettingsError> {
        check_dimension(field, value)?;

        match field {
            Field::BookWidth => self.book.width = value,
            Field::BookDepth => self.book.depth = value,
            Field::PageWidth => self.page.width = value,
            Field::PageDepth => self.page.depth = value,
            Field::PageMarginX => self.page.margin.x = value,
            Field::PageMarginY => self.page.margin.y = value,
            Field::WallHeight => self.walls.wall_height = value,
            Field::BaseHeight => self.walls.base_height = Some(value),
            Field::WallWidth => self.walls.wall_width = Some(value),
        }
        Ok(())
    }
}

fn check_dimension(field: Field, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::InvalidDimension { field, value })
    }
}

/// Single editable dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BookWidth,
    BookDepth,
    PageWidth,
    PageDepth,
    PageMarginX,
    PageMarginY,
    WallHeight,
    BaseHeight,
    WallWidth,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::WallHeight,
        Field::BaseHeight,
        Field::WallWidth,
        Field::BookWidth,
        Field::BookDepth,
        Field::PageWidth,
        Field::PageDepth,
        Field::PageMarginX,
        Field::PageMarginY,
    ];

    /// Everything but the base slab and outer wall sizes
    const ALL_WITHOUT_TRAY: [Field; 7] = [
        Field::WallHeight,
        Field::BookWidth,
        Field::BookDepth,
        Field::PageWidth,
        Field::PageDepth,
        Field::PageMarginX,
        Field::PageMarginY,
    ];

    /// Dotted path into the settings document
    pub fn key(self) -> &'static str {
        match self {
            Field::BookWidth => "book.width",
            Field::BookDepth => "book.depth",
            Field::PageWidth => "bookPage.width",
            Field::PageDepth => "bookPage.depth",
            Field::PageMarginX => "bookPage.margin.x",
            Field::PageMarginY => "bookPage.margin.y",
            Field::WallHeight => "general.wallHeight",
            Field::BaseHeight => "general.baseHeight",
            Field::WallWidth => "general.wallWidth",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::BookWidth => "Book Width",
            Field::BookDepth => "Book Depth",
            Field::PageWidth => "Page Width",
            Field::PageDepth => "Page Depth",
            Field::PageMarginX => "Page Margin X",
            Field::PageMarginY => "Page Margin Y",
            Field::WallHeight => "Wall Height",
            Field::BaseHeight => "Base Height",
            Field::WallWidth => "Wall Width",
        }
    }

    /// Persistence key of the record holding this field
    pub fn record_key(self) -> &'static str {
        match self {
            Field::BookWidth | Field::BookDepth => BOOK_KEY,
            Field::PageWidth | Field::PageDepth | Field::PageMarginX | Field::PageMarginY => {
                PAGE_KEY
            }
            Field::WallHeight | Field::BaseHeight | Field::WallWidth => GENERAL_KEY,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| format!("unknown settings field `{s}`"))
    }
}

impl Variant {
    /// Fields the variant exposes for editing, in panel order
    pub fn fields(self) -> &'static [Field] {
        match self {
            Variant::Full | Variant::WithoutOuterWalls => &Field::ALL,
            Variant::PagesOnly => &Field::ALL_WITHOUT_TRAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_uses_file_format_names() {
        let json = Settings::defaults(Variant::Full).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["book"]["width"], 55.0);
        assert_eq!(value["bookPage"]["margin"]["x"], 3.0);
        assert_eq!(value["bookPage"]["margin"]["y"], 5.0);
        assert_eq!(value["general"]["wallHeight"], 40.0);
        assert_eq!(value["general"]["baseHeight"], 3.0);
        assert_eq!(value["general"]["wallWidth"], 3.0);
        assert!(json.contains("\n  \"book\""));
    }

    #[test]
    fn test_pages_only_omits_tray_fields() {
        let json = Settings::defaults(Variant::PagesOnly).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["general"].get("baseHeight").is_none());
        assert!(value["general"].get("wallWidth").is_none());
    }

    #[test]
    fn test_round_trip() {
        for variant in Variant::ALL {
            let settings = Settings::defaults(variant);
            let parsed = Settings::from_json(&settings.to_json()).unwrap();
            assert_eq!(parsed, settings);
        }
    }

    #[test]
    fn test_or_defaults_fills_only_absent_fields() {
        let mut imported = Settings::defaults(Variant::PagesOnly);
        imported.walls.wall_height = 12.0;
        let mut full = Settings::defaults(Variant::Full);
        full.walls.wall_width = Some(4.0);

        let merged = imported.or_defaults(&full);
        assert_eq!(merged.walls.wall_height, 12.0);
        assert_eq!(merged.walls.base_height, Some(3.0));
        assert_eq!(merged.walls.wall_width, Some(4.0));

        // Nothing to fill for a shoe without a tray
        let pages = Settings::defaults(Variant::PagesOnly);
        assert_eq!(imported.or_defaults(&pages), imported);
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let json = r#"{ "book": { "width": 1, "depth": 2 },
                        "general": { "wallHeight": 3 } }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(SettingsError::MissingSection("bookPage"))
        ));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            Settings::from_json("{ book: "),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json("[1, 2]"),
            Err(SettingsError::NotAnObject)
        ));
    }

    #[test]
    fn test_negative_dimension_is_rejected() {
        let mut settings = Settings::defaults(Variant::Full);
        settings.book.width = -1.0;
        assert!(matches!(
            Settings::from_json(&settings.to_json()),
            Err(SettingsError::InvalidDimension {
                field: Field::BookWidth,
                ..
            })
        ));
    }

    #[test]
    fn test_set_and_get_fields() {
        let mut settings = Settings::defaults(Variant::PagesOnly);
        assert_eq!(settings.get(Field::BaseHeight), None);

        settings.set(Field::BaseHeight, 2.0).unwrap();
        settings.set(Field::PageMarginY, 7.5).unwrap();
        assert_eq!(settings.walls.base_height, Some(2.0));
        assert_eq!(settings.page.margin.y, 7.5);
        assert!(settings.set(Field::BookDepth, f64::NAN).is_err());
        assert_eq!(settings.book.depth, 157.0);
    }

    #[test]
    fn test_field_keys_parse() {
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>(), Ok(field));
        }
        assert!(!Variant::PagesOnly.fields().contains(&Field::WallWidth));
        assert_eq!(Variant::Full.fields().len(), 9);
    }
}
