//! Concrete shoe configurations checked end to end.

use approx::assert_relative_eq;
use bookshoe_core::face::FACE_LEN;
use bookshoe_core::{generate, Book, Margin, Offsets, Page, Variant, Walls};

fn default_book() -> Book {
    Book {
        width: 55.0,
        depth: 157.0,
    }
}

fn default_page() -> Page {
    Page {
        width: 49.0,
        depth: 151.0,
        margin: Margin { x: 3.0, y: 5.0 },
    }
}

fn tray_walls(base_height: f64, wall_width: f64) -> Walls {
    Walls {
        wall_height: 40.0,
        base_height: Some(base_height),
        wall_width: Some(wall_width),
    }
}

#[test]
fn default_full_shoe() {
    let (book, page, walls) = (default_book(), default_page(), tray_walls(3.0, 3.0));

    let offsets = Offsets::derive(&book, &page, &walls, Variant::Full);
    assert_relative_eq!(offsets.margin_x, 3.0);
    assert_relative_eq!(offsets.page_margin_x, 52.0);
    assert_relative_eq!(offsets.margin_z, 3.0);
    assert_relative_eq!(offsets.page_margin_z, 154.0);
    assert_relative_eq!(offsets.shoe_height, 8.0);

    let mesh = generate(&book, &page, &walls, Variant::Full);
    // 23 faces of two triangles plus four single corner triangles
    assert_eq!(mesh.triangle_count(), 23 * 2 + 4);
    assert_eq!(mesh.len() % 9, 0);
    assert!(mesh.positions().iter().all(|v| v.is_finite()));
}

#[test]
fn pocket_protrudes_past_short_book() {
    let book = Book {
        width: 55.0,
        depth: 100.0,
    };
    let page = Page {
        depth: 150.0,
        ..default_page()
    };
    let walls = tray_walls(3.0, 3.0);

    let offsets = Offsets::derive(&book, &page, &walls, Variant::Full);
    assert_relative_eq!(offsets.margin_z, 25.0);
    assert_relative_eq!(offsets.page_margin_z, 175.0);

    let mesh = generate(&book, &page, &walls, Variant::Full);
    assert_eq!(mesh.len(), 450);
    let bounds = mesh.bounds().unwrap();
    assert_relative_eq!(bounds.max.z, 175.0);
    assert!(bounds.max.z > book.depth);
}

#[test]
fn pages_only_matches_full_pocket_without_tray() {
    let (book, page) = (default_book(), default_page());
    let pages_walls = Walls {
        wall_height: 40.0,
        base_height: None,
        wall_width: None,
    };

    let pages = generate(&book, &page, &pages_walls, Variant::PagesOnly);
    let full = generate(&book, &page, &tray_walls(0.0, 0.0), Variant::Full);

    // Pages only: back + floor, then 5 pocket walls and 3 steps.
    // Full: 11 tray faces precede the same 8 pocket faces.
    let pocket = 8 * FACE_LEN;
    assert_eq!(
        &pages.positions()[2 * FACE_LEN..2 * FACE_LEN + pocket],
        &full.positions()[11 * FACE_LEN..11 * FACE_LEN + pocket]
    );

    // Tray sizes are ignored even when a shared record carries them
    let with_tray_sizes = generate(&book, &page, &tray_walls(3.0, 3.0), Variant::PagesOnly);
    assert_eq!(with_tray_sizes.positions(), pages.positions());
}

#[test]
fn oversized_page_does_not_fail() {
    let book = Book {
        width: 30.0,
        depth: 40.0,
    };
    let page = Page {
        width: 80.0,
        depth: 90.0,
        margin: Margin { x: 0.0, y: 0.0 },
    };

    for variant in Variant::ALL {
        let mesh = generate(&book, &page, &tray_walls(0.0, 0.0), variant);
        assert!(mesh.is_renderable());
        assert!(mesh.positions().iter().all(|v| v.is_finite()));
    }
}

#[test]
fn negative_spine_offset_moves_back_panel() {
    let page = Page {
        depth: 101.0,
        ..default_page()
    };
    let mesh = generate(&default_book(), &page, &tray_walls(3.0, 3.0), Variant::Full);

    // book_page_margin_x = 3 - 28 = -25, so the back panel sits at z = -3 + 25
    let back_panel = &mesh.positions()[4 * FACE_LEN..5 * FACE_LEN];
    for vertex in back_panel.chunks_exact(3) {
        assert_relative_eq!(vertex[2], 22.0);
    }
}
