//! Exact vertex sequences of each variant for the default configuration.
//!
//! Corners are written out as numbers and expanded here, so any change to a
//! face's point order or a triangle's winding shows up.

use bookshoe_core::{Settings, Variant};

type P = [f64; 3];

enum Piece {
    /// Corners a, b, c, d; cut into (a, b, d) and (d, c, a)
    Quad(P, P, P, P),
    Tri(P, P, P),
}

use Piece::{Quad, Tri};

fn expand(pieces: &[Piece]) -> Vec<f64> {
    let points: Vec<P> = pieces
        .iter()
        .flat_map(|piece| match *piece {
            Quad(a, b, c, d) => vec![a, b, d, d, c, a],
            Tri(a, b, c) => vec![a, b, c],
        })
        .collect();
    points.concat()
}

fn generate_defaults(variant: Variant) -> Vec<f64> {
    let Settings { book, page, walls } = Settings::defaults(variant);
    bookshoe_core::generate(&book, &page, &walls, variant)
        .positions()
        .to_vec()
}

/// Pocket floor, walls and steps with the given base and floor heights.
/// Spine wall at z = 0, pocket x 3..52, z 3..154, wall top `top`.
fn pocket(base: f64, floor: f64, top: f64) -> Vec<Piece> {
    vec![
        // floor, front, right, left, top
        Quad([3.0, floor, 154.0], [52.0, floor, 154.0], [3.0, floor, 3.0], [52.0, floor, 3.0]),
        Quad([3.0, floor, 3.0], [52.0, floor, 3.0], [3.0, top, 3.0], [52.0, top, 3.0]),
        Quad([52.0, floor, 3.0], [52.0, floor, 0.0], [52.0, top, 3.0], [52.0, top, 0.0]),
        Quad([3.0, top, 3.0], [3.0, top, 0.0], [3.0, floor, 3.0], [3.0, floor, 0.0]),
        Quad([52.0, top, 3.0], [52.0, top, 0.0], [3.0, top, 3.0], [3.0, top, 0.0]),
        // steps: front, left, right
        Quad([3.0, base, 154.0], [52.0, base, 154.0], [3.0, floor, 154.0], [52.0, floor, 154.0]),
        Quad([3.0, base, 0.0], [3.0, base, 154.0], [3.0, floor, 0.0], [3.0, floor, 154.0]),
        Quad([52.0, floor, 0.0], [52.0, floor, 154.0], [52.0, base, 0.0], [52.0, base, 154.0]),
    ]
}

#[test]
fn full_shoe_vertex_sequence() {
    let mut pieces = vec![
        // base slab
        Quad([-3.0, 0.0, -3.0], [58.0, 0.0, -3.0], [-3.0, 0.0, 157.0], [58.0, 0.0, 157.0]),
        Quad([0.0, 3.0, 154.0], [3.0, 3.0, 154.0], [0.0, 3.0, -3.0], [3.0, 3.0, -3.0]),
        Quad([52.0, 3.0, 154.0], [55.0, 3.0, 154.0], [52.0, 3.0, -3.0], [55.0, 3.0, -3.0]),
        Quad([-3.0, 3.0, 157.0], [58.0, 3.0, 157.0], [-3.0, 3.0, 154.0], [58.0, 3.0, 154.0]),
        // back panel
        Quad([-3.0, 48.0, -3.0], [58.0, 48.0, -3.0], [-3.0, 0.0, -3.0], [58.0, 0.0, -3.0]),
        // corner fillers
        Quad([0.0, 3.0, 0.0], [3.0, 3.0, 0.0], [0.0, 48.0, 0.0], [3.0, 48.0, 0.0]),
        Quad([52.0, 3.0, 0.0], [55.0, 3.0, 0.0], [52.0, 48.0, 0.0], [55.0, 48.0, 0.0]),
        // outer walls: front, left, right
        Quad([-3.0, 0.0, 157.0], [58.0, 0.0, 157.0], [-3.0, 3.0, 157.0], [58.0, 3.0, 157.0]),
        Quad([-3.0, 0.0, -3.0], [-3.0, 0.0, 157.0], [-3.0, 3.0, -3.0], [-3.0, 3.0, 157.0]),
        Quad([58.0, 3.0, -3.0], [58.0, 3.0, 157.0], [58.0, 0.0, -3.0], [58.0, 0.0, 157.0]),
        // back panel top
        Quad([-3.0, 48.0, 0.0], [58.0, 48.0, 0.0], [-3.0, 48.0, -3.0], [58.0, 48.0, -3.0]),
    ];
    pieces.extend(pocket(3.0, 8.0, 48.0));
    pieces.extend([
        // left spine corner
        Quad([-3.0, 3.0, 0.0], [-3.0, 48.0, 0.0], [-3.0, 3.0, -3.0], [-3.0, 48.0, -3.0]),
        Tri([0.0, 3.0, 0.0], [0.0, 48.0, 0.0], [0.0, 3.0, 154.0]),
        Tri([-3.0, 48.0, 0.0], [-3.0, 3.0, 0.0], [-3.0, 3.0, 154.0]),
        Quad([-3.0, 3.0, 154.0], [0.0, 3.0, 154.0], [-3.0, 48.0, 0.0], [0.0, 48.0, 0.0]),
        // right spine corner
        Quad([58.0, 3.0, -3.0], [58.0, 48.0, -3.0], [58.0, 3.0, 0.0], [58.0, 48.0, 0.0]),
        Tri([55.0, 48.0, 0.0], [55.0, 3.0, 0.0], [55.0, 3.0, 154.0]),
        Tri([58.0, 3.0, 154.0], [58.0, 3.0, 0.0], [58.0, 48.0, 0.0]),
        Quad([58.0, 48.0, 0.0], [55.0, 48.0, 0.0], [58.0, 3.0, 154.0], [55.0, 3.0, 154.0]),
    ]);

    assert_eq!(generate_defaults(Variant::Full), expand(&pieces));
}

#[test]
fn shoe_without_outer_walls_vertex_sequence() {
    let mut pieces = vec![
        // base slab
        Quad([0.0, 0.0, -3.0], [55.0, 0.0, -3.0], [0.0, 0.0, 157.0], [55.0, 0.0, 157.0]),
        Quad([0.0, 3.0, 154.0], [3.0, 3.0, 154.0], [0.0, 3.0, -3.0], [3.0, 3.0, -3.0]),
        Quad([52.0, 3.0, 154.0], [55.0, 3.0, 154.0], [52.0, 3.0, -3.0], [55.0, 3.0, -3.0]),
        Quad([0.0, 3.0, 157.0], [55.0, 3.0, 157.0], [0.0, 3.0, 154.0], [55.0, 3.0, 154.0]),
        // back panel
        Quad([0.0, 48.0, -3.0], [55.0, 48.0, -3.0], [0.0, 0.0, -3.0], [55.0, 0.0, -3.0]),
        // corner fillers with side closures
        Quad([0.0, 3.0, 0.0], [3.0, 3.0, 0.0], [0.0, 48.0, 0.0], [3.0, 48.0, 0.0]),
        Quad([0.0, 3.0, -3.0], [0.0, 3.0, 0.0], [0.0, 48.0, -3.0], [0.0, 48.0, 0.0]),
        Quad([52.0, 3.0, 0.0], [55.0, 3.0, 0.0], [52.0, 48.0, 0.0], [55.0, 48.0, 0.0]),
        Quad([55.0, 3.0, 0.0], [55.0, 3.0, -3.0], [55.0, 48.0, 0.0], [55.0, 48.0, -3.0]),
        // slab edges: front, left, right
        Quad([0.0, 0.0, 157.0], [55.0, 0.0, 157.0], [0.0, 3.0, 157.0], [55.0, 3.0, 157.0]),
        Quad([0.0, 0.0, -3.0], [0.0, 0.0, 157.0], [0.0, 3.0, -3.0], [0.0, 3.0, 157.0]),
        Quad([55.0, 3.0, -3.0], [55.0, 3.0, 157.0], [55.0, 0.0, -3.0], [55.0, 0.0, 157.0]),
        // back panel top
        Quad([0.0, 48.0, 0.0], [55.0, 48.0, 0.0], [0.0, 48.0, -3.0], [55.0, 48.0, -3.0]),
    ];
    pieces.extend(pocket(3.0, 8.0, 48.0));

    assert_eq!(generate_defaults(Variant::WithoutOuterWalls), expand(&pieces));
}

#[test]
fn pages_only_vertex_sequence() {
    let mut pieces = vec![
        // ground-level back face and floor
        Quad([3.0, 45.0, 0.0], [52.0, 45.0, 0.0], [3.0, 0.0, 0.0], [52.0, 0.0, 0.0]),
        Quad([3.0, 0.0, 0.0], [52.0, 0.0, 0.0], [3.0, 0.0, 154.0], [52.0, 0.0, 154.0]),
    ];
    pieces.extend(pocket(0.0, 5.0, 45.0));

    assert_eq!(generate_defaults(Variant::PagesOnly), expand(&pieces));
}
