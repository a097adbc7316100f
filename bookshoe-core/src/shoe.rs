//! Tray geometry generator.
//!
//! A shoe is built from a fixed, ordered list of face groups. Each variant
//! picks its groups; the offsets every group places its faces with are
//! derived once per generation. Coordinates are `x` across the book, `y` up
//! and `z` through the book's depth, with the back panel at negative `z`.

use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dimensions::{Book, Offsets, Page, Walls};
use crate::geometry::Mesh;

/// Shoe shape compositions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variant {
    /// Solid base, outer walls, back panel, pocket and mitred spine corners
    #[default]
    Full,
    /// Base and back panel sized to the book, no outer wall thickness
    WithoutOuterWalls,
    /// Pocket only, standing on the ground
    PagesOnly,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Full, Variant::WithoutOuterWalls, Variant::PagesOnly];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Full => "full",
            Variant::WithoutOuterWalls => "withoutOuterWalls",
            Variant::PagesOnly => "pagesOnly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::Full => "Book Shoe",
            Variant::WithoutOuterWalls => "Book Shoe Without Walls",
            Variant::PagesOnly => "Book Shoe Only Pages",
        }
    }

    /// The following variant, wrapping around
    pub fn next(self) -> Variant {
        match self {
            Variant::Full => Variant::WithoutOuterWalls,
            Variant::WithoutOuterWalls => Variant::PagesOnly,
            Variant::PagesOnly => Variant::Full,
        }
    }

    pub fn groups(self) -> &'static [FaceGroup] {
        use FaceGroup::*;
        match self {
            Variant::Full => &[
                BaseSlab,
                BackPanel,
                CornerFillers,
                OuterWalls,
                BackPanelTop,
                PocketWalls,
                PocketSteps,
                SpineCorners,
            ],
            Variant::WithoutOuterWalls => &[
                BaseSlab,
                BackPanel,
                CornerFillers,
                OuterWalls,
                BackPanelTop,
                PocketWalls,
                PocketSteps,
            ],
            Variant::PagesOnly => &[PocketBack, PocketWalls, PocketSteps],
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised variant name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shoe variant `{0}`")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Variant::Full),
            "withoutOuterWalls" | "without-outer-walls" => Ok(Variant::WithoutOuterWalls),
            "pagesOnly" | "pages-only" => Ok(Variant::PagesOnly),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Groups of faces a shoe is assembled from, in build order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceGroup {
    /// Ground plate plus the slab top around the pocket
    BaseSlab,
    /// Standing backdrop from the ground to the wall top
    BackPanel,
    /// Spine wall pieces either side of the pocket
    CornerFillers,
    /// Front, left and right edges of the base slab
    OuterWalls,
    /// Cap over the back panel thickness
    BackPanelTop,
    /// Ground-level back face and floor of a pocket without a tray
    PocketBack,
    /// Pocket floor and the block walls rising from it
    PocketWalls,
    /// Step from the base up to the pocket floor
    PocketSteps,
    /// Mitred corners where the outer wall meets the spine wall
    SpineCorners,
}

/// Build the shoe mesh for a configuration.
///
/// Total over finite input: degenerate or inverted dimensions produce
/// degenerate faces, never an error.
pub fn generate(book: &Book, page: &Page, walls: &Walls, variant: Variant) -> Mesh {
    let offsets = Offsets::derive(book, page, walls, variant);

    let mut builder = ShoeBuilder {
        book,
        o: offsets,
        closed_corners: variant == Variant::WithoutOuterWalls,
        mesh: Mesh::with_capacity(50),
    };
    for group in variant.groups() {
        builder.build(*group);
    }

    debug!(
        %variant,
        ?offsets,
        triangles = builder.mesh.triangle_count(),
        "generated shoe mesh"
    );

    builder.mesh
}

fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

struct ShoeBuilder<'a> {
    book: &'a Book,
    o: Offsets,
    /// Close the outside of the corner fillers (no mitred corners to do it)
    closed_corners: bool,
    mesh: Mesh,
}

impl ShoeBuilder<'_> {
    fn build(&mut self, group: FaceGroup) {
        match group {
            FaceGroup::BaseSlab => self.base_slab(),
            FaceGroup::BackPanel => self.back_panel(),
            FaceGroup::CornerFillers => self.corner_fillers(),
            FaceGroup::OuterWalls => self.outer_walls(),
            FaceGroup::BackPanelTop => self.back_panel_top(),
            FaceGroup::PocketBack => self.pocket_back(),
            FaceGroup::PocketWalls => self.pocket_walls(),
            FaceGroup::PocketSteps => self.pocket_steps(),
            FaceGroup::SpineCorners => self.spine_corners(),
        }
    }

    fn left(&self) -> f64 {
        -self.o.wall_margin
    }

    fn right(&self) -> f64 {
        self.book.width + self.o.wall_margin
    }

    fn base_slab(&mut self) {
        let (l, r, w, d) = (self.left(), self.right(), self.book.width, self.book.depth);
        let Offsets {
            margin_x: mx,
            page_margin_x: pmx,
            page_margin_z: pmz,
            base_height: bh,
            ..
        } = self.o;
        let back = self.o.back_z();

        self.mesh
            .push_face(p(l, 0.0, back), p(r, 0.0, back), p(l, 0.0, d), p(r, 0.0, d));
        self.mesh
            .push_face(p(0.0, bh, pmz), p(mx, bh, pmz), p(0.0, bh, back), p(mx, bh, back));
        self.mesh
            .push_face(p(pmx, bh, pmz), p(w, bh, pmz), p(pmx, bh, back), p(w, bh, back));
        self.mesh
            .push_face(p(l, bh, d), p(r, bh, d), p(l, bh, pmz), p(r, bh, pmz));
    }

    fn back_panel(&mut self) {
        let (l, r, top, back) = (self.left(), self.right(), self.o.wall_top, self.o.back_z());

        self.mesh
            .push_face(p(l, top, back), p(r, top, back), p(l, 0.0, back), p(r, 0.0, back));
    }

    fn corner_fillers(&mut self) {
        let w = self.book.width;
        let Offsets {
            margin_x: mx,
            page_margin_x: pmx,
            base_height: bh,
            wall_top: top,
            ..
        } = self.o;
        let (spine, back) = (self.o.spine_z(), self.o.back_z());

        self.mesh
            .push_face(p(0.0, bh, spine), p(mx, bh, spine), p(0.0, top, spine), p(mx, top, spine));
        if self.closed_corners {
            self.mesh
                .push_face(p(0.0, bh, back), p(0.0, bh, spine), p(0.0, top, back), p(0.0, top, spine));
        }

        self.mesh
            .push_face(p(pmx, bh, spine), p(w, bh, spine), p(pmx, top, spine), p(w, top, spine));
        if self.closed_corners {
            self.mesh
                .push_face(p(w, bh, spine), p(w, bh, back), p(w, top, spine), p(w, top, back));
        }
    }

    fn outer_walls(&mut self) {
        let (l, r, d, bh, back) = (
            self.left(),
            self.right(),
            self.book.depth,
            self.o.base_height,
            self.o.back_z(),
        );

        // front
        self.mesh
            .push_face(p(l, 0.0, d), p(r, 0.0, d), p(l, bh, d), p(r, bh, d));
        // left
        self.mesh
            .push_face(p(l, 0.0, back), p(l, 0.0, d), p(l, bh, back), p(l, bh, d));
        // right
        self.mesh
            .push_face(p(r, bh, back), p(r, bh, d), p(r, 0.0, back), p(r, 0.0, d));
    }

    fn back_panel_top(&mut self) {
        let (l, r, top) = (self.left(), self.right(), self.o.wall_top);
        let (spine, back) = (self.o.spine_z(), self.o.back_z());

        self.mesh
            .push_face(p(l, top, spine), p(r, top, spine), p(l, top, back), p(r, top, back));
    }

    fn pocket_back(&mut self) {
        let Offsets {
            margin_x: mx,
            page_margin_x: pmx,
            page_margin_z: pmz,
            wall_top: top,
            ..
        } = self.o;
        let spine = self.o.spine_z();

        self.mesh
            .push_face(p(mx, top, spine), p(pmx, top, spine), p(mx, 0.0, spine), p(pmx, 0.0, spine));
        self.mesh
            .push_face(p(mx, 0.0, spine), p(pmx, 0.0, spine), p(mx, 0.0, pmz), p(pmx, 0.0, pmz));
    }

    fn pocket_walls(&mut self) {
        let Offsets {
            margin_x: mx,
            page_margin_x: pmx,
            margin_z: mz,
            page_margin_z: pmz,
            shoe_height: sh,
            wall_top: top,
            ..
        } = self.o;
        let spine = self.o.spine_z();

        // floor
        self.mesh
            .push_face(p(mx, sh, pmz), p(pmx, sh, pmz), p(mx, sh, mz), p(pmx, sh, mz));
        // front
        self.mesh
            .push_face(p(mx, sh, mz), p(pmx, sh, mz), p(mx, top, mz), p(pmx, top, mz));
        // right
        self.mesh
            .push_face(p(pmx, sh, mz), p(pmx, sh, spine), p(pmx, top, mz), p(pmx, top, spine));
        // left
        self.mesh
            .push_face(p(mx, top, mz), p(mx, top, spine), p(mx, sh, mz), p(mx, sh, spine));
        // top
        self.mesh
            .push_face(p(pmx, top, mz), p(pmx, top, spine), p(mx, top, mz), p(mx, top, spine));
    }

    fn pocket_steps(&mut self) {
        let Offsets {
            margin_x: mx,
            page_margin_x: pmx,
            page_margin_z: pmz,
            shoe_height: sh,
            base_height: bh,
            ..
        } = self.o;
        let spine = self.o.spine_z();

        // front
        self.mesh
            .push_face(p(mx, bh, pmz), p(pmx, bh, pmz), p(mx, sh, pmz), p(pmx, sh, pmz));
        // left
        self.mesh
            .push_face(p(mx, bh, spine), p(mx, bh, pmz), p(mx, sh, spine), p(mx, sh, pmz));
        // right
        self.mesh
            .push_face(p(pmx, sh, spine), p(pmx, sh, pmz), p(pmx, bh, spine), p(pmx, bh, pmz));
    }

    fn spine_corners(&mut self) {
        let (l, r, w) = (self.left(), self.right(), self.book.width);
        let Offsets {
            page_margin_z: pmz,
            base_height: bh,
            wall_top: top,
            ..
        } = self.o;
        let (spine, back) = (self.o.spine_z(), self.o.back_z());

        // left wall
        self.mesh
            .push_face(p(l, bh, spine), p(l, top, spine), p(l, bh, back), p(l, top, back));
        self.mesh
            .push_triangle(p(0.0, bh, spine), p(0.0, top, spine), p(0.0, bh, pmz));
        self.mesh
            .push_triangle(p(l, top, spine), p(l, bh, spine), p(l, bh, pmz));
        self.mesh
            .push_face(p(l, bh, pmz), p(0.0, bh, pmz), p(l, top, spine), p(0.0, top, spine));

        // right wall
        self.mesh
            .push_face(p(r, bh, back), p(r, top, back), p(r, bh, spine), p(r, top, spine));
        self.mesh
            .push_triangle(p(w, top, spine), p(w, bh, spine), p(w, bh, pmz));
        self.mesh
            .push_triangle(p(r, bh, pmz), p(r, bh, spine), p(r, top, spine));
        self.mesh
            .push_face(p(r, top, spine), p(w, top, spine), p(r, bh, pmz), p(w, bh, pmz));
    }
}
