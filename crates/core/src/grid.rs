//! This module holds the hex coordinate systems and the conversions between
//! them. See this page for background on how the three systems relate:
//! https://www.redblobgames.com/grids/hexagons/#coordinates
//!
//! **In this page's vernacular, we use "pointy topped" tiles with an "odd-r"
//! offset layout** (odd rows are shifted right by half a tile).
//!
//! Three systems appear in the public API:
//!
//! - [OffsetCoord] is the external-facing column/row address. Tile surfaces
//!   and input collaborators speak this system exclusively.
//! - [AxialCoord] is the two-axis intermediate form, bijective with offset
//!   coordinates via the odd-row shift formula.
//! - [CubePoint] is the three-axis form on the plane `x + y + z = 0`. All
//!   distance and search math happens here, because cube distance is a
//!   simple closed form and the six neighbor directions are uniform unit
//!   vectors.

use derive_more::{Add, AddAssign, Display, Mul, MulAssign};
use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    ops,
};
use strum::{EnumIter, IntoEnumIterator};

/// A column/row cell address in the odd-r offset layout: rows run top to
/// bottom and odd rows are shifted right by half a tile. This is the system
/// the tile surface understands, so every walkability query and marker write
/// uses it.
///
/// Components are stored as `i16`s. No surface will ever get anywhere near
/// 32k columns (that would be ~4 billion cells), so this saves on memory
/// when coordinates are held in bulk.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "({}, {})", "self.col()", "self.row()")]
pub struct OffsetCoord {
    col: i16,
    row: i16,
}

impl OffsetCoord {
    pub const fn new(col: i16, row: i16) -> Self {
        Self { col, row }
    }

    pub fn col(&self) -> i16 {
        self.col
    }

    pub fn row(&self) -> i16 {
        self.row
    }
}

/// A two-axis hex coordinate (q, r). This is the intermediate form between
/// the offset and cube systems: it shares `r` with the offset row and shares
/// `q` with the cube `x` axis, so converting through it is cheap in both
/// directions.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "({}, {})", "self.q()", "self.r()")]
pub struct AxialCoord {
    q: i16,
    r: i16,
}

impl AxialCoord {
    pub const fn new(q: i16, r: i16) -> Self {
        Self { q, r }
    }

    pub fn q(&self) -> i16 {
        self.q
    }

    pub fn r(&self) -> i16 {
        self.r
    }
}

impl From<OffsetCoord> for AxialCoord {
    fn from(coord: OffsetCoord) -> Self {
        // Odd rows sit half a tile to the right, so the column has to be
        // unshifted to line up with the q axis. `row & 1` is 1 for odd rows,
        // including negative ones, which keeps the subtraction even before
        // the division.
        let col = i32::from(coord.col());
        let row = i32::from(coord.row());
        let q = col - (row - (row & 1)) / 2;
        Self::new(q as i16, row as i16)
    }
}

impl From<AxialCoord> for OffsetCoord {
    fn from(coord: AxialCoord) -> Self {
        // Inverse of the unshift above: col = q + (r - (r & 1)) / 2
        let q = i32::from(coord.q());
        let r = i32::from(coord.r());
        let col = q + (r - (r & 1)) / 2;
        Self::new(col as i16, r as i16)
    }
}

/// A point in the cube coordinate system: three axes with the invariant
/// `x + y + z == 0`. Distances, neighbor steps, and both search engines all
/// operate on cube points.
///
/// Only x and y are actually stored. The invariant pins z to `-x - y`, so
/// deriving it on demand cuts a third of the memory and makes the invariant
/// impossible to violate from safe code.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.x()", "self.y()", "self.z()")]
pub struct CubePoint {
    x: i16,
    y: i16,
}

impl CubePoint {
    pub const ORIGIN: Self = Self::new_xy(0, 0);

    /// Construct a cube point from its x and y components; z is implied by
    /// the `x + y + z = 0` invariant.
    pub const fn new_xy(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    pub fn z(&self) -> i16 {
        -(self.x + self.y)
    }

    /// The number of hops between two cells: 0 for the same cell, 1 for
    /// adjacent cells, 2 when one cell sits between them, and so on. This is
    /// the exact cost of an unobstructed walk, which is what makes it a
    /// usable A* heuristic.
    pub fn distance_to(self, other: CubePoint) -> usize {
        // https://www.redblobgames.com/grids/hexagons/#distances
        let dx = (i32::from(self.x()) - i32::from(other.x())).abs();
        let dy = (i32::from(self.y()) - i32::from(other.y())).abs();
        let dz = (i32::from(self.z()) - i32::from(other.z())).abs();
        // Any single hop changes exactly two of the three axes by 1, so the
        // component sum double-counts the hop count
        ((dx + dy + dz) / 2) as usize
    }

    /// Iterate over the 6 points adjacent to this one, in [HexDirection]
    /// declaration order.
    pub fn adjacents(self) -> impl Iterator<Item = CubePoint> {
        HexDirection::iter().map(move |dir| self + dir.to_vector())
    }

    /// Interpolate between this point and another, with the three axes
    /// treated as reals. `t = 0.0` yields this point, `t = 1.0` yields
    /// `other`. The result is generally off the integer lattice; use
    /// [FracCubePoint::round] to snap it back to a cell.
    pub fn lerp(self, other: CubePoint, t: f64) -> FracCubePoint {
        let lerp1 =
            |a: i16, b: i16| f64::from(a) + (f64::from(b) - f64::from(a)) * t;
        FracCubePoint::new(
            lerp1(self.x(), other.x()),
            lerp1(self.y(), other.y()),
            lerp1(self.z(), other.z()),
        )
    }
}

impl ops::Add<CubeVector> for CubePoint {
    type Output = CubePoint;

    fn add(self, rhs: CubeVector) -> Self::Output {
        Self::new_xy(self.x + rhs.x(), self.y + rhs.y())
    }
}

impl From<AxialCoord> for CubePoint {
    fn from(coord: AxialCoord) -> Self {
        // x = q and y = r; the third axis is forced by x+y+z=0
        Self::new_xy(coord.q(), coord.r())
    }
}

impl From<CubePoint> for AxialCoord {
    fn from(point: CubePoint) -> Self {
        Self::new(point.x(), point.y())
    }
}

impl From<OffsetCoord> for CubePoint {
    fn from(coord: OffsetCoord) -> Self {
        AxialCoord::from(coord).into()
    }
}

impl From<CubePoint> for OffsetCoord {
    fn from(point: CubePoint) -> Self {
        AxialCoord::from(point).into()
    }
}

/// A translation in cube space, as opposed to a position. Structurally this
/// is a [CubePoint], but keeping displacements as their own type makes the
/// neighbor-stepping code read as point-plus-vector rather than
/// point-plus-point. The `x + y + z = 0` invariant holds here too: the sum
/// of two on-lattice values stays on the lattice.
#[derive(Copy, Clone, Debug, Display, Add, Mul, AddAssign, MulAssign)]
#[display(fmt = "({}, {}, {})", "self.x()", "self.y()", "self.z()")]
pub struct CubeVector {
    x: i16,
    y: i16,
}

impl CubeVector {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    pub fn z(&self) -> i16 {
        -(self.x + self.y)
    }
}

/// A cube point whose components are reals rather than lattice integers.
/// Produced by [CubePoint::lerp]; not guaranteed to satisfy `x + y + z == 0`
/// exactly, and not guaranteed to name a cell until [rounded](Self::round).
#[derive(Copy, Clone, Debug, Display)]
#[display(fmt = "({}, {}, {})", "self.x", "self.y", "self.z")]
pub struct FracCubePoint {
    x: f64,
    y: f64,
    z: f64,
}

impl FracCubePoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Snap this fractional point to the nearest cell. Each axis is rounded
    /// to the nearest integer, then the axis that accumulated the largest
    /// rounding error is recomputed from the other two so the result lands
    /// back on the `x + y + z = 0` lattice.
    ///
    /// The comparison order is significant for points that sit exactly on a
    /// cell edge or vertex: x is corrected only when its error is strictly
    /// largest, then y only when its error strictly beats z, otherwise z.
    /// That ordering decides which of the tied cells such a point snaps to,
    /// so it must not be reshuffled.
    pub fn round(self) -> CubePoint {
        let mut rx = self.x.round();
        let mut ry = self.y.round();
        let rz = self.z.round();
        let dx = (rx - self.x).abs();
        let dy = (ry - self.y).abs();
        let dz = (rz - self.z).abs();
        if dx > dy && dx > dz {
            rx = -ry - rz;
        } else if dy > dz {
            ry = -rx - rz;
        }
        // When z is the axis being corrected there is nothing to do: the
        // two-component representation recomputes z from x and y anyway
        CubePoint::new_xy(rx as i16, ry as i16)
    }
}

/// A set of cube points
pub type CubePointSet = HashSet<CubePoint, FnvBuildHasher>;
/// A map of cube points to some `T`
pub type CubePointMap<T> = HashMap<CubePoint, T, FnvBuildHasher>;
/// A set of offset coordinates that remembers insertion order. Costs a bit
/// more memory than a plain set, so it's reserved for the places where the
/// ordering is actually load-bearing (highlight teardown).
pub type OffsetCoordIndexSet = IndexSet<OffsetCoord, FnvBuildHasher>;

/// The 6 directions in which a cell lines up side-to-side with its
/// neighbors. Each variant is a unit step in cube space; the declaration
/// order is the order neighbors are generated in by [CubePoint::adjacents],
/// so searches visit neighbors in this order.
///
/// See this page for more info (we use "pointy topped" tiles):
/// https://www.redblobgames.com/grids/hexagons/#coordinates-cube
#[derive(Copy, Clone, Debug, EnumIter, PartialEq, Eq, Hash)]
pub enum HexDirection {
    /// North-east
    NE,
    /// East
    E,
    /// South-east
    SE,
    /// South-west
    SW,
    /// West
    W,
    /// North-west
    NW,
}

impl HexDirection {
    /// Get a vector offset that would move a point one cell in this direction
    pub fn to_vector(self) -> CubeVector {
        match self {
            Self::NE => CubeVector::new(1, -1),
            Self::E => CubeVector::new(1, 0),
            Self::SE => CubeVector::new(0, 1),
            Self::SW => CubeVector::new(-1, 1),
            Self::W => CubeVector::new(-1, 0),
            Self::NW => CubeVector::new(0, -1),
        }
    }
}
