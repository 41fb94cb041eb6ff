//! The contract between the movement core and the tile surface that hosts
//! it. The core never touches pixels or scene objects; everything it knows
//! about the board goes through [TileSurface], and everything it shows goes
//! back out through the same trait.
//!
//! [MarkerGrid] is the reference implementation: a plain rectangular grid
//! held in memory. It backs the test suite and the CLI driver, and doubles
//! as a template for wiring the core up to a real rendering surface.

use crate::grid::OffsetCoord;
use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What currently occupies a cell. Only the kind matters for movement;
/// everything visual lives in [MarkerVariant].
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// An empty cell. The only kind a unit can stand on or move through.
    Blank,
    /// The cell the moving unit stands on.
    Unit,
    /// Anything else on the surface (props, scenery, terrain). Never
    /// traversable.
    Obstacle,
}

/// The visual sub-state of a cell, layered on top of its [MarkerKind]. The
/// core assigns these deterministically while a move is previewed; the
/// surface treats the value as an opaque display selector.
///
/// The discriminants are stable so surfaces that pick a cell's appearance by
/// integer index can use the value directly.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MarkerVariant {
    /// Plain presentation, nothing overlaid
    Base = 0,
    /// Cell is inside the selected unit's movement range
    Highlight = 1,
    /// Intermediate cell of the previewed path
    PathLine = 2,
    /// Final cell of the previewed path, under the cursor
    Cursor = 3,
}

/// The capability the core needs from its host: one read query and one
/// write command, both addressed in offset coordinates.
///
/// Reads are synchronous and side-effect-free. Writes are fire-and-forget;
/// the core never waits on or verifies them.
pub trait TileSurface {
    /// The kind of marker at the given cell, or `None` if the cell is not
    /// on the surface at all. The distinction matters: the movement session
    /// treats an off-surface pointer differently from an on-surface cell
    /// that merely isn't reachable.
    fn marker(&self, coord: OffsetCoord) -> Option<MarkerKind>;

    /// Write a cell's marker and visual variant. Writes to cells that are
    /// not on the surface are ignored.
    fn set_marker(
        &mut self,
        coord: OffsetCoord,
        marker: MarkerKind,
        variant: MarkerVariant,
    );

    /// Can a unit traverse this cell? Off-surface cells are never walkable.
    fn is_walkable(&self, coord: OffsetCoord) -> bool {
        self.marker(coord) == Some(MarkerKind::Blank)
    }
}

/// One cell of a [MarkerGrid]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Cell {
    kind: MarkerKind,
    variant: MarkerVariant,
}

impl Cell {
    const BLANK: Self = Self {
        kind: MarkerKind::Blank,
        variant: MarkerVariant::Base,
    };

    /// The character this cell renders as in the ASCII format. The inverse
    /// of [MarkerGrid::from_ascii] for base-variant cells; highlight, path,
    /// and cursor variants get their own glyphs so a session's visual state
    /// can be snapshotted as text.
    fn glyph(self) -> char {
        match (self.kind, self.variant) {
            (MarkerKind::Unit, _) => 'U',
            (MarkerKind::Obstacle, _) => '#',
            (MarkerKind::Blank, MarkerVariant::Base) => '.',
            (MarkerKind::Blank, MarkerVariant::Highlight) => '+',
            (MarkerKind::Blank, MarkerVariant::PathLine) => 'o',
            (MarkerKind::Blank, MarkerVariant::Cursor) => 'X',
        }
    }
}

/// An in-memory rectangular tile surface. Cell (0, 0) is the top-left
/// corner; columns grow to the right and rows grow downward, so the ASCII
/// form reads the way the board looks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerGrid {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl MarkerGrid {
    /// Create a grid of the given dimensions with every cell blank.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; usize::from(cols) * usize::from(rows)],
        }
    }

    /// Parse a grid from its ASCII form: one line per row, one character
    /// per cell, with `.` for blank, `U` for the unit, and `#` for an
    /// obstacle. All rows must be the same width. Fails on unknown
    /// characters, ragged rows, or an empty map.
    pub fn from_ascii(text: &str) -> anyhow::Result<Self> {
        let mut cells = Vec::new();
        let mut width = None;
        for (row, line) in text.lines().enumerate() {
            let line_width = line.chars().count();
            match width {
                None => width = Some(line_width),
                Some(width) if width != line_width => bail!(
                    "row {} is {} cells wide, expected {}",
                    row,
                    line_width,
                    width
                ),
                Some(_) => {}
            }
            for (col, c) in line.chars().enumerate() {
                let kind = match c {
                    '.' => MarkerKind::Blank,
                    'U' => MarkerKind::Unit,
                    '#' => MarkerKind::Obstacle,
                    other => bail!(
                        "unrecognized cell {:?} at ({}, {})",
                        other,
                        col,
                        row
                    ),
                };
                cells.push(Cell {
                    kind,
                    variant: MarkerVariant::Base,
                });
            }
        }

        let cols = width.ok_or_else(|| anyhow!("map is empty"))?;
        if cols == 0 {
            bail!("map is empty");
        }
        let rows = cells.len() / cols;
        Ok(Self {
            cols: u16::try_from(cols).context("map too wide")?,
            rows: u16::try_from(rows).context("map too tall")?,
            cells,
        })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// The visual variant at the given cell, or `None` if the cell is not
    /// on the grid. Mostly useful for asserting that a session cleaned up
    /// its highlights.
    pub fn variant(&self, coord: OffsetCoord) -> Option<MarkerVariant> {
        self.index(coord).map(|i| self.cells[i].variant)
    }

    fn index(&self, coord: OffsetCoord) -> Option<usize> {
        let col = i32::from(coord.col());
        let row = i32::from(coord.row());
        if (0..i32::from(self.cols)).contains(&col)
            && (0..i32::from(self.rows)).contains(&row)
        {
            Some(row as usize * usize::from(self.cols) + col as usize)
        } else {
            None
        }
    }
}

impl TileSurface for MarkerGrid {
    fn marker(&self, coord: OffsetCoord) -> Option<MarkerKind> {
        self.index(coord).map(|i| self.cells[i].kind)
    }

    fn set_marker(
        &mut self,
        coord: OffsetCoord,
        marker: MarkerKind,
        variant: MarkerVariant,
    ) {
        if let Some(i) = self.index(coord) {
            self.cells[i] = Cell {
                kind: marker,
                variant,
            };
        }
    }
}

/// Renders the grid in the same ASCII format [MarkerGrid::from_ascii]
/// accepts, plus glyphs for the session's visual variants (`+` highlight,
/// `o` path line, `X` cursor). Each row ends with a newline.
impl fmt::Display for MarkerGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..usize::from(self.rows) {
            for col in 0..usize::from(self.cols) {
                let cell = self.cells[row * usize::from(self.cols) + col];
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
