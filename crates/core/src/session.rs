//! The interaction layer: a state machine that turns raw pointer/trigger
//! events into range highlights, path previews, and committed moves. This is
//! the only part of the crate that writes to the tile surface, and it tracks
//! exactly which cells it has written so it can restore them without
//! touching anything else on the board.

use crate::{
    config::SessionConfig,
    grid::{AxialCoord, CubePoint, OffsetCoord, OffsetCoordIndexSet},
    search,
    surface::{MarkerKind, MarkerVariant, TileSurface},
};
use anyhow::Context;
use log::{debug, trace};
use validator::Validate;

/// Where a session currently is in the select/preview/commit cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No unit is selected. The only event that does anything in this state
    /// is a trigger on a unit's cell.
    Idle,
    /// A unit is selected and its movement range is highlighted. `origin` is
    /// the cell the unit is standing on.
    Selected {
        /// The selected unit's cell
        origin: OffsetCoord,
    },
}

/// A movement session drives one unit-move interaction at a time:
///
/// 1. A trigger on a unit's cell selects it and highlights every cell it
///    could move to.
/// 2. Pointer movement over a highlighted cell previews the path the unit
///    would take to get there.
/// 3. A trigger on a highlighted cell commits the move: all session visuals
///    come down and the unit's marker is relocated.
///
/// Construct one session per board and keep it for the board's lifetime,
/// feeding it events as the input layer resolves them to grid coordinates.
/// Events are handled synchronously and to completion, so the session is
/// always in a consistent state between calls.
///
/// The session never stores the board itself; each event borrows the
/// [TileSurface] it should read and write. Handing a session events from two
/// different boards will corrupt the visuals on both.
#[derive(Clone, Debug)]
pub struct MovementSession {
    config: SessionConfig,
    state: SessionState,
    /// Every cell currently showing a range highlight. The move commit and
    /// the path preview both test membership here, and teardown walks it to
    /// restore the cells it marked. Ordered so visuals come down in the
    /// order they went up.
    reachable: OffsetCoordIndexSet,
    /// The cells of the last-drawn path preview, in path order. Always a
    /// subset of `reachable`, since the preview search is restricted to
    /// highlighted cells.
    last_path: Vec<OffsetCoord>,
}

impl MovementSession {
    /// Create an idle session with the given config. Returns an error if the
    /// config is invalid.
    pub fn new(config: SessionConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid config")?;
        Ok(Self {
            config,
            state: SessionState::Idle,
            reachable: OffsetCoordIndexSet::default(),
            last_path: Vec::new(),
        })
    }

    /// Get a reference to the config this session was built with
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The cells currently highlighted as reachable. Empty unless a unit is
    /// selected.
    pub fn reachable(&self) -> &OffsetCoordIndexSet {
        &self.reachable
    }

    /// The cells of the currently drawn path preview, in order from the
    /// first step to the target. Empty unless a unit is selected and the
    /// pointer has rested on a reachable cell.
    pub fn drawn_path(&self) -> &[OffsetCoord] {
        &self.last_path
    }

    /// Handle a primary-trigger event (click, tap, confirm button) on the
    /// given cell. While idle, a trigger on a unit's cell selects that unit.
    /// While a unit is selected, a trigger on a reachable cell moves the
    /// unit there and returns to idle; a trigger anywhere else changes
    /// nothing, leaving reselection policy to the caller.
    pub fn trigger_activated(
        &mut self,
        surface: &mut impl TileSurface,
        cell: OffsetCoord,
    ) {
        let axial = AxialCoord::from(cell);
        debug!(
            "Trigger at offset {}, axial {}, cube {}",
            cell,
            axial,
            CubePoint::from(axial)
        );
        match self.state {
            SessionState::Idle => self.select(surface, cell),
            SessionState::Selected { origin } => {
                if self.reachable.contains(&cell) {
                    self.commit(surface, origin, cell);
                }
            }
        }
    }

    /// Handle the pointer coming to rest on the given cell. Does nothing
    /// while idle. While a unit is selected, a pointer on a reachable cell
    /// redraws the path preview to that cell; a pointer off the surface
    /// entirely clears the preview (there is no valid target under it); a
    /// pointer on an on-surface cell that merely isn't reachable leaves the
    /// existing preview alone.
    pub fn pointer_moved(
        &mut self,
        surface: &mut impl TileSurface,
        cursor: OffsetCoord,
    ) {
        let origin = match self.state {
            SessionState::Idle => return,
            SessionState::Selected { origin } => origin,
        };

        if surface.marker(cursor).is_none() {
            self.clear_path(surface);
            return;
        }
        if !self.reachable.contains(&cursor) {
            return;
        }
        self.draw_path(surface, origin, cursor);
    }

    /// Drop the current selection without moving the unit, restoring every
    /// cell this session marked. A no-op while idle. Callers that want
    /// "trigger another unit to reselect" can build it from this plus a
    /// fresh trigger event.
    pub fn cancel(&mut self, surface: &mut impl TileSurface) {
        if let SessionState::Selected { origin } = self.state {
            debug!("Cancelling selection at {}", origin);
        }
        self.clear_path(surface);
        self.clear_highlights(surface);
        self.state = SessionState::Idle;
    }

    /// Select the unit on `cell`, if there is one, and highlight its
    /// movement range.
    fn select(&mut self, surface: &mut impl TileSurface, cell: OffsetCoord) {
        if surface.marker(cell) != Some(MarkerKind::Unit) {
            return;
        }

        let reachable_cubes = search::reachable_within(
            CubePoint::from(cell),
            self.config.move_radius,
            |coord| surface.is_walkable(coord),
        );
        self.reachable = reachable_cubes
            .into_iter()
            .map(OffsetCoord::from)
            .collect();
        for &coord in &self.reachable {
            surface.set_marker(
                coord,
                MarkerKind::Blank,
                MarkerVariant::Highlight,
            );
        }

        self.state = SessionState::Selected { origin: cell };
        debug!(
            "Selected unit at {}, {} cells in range",
            cell,
            self.reachable.len()
        );
    }

    /// Move the selected unit from `origin` to `cell` and return to idle.
    /// `cell` must already be known reachable.
    fn commit(
        &mut self,
        surface: &mut impl TileSurface,
        origin: OffsetCoord,
        cell: OffsetCoord,
    ) {
        // Preview first, then highlights: path cells restore to highlights,
        // which the second pass then takes down to base
        self.clear_path(surface);
        self.clear_highlights(surface);
        surface.set_marker(cell, MarkerKind::Unit, MarkerVariant::Base);
        surface.set_marker(origin, MarkerKind::Blank, MarkerVariant::Base);
        self.state = SessionState::Idle;
        debug!("Moved unit {} -> {}", origin, cell);
    }

    /// Redraw the path preview from `origin` to `cursor`. The previous
    /// preview comes down first; its cells are still in range, so they
    /// restore to highlights rather than to base.
    fn draw_path(
        &mut self,
        surface: &mut impl TileSurface,
        origin: OffsetCoord,
        cursor: OffsetCoord,
    ) {
        self.clear_path(surface);

        // The search is restricted to highlighted cells, which keeps the
        // preview inside the drawn range and guarantees the teardown
        // bookkeeping above stays correct. Every highlighted cell is
        // reachable through other highlighted cells (they were found by a
        // radius-bounded search from the same origin), so this never loses
        // a path that raw walkability would have found.
        let cubes = search::find_path(
            CubePoint::from(origin),
            CubePoint::from(cursor),
            |coord| self.reachable.contains(&coord),
        );
        trace!(
            "Previewing path {} -> {} ({} steps)",
            origin,
            cursor,
            cubes.len()
        );

        for (i, &cube) in cubes.iter().enumerate() {
            let coord = OffsetCoord::from(cube);
            // The target cell under the cursor gets its own look
            let variant = if i + 1 == cubes.len() {
                MarkerVariant::Cursor
            } else {
                MarkerVariant::PathLine
            };
            surface.set_marker(coord, MarkerKind::Blank, variant);
            self.last_path.push(coord);
        }
    }

    /// Take down the current path preview, restoring its cells to plain
    /// range highlights. Only blank cells are rewritten, so a unit or
    /// obstacle that has somehow appeared under the preview is left alone.
    fn clear_path(&mut self, surface: &mut impl TileSurface) {
        for coord in self.last_path.drain(..) {
            if surface.marker(coord) == Some(MarkerKind::Blank) {
                surface.set_marker(
                    coord,
                    MarkerKind::Blank,
                    MarkerVariant::Highlight,
                );
            }
        }
    }

    /// Take down every range highlight, restoring the cells to their base
    /// look. Same blanks-only guard as [Self::clear_path].
    fn clear_highlights(&mut self, surface: &mut impl TileSurface) {
        for coord in self.reachable.drain(..) {
            if surface.marker(coord) == Some(MarkerKind::Blank) {
                surface.set_marker(
                    coord,
                    MarkerKind::Blank,
                    MarkerVariant::Base,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MarkerGrid;

    fn session(move_radius: u16) -> MovementSession {
        MovementSession::new(SessionConfig { move_radius }).unwrap()
    }

    #[test]
    fn test_trigger_on_empty_cell_stays_idle() {
        let mut grid = MarkerGrid::from_ascii("U..\n...").unwrap();
        let mut session = session(2);
        session.trigger_activated(&mut grid, OffsetCoord::new(2, 1));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.reachable().is_empty());
        assert_eq!(grid, MarkerGrid::from_ascii("U..\n...").unwrap());
    }

    #[test]
    fn test_select_highlights_range() {
        let mut grid = MarkerGrid::from_ascii("...\n.U.\n...").unwrap();
        let mut session = session(1);
        let origin = OffsetCoord::new(1, 1);
        session.trigger_activated(&mut grid, origin);

        assert_eq!(session.state(), SessionState::Selected { origin });
        // Row 1 is odd (shifted right), so the unit at (1, 1) touches
        // (1, 0), (2, 0), (0, 1), (2, 1), (1, 2) and (2, 2)
        assert_eq!(session.reachable().len(), 6);
        for &coord in session.reachable() {
            assert_eq!(grid.variant(coord), Some(MarkerVariant::Highlight));
        }
        // The unit's own cell is not part of the range
        assert!(!session.reachable().contains(&origin));
        assert_eq!(grid.marker(origin), Some(MarkerKind::Unit));
    }

    #[test]
    fn test_pointer_moved_while_idle_does_nothing() {
        let mut grid = MarkerGrid::from_ascii("U..").unwrap();
        let mut session = session(2);
        session.pointer_moved(&mut grid, OffsetCoord::new(2, 0));
        assert!(session.drawn_path().is_empty());
        assert_eq!(grid, MarkerGrid::from_ascii("U..").unwrap());
    }

    #[test]
    fn test_trigger_outside_range_keeps_selection() {
        let mut grid = MarkerGrid::from_ascii("U....").unwrap();
        let mut session = session(2);
        let origin = OffsetCoord::new(0, 0);
        session.trigger_activated(&mut grid, origin);
        let highlighted = session.reachable().clone();

        // (4, 0) is 4 steps away, well outside radius 2
        session.trigger_activated(&mut grid, OffsetCoord::new(4, 0));
        assert_eq!(session.state(), SessionState::Selected { origin });
        assert_eq!(session.reachable(), &highlighted);
    }

    #[test]
    fn test_commit_moves_unit_and_resets() {
        let mut grid = MarkerGrid::from_ascii("U....").unwrap();
        let mut session = session(2);
        session.trigger_activated(&mut grid, OffsetCoord::new(0, 0));
        session.pointer_moved(&mut grid, OffsetCoord::new(2, 0));
        session.trigger_activated(&mut grid, OffsetCoord::new(2, 0));

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.reachable().is_empty());
        assert!(session.drawn_path().is_empty());
        assert_eq!(grid, MarkerGrid::from_ascii("..U..").unwrap());
    }

    #[test]
    fn test_cancel_restores_board() {
        let mut grid = MarkerGrid::from_ascii("...\n.U.\n...").unwrap();
        let mut session = session(1);
        session.trigger_activated(&mut grid, OffsetCoord::new(1, 1));
        session.pointer_moved(&mut grid, OffsetCoord::new(2, 1));
        session.cancel(&mut grid);

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.reachable().is_empty());
        assert!(session.drawn_path().is_empty());
        assert_eq!(grid, MarkerGrid::from_ascii("...\n.U.\n...").unwrap());
    }

    #[test]
    fn test_cancel_while_idle_is_noop() {
        let mut grid = MarkerGrid::from_ascii("U..").unwrap();
        let mut session = session(2);
        session.cancel(&mut grid);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(grid, MarkerGrid::from_ascii("U..").unwrap());
    }
}
