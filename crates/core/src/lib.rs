//! Skirmish is a tactical movement engine for hex tile grids. It answers the
//! three questions a grid game asks when a unit moves — which cells are in
//! range, what path the unit takes to a chosen cell, and which cells need
//! their visuals updated as the player previews and confirms the move.
//! Rendering and input capture are implemented elsewhere; this crate only
//! sees integer grid coordinates and a [TileSurface] it can query and mark.
//!
//! ```
//! use skirmish::{
//!     MarkerGrid, MovementSession, OffsetCoord, SessionConfig, SessionState,
//! };
//!
//! let mut grid = MarkerGrid::from_ascii("....\n.U..\n....").unwrap();
//! let mut session = MovementSession::new(SessionConfig::default()).unwrap();
//!
//! // Trigger on the unit to select it and highlight its movement range
//! session.trigger_activated(&mut grid, OffsetCoord::new(1, 1));
//! assert!(!session.reachable().is_empty());
//!
//! // Hovering a highlighted cell previews the path; a second trigger
//! // commits the move and takes all the session's visuals down
//! session.pointer_moved(&mut grid, OffsetCoord::new(3, 1));
//! session.trigger_activated(&mut grid, OffsetCoord::new(3, 1));
//! assert_eq!(session.state(), SessionState::Idle);
//! ```
//!
//! See [SessionConfig] for the knobs a session exposes, and [TileSurface]
//! for the contract a host has to implement to plug in a real board.

mod config;
mod grid;
mod search;
mod session;
mod surface;
mod util;

pub use crate::{
    config::SessionConfig,
    grid::{
        AxialCoord, CubePoint, CubePointMap, CubePointSet, CubeVector,
        FracCubePoint, HexDirection, OffsetCoord, OffsetCoordIndexSet,
    },
    search::{find_path, hex_line, reachable_within},
    session::{MovementSession, SessionState},
    surface::{MarkerGrid, MarkerKind, MarkerVariant, TileSurface},
    util::hex_range_len,
};
