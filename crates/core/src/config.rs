use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines a movement session. The session validates its
/// config once at construction; after that it can never change, so two
/// sessions built from the same config always behave identically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SessionConfig {
    /// The maximum number of steps a unit can take in a single move. Cells
    /// further than this many hops from the unit (through walkable cells)
    /// are never highlighted and never accepted as a move target.
    ///
    /// A radius of 0 is legal but degenerate: selecting a unit highlights
    /// nothing, so no move can ever be committed.
    #[validate(range(min = 0, max = 1024))]
    pub move_radius: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { move_radius: 7 }
    }
}
