//! Graph search over the hex lattice: radius-bounded reachability and
//! shortest paths. Both engines walk cube coordinates but consult
//! walkability in offset coordinates, since that is the system the tile
//! surface answers in.

mod path;
mod range;

pub use self::{
    path::{find_path, hex_line},
    range::reachable_within,
};
