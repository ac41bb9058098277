//! Room and envelope model shared with map decoders.

use serde::{Deserialize, Serialize};

use crate::automaton::BitStream;

/// An axis-aligned room on the shared integer grid.
///
/// A room covers the cells `[min_x, max_x) x [min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Room {
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Width in cells.
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    /// Height in cells.
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// Corridors are rooms one cell wide or one cell tall.
    pub fn is_corridor(&self) -> bool {
        self.width() == 1 || self.height() == 1
    }
}

/// Axis-aligned bounding box of a room set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Envelope {
    /// Width in cells.
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    /// Height in cells.
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }
}

/// Bounding box across all rooms' borders, or `None` for an empty set.
pub fn envelope(rooms: &[Room]) -> Option<Envelope> {
    let first = rooms.first()?;
    let mut env = Envelope {
        min_x: first.min_x,
        max_x: first.max_x,
        min_y: first.min_y,
        max_y: first.max_y,
    };
    for room in &rooms[1..] {
        env.min_x = env.min_x.min(room.min_x);
        env.max_x = env.max_x.max(room.max_x);
        env.min_y = env.min_y.min(room.min_y);
        env.max_y = env.max_y.max(room.max_y);
    }
    Some(env)
}

/// Decodes a bit-driven process into a room layout.
///
/// The decoding scheme is a collaborator of the search core: implementations
/// consume bits from a fresh stream and emit rooms in placement order (the
/// first room is the layout's entry). The core makes no assumption about the
/// scheme beyond the [`Room`] coordinate contract.
pub trait MapDecoder {
    fn decode(&self, stream: &mut BitStream<'_>) -> Vec<Room>;
}
