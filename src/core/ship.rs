//! Ship records and orientation.

use alloc::vec::Vec;

use crate::core::common::Coordinate;

/// Orientation of a ship on the board. Ships extend from their anchor in +x
/// (horizontal) or +y (vertical).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `index` of a ship anchored at `anchor`, or `None` if it falls off
    /// the board.
    pub fn cell(self, anchor: Coordinate, index: u8) -> Option<Coordinate> {
        let step = i8::try_from(index).ok()?;
        match self {
            Orientation::Horizontal => anchor.offset(step, 0),
            Orientation::Vertical => anchor.offset(0, step),
        }
    }
}

/// Identity of a ship, unique within its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(pub u16);

/// A placed ship and its damage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    size: u8,
    coords: Vec<Coordinate>,
    hits: u8,
}

impl Ship {
    /// A fresh, undamaged ship. `coords` are in placement order with the
    /// anchor first.
    pub(crate) fn new(id: ShipId, coords: Vec<Coordinate>) -> Self {
        Self {
            id,
            size: coords.len() as u8,
            coords,
            hits: 0,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn hits(&self) -> u8 {
        self.hits
    }

    /// Occupied cells, anchor first.
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn occupies(&self, at: Coordinate) -> bool {
        self.coords.contains(&at)
    }

    /// A ship is sunk once every cell has been hit.
    pub fn is_sunk(&self) -> bool {
        self.hits >= self.size
    }

    pub(crate) fn register_hit(&mut self) {
        if self.hits < self.size {
            self.hits += 1;
        }
    }
}
