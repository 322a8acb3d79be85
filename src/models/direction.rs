use std::fmt;

/// Trade direction of one leg relative to its pair symbol.
///
/// `Forward` sells the pair's base asset for its quote asset, `Reverse`
/// buys the base asset with the quote asset. On the wire (persisted path
/// files) these are `+1` and `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// Parse from the signed integer used in persisted path files.
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Direction::Forward),
            -1 => Some(Direction::Reverse),
            _ => None,
        }
    }

    /// Signed integer form for persisted path files.
    #[inline]
    pub fn sign(&self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    /// Single-character form used in human-readable path listings.
    #[inline]
    pub fn glyph(&self) -> char {
        match self {
            Direction::Forward => '+',
            Direction::Reverse => '-',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
