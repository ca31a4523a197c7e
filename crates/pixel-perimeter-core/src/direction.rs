use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

const DX: [i32; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
const DY: [i32; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// One of the 8 Freeman chain-code directions.
///
/// Codes run counter-clockwise starting from `+x`, with `y` pointing down
/// the image: `East = 0`, `NorthEast = 1` is the step `(1, -1)`, and so on.
/// Even codes are axis-aligned, odd codes are diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    East = 0,
    NorthEast = 1,
    North = 2,
    NorthWest = 3,
    West = 4,
    SouthWest = 5,
    South = 6,
    SouthEast = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Map a unit step with components in `{-1, 0, 1}` to its direction.
    ///
    /// Returns `None` for the zero step and for anything that is not a unit
    /// step.
    pub fn from_step(step_x: i32, step_y: i32) -> Option<Self> {
        let dir = match (step_x, step_y) {
            (1, 0) => Direction::East,
            (1, -1) => Direction::NorthEast,
            (0, -1) => Direction::North,
            (-1, -1) => Direction::NorthWest,
            (-1, 0) => Direction::West,
            (-1, 1) => Direction::SouthWest,
            (0, 1) => Direction::South,
            (1, 1) => Direction::SouthEast,
            _ => return None,
        };
        Some(dir)
    }

    /// Direction of the per-axis sign of `delta`, or `None` for a zero delta.
    #[inline]
    pub fn from_delta(delta: Vector2<i64>) -> Option<Self> {
        Self::from_step(delta.x.signum() as i32, delta.y.signum() as i32)
    }

    #[inline]
    pub fn step(self) -> Vector2<i32> {
        let i = self as usize;
        Vector2::new(DX[i], DY[i])
    }

    #[inline]
    pub fn is_axis_aligned(self) -> bool {
        self.code() % 2 == 0
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        !self.is_axis_aligned()
    }

    /// Direction rotated by 180 degrees.
    #[inline]
    pub fn opposite(self) -> Self {
        Self::ALL[((self.code() + 4) % 8) as usize]
    }
}
