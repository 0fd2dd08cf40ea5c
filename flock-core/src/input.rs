use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::vector::Vector2D;

/// One manual-control direction for the leader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    const fn bit(self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Down => 0b0010,
            Direction::Left => 0b0100,
            Direction::Right => 0b1000,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Unit offset in screen coordinates (y grows downward).
    pub const fn offset(self) -> Vector2D {
        match self {
            Direction::Up => Vector2D::new(0.0, -1.0),
            Direction::Down => Vector2D::new(0.0, 1.0),
            Direction::Left => Vector2D::new(-1.0, 0.0),
            Direction::Right => Vector2D::new(1.0, 0.0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected one of: up, down, left, right")]
pub struct UnknownDirection;

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| s.eq_ignore_ascii_case(d.name()))
            .ok_or(UnknownDirection)
    }
}

/// Snapshot of the directions held down for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressedDirections(u8);

impl PressedDirections {
    pub const fn none() -> Self {
        Self(0)
    }

    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    pub const fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.contains(*d))
    }

    /// Shift `position` by `speed` once per pressed direction, in up, down,
    /// left, right order.
    pub fn nudge(&self, position: &mut Vector2D, speed: f32) {
        for direction in self.iter() {
            *position += direction.offset() * speed;
        }
    }
}

impl FromIterator<Direction> for PressedDirections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_empty() {
        let mut position = Vector2D::new(1.0, 1.0);
        PressedDirections::none().nudge(&mut position, 2.5);

        assert!(PressedDirections::none().is_empty());
        assert_eq!(position, Vector2D::new(1.0, 1.0));
    }

    #[test]
    fn test_contains() {
        let pressed = PressedDirections::none()
            .with(Direction::Up)
            .with(Direction::Right);

        assert!(pressed.contains(Direction::Up));
        assert!(pressed.contains(Direction::Right));
        assert!(!pressed.contains(Direction::Down));
        assert_eq!(pressed.iter().count(), 2);
    }

    #[test]
    fn test_nudge() {
        let pressed: PressedDirections = [Direction::Up, Direction::Left].into_iter().collect();
        let mut position = Vector2D::new(10.0, 10.0);
        pressed.nudge(&mut position, 2.5);
        assert_eq!(position, Vector2D::new(7.5, 7.5));

        let opposed: PressedDirections = [Direction::Up, Direction::Down].into_iter().collect();
        let mut position = Vector2D::new(10.0, 10.0);
        opposed.nudge(&mut position, 2.5);
        assert_eq!(position, Vector2D::new(10.0, 10.0));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::Right.to_string(), "right");
    }
}
