/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stop,
}

impl Direction {
    /// Direction of travel from `from` towards `to`. Equal floors give `Stop`.
    pub fn between(from: u8, to: u8) -> Direction {
        if to > from {
            Direction::Up
        } else if to < from {
            Direction::Down
        } else {
            Direction::Stop
        }
    }

    pub fn to_i8(&self) -> i8 {
        match *self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Stop => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Stop => write!(f, "stop"),
        }
    }
}

/**
 * Snapshot of a single car, emitted after each `step()` for monitoring.
 *
 * # Fields
 * - `id`:          Index of the car in the fleet.
 * - `floor`:       Floor the car is at after the step.
 * - `direction`:   Direction after the step.
 * - `stops`:       Pending stops in insertion order.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CarStatus {
    pub id: usize,
    pub floor: u8,
    pub direction: Direction,
    pub stops: Vec<u8>,
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Elevator {} {{{}, {}, {:?}}}",
            self.id,
            self.floor,
            self.direction.to_i8(),
            self.stops
        )
    }
}
