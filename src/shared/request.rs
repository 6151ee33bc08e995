/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use super::structs::Direction;

/***************************************/
/*               Errors                */
/***************************************/
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Floor {floor} is outside the building (1..={n_floors})")]
    FloorOutOfRange { floor: i64, n_floors: u8 },
    #[error("Pickup and dropoff are both floor {floor}")]
    ZeroLengthTrip { floor: u8 },
    #[error("Not a floor number: {0:?}")]
    NotAFloor(String),
}

/***************************************/
/*       Public data structures        */
/***************************************/

/// A single passenger trip. Only constructed through [`Request::new`], so the
/// floors are always inside the building and never equal.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pickup_floor: u8,
    dropoff_floor: u8,
    direction: Direction,
}

impl Request {
    pub fn new(pickup_floor: i64, dropoff_floor: i64, n_floors: u8) -> Result<Request, RequestError> {
        let pickup_floor = check_floor(pickup_floor, n_floors)?;
        let dropoff_floor = check_floor(dropoff_floor, n_floors)?;

        if pickup_floor == dropoff_floor {
            return Err(RequestError::ZeroLengthTrip { floor: pickup_floor });
        }

        Ok(Request {
            pickup_floor,
            dropoff_floor,
            direction: Direction::between(pickup_floor, dropoff_floor),
        })
    }

    pub fn pickup_floor(&self) -> u8 {
        self.pickup_floor
    }

    pub fn dropoff_floor(&self) -> u8 {
        self.dropoff_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.pickup_floor, self.dropoff_floor)
    }
}

fn check_floor(floor: i64, n_floors: u8) -> Result<u8, RequestError> {
    if floor < 1 || floor > n_floors as i64 {
        return Err(RequestError::FloorOutOfRange { floor, n_floors });
    }
    Ok(floor as u8)
}

/***************************************/
/*             Unit tests              */
/***************************************/
