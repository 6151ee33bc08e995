/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{CarStatus, Direction, Request};

/**
 * A single car in the fleet, moving one floor per tick in scan order.
 *
 * The car never picks its own work. The dispatcher decides which requests it
 * gets through `add_request`, and drives it through `step`.
 *
 * # Fields
 * - `id`:          Index of the car in the fleet.
 * - `n_floors`:    Top floor of the building. Floors are numbered from 1.
 * - `floor`:       Current floor.
 * - `direction`:   `Stop` exactly when there are no stops left after a step.
 * - `stops`:       Floors still to visit, in insertion order. Duplicates are
 *                  kept and serviced together.
 */
#[derive(Debug, Clone)]
pub struct ElevatorCar {
    id: usize,
    n_floors: u8,
    floor: u8,
    direction: Direction,
    stops: Vec<u8>,
}

impl ElevatorCar {
    pub fn new(id: usize, n_floors: u8) -> ElevatorCar {
        ElevatorCar {
            id,
            n_floors,
            floor: 1,
            direction: Direction::Stop,
            stops: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn stops(&self) -> &[u8] {
        &self.stops
    }

    pub fn is_idle(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn status(&self) -> CarStatus {
        CarStatus {
            id: self.id,
            floor: self.floor,
            direction: self.direction,
            stops: self.stops.clone(),
        }
    }

    /// Whether the car will pass `pickup_floor` anyway, travelling in
    /// `direction`, before reaching its farthest committed stop. A stopped car
    /// takes anything.
    pub fn can_absorb(&self, pickup_floor: u8, direction: Direction) -> bool {
        match self.direction {
            Direction::Stop => true,
            _ if direction != self.direction => false,
            Direction::Up => {
                let farthest = self.highest_stop_above().unwrap_or(self.n_floors);
                self.floor <= pickup_floor && pickup_floor <= farthest
            }
            Direction::Down => {
                let farthest = self.lowest_stop_below().unwrap_or(1);
                farthest <= pickup_floor && pickup_floor <= self.floor
            }
        }
    }

    pub fn add_request(&mut self, request: &Request) {
        self.stops.push(request.pickup_floor());
        self.stops.push(request.dropoff_floor());
    }

    /// Dispatch score for `request`, lower is better. This is a distance plus
    /// congestion estimate, not a promise of arrival time.
    pub fn cost(&self, request: &Request) -> u32 {
        let pickup = request.pickup_floor();
        let dropoff = request.dropoff_floor();

        let stops = self.stops_until(pickup) + self.stops_until(dropoff);
        let distance = self.floor.abs_diff(pickup) as u32 + pickup.abs_diff(dropoff) as u32;

        stops + distance
    }

    /// Advance the car by one tick.
    pub fn step(&mut self) {
        match self.direction {
            Direction::Stop => {
                // Riders waiting on this floor board before the car sets off
                self.service_floor();
                if let Some(&first) = self.stops.first() {
                    self.direction = Direction::between(self.floor, first);
                }
            }
            Direction::Up | Direction::Down => {
                self.service_floor();
                self.resolve_direction();

                if self.direction != Direction::Stop {
                    self.advance();
                    self.service_floor();
                    self.resolve_direction();
                }
            }
        }
    }

    fn service_floor(&mut self) {
        let floor = self.floor;
        let before = self.stops.len();
        self.stops.retain(|&stop| stop != floor);

        let serviced = before - self.stops.len();
        if serviced > 0 {
            debug!(
                "Elevator {} serviced {} stop(s) at floor {}",
                self.id, serviced, floor
            );
        }
    }

    fn resolve_direction(&mut self) {
        self.direction = if self.stops.is_empty() {
            Direction::Stop
        } else if self.floor == 1 {
            Direction::Up
        } else if self.floor == self.n_floors {
            Direction::Down
        } else {
            match self.direction {
                Direction::Up if self.highest_stop_above().is_none() => Direction::Down,
                Direction::Down if self.lowest_stop_below().is_none() => Direction::Up,
                direction => direction,
            }
        };
    }

    // Only called after resolve_direction, which never points out of the building
    fn advance(&mut self) {
        match self.direction {
            Direction::Up => self.floor += 1,
            Direction::Down => self.floor -= 1,
            Direction::Stop => (),
        }
    }

    fn highest_stop_above(&self) -> Option<u8> {
        self.stops.iter().copied().filter(|&stop| stop > self.floor).max()
    }

    fn lowest_stop_below(&self) -> Option<u8> {
        self.stops.iter().copied().filter(|&stop| stop < self.floor).min()
    }

    // Distance to the first stop that sits between the car and `target`.
    // With no such stop, fall back to the end of the building in the current
    // direction, or to the car itself when it has nothing queued.
    fn stops_until(&self, target: u8) -> u32 {
        let floor = self.floor;
        let scanning_down = self.direction == Direction::Down;

        let blocking = self.stops.iter().copied().find(|&stop| {
            if scanning_down {
                stop < floor && stop > target
            } else {
                stop > floor && stop < target
            }
        });

        let reference = match blocking {
            Some(stop) => stop,
            None if self.stops.is_empty() => floor,
            None if self.direction == Direction::Up => self.n_floors,
            None => 1,
        };

        reference.abs_diff(floor) as u32
    }
}

impl fmt::Display for ElevatorCar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, {:?}}}",
            self.floor,
            self.direction.to_i8(),
            self.stops
        )
    }
}

/***************************************/
/*           Test utilities            */
/***************************************/
#[cfg(test)]
impl ElevatorCar {
    pub fn test_place(&mut self, floor: u8, direction: Direction, stops: Vec<u8>) {
        self.floor = floor;
        self.direction = direction;
        self.stops = stops;
    }
}
