/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::IntakeConfig;
use crate::shared::{Direction, Request, RequestError};

/***************************************/
/*               Errors                */
/***************************************/
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("Dispatcher is no longer accepting requests")]
    Disconnected,
}

/**
 * Turns a stream of floor numbers into validated requests for the dispatcher.
 *
 * Floors are read as whitespace separated tokens and paired up as
 * (pickup, dropoff), so a pair may be split over several lines. Invalid pairs
 * are reported and skipped without stopping the intake.
 *
 * # Fields
 * - `n_floors`:        Top floor of the building, used for validation.
 * - `interactive`:     Whether to print a prompt before each line is read.
 * - `request_tx`:      Producer side of the dispatcher's pending queue.
 */
pub struct Intake {
    n_floors: u8,
    interactive: bool,
    request_tx: cbc::Sender<Request>,
}

impl Intake {
    pub fn new(config: &IntakeConfig, n_floors: u8, request_tx: cbc::Sender<Request>) -> Intake {
        Intake {
            n_floors,
            interactive: config.interactive,
            request_tx,
        }
    }

    /// Read until end of input. Returns how many requests were handed to the
    /// dispatcher.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut prompt: W) -> Result<usize, IntakeError> {
        let mut accepted = 0;
        let mut pickup: Option<i64> = None;

        self.prompt(&mut prompt, pickup.is_none())?;
        for line in input.lines() {
            for token in line?.split_whitespace() {
                let floor = match token.parse::<i64>() {
                    Ok(floor) => floor,
                    Err(_) => {
                        // Start over from the pickup floor
                        warn!("{}", RequestError::NotAFloor(token.to_string()));
                        pickup = None;
                        continue;
                    }
                };

                match pickup.take() {
                    None => pickup = Some(floor),
                    Some(pickup_floor) => {
                        if self.submit(pickup_floor, floor)? {
                            accepted += 1;
                        }
                    }
                }
            }
            self.prompt(&mut prompt, pickup.is_none())?;
        }

        if let Some(floor) = pickup {
            warn!("Input ended before a dropoff floor was given for pickup floor {}", floor);
        }

        Ok(accepted)
    }

    fn submit(&self, pickup_floor: i64, dropoff_floor: i64) -> Result<bool, IntakeError> {
        let direction = if dropoff_floor > pickup_floor {
            Direction::Up
        } else {
            Direction::Down
        };
        info!(
            "Request received: pickupFloor={}, direction={}",
            pickup_floor, direction
        );

        match Request::new(pickup_floor, dropoff_floor, self.n_floors) {
            Ok(request) => {
                self.request_tx
                    .send(request)
                    .map_err(|_| IntakeError::Disconnected)?;
                Ok(true)
            }
            Err(e) => {
                warn!("Rejected request ({}, {}): {}", pickup_floor, dropoff_floor, e);
                Ok(false)
            }
        }
    }

    fn prompt<W: Write>(&self, prompt: &mut W, expect_pickup: bool) -> io::Result<()> {
        if !self.interactive {
            return Ok(());
        }

        if expect_pickup {
            write!(prompt, "Enter pickup floor: ")?;
        } else {
            write!(prompt, "Enter dropoff floor: ")?;
        }
        prompt.flush()
    }
}
