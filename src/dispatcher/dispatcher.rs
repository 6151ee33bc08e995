/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use std::time::Instant;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::DispatcherConfig;
use crate::elevator::ElevatorCar;
use crate::shared::{CarStatus, Request};

/**
 * Assigns requests to cars and drives the fleet, one tick at a time.
 *
 * The dispatcher owns every car. The only thing shared with other threads is
 * the pending request channel, which producers reach through `request_sender`.
 *
 * # Fields
 * - `cars`:        The fleet, in assignment scan order.
 * - `request_tx`:  Producer side of the pending queue, cloned out to producers.
 * - `request_rx`:  Consumer side of the pending queue, drained once per tick.
 * - `status_tx`:   Optional sink for a `CarStatus` after every car step.
 */
pub struct Dispatcher {
    cars: Vec<ElevatorCar>,
    request_tx: cbc::Sender<Request>,
    request_rx: cbc::Receiver<Request>,
    status_tx: Option<cbc::Sender<CarStatus>>,
}

impl Dispatcher {
    pub fn new(config: &DispatcherConfig, status_tx: Option<cbc::Sender<CarStatus>>) -> Dispatcher {
        let (request_tx, request_rx) = cbc::unbounded::<Request>();
        let cars = (0..config.n_cars)
            .map(|id| ElevatorCar::new(id, config.n_floors))
            .collect();

        Dispatcher {
            cars,
            request_tx,
            request_rx,
            status_tx,
        }
    }

    pub fn cars(&self) -> &[ElevatorCar] {
        &self.cars
    }

    pub fn pending(&self) -> usize {
        self.request_rx.len()
    }

    pub fn enqueue(&self, request: Request) {
        // The dispatcher holds the receiver, so the channel cannot be disconnected
        let _ = self.request_tx.send(request);
    }

    pub fn request_sender(&self) -> cbc::Sender<Request> {
        self.request_tx.clone()
    }

    /// One scheduling cycle: assign at most one pending request, then move
    /// every car that has somewhere to go.
    pub fn tick(&mut self) {
        if let Ok(request) = self.request_rx.try_recv() {
            self.assign(request);
        }

        for car in self.cars.iter_mut().filter(|car| !car.is_idle()) {
            car.step();
            debug!("Elevator {} {}", car.id(), car);

            if let Some(status_tx) = &self.status_tx {
                if status_tx.send(car.status()).is_err() {
                    debug!("Status receiver is gone, dropping status of elevator {}", car.id());
                }
            }
        }
    }

    pub fn run(mut self, tick_rx: cbc::Receiver<Instant>, terminate_rx: cbc::Receiver<()>) -> Dispatcher {
        info!("Dispatcher running with {} elevators", self.cars.len());

        loop {
            cbc::select! {
                recv(tick_rx) -> tick => {
                    match tick {
                        Ok(_) => self.tick(),
                        Err(e) => {
                            log::error!("Tick source closed: {}", e);
                            return self;
                        }
                    }
                }
                recv(terminate_rx) -> _ => {
                    info!("Dispatcher terminated");
                    return self;
                }
            }
        }
    }

    // Merge into a car already passing the pickup floor, otherwise pay for
    // the cheapest one.
    fn assign(&mut self, request: Request) -> Option<usize> {
        info!("Adding request: {}", request);

        let index = match self.absorbing_car(&request) {
            Some(index) => {
                info!("Adding request to existing elevator {}: {}", index, request);
                index
            }
            None => {
                let index = self.cheapest_car(&request)?;
                info!("Added request to elevator {}: {}", index, request);
                index
            }
        };

        self.cars[index].add_request(&request);
        Some(index)
    }

    fn absorbing_car(&self, request: &Request) -> Option<usize> {
        self.cars
            .iter()
            .position(|car| car.can_absorb(request.pickup_floor(), request.direction()))
    }

    fn cheapest_car(&self, request: &Request) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;

        for (index, car) in self.cars.iter().enumerate() {
            let cost = car.cost(request);
            debug!("Elevator {} cost for {}: {}", index, request, cost);

            // Strictly lower wins, so ties go to the lowest index
            if best.map_or(true, |(_, best_cost)| cost < best_cost) {
                best = Some((index, cost));
            }
        }

        best.map(|(index, _)| index)
    }
}

/***************************************/
/*           Test utilities            */
/***************************************/
#[cfg(test)]
impl Dispatcher {
    pub fn test_cars_mut(&mut self) -> &mut [ElevatorCar] {
        &mut self.cars
    }

    pub fn test_assign(&mut self, request: Request) -> Option<usize> {
        self.assign(request)
    }

    pub fn test_cheapest_car(&self, request: &Request) -> Option<usize> {
        self.cheapest_car(request)
    }
}
