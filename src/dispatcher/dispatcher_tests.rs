/*
 * Unit tests for the dispatcher
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_dispatcher_init
 *  - test_dispatcher_scenario_two_cars
 *  - test_dispatcher_merges_into_passing_car
 *  - test_dispatcher_first_fit_prefers_idle_car_in_fleet_order
 *  - test_dispatcher_cost_*
 *  - test_dispatcher_drains_one_request_per_tick
 *  - test_dispatcher_empty_tick_is_noop
 *  - test_dispatcher_emits_status_after_step
 *  - test_dispatcher_accepts_requests_from_other_threads
 *  - test_dispatcher_run_until_terminated
 *  - test_dispatcher_serves_everything
 */

/***************************************/
/*             Unit tests              */
/***************************************/
use crate::config::DispatcherConfig;
use crate::dispatcher::Dispatcher;
use crate::shared::Direction::{Down, Stop, Up};
use crate::shared::{CarStatus, Request};
use crossbeam_channel::{bounded, unbounded, Receiver};
use std::thread::Builder;
use std::time::Instant;

const N_FLOORS: u8 = 10;

fn setup_dispatcher(n_cars: usize) -> (Dispatcher, Receiver<CarStatus>) {
    // Arrange mock channels
    let (status_tx, status_rx) = unbounded::<CarStatus>();

    // Default configuration
    let config = DispatcherConfig {
        n_floors: N_FLOORS,
        n_cars,
        tick_interval_ms: 1,
    };

    (Dispatcher::new(&config, Some(status_tx)), status_rx)
}

fn request(pickup: i64, dropoff: i64) -> Request {
    Request::new(pickup, dropoff, N_FLOORS).unwrap()
}

#[test]
fn test_dispatcher_init() {
    // Arrange
    let (dispatcher, _status_rx) = setup_dispatcher(3);

    // Assert
    assert_eq!(dispatcher.cars().len(), 3);
    assert_eq!(dispatcher.pending(), 0);
    for (index, car) in dispatcher.cars().iter().enumerate() {
        assert_eq!(car.id(), index);
        assert_eq!(car.floor(), 1);
        assert_eq!(car.direction(), Stop);
        assert!(car.is_idle());
    }
}

#[test]
fn test_dispatcher_scenario_two_cars() {
    // Arrange
    let (mut dispatcher, _status_rx) = setup_dispatcher(2);
    dispatcher.enqueue(request(3, 8));

    // Act
    dispatcher.tick();

    // Assert: assigned to the first car, which sets off in the same tick
    let car = &dispatcher.cars()[0];
    assert_eq!(car.stops(), &[3, 8]);
    assert_eq!(car.floor(), 1);
    assert_eq!(car.direction(), Up);
    assert!(dispatcher.cars()[1].is_idle());

    // Act
    dispatcher.tick();
    dispatcher.tick();

    // Assert
    let car = &dispatcher.cars()[0];
    assert_eq!(car.floor(), 3);
    assert_eq!(car.stops(), &[8]);
    assert_eq!(car.direction(), Up);
    assert_eq!(dispatcher.cars()[1].floor(), 1);
}

#[test]
fn test_dispatcher_merges_into_passing_car() {
    // Arrange
    let (mut dispatcher, _status_rx) = setup_dispatcher(2);
    dispatcher.test_cars_mut()[0].test_place(5, Up, vec![10]);

    // Act
    let assigned = dispatcher.test_assign(request(7, 9));

    // Assert
    assert_eq!(assigned, Some(0));
    assert_eq!(dispatcher.cars()[0].stops(), &[10, 7, 9]);
    assert!(dispatcher.cars()[1].is_idle());
}

#[test]
fn test_dispatcher_first_fit_prefers_idle_car_in_fleet_order() {
    // Arrange
    let (mut dispatcher, _status_rx) = setup_dispatcher(3);
    dispatcher.test_cars_mut()[0].test_place(5, Down, vec![2]);
    dispatcher.test_cars_mut()[2].test_place(4, Up, vec![9]);

    // Act: car 0 goes the wrong way, car 1 is idle and comes first
    let assigned = dispatcher.test_assign(request(6, 8));

    // Assert
    assert_eq!(assigned, Some(1));
    assert_eq!(dispatcher.cars()[1].stops(), &[6, 8]);
    assert_eq!(dispatcher.cars()[2].stops(), &[9]);
}

#[test]
fn test_dispatcher_cost_tie_goes_to_lowest_index() {
    // Arrange
    let (mut dispatcher, _status_rx) = setup_dispatcher(2);
    dispatcher.test_cars_mut()[0].test_place(3, Stop, vec![]);
    dispatcher.test_cars_mut()[1].test_place(3, Stop, vec![]);

    // Act
    let cheapest = dispatcher.test_cheapest_car(&request(3, 8));

    // Assert
    assert_eq!(cheapest, Some(0));
}

#[test]
fn test_dispatcher_cost_used_when_no_car_absorbs() {
    // Arrange: both cars head down, the request goes up
    let (mut dispatcher, _status_rx) = setup_dispatcher(2);
    dispatcher.test_cars_mut()[0].test_place(5, Down, vec![2]);
    dispatcher.test_cars_mut()[1].test_place(5, Down, vec![2]);

    // Act
    let assigned = dispatcher.test_assign(request(6, 9));

    // Assert
    assert_eq!(assigned, Some(0));
    assert_eq!(dispatcher.cars()[0].stops(), &[2, 6, 9]);
}

#[test]
fn test_dispatcher_cost_picks_cheapest_car() {
    // Arrange
    let (mut dispatcher, _status_rx) = setup_dispatcher(2);
    dispatcher.test_cars_mut()[0].test_place(9, Down, vec![1]);
    dispatcher.test_cars_mut()[1].test_place(5, Down, vec![2]);
    let request = request(6, 9);

    // Assert
    assert_eq!(dispatcher.cars()[0].cost(&request), 22);
    assert_eq!(dispatcher.cars()[1].cost(&request), 12);
    assert_eq!(dispatcher.test_assign(request), Some(1));
}

#[test]
fn test_dispatcher_drains_one_request_per_tick() {
    // Arrange
    let (mut dispatcher, _status_rx) = setup_dispatcher(1);
    dispatcher.enqueue(request(2, 4));
    dispatcher.enqueue(request(5, 7));
    dispatcher.enqueue(request(9, 3));

    // Act & Assert
    dispatcher.tick();
    assert_eq!(dispatcher.pending(), 2);
    assert_eq!(dispatcher.cars()[0].stops(), &[2, 4]);

    // The second request lies beyond stop 4, but the only car still takes it.
    // The car then reaches floor 2 in the same tick.
    dispatcher.tick();
    assert_eq!(dispatcher.pending(), 1);
    assert_eq!(dispatcher.cars()[0].floor(), 2);
    assert_eq!(dispatcher.cars()[0].stops(), &[4, 5, 7]);
}

#[test]
fn test_dispatcher_empty_tick_is_noop() {
    // Arrange
    let (mut dispatcher, status_rx) = setup_dispatcher(2);
    let before: Vec<CarStatus> = dispatcher.cars().iter().map(|car| car.status()).collect();

    // Act
    for _ in 0..5 {
        dispatcher.tick();
    }

    // Assert
    let after: Vec<CarStatus> = dispatcher.cars().iter().map(|car| car.status()).collect();
    assert_eq!(before, after);
    assert!(status_rx.try_recv().is_err());
}

#[test]
fn test_dispatcher_emits_status_after_step() {
    // Arrange
    let (mut dispatcher, status_rx) = setup_dispatcher(2);
    dispatcher.enqueue(request(3, 8));

    // Act
    dispatcher.tick();

    // Assert: only the car that stepped reports
    assert_eq!(
        status_rx.try_recv().unwrap(),
        CarStatus {
            id: 0,
            floor: 1,
            direction: Up,
            stops: vec![3, 8],
        }
    );
    assert!(status_rx.try_recv().is_err());
}

#[test]
fn test_dispatcher_without_status_sink() {
    // Arrange
    let config = DispatcherConfig {
        n_floors: N_FLOORS,
        n_cars: 1,
        tick_interval_ms: 1,
    };
    let mut dispatcher = Dispatcher::new(&config, None);
    dispatcher.enqueue(request(2, 3));

    // Act
    for _ in 0..3 {
        dispatcher.tick();
    }

    // Assert
    assert!(dispatcher.cars()[0].is_idle());
    assert_eq!(dispatcher.cars()[0].floor(), 3);
}

#[test]
fn test_dispatcher_accepts_requests_from_other_threads() {
    // Arrange
    let (mut dispatcher, _status_rx) = setup_dispatcher(2);
    let request_tx = dispatcher.request_sender();

    // Act
    let producer = Builder::new()
        .name("producer".into())
        .spawn(move || {
            request_tx.send(request(4, 2)).unwrap();
            request_tx.send(request(6, 10)).unwrap();
        })
        .unwrap();
    producer.join().unwrap();

    dispatcher.tick();
    dispatcher.tick();

    // Assert
    assert_eq!(dispatcher.pending(), 0);
    let assigned: usize = dispatcher.cars().iter().map(|car| car.stops().len()).sum();
    assert!(assigned >= 3);
}

#[test]
fn test_dispatcher_run_until_terminated() {
    // Arrange
    let (dispatcher, status_rx) = setup_dispatcher(2);
    dispatcher.enqueue(request(3, 8));
    let (tick_tx, tick_rx) = bounded::<Instant>(0);
    let (terminate_tx, terminate_rx) = bounded::<()>(0);

    let dispatcher_thread = Builder::new()
        .name("dispatcher".into())
        .spawn(move || dispatcher.run(tick_rx, terminate_rx))
        .unwrap();

    // Act
    for _ in 0..3 {
        tick_tx.send(Instant::now()).unwrap();
    }
    terminate_tx.send(()).unwrap();
    let dispatcher = dispatcher_thread.join().unwrap();

    // Assert
    assert_eq!(dispatcher.cars()[0].floor(), 3);
    assert_eq!(dispatcher.cars()[0].stops(), &[8]);
    assert_eq!(status_rx.try_iter().count(), 3);
}

#[test]
fn test_dispatcher_serves_everything() {
    // Arrange
    let (mut dispatcher, status_rx) = setup_dispatcher(3);
    let trips = [(1, 10), (10, 1), (4, 6), (7, 2), (3, 9), (9, 8), (2, 5), (6, 4)];
    for (pickup, dropoff) in trips {
        dispatcher.enqueue(request(pickup, dropoff));
    }

    // Act
    let mut ticks = 0;
    while dispatcher.pending() > 0 || dispatcher.cars().iter().any(|car| !car.is_idle()) {
        dispatcher.tick();
        ticks += 1;
        assert!(ticks < 200, "fleet did not settle");

        for car in dispatcher.cars() {
            assert_eq!(car.direction() == Stop, car.is_idle());
        }
    }

    // Assert
    assert!(dispatcher.cars().iter().all(|car| car.direction() == Stop));
    assert!(status_rx.try_iter().count() > 0);
}
