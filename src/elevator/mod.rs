pub mod car;

pub use car::ElevatorCar;
