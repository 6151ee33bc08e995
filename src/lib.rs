/***************************************/
/*              Modules                */
/***************************************/
pub mod config;
pub mod dispatcher;
pub mod elevator;
pub mod intake;
pub mod shared;

pub use dispatcher::Dispatcher;
pub use elevator::ElevatorCar;
pub use intake::Intake;
pub use shared::{CarStatus, Direction, Request, RequestError};
