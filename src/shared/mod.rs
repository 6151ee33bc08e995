pub mod macros;
pub mod request;
pub mod structs;

pub use request::Request;
pub use request::RequestError;
pub use structs::CarStatus;
pub use structs::Direction;
