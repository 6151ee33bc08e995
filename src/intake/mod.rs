pub mod intake;

pub use intake::Intake;
pub use intake::IntakeError;
