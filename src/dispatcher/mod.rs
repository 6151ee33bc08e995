pub mod dispatcher;
#[cfg(test)]
mod dispatcher_tests;

pub use dispatcher::Dispatcher;
