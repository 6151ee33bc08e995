/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::{debug, info};
use std::io;
use std::thread::Builder;
use std::time::Duration;

/* Custom libraries */
use elevator_dispatch::config::{self, Args};
use elevator_dispatch::unwrap_or_exit;
use elevator_dispatch::{CarStatus, Dispatcher, Intake};

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load the configuration
    let args = Args::parse();
    let config = unwrap_or_exit!(config::load_config(&args), "Failed to load configuration");
    info!(
        "Simulating {} elevators in a building with {} floors",
        config.dispatcher.n_cars, config.dispatcher.n_floors
    );

    // Initialize channels
    let (status_tx, status_rx) = cbc::unbounded::<CarStatus>();
    let (_terminate_tx, terminate_rx) = cbc::unbounded::<()>();
    let tick_rx = cbc::tick(Duration::from_millis(config.dispatcher.tick_interval_ms));

    // Start the monitor
    let monitor_thread = Builder::new().name("monitor".into());
    unwrap_or_exit!(
        monitor_thread.spawn(move || monitor(status_rx)),
        "Failed to start monitor thread"
    );

    // Start the dispatcher
    let dispatcher = Dispatcher::new(&config.dispatcher, Some(status_tx));
    let intake = Intake::new(
        &config.intake,
        config.dispatcher.n_floors,
        dispatcher.request_sender(),
    );

    let dispatcher_thread = Builder::new().name("dispatcher".into());
    let dispatcher_handle = unwrap_or_exit!(
        dispatcher_thread.spawn(move || dispatcher.run(tick_rx, terminate_rx)),
        "Failed to start dispatcher thread"
    );

    // Read requests until stdin closes, the cars keep moving afterwards
    match intake.run(io::stdin().lock(), io::stdout()) {
        Ok(accepted) => info!("Input closed after {} requests", accepted),
        Err(e) => log::error!("Intake stopped: {}", e),
    }

    if dispatcher_handle.join().is_err() {
        log::error!("Dispatcher thread panicked");
        std::process::exit(1);
    }
}

fn monitor(status_rx: cbc::Receiver<CarStatus>) {
    for status in status_rx.iter() {
        info!("{} moved to floor {}", status, status.floor);
        match serde_json::to_string(&status) {
            Ok(json) => debug!("{}", json),
            Err(e) => debug!("Failed to serialize status: {}", e),
        }
    }
}
