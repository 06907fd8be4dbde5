use elevsim::{SimulationConfig, SimulationEngine, SimulationObserver, SystemStatus, Tick};
use log::info;
use std::fs;

const DEFAULT_TICKS: u64 = 120;

/// Logs a one-line fleet summary every `every` ticks
struct FleetLogger {
    every: Tick,
}

impl SimulationObserver for FleetLogger {
    fn on_tick(&mut self, tick: Tick, status: &SystemStatus) {
        if tick % self.every != 0 {
            return;
        }
        let waiting: u32 = status
            .floors
            .iter()
            .map(|floor| floor.up_queue + floor.down_queue)
            .sum();
        let cars: Vec<String> = status
            .elevators
            .iter()
            .map(|car| format!("#{}@{}{}", car.id, car.current_floor, car.direction))
            .collect();
        info!(
            "[Tick {}] waiting={} wait_samples={} cars=[{}]",
            tick,
            waiting,
            status.metrics.wait_times.len(),
            cars.join(" ")
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    // Usage: elevsim [config.json] [ticks]
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => serde_json::from_str::<SimulationConfig>(&fs::read_to_string(path)?)?,
        None => SimulationConfig::default(),
    };
    let ticks = match args.next() {
        Some(ticks) => ticks.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };

    println!("Starting elevator simulation");
    println!(
        "  Building: {} floors, {} elevators (capacity {})",
        config.total_floors, config.elevator_count, config.elevator_capacity
    );
    println!(
        "  Workload: frequency={}, peak={}",
        config.request_frequency, config.peak.active
    );

    let mut engine = SimulationEngine::new(config)?;
    engine.add_observer(Box::new(FleetLogger { every: 10 }));
    let final_tick = engine.run(ticks);

    println!("Simulation finished at tick {}", final_tick);
    println!("{}", serde_json::to_string_pretty(&engine.metrics_record())?);
    Ok(())
}
