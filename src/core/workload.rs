use super::config::{PeakConfig, SimulationConfig};
use super::types::{CallDirection, FloorIndex};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One synthetic passenger group: a hall call plus where they are headed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedTrip {
    pub floor: FloorIndex,
    pub direction: CallDirection,
    pub passengers: u32,
    pub destination: FloorIndex,
}

/// Synthetic request source driven once per simulation cycle
///
/// Halts by itself after `cycle_limit` cycles; toggling it back on grants
/// a fresh budget.
#[derive(Debug)]
pub struct WorkloadGenerator {
    active: bool,
    cycle_count: u32,
    cycle_limit: u32,
    frequency: f64,
    rng: StdRng,
}

impl WorkloadGenerator {
    pub fn new(config: &SimulationConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            active: config.auto_generate,
            cycle_count: 0,
            cycle_limit: config.generation_cycle_limit,
            frequency: config.request_frequency.clamp(0.0, 1.0),
            rng,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn cycles_run(&self) -> u32 {
        self.cycle_count
    }

    /// Flip generation on or off, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        if self.active {
            self.cycle_count = 0;
        }
        info!(
            "[Workload] auto-generation {}",
            if self.active { "resumed" } else { "paused" }
        );
        self.active
    }

    pub fn restart_budget(&mut self) {
        self.cycle_count = 0;
    }

    /// Run one generation cycle, possibly producing a trip
    pub fn on_cycle(&mut self, peak: &PeakConfig, total_floors: usize) -> Option<GeneratedTrip> {
        if !self.active {
            return None;
        }
        if self.cycle_count >= self.cycle_limit {
            self.active = false;
            info!(
                "[Workload] auto-generation stopped after {} cycles",
                self.cycle_count
            );
            return None;
        }
        self.cycle_count += 1;

        if total_floors < 2 || !self.rng.gen_bool(self.frequency) {
            return None;
        }

        let (floor, direction, passengers) = self.generate_call(peak, total_floors);
        let destination = self.generate_destination(peak, floor, direction, total_floors);
        debug!(
            "[Workload] {} passenger(s) at floor {} going {} to floor {}",
            passengers, floor, direction, destination
        );
        Some(GeneratedTrip {
            floor,
            direction,
            passengers,
            destination,
        })
    }

    fn generate_call(
        &mut self,
        peak: &PeakConfig,
        total_floors: usize,
    ) -> (FloorIndex, CallDirection, u32) {
        if peak.active && self.rng.gen_bool(peak.request_percentage.clamp(0.0, 1.0)) {
            let passengers = self.rng.gen_range(2..=5);
            return (peak.lobby_floor, peak.direction, passengers);
        }

        let top = total_floors - 1;
        let floor = self.rng.gen_range(0..total_floors);
        let direction = if floor == 0 {
            CallDirection::Up
        } else if floor == top {
            CallDirection::Down
        } else if self.rng.gen_bool(0.5) {
            CallDirection::Up
        } else {
            CallDirection::Down
        };
        let passengers = self.rng.gen_range(1..=3);
        (floor, direction, passengers)
    }

    /// Pick a floor consistent with the travel direction
    ///
    /// In peak mode everyone rides to the far end of the building.
    fn generate_destination(
        &mut self,
        peak: &PeakConfig,
        origin: FloorIndex,
        direction: CallDirection,
        total_floors: usize,
    ) -> FloorIndex {
        let top = total_floors - 1;
        if peak.active {
            return match direction {
                CallDirection::Up => top,
                CallDirection::Down => 0,
            };
        }
        match direction {
            CallDirection::Up if origin < top => self.rng.gen_range(origin + 1..=top),
            CallDirection::Down if origin > 0 => self.rng.gen_range(0..origin),
            _ => origin,
        }
    }
}
