use super::config::{PeakScenarioUpdate, SimulationConfig};
use super::dispatcher;
use super::elevator::Elevator;
use super::errors::CommandError;
use super::event_scheduler::{EventScheduler, SimulationEvent};
use super::floor_registry::FloorRegistry;
use super::metrics::{Metrics, MetricsRecord};
use super::request_ledger::{Request, RequestLedger, RequestStatus};
use super::status::{FullState, SystemStatus};
use super::types::{CallDirection, ElevatorId, FloorIndex, Tick};
use super::workload::WorkloadGenerator;
use log::{debug, info};
use uuid::Uuid;

/// Observer trait for simulation progress
pub trait SimulationObserver {
    /// Called after every tick driven by [`SimulationEngine::step`]
    fn on_tick(&mut self, tick: Tick, status: &SystemStatus);
}

/// Owner of all elevator, floor, request and metrics state
///
/// Every mutation goes through `&mut self`, so intake, ticks and deferred
/// door closes never interleave.
pub struct SimulationEngine {
    config: SimulationConfig,
    elevators: Vec<Elevator>,
    floors: FloorRegistry,
    requests: RequestLedger,
    metrics: Metrics,
    scheduler: EventScheduler,
    workload: WorkloadGenerator,
    current_tick: Tick,
    observers: Vec<Box<dyn SimulationObserver>>,
}

impl SimulationEngine {
    /// Build and initialize a system from a validated configuration
    pub fn new(config: SimulationConfig) -> Result<Self, CommandError> {
        config.validate()?;

        let mut engine = Self {
            elevators: Vec::new(),
            floors: FloorRegistry::new(config.total_floors),
            requests: RequestLedger::new(),
            metrics: Metrics::with_window(config.metrics_window),
            scheduler: EventScheduler::new(),
            workload: WorkloadGenerator::new(&config),
            current_tick: 0,
            observers: Vec::new(),
            config,
        };
        engine.initialize_system();

        info!(
            "[Engine] {} floors, {} elevators, request frequency {}",
            engine.config.total_floors, engine.config.elevator_count, engine.config.request_frequency
        );
        Ok(engine)
    }

    /// Replace the configuration and rebuild the system from scratch
    pub fn reconfigure(&mut self, config: SimulationConfig) -> Result<(), CommandError> {
        let mut rebuilt = Self::new(config)?;
        rebuilt.observers = std::mem::take(&mut self.observers);
        *self = rebuilt;
        Ok(())
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    /// Park every car empty at floor 0 and clear queues, requests and metrics
    pub fn initialize_system(&mut self) {
        self.elevators = (0..self.config.elevator_count)
            .map(|id| Elevator::new(id, self.config.elevator_capacity))
            .collect();
        self.floors.reset(self.config.total_floors);
        self.requests.clear();
        self.metrics = Metrics::with_window(self.config.metrics_window);
        self.metrics.peak_mode = self.config.peak.active;
        self.scheduler.clear();
        self.workload.restart_budget();
        debug!("[Engine] system initialized at tick {}", self.current_tick);
    }

    /// A passenger group calls a car from `floor`
    pub fn add_external_request(
        &mut self,
        floor: FloorIndex,
        direction: CallDirection,
        passengers: u32,
    ) -> Uuid {
        self.floors.enqueue(floor, direction, passengers);
        let request = Request::external(floor, direction, passengers, self.current_tick);
        self.intake(request)
    }

    /// Riders aboard ask to get off at `floor`
    pub fn add_internal_request(&mut self, floor: FloorIndex, passengers: u32) -> Uuid {
        let request = Request::internal(floor, passengers, self.current_tick);
        self.intake(request)
    }

    fn intake(&mut self, request: Request) -> Uuid {
        let id = request.id;
        let index = self.requests.append(request);
        self.dispatch(index);
        id
    }

    fn dispatch(&mut self, index: usize) {
        let parking_floor = self.parking_floor();
        let Some(request) = self.requests.get(index) else {
            return;
        };
        match dispatcher::assign(&mut self.elevators, request, parking_floor) {
            Some(elevator_id) => {
                self.requests
                    .mark_processing(index, elevator_id, self.current_tick);
            }
            None => debug!("[Engine] no elevator available, request stays waiting"),
        }
    }

    /// Floor idle cars drift to while the peak scenario is active
    fn parking_floor(&self) -> Option<FloorIndex> {
        self.config
            .peak
            .active
            .then_some(self.config.peak.lobby_floor)
    }

    /// Advance the clock by one tick
    ///
    /// Due door closes fire first. Each car with closed doors and a stop
    /// left then moves one floor, or opens its doors when it is at (or has
    /// just reached) its next stop.
    pub fn update_elevators(&mut self) {
        self.current_tick += 1;

        for event in self.scheduler.take_due_events(self.current_tick) {
            match event {
                SimulationEvent::DoorClose { elevator_id } => self.close_doors(elevator_id),
            }
        }

        for index in 0..self.elevators.len() {
            let elevator = &mut self.elevators[index];
            if elevator.doors_open() {
                continue;
            }
            let Some(next_stop) = elevator.next_stop() else {
                continue;
            };
            if elevator.current_floor != next_stop {
                elevator.step();
                debug!(
                    "[Elevator {}] moving {} to floor {}",
                    elevator.id, elevator.direction, elevator.current_floor
                );
                if elevator.current_floor != next_stop {
                    continue;
                }
            }
            self.handle_arrival(index);
        }
    }

    fn handle_arrival(&mut self, index: usize) {
        let now = self.current_tick;
        let elevator = &mut self.elevators[index];
        let floor = elevator.current_floor;

        let exiting = elevator.alight();
        let waiting = self.floors.pickup_queue(floor, elevator.direction);
        let entering = elevator.board(waiting);
        self.floors.board(floor, elevator.direction, entering);
        elevator.open_doors();

        info!(
            "[Elevator {}] arrived at floor {}: {} out, {} in, {} aboard",
            elevator.id, floor, exiting, entering, elevator.passengers
        );

        let elevator_id = elevator.id;
        let utilization = elevator.load_factor();
        if let Some(request) = self.requests.complete_oldest(elevator_id, floor, now) {
            self.metrics.record_completion(
                request.wait_time().unwrap_or(0),
                request.travel_time().unwrap_or(0),
                utilization,
            );
        }

        self.scheduler.schedule_event(
            SimulationEvent::DoorClose { elevator_id },
            now,
            self.config.door_open_ticks,
        );
    }

    fn close_doors(&mut self, elevator_id: ElevatorId) {
        let parking_floor = self.parking_floor();
        if let Some(elevator) = self.elevators.get_mut(elevator_id) {
            elevator.close_doors();
            elevator.recompute_path(parking_floor);
            debug!(
                "[Elevator {}] doors closed, next stops {:?}",
                elevator.id, elevator.destinations
            );
        }
    }

    /// Run one workload cycle, feeding any generated trip through intake
    pub fn generate_workload(&mut self) {
        let trip = self
            .workload
            .on_cycle(&self.config.peak, self.config.total_floors);
        if let Some(trip) = trip {
            self.add_external_request(trip.floor, trip.direction, trip.passengers);
            self.add_internal_request(trip.destination, trip.passengers);
        }
    }

    /// One full simulation step: workload, then movement, then observers
    pub fn step(&mut self) {
        self.generate_workload();
        self.update_elevators();

        if !self.observers.is_empty() {
            let status = self.system_status();
            for observer in &mut self.observers {
                observer.on_tick(self.current_tick, &status);
            }
        }
    }

    /// Drive the simulation for `ticks` steps, returns the final tick
    pub fn run(&mut self, ticks: u64) -> Tick {
        for _ in 0..ticks {
            self.step();
        }
        self.current_tick
    }

    /// Flip the workload generator, returning whether it is now on
    pub fn toggle_auto_generation(&mut self) -> bool {
        self.workload.toggle()
    }

    /// Merge a peak scenario update and steer idle cars toward the lobby
    pub fn set_peak_scenario(&mut self, update: PeakScenarioUpdate) {
        self.config.peak.merge(&update);
        self.metrics.peak_mode = self.config.peak.active;
        info!(
            "[Engine] peak scenario {} (lobby {}, {}, {:.0}%)",
            if self.config.peak.active { "on" } else { "off" },
            self.config.peak.lobby_floor,
            self.config.peak.direction,
            self.config.peak.request_percentage * 100.0
        );

        if !self.config.peak.active {
            return;
        }
        let lobby = self.config.peak.lobby_floor;
        for elevator in &mut self.elevators {
            if elevator.is_idle() && !elevator.destinations.contains(&lobby) {
                elevator.add_stop(lobby);
                elevator.recompute_path(Some(lobby));
            }
        }
    }

    pub fn system_status(&self) -> SystemStatus {
        SystemStatus {
            tick: self.current_tick,
            elevators: self.elevators.clone(),
            floors: self.floors.floors().to_vec(),
            metrics: self.metrics.clone(),
            is_auto_generating: self.workload.is_active(),
        }
    }

    pub fn full_state(&self) -> FullState {
        FullState {
            status: self.system_status(),
            requests: self.requests.requests().to_vec(),
        }
    }

    /// Summarize the current metrics window for a history store
    pub fn metrics_record(&self) -> MetricsRecord {
        self.metrics.summarize(
            self.current_tick,
            self.requests.count_with_status(RequestStatus::Completed),
        )
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn floors(&self) -> &FloorRegistry {
        &self.floors
    }

    pub fn requests(&self) -> &[Request] {
        self.requests.requests()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn is_auto_generating(&self) -> bool {
        self.workload.is_active()
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn pending_door_closes(&self) -> usize {
        self.scheduler.pending_count()
    }
}
