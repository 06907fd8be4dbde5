use super::types::{Direction, DoorState, ElevatorId, FloorIndex};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One elevator car
///
/// `internal_requests` is the source of truth for how many riders leave at
/// each floor; `destinations` is the ordered stop list derived from it and
/// from assigned pickups by [`Elevator::recompute_path`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elevator {
    pub id: ElevatorId,
    pub current_floor: FloorIndex,
    pub destinations: Vec<FloorIndex>,
    pub direction: Direction,
    pub door_state: DoorState,
    pub passengers: u32,
    pub capacity: u32,
    pub internal_requests: BTreeMap<FloorIndex, u32>,
}

impl Elevator {
    /// A car parked at floor 0 with closed doors and nothing to do
    pub fn new(id: ElevatorId, capacity: u32) -> Self {
        Self {
            id,
            current_floor: 0,
            destinations: Vec::new(),
            direction: Direction::Idle,
            door_state: DoorState::Closed,
            passengers: 0,
            capacity,
            internal_requests: BTreeMap::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.direction == Direction::Idle
    }

    pub fn doors_open(&self) -> bool {
        self.door_state == DoorState::Open
    }

    pub fn next_stop(&self) -> Option<FloorIndex> {
        self.destinations.first().copied()
    }

    pub fn available_space(&self) -> u32 {
        self.capacity.saturating_sub(self.passengers)
    }

    /// Fraction of capacity in use, in `[0, 1]`
    pub fn load_factor(&self) -> f64 {
        self.passengers as f64 / self.capacity as f64
    }

    /// Queue a stop; duplicates are folded on the next path recomputation
    pub fn add_stop(&mut self, floor: FloorIndex) {
        self.destinations.push(floor);
    }

    /// Record riders that want to leave at `floor`
    pub fn add_alighting(&mut self, floor: FloorIndex, passengers: u32) {
        *self.internal_requests.entry(floor).or_insert(0) += passengers;
    }

    /// Let out everyone bound for the current floor, returning how many left
    pub fn alight(&mut self) -> u32 {
        let exiting = self
            .internal_requests
            .remove(&self.current_floor)
            .unwrap_or(0);
        let leaving = exiting.min(self.passengers);
        self.passengers -= leaving;
        leaving
    }

    /// Take on up to `waiting` passengers, returning how many boarded
    pub fn board(&mut self, waiting: u32) -> u32 {
        let entering = waiting.min(self.available_space());
        self.passengers += entering;
        entering
    }

    /// Open the doors at the current floor and drop it from the stop list
    pub fn open_doors(&mut self) {
        let floor = self.current_floor;
        self.destinations.retain(|&stop| stop != floor);
        self.door_state = DoorState::Open;
    }

    pub fn close_doors(&mut self) {
        self.door_state = DoorState::Closed;
    }

    /// Move one floor in the current direction
    pub fn step(&mut self) {
        match self.direction {
            Direction::Up => self.current_floor += 1,
            Direction::Down => self.current_floor = self.current_floor.saturating_sub(1),
            Direction::Idle => {}
        }
    }

    /// Rebuild the stop list from pending stops and alighting floors
    ///
    /// Stops are deduplicated and sorted ascending when travelling up,
    /// descending otherwise. When `parking_floor` is given and nothing is
    /// left to do, the car is sent there. The direction then follows the
    /// first stop; a first stop on the current floor leaves the car idle.
    pub fn recompute_path(&mut self, parking_floor: Option<FloorIndex>) {
        let stops: BTreeSet<FloorIndex> = self
            .destinations
            .iter()
            .copied()
            .chain(self.internal_requests.keys().copied())
            .collect();

        let mut destinations: Vec<FloorIndex> = if self.direction == Direction::Up {
            stops.into_iter().collect()
        } else {
            stops.into_iter().rev().collect()
        };

        if destinations.is_empty() {
            if let Some(floor) = parking_floor {
                destinations.push(floor);
            }
        }

        self.direction = match destinations.first() {
            None => Direction::Idle,
            Some(&next) if next > self.current_floor => Direction::Up,
            Some(&next) if next < self.current_floor => Direction::Down,
            Some(_) => Direction::Idle,
        };
        self.destinations = destinations;

        trace!(
            "[Elevator {}] path at floor {}: {:?} ({})",
            self.id,
            self.current_floor,
            self.destinations,
            self.direction
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_at(floor: FloorIndex) -> Elevator {
        let mut car = Elevator::new(0, 8);
        car.current_floor = floor;
        car
    }

    #[test]
    fn test_recompute_merges_and_dedups() {
        let mut car = car_at(0);
        car.add_stop(5);
        car.add_stop(3);
        car.add_stop(5);
        car.add_alighting(3, 1);
        car.add_alighting(7, 2);
        car.direction = Direction::Up;

        car.recompute_path(None);

        assert_eq!(car.destinations, vec![3, 5, 7]);
        assert_eq!(car.direction, Direction::Up);
    }

    #[test]
    fn test_recompute_sorts_descending_when_not_up() {
        let mut car = car_at(9);
        car.add_stop(2);
        car.add_stop(6);

        car.recompute_path(None);

        assert_eq!(car.destinations, vec![6, 2]);
        assert_eq!(car.direction, Direction::Down);
    }

    #[test]
    fn test_recompute_empty_goes_idle_or_parks() {
        let mut car = car_at(4);
        car.direction = Direction::Down;
        car.recompute_path(None);
        assert!(car.destinations.is_empty());
        assert_eq!(car.direction, Direction::Idle);

        car.recompute_path(Some(0));
        assert_eq!(car.destinations, vec![0]);
        assert_eq!(car.direction, Direction::Down);
    }

    #[test]
    fn test_stop_on_current_floor_is_idle() {
        let mut car = car_at(2);
        car.add_stop(2);
        car.recompute_path(None);
        assert_eq!(car.destinations, vec![2]);
        assert_eq!(car.direction, Direction::Idle);
    }

    #[test]
    fn test_alight_and_board_respect_bounds() {
        let mut car = car_at(3);
        car.passengers = 2;
        car.add_alighting(3, 5);

        assert_eq!(car.alight(), 2);
        assert_eq!(car.passengers, 0);
        assert!(car.internal_requests.is_empty());

        assert_eq!(car.board(12), 8);
        assert_eq!(car.passengers, 8);
        assert_eq!(car.board(3), 0);
    }

    #[test]
    fn test_open_doors_clears_current_stop() {
        let mut car = car_at(4);
        car.destinations = vec![4, 6];
        car.open_doors();
        assert_eq!(car.destinations, vec![6]);
        assert!(car.doors_open());
    }

    #[test]
    fn test_snapshot_field_names() {
        let mut car = car_at(1);
        car.add_alighting(6, 2);
        let json = serde_json::to_value(&car).unwrap();
        assert_eq!(json["currentFloor"], 1);
        assert_eq!(json["doorState"], "closed");
        assert_eq!(json["internalRequests"]["6"], 2);
    }
}
