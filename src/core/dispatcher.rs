use super::elevator::Elevator;
use super::request_ledger::{Request, RequestKind};
use super::types::{Direction, ElevatorId, FloorIndex};
use log::{debug, info};

/// Bonus for a car already travelling in the requested direction
pub const SAME_DIRECTION_BONUS: f64 = -50.0;
/// Penalty for a car travelling against the requested direction
pub const OPPOSITE_DIRECTION_PENALTY: f64 = 1000.0;
/// Weight of a full car's load in the score
pub const CAPACITY_WEIGHT: f64 = 100.0;

/// Floors a car has to cover to reach `floor`
pub fn approach_distance(elevator: &Elevator, floor: FloorIndex) -> f64 {
    let current = elevator.current_floor;
    match elevator.direction {
        Direction::Up if floor > current => (floor - current) as f64,
        Direction::Down if floor < current => (current - floor) as f64,
        _ => current.abs_diff(floor) as f64,
    }
}

pub fn direction_score(elevator: &Elevator, request: &Request) -> f64 {
    if elevator.is_idle() {
        return 0.0;
    }
    match request.direction {
        Some(wanted) if Direction::from(wanted) == elevator.direction => SAME_DIRECTION_BONUS,
        Some(_) => OPPOSITE_DIRECTION_PENALTY,
        None => 0.0,
    }
}

pub fn capacity_score(elevator: &Elevator) -> f64 {
    elevator.load_factor() * CAPACITY_WEIGHT
}

/// Cost of serving `request` with `elevator`; lower is better
pub fn score(elevator: &Elevator, request: &Request) -> f64 {
    approach_distance(elevator, request.floor)
        + direction_score(elevator, request)
        + capacity_score(elevator)
}

/// Index of the cheapest car, the first one winning ties
pub fn select_elevator(elevators: &[Elevator], request: &Request) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, elevator) in elevators.iter().enumerate() {
        let cost = score(elevator, request);
        debug!(
            "[Dispatcher] car {} scores {:.2} for floor {}",
            elevator.id, cost, request.floor
        );
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((index, cost)),
        }
    }
    best.map(|(index, _)| index)
}

/// Hand `request` to the best car and rebuild that car's path
///
/// Returns the id of the chosen car, or `None` for an empty fleet.
pub fn assign(
    elevators: &mut [Elevator],
    request: &Request,
    parking_floor: Option<FloorIndex>,
) -> Option<ElevatorId> {
    let index = select_elevator(elevators, request)?;
    let elevator = &mut elevators[index];

    elevator.add_stop(request.floor);
    if request.kind == RequestKind::Internal {
        elevator.add_alighting(request.floor, request.passengers.unwrap_or(1));
    }
    elevator.recompute_path(parking_floor);

    info!(
        "[Dispatcher] {:?} request for floor {} assigned to car {} (path {:?})",
        request.kind, request.floor, elevator.id, elevator.destinations
    );
    Some(elevator.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CallDirection;

    fn car(id: ElevatorId, floor: FloorIndex, direction: Direction) -> Elevator {
        let mut elevator = Elevator::new(id, 8);
        elevator.current_floor = floor;
        elevator.direction = direction;
        elevator
    }

    #[test]
    fn test_idle_beats_opposite_direction() {
        let elevators = vec![car(0, 3, Direction::Idle), car(1, 3, Direction::Down)];
        let request = Request::external(5, CallDirection::Up, 1, 0);

        assert_eq!(score(&elevators[0], &request), 2.0);
        assert_eq!(score(&elevators[1], &request), 1002.0);
        assert_eq!(select_elevator(&elevators, &request), Some(0));

        let reversed = vec![car(0, 3, Direction::Down), car(1, 3, Direction::Idle)];
        assert_eq!(select_elevator(&reversed, &request), Some(1));
    }

    #[test]
    fn test_same_direction_bonus() {
        let moving = car(0, 1, Direction::Up);
        let request = Request::external(6, CallDirection::Up, 1, 0);
        assert_eq!(score(&moving, &request), 5.0 - 50.0);
    }

    #[test]
    fn test_capacity_penalty() {
        let mut loaded = car(0, 0, Direction::Idle);
        loaded.passengers = 4;
        let request = Request::external(2, CallDirection::Up, 1, 0);
        assert_eq!(score(&loaded, &request), 2.0 + 50.0);
    }

    #[test]
    fn test_internal_request_has_no_direction_term() {
        let moving = car(0, 6, Direction::Down);
        let request = Request::internal(2, 1, 0);
        assert_eq!(direction_score(&moving, &request), 0.0);
        assert_eq!(score(&moving, &request), 4.0);
    }

    #[test]
    fn test_ties_go_to_lowest_id() {
        let elevators = vec![car(0, 2, Direction::Idle), car(1, 2, Direction::Idle)];
        let request = Request::external(4, CallDirection::Down, 1, 0);
        assert_eq!(select_elevator(&elevators, &request), Some(0));
    }

    #[test]
    fn test_empty_fleet_assigns_nothing() {
        let request = Request::external(4, CallDirection::Down, 1, 0);
        assert_eq!(assign(&mut [], &request, None), None);
    }

    #[test]
    fn test_assign_internal_records_alighting() {
        let mut elevators = vec![car(0, 0, Direction::Idle)];
        let request = Request::internal(7, 3, 0);

        assert_eq!(assign(&mut elevators, &request, None), Some(0));
        assert_eq!(elevators[0].internal_requests.get(&7), Some(&3));
        assert_eq!(elevators[0].destinations, vec![7]);
        assert_eq!(elevators[0].direction, Direction::Up);
    }
}
