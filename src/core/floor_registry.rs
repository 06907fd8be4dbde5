use super::types::{CallDirection, Direction, FloorIndex};
use serde::{Deserialize, Serialize};

/// Waiting-passenger counts at one floor, split by requested direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub up_queue: u32,
    pub down_queue: u32,
}

impl Floor {
    /// Queue a car travelling in `direction` serves; an idle car takes
    /// the down queue whenever anyone is waiting there
    fn served_queue(&self, direction: Direction) -> CallDirection {
        match direction {
            Direction::Up => CallDirection::Up,
            Direction::Down => CallDirection::Down,
            Direction::Idle if self.down_queue > 0 => CallDirection::Down,
            Direction::Idle => CallDirection::Up,
        }
    }

    fn queue(&self, direction: CallDirection) -> u32 {
        match direction {
            CallDirection::Up => self.up_queue,
            CallDirection::Down => self.down_queue,
        }
    }

    fn queue_mut(&mut self, direction: CallDirection) -> &mut u32 {
        match direction {
            CallDirection::Up => &mut self.up_queue,
            CallDirection::Down => &mut self.down_queue,
        }
    }
}

/// Owner of every floor's waiting queues
///
/// Queues only change through `enqueue` and `board`, which keeps the
/// counts non-negative regardless of who drives them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloorRegistry {
    floors: Vec<Floor>,
}

impl FloorRegistry {
    pub fn new(total_floors: usize) -> Self {
        Self {
            floors: vec![Floor::default(); total_floors],
        }
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn floor(&self, floor: FloorIndex) -> &Floor {
        &self.floors[floor]
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    /// Add `passengers` to the queue waiting at `floor` for `direction`
    pub fn enqueue(&mut self, floor: FloorIndex, direction: CallDirection, passengers: u32) {
        let queue = self.floors[floor].queue_mut(direction);
        *queue = queue.saturating_add(passengers);
    }

    /// Passengers a car travelling in `direction` could pick up at `floor`
    pub fn pickup_queue(&self, floor: FloorIndex, direction: Direction) -> u32 {
        let floor = &self.floors[floor];
        floor.queue(floor.served_queue(direction))
    }

    /// Remove `entering` boarded passengers from the queue `pickup_queue` read
    pub fn board(&mut self, floor: FloorIndex, direction: Direction, entering: u32) {
        let floor = &mut self.floors[floor];
        let queue = floor.queue_mut(floor.served_queue(direction));
        *queue = queue.saturating_sub(entering);
    }

    pub fn total_waiting(&self) -> u32 {
        self.floors
            .iter()
            .map(|floor| floor.up_queue + floor.down_queue)
            .sum()
    }

    pub fn reset(&mut self, total_floors: usize) {
        self.floors = vec![Floor::default(); total_floors];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_and_pickup_queue() {
        let mut registry = FloorRegistry::new(4);
        registry.enqueue(2, CallDirection::Up, 3);
        registry.enqueue(2, CallDirection::Down, 5);

        assert_eq!(registry.pickup_queue(2, Direction::Up), 3);
        assert_eq!(registry.pickup_queue(2, Direction::Down), 5);
        assert_eq!(registry.pickup_queue(2, Direction::Idle), 5);
        assert_eq!(registry.total_waiting(), 8);
    }

    #[test]
    fn test_idle_pickup_reads_the_queue_it_drains() {
        let mut registry = FloorRegistry::new(3);
        registry.enqueue(1, CallDirection::Down, 2);
        registry.enqueue(1, CallDirection::Up, 5);

        let waiting = registry.pickup_queue(1, Direction::Idle);
        assert_eq!(waiting, 2);
        registry.board(1, Direction::Idle, waiting);
        assert_eq!(*registry.floor(1), Floor { up_queue: 5, down_queue: 0 });

        assert_eq!(registry.pickup_queue(1, Direction::Idle), 5);
    }

    #[test]
    fn test_board_clamps_at_zero() {
        let mut registry = FloorRegistry::new(3);
        registry.enqueue(1, CallDirection::Up, 2);
        registry.board(1, Direction::Up, 5);
        assert_eq!(registry.floor(1).up_queue, 0);
    }

    #[test]
    fn test_idle_board_prefers_down_queue() {
        let mut registry = FloorRegistry::new(3);
        registry.enqueue(1, CallDirection::Up, 4);
        registry.enqueue(1, CallDirection::Down, 1);

        registry.board(1, Direction::Idle, 1);
        assert_eq!(*registry.floor(1), Floor { up_queue: 4, down_queue: 0 });

        registry.board(1, Direction::Idle, 3);
        assert_eq!(*registry.floor(1), Floor { up_queue: 1, down_queue: 0 });
    }

    #[test]
    fn test_reset_clears_queues() {
        let mut registry = FloorRegistry::new(2);
        registry.enqueue(0, CallDirection::Up, 1);
        registry.reset(5);
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.total_waiting(), 0);
    }
}
