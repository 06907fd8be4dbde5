use super::types::{ElevatorId, Tick};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Deferred actions the simulation performs at a later tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEvent {
    /// Close a car's doors and rebuild its path
    DoorClose { elevator_id: ElevatorId },
}

#[derive(Debug)]
pub struct ScheduledEvent {
    pub fire_tick: Tick,
    pub sequence_num: u64,
    pub event: SimulationEvent,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.fire_tick == other.fire_tick && self.sequence_num == other.sequence_num
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .fire_tick
            .cmp(&self.fire_tick)
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

#[derive(Debug, Default)]
pub struct EventScheduler {
    event_queue: BinaryHeap<ScheduledEvent>,
    sequence_counter: u64,
}

impl EventScheduler {
    /// Create a new EventScheduler
    pub fn new() -> Self {
        Self {
            event_queue: BinaryHeap::new(),
            sequence_counter: 0,
        }
    }

    /// Schedule an event to fire `delay` ticks after `now`
    pub fn schedule_event(&mut self, event: SimulationEvent, now: Tick, delay: Tick) {
        let scheduled_event = ScheduledEvent {
            fire_tick: now + delay,
            sequence_num: self.sequence_counter,
            event,
        };

        self.event_queue.push(scheduled_event);
        self.sequence_counter += 1;
    }

    /// Remove and return every event due at or before `now`, in firing order
    pub fn take_due_events(&mut self, now: Tick) -> Vec<SimulationEvent> {
        let mut events = Vec::new();

        while self
            .event_queue
            .peek()
            .map_or(false, |scheduled| scheduled.fire_tick <= now)
        {
            if let Some(scheduled_event) = self.event_queue.pop() {
                events.push(scheduled_event.event);
            }
        }

        events
    }

    /// Check if there are any events remaining in the queue
    pub fn has_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.event_queue.len()
    }

    /// Get the tick of the next event without removing it
    pub fn peek_next_tick(&self) -> Option<Tick> {
        self.event_queue.peek().map(|event| event.fire_tick)
    }

    pub fn clear(&mut self) {
        self.event_queue.clear();
    }
}
