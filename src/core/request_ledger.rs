use super::types::{CallDirection, ElevatorId, FloorIndex, Tick};
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// A passenger waiting at a floor
    External,
    /// A rider already aboard asking to get off
    Internal,
}

/// Lifecycle of a request; the variant order is the only legal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Waiting,
    Processing,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub floor: FloorIndex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<CallDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevator_id: Option<ElevatorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passengers: Option<u32>,
    pub timestamp: Tick,
    pub status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<Tick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Tick>,
}

impl Request {
    pub fn external(floor: FloorIndex, direction: CallDirection, passengers: u32, now: Tick) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: RequestKind::External,
            floor,
            direction: Some(direction),
            elevator_id: None,
            passengers: Some(passengers),
            timestamp: now,
            status: RequestStatus::Waiting,
            assigned_at: None,
            completed_at: None,
        }
    }

    pub fn internal(floor: FloorIndex, passengers: u32, now: Tick) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: RequestKind::Internal,
            floor,
            direction: None,
            elevator_id: None,
            passengers: Some(passengers),
            timestamp: now,
            status: RequestStatus::Waiting,
            assigned_at: None,
            completed_at: None,
        }
    }

    /// Ticks from creation to completion
    pub fn wait_time(&self) -> Option<Tick> {
        self.completed_at
            .map(|done| done.saturating_sub(self.timestamp))
    }

    /// Ticks from assignment to completion
    pub fn travel_time(&self) -> Option<Tick> {
        match (self.assigned_at, self.completed_at) {
            (Some(assigned), Some(done)) => Some(done.saturating_sub(assigned)),
            _ => None,
        }
    }

    /// Move to `next` if that is a forward step, returning whether it moved
    fn advance(&mut self, next: RequestStatus) -> bool {
        if next <= self.status {
            warn!(
                "[Request {}] ignoring status change {:?} -> {:?}",
                self.id, self.status, next
            );
            return false;
        }
        self.status = next;
        true
    }
}

/// Append-only log of every request the system has seen
#[derive(Debug, Clone, Default)]
pub struct RequestLedger {
    requests: Vec<Request>,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request, returning its position in the ledger
    pub fn append(&mut self, request: Request) -> usize {
        self.requests.push(request);
        self.requests.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Request> {
        self.requests.get(index)
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn count_with_status(&self, status: RequestStatus) -> usize {
        self.requests.iter().filter(|r| r.status == status).count()
    }

    /// Record that `elevator_id` took the request at `index`
    pub fn mark_processing(&mut self, index: usize, elevator_id: ElevatorId, now: Tick) -> bool {
        let Some(request) = self.requests.get_mut(index) else {
            return false;
        };
        if !request.advance(RequestStatus::Processing) {
            return false;
        }
        request.elevator_id = Some(elevator_id);
        request.assigned_at = Some(now);
        true
    }

    /// Complete the oldest request `elevator_id` is processing at `floor`
    pub fn complete_oldest(
        &mut self,
        elevator_id: ElevatorId,
        floor: FloorIndex,
        now: Tick,
    ) -> Option<&Request> {
        let request = self.requests.iter_mut().find(|r| {
            r.status == RequestStatus::Processing
                && r.elevator_id == Some(elevator_id)
                && r.floor == floor
        })?;
        request.advance(RequestStatus::Completed);
        request.completed_at = Some(now);
        Some(&*request)
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_moves_forward() {
        let mut ledger = RequestLedger::new();
        let index = ledger.append(Request::external(2, CallDirection::Up, 1, 0));

        assert!(ledger.mark_processing(index, 1, 0));
        assert!(!ledger.mark_processing(index, 2, 1), "processing twice is rejected");
        assert_eq!(ledger.get(index).unwrap().elevator_id, Some(1));

        ledger.complete_oldest(1, 2, 4).unwrap();
        assert!(!ledger.mark_processing(index, 1, 5));
        assert_eq!(ledger.get(index).unwrap().status, RequestStatus::Completed);
    }

    #[test]
    fn test_complete_oldest_picks_first_match() {
        let mut ledger = RequestLedger::new();
        let first = ledger.append(Request::internal(4, 1, 0));
        let second = ledger.append(Request::internal(4, 2, 1));
        let other_car = ledger.append(Request::internal(4, 1, 1));
        ledger.mark_processing(first, 0, 0);
        ledger.mark_processing(second, 0, 1);
        ledger.mark_processing(other_car, 1, 1);

        let done = ledger.complete_oldest(0, 4, 6).unwrap();
        assert_eq!(done.passengers, Some(1));
        assert_eq!(done.wait_time(), Some(6));

        assert_eq!(ledger.get(second).unwrap().status, RequestStatus::Processing);
        assert_eq!(ledger.get(other_car).unwrap().status, RequestStatus::Processing);
        assert!(ledger.complete_oldest(2, 4, 6).is_none());
    }

    #[test]
    fn test_waiting_requests_never_complete() {
        let mut ledger = RequestLedger::new();
        ledger.append(Request::external(0, CallDirection::Up, 3, 0));
        assert!(ledger.complete_oldest(0, 0, 1).is_none());
        assert_eq!(ledger.count_with_status(RequestStatus::Waiting), 1);
    }

    #[test]
    fn test_wire_shape() {
        let request = Request::internal(3, 2, 7);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "internal");
        assert_eq!(json["status"], "waiting");
        assert_eq!(json["timestamp"], 7);
        assert!(json.get("direction").is_none());
        assert!(json.get("elevatorId").is_none());
    }
}
