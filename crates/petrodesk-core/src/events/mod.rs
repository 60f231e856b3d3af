//! Domain events and the in-process event bus.
//!
//! Mutating services publish events describing what changed. Consumers
//! (live-update feeds, audit sinks) subscribe through [`EventBus`], which is
//! injected into services explicitly rather than reached through a global.

pub mod employee;
pub mod folder;
pub mod schedule;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub use employee::EmployeeEvent;
pub use folder::FolderEvent;
pub use schedule::ScheduleEvent;

/// Any domain event PetroDesk can emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum DomainEvent {
    /// Employee lifecycle events.
    Employee(EmployeeEvent),
    /// Folder tree and document events.
    Folder(FolderEvent),
    /// Attendance and shift events.
    Schedule(ScheduleEvent),
}

/// Broadcast bus for domain events.
///
/// Backed by a `tokio::sync::broadcast` channel; publishing never blocks and
/// never fails the publishing operation, even with zero subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a new bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event. Returns the number of subscribers that received it.
    pub fn publish(&self, event: DomainEvent) -> usize {
        // A send error only means there are currently no subscribers.
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let bus = EventBus::new(8);
        let delivered = bus.publish(DomainEvent::Employee(EmployeeEvent::Deleted {
            employee_id: Uuid::new_v4(),
        }));
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let id = Uuid::new_v4();
        bus.publish(DomainEvent::Employee(EmployeeEvent::Deleted {
            employee_id: id,
        }));
        match rx.recv().await.unwrap() {
            DomainEvent::Employee(EmployeeEvent::Deleted { employee_id }) => {
                assert_eq!(employee_id, id)
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
