use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::{StaffingEvent, StaffingEventKind, StaffingSnapshot};

const CHANNEL_CAPACITY: usize = 256;

struct ShiftChannel {
    sender: broadcast::Sender<StaffingEvent>,
    next_seq: u64,
}

/// Change notification bus. One broadcast channel per shift; `publish` is
/// called while the publisher still holds the shift's mutation lock, so
/// subscribers see events in commit order for that shift. There is no
/// ordering relationship across shifts and no durable replay log: a
/// subscriber that lags past the channel capacity drops its receiver and
/// falls back to a fresh staffing read.
#[derive(Default)]
pub struct ChangeBus {
    channels: Mutex<HashMap<Uuid, ShiftChannel>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, shift_id: Uuid) -> broadcast::Receiver<StaffingEvent> {
        let mut channels = self.channels.lock().expect("bus channel table poisoned");
        channels
            .entry(shift_id)
            .or_insert_with(|| ShiftChannel {
                sender: broadcast::channel(CHANNEL_CAPACITY).0,
                next_seq: 0,
            })
            .sender
            .subscribe()
    }

    /// Assign the next per-shift sequence number and fan the event out.
    /// Events with no live subscribers are dropped, which is fine: a later
    /// subscriber starts from a fresh snapshot read.
    pub fn publish(
        &self,
        shift_id: Uuid,
        kind: StaffingEventKind,
        snapshot: StaffingSnapshot,
    ) -> StaffingEvent {
        let mut channels = self.channels.lock().expect("bus channel table poisoned");
        let channel = channels.entry(shift_id).or_insert_with(|| ShiftChannel {
            sender: broadcast::channel(CHANNEL_CAPACITY).0,
            next_seq: 0,
        });

        let event = StaffingEvent {
            shift_id,
            seq: channel.next_seq,
            kind,
            snapshot,
        };
        channel.next_seq += 1;

        let _ = channel.sender.send(event.clone());
        event
    }

    /// Drop a shift's channel once nothing will publish to it again.
    /// Subscribers drain any buffered events and then observe the stream
    /// as closed.
    pub fn close(&self, shift_id: Uuid) {
        let mut channels = self.channels.lock().expect("bus channel table poisoned");
        channels.remove(&shift_id);
    }
}
