// FIFO order admission queue
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::info;

pub type OrderId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Fulfilled,
    Cancelled,
}

/// An admitted order. Never modified after admission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub requester: String,
    pub crop_id: u64,
    pub quantity: u64,
    pub status: OrderStatus,
    pub admitted_at: DateTime<Utc>,
}

#[derive(Debug)]
struct QueueState {
    next_id: OrderId,
    orders: VecDeque<Order>,
}

/// Unbounded, append-only FIFO of admitted orders.
///
/// Ids start at 1 and are assigned under the same lock as the append, so
/// concurrent callers observe unique, gap-free ids in admission order.
#[derive(Debug)]
pub struct OrderQueue {
    state: Mutex<QueueState>,
}

impl Default for OrderQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                next_id: 1,
                orders: VecDeque::new(),
            }),
        }
    }

    /// Admit an order at the tail and return its id
    pub fn enqueue(&self, requester: impl Into<String>, crop_id: u64, quantity: u64) -> OrderId {
        let requester = requester.into();
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;

        info!(order = id, requester = %requester, crop_id, quantity, "order queued");
        state.orders.push_back(Order {
            id,
            requester,
            crop_id,
            quantity,
            status: OrderStatus::Pending,
            admitted_at: Utc::now(),
        });
        id
    }

    pub fn size(&self) -> usize {
        self.state.lock().orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().orders.is_empty()
    }

    /// Oldest order still held
    pub fn front(&self) -> Option<Order> {
        self.state.lock().orders.front().cloned()
    }

    pub fn get(&self, id: OrderId) -> Option<Order> {
        let state = self.state.lock();
        // ids are ascending along the queue
        state
            .orders
            .binary_search_by_key(&id, |order| order.id)
            .ok()
            .map(|idx| state.orders[idx].clone())
    }

    /// All held orders in admission order
    pub fn snapshot(&self) -> Vec<Order> {
        self.state.lock().orders.iter().cloned().collect()
    }
}
