//! Order tracking timeline built from the backend's stage timestamps.

use std::fmt;

use chrono::{DateTime, Utc};

use partshop_core::commerce::Order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Placed,
    Confirmed,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Placed => "Order placed",
            Stage::Confirmed => "Confirmed",
            Stage::Packed => "Packed",
            Stage::Shipped => "Shipped",
            Stage::Delivered => "Delivered",
            Stage::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub stage: Stage,
    pub at: DateTime<Utc>,
}

/// Stages the order has reached, oldest first. Stages without a timestamp are skipped.
pub fn timeline(order: &Order) -> Vec<TimelineEntry> {
    let stamps = [
        (Stage::Placed, Some(order.placed_at)),
        (Stage::Confirmed, order.confirmed_at),
        (Stage::Packed, order.packed_at),
        (Stage::Shipped, order.shipped_at),
        (Stage::Delivered, order.delivered_at),
        (Stage::Cancelled, order.cancelled_at),
    ];
    let mut entries: Vec<TimelineEntry> = stamps
        .into_iter()
        .filter_map(|(stage, at)| at.map(|at| TimelineEntry { stage, at }))
        .collect();
    entries.sort_by_key(|e| (e.at, e.stage));
    entries
}

/// Cancellation wins over any other stage.
pub fn current_stage(order: &Order) -> Stage {
    if order.cancelled_at.is_some() {
        return Stage::Cancelled;
    }
    timeline(order).last().map_or(Stage::Placed, |e| e.stage)
}
