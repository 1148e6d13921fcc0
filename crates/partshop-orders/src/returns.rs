//! Return requests: the customer-side draft and the status lifecycle.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use partshop_core::commerce::{NewReturn, Order, ReturnItem, ReturnRequest, ReturnStatus};
use partshop_core::traits::OrderApi;

use crate::error::{Result, WorkflowError};

/// Statuses a return may move to next. Empty for terminal statuses.
pub fn next_statuses(status: ReturnStatus) -> &'static [ReturnStatus] {
    use ReturnStatus::*;
    match status {
        Requested => &[Approved, Rejected, Cancelled],
        Approved => &[PickedUp, Cancelled],
        PickedUp => &[Refunded],
        Rejected | Refunded | Cancelled => &[],
    }
}

pub fn is_terminal(status: ReturnStatus) -> bool { next_statuses(status).is_empty() }

/// Apply a status change reported by the backend, refusing impossible jumps.
pub fn advance(request: &mut ReturnRequest, to: ReturnStatus) -> Result<()> {
    if request.status == to {
        return Ok(());
    }
    if !next_statuses(request.status).contains(&to) {
        return Err(WorkflowError::InvalidTransition { from: request.status, to });
    }
    tracing::debug!(return_id = %request.id, from = ?request.status, ?to, "return status advanced");
    request.status = to;
    Ok(())
}

/// A return being filled in on the order page.
#[derive(Debug, Clone)]
pub struct ReturnDraft<'a> {
    order: &'a Order,
    items: BTreeMap<String, u32>,
    reason: String,
    comment: Option<String>,
}

impl<'a> ReturnDraft<'a> {
    pub fn new(order: &'a Order) -> Self {
        Self { order, items: BTreeMap::new(), reason: String::new(), comment: None }
    }

    /// Select an order item. Quantity must be between 1 and the ordered quantity.
    pub fn select(&mut self, item_id: &str, quantity: u32) -> Result<()> {
        let item = self.order.item(item_id).ok_or_else(|| WorkflowError::UnknownItem(item_id.to_string()))?;
        if quantity == 0 || quantity > item.quantity {
            return Err(WorkflowError::InvalidQuantity { item: item.name.clone(), max: item.quantity });
        }
        self.items.insert(item_id.to_string(), quantity);
        Ok(())
    }

    pub fn deselect(&mut self, item_id: &str) { self.items.remove(item_id); }

    pub fn reason(&mut self, reason: &str) { self.reason = reason.trim().to_string(); }

    pub fn comment(&mut self, comment: &str) {
        let comment = comment.trim();
        self.comment = if comment.is_empty() { None } else { Some(comment.to_string()) };
    }

    /// Last moment a return can still be opened. `None` before delivery, or
    /// when the window reaches past the representable calendar.
    pub fn window_closes_at(&self, window_days: u32) -> Option<DateTime<Utc>> {
        let window = Duration::try_days(i64::from(window_days))?;
        self.order.delivered_at?.checked_add_signed(window)
    }

    pub fn validate(&self, now: DateTime<Utc>, window_days: u32) -> Result<NewReturn> {
        if !self.order.is_delivered() {
            return Err(WorkflowError::NotDelivered);
        }
        if let Some(closes) = self.window_closes_at(window_days) {
            if now > closes {
                return Err(WorkflowError::ReturnWindowClosed(closes));
            }
        }
        if self.items.is_empty() {
            return Err(WorkflowError::NoItems);
        }
        if self.reason.is_empty() {
            return Err(WorkflowError::MissingReason);
        }
        let items = self
            .items
            .iter()
            .map(|(id, qty)| ReturnItem { order_item_id: id.clone(), quantity: *qty })
            .collect();
        Ok(NewReturn { items, reason: self.reason.clone(), comment: self.comment.clone() })
    }

    pub async fn submit<A>(&self, api: &A, now: DateTime<Utc>, window_days: u32) -> Result<ReturnRequest>
    where
        A: OrderApi + ?Sized,
    {
        let body = self.validate(now, window_days)?;
        let created = api.submit_return(&self.order.id, &body).await?;
        tracing::info!(order_id = %self.order.id, return_id = %created.id, items = body.items.len(), "return requested");
        Ok(created)
    }
}

/// Customer cancellation; only a request nobody has acted on yet can be withdrawn.
pub async fn cancel<A>(api: &A, request: &ReturnRequest) -> Result<ReturnRequest>
where
    A: OrderApi + ?Sized,
{
    if request.status != ReturnStatus::Requested {
        return Err(WorkflowError::NotCancellable(request.status));
    }
    let mut updated = api.cancel_return(&request.id).await?;
    let reported = updated.status;
    updated.status = request.status;
    advance(&mut updated, reported)?;
    Ok(updated)
}

/// Re-read a return and check the backend moved it along a legal edge.
pub async fn refresh<A>(api: &A, current: &ReturnRequest) -> Result<ReturnRequest>
where
    A: OrderApi + ?Sized,
{
    let mut latest = api.return_request(&current.id).await?;
    let reported = latest.status;
    latest.status = current.status;
    advance(&mut latest, reported)?;
    Ok(latest)
}
