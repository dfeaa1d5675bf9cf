//! The order status state machine.
//!
//! Sub-orders progress along a fixed chain; the order-level status is never
//! stored independently but derived from the sub-order statuses, so the two
//! can never disagree. Everything here is pure and persistence-free.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Lifecycle state of a single restaurant's portion of an order.
///
/// `pending → confirmed → cooking → on_the_way → delivered`, one step at a
/// time. `cancelled` is reachable from `pending` and `confirmed` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubOrderStatus {
    Pending,
    Confirmed,
    Cooking,
    OnTheWay,
    Delivered,
    Cancelled,
}

impl SubOrderStatus {
    /// The next state along the forward chain, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Cooking),
            Self::Cooking => Some(Self::OnTheWay),
            Self::OnTheWay => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Whether `to` is the single legal forward step from this state.
    #[must_use]
    pub fn is_forward_step(self, to: Self) -> bool {
        self.next() == Some(to)
    }

    /// A sub-order can only be cancelled before the kitchen starts.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cooking => "cooking",
            Self::OnTheWay => "on_the_way",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SubOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubOrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cooking" => Ok(Self::Cooking),
            "on_the_way" => Ok(Self::OnTheWay),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Derived, read-only summary of an order's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl OverallStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverallStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognised status name.
#[derive(Debug, Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

/// Derive the overall order status from its sub-order statuses.
///
/// - every sub-order cancelled → `cancelled`
/// - every non-cancelled sub-order delivered → `completed`
/// - any sub-order past `confirmed` → `in_progress`
/// - otherwise → `pending`
pub fn derive_overall<I>(statuses: I) -> OverallStatus
where
    I: IntoIterator<Item = SubOrderStatus>,
{
    let mut total = 0_usize;
    let mut cancelled = 0_usize;
    let mut delivered = 0_usize;
    let mut active = 0_usize;

    for status in statuses {
        total += 1;

        match status {
            SubOrderStatus::Cancelled => cancelled += 1,
            SubOrderStatus::Delivered => delivered += 1,
            SubOrderStatus::Cooking | SubOrderStatus::OnTheWay => active += 1,
            SubOrderStatus::Pending | SubOrderStatus::Confirmed => {}
        }
    }

    if total == 0 || cancelled == total {
        return if total == 0 {
            OverallStatus::Pending
        } else {
            OverallStatus::Cancelled
        };
    }

    if delivered + cancelled == total {
        return OverallStatus::Completed;
    }

    if active > 0 || delivered > 0 {
        return OverallStatus::InProgress;
    }

    OverallStatus::Pending
}

#[cfg(test)]
mod tests {
    use super::*;

    use SubOrderStatus::*;

    #[test]
    fn forward_chain_is_single_step() {
        assert!(Pending.is_forward_step(Confirmed));
        assert!(Confirmed.is_forward_step(Cooking));
        assert!(Cooking.is_forward_step(OnTheWay));
        assert!(OnTheWay.is_forward_step(Delivered));

        // No skipping, no going back, no terminal successors.
        assert!(!Pending.is_forward_step(Cooking), "skip rejected");
        assert!(!Cooking.is_forward_step(Confirmed), "backward rejected");
        assert!(!Delivered.is_forward_step(Pending), "terminal has no next");
        assert!(!Cancelled.is_forward_step(Pending), "terminal has no next");
    }

    #[test]
    fn only_early_states_are_cancellable() {
        assert!(Pending.is_cancellable());
        assert!(Confirmed.is_cancellable());
        assert!(!Cooking.is_cancellable());
        assert!(!OnTheWay.is_cancellable());
        assert!(!Delivered.is_cancellable());
        assert!(!Cancelled.is_cancellable());
    }

    #[test]
    fn all_delivered_derives_completed() {
        assert_eq!(
            derive_overall([Delivered, Delivered]),
            OverallStatus::Completed
        );
    }

    #[test]
    fn all_cancelled_derives_cancelled() {
        assert_eq!(
            derive_overall([Cancelled, Cancelled]),
            OverallStatus::Cancelled
        );
    }

    #[test]
    fn any_active_sub_order_derives_in_progress() {
        assert_eq!(
            derive_overall([Pending, Cooking]),
            OverallStatus::InProgress
        );
        assert_eq!(
            derive_overall([Confirmed, OnTheWay]),
            OverallStatus::InProgress
        );
    }

    #[test]
    fn cancelled_sub_orders_are_ignored_once_the_rest_deliver() {
        assert_eq!(
            derive_overall([Cancelled, Delivered]),
            OverallStatus::Completed
        );
    }

    #[test]
    fn partial_delivery_is_still_in_progress() {
        assert_eq!(
            derive_overall([Delivered, Pending]),
            OverallStatus::InProgress
        );
    }

    #[test]
    fn early_states_derive_pending() {
        assert_eq!(derive_overall([Pending, Confirmed]), OverallStatus::Pending);
        assert_eq!(
            derive_overall([Cancelled, Pending]),
            OverallStatus::Pending,
            "a lone cancellation does not advance the order"
        );
    }

    #[test]
    fn status_names_round_trip() {
        for status in [Pending, Confirmed, Cooking, OnTheWay, Delivered, Cancelled] {
            assert_eq!(
                status.as_str().parse::<SubOrderStatus>().ok(),
                Some(status),
                "round trip for {status}"
            );
        }
    }
}
