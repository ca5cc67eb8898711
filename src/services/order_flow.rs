use crate::models::common::OrderStatus;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot move order from {from} to {to}")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Admin-driven status workflow. Collected and Rejected are terminal.
pub fn next_states(from: OrderStatus) -> &'static [OrderStatus] {
    match from {
        OrderStatus::Pending => &[OrderStatus::Accepted, OrderStatus::Rejected],
        OrderStatus::Accepted => &[OrderStatus::Ready],
        OrderStatus::Ready => &[OrderStatus::Collected],
        OrderStatus::Collected | OrderStatus::Rejected => &[],
    }
}

pub fn check_transition(from: OrderStatus, to: OrderStatus) -> Result<(), TransitionError> {
    if next_states(from).contains(&to) {
        Ok(())
    } else {
        Err(TransitionError { from, to })
    }
}

pub fn is_terminal(status: OrderStatus) -> bool {
    next_states(status).is_empty()
}

/// Text queued for the order's owner after a transition.
pub fn notification_message(
    item_name: &str,
    quantity: i32,
    status: OrderStatus,
    pickup_time: Option<&str>,
) -> String {
    match status {
        OrderStatus::Pending => format!("Your order for {quantity} x {item_name} was placed."),
        OrderStatus::Accepted => {
            format!("Your order for {quantity} x {item_name} was accepted.")
        }
        OrderStatus::Ready => match pickup_time {
            Some(time) => format!(
                "Your order for {quantity} x {item_name} is ready. Pick it up at {time}."
            ),
            None => format!("Your order for {quantity} x {item_name} is ready for pickup."),
        },
        OrderStatus::Collected => {
            format!("Your order for {quantity} x {item_name} was collected. Enjoy!")
        }
        OrderStatus::Rejected => {
            format!("Sorry, your order for {quantity} x {item_name} was rejected.")
        }
    }
}
