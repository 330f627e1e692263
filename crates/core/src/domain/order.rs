// Order Entity

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Order identifier. Supplied by the caller, never generated by the service.
pub type OrderId = i64;

/// A customer order. The id doubles as the idempotency key for
/// persistence: replaying an order with the same id overwrites the
/// earlier row instead of creating a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub item: String,
}

impl Order {
    /// Validate and construct an order.
    ///
    /// Rejects non-positive ids and empty (or whitespace-only) items.
    pub fn new(id: OrderId, item: impl Into<String>) -> crate::domain::error::Result<Self> {
        if id <= 0 {
            return Err(DomainError::InvalidOrderId(id));
        }

        let item = item.into();
        if item.trim().is_empty() {
            return Err(DomainError::EmptyItem);
        }

        Ok(Self { id, item })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_order() {
        let order = Order::new(1, "widget").unwrap();
        assert_eq!(order.id, 1);
        assert_eq!(order.item, "widget");
    }

    #[test]
    fn test_new_rejects_zero_id() {
        let result = Order::new(0, "widget");
        assert!(matches!(result, Err(DomainError::InvalidOrderId(0))));
    }

    #[test]
    fn test_new_rejects_negative_id() {
        let result = Order::new(-42, "widget");
        assert!(matches!(result, Err(DomainError::InvalidOrderId(-42))));
    }

    #[test]
    fn test_new_rejects_empty_item() {
        let result = Order::new(1, "");
        assert!(matches!(result, Err(DomainError::EmptyItem)));
    }

    #[test]
    fn test_new_rejects_whitespace_item() {
        let result = Order::new(1, "   ");
        assert!(matches!(result, Err(DomainError::EmptyItem)));
    }

    #[test]
    fn test_item_is_not_trimmed() {
        // Validation trims for the emptiness check only; the stored
        // item keeps its original form.
        let order = Order::new(1, " widget ").unwrap();
        assert_eq!(order.item, " widget ");
    }
}
