// Queue Record Codec
//
// Orders travel through the queue as self-describing JSON text. The
// queue itself treats records as opaque strings; only intake (encode)
// and the worker (decode) know the format.

use serde::Deserialize;
use thiserror::Error;

use super::order::{Order, OrderId};

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("{0}")]
    Malformed(String),
}

/// Wire shape of a queued record. Unknown fields are tolerated so the
/// format can grow without poisoning older records.
#[derive(Deserialize)]
struct RawRecord {
    id: OrderId,
    item: String,
}

/// Serialize an order for the queue. Key order is deterministic, so
/// equal orders always produce identical records.
pub fn encode(order: &Order) -> String {
    serde_json::json!({ "id": order.id, "item": order.item }).to_string()
}

/// Parse a queue record back into a validated order.
///
/// Fails on syntactically broken JSON, missing or mistyped fields, and
/// on records whose values no longer pass domain validation. Callers
/// decide what to do with the failure; decode never panics.
pub fn decode(raw: &str) -> std::result::Result<Order, CodecError> {
    let record: RawRecord =
        serde_json::from_str(raw).map_err(|e| CodecError::Malformed(e.to_string()))?;

    Order::new(record.id, record.item).map_err(|e| CodecError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_deterministic() {
        let order = Order::new(1, "widget").unwrap();
        assert_eq!(encode(&order), r#"{"id":1,"item":"widget"}"#);
        assert_eq!(encode(&order), encode(&order.clone()));
    }

    #[test]
    fn test_round_trip() {
        let order = Order::new(42, "Bücher (x3)").unwrap();
        let decoded = decode(&encode(&order)).unwrap();
        assert_eq!(decoded, order);
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        assert!(decode("not json at all").is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        assert!(decode(r#"{"id":1}"#).is_err());
        assert!(decode(r#"{"item":"widget"}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_mistyped_field() {
        assert!(decode(r#"{"id":"1","item":"widget"}"#).is_err());
        assert!(decode(r#"{"id":1.5,"item":"widget"}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_domain_invalid_values() {
        // Well-formed JSON that fails validation is just as unprocessable
        // as broken JSON.
        assert!(decode(r#"{"id":-1,"item":"widget"}"#).is_err());
        assert!(decode(r#"{"id":1,"item":""}"#).is_err());
    }

    #[test]
    fn test_decode_tolerates_unknown_fields() {
        let order = decode(r#"{"id":1,"item":"widget","note":"rush"}"#).unwrap();
        assert_eq!(order.id, 1);
        assert_eq!(order.item, "widget");
    }
}
