//! The customer event schema and its lenient JSON decoding

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One customer event as carried on the topic.
///
/// Every field is optional: a record which cannot be fully decoded degrades
/// to null fields instead of failing the batch, so it still participates in
/// downstream counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// Unique per customer, not validated here
    #[serde(deserialize_with = "lenient")]
    pub customer_id: Option<i32>,
    /// Customer name, unvalidated
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Grouping key of the count aggregation
    #[serde(deserialize_with = "lenient")]
    pub city: Option<String>,
    /// Orders placed so far, unused by the aggregation
    #[serde(deserialize_with = "lenient")]
    pub order_count: Option<i32>,
    /// Registration time in epoch seconds
    #[serde(deserialize_with = "lenient")]
    pub registration_timestamp: Option<i64>,
}

impl Customer {
    /// Decode one UTF-8 JSON payload into a customer event.
    ///
    /// A payload which is not valid JSON, not a JSON object or not valid
    /// UTF-8 decodes to the all-null customer; a field of the wrong JSON
    /// type decodes to null without affecting the other fields. Decoding
    /// never drops a record.
    pub fn decode(payload: &[u8]) -> Customer {
        serde_json::from_slice(payload).unwrap_or_default()
    }
}

/// Decode a field to null instead of failing the record when the JSON type
/// does not match the schema
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::Customer;

    #[test]
    fn decodes_full_record() {
        let payload = br#"{
            "customer_id": 42,
            "name": "Ada",
            "city": "Berlin",
            "order_count": 3,
            "registration_timestamp": 1700000000
        }"#;
        let customer = Customer::decode(payload);
        assert_eq!(
            customer,
            Customer {
                customer_id: Some(42),
                name: Some("Ada".to_owned()),
                city: Some("Berlin".to_owned()),
                order_count: Some(3),
                registration_timestamp: Some(1_700_000_000),
            }
        );
    }

    #[test]
    fn missing_fields_decode_to_null() {
        let customer = Customer::decode(br#"{"customer_id": 7}"#);
        assert_eq!(customer.customer_id, Some(7));
        assert_eq!(customer.name, None);
        assert_eq!(customer.city, None);
        assert_eq!(customer.order_count, None);
        assert_eq!(customer.registration_timestamp, None);
    }

    #[test]
    fn mistyped_field_decodes_to_null_without_dropping_the_rest() {
        let customer = Customer::decode(br#"{"customer_id": "not-a-number", "city": "Oslo"}"#);
        assert_eq!(customer.customer_id, None);
        assert_eq!(customer.city, Some("Oslo".to_owned()));
    }

    #[test]
    fn explicit_null_city_decodes_to_null() {
        let customer = Customer::decode(br#"{"customer_id": 1, "city": null}"#);
        assert_eq!(customer.city, None);
    }

    #[test]
    fn malformed_json_decodes_to_all_null() {
        assert_eq!(Customer::decode(b"not json at all"), Customer::default());
    }

    #[test]
    fn non_object_json_decodes_to_all_null() {
        assert_eq!(Customer::decode(b"[1, 2, 3]"), Customer::default());
    }

    #[test]
    fn invalid_utf8_decodes_to_all_null() {
        assert_eq!(Customer::decode(&[0xff, 0xfe, 0x80]), Customer::default());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let customer = Customer::decode(br#"{"city": "Paris", "tier": "gold"}"#);
        assert_eq!(customer.city, Some("Paris".to_owned()));
    }

    #[test]
    fn fractional_integer_decodes_to_null() {
        let customer = Customer::decode(br#"{"customer_id": 1.5, "city": "Rome"}"#);
        assert_eq!(customer.customer_id, None);
        assert_eq!(customer.city, Some("Rome".to_owned()));
    }
}
