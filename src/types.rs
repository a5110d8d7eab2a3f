//! Payload types shared by several endpoint groups.

use serde::{Deserialize, Serialize};

use crate::de;

/// The vendor's generic `{value, description}` pair used by every lookup
/// endpoint. `value` is a number on some endpoints and a string on others
/// (sometimes both for the same endpoint), so it is kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDescription {
    #[serde(deserialize_with = "de::string_or_number")]
    pub value: String,
    pub description: String,
}

impl ValueDescription {
    pub fn new(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: description.into(),
        }
    }
}

/// Account balance. Amounts are kept as the vendor's decimal text; the
/// advanced fields only come back with `advanced=true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(deserialize_with = "de::string_or_number")]
    pub current_balance: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub spent_total: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub calls_total: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub time_total: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub spent_today: String,
    #[serde(default, deserialize_with = "de::lenient")]
    pub calls_today: u64,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub time_today: String,
}

/// A voip.ms point of presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub server_name: String,
    pub server_shortname: String,
    pub server_hostname: String,
    pub server_ip: String,
    pub server_country: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub server_pop: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_description_accepts_numeric_values() {
        let rows: Vec<ValueDescription> = serde_json::from_str(
            r#"[{"value":1,"description":"Lock"},{"value":"0","description":"Unlock"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0], ValueDescription::new("1", "Lock"));
        assert_eq!(rows[1], ValueDescription::new("0", "Unlock"));
    }

    #[test]
    fn plain_balance_has_only_current_balance() {
        let balance: Balance = serde_json::from_str(r#"{"current_balance":"100"}"#).unwrap();
        assert_eq!(balance.current_balance, "100");
        assert_eq!(balance.calls_today, 0);
        assert!(balance.spent_total.is_empty());
    }

    #[test]
    fn advanced_balance_mixes_strings_and_numbers() {
        let balance: Balance = serde_json::from_str(
            r#"{"current_balance":"15.86","spent_total":"123.45","calls_total":"1540",
                "time_total":"36:12:05","spent_today":0.2,"calls_today":"1","time_today":"0:55"}"#,
        )
        .unwrap();
        assert_eq!(balance.spent_today, "0.2");
        assert_eq!(balance.calls_today, 1);
        assert_eq!(balance.time_total, "36:12:05");
    }
}
