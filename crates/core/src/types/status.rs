//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Fulfillment status of a sales-ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "sale_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    #[default]
    Commissioned,
    Processing,
    Shipped,
    Fulfilled,
}

impl SaleStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Commissioned,
        Self::Processing,
        Self::Shipped,
        Self::Fulfilled,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Commissioned => "Commissioned",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Fulfilled => "Fulfilled",
        }
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SaleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commissioned" => Ok(Self::Commissioned),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "fulfilled" => Ok(Self::Fulfilled),
            _ => Err(format!("invalid sale status: {s}")),
        }
    }
}

/// Chat message role for the concierge transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_status_round_trip() {
        for status in SaleStatus::ALL {
            let parsed: SaleStatus = status
                .label()
                .to_lowercase()
                .parse()
                .expect("parse lowercase label");
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_chat_role_serde() {
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).expect("serialize"),
            "\"assistant\""
        );
    }
}
