//! The closed set of catalog categories.

use serde::{Deserialize, Serialize};

/// Furniture category.
///
/// The catalog is partitioned into a closed enumeration of rooms plus
/// decor. Stored in Postgres as the `category` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "category", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    LivingRoom,
    Bedroom,
    DiningRoom,
    Office,
    Decor,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::LivingRoom,
        Self::Bedroom,
        Self::DiningRoom,
        Self::Office,
        Self::Decor,
    ];

    /// Human-readable label, e.g. "Living Room".
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::LivingRoom => "Living Room",
            Self::Bedroom => "Bedroom",
            Self::DiningRoom => "Dining Room",
            Self::Office => "Office",
            Self::Decor => "Decor",
        }
    }

    /// Stable machine name, e.g. `living_room` (matches the Postgres enum).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LivingRoom => "living_room",
            Self::Bedroom => "bedroom",
            Self::DiningRoom => "dining_room",
            Self::Office => "office",
            Self::Decor => "decor",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "living_room" => Ok(Self::LivingRoom),
            "bedroom" => Ok(Self::Bedroom),
            "dining_room" => Ok(Self::DiningRoom),
            "office" => Ok(Self::Office),
            "decor" => Ok(Self::Decor),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_machine_names() {
        for category in Category::ALL {
            let parsed: Category = category.as_str().parse().expect("parse");
            assert_eq!(category, parsed);
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert!("garage".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_machine_names() {
        let json = serde_json::to_string(&Category::DiningRoom).expect("serialize");
        assert_eq!(json, "\"dining_room\"");
    }
}
