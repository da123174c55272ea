use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// World facts an organism can hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Fact {
    Hungry,
    Sated,
    Thirsty,
    Quenched,
}

impl Fact {
    pub fn as_str(self) -> &'static str {
        match self {
            Fact::Hungry => "hungry",
            Fact::Sated => "sated",
            Fact::Thirsty => "thirsty",
            Fact::Quenched => "quenched",
        }
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
