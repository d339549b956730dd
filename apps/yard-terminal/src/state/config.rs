//! # Configuration State
//!
//! Per-terminal configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`YARD_*`)
//! 2. Defaults (this file)
//!
//! Yard-wide switches that every terminal must agree on (price adjustment)
//! live in the database `settings` table instead.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use yard_core::{Money, Weight, WALK_IN_CLIENT_CODE};

/// Terminal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Yard name (ticket header)
    pub yard_name: String,

    /// Yard address lines (ticket header)
    pub yard_address: Vec<String>,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Weight unit shown next to readings
    pub weight_unit: String,

    /// Client selected when a session starts or is reset
    pub default_client_code: String,

    /// Operator selected when a session starts, if any
    pub default_operator_email: Option<String>,
}

impl Default for ConfigState {
    /// Development defaults: walk-in client, dollars, pounds.
    fn default() -> Self {
        ConfigState {
            yard_name: "Yard Ticket Dev Yard".to_string(),
            yard_address: vec!["1 Scale House Road".to_string(), "City, ST 12345".to_string()],
            currency_symbol: "$".to_string(),
            weight_unit: "LB".to_string(),
            default_client_code: WALK_IN_CLIENT_CODE.to_string(),
            default_operator_email: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `YARD_NAME`: Override yard name
    /// - `YARD_ADDRESS`: Address lines separated by `|`
    /// - `YARD_CURRENCY_SYMBOL`: Override currency symbol
    /// - `YARD_DEFAULT_CLIENT`: Client code selected at session start
    /// - `YARD_OPERATOR`: Operator email selected at session start
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("YARD_NAME") {
            config.yard_name = name;
        }

        if let Some(address) = lookup("YARD_ADDRESS") {
            config.yard_address = address
                .split('|')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(symbol) = lookup("YARD_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(code) = lookup("YARD_DEFAULT_CLIENT") {
            if !code.trim().is_empty() {
                config.default_client_code = code.trim().to_string();
            }
        }

        config.default_operator_email = lookup("YARD_OPERATOR")
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());

        config
    }

    /// Formats an amount as a currency string, e.g. `$1,234.56`.
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            group_thousands(amount.dollars().abs()),
            amount.cents_part().abs()
        )
    }

    /// Formats a scale reading, e.g. `1,250.50 LB`.
    pub fn format_weight(&self, weight: Weight) -> String {
        let hundredths = weight.hundredths();
        format!(
            "{}{}.{:02} {}",
            if hundredths < 0 { "-" } else { "" },
            group_thousands(hundredths.abs() / 100),
            hundredths.abs() % 100,
            self.weight_unit
        )
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
