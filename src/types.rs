//! Core data types for finwatch
//!
//! Request and response payloads exchanged with the finance services,
//! the fixed sample inputs each screen sends, and the screen identifiers
//! used by the tab shell.

use serde::{Deserialize, Serialize};

/// Balance shown on the dashboard
pub const DASHBOARD_BALANCE: f64 = 1000.0;

/// Monthly income sent with every savings request
pub const SAMPLE_INCOME: f64 = 5000.0;

/// Balance reported by the simulated low-balance notification
pub const SIMULATED_LOW_BALANCE: f64 = 50.0;

/// Geographic position of a transaction, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// A single card transaction submitted for a fraud check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: f64,
    pub location: Location,
}

/// A categorized expense submitted for a savings recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub amount: f64,
    pub category: String,
}

/// Body of `POST /check-fraud`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudCheckRequest {
    pub transactions: Vec<Transaction>,
}

/// Response of `POST /check-fraud`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudCheckResponse {
    pub fraud_detected: bool,
}

/// Body of `POST /recommend-savings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsRequest {
    pub income: f64,
    pub expenses: Vec<Expense>,
}

/// Response of `POST /recommend-savings`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsResponse {
    pub recommended_savings: f64,
}

/// Body of `POST /notify-low-balance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowBalanceNotice {
    pub balance: f64,
    pub token: String,
}

/// Transactions checked by the fraud screen
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            amount: 500.0,
            location: Location {
                lat: 40.7128,
                lon: -74.0060,
            },
        },
        Transaction {
            amount: 2000.0,
            location: Location {
                lat: 35.6895,
                lon: 139.6917,
            },
        },
    ]
}

/// Expenses sent by the savings screen
pub fn sample_expenses() -> Vec<Expense> {
    vec![
        Expense {
            amount: 1500.0,
            category: "Rent".into(),
        },
        Expense {
            amount: 500.0,
            category: "Utilities".into(),
        },
        Expense {
            amount: 300.0,
            category: "Groceries".into(),
        },
    ]
}

/// Application screens, one per tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    Fraud,
    Savings,
    Notifications,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Dashboard,
            Screen::Fraud,
            Screen::Savings,
            Screen::Notifications,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            Screen::Dashboard => 0,
            Screen::Fraud => 1,
            Screen::Savings => 2,
            Screen::Notifications => 3,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::all().get(idx).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Fraud => "Fraud",
            Screen::Savings => "Savings",
            Screen::Notifications => "Notifications",
        }
    }

    /// Tab bar icon
    pub fn icon(&self) -> &'static str {
        match self {
            Screen::Dashboard => "⌂",
            Screen::Fraud => "⛨",
            Screen::Savings => "$",
            Screen::Notifications => "🔔",
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

// Helper functions

/// Format an amount as dollars with two decimals
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1000.0), "$1000.00");
        assert_eq!(format_currency(433.333), "$433.33");
        assert_eq!(format_currency(0.5), "$0.50");
    }

    #[test]
    fn test_screen_cycle() {
        assert_eq!(Screen::Dashboard.next(), Screen::Fraud);
        assert_eq!(Screen::Notifications.next(), Screen::Dashboard);
        assert_eq!(Screen::Dashboard.prev(), Screen::Notifications);
    }

    #[test]
    fn test_screen_index_roundtrip() {
        for screen in Screen::all() {
            assert_eq!(Screen::from_index(screen.index()), Some(*screen));
        }
        assert_eq!(Screen::from_index(4), None);
    }

    #[test]
    fn test_every_screen_has_distinct_icon() {
        let icons: std::collections::HashSet<&str> =
            Screen::all().iter().map(|s| s.icon()).collect();
        assert_eq!(icons.len(), Screen::all().len());
    }

    #[test]
    fn test_fraud_request_shape() {
        let body = serde_json::to_value(FraudCheckRequest {
            transactions: sample_transactions(),
        })
        .unwrap();
        assert_eq!(body["transactions"][0]["amount"], 500.0);
        assert_eq!(body["transactions"][1]["location"]["lon"], 139.6917);
    }

    #[test]
    fn test_response_field_names() {
        let fraud: FraudCheckResponse =
            serde_json::from_str(r#"{"fraudDetected":true}"#).unwrap();
        assert!(fraud.fraud_detected);

        let savings: SavingsResponse =
            serde_json::from_str(r#"{"recommendedSavings":433.33}"#).unwrap();
        assert_eq!(savings.recommended_savings, 433.33);
    }
}
