//! Closed enumerations: supported banks and investment kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Banks the record keeper supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BankName {
    /// HDFC Bank.
    #[serde(rename = "HDFC Bank Private Limited")]
    Hdfc,
    /// State Bank of India.
    #[serde(rename = "State Bank of India")]
    Sbi,
}

impl BankName {
    /// All supported banks.
    pub const ALL: [Self; 2] = [Self::Hdfc, Self::Sbi];

    /// Returns the registered bank name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hdfc => "HDFC Bank Private Limited",
            Self::Sbi => "State Bank of India",
        }
    }

    /// Parses a bank from its registered name or short code.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|bank| {
            bank.as_str().eq_ignore_ascii_case(s) || bank.code().eq_ignore_ascii_case(s)
        })
    }

    /// Returns the short code (`HDFC`, `SBI`).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Hdfc => "HDFC",
            Self::Sbi => "SBI",
        }
    }
}

impl fmt::Display for BankName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of investment an account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    /// Listed equities.
    #[serde(rename = "Stocks")]
    Stock,
    /// Bank fixed deposit.
    #[serde(rename = "Fixed Deposit")]
    FixedDeposit,
    /// Mutual fund units.
    #[serde(rename = "Mutual Funds")]
    MutualFund,
    /// Bank recurring deposit.
    #[serde(rename = "Recurring Deposit")]
    RecurringDeposit,
}

impl InvestmentType {
    /// All investment kinds.
    pub const ALL: [Self; 4] = [
        Self::Stock,
        Self::FixedDeposit,
        Self::MutualFund,
        Self::RecurringDeposit,
    ];

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "Stocks",
            Self::FixedDeposit => "Fixed Deposit",
            Self::MutualFund => "Mutual Funds",
            Self::RecurringDeposit => "Recurring Deposit",
        }
    }

    /// Parses a kind from its display name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }

    /// Returns true if the kind earns a bank-set interest rate.
    #[must_use]
    pub const fn is_deposit(&self) -> bool {
        matches!(self, Self::FixedDeposit | Self::RecurringDeposit)
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_name_round_trips_through_parse() {
        for bank in BankName::ALL {
            assert_eq!(BankName::parse(bank.as_str()), Some(bank));
        }
        assert_eq!(BankName::parse(" sbi "), Some(BankName::Sbi));
        assert_eq!(BankName::parse("Bank of Nowhere"), None);
    }

    #[test]
    fn test_bank_name_serializes_registered_name() {
        let json = serde_json::to_string(&BankName::Hdfc).unwrap();
        assert_eq!(json, "\"HDFC Bank Private Limited\"");
    }

    #[test]
    fn test_investment_type_parse() {
        assert_eq!(
            InvestmentType::parse("fixed deposit"),
            Some(InvestmentType::FixedDeposit)
        );
        assert_eq!(InvestmentType::parse("Stocks"), Some(InvestmentType::Stock));
        assert_eq!(InvestmentType::parse("Bonds"), None);
    }

    #[test]
    fn test_deposit_kinds() {
        assert!(InvestmentType::FixedDeposit.is_deposit());
        assert!(InvestmentType::RecurringDeposit.is_deposit());
        assert!(!InvestmentType::Stock.is_deposit());
        assert!(!InvestmentType::MutualFund.is_deposit());
    }

    #[test]
    fn test_investment_type_serialization() {
        let json = serde_json::to_string(&InvestmentType::MutualFund).unwrap();
        assert_eq!(json, "\"Mutual Funds\"");
        let kind: InvestmentType = serde_json::from_str("\"Recurring Deposit\"").unwrap();
        assert_eq!(kind, InvestmentType::RecurringDeposit);
    }
}
