//! Account operations parsed from text
//!
//! Accepted forms (keyword is case-insensitive):
//! - `deposit 1000` / `deposit:1000`
//! - `withdraw 0.01` / `withdraw:0.01`
//! - `balance` (aliases: `check`, `check-balance`)

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use super::result::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "amount", rename_all = "snake_case")]
pub enum Operation {
    Deposit(Decimal),
    Withdraw(Decimal),
    Balance,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Deposit(_) => "deposit",
            Operation::Withdraw(_) => "withdraw",
            Operation::Balance => "balance",
        }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Operation::Deposit(amount) | Operation::Withdraw(amount) => Some(*amount),
            Operation::Balance => None,
        }
    }
}

/// Parse a monetary amount ("1000", "0.01", "-5")
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_amount("amount is missing"));
    }
    Decimal::from_str(trimmed).map_err(|_| Error::invalid_amount(format!("'{}'", trimmed)))
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let line = s.trim();
        let (keyword, rest) = line
            .split_once(|c: char| c == ':' || c.is_whitespace())
            .map(|(keyword, rest)| (keyword, rest.trim()))
            .unwrap_or((line, ""));

        match keyword.to_lowercase().as_str() {
            "deposit" => Ok(Operation::Deposit(parse_amount(rest)?)),
            "withdraw" => Ok(Operation::Withdraw(parse_amount(rest)?)),
            "balance" | "check" | "check-balance" => {
                if rest.is_empty() {
                    Ok(Operation::Balance)
                } else {
                    Err(Error::validation(format!(
                        "'{}' takes no argument",
                        keyword
                    )))
                }
            }
            "" => Err(Error::validation("empty operation")),
            other => Err(Error::validation(format!("unknown operation '{}'", other))),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Deposit(amount) => write!(f, "deposit {}", amount),
            Operation::Withdraw(amount) => write!(f, "withdraw {}", amount),
            Operation::Balance => write!(f, "balance"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deposit_forms() {
        let expected = Operation::Deposit(Decimal::new(1000, 0));
        assert_eq!("deposit 1000".parse::<Operation>().unwrap(), expected);
        assert_eq!("deposit:1000".parse::<Operation>().unwrap(), expected);
        assert_eq!("  DEPOSIT   1000 ".parse::<Operation>().unwrap(), expected);
    }

    #[test]
    fn test_parse_withdraw_fraction() {
        let op: Operation = "withdraw 0.01".parse().unwrap();
        assert_eq!(op, Operation::Withdraw(Decimal::new(1, 2)));
        assert_eq!(op.amount(), Some(Decimal::new(1, 2)));
    }

    #[test]
    fn test_parse_balance_aliases() {
        for line in ["balance", "check", "Check-Balance"] {
            assert_eq!(line.parse::<Operation>().unwrap(), Operation::Balance);
        }
        assert!("balance 5".parse::<Operation>().is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "deposit".parse::<Operation>(),
            Err(Error::InvalidAmount(_))
        ));
        assert!(matches!(
            "withdraw ten".parse::<Operation>(),
            Err(Error::InvalidAmount(_))
        ));
        assert!(matches!(
            "transfer 10".parse::<Operation>(),
            Err(Error::Validation(_))
        ));
        assert!(matches!("".parse::<Operation>(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_parse_unicode_separators() {
        let expected = Operation::Deposit(Decimal::new(5, 0));
        assert_eq!("deposit\u{00A0}5".parse::<Operation>().unwrap(), expected);
        assert_eq!("deposit\u{3000}5".parse::<Operation>().unwrap(), expected);
        assert_eq!(
            "withdraw\u{2003}\u{00A0}0.5".parse::<Operation>().unwrap(),
            Operation::Withdraw(Decimal::new(5, 1))
        );
        assert!(matches!(
            "d\u{00E9}p\u{00F4}t\u{00A0}5".parse::<Operation>(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_amount_beyond_decimal_range() {
        assert!(matches!(
            "deposit 79228162514264337593543950336".parse::<Operation>(),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_negative_amount_parses() {
        let op: Operation = "deposit -5".parse().unwrap();
        assert_eq!(op, Operation::Deposit(Decimal::new(-5, 0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::Withdraw(Decimal::new(500, 0)).to_string(), "withdraw 500");
        assert_eq!(Operation::Balance.to_string(), "balance");
    }
}
