//! Account domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::ports::Ledger;

/// A single balance-holding account
///
/// The balance is private to this module. It starts at zero and changes only
/// through [`Account::deposit`] and [`Account::withdraw`]. Withdrawals that
/// would overdraw are rejected, so the balance stays non-negative as long as
/// deposits are non-negative.
///
/// Note: deposits are not validated. A negative deposit lowers the balance
/// without going through the withdrawal guard; callers that care should
/// check the amount (see `SessionService`, which flags it).
#[derive(Debug, Clone)]
pub struct Account {
    id: Uuid,
    balance: Decimal,
    opened_at: DateTime<Utc>,
}

/// Read-only snapshot of an account (for JSON output)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountView {
    pub id: Uuid,
    pub balance: Decimal,
    pub opened_at: DateTime<Utc>,
}

impl Account {
    /// Open a new account with a zero balance
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            balance: Decimal::ZERO,
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Add `amount` to the balance
    ///
    /// # Panics
    ///
    /// Panics if the sum leaves the `Decimal` range. Use
    /// [`Account::can_deposit`] first when the amount comes from user input.
    pub fn deposit(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    /// Whether a deposit of `amount` stays within the representable range
    pub fn can_deposit(&self, amount: Decimal) -> bool {
        self.balance.checked_add(amount).is_some()
    }

    /// Subtract `amount` if the balance covers it
    ///
    /// Returns false and leaves the balance untouched otherwise. The boundary
    /// is inclusive: withdrawing the whole balance succeeds.
    pub fn withdraw(&mut self, amount: Decimal) -> bool {
        if !self.can_withdraw(amount) {
            return false;
        }
        match self.balance.checked_sub(amount) {
            Some(rest) => {
                self.balance = rest;
                true
            }
            // only reachable with a negative amount
            None => false,
        }
    }

    /// Current balance
    pub fn check_balance(&self) -> Decimal {
        self.balance
    }

    /// Whether a withdrawal of `amount` would be accepted
    pub fn can_withdraw(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            balance: self.balance,
            opened_at: self.opened_at,
        }
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for Account {
    fn deposit(&mut self, amount: Decimal) {
        Account::deposit(self, amount)
    }

    fn withdraw(&mut self, amount: Decimal) -> bool {
        Account::withdraw(self, amount)
    }

    fn check_balance(&self) -> Decimal {
        Account::check_balance(self)
    }
}
