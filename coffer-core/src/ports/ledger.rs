//! Ledger port - balance-holding abstraction

use rust_decimal::Decimal;

/// Anything that holds a balance and mediates every change to it
///
/// Implementations keep the balance private; this operation set is the only
/// way to read or change it.
pub trait Ledger {
    /// Add `amount` to the balance
    fn deposit(&mut self, amount: Decimal);

    /// Subtract `amount` if covered; false leaves the balance unchanged
    fn withdraw(&mut self, amount: Decimal) -> bool;

    /// Current balance
    fn check_balance(&self) -> Decimal;
}

impl<L: Ledger + ?Sized> Ledger for &mut L {
    fn deposit(&mut self, amount: Decimal) {
        (**self).deposit(amount)
    }

    fn withdraw(&mut self, amount: Decimal) -> bool {
        (**self).withdraw(amount)
    }

    fn check_balance(&self) -> Decimal {
        (**self).check_balance()
    }
}
