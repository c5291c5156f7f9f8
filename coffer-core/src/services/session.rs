//! Session service - drives a ledger through a sequence of operations

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::Operation;
use crate::ports::Ledger;
use crate::services::logging::{LogEvent, LoggingService};

/// Why a step was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    InsufficientFunds,
    /// The resulting balance would not fit in a `Decimal`
    OutOfRange,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::InsufficientFunds => "insufficient funds",
            Rejection::OutOfRange => "amount out of range",
        }
    }
}

/// Outcome of a single operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub operation: Operation,
    /// False when the step was rejected (see `rejection`)
    pub accepted: bool,
    /// Balance after the step
    pub balance: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Outcome of a whole session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub steps: Vec<StepOutcome>,
    pub final_balance: Decimal,
    pub rejected: usize,
}

/// Applies operations to a caller-owned ledger
///
/// Events are written to the optional logger. Logging failures never affect
/// the ledger, and amounts are never logged.
pub struct SessionService<'a, L: Ledger> {
    ledger: L,
    logger: Option<&'a LoggingService>,
}

impl<'a, L: Ledger> SessionService<'a, L> {
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Option<&'a LoggingService>) -> Self {
        self.logger = logger;
        self
    }

    fn log(&self, event: LogEvent) {
        if let Some(logger) = self.logger {
            let _ = logger.log(event.with_command("session"));
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Record the start of a session
    ///
    /// [`SessionService::run`] calls this itself. Callers that drive
    /// [`SessionService::apply`] one step at a time call it before the first step.
    pub fn start(&self) {
        self.log(LogEvent::new("session_started"));
    }

    /// Record the end of a session started with [`SessionService::start`]
    pub fn finish(&self) {
        self.log(LogEvent::new("session_finished"));
    }

    /// Apply one operation
    ///
    /// Steps whose result would leave the `Decimal` range are rejected with
    /// [`Rejection::OutOfRange`] and leave the ledger untouched.
    pub fn apply(&mut self, operation: Operation) -> StepOutcome {
        let mut warning = None;
        let balance = self.ledger.check_balance();

        let rejection = match operation {
            Operation::Deposit(amount) => {
                if balance.checked_add(amount).is_none() {
                    self.log(
                        LogEvent::new("deposit_rejected").with_error(Rejection::OutOfRange.as_str()),
                    );
                    Some(Rejection::OutOfRange)
                } else {
                    if amount.is_sign_negative() && !amount.is_zero() {
                        warning = Some(format!(
                            "negative deposit of {} lowers the balance without the withdrawal guard",
                            amount
                        ));
                        self.log(LogEvent::new("negative_deposit"));
                    }
                    self.ledger.deposit(amount);
                    self.log(LogEvent::new("deposit_applied"));
                    None
                }
            }
            Operation::Withdraw(amount) => {
                let rejection = if balance < amount {
                    Some(Rejection::InsufficientFunds)
                } else if balance.checked_sub(amount).is_none() {
                    Some(Rejection::OutOfRange)
                } else if !self.ledger.withdraw(amount) {
                    Some(Rejection::InsufficientFunds)
                } else {
                    None
                };
                match rejection {
                    None => self.log(LogEvent::new("withdraw_applied")),
                    Some(reason) => {
                        self.log(LogEvent::new("withdraw_rejected").with_error(reason.as_str()))
                    }
                }
                rejection
            }
            Operation::Balance => None,
        };

        StepOutcome {
            operation,
            accepted: rejection.is_none(),
            balance: self.ledger.check_balance(),
            rejection,
            warning,
        }
    }

    /// Apply every operation in order; rejected steps do not stop the run
    pub fn run<I>(&mut self, operations: I) -> SessionSummary
    where
        I: IntoIterator<Item = Operation>,
    {
        self.start();

        let steps: Vec<StepOutcome> = operations.into_iter().map(|op| self.apply(op)).collect();
        let rejected = steps.iter().filter(|s| !s.accepted).count();

        self.finish();

        SessionSummary {
            steps,
            final_balance: self.ledger.check_balance(),
            rejected,
        }
    }

    /// Withdraw, turning a rejection into an error
    ///
    /// Returns the balance after the withdrawal. An overdraft gives
    /// [`Error::InsufficientFunds`]; a result outside the `Decimal` range gives
    /// [`Error::InvalidAmount`].
    pub fn withdraw_or_err(&mut self, amount: Decimal) -> Result<Decimal> {
        let available = self.ledger.check_balance();
        let step = self.apply(Operation::Withdraw(amount));
        match step.rejection {
            None => Ok(step.balance),
            Some(Rejection::InsufficientFunds) => Err(Error::insufficient_funds(amount, available)),
            Some(Rejection::OutOfRange) => Err(Error::invalid_amount(format!(
                "withdrawing {} leaves the representable range",
                amount
            ))),
        }
    }
}

/// Parse operation lines, skipping blanks and `#` comments
pub fn parse_operations<'s, I>(lines: I) -> Result<Vec<Operation>>
where
    I: IntoIterator<Item = &'s str>,
{
    lines
        .into_iter()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.parse::<Operation>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Account;
    use crate::services::logging::EntryPoint;
    use tempfile::tempdir;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_apply_reports_balance_after_step() {
        let mut session = SessionService::new(Account::new());

        let step = session.apply(Operation::Deposit(dec("1000")));
        assert!(step.accepted);
        assert_eq!(step.balance, dec("1000"));

        let step = session.apply(Operation::Withdraw(dec("1000.01")));
        assert!(!step.accepted);
        assert_eq!(step.rejection, Some(Rejection::InsufficientFunds));
        assert_eq!(step.balance, dec("1000"));
    }

    #[test]
    fn test_deposit_past_max_is_rejected() {
        let mut session = SessionService::new(Account::new());
        assert!(session.apply(Operation::Deposit(Decimal::MAX)).accepted);

        let step = session.apply(Operation::Deposit(Decimal::ONE));
        assert!(!step.accepted);
        assert_eq!(step.rejection, Some(Rejection::OutOfRange));
        assert_eq!(step.balance, Decimal::MAX);

        // the session keeps going
        let step = session.apply(Operation::Withdraw(Decimal::ONE));
        assert!(step.accepted);
        assert_eq!(step.balance, Decimal::MAX - Decimal::ONE);
    }

    #[test]
    fn test_negative_withdraw_past_max_is_rejected() {
        let mut session = SessionService::new(Account::new());
        session.apply(Operation::Deposit(Decimal::MAX));

        let step = session.apply(Operation::Withdraw(-Decimal::MAX));
        assert_eq!(step.rejection, Some(Rejection::OutOfRange));
        assert_eq!(step.balance, Decimal::MAX);

        assert!(matches!(
            session.withdraw_or_err(-Decimal::MAX),
            Err(Error::InvalidAmount(_))
        ));

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["rejection"], "out_of_range");
    }

    #[test]
    fn test_accepted_step_omits_rejection() {
        let mut session = SessionService::new(Account::new());
        let step = session.apply(Operation::Deposit(dec("1")));

        let json = serde_json::to_value(&step).unwrap();
        assert!(json.get("rejection").is_none());
        assert!(json.get("warning").is_none());
    }

    #[test]
    fn test_step_by_step_session_logs_start_and_finish() {
        let dir = tempdir().unwrap();
        let logger = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        let mut session = SessionService::new(Account::new()).with_logger(Some(&logger));
        session.start();
        session.apply(Operation::Deposit(dec("10")));
        session.apply(Operation::Withdraw(dec("50")));
        session.finish();

        // get_recent returns newest first
        let events: Vec<String> = logger
            .get_recent(10)
            .unwrap()
            .into_iter()
            .rev()
            .map(|e| e.event)
            .collect();
        assert_eq!(
            events,
            vec![
                "session_started",
                "deposit_applied",
                "withdraw_rejected",
                "session_finished",
            ]
        );
        assert_eq!(
            logger.get_errors(1).unwrap()[0].error_message.as_deref(),
            Some("insufficient funds")
        );
    }

    #[test]
    fn test_run_counts_rejections() {
        let mut session = SessionService::new(Account::new());
        let summary = session.run(vec![
            Operation::Deposit(dec("1000")),
            Operation::Withdraw(dec("500")),
            Operation::Withdraw(dec("1000")),
            Operation::Balance,
        ]);

        assert_eq!(summary.steps.len(), 4);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.final_balance, dec("500"));
        assert!(!summary.steps[2].accepted);
        assert!(summary.steps[3].accepted);
    }

    #[test]
    fn test_withdraw_or_err() {
        let mut session = SessionService::new(Account::new());
        session.apply(Operation::Deposit(dec("20")));

        assert_eq!(session.withdraw_or_err(dec("5")).unwrap(), dec("15"));

        match session.withdraw_or_err(dec("16")) {
            Err(Error::InsufficientFunds {
                requested,
                available,
            }) => {
                assert_eq!(requested, dec("16"));
                assert_eq!(available, dec("15"));
            }
            other => panic!("expected insufficient funds, got {:?}", other),
        }
        assert_eq!(session.ledger().check_balance(), dec("15"));
    }

    #[test]
    fn test_negative_deposit_is_flagged_not_fixed() {
        let mut session = SessionService::new(Account::new());
        let step = session.apply(Operation::Deposit(dec("-3")));

        assert!(step.accepted);
        assert_eq!(step.balance, dec("-3"));
        assert!(step.warning.unwrap().contains("negative deposit"));
    }

    #[test]
    fn test_borrowed_ledger() {
        let mut account = Account::new();
        {
            let mut session = SessionService::new(&mut account);
            session.apply(Operation::Deposit(dec("7")));
        }
        assert_eq!(account.check_balance(), dec("7"));
    }

    #[test]
    fn test_parse_operations_skips_comments() {
        let ops = parse_operations("# opening\ndeposit 10\n\nwithdraw 2\nbalance".lines()).unwrap();
        assert_eq!(
            ops,
            vec![
                Operation::Deposit(dec("10")),
                Operation::Withdraw(dec("2")),
                Operation::Balance,
            ]
        );

        assert!(parse_operations(["deposit 1", "bogus"]).is_err());
    }
}
