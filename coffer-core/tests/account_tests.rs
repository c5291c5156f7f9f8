//! Integration tests for the account and session services
//!
//! Covers the balance invariants and the reference deposit/withdraw
//! scenarios, plus the context wiring against a real logs database.
//!
//! Run with: cargo test --test account_tests -- --nocapture

use rust_decimal::Decimal;
use tempfile::TempDir;

use coffer_core::config::Config;
use coffer_core::services::{parse_operations, LoggingService, Rejection};
use coffer_core::{Account, CofferContext, EntryPoint, Error, Ledger, Operation};

// ============================================================================
// Test Helpers
// ============================================================================

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Deterministic pseudo-random amounts in cents (linear congruential)
struct Amounts(u64);

impl Amounts {
    fn next_cents(&mut self, max: u64) -> Decimal {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        Decimal::new(((self.0 >> 33) % max) as i64, 2)
    }
}

fn context_in(temp_dir: &TempDir) -> CofferContext {
    CofferContext::new(temp_dir.path(), EntryPoint::Library, "test")
        .expect("Failed to create context")
}

/// Context with logging on regardless of COFFER_LOGGING
fn logging_context_in(temp_dir: &TempDir) -> CofferContext {
    let config = Config {
        logging_enabled: true,
        ..Config::default()
    };
    CofferContext::with_config(temp_dir.path(), config, EntryPoint::Library, "test")
}

// ============================================================================
// Reference Scenarios
// ============================================================================

#[test]
fn test_scenarios_one_to_three() {
    let mut account = Account::new();

    // 1: deposit 1000
    account.deposit(dec("1000"));
    assert_eq!(account.check_balance(), dec("1000.0"));

    // 2: withdraw 500 succeeds
    assert!(account.withdraw(dec("500")));
    assert_eq!(account.check_balance(), dec("500.0"));

    // 3: withdraw 1000 fails, 500 < 1000
    assert!(!account.withdraw(dec("1000")));
    assert_eq!(account.check_balance(), dec("500.0"));
}

#[test]
fn test_scenario_four_withdraw_from_new_account() {
    let mut account = Account::new();
    assert!(!account.withdraw(dec("0.01")));
    assert_eq!(account.check_balance(), dec("0.0"));
}

// ============================================================================
// Invariants
// ============================================================================

/// Balance stays non-negative across arbitrary deposit/withdraw sequences
#[test]
fn test_balance_never_negative() {
    for seed in 1..=20u64 {
        let mut amounts = Amounts(seed);
        let mut account = Account::new();

        for step in 0..200 {
            let amount = amounts.next_cents(50_000);
            if step % 3 == 0 {
                account.deposit(amount);
            } else {
                let before = account.check_balance();
                let accepted = account.withdraw(amount);
                assert_eq!(accepted, before >= amount);
                if !accepted {
                    assert_eq!(account.check_balance(), before);
                }
            }
            assert!(
                account.check_balance() >= Decimal::ZERO,
                "seed {} step {} went negative",
                seed,
                step
            );
        }
    }
}

#[test]
fn test_read_is_idempotent() {
    let mut account = Account::new();
    account.deposit(dec("99.99"));
    account.withdraw(dec("0.99"));

    assert_eq!(account.check_balance(), account.check_balance());
}

#[test]
fn test_withdraw_boundary_and_over_limit() {
    let mut account = Account::new();
    account.deposit(dec("300"));

    assert!(!account.withdraw(dec("300.01")));
    assert_eq!(account.check_balance(), dec("300"));

    assert!(account.withdraw(dec("300")));
    assert_eq!(account.check_balance(), Decimal::ZERO);
}

/// Drives the account only through the trait, the way services do
#[test]
fn test_account_through_ledger_trait() {
    fn drive(ledger: &mut dyn Ledger) -> (bool, Decimal) {
        ledger.deposit(Decimal::new(40, 0));
        let ok = ledger.withdraw(Decimal::new(41, 0));
        (ok, ledger.check_balance())
    }

    let mut account = Account::new();
    assert_eq!(drive(&mut account), (false, Decimal::new(40, 0)));
}

// ============================================================================
// Sessions
// ============================================================================

#[test]
fn test_session_script_matches_scenarios() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context_in(&temp_dir);

    let ops = parse_operations(
        "deposit 1000\nwithdraw 500\nwithdraw 1000\nbalance".lines(),
    )
    .unwrap();

    let mut account = Account::new();
    let summary = ctx.session(&mut account).run(ops);

    let balances: Vec<String> = summary
        .steps
        .iter()
        .map(|s| ctx.format_balance(s.balance))
        .collect();
    assert_eq!(balances, vec!["1000.0", "500.0", "500.0", "500.0"]);
    assert_eq!(summary.rejected, 1);
    assert_eq!(account.check_balance(), dec("500"));
}

#[test]
fn test_session_logs_events_without_amounts() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = logging_context_in(&temp_dir);
    assert!(ctx.logger.is_some());

    let mut session = ctx.session(Account::new());
    session.run(vec![
        Operation::Deposit(dec("12.34")),
        Operation::Withdraw(dec("56.78")),
    ]);
    drop(session);
    drop(ctx);

    let logger = LoggingService::new(temp_dir.path(), EntryPoint::Library, "test").unwrap();
    let entries = logger.get_recent(50).unwrap();
    let events: Vec<&str> = entries.iter().map(|e| e.event.as_str()).collect();

    assert!(events.contains(&"session_started"));
    assert!(events.contains(&"deposit_applied"));
    assert!(events.contains(&"withdraw_rejected"));
    assert!(events.contains(&"session_finished"));

    for entry in &entries {
        let dump = serde_json::to_string(entry).unwrap();
        assert!(!dump.contains("12.34"));
        assert!(!dump.contains("56.78"));
    }

    let errors = logger.get_errors(10).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].event, "withdraw_rejected");
}

#[test]
fn test_insufficient_funds_error_is_recoverable() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context_in(&temp_dir);
    let mut session = ctx.session(Account::new());

    let err = session.withdraw_or_err(dec("0.01")).unwrap_err();
    assert!(err.is_insufficient_funds());
    assert!(matches!(err, Error::InsufficientFunds { .. }));

    session.apply(Operation::Deposit(dec("0.01")));
    assert_eq!(session.withdraw_or_err(dec("0.01")).unwrap(), Decimal::ZERO);
}

#[test]
fn test_out_of_range_steps_do_not_end_the_session() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context_in(&temp_dir);

    let ops = parse_operations(
        ["deposit:79228162514264337593543950335", "deposit:1", "withdraw 5"],
    )
    .unwrap();

    let mut account = Account::new();
    let summary = ctx.session(&mut account).run(ops);

    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.steps[1].rejection, Some(Rejection::OutOfRange));
    assert_eq!(account.check_balance(), Decimal::MAX - dec("5"));
}

#[test]
fn test_context_without_logging() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        logging_enabled: false,
        ..Config::default()
    };
    let ctx = CofferContext::with_config(temp_dir.path(), config, EntryPoint::Library, "test");

    assert!(ctx.logger.is_none());
    ctx.session(Account::new()).run(vec![Operation::Deposit(dec("1"))]);
    assert!(!temp_dir.path().join("logs.duckdb").exists());
}
