//! Session command - run operations against a fresh account

use std::io::Read;

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Input;
use serde::Serialize;

use coffer_core::services::{parse_operations, SessionService, StepOutcome};
use coffer_core::{Account, AccountView, CofferContext, Ledger, LogEvent, Operation};

use super::get_context;
use crate::output;

#[derive(Serialize)]
struct SessionOutput<'a> {
    account: AccountView,
    steps: &'a [StepOutcome],
    rejected: usize,
}

pub fn run(ops: Vec<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    ctx.log(LogEvent::new("command_executed").with_command("session"));

    if ops.is_empty() && atty::is(atty::Stream::Stdin) {
        if json {
            anyhow::bail!("Interactive sessions do not support --json; pass operations instead");
        }
        return run_interactive(&ctx);
    }

    let operations = if ops.is_empty() {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read operations from stdin")?;
        parse_operations(buffer.lines())
    } else {
        parse_operations(ops.iter().map(String::as_str))
    };
    let operations = operations.map_err(|e| {
        log_parse_failure(&ctx);
        e
    })?;

    let mut account = Account::new();
    let summary = ctx.session(&mut account).run(operations);

    if json {
        let out = SessionOutput {
            account: account.view(),
            steps: &summary.steps,
            rejected: summary.rejected,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for step in &summary.steps {
        print_step(&ctx, step);
    }

    if summary.rejected > 0 {
        println!("{} operation(s) rejected", summary.rejected);
    }

    Ok(())
}

fn run_interactive(ctx: &CofferContext) -> Result<()> {
    println!("{}", "New account opened with a zero balance".bold());
    println!("Enter deposit AMOUNT, withdraw AMOUNT or balance; quit to finish.");

    let mut session = ctx.session(Account::new());
    session.start();
    let result = prompt_loop(ctx, &mut session);
    session.finish();
    result?;

    let balance = session.ledger().check_balance();
    println!("Final balance: {}", format_amount(ctx, balance));
    Ok(())
}

fn prompt_loop<L: Ledger>(ctx: &CofferContext, session: &mut SessionService<'_, L>) -> Result<()> {
    loop {
        let line: String = Input::new()
            .with_prompt("coffer")
            .allow_empty(true)
            .interact_text()?;

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            return Ok(());
        }

        match line.parse::<Operation>() {
            Ok(op) => {
                let step = session.apply(op);
                print_step(ctx, &step);
            }
            Err(e) => {
                log_parse_failure(ctx);
                output::error(&e.to_string());
            }
        }
    }
}

/// Input text is not logged; it may carry amounts
fn log_parse_failure(ctx: &CofferContext) {
    if let Some(logger) = &ctx.logger {
        let _ = logger.log_error("operation_parse_failed", "invalid operation", Some("session"));
    }
}

fn format_amount(ctx: &CofferContext, amount: rust_decimal::Decimal) -> String {
    format!("{} {}", ctx.format_balance(amount), ctx.config.currency)
}

fn print_step(ctx: &CofferContext, step: &StepOutcome) {
    if let Some(warning) = &step.warning {
        output::warning(&format!("warning: {}", warning));
    }

    let balance = format_amount(ctx, step.balance);
    if step.accepted {
        println!("{:<24} {}", step.operation.to_string(), balance.green());
    } else {
        let reason = step.rejection.map(|r| r.as_str()).unwrap_or("rejected");
        println!(
            "{:<24} {} (balance {})",
            step.operation.to_string(),
            format!("rejected: {}", reason).red(),
            balance
        );
    }
}
