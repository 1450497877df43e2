//! Command-line interface
//!
//! One action per invocation. Every card action is turned into the same core
//! call the replay uses, and results are written to the given output.

mod args;

pub use args::{CliArgs, Command, OutputFormat};

use crate::core::{AccountOperations, Role};
use crate::io::{write_cards_csv, write_transactions_csv};
use crate::replay;
use crate::seed;
use crate::types::{CampusError, Card, Describe, Operation, Transaction};
use chrono::NaiveDate;
use clap::Parser;
use std::io::Write;

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the message and exits.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Run the parsed command against the configured store
///
/// `today` dates money transactions and is the default lecture date.
///
/// # Errors
///
/// Returns the error of the failed operation; nothing is written to the
/// store for a failed card action.
pub fn run(args: &CliArgs, output: &mut dyn Write, today: NaiveDate) -> Result<(), CampusError> {
    let operations = args.to_store_config().open()?;
    run_command(&operations, &args.command, output, today)
}

/// Run one command against already opened operations
pub fn run_command(
    operations: &AccountOperations,
    command: &Command,
    output: &mut dyn Write,
    today: NaiveDate,
) -> Result<(), CampusError> {
    match command {
        Command::Seed => {
            if seed::seed_demo_data(operations)? {
                writeln!(output, "Demo data written")?;
            } else {
                writeln!(output, "Store already holds data; nothing seeded")?;
            }
        }
        Command::Issue {
            card_number,
            card_type,
            owner_id,
        } => {
            let operation = Operation::Issue {
                card_number: card_number.clone(),
                card_type: *card_type,
                owner_id: owner_id.clone(),
            };
            writeln!(output, "{}", operations.execute(operation, today)?.describe())?;
        }
        Command::Block { card_number } => {
            let operation = Operation::Block {
                card_number: card_number.clone(),
            };
            writeln!(output, "{}", operations.execute(operation, today)?.describe())?;
        }
        Command::Unblock { card_number } => {
            let operation = Operation::Unblock {
                card_number: card_number.clone(),
            };
            writeln!(output, "{}", operations.execute(operation, today)?.describe())?;
        }
        Command::Cards { status, format } => {
            let mut cards = operations.ledger().all_sorted_by_type()?;
            if let Some(status) = status {
                cards.retain(|card| card.status == *status);
            }
            print_cards(&cards, *format, output)?;
        }
        Command::Transactions { user, format } => {
            let transactions = match user {
                Some(user_id) => operations.log().for_user(user_id)?,
                None => operations.log().all()?,
            };
            print_transactions(&transactions, *format, output)?;
        }
        Command::Login { user_id } => {
            let holder = operations.login(user_id)?;
            let role = holder.role();
            let courses = match role {
                Role::Student(_) => "Registered courses",
                Role::Faculty(_) => "Taught courses",
            };
            writeln!(output, "Welcome {} ({})", role.name(), role.card_type())?;
            writeln!(output, "{}", holder.card().describe())?;
            writeln!(output, "{}: {}", courses, role.courses().join(", "))?;
        }
        Command::Recharge {
            user_id,
            amount,
            transaction_id,
        } => {
            let operation = Operation::Recharge {
                user_id: user_id.clone(),
                amount: *amount,
                transaction_id: transaction_id.clone(),
            };
            writeln!(output, "{}", operations.execute(operation, today)?.describe())?;
        }
        Command::Cafeteria {
            user_id,
            items,
            transaction_id,
        } => {
            let operation = Operation::Cafeteria {
                user_id: user_id.clone(),
                items: items.clone(),
                transaction_id: transaction_id.clone(),
            };
            writeln!(output, "{}", operations.execute(operation, today)?.describe())?;
        }
        Command::Bus {
            user_id,
            track,
            transaction_id,
        } => {
            let operation = Operation::Bus {
                user_id: user_id.clone(),
                track: track.clone(),
                transaction_id: transaction_id.clone(),
            };
            writeln!(output, "{}", operations.execute(operation, today)?.describe())?;
        }
        Command::Parking {
            user_id,
            hours,
            transaction_id,
        } => {
            let operation = Operation::Parking {
                user_id: user_id.clone(),
                hours: *hours,
                transaction_id: transaction_id.clone(),
            };
            writeln!(output, "{}", operations.execute(operation, today)?.describe())?;
        }
        Command::Attend {
            user_id,
            course_id,
            date,
            transaction_id,
        } => {
            let operation = Operation::Attendance {
                user_id: user_id.clone(),
                course_id: course_id.clone(),
                date: date.unwrap_or(today),
                transaction_id: transaction_id.clone(),
            };
            writeln!(output, "{}", operations.execute(operation, today)?.describe())?;
        }
        Command::Report {
            user_id,
            course_id,
            date,
        } => {
            let date = date.unwrap_or(today);
            let attendees = operations
                .login(user_id)?
                .attendance_report(course_id, date)?;
            if attendees.is_empty() {
                writeln!(output, "No attendance recorded for {} on {}", course_id, date)?;
            } else {
                writeln!(output, "Attendance for {} on {}:", course_id, date)?;
                for attendee in attendees {
                    writeln!(output, "{}", attendee)?;
                }
            }
        }
        Command::History { user_id } => {
            let history = operations.login(user_id)?.history()?;
            print_transactions(&history, OutputFormat::Text, output)?;
        }
        Command::Replay { input_file } => {
            let report = replay::replay_file(operations, input_file, today)?;
            writeln!(
                output,
                "Applied: {} | Rejected: {} | Malformed: {}",
                report.applied, report.rejected, report.malformed
            )?;
        }
    }
    Ok(())
}

fn print_cards(cards: &[Card], format: OutputFormat, output: &mut dyn Write) -> Result<(), CampusError> {
    match format {
        OutputFormat::Csv => write_cards_csv(cards, output),
        OutputFormat::Text if cards.is_empty() => {
            writeln!(output, "No cards")?;
            Ok(())
        }
        OutputFormat::Text => {
            for card in cards {
                writeln!(output, "{}", card.describe())?;
            }
            Ok(())
        }
    }
}

fn print_transactions(
    transactions: &[Transaction],
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), CampusError> {
    match format {
        OutputFormat::Csv => write_transactions_csv(transactions, output),
        OutputFormat::Text if transactions.is_empty() => {
            writeln!(output, "No transactions")?;
            Ok(())
        }
        OutputFormat::Text => {
            for transaction in transactions {
                writeln!(output, "{}", transaction.describe())?;
            }
            Ok(())
        }
    }
}
