//! CSV format handling for replay rows and record exports
//!
//! This module centralizes all CSV format concerns, providing:
//! - `OperationRow` structure for deserializing replay files
//! - Conversion from replay rows to [`Operation`]s
//! - Card and transaction export serialization
//!
//! All functions are pure (no file access) for easy testing.
//!
//! # Replay format
//!
//! Header `action,user,value,course,date,tx`. The meaning of `value` depends
//! on the action:
//!
//! | action    | user   | value            | course | date       | tx  |
//! |-----------|--------|------------------|--------|------------|-----|
//! | issue     | owner  | `<card>:<type>`  |        |            |     |
//! | block     |        | card number      |        |            |     |
//! | unblock   |        | card number      |        |            |     |
//! | recharge  | holder | amount           |        |            | id  |
//! | cafeteria | holder | `1;5;5`          |        |            | id  |
//! | bus       | holder | track            |        |            | id  |
//! | parking   | holder | hours            |        |            | id  |
//! | attend    | holder |                  | course | yyyy-mm-dd | id  |

use crate::types::describe::two_decimals;
use crate::types::{CampusError, Card, CardType, Operation, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// One row of a replay file
///
/// Every column except `action` may be empty; which ones are required
/// depends on the action.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct OperationRow {
    pub action: String,
    pub user: Option<String>,
    pub value: Option<String>,
    pub course: Option<String>,
    pub date: Option<String>,
    pub tx: Option<String>,
}

/// Convert a replay row to an [`Operation`]
///
/// Only the shape of the row is checked here: required columns present,
/// numbers and dates parseable. Business rules (card exists, balance
/// sufficient, ...) are left to `AccountOperations::execute`. A missing
/// transaction ID is passed through empty and rejected when the
/// transaction is logged.
///
/// # Returns
///
/// * `Ok(Operation)` - Successfully converted row
/// * `Err(String)` - Description of what is wrong with the row
pub fn convert_operation_row(row: OperationRow) -> Result<Operation, String> {
    let action = row.action.trim().to_lowercase();
    let transaction_id = non_empty(&row.tx).unwrap_or_default().to_string();

    match action.as_str() {
        "issue" => {
            let owner_id = required(&row.user, "user", &action)?;
            let value = required(&row.value, "value", &action)?;
            let (card_number, card_type) = value
                .split_once(':')
                .ok_or_else(|| format!("Issue value '{}' must be <card>:<type>", value))?;
            let card_number = card_number.trim();
            if card_number.is_empty() {
                return Err(format!("Issue value '{}' has no card number", value));
            }
            Ok(Operation::Issue {
                card_number: card_number.to_string(),
                card_type: CardType::from_str(card_type)?,
                owner_id: owner_id.to_string(),
            })
        }
        "block" => Ok(Operation::Block {
            card_number: required(&row.value, "value", &action)?.to_string(),
        }),
        "unblock" => Ok(Operation::Unblock {
            card_number: required(&row.value, "value", &action)?.to_string(),
        }),
        "recharge" => {
            let value = required(&row.value, "value", &action)?;
            let amount = Decimal::from_str(value)
                .map_err(|_| format!("Invalid amount '{}' for recharge", value))?;
            Ok(Operation::Recharge {
                user_id: required(&row.user, "user", &action)?.to_string(),
                amount,
                transaction_id,
            })
        }
        "cafeteria" => {
            let value = required(&row.value, "value", &action)?;
            let items = parse_items(value)?;
            Ok(Operation::Cafeteria {
                user_id: required(&row.user, "user", &action)?.to_string(),
                items,
                transaction_id,
            })
        }
        "bus" => Ok(Operation::Bus {
            user_id: required(&row.user, "user", &action)?.to_string(),
            track: required(&row.value, "value", &action)?.to_string(),
            transaction_id,
        }),
        "parking" => {
            let value = required(&row.value, "value", &action)?;
            let hours = value
                .parse::<u32>()
                .map_err(|_| format!("Invalid hours '{}' for parking", value))?;
            Ok(Operation::Parking {
                user_id: required(&row.user, "user", &action)?.to_string(),
                hours,
                transaction_id,
            })
        }
        "attend" | "attendance" => {
            let date = required(&row.date, "date", &action)?;
            Ok(Operation::Attendance {
                user_id: required(&row.user, "user", &action)?.to_string(),
                course_id: required(&row.course, "course", &action)?.to_string(),
                date: parse_date(date)?,
                transaction_id,
            })
        }
        _ => Err(format!("Invalid action: '{}'", row.action)),
    }
}

/// Parse a `;`-separated list of cafeteria item numbers
///
/// Empty entries are skipped, so `"1;;2;"` is `[1, 2]`.
pub fn parse_items(value: &str) -> Result<Vec<u32>, String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<u32>()
                .map_err(|_| format!("Invalid cafeteria item '{}'", item))
        })
        .collect()
}

/// Parse an ISO `yyyy-mm-dd` date
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}': expected yyyy-mm-dd", value))
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn required<'a>(field: &'a Option<String>, column: &str, action: &str) -> Result<&'a str, String> {
    non_empty(field).ok_or_else(|| format!("{} requires a '{}' column", action, column))
}

/// Write cards to CSV format
///
/// Columns: cardNumber, cardType, balance, status, ownerId. Balances are
/// written with two decimal places. Cards are written in the order given.
///
/// # Errors
///
/// Returns `Io` if writing to `output` fails.
pub fn write_cards_csv(cards: &[Card], output: &mut dyn Write) -> Result<(), CampusError> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["cardNumber", "cardType", "balance", "status", "ownerId"])
        .map_err(|e| write_error("card header", e))?;

    for card in cards {
        writer
            .write_record([
                card.card_number.as_str(),
                card.card_type.as_str(),
                two_decimals(card.balance).as_str(),
                card.status.as_str(),
                card.owner_id.as_str(),
            ])
            .map_err(|e| write_error("card record", e))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write transactions to CSV format
///
/// Columns: transactionId, cardNumber, type, amount, date, userId. The amount
/// is empty for attendance transactions.
///
/// # Errors
///
/// Returns `Io` if writing to `output` fails.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), CampusError> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["transactionId", "cardNumber", "type", "amount", "date", "userId"])
        .map_err(|e| write_error("transaction header", e))?;

    for tx in transactions {
        writer
            .write_record(&[
                tx.transaction_id.clone(),
                tx.card_number.clone(),
                tx.kind.to_string(),
                tx.amount.map(two_decimals).unwrap_or_default(),
                tx.date.to_string(),
                tx.user_id.clone(),
            ])
            .map_err(|e| write_error("transaction record", e))?;
    }

    writer.flush()?;
    Ok(())
}

fn write_error(what: &str, error: csv::Error) -> CampusError {
    CampusError::Io {
        message: format!("Failed to write CSV {}: {}", what, error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CardStatus, TxMeta};
    use rstest::rstest;

    fn row(action: &str, user: &str, value: &str, course: &str, date: &str, tx: &str) -> OperationRow {
        let field = |s: &str| (!s.is_empty()).then(|| s.to_string());
        OperationRow {
            action: action.to_string(),
            user: field(user),
            value: field(value),
            course: field(course),
            date: field(date),
            tx: field(tx),
        }
    }

    #[test]
    fn test_convert_issue() {
        let operation = convert_operation_row(row("issue", "S01", "50:student", "", "", "")).unwrap();

        assert_eq!(
            operation,
            Operation::Issue {
                card_number: "50".to_string(),
                card_type: CardType::Student,
                owner_id: "S01".to_string(),
            }
        );
    }

    #[test]
    fn test_convert_issue_legacy_faculty_spelling() {
        let operation =
            convert_operation_row(row("issue", "F01", "60:Faculty Member", "", "", "")).unwrap();

        assert!(matches!(
            operation,
            Operation::Issue { card_type: CardType::Faculty, .. }
        ));
    }

    #[rstest]
    #[case::block("block", Operation::Block { card_number: "30".to_string() })]
    #[case::unblock("UNBLOCK", Operation::Unblock { card_number: "30".to_string() })]
    fn test_convert_status_changes(#[case] action: &str, #[case] expected: Operation) {
        assert_eq!(
            convert_operation_row(row(action, "", "30", "", "", "")).unwrap(),
            expected
        );
    }

    #[test]
    fn test_convert_money_actions() {
        assert_eq!(
            convert_operation_row(row("recharge", "S02", "12.50", "", "", "T1")).unwrap(),
            Operation::Recharge {
                user_id: "S02".to_string(),
                amount: Decimal::new(1250, 2),
                transaction_id: "T1".to_string(),
            }
        );
        assert_eq!(
            convert_operation_row(row("cafeteria", "S02", "1;5; 5", "", "", "T2")).unwrap(),
            Operation::Cafeteria {
                user_id: "S02".to_string(),
                items: vec![1, 5, 5],
                transaction_id: "T2".to_string(),
            }
        );
        assert_eq!(
            convert_operation_row(row("bus", "S02", "LIB", "", "", "T3")).unwrap(),
            Operation::Bus {
                user_id: "S02".to_string(),
                track: "LIB".to_string(),
                transaction_id: "T3".to_string(),
            }
        );
        assert_eq!(
            convert_operation_row(row("parking", "F02", "3", "", "", "T4")).unwrap(),
            Operation::Parking {
                user_id: "F02".to_string(),
                hours: 3,
                transaction_id: "T4".to_string(),
            }
        );
    }

    #[test]
    fn test_convert_attend() {
        let operation =
            convert_operation_row(row("attend", "S04", "", "CPE100", "2024-01-10", "A1")).unwrap();

        assert_eq!(
            operation,
            Operation::Attendance {
                user_id: "S04".to_string(),
                course_id: "CPE100".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                transaction_id: "A1".to_string(),
            }
        );
    }

    #[test]
    fn test_convert_missing_tx_passes_through_empty() {
        let operation = convert_operation_row(row("recharge", "S02", "5", "", "", "")).unwrap();
        assert!(matches!(operation, Operation::Recharge { ref transaction_id, .. } if transaction_id.is_empty()));
    }

    #[rstest]
    #[case::unknown_action(row("refund", "S01", "5", "", "", "T1"), "Invalid action")]
    #[case::issue_without_type(row("issue", "S01", "50", "", "", ""), "must be <card>:<type>")]
    #[case::issue_bad_type(row("issue", "S01", "50:staff", "", "", ""), "Invalid card type")]
    #[case::issue_without_number(row("issue", "S01", ":student", "", "", ""), "no card number")]
    #[case::block_without_card(row("block", "", "", "", "", ""), "requires a 'value' column")]
    #[case::recharge_bad_amount(row("recharge", "S01", "ten", "", "", "T1"), "Invalid amount")]
    #[case::recharge_without_user(row("recharge", "", "10", "", "", "T1"), "requires a 'user' column")]
    #[case::cafeteria_bad_item(row("cafeteria", "S01", "1;x", "", "", "T1"), "Invalid cafeteria item")]
    #[case::parking_negative(row("parking", "F01", "-2", "", "", "T1"), "Invalid hours")]
    #[case::attend_bad_date(row("attend", "S01", "", "CPE100", "10/01/2024", "T1"), "Invalid date")]
    #[case::attend_without_course(row("attend", "S01", "", "", "2024-01-10", "T1"), "requires a 'course' column")]
    fn test_convert_errors(#[case] input: OperationRow, #[case] expected_error: &str) {
        let result = convert_operation_row(input);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains(expected_error));
    }

    #[test]
    fn test_write_cards_csv() {
        let mut blocked = Card::issued("30", CardType::Student, "S03");
        blocked.status = CardStatus::Blocked;
        blocked.balance = Decimal::new(9505, 2);
        let cards = vec![Card::issued("10", CardType::Faculty, "F02"), blocked];

        let mut output = Vec::new();
        write_cards_csv(&cards, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "cardNumber,cardType,balance,status,ownerId\n\
             10,faculty,50.00,unblocked,F02\n\
             30,student,95.05,blocked,S03\n"
        );
    }

    #[test]
    fn test_write_cards_csv_empty() {
        let mut output = Vec::new();
        write_cards_csv(&[], &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "cardNumber,cardType,balance,status,ownerId\n"
        );
    }

    #[test]
    fn test_write_transactions_csv() {
        let card = Card::issued("20", CardType::Student, "S02");
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let transactions = vec![
            Transaction::attendance("A1", &card, day),
            Transaction::payment(&TxMeta::new("P1", day), &card, Decimal::from(12)),
        ];

        let mut output = Vec::new();
        write_transactions_csv(&transactions, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "transactionId,cardNumber,type,amount,date,userId\n\
             A1,20,attendance,,2024-01-10,S02\n\
             P1,20,payment,12.00,2024-01-10,S02\n"
        );
    }
}
