//! End-to-end integration tests
//!
//! These tests drive the CLI entry point against a file-backed store in a
//! temporary data directory. Each test:
//! 1. Seeds the demo data
//! 2. Replays operations.csv from a fixture directory
//! 3. Exports cards and transactions as CSV
//! 4. Compares the exports with expected_cards.csv and expected_transactions.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path payments, recharges and attendance
//! - Blocked and unblocked cards
//! - Insufficient balance
//! - Issuance rules and role checks
//! - Malformed rows

#[cfg(test)]
mod tests {
    use campus_card::cli::{self, CliArgs};
    use chrono::NaiveDate;
    use clap::Parser;
    use rstest::rstest;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    /// Run one CLI invocation against `data_dir` and return its stdout
    fn run_cli(data_dir: &Path, args: &[&str]) -> String {
        let mut argv = vec!["campus-card", "--data-dir", data_dir.to_str().unwrap()];
        argv.extend_from_slice(args);
        let parsed = CliArgs::try_parse_from(argv).unwrap();

        let mut output: Vec<u8> = Vec::new();
        cli::run(&parsed, &mut output, today())
            .unwrap_or_else(|e| panic!("Command {:?} failed: {}", args, e));
        String::from_utf8(output).unwrap()
    }

    fn read_fixture(path: &str) -> String {
        fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
    }

    /// Replay a fixture on top of the demo data and compare the exports
    fn run_test_fixture(fixture_name: &str, expected_report: &str) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let operations_path = format!("{}/operations.csv", fixture_dir);
        assert!(
            Path::new(&operations_path).exists(),
            "Operations file not found: {}",
            operations_path
        );

        let data_dir = TempDir::new().expect("Failed to create data dir");

        assert_eq!(run_cli(data_dir.path(), &["seed"]), "Demo data written\n");
        let report = run_cli(data_dir.path(), &["replay", &operations_path]);
        let cards = run_cli(data_dir.path(), &["cards", "--format", "csv"]);
        let transactions = run_cli(data_dir.path(), &["transactions", "--format", "csv"]);

        assert_eq!(report.trim_end(), expected_report, "replay report for {}", fixture_name);

        let expected_cards = read_fixture(&format!("{}/expected_cards.csv", fixture_dir));
        assert_eq!(
            cards, expected_cards,
            "\n\nCard mismatch for fixture: {}\n\nActual:\n{}\n\nExpected:\n{}\n",
            fixture_name, cards, expected_cards
        );

        let expected_transactions =
            read_fixture(&format!("{}/expected_transactions.csv", fixture_dir));
        assert_eq!(
            transactions, expected_transactions,
            "\n\nTransaction mismatch for fixture: {}\n\nActual:\n{}\n\nExpected:\n{}\n",
            fixture_name, transactions, expected_transactions
        );
    }

    #[rstest]
    #[case("happy_path", "Applied: 5 | Rejected: 0 | Malformed: 0")]
    #[case("blocked_cards", "Applied: 4 | Rejected: 2 | Malformed: 0")]
    #[case("insufficient_balance", "Applied: 4 | Rejected: 2 | Malformed: 0")]
    #[case("issuance_and_roles", "Applied: 5 | Rejected: 8 | Malformed: 0")]
    #[case("malformed_rows", "Applied: 1 | Rejected: 3 | Malformed: 4")]
    fn test_fixtures(#[case] fixture: &str, #[case] expected_report: &str) {
        run_test_fixture(fixture, expected_report);
    }

    #[test]
    fn test_seed_runs_once() {
        let data_dir = TempDir::new().unwrap();

        run_cli(data_dir.path(), &["seed"]);
        let second = run_cli(data_dir.path(), &["seed"]);

        assert_eq!(second, "Store already holds data; nothing seeded\n");
    }

    #[test]
    fn test_state_persists_across_invocations() {
        let data_dir = TempDir::new().unwrap();
        run_cli(data_dir.path(), &["seed"]);

        run_cli(data_dir.path(), &["recharge", "S04", "40", "--tx", "R1"]);
        run_cli(data_dir.path(), &["block", "40"]);
        let listing = run_cli(data_dir.path(), &["cards", "--status", "blocked"]);

        assert_eq!(
            listing,
            "Card #30 | Type: student | Balance: 95.00 JD | Status: blocked | User: S03\n\
             Card #40 | Type: student | Balance: 200.00 JD | Status: blocked | User: S04\n"
        );

        let stored = fs::read_to_string(data_dir.path().join("cards.json")).unwrap();
        assert!(stored.contains("\"cardNumber\": \"40\""));
        assert!(stored.contains("\"status\": \"blocked\""));
    }

    #[test]
    fn test_failed_action_is_an_error() {
        let data_dir = TempDir::new().unwrap();
        run_cli(data_dir.path(), &["seed"]);

        let parsed = CliArgs::try_parse_from([
            "campus-card",
            "--data-dir",
            data_dir.path().to_str().unwrap(),
            "bus",
            "S03",
            "NB",
            "--tx",
            "T1",
        ])
        .unwrap();
        let mut output: Vec<u8> = Vec::new();
        let result = cli::run(&parsed, &mut output, today());

        assert_eq!(result.unwrap_err().to_string(), "Card 30 is blocked");
        assert!(output.is_empty());
    }

    #[test]
    fn test_corrupt_collection_is_reported() {
        let data_dir = TempDir::new().unwrap();
        fs::write(data_dir.path().join("cards.json"), "{ not json").unwrap();

        let parsed = CliArgs::try_parse_from([
            "campus-card",
            "--data-dir",
            data_dir.path().to_str().unwrap(),
            "cards",
        ])
        .unwrap();
        let mut output: Vec<u8> = Vec::new();
        let result = cli::run(&parsed, &mut output, today());

        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("Corrupt store: collection 'cards'"));
        assert_eq!(
            fs::read_to_string(data_dir.path().join("cards.json")).unwrap(),
            "{ not json"
        );
    }
}
