use crate::config::{StoreConfig, DEFAULT_DATA_DIR};
use crate::types::{CardStatus, CardType};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Manage campus cards: issuance, payments and lecture attendance
#[derive(Parser, Debug)]
#[command(name = "campus-card")]
#[command(about = "Manage campus cards: issuance, payments and lecture attendance", long_about = None)]
pub struct CliArgs {
    /// Directory holding the JSON record collections
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        env = "CAMPUS_CARD_DATA_DIR",
        default_value = DEFAULT_DATA_DIR,
        global = true
    )]
    pub data_dir: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        default_value = "warn",
        global = true,
        help = "Log filter, e.g. 'info' or 'campus_card=debug' (RUST_LOG takes precedence)"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for listings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One descriptive line per record
    #[default]
    Text,
    /// CSV with a header row
    Csv,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Write the demo students, faculty and cards into an empty store
    Seed,

    /// Issue a new card with the starting balance
    Issue {
        #[arg(value_name = "CARD")]
        card_number: String,
        #[arg(value_name = "TYPE", help = "student or faculty")]
        card_type: CardType,
        #[arg(value_name = "OWNER")]
        owner_id: String,
    },

    /// Block a card
    Block {
        #[arg(value_name = "CARD")]
        card_number: String,
    },

    /// Unblock a card
    Unblock {
        #[arg(value_name = "CARD")]
        card_number: String,
    },

    /// List cards ordered by card type
    Cards {
        #[arg(long, value_name = "STATUS", help = "Only cards that are 'blocked' or 'unblocked'")]
        status: Option<CardStatus>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List transactions ordered by type
    Transactions {
        #[arg(long, value_name = "USER")]
        user: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the card and profile of a user
    Login {
        #[arg(value_name = "USER")]
        user_id: String,
    },

    /// Credit a user's card
    Recharge {
        #[arg(value_name = "USER")]
        user_id: String,
        #[arg(value_name = "AMOUNT")]
        amount: Decimal,
        #[arg(long = "tx", value_name = "ID")]
        transaction_id: String,
    },

    /// Pay for cafeteria menu items (student cards)
    Cafeteria {
        #[arg(value_name = "USER")]
        user_id: String,
        #[arg(value_name = "ITEM", required = true, help = "Menu item numbers 1-8, repeat to order more")]
        items: Vec<u32>,
        #[arg(long = "tx", value_name = "ID")]
        transaction_id: String,
    },

    /// Pay a bus fare (student cards)
    Bus {
        #[arg(value_name = "USER")]
        user_id: String,
        #[arg(value_name = "TRACK", help = "1/NB, 2/SB or 3/LIB")]
        track: String,
        #[arg(long = "tx", value_name = "ID")]
        transaction_id: String,
    },

    /// Pay for car parking (faculty cards)
    Parking {
        #[arg(value_name = "USER")]
        user_id: String,
        #[arg(value_name = "HOURS")]
        hours: u32,
        #[arg(long = "tx", value_name = "ID")]
        transaction_id: String,
    },

    /// Record lecture attendance (student cards)
    Attend {
        #[arg(value_name = "USER")]
        user_id: String,
        #[arg(value_name = "COURSE")]
        course_id: String,
        #[arg(long, value_name = "YYYY-MM-DD", help = "Lecture date (default: today)")]
        date: Option<NaiveDate>,
        #[arg(long = "tx", value_name = "ID")]
        transaction_id: String,
    },

    /// Attendance report of a taught course (faculty cards)
    Report {
        #[arg(value_name = "USER")]
        user_id: String,
        #[arg(value_name = "COURSE")]
        course_id: String,
        #[arg(long, value_name = "YYYY-MM-DD", help = "Lecture date (default: today)")]
        date: Option<NaiveDate>,
    },

    /// Transaction history of a user
    History {
        #[arg(value_name = "USER")]
        user_id: String,
    },

    /// Apply a CSV file of operations (header: action,user,value,course,date,tx)
    Replay {
        #[arg(value_name = "CSV")]
        input_file: PathBuf,
    },
}

impl CliArgs {
    /// Build the store configuration from the CLI arguments
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.data_dir)
    }
}
