use anyhow::{ensure, Result};
use clap::builder::BoolishValueParser;
use clap::{Parser, ValueEnum};

/// Table used when `TABLE_NAME` is not set.
pub const DEFAULT_TABLE_NAME: &str = "MyDynamoDBTable";

/// Runtime configuration.
///
/// Lambda starts the binary without arguments, so every option falls back to
/// an environment variable and then to a default.
#[derive(Parser, Debug, Clone)]
#[command(name = "itemstore")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// DynamoDB table to scan and write
    #[arg(long, env = "TABLE_NAME", default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Storage backend
    #[arg(long = "storage", env = "STORAGE_BACKEND", value_enum, default_value_t = StorageBackend::Dynamodb)]
    pub storage: StorageBackend,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// Use strongly consistent reads when scanning.
    ///
    /// The environment variable accepts true/false, 1/0, yes/no and on/off.
    #[arg(long, env = "CONSISTENT_READ", value_parser = BoolishValueParser::new())]
    pub consistent_read: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// AWS DynamoDB through the default credential chain
    Dynamodb,
    /// Process-local map, for local runs
    Memory,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human-readable output
    Pretty,
}

impl Config {
    /// Checks the table name against DynamoDB naming rules.
    pub fn validate(&self) -> Result<()> {
        let name = &self.table_name;
        ensure!(
            (3..=255).contains(&name.len()),
            "table name must be between 3 and 255 characters, got {:?}",
            name
        );
        ensure!(
            name.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')),
            "table name may only contain letters, digits, '_', '-' and '.', got {:?}",
            name
        );
        Ok(())
    }
}
