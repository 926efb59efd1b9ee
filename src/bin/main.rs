use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use ledger_engine::{Directory, WithdrawalLimits};

/// A cli interface to the banking ledger
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The path to the command CSV file
    filename: std::path::PathBuf,
    /// The largest amount a single withdrawal may take out
    #[clap(long, default_value = "500.00")]
    max_per_transaction: Decimal,
    /// The number of withdrawals an account may make
    #[clap(long, default_value_t = 3)]
    max_withdrawals: u32,
    /// Print the statement of every account instead of the account summary CSV
    #[clap(long)]
    statements: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(&args.filename)?;
    let mut directory = Directory::with_limits(WithdrawalLimits {
        max_per_transaction: args.max_per_transaction,
        max_withdrawals_per_day: args.max_withdrawals,
    });

    for (line, command) in reader.deserialize().enumerate() {
        // rejected commands are logged and skipped
        if let Err(err) = directory.handle_command(command?) {
            tracing::warn!(line = line + 2, %err, "command rejected");
        }
    }

    if args.statements {
        for account in directory.accounts() {
            let holder = directory.client(account.owner())?;
            println!("========= {} =========", holder.name());
            println!("{}", account);
            println!("{:#}", account.statement());
            println!();
        }
        return Ok(());
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(std::io::stdout());

    for account in directory.accounts() {
        writer.serialize(account.summary())?;
    }
    writer.flush()?;

    Ok(())
}
