//! `tally` — terminal register for the stall.

use anyhow::Context;
use tally_register::cli::Terminal;
use tally_register::{Config, Register};
use tally_store::{FileSlot, LedgerStore};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    tally_observability::init(config.log_format);

    tracing::info!(data_dir = ?config.data_dir, "starting register");
    let store = LedgerStore::new(FileSlot::new(&config.data_dir));
    let mut register = Register::open(store);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Terminal::new(config.group_separator)
        .run(&mut register, &mut stdin.lock(), &mut stdout.lock())
        .context("terminal i/o failed")?;

    tracing::info!(customers = register.ledger().len(), "register closed");
    Ok(())
}
