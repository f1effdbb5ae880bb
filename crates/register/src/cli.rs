//! Line-oriented terminal front end.
//!
//! One command per line. Customers are addressed by their row number in the
//! current (filtered, sorted) list, as printed by `list`.

use std::io::{self, BufRead, Write};

use tally_catalog::{Catalog, ProductId};
use tally_core::{CustomerId, DomainError};
use tally_ledger::Customer;
use tally_store::LedgerPersistence;
use thiserror::Error;

use crate::confirm::PromptConfirm;
use crate::format::format_amount;
use crate::register::Register;

pub const HELP: &str = "\
commands:
  add <name>              add a customer
  inc <row> <product>     one more of a product
  dec <row> <product>     one less of a product
  paid <row>              toggle paid / pending
  del <row>               delete a customer
  reset                   clear every customer's consumption (asks first)
  search [term]           filter the list by name (no term clears it)
  find                    show the first customer matching the search
  list                    show customers with totals
  catalog                 show products and prices
  total                   show grand, paid and pending totals
  help                    this text
  quit                    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Adjust {
        row: usize,
        product_id: ProductId,
        delta: i64,
    },
    TogglePaid(usize),
    Remove(usize),
    Reset,
    Search(String),
    Find,
    List,
    Catalog,
    Total,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("not a row number: {0}")]
    InvalidRow(String),

    #[error(transparent)]
    Product(#[from] DomainError),
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str, catalog: &Catalog) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "add" => Command::Add(rest.to_string()),
        "inc" | "+" => parse_adjust("inc", rest, 1, catalog)?,
        "dec" | "-" => parse_adjust("dec", rest, -1, catalog)?,
        "paid" => Command::TogglePaid(parse_row("paid", rest)?),
        "del" | "delete" => Command::Remove(parse_row("del", rest)?),
        "reset" => Command::Reset,
        "search" => Command::Search(rest.to_string()),
        "find" => Command::Find,
        "list" | "ls" => Command::List,
        "catalog" => Command::Catalog,
        "total" => Command::Total,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn parse_row(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            what: "a row number",
        });
    }
    match arg.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(CommandError::InvalidRow(arg.to_string())),
    }
}

fn parse_adjust(
    command: &'static str,
    rest: &str,
    delta: i64,
    catalog: &Catalog,
) -> Result<Command, CommandError> {
    let (row, product) = match rest.split_once(char::is_whitespace) {
        Some((row, product)) => (row, product.trim()),
        None => (rest, ""),
    };
    let row = parse_row(command, row)?;
    if product.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            what: "a product",
        });
    }
    Ok(Command::Adjust {
        row,
        product_id: catalog.parse_product(product)?,
        delta,
    })
}

/// Drives a [`Register`] from a line reader, printing to a writer.
pub struct Terminal {
    separator: char,
}

impl Terminal {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Read and execute commands until `quit` or end of input.
    pub fn run<P, R, W>(&self, register: &mut Register<P>, input: &mut R, output: &mut W) -> io::Result<()>
    where
        P: LedgerPersistence,
        R: BufRead,
        W: Write,
    {
        writeln!(output, "{} customers loaded. Type `help` for commands.", register.ledger().len())?;
        let mut line = String::new();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(());
            }

            let command = match parse_command(&line, register.catalog()) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(output, "error: {e}")?;
                    continue;
                }
            };

            if command == Command::Quit {
                return Ok(());
            }
            self.execute(command, register, input, output)?;
        }
    }

    fn execute<P, R, W>(
        &self,
        command: Command,
        register: &mut Register<P>,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<()>
    where
        P: LedgerPersistence,
        R: BufRead,
        W: Write,
    {
        match command {
            Command::Add(name) => match register.add_customer(&name) {
                Some(id) => {
                    let name = register.ledger().get(id).map(Customer::name).unwrap_or_default();
                    writeln!(output, "added {name}")?;
                }
                None => writeln!(output, "a name is required")?,
            },
            Command::Adjust {
                row,
                product_id,
                delta,
            } => {
                let Some(id) = row_id(register, row) else {
                    return writeln!(output, "no customer in row {row}");
                };
                if let Err(e) = register.adjust_quantity(id, &product_id, delta) {
                    return writeln!(output, "error: {e}");
                }
                if let Some(customer) = register.ledger().get(id) {
                    writeln!(
                        output,
                        "{}: {} x{} -> {}",
                        customer.name(),
                        product_id.label(),
                        customer.quantity(&product_id),
                        self.amount(register.total_for(customer))
                    )?;
                }
            }
            Command::TogglePaid(row) => {
                let Some(id) = row_id(register, row) else {
                    return writeln!(output, "no customer in row {row}");
                };
                register.toggle_paid(id);
                if let Some(customer) = register.ledger().get(id) {
                    writeln!(output, "{}: {}", customer.name(), paid_label(customer))?;
                }
            }
            Command::Remove(row) => {
                let Some(id) = row_id(register, row) else {
                    return writeln!(output, "no customer in row {row}");
                };
                let name = register
                    .ledger()
                    .get(id)
                    .map(|c| c.name().to_string())
                    .unwrap_or_default();
                register.remove_customer(id);
                writeln!(output, "deleted {name}")?;
            }
            Command::Reset => {
                let reset = register.reset_all_quantities(&mut PromptConfirm::new(input, output));
                if reset {
                    writeln!(output, "all consumption cleared")?;
                } else {
                    writeln!(output, "nothing changed")?;
                }
            }
            Command::Search(term) => {
                register.set_search_term(term);
                self.print_list(register, output)?;
            }
            Command::Find => match register.locate() {
                Some(found) => {
                    let row = register
                        .visible_customers()
                        .iter()
                        .position(|c| c.id() == found.id())
                        .map(|i| i + 1)
                        .unwrap_or(1);
                    writeln!(output, "found {} in row {row}", found.name())?;
                }
                None => writeln!(output, "no match")?,
            },
            Command::List => self.print_list(register, output)?,
            Command::Catalog => {
                for entry in register.catalog() {
                    writeln!(
                        output,
                        "{:<18} {:>10}",
                        entry.product_id.label(),
                        self.amount(entry.price.amount())
                    )?;
                }
            }
            Command::Total => {
                writeln!(output, "total    {}", self.amount(register.grand_total()))?;
                writeln!(output, "paid     {}", self.amount(register.paid_total()))?;
                writeln!(output, "pending  {}", self.amount(register.pending_total()))?;
            }
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn print_list<P: LedgerPersistence, W: Write>(
        &self,
        register: &Register<P>,
        output: &mut W,
    ) -> io::Result<()> {
        let visible = register.visible_customers();
        if visible.is_empty() {
            return writeln!(output, "(no customers)");
        }
        for (i, customer) in visible.iter().enumerate() {
            writeln!(
                output,
                "{:>3}. {:<24} {:>10}  {}",
                i + 1,
                customer.name(),
                self.amount(register.total_for(customer)),
                paid_label(customer)
            )?;
            let items: Vec<String> = register
                .catalog()
                .iter()
                .filter_map(|entry| {
                    let q = customer.quantity(&entry.product_id);
                    (q > 0).then(|| format!("{} x{q}", entry.product_id.label()))
                })
                .collect();
            if !items.is_empty() {
                writeln!(output, "     {}", items.join(", "))?;
            }
        }
        writeln!(output, "     total {}", self.amount(register.grand_total()))
    }

    fn amount(&self, amount: u64) -> String {
        format_amount(amount, self.separator)
    }
}

fn row_id<P: LedgerPersistence>(register: &Register<P>, row: usize) -> Option<CustomerId> {
    register
        .visible_customers()
        .get(row.checked_sub(1)?)
        .map(|c| c.id())
}

fn paid_label(customer: &Customer) -> &'static str {
    if customer.is_paid() { "PAID" } else { "PENDING" }
}
