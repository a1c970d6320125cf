//! Line-oriented console front end.

use std::io::{BufRead, Write};

use anyhow::Context;

use remedystock_core::{DomainError, MedicineId};
use remedystock_inventory::{CategoryFilter, MedicineField, ScanOutcome};

use crate::handlers::{self, StockButton};
use crate::prompt::{ConfirmPrompt, Notifier};
use crate::session::Session;
use crate::view::InventoryView;

pub const HELP: &str = "\
commands:
  list                      show the inventory
  search [term]             filter by name, company or potency (empty clears)
  category <All|name>       filter by category
  low                       toggle the low-stock panel
  scanner                   toggle the barcode scanner panel
  scan [barcode]            receive one unit (scanner must be open)
  add                       fill in and submit the add form
  dec|inc|inc10 <id>        adjust stock by -1, +1, +10
  edit <id>                 start editing a record
  set <field> <value>       change a field of the record being edited
  done                      stop editing
  delete <id>               delete a record (asks first)
  export                    print the inventory as JSON
  help                      show this text
  quit                      leave";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Category(CategoryFilter),
    ToggleLowStock,
    ToggleScanner,
    Scan(String),
    Add,
    Stock(MedicineId, StockButton),
    Edit(MedicineId),
    Set { field: String, value: String },
    Done,
    Delete(MedicineId),
    Export,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let id = |rest: &str| -> Result<MedicineId, String> {
            rest.parse::<MedicineId>().map_err(|e| e.to_string())
        };

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "search" => Command::Search(rest.to_string()),
            "category" | "cat" => {
                let filter: CategoryFilter = rest.parse().map_err(|e: DomainError| e.user_message())?;
                Command::Category(filter)
            }
            "low" => Command::ToggleLowStock,
            "scanner" => Command::ToggleScanner,
            "scan" => Command::Scan(rest.to_string()),
            "add" => Command::Add,
            "dec" => Command::Stock(id(rest)?, StockButton::Decrement),
            "inc" => Command::Stock(id(rest)?, StockButton::Increment),
            "inc10" => Command::Stock(id(rest)?, StockButton::BulkIncrement),
            "edit" => Command::Edit(id(rest)?),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err("usage: set <field> <value>".to_string());
                }
                Command::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                }
            }
            "done" => Command::Done,
            "delete" | "rm" => Command::Delete(id(rest)?),
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {other} (try `help`)")),
        };
        Ok(Some(cmd))
    }
}

/// Console bound to an input and output stream. It is also the confirmation
/// prompt and the notification sink for the handlers it drives.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("failed to read console input")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask for a form field; an empty answer keeps `current`.
    fn ask(&mut self, label: &str, current: &str) -> anyhow::Result<String> {
        write!(self.output, "{label} [{current}]: ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        if answer.trim().is_empty() {
            Ok(current.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Read commands until `quit` or end of input.
    pub fn run(&mut self, session: &mut Session) -> anyhow::Result<()> {
        writeln!(self.output, "remedystock: {} medicines loaded. Type `help` for commands.", session.store.len())?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(cmd)) => self.execute(session, cmd)?,
                Err(msg) => writeln!(self.output, "error: {msg}")?,
            }
        }
        tracing::info!("console closed");
        Ok(())
    }

    pub fn execute(&mut self, session: &mut Session, cmd: Command) -> anyhow::Result<()> {
        match cmd {
            Command::List => {
                let view = InventoryView::build(session);
                render(&view, &mut self.output)?;
            }
            Command::Search(term) => {
                handlers::set_search(&mut session.ui, term);
                self.print_matches(session)?;
            }
            Command::Category(category) => {
                handlers::select_category(&mut session.ui, category);
                self.print_matches(session)?;
            }
            Command::ToggleLowStock => {
                handlers::toggle_low_stock(&mut session.ui);
                let view = InventoryView::build(session);
                if view.show_low_stock {
                    render_low_stock(&view, &mut self.output)?;
                } else {
                    writeln!(self.output, "low-stock panel hidden")?;
                }
            }
            Command::ToggleScanner => {
                handlers::toggle_scanner(&mut session.ui);
                let state = if session.ui.show_scanner { "open" } else { "closed" };
                writeln!(self.output, "scanner {state}")?;
            }
            Command::Scan(code) => {
                if !session.ui.show_scanner {
                    writeln!(self.output, "scanner is closed; open it with `scanner`")?;
                    return Ok(());
                }
                session.ui.scanner_input = code;
                if let Some(outcome) = handlers::submit_scan(session, self) {
                    render_scan_result(&outcome, &mut self.output)?;
                }
            }
            Command::Add => self.fill_add_form(session)?,
            Command::Stock(id, button) => {
                if handlers::press_stock_button(session, id, button) {
                    self.print_stock(session, id)?;
                } else {
                    writeln!(self.output, "no medicine with id {id}")?;
                }
            }
            Command::Edit(id) => {
                if handlers::begin_edit(session, id) {
                    writeln!(self.output, "editing {id}; use `set <field> <value>` then `done`")?;
                } else {
                    writeln!(self.output, "no medicine with id {id}")?;
                }
            }
            Command::Set { field, value } => {
                let Some(id) = session.ui.edit.editing_id() else {
                    writeln!(self.output, "not editing; use `edit <id>` first")?;
                    return Ok(());
                };
                match MedicineField::parse(&field, &value) {
                    Ok(edit) => {
                        if handlers::edit_field(session, id, edit, self) {
                            writeln!(self.output, "updated {field}")?;
                        }
                    }
                    Err(err) => writeln!(self.output, "error: {}", err.user_message())?,
                }
            }
            Command::Done => handlers::finish_edit(&mut session.ui),
            Command::Delete(id) => {
                if handlers::delete_medicine(session, id, self) {
                    writeln!(self.output, "deleted {id}")?;
                }
            }
            Command::Export => {
                let json = serde_json::to_string_pretty(session.store.medicines())
                    .context("failed to serialize inventory")?;
                writeln!(self.output, "{json}")?;
            }
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn fill_add_form(&mut self, session: &mut Session) -> anyhow::Result<()> {
        session.ui.show_add_form = true;

        let mut draft = session.ui.draft.clone();
        draft.name = self.ask("name", &draft.name)?;
        draft.potency = self.ask("potency", &draft.potency)?;
        draft.company = self.ask("company", &draft.company)?;
        let category = self.ask("category", draft.category.as_str())?;
        match category.parse() {
            Ok(c) => draft.category = c,
            Err(_) => writeln!(self.output, "unknown category, keeping {}", draft.category)?,
        }
        draft.stock = self.ask("stock", &draft.stock)?;
        draft.low_stock_threshold = self.ask("low stock threshold", &draft.low_stock_threshold)?;
        draft.barcode = self.ask("barcode", &draft.barcode)?;
        session.ui.draft = draft;

        if let Some(id) = handlers::submit_new_medicine(session, self) {
            writeln!(self.output, "added medicine {id}")?;
        }
        Ok(())
    }

    fn print_matches(&mut self, session: &Session) -> anyhow::Result<()> {
        let view = InventoryView::build(session);
        render_rows(&view, &mut self.output)
    }

    fn print_stock(&mut self, session: &Session, id: MedicineId) -> anyhow::Result<()> {
        if let Some(m) = session.store.get(id) {
            let flag = if m.is_low_stock() { " (low)" } else { "" };
            writeln!(self.output, "{}: stock {}{flag}", m.name, m.stock)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> ConfirmPrompt for Console<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        let asked = write!(self.output, "{message} [y/N]: ").and_then(|_| self.output.flush());
        if let Err(err) = asked {
            tracing::warn!(%err, "failed to show confirmation prompt");
            return false;
        }
        match self.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read confirmation");
                false
            }
        }
    }
}

impl<R: BufRead, W: Write> Notifier for Console<R, W> {
    fn notify(&mut self, message: &str) {
        if let Err(err) = writeln!(self.output, "! {message}") {
            tracing::warn!(%err, "failed to show notification");
        }
    }
}

/// Full screen: header, optional panels, then the list.
pub fn render(view: &InventoryView, out: &mut impl Write) -> anyhow::Result<()> {
    let badge = view
        .low_stock_badge()
        .map(|n| format!(" [{n} low]"))
        .unwrap_or_default();
    writeln!(
        out,
        "{} medicines, {} units{badge} | category: {} | search: {:?}",
        view.summary.records, view.summary.total_units, view.category, view.search_term
    )?;

    if view.show_low_stock {
        render_low_stock(view, out)?;
    }
    if view.show_scanner {
        match &view.scan_result {
            Some(outcome) => render_scan_result(outcome, out)?,
            None => writeln!(out, "scanner: ready (each scan adds 1 unit)")?,
        }
    }
    render_rows(view, out)
}

fn render_rows(view: &InventoryView, out: &mut impl Write) -> anyhow::Result<()> {
    if let Some(msg) = view.empty_message() {
        writeln!(out, "{msg}")?;
        return Ok(());
    }
    for row in &view.rows {
        let m = &row.medicine;
        let marker = match (row.editing, row.low_stock) {
            (true, _) => "*",
            (false, true) => "!",
            (false, false) => " ",
        };
        writeln!(
            out,
            "{marker} {:>14}  {:<16} {:<5} {:<13} {:<16} stock {:>4} / {:<3} {}",
            m.id,
            m.name,
            m.potency,
            m.company,
            m.category,
            m.stock,
            m.low_stock_threshold,
            m.barcode
        )?;
    }
    Ok(())
}

fn render_low_stock(view: &InventoryView, out: &mut impl Write) -> anyhow::Result<()> {
    if view.low_stock.is_empty() {
        writeln!(out, "low stock: none")?;
        return Ok(());
    }
    writeln!(out, "low stock:")?;
    for m in &view.low_stock {
        writeln!(out, "  {} ({}) - {}: {} left", m.name, m.potency, m.company, m.stock)?;
    }
    Ok(())
}

fn render_scan_result(outcome: &ScanOutcome, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", outcome.message())?;
    match outcome {
        ScanOutcome::Found {
            category,
            old_stock,
            new_stock,
            ..
        } => writeln!(out, "  category: {category}  stock: {old_stock} -> {new_stock}")?,
        ScanOutcome::NotFound { barcode } => writeln!(out, "  barcode: {barcode}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(Command::parse("list").unwrap(), Some(Command::List));
        assert_eq!(
            Command::parse("inc10 2").unwrap(),
            Some(Command::Stock(MedicineId::from_raw(2), StockButton::BulkIncrement))
        );
        assert_eq!(
            Command::parse("search dr. reck").unwrap(),
            Some(Command::Search("dr. reck".to_string()))
        );
        assert_eq!(
            Command::parse("category mother tinctures").unwrap(),
            Some(Command::Category(CategoryFilter::Only(
                remedystock_inventory::Category::MotherTinctures
            )))
        );
        assert_eq!(
            Command::parse("set name Arnica Montana Q").unwrap(),
            Some(Command::Set {
                field: "name".to_string(),
                value: "Arnica Montana Q".to_string()
            })
        );
        assert_eq!(Command::parse("scan").unwrap(), Some(Command::Scan(String::new())));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("inc abc").is_err());
        assert!(Command::parse("category Syrups").is_err());
        assert!(Command::parse("set").is_err());
    }
}
