use crate::output::notify::Notifier;
use linknova::error::{LinkNovaError, Result};
use linknova::pending::{parse_category_ops, CategoryAssignment, CategoryOp, PendingChanges};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// One line typed at the category editor prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    Ops(Vec<CategoryOp>),
    List,
    Available,
    Save,
    Reset,
    Help,
    Quit,
}

/// `None` for a blank line
///
/// Edits are split on commas when the line has one, so names with spaces
/// can be written as `+web dev, -old`; otherwise on whitespace.
pub fn parse_command(line: &str) -> Option<EditorCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let command = match line {
        "l" | "ls" | "list" => EditorCommand::List,
        "a" | "avail" => EditorCommand::Available,
        "s" | "save" => EditorCommand::Save,
        "r" | "reset" => EditorCommand::Reset,
        "?" | "h" | "help" => EditorCommand::Help,
        "q" | "quit" | "exit" => EditorCommand::Quit,
        _ => {
            let args: Vec<String> = if line.contains(',') {
                line.split(',').map(str::to_string).collect()
            } else {
                line.split_whitespace().map(str::to_string).collect()
            };
            EditorCommand::Ops(parse_category_ops(&args))
        }
    };
    Some(command)
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Pending-changes editor for the categories of one topic or bookmark
pub struct CategoryEditor<'a, T: CategoryAssignment + ?Sized> {
    label: String,
    pending: PendingChanges,
    target: &'a T,
    available: Vec<String>,
    notifier: Notifier,
    quit_requested: bool,
}

impl<'a, T: CategoryAssignment + ?Sized> CategoryEditor<'a, T> {
    pub fn new(
        label: impl Into<String>,
        current: Vec<String>,
        target: &'a T,
        available: Vec<String>,
        notifier: Notifier,
    ) -> Self {
        Self {
            label: label.into(),
            pending: PendingChanges::new(current),
            target,
            available,
            notifier,
            quit_requested: false,
        }
    }

    pub fn pending(&self) -> &PendingChanges {
        &self.pending
    }

    /// Known categories not assigned after the pending edits
    pub fn unassigned(&self) -> Vec<&str> {
        let effective = self.pending.effective();
        self.available
            .iter()
            .filter(|name| !effective.contains(name))
            .map(String::as_str)
            .collect()
    }

    pub fn handle(&mut self, command: EditorCommand) -> Result<Flow> {
        if command != EditorCommand::Quit {
            self.quit_requested = false;
        }

        match command {
            EditorCommand::Ops(ops) => {
                for op in &ops {
                    if let CategoryOp::Add(name) = op {
                        if !self.available.is_empty() && !self.available.contains(name) {
                            self.notifier
                                .warning(format!("'{}' is not a known category", name));
                        }
                    }
                    self.pending.apply(op)?;
                }
                self.print_summary();
            }
            EditorCommand::List => self.print_state(),
            EditorCommand::Available => {
                let unassigned = self.unassigned();
                if unassigned.is_empty() {
                    self.notifier.info("No other categories");
                } else {
                    println!("{}", unassigned.join(", "));
                }
            }
            EditorCommand::Save => {
                if !self.pending.has_changes() {
                    self.notifier.info("Nothing to save");
                } else {
                    let summary = self.pending.summary();
                    self.pending.save(self.target)?;
                    for line in summary {
                        self.notifier.success(line);
                    }
                }
            }
            EditorCommand::Reset => {
                self.pending.reset();
                self.notifier.info("Pending changes discarded");
            }
            EditorCommand::Help => print_help(),
            EditorCommand::Quit => {
                if self.pending.has_changes() && !self.quit_requested {
                    self.quit_requested = true;
                    self.notifier
                        .warning("Unsaved changes; type 'q' again to discard them");
                } else {
                    return Ok(Flow::Exit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    pub fn print_state(&self) {
        let effective = self.pending.effective();
        if effective.is_empty() {
            println!("{}: (no categories)", self.label);
        } else {
            println!("{}: {}", self.label, effective.join(", "));
        }
        self.print_summary();
    }

    fn print_summary(&self) {
        for line in self.pending.summary() {
            println!("  {}", line);
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new().map_err(|e| LinkNovaError::Other(e.to_string()))?;

        println!("Editing categories of {} - type '?' for help", self.label);
        self.print_state();

        loop {
            let prompt = if self.pending.has_changes() {
                "cats*> "
            } else {
                "cats> "
            };
            match rl.readline(prompt) {
                Ok(line) => {
                    let Some(command) = parse_command(&line) else {
                        continue;
                    };
                    rl.add_history_entry(line.trim())
                        .map_err(|e| LinkNovaError::Other(e.to_string()))?;

                    match self.handle(command) {
                        Ok(Flow::Exit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => self.notifier.error(&e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if self.pending.has_changes() {
            self.notifier.warning("Left with unsaved changes");
        }
        Ok(())
    }
}

fn print_help() {
    println!(
        "
CATEGORY EDITOR:
    +name / name        Queue a category for addition
    -name               Queue a category for removal
    +a, -b c, +d        Several edits; use commas when names contain spaces
    l, ls               Show categories and pending changes
    a, avail            Show categories that could be added
    s, save             Send pending changes to the server
    r, reset            Discard pending changes
    ?, h, help          Show this help
    q, quit             Leave the editor
"
    );
}
