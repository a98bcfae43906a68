use crate::error::{LinkNovaError, Result};

/// Something whose category list can be changed in batches (a topic or a bookmark)
pub trait CategoryAssignment {
    fn add_categories(&self, categories: &[String]) -> Result<()>;
    fn remove_categories(&self, categories: &[String]) -> Result<()>;
}

/// A single queued edit, as typed by the user
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CategoryOp {
    /// Add a category (prefix: + or no prefix)
    Add(String),
    /// Remove a category (prefix: -)
    Remove(String),
}

/// Parse `+name` / `-name` / `name` arguments; blank entries are skipped
pub fn parse_category_ops(args: &[String]) -> Vec<CategoryOp> {
    args.iter()
        .map(|arg| {
            let arg = arg.trim();
            if let Some(name) = arg.strip_prefix('-') {
                CategoryOp::Remove(name.trim().to_string())
            } else {
                let name = arg.strip_prefix('+').unwrap_or(arg).trim();
                CategoryOp::Add(name.to_string())
            }
        })
        .filter(|op| match op {
            CategoryOp::Add(n) | CategoryOp::Remove(n) => !n.is_empty(),
        })
        .collect()
}

/// Category edits queued against an item before one batched save
///
/// `current` mirrors what the server has. A name is never in both `to_add`
/// and `to_remove`, `to_add` never holds a name from `current`, and
/// `to_remove` only holds names from `current`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChanges {
    current: Vec<String>,
    to_add: Vec<String>,
    to_remove: Vec<String>,
}

impl PendingChanges {
    pub fn new(current: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(current.len());
        for name in current {
            if !deduped.contains(&name) {
                deduped.push(name);
            }
        }
        Self {
            current: deduped,
            to_add: Vec::new(),
            to_remove: Vec::new(),
        }
    }

    pub fn current(&self) -> &[String] {
        &self.current
    }

    pub fn to_add(&self) -> &[String] {
        &self.to_add
    }

    pub fn to_remove(&self) -> &[String] {
        &self.to_remove
    }

    /// Queue `name` for addition; cancels a pending removal of the same name
    pub fn add(&mut self, name: &str) -> Result<()> {
        let name = checked_name(name)?;

        if let Some(pos) = self.to_remove.iter().position(|n| *n == name) {
            self.to_remove.remove(pos);
        } else if !self.current.contains(&name) && !self.to_add.contains(&name) {
            self.to_add.push(name);
        }
        Ok(())
    }

    /// Queue `name` for removal; cancels a pending addition of the same name
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let name = checked_name(name)?;

        if let Some(pos) = self.to_add.iter().position(|n| *n == name) {
            self.to_add.remove(pos);
        } else if self.current.contains(&name) && !self.to_remove.contains(&name) {
            self.to_remove.push(name);
        }
        Ok(())
    }

    pub fn apply(&mut self, op: &CategoryOp) -> Result<()> {
        match op {
            CategoryOp::Add(name) => self.add(name),
            CategoryOp::Remove(name) => self.remove(name),
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.to_add.is_empty() || !self.to_remove.is_empty()
    }

    /// Category list as it will be after a successful save
    pub fn effective(&self) -> Vec<String> {
        self.current
            .iter()
            .filter(|n| !self.to_remove.contains(n))
            .chain(self.to_add.iter())
            .cloned()
            .collect()
    }

    /// Drop every queued edit
    pub fn reset(&mut self) {
        self.to_add.clear();
        self.to_remove.clear();
    }

    /// One line per kind of change, empty when there is nothing pending
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.to_add.is_empty() {
            lines.push(format!("Add: {}", self.to_add.join(", ")));
        }
        if !self.to_remove.is_empty() {
            lines.push(format!("Remove: {}", self.to_remove.join(", ")));
        }
        lines
    }

    /// Send additions, then removals, as one call each
    ///
    /// If the removal fails after the additions went through, the additions
    /// are folded into `current` and only the removals stay pending.
    pub fn save<T: CategoryAssignment + ?Sized>(&mut self, target: &T) -> Result<()> {
        if !self.to_add.is_empty() {
            target.add_categories(&self.to_add)?;
            let added = std::mem::take(&mut self.to_add);
            self.current.extend(added);
        }

        if !self.to_remove.is_empty() {
            target.remove_categories(&self.to_remove)?;
            let removed = std::mem::take(&mut self.to_remove);
            self.current.retain(|n| !removed.contains(n));
        }

        Ok(())
    }
}

fn checked_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LinkNovaError::InvalidInput(
            "Category name cannot be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}
