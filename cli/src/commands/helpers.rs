use crate::cli::GroupListArgs;
use crate::output::notify::Notifier;
use linknova::error::Result;
use linknova::listing::{self, GroupSort, Grouping, SortOrder};
use linknova::pending::{parse_category_ops, CategoryAssignment, PendingChanges};
use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stderr; anything but y/yes is a no
pub fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N]: ", prompt);
    io::stderr().flush()?;

    let stdin = io::stdin();
    read_confirmation(&mut stdin.lock())
}

fn read_confirmation<R: BufRead>(input: &mut R) -> Result<bool> {
    let mut response = String::new();
    input.read_line(&mut response)?;
    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

/// Filter, sort and cap a topic or category list the way `list` shows it
pub fn group_listing<T: Grouping + Clone>(items: Vec<T>, args: &GroupListArgs) -> Result<Vec<T>> {
    let mut items = match args.query.as_deref() {
        Some(query) => listing::filter_groups(&items, query),
        None => items,
    };

    let field = args
        .sort
        .as_deref()
        .map(str::parse::<GroupSort>)
        .transpose()?
        .unwrap_or_default();
    let order = args
        .order
        .as_deref()
        .map(str::parse::<SortOrder>)
        .transpose()?
        .unwrap_or_default();
    listing::sort_groups(&mut items, field, order);
    listing::apply_limit(&mut items, args.limit);
    Ok(items)
}

/// Apply `+cat`/`-cat` arguments to `current` and save them in one batch
///
/// Returns the category list after the save.
pub fn apply_category_ops<T: CategoryAssignment + ?Sized>(
    current: Vec<String>,
    ops: &[String],
    target: &T,
    notifier: &Notifier,
) -> Result<Vec<String>> {
    let mut pending = PendingChanges::new(current);
    for op in parse_category_ops(ops) {
        pending.apply(&op)?;
    }

    if !pending.has_changes() {
        notifier.info("Nothing to change");
        return Ok(pending.effective());
    }

    let summary = pending.summary();
    pending.save(target)?;
    for line in summary {
        notifier.success(line);
    }
    Ok(pending.effective())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linknova::models::Topic;
    use linknova::LinkNovaError;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::io::Cursor;

    #[rstest]
    #[case("y\n", true)]
    #[case("YES\n", true)]
    #[case(" yes \n", true)]
    #[case("n\n", false)]
    #[case("\n", false)]
    #[case("", false)]
    #[case("sure\n", false)]
    fn test_read_confirmation(#[case] input: &str, #[case] expected: bool) {
        let mut cursor = Cursor::new(input.as_bytes());
        assert_eq!(read_confirmation(&mut cursor).unwrap(), expected);
    }

    fn topic(name: &str, priority: i32) -> Topic {
        let mut t = Topic::new(name);
        t.priority = priority;
        t
    }

    #[test]
    fn test_group_listing_defaults_to_name_asc() {
        let topics = vec![topic("web", 0), topic("Async", 0), topic("db", 0)];
        let result = group_listing(topics, &GroupListArgs::default()).unwrap();
        let names: Vec<&str> = result.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Async", "db", "web"]);
    }

    #[test]
    fn test_group_listing_query_sort_limit() {
        let topics = vec![topic("rust-web", 1), topic("go", 5), topic("rust-cli", 3)];
        let args = GroupListArgs {
            query: Some("RUST".to_string()),
            sort: Some("priority".to_string()),
            order: Some("desc".to_string()),
            limit: Some(1),
        };
        let result = group_listing(topics, &args).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "rust-cli");
    }

    #[test]
    fn test_group_listing_bad_sort() {
        let args = GroupListArgs {
            sort: Some("color".to_string()),
            ..Default::default()
        };
        let err = group_listing(vec![topic("a", 0)], &args).unwrap_err();
        assert!(matches!(err, LinkNovaError::InvalidInput(_)));
    }

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl CategoryAssignment for Recorder {
        fn add_categories(&self, categories: &[String]) -> Result<()> {
            self.calls.borrow_mut().push(format!("add:{}", categories.join(",")));
            Ok(())
        }

        fn remove_categories(&self, categories: &[String]) -> Result<()> {
            self.calls.borrow_mut().push(format!("remove:{}", categories.join(",")));
            Ok(())
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_apply_category_ops_batches() {
        let target = Recorder::default();
        let result = apply_category_ops(
            strings(&["rust", "old"]),
            &strings(&["+web", "-old", "db", "rust"]),
            &target,
            &Notifier::new(false),
        )
        .unwrap();

        assert_eq!(result, strings(&["rust", "web", "db"]));
        assert_eq!(*target.calls.borrow(), vec!["add:web,db", "remove:old"]);
    }

    #[test]
    fn test_apply_category_ops_noop() {
        let target = Recorder::default();
        let result = apply_category_ops(
            strings(&["rust"]),
            &strings(&["+rust", "-missing"]),
            &target,
            &Notifier::new(false),
        )
        .unwrap();

        assert_eq!(result, strings(&["rust"]));
        assert!(target.calls.borrow().is_empty());
    }
}
