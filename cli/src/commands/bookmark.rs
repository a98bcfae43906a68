use super::helpers::{apply_category_ops, confirm};
use super::{AppContext, LinkNovaCommand};
use crate::cli::BookmarkAction;
use crate::fetch_ui::{lookup_metadata, with_spinner};
use crate::interactive::CategoryEditor;
use linknova::error::{LinkNovaError, Result};
use linknova::listing::{self, BookmarkFilter, BookmarkSort, SortOrder};
use linknova::models::{Bookmark, BookmarkCreate, BookmarkStatus, BookmarkUpdate};
use linknova::names::parse_names;
use linknova::utils::is_valid_url;

pub struct BookmarkCommand {
    pub action: BookmarkAction,
}

/// Sort field and direction; a field without an order uses the field's default
fn resolve_sort(sort: Option<&str>, order: Option<&str>) -> Result<(BookmarkSort, SortOrder)> {
    let field = sort
        .map(str::parse::<BookmarkSort>)
        .transpose()?
        .unwrap_or_default();
    let order = match order {
        Some(order) => order.parse::<SortOrder>()?,
        None => field.default_order(),
    };
    Ok((field, order))
}

fn parse_status(status: Option<&str>) -> Result<Option<BookmarkStatus>> {
    status.map(str::parse).transpose()
}

fn normalize_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn new_bookmark(
    url: &str,
    title: &Option<String>,
    content: &Option<String>,
    referrer: &Option<String>,
    status: Option<&str>,
    categories: &[String],
) -> Result<BookmarkCreate> {
    let url = url.trim();
    if !is_valid_url(url) {
        return Err(LinkNovaError::InvalidInput(format!(
            "'{}' is not an http(s) URL",
            url
        )));
    }
    Ok(BookmarkCreate {
        url: url.to_string(),
        title: normalize_text(title),
        content: normalize_text(content),
        referrer: normalize_text(referrer),
        status: parse_status(status)?,
        categories: parse_names(categories),
    })
}

impl BookmarkCommand {
    fn list(
        &self,
        ctx: &AppContext,
        filter: BookmarkFilter,
        topic: Option<&str>,
        sort: (BookmarkSort, SortOrder),
        limit: Option<usize>,
    ) -> Result<()> {
        let bookmarks_api = ctx.client.bookmarks();
        let topics_api = ctx.client.topics();

        let (bookmarks, topic_categories) = with_spinner("Loading bookmarks", || match topic {
            Some(name) => {
                let (bookmarks, topic) =
                    rayon::join(|| bookmarks_api.list(), || topics_api.get(name));
                Ok((bookmarks?, Some(topic?.categories)))
            }
            None => Ok((bookmarks_api.list()?, None)),
        })?;

        let filter = BookmarkFilter {
            topic_categories,
            ..filter
        };
        let mut bookmarks = listing::filter_bookmarks(&bookmarks, &filter);
        listing::sort_bookmarks(&mut bookmarks, sort.0, sort.1);
        listing::apply_limit(&mut bookmarks, limit);

        if bookmarks.is_empty() && !ctx.format.is_structured() {
            ctx.notifier().info("No bookmarks found");
            return Ok(());
        }
        ctx.format.print_records(&bookmarks, ctx.no_color)
    }

    fn add(&self, ctx: &AppContext, mut bookmark: BookmarkCreate, offline: bool) -> Result<()> {
        let notifier = ctx.notifier();

        if !offline && (bookmark.title.is_none() || bookmark.content.is_none()) {
            match lookup_metadata(ctx.client, ctx.config, &bookmark.url) {
                Ok(meta) => {
                    if bookmark.title.is_none() {
                        bookmark.title = meta.title;
                    }
                    if bookmark.content.is_none() {
                        bookmark.content = meta.description;
                    }
                }
                Err(e) => notifier.warning(format!("Could not fetch page details: {}", e)),
            }
        }

        ctx.client.bookmarks().create(&bookmark)?;
        let label = bookmark.title.as_deref().unwrap_or(&bookmark.url);
        notifier.success(format!("Added bookmark: {}", label));
        Ok(())
    }

    fn delete(&self, ctx: &AppContext, id: i64, force: bool) -> Result<()> {
        let api = ctx.client.bookmarks();
        if !force {
            let bookmark = with_spinner("Loading bookmark", || api.get(id))?;
            eprintln!("Bookmark to be deleted:");
            eprintln!("  {}. {} - {}", bookmark.id, bookmark.label(), bookmark.url);
            if !confirm("\nDelete this bookmark?")? {
                eprintln!("Deletion cancelled.");
                return Ok(());
            }
        }
        api.delete(id)?;
        ctx.notifier().success(format!("Deleted bookmark {}", id));
        Ok(())
    }

    fn edit_categories(&self, ctx: &AppContext, id: i64) -> Result<()> {
        let api = ctx.client.bookmarks();
        let categories = ctx.client.categories();
        let (bookmark, all) = rayon::join(|| api.get(id), || categories.list());
        let bookmark: Bookmark = bookmark?;
        let available = match all {
            Ok(all) => all.into_iter().map(|c| c.name).collect(),
            Err(e) => {
                log::warn!("Could not load category list: {}", e);
                Vec::new()
            }
        };

        let target = api.assignment(id);
        let mut editor = CategoryEditor::new(
            format!("bookmark {}", id),
            bookmark.categories,
            &target,
            available,
            ctx.notifier(),
        );
        editor.run()
    }
}

impl LinkNovaCommand for BookmarkCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let api = ctx.client.bookmarks();
        let notifier = ctx.notifier();

        match &self.action {
            BookmarkAction::List {
                query,
                category,
                topic,
                status,
                sort,
                order,
                limit,
            } => {
                let filter = BookmarkFilter {
                    query: query.clone(),
                    category: category.clone(),
                    status: parse_status(status.as_deref())?,
                    topic_categories: None,
                };
                let sort = resolve_sort(sort.as_deref(), order.as_deref())?;
                self.list(ctx, filter, topic.as_deref(), sort, *limit)?;
            }
            BookmarkAction::Show { id } => {
                let bookmark = with_spinner("Loading bookmark", || api.get(*id))?;
                ctx.format.print_record(&bookmark, ctx.no_color)?;
            }
            BookmarkAction::Add {
                url,
                title,
                content,
                referrer,
                status,
                categories,
                offline,
            } => {
                let bookmark =
                    new_bookmark(url, title, content, referrer, status.as_deref(), categories)?;
                self.add(ctx, bookmark, *offline)?;
            }
            BookmarkAction::Update {
                id,
                title,
                content,
                referrer,
                status,
            } => {
                let update = BookmarkUpdate {
                    title: title.clone(),
                    content: content.clone(),
                    referrer: referrer.clone(),
                    status: parse_status(status.as_deref())?,
                };
                if update.is_empty() {
                    notifier.warning("Nothing to update");
                    return Ok(());
                }
                api.update(*id, &update)?;
                notifier.success(format!("Updated bookmark {}", id));
            }
            BookmarkAction::Delete { id, force } => self.delete(ctx, *id, *force)?,
            BookmarkAction::Cats { id, ops } => {
                let bookmark = with_spinner("Loading bookmark", || api.get(*id))?;
                let categories =
                    apply_category_ops(bookmark.categories, ops, &api.assignment(*id), &notifier)?;
                println!("{}: {}", id, categories.join(", "));
            }
            BookmarkAction::EditCats { id } => self.edit_categories(ctx, *id)?,
            BookmarkAction::Open { id } => {
                let bookmark = with_spinner("Loading bookmark", || api.get(*id))?;
                eprintln!("Opening: {}", bookmark.url);
                open::that(&bookmark.url)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, BookmarkSort::CreatedOn, SortOrder::Desc)]
    #[case(Some("title"), None, BookmarkSort::Title, SortOrder::Asc)]
    #[case(Some("updated"), None, BookmarkSort::UpdatedOn, SortOrder::Desc)]
    #[case(Some("created_on"), Some("asc"), BookmarkSort::CreatedOn, SortOrder::Asc)]
    #[case(Some("status"), Some("DESC"), BookmarkSort::Status, SortOrder::Desc)]
    fn test_resolve_sort(
        #[case] sort: Option<&str>,
        #[case] order: Option<&str>,
        #[case] field: BookmarkSort,
        #[case] expected_order: SortOrder,
    ) {
        assert_eq!(resolve_sort(sort, order).unwrap(), (field, expected_order));
    }

    #[test]
    fn test_resolve_sort_rejects_unknown() {
        assert!(resolve_sort(Some("colour"), None).is_err());
        assert!(resolve_sort(None, Some("sideways")).is_err());
    }

    #[test]
    fn test_new_bookmark() {
        let bookmark = new_bookmark(
            " https://serde.rs ",
            &Some("  ".to_string()),
            &Some("Serialization".to_string()),
            &None,
            Some("rd"),
            &["rust,serde".to_string(), "rust".to_string()],
        )
        .unwrap();

        assert_eq!(bookmark.url, "https://serde.rs");
        assert!(bookmark.title.is_none());
        assert_eq!(bookmark.content.as_deref(), Some("Serialization"));
        assert_eq!(bookmark.status, Some(BookmarkStatus::Read));
        assert_eq!(bookmark.categories, vec!["rust", "serde"]);
    }

    #[rstest]
    #[case("ftp://files.example.com")]
    #[case("not a url")]
    #[case("")]
    fn test_new_bookmark_rejects_bad_url(#[case] url: &str) {
        let err = new_bookmark(url, &None, &None, &None, None, &[]).unwrap_err();
        assert!(matches!(err, LinkNovaError::InvalidInput(_)));
    }

    #[test]
    fn test_new_bookmark_rejects_bad_status() {
        let result = new_bookmark("https://a.com", &None, &None, &None, Some("later"), &[]);
        assert!(result.is_err());
    }
}
