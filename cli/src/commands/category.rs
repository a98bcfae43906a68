use super::helpers::{confirm, group_listing};
use super::{AppContext, LinkNovaCommand};
use crate::cli::{CategoryAction, GroupFields};
use crate::fetch_ui::with_spinner;
use linknova::error::{LinkNovaError, Result};
use linknova::models::{CategoryCreate, CategoryUpdate};

pub struct CategoryCommand {
    pub action: CategoryAction,
}

fn category_create(name: &str, fields: &GroupFields) -> Result<CategoryCreate> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LinkNovaError::InvalidInput(
            "Category name cannot be empty".to_string(),
        ));
    }
    Ok(CategoryCreate {
        name: name.to_string(),
        display_name: fields.display_name.clone(),
        description: fields.description.clone(),
        about: fields.about.clone(),
        priority: fields.priority.unwrap_or(0),
        public: fields.visibility().unwrap_or(false),
    })
}

fn category_update(fields: &GroupFields) -> CategoryUpdate {
    CategoryUpdate {
        display_name: fields.display_name.clone(),
        description: fields.description.clone(),
        about: fields.about.clone(),
        priority: fields.priority,
        public: fields.visibility(),
    }
}

impl LinkNovaCommand for CategoryCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let api = ctx.client.categories();
        let notifier = ctx.notifier();

        match &self.action {
            CategoryAction::List(args) => {
                let categories = with_spinner("Loading categories", || api.list())?;
                let categories = group_listing(categories, args)?;
                if categories.is_empty() && !ctx.format.is_structured() {
                    notifier.info("No categories found");
                    return Ok(());
                }
                ctx.format.print_records(&categories, ctx.no_color)?;
            }
            CategoryAction::Show { name } => {
                let (category, topics) = with_spinner("Loading category", || {
                    Ok(rayon::join(|| api.get(name), || api.topics_of(name)))
                })?;
                let mut category = category?;
                match topics {
                    Ok(topics) if category.topics.is_empty() => {
                        category.topics = topics.into_iter().map(|t| t.name).collect();
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("Could not load topics of '{}': {}", name, e),
                }
                ctx.format.print_record(&category, ctx.no_color)?;
            }
            CategoryAction::Create { name, fields } => {
                let category = category_create(name, fields)?;
                api.create(&category)?;
                notifier.success(format!("Created category '{}'", category.name));
            }
            CategoryAction::Update { name, fields } => {
                let update = category_update(fields);
                if update.is_empty() {
                    notifier.warning("Nothing to update");
                    return Ok(());
                }
                api.update(name, &update)?;
                notifier.success(format!("Updated category '{}'", name));
            }
            CategoryAction::Delete { name, force } => {
                if !force && !confirm(&format!("Delete category '{}'?", name))? {
                    eprintln!("Deletion cancelled.");
                    return Ok(());
                }
                api.delete(name)?;
                notifier.success(format!("Deleted category '{}'", name));
            }
            CategoryAction::Search { query } => {
                let categories = with_spinner("Searching", || api.search(query))?;
                if categories.is_empty() && !ctx.format.is_structured() {
                    notifier.info(format!("No categories match '{}'", query));
                    return Ok(());
                }
                ctx.format.print_records(&categories, ctx.no_color)?;
            }
            CategoryAction::Topics { name } => {
                let topics = with_spinner("Loading topics", || api.topics_of(name))?;
                if topics.is_empty() && !ctx.format.is_structured() {
                    notifier.info(format!("No topic contains '{}'", name));
                    return Ok(());
                }
                ctx.format.print_records(&topics, ctx.no_color)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_create_from_fields() {
        let fields = GroupFields {
            display_name: Some("Web Development".to_string()),
            priority: Some(4),
            public: true,
            ..Default::default()
        };
        let category = category_create("web", &fields).unwrap();
        assert_eq!(category.display_name.as_deref(), Some("Web Development"));
        assert_eq!(category.priority, 4);
        assert!(category.public);
    }

    #[test]
    fn test_category_create_rejects_blank_name() {
        let err = category_create("", &GroupFields::default()).unwrap_err();
        assert!(matches!(err, LinkNovaError::InvalidInput(_)));
    }

    #[test]
    fn test_category_update_empty() {
        assert!(category_update(&GroupFields::default()).is_empty());
        let update = category_update(&GroupFields {
            public: true,
            ..Default::default()
        });
        assert_eq!(update.public, Some(true));
    }
}
