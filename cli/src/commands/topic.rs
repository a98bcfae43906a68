use super::helpers::{apply_category_ops, confirm, group_listing};
use super::{AppContext, LinkNovaCommand};
use crate::cli::{GroupFields, TopicAction};
use crate::fetch_ui::with_spinner;
use crate::interactive::CategoryEditor;
use linknova::error::{LinkNovaError, Result};
use linknova::models::{TopicCreate, TopicUpdate};

pub struct TopicCommand {
    pub action: TopicAction,
}

fn topic_create(name: &str, fields: &GroupFields) -> Result<TopicCreate> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LinkNovaError::InvalidInput("Topic name cannot be empty".to_string()));
    }
    Ok(TopicCreate {
        name: name.to_string(),
        display_name: fields.display_name.clone(),
        description: fields.description.clone(),
        about: fields.about.clone(),
        priority: fields.priority.unwrap_or(0),
        public: fields.visibility().unwrap_or(false),
    })
}

fn topic_update(fields: &GroupFields) -> TopicUpdate {
    TopicUpdate {
        display_name: fields.display_name.clone(),
        description: fields.description.clone(),
        about: fields.about.clone(),
        priority: fields.priority,
        public: fields.visibility(),
    }
}

impl LinkNovaCommand for TopicCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let api = ctx.client.topics();
        let notifier = ctx.notifier();

        match &self.action {
            TopicAction::List(args) => {
                let topics = with_spinner("Loading topics", || api.list())?;
                let topics = group_listing(topics, args)?;
                if topics.is_empty() && !ctx.format.is_structured() {
                    notifier.info("No topics found");
                    return Ok(());
                }
                ctx.format.print_records(&topics, ctx.no_color)?;
            }
            TopicAction::Show { name } => {
                let topic = with_spinner("Loading topic", || api.get(name))?;
                ctx.format.print_record(&topic, ctx.no_color)?;
            }
            TopicAction::Create { name, fields } => {
                let topic = topic_create(name, fields)?;
                api.create(&topic)?;
                notifier.success(format!("Created topic '{}'", topic.name));
            }
            TopicAction::Update { name, fields } => {
                let update = topic_update(fields);
                if update.is_empty() {
                    notifier.warning("Nothing to update");
                    return Ok(());
                }
                api.update(name, &update)?;
                notifier.success(format!("Updated topic '{}'", name));
            }
            TopicAction::Delete { name, force } => {
                if !force && !confirm(&format!("Delete topic '{}'?", name))? {
                    eprintln!("Deletion cancelled.");
                    return Ok(());
                }
                api.delete(name)?;
                notifier.success(format!("Deleted topic '{}'", name));
            }
            TopicAction::Cats { name, ops } => {
                let topic = with_spinner("Loading topic", || api.get(name))?;
                let categories =
                    apply_category_ops(topic.categories, ops, &api.assignment(name), &notifier)?;
                println!("{}: {}", name, categories.join(", "));
            }
            TopicAction::EditCats { name } => {
                let categories = ctx.client.categories();
                let (topic, all) = rayon::join(|| api.get(name), || categories.list());
                let topic = topic?;
                let available = match all {
                    Ok(all) => all.into_iter().map(|c| c.name).collect(),
                    Err(e) => {
                        log::warn!("Could not load category list: {}", e);
                        Vec::new()
                    }
                };

                let target = api.assignment(name);
                let mut editor = CategoryEditor::new(
                    format!("topic {}", name),
                    topic.categories,
                    &target,
                    available,
                    notifier,
                );
                editor.run()?;
            }
        }
        Ok(())
    }
}
