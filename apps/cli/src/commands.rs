//! # Command Handlers
//!
//! One handler per subcommand. Each prints plain text, or JSON with
//! `--json`, and reports failures as a [`CommandError`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{
    AddArgs, CatalogAction, Cli, Command, ExportArgs, ItemQueryArgs, SaveArgs, ShareArgs,
};
use listify_core::catalog::CatalogKind;
use listify_core::export::{export_file_name, item_count_label, ColorMode, ExportLayout, Region};
use listify_core::share::format_share_text;
use listify_core::{ItemFilter, ListSummary, NewItem, ShoppingItem, ShoppingList};
use listify_db::Database;
use listify_sync::session::visible_items;
use listify_sync::{
    CommandError, CommandResult, EngineConfig, ListSyncEngine, LoadOutcome, LogEmitter,
    ShoppingSession, SyncError, SyncResult, UnloadOutcome,
};

// =============================================================================
// App Context
// =============================================================================

/// Everything a handler needs.
pub struct App {
    engine: ListSyncEngine,
    session: ShoppingSession,
    config: EngineConfig,
    json: bool,
}

impl App {
    /// Loads config and opens the database.
    ///
    /// ## Database Path Priority
    /// 1. `--db`
    /// 2. `LISTIFY_DB_PATH`, then `[database] path` in the config file
    /// 3. Platform data directory
    pub async fn open(cli: &Cli) -> Result<Self, CommandError> {
        let mut config = EngineConfig::load(cli.config.clone())?;
        if let Some(ref db) = cli.db {
            config.database.path = Some(db.clone());
        }

        let path = config.database_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                CommandError::internal(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }
        debug!(path = %path.display(), "Opening database");

        let db = Database::new(config.db_config())
            .await
            .map_err(SyncError::from)?;
        let engine = ListSyncEngine::with_emitter(db, Arc::new(LogEmitter));

        Ok(App {
            session: ShoppingSession::new(engine.clone()),
            engine,
            config,
            json: cli.json,
        })
    }

    /// Runs one subcommand.
    pub async fn run(&self, command: Command) -> CommandResult {
        match command {
            Command::Add(args) => self.add(args).await,
            Command::Items(query) => self.items(&query).await,
            Command::Toggle { id } => self.toggle(id).await,
            Command::Remove { id } => self.remove(id).await,
            Command::Save(args) => self.save(args).await,
            Command::Lists => self.lists().await,
            Command::Load { id } => self.load(id).await,
            Command::Unload { id } => self.unload(id).await,
            Command::Rename { id, name } => {
                self.session.rename_list(id, &name).await?;
                self.print(&id, || format!("Renamed list #{} to \"{}\"", id, name.trim()))
            }
            Command::DeleteList { id } => {
                self.session.delete_list(id).await?;
                self.print(&id, || format!("Deleted list #{}", id))
            }
            Command::Share(args) => self.share(args).await,
            Command::Export(args) => self.export(args).await,
            Command::Summary => self.summary().await,
            Command::Units { action } => self.catalog(CatalogKind::Unit, action).await,
            Command::Categories { action } => self.catalog(CatalogKind::Category, action).await,
        }
    }

    pub async fn close(&self) {
        self.engine.database().close().await;
    }

    // =========================================================================
    // Items
    // =========================================================================

    async fn add(&self, args: AddArgs) -> CommandResult {
        let item = self
            .engine
            .add_item(NewItem::new(args.name, args.qty, args.unit, args.category))
            .await?;

        self.print(&item, || format!("Added {}", item_line(&item)))
    }

    async fn items(&self, query: &ItemQueryArgs) -> CommandResult {
        let items = self.matching_items(query).await?;

        self.print(&items, || {
            if items.is_empty() {
                return "No items".to_string();
            }
            items.iter().map(item_line).collect::<Vec<_>>().join("\n")
        })
    }

    async fn toggle(&self, id: i64) -> CommandResult {
        let item = self.engine.toggle_bought_by_id(id).await?;
        self.print(&item, || item_line(&item))
    }

    async fn remove(&self, id: i64) -> CommandResult {
        let removed = self.engine.delete_item(id).await?;

        self.print(&removed, || match &removed {
            Some(item) => format!("Removed {}", item_line(item)),
            None => format!("No item #{}", id),
        })
    }

    async fn matching_items(&self, query: &ItemQueryArgs) -> SyncResult<Vec<ShoppingItem>> {
        let all = self.engine.database().items().list(&ItemFilter::All).await?;

        Ok(visible_items(
            &all,
            query.filter.into(),
            query.category.as_deref(),
            query.search.as_deref().unwrap_or_default(),
        ))
    }

    // =========================================================================
    // Saved Lists
    // =========================================================================

    async fn save(&self, args: SaveArgs) -> CommandResult {
        let mut items = self.matching_items(&args.query).await?;
        if !args.ids.is_empty() {
            items.retain(|item| args.ids.contains(&item.id));
        }

        self.session.save_current_list(&args.name, &items).await?;

        info!(name = %args.name, items = items.len(), "List saved");
        self.print(&items.len(), || {
            format!("Saved \"{}\" ({})", args.name.trim(), item_count_label(items.len()))
        })
    }

    async fn lists(&self) -> CommandResult {
        let lists = self.engine.database().lists().list_all().await.map_err(SyncError::from)?;

        let mut rows = Vec::with_capacity(lists.len());
        for list in lists {
            let items = self.engine.list_item_count(list.id).await?;
            rows.push(ListRow { list, items });
        }

        self.print(&rows, || {
            if rows.is_empty() {
                return "No saved lists".to_string();
            }
            rows.iter().map(list_line).collect::<Vec<_>>().join("\n")
        })
    }

    async fn load(&self, id: i64) -> CommandResult {
        let outcome = self.engine.load_list(id).await?;

        let added = match outcome {
            LoadOutcome::Loaded { items_added } => Some(items_added),
            LoadOutcome::NotFound => None,
        };
        self.print(&added, || match added {
            Some(n) => format!("Loaded list #{} ({} added)", id, item_count_label(n)),
            None => format!("No list #{}", id),
        })
    }

    async fn unload(&self, id: i64) -> CommandResult {
        let outcome = self.engine.unload_list(id).await?;

        let text = match outcome {
            UnloadOutcome::Unloaded {
                items_removed,
                items_missing: 0,
            } => format!("Unloaded list #{} ({} removed)", id, item_count_label(items_removed)),
            UnloadOutcome::Unloaded {
                items_removed,
                items_missing,
            } => format!(
                "Unloaded list #{} ({} removed, {} no longer on the list)",
                id,
                item_count_label(items_removed),
                items_missing
            ),
            UnloadOutcome::NotActive => format!("List #{} is not loaded", id),
            UnloadOutcome::NotFound => format!("No list #{}", id),
        };

        self.print(&text, || text.clone())
    }

    // =========================================================================
    // Share / Export / Summary
    // =========================================================================

    async fn share(&self, args: ShareArgs) -> CommandResult {
        let items = self.matching_items(&args.query).await?;

        let mut options = self.config.share_options();
        if let Some(heading) = args.heading {
            options.heading = heading;
        }
        options.show_heading &= !args.no_heading;
        options.show_checkboxes |= args.checkboxes;
        options.show_serial_numbers &= !args.no_serial;
        options.show_summary &= !args.no_summary;
        options.show_footer &= !args.no_footer;
        options.group_by_category &= !args.flat;

        let text = format_share_text(&items, &options);
        self.print(&text, || text.clone().unwrap_or_else(|| "No items to share".to_string()))
    }

    async fn export(&self, args: ExportArgs) -> CommandResult {
        let items = self.matching_items(&args.query).await?;
        if items.is_empty() {
            return Err(SyncError::empty_selection("export").into());
        }

        let mode = ColorMode::from(args.mode);
        let pages = ExportLayout::paginate(&items);
        let file_name = export_file_name(mode, chrono::Utc::now().timestamp_millis());

        let export = ExportView {
            file_name: &file_name,
            mode,
            pages: &pages,
        };
        self.print(&export, || {
            let mut out = vec![format!("{} ({} pages)", file_name, pages.len())];
            for page in &pages {
                out.push(format!("Page {}", page.number));
                out.extend(page.regions.iter().map(region_line));
            }
            out.join("\n")
        })
    }

    async fn summary(&self) -> CommandResult {
        let summary = self.engine.summary().await?;
        self.print(&summary, || summary_line(&summary))
    }

    // =========================================================================
    // Units & Categories
    // =========================================================================

    async fn catalog(&self, kind: CatalogKind, action: Option<CatalogAction>) -> CommandResult {
        match action.unwrap_or(CatalogAction::List) {
            CatalogAction::List => {
                let entries = self.engine.catalog(kind).await?;
                self.print(&entries, || {
                    if entries.is_empty() {
                        format!("No custom {} entries", kind.field())
                    } else {
                        entries.join("\n")
                    }
                })
            }
            CatalogAction::Add { entry } => {
                let added = self.engine.add_catalog_entry(kind, &entry).await?;
                self.print(&added, || match added {
                    true => format!("Added {} \"{}\"", kind.field(), entry.trim()),
                    false => format!("{} \"{}\" already exists", kind.field(), entry.trim()),
                })
            }
            CatalogAction::Remove { entry } => {
                let removed = self.engine.delete_catalog_entry(kind, &entry).await?;
                self.print(&removed, || match removed {
                    true => format!("Removed {} \"{}\"", kind.field(), entry.trim()),
                    false => format!("No custom {} \"{}\"", kind.field(), entry.trim()),
                })
            }
        }
    }

    // =========================================================================
    // Output
    // =========================================================================

    fn print<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> CommandResult {
        if self.json {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| CommandError::internal(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

// =============================================================================
// Views
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListRow {
    #[serde(flatten)]
    list: ShoppingList,
    items: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportView<'a> {
    file_name: &'a str,
    mode: ColorMode,
    pages: &'a [listify_core::export::Page],
}

fn item_line(item: &ShoppingItem) -> String {
    let mark = if item.is_bought { "[x]" } else { "[ ]" };
    let category = if item.category.is_empty() {
        String::new()
    } else {
        format!("  ({})", item.category)
    };
    format!(
        "#{:<4} {} {} - {} {}{}",
        item.id, mark, item.name, item.quantity, item.unit, category
    )
}

fn list_line(row: &ListRow) -> String {
    let active = if row.list.is_active { "  ACTIVE" } else { "" };
    format!(
        "#{:<4} {}  {}  {}{}",
        row.list.id,
        row.list.name,
        item_count_label(row.items.max(0) as usize),
        row.list.created_at.format("%Y-%m-%d %H:%M"),
        active
    )
}

fn region_line(region: &Region) -> String {
    match region {
        Region::Header { y } => format!("  {:>4}  header", y),
        Region::Divider { y } => format!("  {:>4}  ----", y),
        Region::CategoryHeader { category, count, y } => {
            format!("  {:>4}  {} ({})", y, category.to_uppercase(), item_count_label(*count))
        }
        Region::ItemRow { item, y } => format!("  {:>4}    {}", y, item_line(item)),
        Region::Footer { summary, y } => format!("  {:>4}  {}", y, summary_line(summary)),
    }
}

fn summary_line(summary: &ListSummary) -> String {
    if summary.is_complete() {
        return format!("All {} bought", item_count_label(summary.total));
    }
    format!(
        "{} of {} bought ({}%), {} remaining",
        summary.bought, summary.total, summary.progress_percent, summary.remaining
    )
}
