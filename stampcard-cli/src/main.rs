//! `stampcard`: run a search and table session over a JSON record file.

mod args;
mod logging;
mod output;
mod paths;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};
use stampcard_lib::config::StampcardConfig;
use stampcard_lib::error::LoadError;
use stampcard_lib::input::EventResult;
use stampcard_lib::loader::SharedLoader;
use stampcard_lib::model::Record;
use stampcard_lib::search::{SearchBox, SearchIndex};
use stampcard_lib::storage::{SlotProvider, SqliteStorage};
use stampcard_lib::table::{Column, SortableTable, TableOptions};

use args::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(dir) = paths::log_dir() {
        logging::init(&dir, cli.verbose);
    }

    let config = load_config(cli.config.as_deref())?;
    let loader = SharedLoader::new();
    let rows = load_rows(&loader, &cli.rows).await?;
    info!("loaded {} records from {}", rows.len(), cli.rows.display());

    run(&cli, &config, &rows)
}

fn load_config(explicit: Option<&Path>) -> Result<StampcardConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match paths::config_dir() {
            Some(dir) => StampcardConfig::path(&dir),
            None => return Ok(StampcardConfig::default()),
        },
    };
    StampcardConfig::load(&path).with_context(|| format!("reading config {}", path.display()))
}

async fn load_rows(
    loader: &SharedLoader<Vec<Record>>,
    path: &Path,
) -> Result<Arc<Vec<Record>>> {
    let path = path.to_path_buf();
    let rows = loader
        .get_or_load(|| async move {
            let text = fs::read_to_string(&path)
                .map_err(|e| LoadError::new(format!("{}: {}", path.display(), e)))?;
            serde_json::from_str::<Vec<Record>>(&text).map_err(LoadError::from_display)
        })
        .await?;
    Ok(rows)
}

fn open_storage(config: &StampcardConfig) -> Result<SlotProvider> {
    let path: PathBuf = match &config.storage.path {
        Some(path) => path.clone(),
        None => paths::tables_db().context("no data directory for table state")?,
    };
    let storage = SqliteStorage::open(&path)
        .with_context(|| format!("opening table state {}", path.display()))?;
    Ok(SlotProvider::new(storage))
}

fn build_columns(cli: &Cli, rows: &[Record]) -> Vec<Column<Record>> {
    let keys: Vec<String> = if cli.columns.is_empty() {
        rows.first()
            .map(|r| r.field_names().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    } else {
        cli.columns.clone()
    };
    keys.into_iter()
        .map(|key| {
            let sortable = cli.sortable.is_empty() || cli.sortable.contains(&key);
            let column = Column::new(key.clone(), key);
            if sortable { column.sortable() } else { column }
        })
        .collect()
}

fn run(cli: &Cli, config: &StampcardConfig, rows: &[Record]) -> Result<()> {
    let columns = build_columns(cli, rows);
    if columns.is_empty() {
        bail!("no columns: pass --columns or provide at least one record");
    }

    let fields: Vec<String> = if cli.search_fields.is_empty() {
        columns.iter().map(|c| c.key.clone()).collect()
    } else {
        cli.search_fields.clone()
    };
    let mut search = SearchBox::new(SearchIndex::new(fields), &config.search);

    if let Some(query) = &cli.query {
        search.input(query.as_str(), Instant::now());
        search.flush(rows);
        if !search.suggestions().is_empty() {
            println!("Suggestions for {:?}:", query);
            for line in output::suggestion_lines(search.suggestions()) {
                println!("{}", line);
            }
            println!();
        }
    }
    if let Some(n) = cli.pick {
        let change = n
            .checked_sub(1)
            .and_then(|i| search.select(i))
            .with_context(|| format!("no suggestion {}", n))?;
        info!("picked {:?} in {:?}", change.query, change.field);
    }

    let mut options = TableOptions::from_config(&config.table)
        .respect_stored_sort(cli.respect_stored_sort);
    if let Some(key) = &cli.table_key {
        options = options.storage_key(key.as_str());
    }
    let mut table = match &cli.table_key {
        Some(_) => SortableTable::with_storage(columns, options, open_storage(config)?)?,
        None => SortableTable::new(columns, options)?,
    };

    for key in &cli.click {
        if table.click_header(key) == EventResult::Ignored {
            warn!("click on {} ignored", key);
            eprintln!("warning: column '{}' is not sortable", key);
        }
    }
    for (key, delta) in &cli.resize {
        if table.begin_resize(key, 0) != EventResult::StartDrag {
            eprintln!("warning: column '{}' cannot be resized", key);
            continue;
        }
        table.drag_to(*delta);
        table.end_resize();
    }

    let visible = search.filter(rows);
    let rendered = table.render(&visible);
    for line in output::table_lines(&rendered) {
        println!("{}", line);
    }
    println!();
    match search.pinned_field() {
        Some(field) => println!(
            "{} of {} records ({} = {:?})",
            visible.len(),
            rows.len(),
            field,
            search.query()
        ),
        None => println!("{} of {} records", visible.len(), rows.len()),
    }
    Ok(())
}
