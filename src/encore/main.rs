use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use encore::api::{CmdMessage, EncoreApi, MessageLevel, SaveSource};
use encore::catalog::Catalog;
use encore::error::{EncoreError, Result};
use encore::filters::{FilterCriteria, ALL_BOOLEAN_FILTERS};
use encore::format::{fnv1a32, format_datetime, price_string};
use encore::model::Concert;
use encore::state::SessionState;
use encore::store::fs::FileStore;
use encore::views::ALL_VIEW_NAME;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: EncoreApi<FileStore>,
    session: SessionState,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { search, tags, view }) => handle_list(&mut ctx, search, tags, view),
        Some(Commands::Show { id }) => handle_show(&ctx, id),
        Some(Commands::Views) => handle_views(&ctx),
        Some(Commands::Save {
            name,
            ids,
            search,
            tags,
        }) => handle_save(&mut ctx, name, ids, search, tags),
        Some(Commands::Remove { name }) => handle_remove(&mut ctx, name),
        Some(Commands::Rename { old, new }) => handle_rename(&mut ctx, old, new),
        Some(Commands::Tags) => handle_tags(&ctx),
        None => handle_list(&mut ctx, None, Vec::new(), None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match env::var_os("ENCORE_HOME") {
        Some(home) => PathBuf::from(home),
        None => ProjectDirs::from("com", "encore", "encore")
            .ok_or_else(|| EncoreError::Store("Could not determine data directory".to_string()))?
            .data_dir()
            .to_path_buf(),
    };

    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| env::var_os("ENCORE_CATALOG").map(PathBuf::from))
        .unwrap_or_else(|| data_dir.join("concerts.json"));

    // No catalog, no application: loading problems are fatal here
    let catalog = Arc::new(Catalog::from_path(&catalog_path).map_err(|e| {
        EncoreError::Catalog(format!(
            "Could not load catalog from {}: {}",
            catalog_path.display(),
            e
        ))
    })?);

    let store = FileStore::new(data_dir);
    let api = EncoreApi::new(catalog, store, Utc::now());

    Ok(AppContext {
        api,
        session: SessionState::new(),
    })
}

fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    tags: Vec<String>,
    view: Option<String>,
) -> Result<()> {
    ctx.session
        .criteria
        .set(FilterCriteria::new(search.unwrap_or_default(), tags));
    if let Some(view) = view {
        ctx.session.set_active_view(view);
    }

    let view_name = ctx.session.active_view.get();
    let criteria = ctx.session.criteria.get();
    let result = ctx.api.list_concerts(&view_name, &criteria)?;
    print_concerts(&result.listed_concerts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: String) -> Result<()> {
    let result = ctx.api.show_concert(&id)?;
    for concert in &result.listed_concerts {
        print_full_concert(concert);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_views(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_views()?;
    for summary in &result.view_summaries {
        let name = summary.name.color(view_color(&summary.name)).bold();
        let count = format!(
            "{} concert{}",
            summary.concert_count,
            if summary.concert_count == 1 { "" } else { "s" }
        );
        println!("{}  {}", name, count.dimmed());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_save(
    ctx: &mut AppContext,
    name: String,
    ids: Vec<String>,
    search: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let has_filters = search.is_some() || !tags.is_empty();
    let source = match (ids.is_empty(), has_filters) {
        (false, true) => {
            return Err(EncoreError::Api(
                "Give either concert ids or filters, not both".to_string(),
            ))
        }
        (false, false) => SaveSource::Ids(ids),
        (true, _) => SaveSource::Matching(FilterCriteria::new(search.unwrap_or_default(), tags)),
    };

    let result = ctx.api.save_view(&name, source)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, name: String) -> Result<()> {
    let result = ctx.api.remove_view(&name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rename(ctx: &mut AppContext, old: String, new: String) -> Result<()> {
    let result = ctx.api.rename_view(&old, &new)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_tags(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_tags()?;
    for tag in &result.tag_summaries {
        match hex_color(&tag.color) {
            Some(color) => println!("{}", tag.name.color(color)),
            None => println!("{}", tag.name),
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const DATE_WIDTH: usize = 38;

fn print_concerts(concerts: &[Concert]) {
    if concerts.is_empty() {
        println!("No concerts found.");
        return;
    }

    for concert in concerts {
        let date = format_datetime(concert.datetime);
        let pad = " ".repeat(DATE_WIDTH.saturating_sub(date.width()));
        println!(
            "{}{}{} — {}  {}{}",
            date.dimmed(),
            pad,
            concert.title.bold(),
            concert.venue,
            price_string(concert).dimmed(),
            tag_chips(concert)
        );
        println!("{}{}", " ".repeat(DATE_WIDTH), concert.id.dimmed());
    }
}

fn print_full_concert(concert: &Concert) {
    println!("{}", concert.title.bold());
    if let Some(subtitle) = &concert.subtitle {
        println!("{}", subtitle.italic());
    }
    println!("{}, {}", format_datetime(concert.datetime), concert.venue);
    println!("{}{}", price_string(concert), tag_chips(concert));

    if !concert.performers.is_empty() {
        println!();
        for performer in &concert.performers {
            match &performer.instrument {
                Some(instrument) => println!("  {}, {}", performer.name, instrument.dimmed()),
                None => println!("  {}", performer.name),
            }
        }
    }

    if !concert.pieces.is_empty() {
        println!();
        for piece in &concert.pieces {
            println!("  {} — {}", piece.composer, piece.title);
        }
    }

    if let Some(description) = &concert.description {
        println!("\n{}", description);
    }
    println!("\n{}", concert.url.underline().dimmed());
}

/// Colored chips for the registered tags this concert satisfies.
fn tag_chips(concert: &Concert) -> String {
    ALL_BOOLEAN_FILTERS
        .iter()
        .filter(|filter| (filter.predicate)(concert))
        .map(|filter| match hex_color(filter.tag_color) {
            Some(color) => format!(" [{}]", filter.tag_name.color(color)),
            None => format!(" [{}]", filter.tag_name),
        })
        .collect()
}

fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::TrueColor { r, g, b })
}

const VIEW_PALETTE: &[Color] = &[
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
    Color::Green,
    Color::Yellow,
    Color::Red,
];

/// Stable color per view name, so a view keeps its color across runs.
fn view_color(name: &str) -> Color {
    if name == ALL_VIEW_NAME {
        return Color::White;
    }
    VIEW_PALETTE[fnv1a32(name) as usize % VIEW_PALETTE.len()]
}
