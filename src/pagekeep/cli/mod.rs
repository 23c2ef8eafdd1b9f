//! Terminal client: turns parsed arguments into API calls and prints the
//! results. The only place that writes to stdout.

mod print;

use crate::args::{Cli, Commands, ExportKind, SidebarState};
use directories::ProjectDirs;
use pagekeep::api::{
    CmdMessage, ConfigAction, CreateOptions, ExportFormat, ListFilter, PageChange, PagekeepApi,
};
use pagekeep::bridge::{BridgeConfig, EditorBridge, HttpRemote, SaveStatus, SharedRemote};
use pagekeep::config::AppConfig;
use pagekeep::document::DocNode;
use pagekeep::error::{PagekeepError, Result};
use pagekeep::server;
use pagekeep::store::fs_backend::FsBackend;
use print::{print_config, print_messages, print_page, print_pages, print_templates};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

struct AppContext {
    api: PagekeepApi<FsBackend>,
}

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    debug!(data_dir = %data_dir.display(), "using data dir");

    if let Some(Commands::Serve { addr }) = &cli.command {
        return handle_serve(&data_dir, addr.clone());
    }

    let mut ctx = AppContext {
        api: PagekeepApi::new(FsBackend::new(&data_dir), &data_dir),
    };

    match cli.command {
        Some(Commands::List { tag, favorites }) => handle_list(&ctx, tag, favorites),
        Some(Commands::Tree) | None => handle_tree(&ctx),
        Some(Commands::Show { page }) => handle_show(&ctx, page),
        Some(Commands::Create {
            title,
            icon,
            parent,
            template,
            tags,
        }) => {
            let options = CreateOptions {
                icon,
                parent,
                template,
                tags,
            };
            handle_create(&mut ctx, title, options)
        }
        Some(Commands::Rename { page, title }) => {
            handle_update(&mut ctx, &page, PageChange::Rename(title))
        }
        Some(Commands::Icon { page, icon }) => handle_update(&mut ctx, &page, PageChange::Icon(icon)),
        Some(Commands::Move { page, parent, root }) => {
            let parent = if root { None } else { parent };
            handle_update(&mut ctx, &page, PageChange::Move(parent))
        }
        Some(Commands::Tag { page, tags }) => handle_update(&mut ctx, &page, PageChange::Tags(tags)),
        Some(Commands::Delete { pages }) => handle_delete(&mut ctx, pages),
        Some(Commands::Select { page, clear }) => {
            let page = if clear { None } else { page };
            handle_select(&mut ctx, page)
        }
        Some(Commands::Favorite { page }) => handle_favorite(&mut ctx, &page),
        Some(Commands::Favorites) => handle_favorites(&ctx),
        Some(Commands::Search { term }) => handle_search(&ctx, &term),
        Some(Commands::Recent) => handle_recent(&ctx),
        Some(Commands::Templates) => handle_templates(&ctx),
        Some(Commands::Sidebar { state }) => handle_sidebar(&mut ctx, state),
        Some(Commands::Export { page, format }) => handle_export(&ctx, &page, format),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Write { page, file }) => handle_write(ctx, &page, file),
        // Handled before the store is opened.
        Some(Commands::Serve { .. }) => Ok(()),
    }
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let dirs = ProjectDirs::from("com", "pagekeep", "pagekeep")
        .ok_or_else(|| PagekeepError::Api("Could not determine data dir".to_string()))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn handle_list(ctx: &AppContext, tag: Option<String>, favorites_only: bool) -> Result<()> {
    let filter = ListFilter {
        tag,
        favorites_only,
    };
    let result = ctx.api.list_pages(&filter)?;
    print_pages(&result.listed_pages);
    print_messages(&result.messages);
    Ok(())
}

fn handle_tree(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.page_tree()?;
    print_pages(&result.listed_pages);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, page: Option<String>) -> Result<()> {
    let result = ctx.api.view_page(page.as_deref())?;
    if let Some(page) = result.affected_pages.first() {
        print_page(
            page,
            &result.breadcrumbs,
            &result.listed_pages,
            result.output.as_deref().unwrap_or_default(),
        );
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_create(ctx: &mut AppContext, title: String, options: CreateOptions) -> Result<()> {
    let result = ctx.api.create_page(title, options)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &mut AppContext, page: &str, change: PageChange) -> Result<()> {
    let result = ctx.api.update_page(page, change)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, pages: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_pages(&pages)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_select(ctx: &mut AppContext, page: Option<String>) -> Result<()> {
    let result = ctx.api.select_page(page.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_favorite(ctx: &mut AppContext, page: &str) -> Result<()> {
    let result = ctx.api.toggle_favorite(page)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_favorites(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.favorites()?;
    print_pages(&result.listed_pages);
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: &str) -> Result<()> {
    let result = ctx.api.search(term)?;
    print_pages(&result.listed_pages);
    print_messages(&result.messages);
    Ok(())
}

fn handle_recent(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.recent()?;
    print_pages(&result.listed_pages);
    print_messages(&result.messages);
    Ok(())
}

fn handle_templates(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.templates()?;
    print_templates(&result.templates);
    Ok(())
}

fn handle_sidebar(ctx: &mut AppContext, state: Option<SidebarState>) -> Result<()> {
    let result = match state {
        None => {
            let open = ctx.api.store().sidebar_open();
            println!("{}", if open { "open" } else { "closed" });
            return Ok(());
        }
        Some(SidebarState::Open) => ctx.api.sidebar(Some(true))?,
        Some(SidebarState::Closed) => ctx.api.sidebar(Some(false))?,
        Some(SidebarState::Toggle) => ctx.api.sidebar(None)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, page: &str, format: ExportKind) -> Result<()> {
    let format = match format {
        ExportKind::Markdown => ExportFormat::Markdown,
        ExportKind::Html => ExportFormat::Html,
        ExportKind::Json => ExportFormat::Json,
    };
    let result = ctx.api.export_page(page, format)?;
    if let Some(output) = &result.output {
        println!("{}", output.trim_end());
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_write(ctx: AppContext, page: &str, file: Option<PathBuf>) -> Result<()> {
    let text = match file {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };
    let content = DocNode::from_plain_text(&text);
    let config = AppConfig::load(ctx.api.data_dir())?;

    let mut api = ctx.api;
    let selected = api.select_page(Some(page))?;
    let title = selected
        .affected_pages
        .first()
        .map(|p| p.display_title())
        .unwrap_or_else(|| page.to_string());
    let store = api.into_store().shared();

    let runtime = tokio::runtime::Runtime::new()?;
    let status = runtime.block_on(async {
        let remote = match config.remote_url.as_deref() {
            Some(url) => Some(Arc::new(HttpRemote::new(url)?) as SharedRemote),
            None => None,
        };
        let bridge = EditorBridge::spawn(store, remote, BridgeConfig::from(&config));
        bridge.edit(content);
        bridge.flush().await;

        let mut status = bridge.status();
        if status.wait_for(|s| !s.is_pending()).await.is_err() {
            debug!("editor bridge stopped before the save finished");
        }
        let status = bridge.current_status();
        bridge.shutdown().await;
        Ok::<_, PagekeepError>(status)
    })?;

    match status {
        SaveStatus::SaveFailed => {
            print_messages(&[CmdMessage::warning(format!(
                "Saved {} locally, remote save failed",
                title
            ))]);
            Err(PagekeepError::Remote(
                "content not saved to the remote".to_string(),
            ))
        }
        other => {
            print_messages(&[CmdMessage::success(format!("{}: {}", other, title))]);
            Ok(())
        }
    }
}

fn handle_serve(data_dir: &Path, addr: Option<String>) -> Result<()> {
    let config = AppConfig::load(data_dir)?;
    let addr = addr.unwrap_or(config.server_addr);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(&addr))
}
