use clap::Parser;
use directories::ProjectDirs;
use glaze::api::{ConfigAction, GlazeApi, GlazePaths, StateRequest, ThemeAction};
use glaze::commands::render::RenderTarget;
use glaze::config::GlazeConfig;
use glaze::error::{GlazeError, Result};
use glaze::store::fs::FileCatalog;
use glaze::theme::{FilePreferences, Theme};
use std::path::PathBuf;

mod args;
mod cli;
use args::{Cli, Commands, QueryCommands, StateArgs, ThemeCommands};
use cli::print::{
    print_config, print_messages, print_piece, print_pieces, print_state, print_tags,
};

const HOME_ENV: &str = "GLAZE_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

type App = GlazeApi<FileCatalog, FilePreferences>;

fn run() -> Result<()> {
    let cli = Cli::parse();
    glaze::logging::init(cli.verbose);
    let mut api = init_api(&cli)?;

    match cli.command {
        Some(Commands::List { query, state }) => handle_list(&api, query, state),
        Some(Commands::Tags) => handle_tags(&api),
        Some(Commands::Show { slug }) => handle_show(&api, &slug),
        Some(Commands::Query { action }) => handle_query(&api, action),
        Some(Commands::Theme { action }) => handle_theme(&mut api, action),
        Some(Commands::Config { key, value }) => handle_config(&api, key, value),
        Some(Commands::Render { query, piece, open }) => handle_render(&mut api, query, piece, open),
        None => handle_list(&api, None, StateArgs::default()),
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "glaze", "glaze")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| GlazeError::Config("Could not determine data dir".into()))
}

fn init_api(cli: &Cli) -> Result<App> {
    let data_dir = data_dir()?;
    let config = GlazeConfig::load(&data_dir)?;
    let catalog_dir = cli
        .catalog
        .clone()
        .unwrap_or_else(|| config.catalog_dir.clone());
    tracing::debug!(data_dir = %data_dir.display(), catalog = %catalog_dir.display(), "starting");

    let paths = GlazePaths::new(data_dir);
    let prefs = FilePreferences::new(paths.preferences_file());
    Ok(GlazeApi::new(FileCatalog::new(catalog_dir), prefs, paths, config))
}

fn to_request(query: Option<String>, state: StateArgs) -> StateRequest {
    StateRequest {
        query,
        techniques: state.techniques,
        colors: state.colors,
        featured: state.featured,
        sort: state.sort,
    }
}

fn handle_list(api: &App, query: Option<String>, state: StateArgs) -> Result<()> {
    let result = api.list(&to_request(query, state))?;
    print_pieces(&result.listed_pieces);
    print_messages(&result.messages);
    Ok(())
}

fn handle_tags(api: &App) -> Result<()> {
    let result = api.tags()?;
    if let Some(tags) = &result.tags {
        print_tags(tags);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(api: &App, slug: &str) -> Result<()> {
    let result = api.show(slug)?;
    for listed in &result.listed_pieces {
        print_piece(listed, &result.images);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_query(api: &App, action: QueryCommands) -> Result<()> {
    let result = match action {
        QueryCommands::Encode { state } => api.encode_query(&to_request(None, state))?,
        QueryCommands::Decode { query } => api.decode_query(&query)?,
    };
    if let (Some(state), Some(query)) = (&result.state, &result.query) {
        print_state(state, query);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_theme(api: &mut App, action: Option<ThemeCommands>) -> Result<()> {
    let action = match action {
        None | Some(ThemeCommands::Get) => ThemeAction::Show,
        Some(ThemeCommands::Set { theme }) => {
            let theme: Theme = theme.parse().map_err(GlazeError::Api)?;
            ThemeAction::Set(theme)
        }
        Some(ThemeCommands::Toggle) => ThemeAction::Toggle,
    };

    let result = api.theme(action)?;
    if result.messages.is_empty() {
        if let Some(theme) = result.theme {
            println!("{}", theme);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(api: &App, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let is_show_all = matches!(action, ConfigAction::ShowAll);

    let result = api.config(action)?;
    if is_show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_render(
    api: &mut App,
    query: Option<String>,
    piece: Option<String>,
    open: Option<usize>,
) -> Result<()> {
    let target = match piece {
        Some(slug) => RenderTarget::Piece { slug, open },
        None => RenderTarget::Gallery {
            query: query.unwrap_or_default(),
        },
    };
    let result = api.render(target)?;
    if let Some(html) = &result.html {
        print!("{}", html);
    }
    Ok(())
}
