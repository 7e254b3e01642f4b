//! omdb - OMDb movie metadata CLI.

/// Application configuration (TOML).
mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{API_KEY_ENV, AppConfig, resolve_config_path};
use omdb_api::{LocalOmdbApi, OmdbClient, OmdbDetails, OmdbSearchResponse, QueryData};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Free-text search by title.
    Search(SearchArgs),
    /// Look up a single title by exact name.
    Title(TitleArgs),
    /// Look up a single title by IMDb id.
    Id(IdArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search term (e.g. "Rush").
    #[arg(long, required = true)]
    title: String,
    /// Filter by year.
    #[arg(long)]
    year: Option<String>,
    /// Media category: movie, series or episode.
    #[arg(long = "type")]
    kind: Option<String>,
    /// Result page.
    #[arg(long)]
    page: Option<String>,
}

/// Arguments for the `title` subcommand.
#[derive(clap::Args)]
struct TitleArgs {
    /// Exact title (e.g. "Inception").
    #[arg(long, required = true)]
    title: String,
    /// Filter by year.
    #[arg(long)]
    year: Option<String>,
    /// Media category: movie, series or episode.
    #[arg(long = "type")]
    kind: Option<String>,
}

/// Arguments for the `id` subcommand.
#[derive(clap::Args)]
struct IdArgs {
    /// IMDb id (e.g. "tt1375666").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Store the API key in the config file.
    SetKey(SetKeyArgs),
    /// Show the resolved configuration.
    Show,
}

/// Arguments for the `config set-key` subcommand.
#[derive(clap::Args)]
struct SetKeyArgs {
    /// OMDb API key.
    key: String,
}

/// Shapes CLI search/title arguments into a query.
fn to_query(title: &str, year: Option<&str>, kind: Option<&str>) -> QueryData {
    let mut params = QueryData::title(title);
    if let Some(year) = year {
        params = params.year(year);
    }
    if let Some(kind) = kind {
        params = params.search_type(kind);
    }
    params
}

/// Builds an `OmdbClient` from the config file and `OMDB_API_KEY`.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the configured base
/// URL is invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(dir: Option<&Path>) -> Result<OmdbClient> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let mut builder = OmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(key) = config.resolve_api_key(std::env::var(API_KEY_ENV).ok()) {
        builder = builder.api_key(key);
    } else {
        tracing::debug!("No API key configured, sending requests without apikey");
    }
    if let Some(ref base_url) = config.api.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid api.base_url in config: {base_url}"))?;
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build OMDb client")
}

/// Logs a search response, one line per result.
fn log_search_response(response: &OmdbSearchResponse) {
    tracing::info!("Total results: {}", response.total_results);
    for result in &response.search {
        tracing::info!("{}", result);
    }
}

/// Logs a lookup response.
fn log_details(details: &OmdbDetails) {
    tracing::info!("{}", details);
    tracing::info!("Rated: {}  Runtime: {}", details.rated, details.runtime);
    tracing::info!("Genre: {}", details.genre);
    tracing::info!("Director: {}", details.director);
    tracing::info!("Actors: {}", details.actors);
    tracing::info!(
        "IMDb: {} ({} votes)",
        details.imdb_rating,
        details.imdb_votes
    );
    for rating in &details.ratings {
        tracing::info!("  {}: {}", rating.source, rating.value);
    }
    tracing::info!("Plot: {}", details.plot);
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&Path>) -> Result<()> {
    let client = build_omdb_client(dir)?;
    let mut params = to_query(&args.title, args.year.as_deref(), args.kind.as_deref());
    if let Some(ref page) = args.page {
        params = params.page(page);
    }

    let response = client
        .search(&params)
        .await
        .context("OMDb search request failed")?;
    log_search_response(&response);

    Ok(())
}

/// Runs the `title` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_title(args: &TitleArgs, dir: Option<&Path>) -> Result<()> {
    let client = build_omdb_client(dir)?;
    let params = to_query(&args.title, args.year.as_deref(), args.kind.as_deref());

    let details = client
        .lookup_by_title(&params)
        .await
        .context("OMDb title lookup request failed")?;
    log_details(&details);

    Ok(())
}

/// Runs the `id` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_id(args: &IdArgs, dir: Option<&Path>) -> Result<()> {
    let client = build_omdb_client(dir)?;

    let details = client
        .lookup_by_imdb_id(&args.id)
        .await
        .context("OMDb id lookup request failed")?;
    log_details(&details);

    Ok(())
}

/// Runs the `config set-key` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or saved.
#[instrument(skip_all)]
fn run_config_set_key(args: &SetKeyArgs, dir: Option<&Path>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;

    config.api.key = Some(args.key.clone());
    config.save(&config_path).context("failed to save config")?;
    tracing::info!("API key saved to {}", config_path.display());

    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&Path>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    tracing::info!("Config file: {}", config_path.display());
    let key_state = match (std::env::var(API_KEY_ENV).ok(), config.api.key.as_deref()) {
        (Some(env_key), _) if !env_key.is_empty() => "set (from environment)",
        (_, Some(key)) if !key.is_empty() => "set (from config)",
        _ => "not set",
    };
    tracing::info!("API key: {}", key_state);
    tracing::info!(
        "Base URL: {}",
        config.api.base_url.as_deref().unwrap_or("(default)")
    );

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_deref();
    match cli.command {
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Title(args) => run_title(&args, dir).await,
        Commands::Id(args) => run_id(&args, dir).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::SetKey(args) => run_config_set_key(&args, dir),
            ConfigSubcommands::Show => run_config_show(dir),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{log_details, log_search_response, to_query};
    use omdb_api::{OmdbDetails, OmdbSearchResponse, OmdbSearchResult};
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    #[test]
    fn test_to_query_maps_optional_args() {
        // Arrange & Act
        let query = to_query("Rush", Some("2013"), Some("movie"));

        // Assert
        assert_eq!(query.title.as_deref(), Some("Rush"));
        assert_eq!(query.year.as_deref(), Some("2013"));
        assert_eq!(query.search_type.as_deref(), Some("movie"));
        assert!(query.page.is_none());
    }

    #[test]
    fn test_log_search_response() {
        // Arrange
        let response = OmdbSearchResponse {
            search: vec![OmdbSearchResult {
                title: String::from("Rush"),
                year: String::from("2013"),
                imdb_id: String::from("tt1979320"),
                kind: String::from("movie"),
            }],
            response: String::from("True"),
            error: String::new(),
            total_results: String::from("1"),
        };
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("Total results: 1")))
            .event(
                expect::event().with_fields(expect::msg("#tt1979320: Rush (2013) Type: movie")),
            )
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            log_search_response(&response);
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_log_details_headline() {
        // Arrange
        let details = OmdbDetails {
            imdb_id: String::from("tt2015381"),
            title: String::from("Guardians of the Galaxy"),
            year: String::from("2014"),
            ..OmdbDetails::default()
        };
        let (subscriber, handle) = subscriber::mock()
            .event(
                expect::event()
                    .at_level(tracing::Level::INFO)
                    .with_fields(expect::msg("#tt2015381: Guardians of the Galaxy (2014)")),
            )
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            log_details(&details);
        });

        // Assert
        handle.assert_finished();
    }
}
