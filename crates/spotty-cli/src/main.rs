mod compare_cmd;
mod config;
mod count_cmd;
mod generate_cmd;
#[cfg(test)]
mod test_util;

use anyhow::Context;
use clap::{Parser, Subcommand};

use spotty_api::SpotifyClient;
use spotty_core::commit::PlaylistTarget;
use spotty_core::composition::Strategy;
use spotty_core::pipeline::{DEFAULT_LOOKAHEAD, DEFAULT_MAX_GROUP_SIZE, PipelineConfig};
use spotty_core::resolver::{DEFAULT_MAX_RESULTS, DEFAULT_PAGE_SIZE, ResolverConfig};

use config::{CliOverrides, SpottyConfig};
use generate_cmd::GenerateOptions;

#[derive(Parser)]
#[command(name = "spotty", about = "Spell out sentences with Spotify track titles")]
struct Cli {
    /// Spotify OAuth access token (overrides SPOTTY_ACCESS_TOKEN env var)
    #[arg(long, global = true)]
    access_token: Option<String>,

    /// Market to search in (overrides SPOTTY_MARKET env var)
    #[arg(long, global = true)]
    market: Option<String>,

    /// Spotify Web API base URL (overrides SPOTTY_API_BASE_URL env var)
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a spotty config file (uses --access-token and --market if given)
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Find playlists whose track titles spell out the text
    Generate {
        /// Text to turn into playlists, one per sentence
        #[arg(long)]
        text: String,
        /// Most words in one track title [default: 4]
        #[arg(long)]
        max_words: Option<usize>,
        /// Search results considered per phrase [default: 20]
        #[arg(long)]
        max_results: Option<usize>,
        /// Results requested per search call, 1 to 50 [default: 20]
        #[arg(long)]
        page_size: Option<usize>,
        /// Compositions resolved concurrently [default: 4]
        #[arg(long)]
        lookahead: Option<usize>,
        /// Enumeration strategy: stack, memoized, or bottom-up [default: stack]
        #[arg(long)]
        strategy: Option<Strategy>,
        /// Commit the candidate with this rank from every sentence
        #[arg(long)]
        select: Option<usize>,
        /// Create a new playlist with this name when committing
        #[arg(long, conflicts_with = "playlist_id")]
        playlist_name: Option<String>,
        /// Add to this existing playlist when committing
        #[arg(long)]
        playlist_id: Option<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count compositions per sentence (no network access)
    Count {
        /// Text to analyse
        #[arg(long)]
        text: String,
        /// Most words in one group [default: 4]
        #[arg(long)]
        max_words: Option<usize>,
    },
    /// Cross-check and time the enumeration strategies
    Compare {
        /// Number of tokens in the synthetic sentence
        #[arg(long)]
        words: usize,
        /// Most words in one group [default: 4]
        #[arg(long)]
        max_words: Option<usize>,
    },
}

/// Execute the `spotty init` command: write config file.
fn cmd_init(access_token: Option<&str>, market: Option<&str>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        spotify: config::SpotifySection {
            access_token: access_token.map(str::to_owned),
            market: market.map(str::to_owned),
            api_base_url: None,
        },
        search: config::SearchSection::default(),
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    match access_token {
        Some(token) => println!("  spotify.access_token = {}", mask(token)),
        None => println!("  spotify.access_token is unset; set SPOTTY_ACCESS_TOKEN or rerun with --access-token"),
    }
    if let Some(market) = market {
        println!("  spotify.market = {market}");
    }

    Ok(())
}

fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let overrides = CliOverrides {
        access_token: cli.access_token.as_deref(),
        market: cli.market.as_deref(),
        api_base_url: cli.api_base_url.as_deref(),
    };

    match cli.command {
        Commands::Init { force } => {
            cmd_init(overrides.access_token, overrides.market, force)?;
        }
        Commands::Generate {
            text,
            max_words,
            max_results,
            page_size,
            lookahead,
            strategy,
            select,
            playlist_name,
            playlist_id,
            json,
        } => {
            let resolved = SpottyConfig::resolve(overrides)?;
            resolved.require_token()?;
            let defaults = &resolved.search;

            let target = match (playlist_name, playlist_id) {
                (Some(name), _) => Some(PlaylistTarget::New(name)),
                (None, Some(id)) => Some(PlaylistTarget::Existing(id)),
                (None, None) => None,
            };
            let options = GenerateOptions {
                text,
                pipeline: PipelineConfig {
                    max_group_size: max_words
                        .or(defaults.max_words)
                        .unwrap_or(DEFAULT_MAX_GROUP_SIZE),
                    strategy: match strategy {
                        Some(s) => s,
                        None => defaults.strategy()?.unwrap_or_default(),
                    },
                    lookahead: lookahead.or(defaults.lookahead).unwrap_or(DEFAULT_LOOKAHEAD),
                },
                resolver: ResolverConfig {
                    market: resolved.market.clone(),
                    page_size: page_size.or(defaults.page_size).unwrap_or(DEFAULT_PAGE_SIZE),
                    max_results: max_results
                        .or(defaults.max_results)
                        .unwrap_or(DEFAULT_MAX_RESULTS),
                },
                select,
                target,
                json,
            };

            let client = SpotifyClient::new(resolved.api.clone())
                .context("failed to build Spotify client")?;
            generate_cmd::run_generate(client, options).await?;
        }
        Commands::Count { text, max_words } => {
            count_cmd::run_count(&text, config::offline_max_words(max_words))?;
        }
        Commands::Compare { words, max_words } => {
            compare_cmd::run_compare(words, max_words.unwrap_or(DEFAULT_MAX_GROUP_SIZE))?;
        }
    }

    Ok(())
}
