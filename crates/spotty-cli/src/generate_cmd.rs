//! `spotty generate` command: turn text into ranked playlist candidates and
//! optionally commit one per sentence.

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result, bail};

use spotty_api::SpotifyClient;
use spotty_core::commit::{MAX_TRACKS_PER_ADD, PlaylistTarget, commit_candidate};
use spotty_core::pipeline::{PipelineConfig, SentencePlaylists, run_pipeline};
use spotty_core::resolver::{MAX_PAGE_SIZE, ResolverConfig, TrackResolver};
use spotty_core::search::{PlaylistStore, SpotifyAdapter};

/// Options for a generate run, already merged with config-file defaults.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub text: String,
    pub pipeline: PipelineConfig,
    pub resolver: ResolverConfig,
    /// 1-based rank to commit from every sentence.
    pub select: Option<usize>,
    pub target: Option<PlaylistTarget>,
    pub json: bool,
}

impl GenerateOptions {
    fn validate(&self) -> Result<()> {
        if self.pipeline.max_group_size == 0 {
            bail!("--max-words must be at least 1");
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.resolver.page_size) {
            bail!("--page-size must be between 1 and {MAX_PAGE_SIZE}");
        }
        match (self.select, &self.target) {
            (Some(0), _) => bail!("--select is 1-based"),
            (Some(_), None) => bail!("--select needs --playlist-name or --playlist-id"),
            (None, Some(_)) => {
                tracing::warn!("no --select given; nothing will be written to the playlist")
            }
            _ => {}
        }
        Ok(())
    }
}

/// Run the generate command against the Spotify API at `client`.
pub async fn run_generate(client: SpotifyClient, options: GenerateOptions) -> Result<()> {
    options.validate()?;

    let adapter = Arc::new(SpotifyAdapter::new(client));
    let resolver = TrackResolver::new(Arc::clone(&adapter) as _, options.resolver.clone());

    let results = run_pipeline(&options.text, &options.pipeline, &resolver).await?;
    tracing::info!(
        sentences = results.len(),
        cached_terms = resolver.cached_terms(),
        searches = resolver.external_queries(),
        "generation finished"
    );

    if options.json {
        let json = serde_json::to_string_pretty(&results).context("failed to serialize results")?;
        println!("{json}");
    } else {
        print!("{}", render(&results));
    }

    if let (Some(select), Some(target)) = (options.select, options.target) {
        let playlist_id = commit_selected(&*adapter, target, select, &results).await?;
        if let Some(id) = playlist_id {
            println!("Playlist {id} updated.");
        }
    }

    Ok(())
}

/// Commit the `select`-th ranked candidate of every sentence, in sentence
/// order, to one playlist.
///
/// A [`PlaylistTarget::New`] playlist is created once, on the first
/// sentence; later sentences are appended to it. Every selection is
/// checked before the first write. Returns the playlist ID, or `None` when
/// there were no sentences.
pub async fn commit_selected(
    store: &dyn PlaylistStore,
    mut target: PlaylistTarget,
    select: usize,
    results: &[SentencePlaylists],
) -> Result<Option<String>> {
    for (i, sentence) in results.iter().enumerate() {
        if select == 0 || select > sentence.candidates.len() {
            bail!(
                "sentence {} has {} candidate(s); cannot select #{select}",
                i + 1,
                sentence.candidates.len()
            );
        }
        let tracks = sentence.candidates[select - 1].candidate.len();
        if tracks > MAX_TRACKS_PER_ADD {
            bail!(
                "sentence {} candidate #{select} has {tracks} tracks, more than {MAX_TRACKS_PER_ADD}",
                i + 1
            );
        }
    }

    let mut playlist_id = None;
    for sentence in results {
        let chosen = &sentence.candidates[select - 1];
        let id = commit_candidate(store, &target, &chosen.candidate)
            .await
            .with_context(|| format!("failed to commit playlist for {:?}", sentence.sentence))?;
        target = PlaylistTarget::Existing(id.clone());
        playlist_id = Some(id);
    }

    Ok(playlist_id)
}

/// Human-readable listing of every sentence's ranked candidates.
pub fn render(results: &[SentencePlaylists]) -> String {
    let mut out = String::new();
    for (i, sentence) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "Sentence {}: {:?} ({} token(s), {} composition(s))",
            i + 1,
            sentence.sentence,
            sentence.tokens.len(),
            sentence.compositions
        );
        for ranked in &sentence.candidates {
            let _ = writeln!(
                out,
                "Playlist #{} | Score={} | {} track(s)",
                ranked.rank,
                ranked.score,
                ranked.candidate.len()
            );
            for (n, resolved) in ranked.candidate.tracks.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {} by {} (pop={})",
                    n + 1,
                    resolved.track.name,
                    resolved.track.artist,
                    resolved.track.popularity
                );
            }
        }
        out.push('\n');
    }
    out
}
