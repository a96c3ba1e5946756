//! Application container for symnav

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::OutputContext;
use crate::config;
use crate::error::NavResult;
use crate::models::config::{AnnounceConfig, NavConfig};
use crate::models::document::Document;
use crate::services::announce::{
    AnnouncementSink, CommandSink, Debouncer, FanoutSink, RecordingSink,
};
use crate::services::config::{ConfigService, DefaultConfigService};
use crate::services::editor::EditorControl;
use crate::services::fallback::FallbackRegistry;
use crate::services::navigator::Navigator;
use crate::services::provider::{JsonSymbolProvider, SymbolProvider};

pub struct App {
    root: PathBuf,
    pub(crate) output: OutputContext,
    pub(crate) config_service: Arc<dyn ConfigService>,
    pub(crate) config: NavConfig,
}

/// A navigator plus the transcript of what it said
pub struct NavigatorHandle {
    pub navigator: Navigator,
    pub transcript: Arc<RecordingSink>,
}

impl App {
    pub async fn new() -> anyhow::Result<Self> {
        Self::at(std::env::current_dir()?).await
    }

    /// Container rooted at `root`; project config is read from `root/.symnav`
    pub async fn at(root: PathBuf) -> anyhow::Result<Self> {
        tracing::debug!("Initializing symnav at {:?}", root);

        let output = OutputContext::new(root.clone());
        let config_service = Arc::new(DefaultConfigService::new(&root));
        let config = match config_service.load(false).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring unusable config: {}", e);
                NavConfig::default()
            }
        };

        // Initialize global config singleton (thread-safe, no unsafe)
        config::init(&config);

        tracing::info!(
            "symnav initialized (fallback: {}, debounce: {}ms)",
            if config.fallback.enabled { "enabled" } else { "disabled" },
            config.announce.debounce_ms
        );

        Ok(Self {
            root,
            output,
            config_service,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub async fn load_document(&self, path: &Path) -> NavResult<Document> {
        Ok(Document::load(path, config::max_file_size_bytes()).await?)
    }

    /// `symbols` overrides the sidecar lookup
    pub fn provider(&self, symbols: Option<&Path>) -> Arc<dyn SymbolProvider> {
        match symbols {
            Some(path) => Arc::new(JsonSymbolProvider::from_file(path)),
            None => Arc::new(JsonSymbolProvider::sidecar(
                self.config.provider.sidecar_suffix.clone(),
            )),
        }
    }

    /// Speech reaches the configured command only when `speak` is set.
    /// With `[announce] enabled = false` nothing is announced, so the
    /// transcript stays empty.
    pub fn navigator(
        &self,
        provider: Arc<dyn SymbolProvider>,
        editor: Arc<dyn EditorControl>,
        speak: bool,
    ) -> NavigatorHandle {
        let transcript = Arc::new(RecordingSink::new());
        let sink = announcement_sink(&self.config.announce, speak, &transcript);

        let fallback = self.config.fallback.enabled.then(FallbackRegistry::default);
        let navigator = Navigator::new(
            provider,
            editor,
            Debouncer::new(sink, config::announce_delay()),
        )
        .with_fallback(fallback);

        NavigatorHandle {
            navigator,
            transcript,
        }
    }
}

fn announcement_sink(
    announce: &AnnounceConfig,
    speak: bool,
    transcript: &Arc<RecordingSink>,
) -> Arc<dyn AnnouncementSink> {
    if !announce.enabled {
        return Arc::new(FanoutSink::new(Vec::new()));
    }
    match (&announce.command, speak) {
        (Some(program), true) => {
            let speech: Arc<dyn AnnouncementSink> =
                Arc::new(CommandSink::new(program.clone(), announce.args.clone()));
            let recorder: Arc<dyn AnnouncementSink> = transcript.clone();
            Arc::new(FanoutSink::new(vec![recorder, speech]))
        }
        (None, true) => {
            tracing::warn!("--speak given but no [announce] command is configured");
            transcript.clone()
        }
        (_, false) => transcript.clone(),
    }
}
