//! Symbol providers
//!
//! The language-analysis service is external; this module defines the seam and
//! ships two adapters: saved `textDocument/documentSymbol` responses on disk and
//! a fixed in-memory tree.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ProviderError;
use crate::infra::protocol::DocumentSymbolResponse;
use crate::infra::retry::{RetryConfig, with_retry, with_timeout};
use crate::models::document::Document;
use crate::models::symbol::Symbol;

#[async_trait]
pub trait SymbolProvider: Send + Sync {
    /// Nested symbols for `document`; empty when the provider knows nothing
    async fn document_symbols(&self, document: &Document) -> Result<Vec<Symbol>, ProviderError>;

    fn name(&self) -> &str;
}

/// Reads a saved documentSymbol response from a sidecar JSON file
pub struct JsonSymbolProvider {
    explicit: Option<PathBuf>,
    suffix: String,
}

impl JsonSymbolProvider {
    /// Look for `<document><suffix>` next to each document
    pub fn sidecar(suffix: impl Into<String>) -> Self {
        Self {
            explicit: None,
            suffix: suffix.into(),
        }
    }

    /// Always read `path`, whatever the document
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit: Some(path.into()),
            suffix: String::new(),
        }
    }

    pub fn symbols_path(&self, document: &Path) -> PathBuf {
        match &self.explicit {
            Some(path) => path.clone(),
            None => {
                let mut name = document.as_os_str().to_owned();
                name.push(&self.suffix);
                PathBuf::from(name)
            }
        }
    }
}

#[async_trait]
impl SymbolProvider for JsonSymbolProvider {
    async fn document_symbols(&self, document: &Document) -> Result<Vec<Symbol>, ProviderError> {
        let path = self.symbols_path(&document.path);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && self.explicit.is_none() => {
                tracing::debug!("No symbol sidecar at {}", path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: serde_json::Value = serde_json::from_str(&content)?;
        let response = DocumentSymbolResponse::from_value(value)
            .map_err(|e| ProviderError::malformed(path.display().to_string(), e.to_string()))?;
        let symbols = response.into_symbols();

        tracing::debug!(
            "Read {} symbols ({} nodes) from {}",
            symbols.len(),
            Symbol::count_all(&symbols),
            path.display()
        );
        Ok(symbols)
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Serves one fixed tree for every document
#[derive(Debug, Clone, Default)]
pub struct StaticSymbolProvider {
    symbols: Vec<Symbol>,
}

impl StaticSymbolProvider {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }
}

#[async_trait]
impl SymbolProvider for StaticSymbolProvider {
    async fn document_symbols(&self, _document: &Document) -> Result<Vec<Symbol>, ProviderError> {
        Ok(self.symbols.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Limits applied to one provider query
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            timeout: crate::config::provider_timeout(),
            retry: RetryConfig::with_attempts(crate::config::retry_attempts()),
        }
    }
}

/// Ask `provider` for symbols, giving up when `token` is cancelled.
/// Each attempt is bounded by `options.timeout`.
pub async fn query_symbols(
    provider: &dyn SymbolProvider,
    document: &Document,
    token: &CancellationToken,
    options: &QueryOptions,
) -> Result<Vec<Symbol>, ProviderError> {
    tracing::debug!(
        "Querying '{}' provider for {}",
        provider.name(),
        document.path.display()
    );

    let symbols = with_retry(&options.retry, token, || {
        with_timeout(options.timeout, token, provider.document_symbols(document))
    })
    .await?;

    // The answer may have raced a cancellation; never hand back stale data.
    if token.is_cancelled() {
        return Err(ProviderError::Cancelled);
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::position::Range;
    use crate::models::symbol::SymbolKind;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    const RESPONSE: &str = r#"[
        {
            "name": "A",
            "kind": 5,
            "range": {"start": {"line": 0, "character": 0}, "end": {"line": 10, "character": 0}},
            "selectionRange": {"start": {"line": 0, "character": 6}, "end": {"line": 0, "character": 7}},
            "children": [
                {
                    "name": "foo",
                    "kind": 6,
                    "range": {"start": {"line": 2, "character": 2}, "end": {"line": 4, "character": 2}},
                    "selectionRange": {"start": {"line": 2, "character": 6}, "end": {"line": 2, "character": 9}}
                }
            ]
        }
    ]"#;

    fn options() -> QueryOptions {
        QueryOptions {
            timeout: Duration::from_millis(200),
            retry: RetryConfig {
                max_attempts: 2,
                initial_delay: Duration::from_millis(1),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_sidecar_provider_reads_neighbour_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.py");
        std::fs::write(&source, "class A:\n    pass\n").unwrap();
        std::fs::write(dir.path().join("a.py.symbols.json"), RESPONSE).unwrap();

        let provider = JsonSymbolProvider::sidecar(".symbols.json");
        let doc = Document::load(&source, 0).await.unwrap();
        let symbols = provider.document_symbols(&doc).await.unwrap();

        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "A");
        assert_eq!(symbols[0].children[0].name, "foo");
    }

    #[tokio::test]
    async fn test_missing_sidecar_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let doc = Document::new(dir.path().join("lonely.py"), "def f(): pass\n");

        let provider = JsonSymbolProvider::sidecar(".symbols.json");
        let symbols = tokio_test::assert_ok!(provider.document_symbols(&doc).await);
        assert!(symbols.is_empty());
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonSymbolProvider::from_file(dir.path().join("nope.json"));
        let doc = Document::new("a.py", "");

        let err = provider.document_symbols(&doc).await.unwrap_err();
        assert!(matches!(err, ProviderError::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"not": "symbols"}"#).unwrap();

        let provider = JsonSymbolProvider::from_file(&path);
        let err = provider
            .document_symbols(&Document::new("a.py", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Malformed { .. }));
    }

    #[test]
    fn test_symbols_path() {
        let provider = JsonSymbolProvider::sidecar(".symbols.json");
        assert_eq!(
            provider.symbols_path(Path::new("/src/app.py")),
            PathBuf::from("/src/app.py.symbols.json")
        );

        let explicit = JsonSymbolProvider::from_file("/tmp/syms.json");
        assert_eq!(
            explicit.symbols_path(Path::new("/src/app.py")),
            PathBuf::from("/tmp/syms.json")
        );
    }

    struct SlowProvider {
        calls: Arc<AtomicU32>,
        delay: Duration,
    }

    #[async_trait]
    impl SymbolProvider for SlowProvider {
        async fn document_symbols(&self, _: &Document) -> Result<Vec<Symbol>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(vec![Symbol::new(
                "late",
                SymbolKind::Function,
                Range::from_coords(0, 0, 1, 0),
            )])
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[tokio::test]
    async fn test_query_times_out_and_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let provider = SlowProvider {
            calls: calls.clone(),
            delay: Duration::from_secs(5),
        };
        let token = CancellationToken::new();
        let options = QueryOptions {
            timeout: Duration::from_millis(10),
            ..options()
        };

        let result = query_symbols(&provider, &Document::new("a.py", ""), &token, &options).await;
        assert!(matches!(result, Err(ProviderError::Timeout(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cancelled_query_discards_result() {
        let provider = SlowProvider {
            calls: Arc::new(AtomicU32::new(0)),
            delay: Duration::from_millis(100),
        };
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result = query_symbols(&provider, &Document::new("a.py", ""), &token, &options()).await;
        assert!(matches!(result, Err(ProviderError::Cancelled)));
    }

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticSymbolProvider::new(vec![Symbol::new(
            "main",
            SymbolKind::Function,
            Range::from_coords(0, 0, 2, 0),
        )]);
        let token = CancellationToken::new();
        let symbols = query_symbols(&provider, &Document::new("a.rs", ""), &token, &options())
            .await
            .unwrap();
        assert_eq!(symbols[0].name, "main");
    }
}
