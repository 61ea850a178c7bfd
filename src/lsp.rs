//! Language server exposing links and inlay hints for triggers.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_lsp_server::jsonrpc::Result;
use tower_lsp_server::ls_types::*;
use tower_lsp_server::{Client, LanguageServer, LspService, Server};

use smartlinks_core::{ActivePatterns, ScanMode, Segment, decorations, segments};

mod conversions;

pub use conversions::{apply_content_change, offset_to_position, position_to_offset};

pub struct SmartlinksLsp {
    client: Client,
    // Use String keys since Uri doesn't implement Send
    document_map: Arc<Mutex<HashMap<String, String>>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    patterns: Arc<ActivePatterns>,
}

impl SmartlinksLsp {
    pub fn new(client: Client) -> Self {
        let config = crate::Config::default();
        let (set, _) = config.build_patterns();
        Self {
            client,
            document_map: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            patterns: Arc::new(ActivePatterns::with_mode(set, config.mode)),
        }
    }

    pub fn document_map(&self) -> Arc<Mutex<HashMap<String, String>>> {
        Arc::clone(&self.document_map)
    }

    /// Version of the active pattern set; bumps on every reload.
    pub fn patterns_version(&self) -> u64 {
        self.patterns.snapshot().version
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.patterns.snapshot().mode
    }

    async fn load_config(&self) -> crate::Config {
        let workspace_root = self.workspace_root.lock().await.clone();
        if let Some(root) = workspace_root {
            match crate::config::load(None, &root) {
                Ok((config, path)) => {
                    if let Some(p) = path {
                        self.client
                            .log_message(
                                MessageType::INFO,
                                format!("Loaded config from {}", p.display()),
                            )
                            .await;
                    }
                    return config;
                }
                Err(e) => {
                    self.client
                        .log_message(
                            MessageType::WARNING,
                            format!("Failed to load config: {}", e),
                        )
                        .await;
                }
            }
        }
        crate::Config::default()
    }

    /// Rebuild the pattern set from config and swap it in.
    async fn reload(&self) {
        let config = self.load_config().await;
        let dropped = self.patterns.reload(&config.patterns, config.mode);

        for err in dropped {
            self.client
                .show_message(MessageType::WARNING, format!("smartlinks: {err}"))
                .await;
        }
    }

    async fn document_text(&self, uri: &Uri) -> Option<String> {
        let document_map = self.document_map.lock().await;
        document_map.get(&uri.to_string()).cloned()
    }
}

impl LanguageServer for SmartlinksLsp {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Store workspace root for config discovery
        // Try workspace_folders first, fall back to deprecated root_uri
        if let Some(folders) = params.workspace_folders
            && let Some(folder) = folders.first()
            && let Some(path) = folder.uri.to_file_path()
        {
            *self.workspace_root.lock().await = Some(path.into_owned());
        } else {
            #[allow(deprecated)]
            if let Some(root_uri) = params.root_uri
                && let Some(path) = root_uri.to_file_path()
            {
                *self.workspace_root.lock().await = Some(path.into_owned());
            }
        }

        self.reload().await;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::INCREMENTAL),
                        ..Default::default()
                    },
                )),
                document_link_provider: Some(DocumentLinkOptions {
                    resolve_provider: Some(false),
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                inlay_hint_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "smartlinks-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            offset_encoding: None,
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "smartlinks LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.to_string();
        self.document_map
            .lock()
            .await
            .insert(uri, params.text_document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        let mut document_map = self.document_map.lock().await;
        if let Some(text) = document_map.get_mut(&uri) {
            for change in params.content_changes {
                *text = apply_content_change(text, &change);
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri.to_string();
        self.document_map.lock().await.remove(&uri);
    }

    async fn did_change_configuration(&self, _: DidChangeConfigurationParams) {
        self.reload().await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        let touches_config = params.changes.iter().any(|change| {
            let uri = change.uri.to_string();
            uri.ends_with("smartlinks.toml") || uri.ends_with("smartlinks/config.toml")
        });
        if touches_config {
            self.reload().await;
        }
    }

    async fn document_link(&self, params: DocumentLinkParams) -> Result<Option<Vec<DocumentLink>>> {
        let Some(text) = self.document_text(&params.text_document.uri).await else {
            return Ok(None);
        };
        let snapshot = self.patterns.snapshot();

        // Scan in a blocking task; the snapshot stays valid across reloads
        let links = tokio::task::spawn_blocking(move || {
            segments(&text, snapshot.patterns.patterns(), snapshot.mode)
                .into_iter()
                .filter_map(|segment| match segment {
                    Segment::Link(link) => {
                        let Ok(target) = link.href.parse::<Uri>() else {
                            log::debug!("Skipping link with invalid target {}", link.href);
                            return None;
                        };
                        Some(DocumentLink {
                            range: Range {
                                start: offset_to_position(&text, link.range.start),
                                end: offset_to_position(&text, link.range.end),
                            },
                            target: Some(target),
                            tooltip: Some(link.label.text()),
                            data: None,
                        })
                    }
                    Segment::Plain(_) => None,
                })
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|_| tower_lsp_server::jsonrpc::Error::internal_error())?;

        Ok(Some(links))
    }

    async fn inlay_hint(&self, params: InlayHintParams) -> Result<Option<Vec<InlayHint>>> {
        let Some(text) = self.document_text(&params.text_document.uri).await else {
            return Ok(None);
        };
        let snapshot = self.patterns.snapshot();
        let visible = params.range;

        let hints = tokio::task::spawn_blocking(move || {
            let start = position_to_offset(&text, visible.start).unwrap_or(0);
            let end = position_to_offset(&text, visible.end).unwrap_or(text.len());

            decorations(&text, &[start..end], snapshot.patterns.patterns(), snapshot.mode)
                .into_iter()
                // a hint repeating the trigger adds nothing
                .filter(|d| d.label.text() != text[d.trigger.clone()])
                .map(|d| InlayHint {
                    position: offset_to_position(&text, d.pos),
                    label: InlayHintLabel::String(d.label.text()),
                    kind: None,
                    text_edits: None,
                    tooltip: Some(InlayHintTooltip::String(d.href)),
                    padding_left: Some(true),
                    padding_right: None,
                    data: None,
                })
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|_| tower_lsp_server::jsonrpc::Error::internal_error())?;

        Ok(Some(hints))
    }
}

pub async fn run() -> std::io::Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(SmartlinksLsp::new);
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
