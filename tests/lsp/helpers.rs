//! Test helpers for LSP integration testing
//!
//! This module provides utilities to test LSP functionality in-memory
//! without spawning the binary or dealing with stdio protocol.

use std::path::Path;
use std::sync::Arc;
use tower_lsp_server::ls_types::*;
use tower_lsp_server::{LanguageServer, LspService};

use smartlinks::ScanMode;
use smartlinks::lsp::SmartlinksLsp;

/// Test harness for LSP integration tests.
///
/// Wraps a `SmartlinksLsp` instance created via `LspService::new`.
pub struct TestLspServer {
    lsp: Arc<SmartlinksLsp>,
}

impl TestLspServer {
    /// Create a new test LSP server running with the built-in rules.
    pub fn new() -> Self {
        // Use Arc to share ownership between the closure and our return value
        let lsp_arc: Arc<std::sync::Mutex<Option<Arc<SmartlinksLsp>>>> =
            Arc::new(std::sync::Mutex::new(None));
        let lsp_arc_clone = Arc::clone(&lsp_arc);

        let (_service, _socket) = LspService::new(move |client| {
            let lsp = Arc::new(SmartlinksLsp::new(client));
            *lsp_arc_clone.lock().unwrap() = Some(Arc::clone(&lsp));

            LspWrapper { inner: lsp }
        });

        let lsp = lsp_arc
            .lock()
            .unwrap()
            .take()
            .expect("SmartlinksLsp should have been initialized");

        Self { lsp }
    }

    /// Send `initialize` with `root` as the only workspace folder.
    pub async fn initialize_in(&self, root: &Path) -> InitializeResult {
        let uri: Uri = format!("file://{}", root.display()).parse().unwrap();
        let params = InitializeParams {
            workspace_folders: Some(vec![WorkspaceFolder {
                uri,
                name: "test".to_string(),
            }]),
            ..Default::default()
        };
        self.lsp.initialize(params).await.unwrap()
    }

    /// Simulates `workspace/didChangeConfiguration`.
    pub async fn change_configuration(&self) {
        let params = DidChangeConfigurationParams {
            settings: serde_json::Value::Null,
        };
        self.lsp.did_change_configuration(params).await;
    }

    /// Open a document with the given URI and content.
    ///
    /// Simulates the `textDocument/didOpen` notification.
    pub async fn open_document(&self, uri: &str, content: &str, language_id: &str) {
        let params = DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.parse().unwrap(),
                language_id: language_id.to_string(),
                version: 0,
                text: content.to_string(),
            },
        };

        self.lsp.did_open(params).await;
    }

    /// Close a document.
    ///
    /// Simulates the `textDocument/didClose` notification.
    pub async fn close_document(&self, uri: &str) {
        let params = DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier {
                uri: uri.parse().unwrap(),
            },
        };

        self.lsp.did_close(params).await;
    }

    /// Edit a document with incremental changes.
    ///
    /// Simulates the `textDocument/didChange` notification with INCREMENTAL sync.
    pub async fn edit_document(&self, uri: &str, changes: Vec<TextDocumentContentChangeEvent>) {
        let params = DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier {
                uri: uri.parse().unwrap(),
                version: 1,
            },
            content_changes: changes,
        };

        self.lsp.did_change(params).await;
    }

    /// Simulates the `textDocument/documentLink` request.
    pub async fn get_links(&self, uri: &str) -> Option<Vec<DocumentLink>> {
        let params = DocumentLinkParams {
            text_document: TextDocumentIdentifier {
                uri: uri.parse().unwrap(),
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        };

        self.lsp.document_link(params).await.unwrap()
    }

    /// Simulates the `textDocument/inlayHint` request for a line range.
    pub async fn get_inlay_hints(
        &self,
        uri: &str,
        start_line: u32,
        end_line: u32,
    ) -> Option<Vec<InlayHint>> {
        let params = InlayHintParams {
            work_done_progress_params: WorkDoneProgressParams::default(),
            text_document: TextDocumentIdentifier {
                uri: uri.parse().unwrap(),
            },
            range: Range {
                start: Position {
                    line: start_line,
                    character: 0,
                },
                end: Position {
                    line: end_line,
                    character: 0,
                },
            },
        };

        self.lsp.inlay_hint(params).await.unwrap()
    }

    pub fn patterns_version(&self) -> u64 {
        self.lsp.patterns_version()
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.lsp.scan_mode()
    }

    /// Get the current content of a document from the server's state.
    pub async fn get_document_content(&self, uri: &str) -> Option<String> {
        let doc_map = self.lsp.document_map();
        let docs = doc_map.lock().await;
        docs.get(uri).cloned()
    }
}

/// Wrapper that delegates all LanguageServer methods to the inner Arc<SmartlinksLsp>.
///
/// This is needed because LspService requires ownership of the LanguageServer impl,
/// but we also need to retain a reference for testing.
struct LspWrapper {
    inner: Arc<SmartlinksLsp>,
}

impl LanguageServer for LspWrapper {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> tower_lsp_server::jsonrpc::Result<InitializeResult> {
        self.inner.initialize(params).await
    }

    async fn initialized(&self, params: InitializedParams) {
        self.inner.initialized(params).await
    }

    async fn shutdown(&self) -> tower_lsp_server::jsonrpc::Result<()> {
        self.inner.shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.inner.did_open(params).await
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        self.inner.did_change(params).await
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.inner.did_close(params).await
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.inner.did_change_configuration(params).await
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        self.inner.did_change_watched_files(params).await
    }

    async fn document_link(
        &self,
        params: DocumentLinkParams,
    ) -> tower_lsp_server::jsonrpc::Result<Option<Vec<DocumentLink>>> {
        self.inner.document_link(params).await
    }

    async fn inlay_hint(
        &self,
        params: InlayHintParams,
    ) -> tower_lsp_server::jsonrpc::Result<Option<Vec<InlayHint>>> {
        self.inner.inlay_hint(params).await
    }
}

/// Helper to create a simple text change event (full document replacement).
pub fn full_document_change(text: &str) -> TextDocumentContentChangeEvent {
    TextDocumentContentChangeEvent {
        range: None,
        range_length: None,
        text: text.to_string(),
    }
}

/// Helper to create an incremental text change event.
pub fn incremental_change(
    start_line: u32,
    start_char: u32,
    end_line: u32,
    end_char: u32,
    text: &str,
) -> TextDocumentContentChangeEvent {
    TextDocumentContentChangeEvent {
        range: Some(Range {
            start: Position {
                line: start_line,
                character: start_char,
            },
            end: Position {
                line: end_line,
                character: end_char,
            },
        }),
        range_length: None,
        text: text.to_string(),
    }
}
