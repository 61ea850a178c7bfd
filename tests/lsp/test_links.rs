//! Document links, inlay hints and config reloads.

use std::fs;

use smartlinks::ScanMode;
use tower_lsp_server::ls_types::*;

use super::helpers::*;

#[tokio::test]
async fn test_document_links_cover_triggers() {
    let server = TestLspServer::new();
    server
        .open_document("file:///notes.md", "Fixed T1.\ncafé T22 xT3\n", "markdown")
        .await;

    let links = server.get_links("file:///notes.md").await.unwrap();
    assert_eq!(links.len(), 2);

    assert_eq!(
        links[0].range,
        Range {
            start: Position { line: 0, character: 6 },
            end: Position { line: 0, character: 8 },
        }
    );
    // "café " is five UTF-16 units
    assert_eq!(
        links[1].range,
        Range {
            start: Position { line: 1, character: 5 },
            end: Position { line: 1, character: 8 },
        }
    );
    assert_eq!(links[1].tooltip.as_deref(), Some("T22"));
}

#[tokio::test]
async fn test_no_hints_for_plain_labels() {
    let server = TestLspServer::new();
    server
        .open_document("file:///notes.md", "T1 T2\n", "markdown")
        .await;

    let hints = server.get_inlay_hints("file:///notes.md", 0, 1).await.unwrap();
    assert!(hints.is_empty());
}

#[tokio::test]
async fn test_reload_from_workspace_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".smartlinks.toml"),
        r#"
[[patterns]]
detect = '#(\d+)'
href = "https://github.com/o/r/issues/$1"
label = "issue {#$1}"

[[patterns]]
detect = "("
href = "https://example.com"
"#,
    )
    .unwrap();

    let server = TestLspServer::new();
    let before = server.patterns_version();
    let result = server.initialize_in(dir.path()).await;
    assert!(result.capabilities.document_link_provider.is_some());
    assert!(server.patterns_version() > before);

    server
        .open_document("file:///notes.md", "T1 and #7\n", "markdown")
        .await;

    // the workspace rules replace the built-in ones; the broken rule is skipped
    let links = server.get_links("file:///notes.md").await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(
        links[0].target.as_ref().map(|t| t.to_string()),
        Some("https://github.com/o/r/issues/7".to_string())
    );

    let hints = server.get_inlay_hints("file:///notes.md", 0, 1).await.unwrap();
    assert_eq!(hints.len(), 1);
    assert_eq!(hints[0].position, Position { line: 0, character: 9 });
    match &hints[0].label {
        InlayHintLabel::String(label) => assert_eq!(label, "issue #7"),
        other => panic!("unexpected label {other:?}"),
    }

    // editing the config and notifying the server swaps the rules again
    fs::write(
        dir.path().join(".smartlinks.toml"),
        r#"
mode = "sequential"

[[patterns]]
detect = 'T(\d+)'
href = "https://tickets.example.com/$1"
"#,
    )
    .unwrap();
    let version = server.patterns_version();
    assert_eq!(server.scan_mode(), ScanMode::Earliest);
    server.change_configuration().await;
    // rules and mode arrive in the same swap
    assert!(server.patterns_version() > version);
    assert_eq!(server.scan_mode(), ScanMode::Sequential);

    let links = server.get_links("file:///notes.md").await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(
        links[0].target.as_ref().map(|t| t.to_string()),
        Some("https://tickets.example.com/1".to_string())
    );
}
