//! Tests for incremental document synchronization.

use super::helpers::*;

#[tokio::test]
async fn test_incremental_edit_simple() {
    let server = TestLspServer::new();

    server
        .open_document("file:///notes.md", "# Log\n\nOld T1.", "markdown")
        .await;

    // Replace "Old" with "New"
    server
        .edit_document(
            "file:///notes.md",
            vec![incremental_change(2, 0, 2, 3, "New")],
        )
        .await;

    let content = server.get_document_content("file:///notes.md").await;
    assert_eq!(content, Some("# Log\n\nNew T1.".to_string()));
}

#[tokio::test]
async fn test_incremental_edit_multiline() {
    let server = TestLspServer::new();

    server
        .open_document(
            "file:///notes.md",
            "Line 1\nLine 2\nLine 3\nLine 4",
            "markdown",
        )
        .await;

    // Delete lines 2-3
    server
        .edit_document("file:///notes.md", vec![incremental_change(1, 0, 3, 0, "")])
        .await;

    let content = server.get_document_content("file:///notes.md").await;
    assert_eq!(content, Some("Line 1\nLine 4".to_string()));
}

#[tokio::test]
async fn test_edit_creates_trigger() {
    let server = TestLspServer::new();

    server
        .open_document("file:///notes.md", "see T", "markdown")
        .await;
    assert!(server.get_links("file:///notes.md").await.unwrap().is_empty());

    server
        .edit_document(
            "file:///notes.md",
            vec![incremental_change(0, 5, 0, 5, "42")],
        )
        .await;

    let links = server.get_links("file:///notes.md").await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(
        links[0].target.as_ref().map(|t| t.to_string()),
        Some("https://phabricator.wikimedia.org/T42".to_string())
    );
}

#[tokio::test]
async fn test_multiple_documents() {
    let server = TestLspServer::new();

    server
        .open_document("file:///a.md", "T1", "markdown")
        .await;
    server
        .open_document("file:///b.md", "nothing", "markdown")
        .await;

    server
        .edit_document("file:///a.md", vec![full_document_change("still T1")])
        .await;
    server
        .edit_document("file:///b.md", vec![full_document_change("now T2")])
        .await;

    assert_eq!(
        server.get_document_content("file:///a.md").await,
        Some("still T1".to_string())
    );
    assert_eq!(
        server.get_document_content("file:///b.md").await,
        Some("now T2".to_string())
    );
}
