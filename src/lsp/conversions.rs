use tower_lsp_server::ls_types::*;

/// Convert an LSP position (UTF-16 columns) to a byte offset. Columns past
/// the end of the line clamp to the line end.
pub fn position_to_offset(text: &str, position: Position) -> Option<usize> {
    let mut line_start = 0;
    for _ in 0..position.line {
        line_start += text[line_start..].find('\n')? + 1;
    }
    let line_end = text[line_start..]
        .find('\n')
        .map_or(text.len(), |i| line_start + i);

    // LSP uses UTF-16 code units, Rust uses UTF-8 bytes
    let mut utf16_offset = 0;
    for (byte_idx, ch) in text[line_start..line_end].char_indices() {
        if utf16_offset >= position.character as usize {
            return Some(line_start + byte_idx);
        }
        utf16_offset += ch.len_utf16();
    }
    Some(line_end)
}

/// Convert a byte offset to an LSP position (line/character in UTF-16).
pub fn offset_to_position(text: &str, offset: usize) -> Position {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &text[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let character: usize = before[line_start..].chars().map(char::len_utf16).sum();

    Position {
        line: line as u32,
        character: character as u32,
    }
}

/// Apply a single content change to text
pub fn apply_content_change(text: &str, change: &TextDocumentContentChangeEvent) -> String {
    match &change.range {
        Some(range) => {
            let start_offset = position_to_offset(text, range.start).unwrap_or(text.len());
            let end_offset = position_to_offset(text, range.end)
                .unwrap_or(text.len())
                .max(start_offset);

            let mut result =
                String::with_capacity(text.len() - (end_offset - start_offset) + change.text.len());
            result.push_str(&text[..start_offset]);
            result.push_str(&change.text);
            result.push_str(&text[end_offset..]);
            result
        }
        None => {
            // Full document update (fallback)
            change.text.clone()
        }
    }
}
