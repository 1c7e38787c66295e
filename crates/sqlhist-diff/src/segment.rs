//! Unified-diff hunk segmentation and line normalization.

/// Reports whether any line of `diff_text` starts with a hunk header
/// marker (`@@ ` at column zero). Used by the classifier to separate
/// real diffs from output that carries no line-level information
/// (binary files, mode-only changes).
pub fn has_hunk_headers(diff_text: &str) -> bool {
    diff_text.split('\n').any(|line| line.starts_with("@@ "))
}

/// Split a unified diff into one block per hunk, keeping only the
/// changed lines in normalized form.
///
/// Hunk boundaries are the lines starting with `@@ `. Within a hunk,
/// only `+`/`-` lines are retained; the sign is stripped, the line is
/// trimmed and lowercased, and lines empty after trimming are dropped.
/// Context lines and everything before the first hunk header (the
/// `diff --git`, `index`, `---`/`+++` preamble) never enter a block.
/// Hunks whose retained-line list is empty are omitted, so every
/// returned block is non-empty and every block line is trimmed and
/// non-empty.
pub fn segment_and_normalize(diff_text: &str) -> Vec<String> {
    let lines: Vec<&str> = diff_text.split('\n').collect();
    let mut headers: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.starts_with("@@ "))
        .map(|(idx, _)| idx)
        .collect();
    if headers.is_empty() {
        return Vec::new();
    }
    headers.push(lines.len());

    let mut blocks = Vec::new();
    for bounds in headers.windows(2) {
        let kept: Vec<String> = lines[bounds[0] + 1..bounds[1]]
            .iter()
            .filter(|line| line.starts_with('+') || line.starts_with('-'))
            .map(|line| line[1..].trim())
            .filter(|body| !body.is_empty())
            .map(str::to_lowercase)
            .collect();
        if !kept.is_empty() {
            blocks.push(kept.join("\n"));
        }
    }
    blocks
}
