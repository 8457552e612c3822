use crate::error::ToolResult;
use crate::file::access::read_text;
use std::path::Path;

/// Returns lines `start..=end` (1-indexed) with their original terminators.
/// Bounds outside the file clip to what is there; an empty range is an
/// empty string.
pub fn read_lines(path: &Path, start_line: i64, end_line: i64) -> ToolResult<String> {
    let content = read_text(path)?;
    Ok(slice_lines(&content, start_line, end_line))
}

pub fn slice_lines(content: &str, start_line: i64, end_line: i64) -> String {
    let skip = usize::try_from(start_line.saturating_sub(1)).unwrap_or(0);
    let last = usize::try_from(end_line).unwrap_or(0);
    if last <= skip {
        return String::new();
    }

    content
        .split_inclusive('\n')
        .skip(skip)
        .take(last - skip)
        .collect()
}
