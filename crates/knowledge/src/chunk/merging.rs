//! Merging small splits into overlapping chunks.

/// Length of a piece in characters.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Greedily pack consecutive splits into chunks of at most `chunk_size`
/// characters.
///
/// When a chunk is emitted, leading splits are dropped until at most
/// `chunk_overlap` characters remain, and those carry over into the next
/// chunk. Splits already hold their separators, so they are concatenated
/// as-is. Each chunk is trimmed; empty chunks are dropped.
pub(crate) fn merge_splits(splits: &[String], chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut total = 0usize;

    for split in splits {
        let len = char_len(split);

        if total + len > chunk_size {
            if total > chunk_size {
                tracing::warn!(
                    "Created a chunk of {} chars, longer than the configured {}",
                    total,
                    chunk_size
                );
            }

            if !current.is_empty() {
                push_joined(&mut chunks, &current);

                while total > chunk_overlap || (total + len > chunk_size && total > 0) {
                    let dropped = current.remove(0);
                    total -= char_len(dropped);
                }
            }
        }

        current.push(split);
        total += len;
    }

    push_joined(&mut chunks, &current);
    chunks
}

/// Cut text into fixed windows of `chunk_size` characters, each window
/// starting `chunk_size - chunk_overlap` characters after the previous one.
pub(crate) fn hard_split(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let step = chunk_size.saturating_sub(chunk_overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let window: String = chars[start..end].iter().collect();
        let trimmed = window.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }

        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

fn push_joined(chunks: &mut Vec<String>, parts: &[&str]) {
    let joined = parts.concat();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splits(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_fits_in_one_chunk() {
        let merged = merge_splits(&splits(&["Erster Satz", ". Zweiter Satz", "."]), 100, 50);
        assert_eq!(merged, vec!["Erster Satz. Zweiter Satz."]);
    }

    #[test]
    fn test_merge_carries_overlap() {
        // 4 + 4 fits, the third split forces a new chunk that keeps "bbbb"
        let merged = merge_splits(&splits(&["aaaa", "bbbb", "cccc"]), 8, 4);
        assert_eq!(merged, vec!["aaaabbbb", "bbbbcccc"]);
    }

    #[test]
    fn test_merge_without_overlap() {
        let merged = merge_splits(&splits(&["aaaa", "bbbb", "cccc"]), 8, 0);
        assert_eq!(merged, vec!["aaaabbbb", "cccc"]);
    }

    #[test]
    fn test_merge_trims_and_drops_blank() {
        let merged = merge_splits(&splits(&["  ", "\n"]), 10, 2);
        assert!(merged.is_empty());

        let merged = merge_splits(&splits(&["\n\nText  "]), 20, 5);
        assert_eq!(merged, vec!["Text"]);
    }

    #[test]
    fn test_hard_split_windows() {
        let text = "x".repeat(1500);
        let chunks = hard_split(&text, 600, 300);

        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| char_len(c) == 600));
    }

    #[test]
    fn test_hard_split_counts_chars_not_bytes() {
        let text = "ä".repeat(10);
        let chunks = hard_split(&text, 4, 0);

        assert_eq!(chunks, vec!["ää".repeat(2), "ää".repeat(2), "ää".to_string()]);
    }

    #[test]
    fn test_hard_split_short_text() {
        assert_eq!(hard_split("kurz", 600, 300), vec!["kurz"]);
        assert!(hard_split("", 600, 300).is_empty());
    }
}
