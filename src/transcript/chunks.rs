//! Sentence-aligned transcript chunks for display.

use serde::{Deserialize, Serialize};

/// A readable slice of the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptChunk {
    /// Position of the chunk in the transcript.
    pub index: usize,
    /// Chunk text.
    pub text: String,
}

/// Split text into sentences ending in `.`, `!` or `?` followed by whitespace.
fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_terminal = false;

    for (idx, ch) in text.char_indices() {
        if prev_terminal && ch.is_whitespace() {
            let sentence = text[start..idx].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = idx;
        }
        prev_terminal = matches!(ch, '.' | '!' | '?');
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Group sentences into chunks of at most `max_chars` characters.
///
/// A single sentence longer than the limit becomes its own chunk.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<TranscriptChunk> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in sentences(text) {
        let needed = if current.is_empty() {
            sentence.chars().count()
        } else {
            current.chars().count() + 1 + sentence.chars().count()
        };

        if needed <= max_chars || current.is_empty() {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(sentence);
        } else {
            chunks.push(TranscriptChunk {
                index: chunks.len(),
                text: std::mem::take(&mut current),
            });
            current.push_str(sentence);
        }
    }

    if !current.is_empty() {
        chunks.push(TranscriptChunk {
            index: chunks.len(),
            text: current,
        });
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences() {
        assert_eq!(
            sentences("One. Two!  Three? four"),
            vec!["One.", "Two!", "Three?", "four"]
        );
        assert_eq!(sentences("version 1.5 is out."), vec!["version 1.5 is out."]);
    }

    #[test]
    fn test_split_groups_sentences() {
        let chunks = split_into_chunks("Aaaa. Bbbb. Cccc.", 11);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "Aaaa. Bbbb.");
        assert_eq!(chunks[1].text, "Cccc.");
        assert_eq!(chunks[1].index, 1);
    }

    #[test]
    fn test_long_sentence_is_own_chunk() {
        let chunks = split_into_chunks("Short. This sentence is far too long.", 10);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].text, "This sentence is far too long.");
    }

    #[test]
    fn test_unpunctuated_captions() {
        let chunks = split_into_chunks("so today we talk about rust", 400);
        assert_eq!(chunks.len(), 1);
        assert!(split_into_chunks("   ", 400).is_empty());
    }
}
