use docqa_chunker::{Chunker, ChunkerConfig, TextChunk};
use proptest::prelude::*;

fn spans(word_count: usize, size: usize, overlap: usize) -> (Vec<String>, Vec<TextChunk>) {
    let words: Vec<String> = (0..word_count).map(|i| format!("w{i}")).collect();
    let chunker = Chunker::new(ChunkerConfig::new(size, overlap)).expect("valid config");
    let chunks = chunker.chunk_spans(&words.join(" "));
    (words, chunks)
}

#[test]
fn default_config_matches_ingestion_defaults() {
    let chunker = Chunker::default();
    assert_eq!(chunker.config().chunk_size, 500);
    assert_eq!(chunker.config().overlap, 100);
}

#[test]
fn invalid_config_fails_before_chunking() {
    for (size, overlap) in [(1, 1), (10, 10), (10, 11), (0, 0)] {
        let result = Chunker::new(ChunkerConfig::new(size, overlap));
        assert!(
            result.is_err(),
            "size={size} overlap={overlap} should be rejected"
        );
    }
}

#[test]
fn long_document_windows_are_bounded() {
    let (_, chunks) = spans(1_234, 500, 100);
    assert_eq!(chunks.len(), 3);
    assert!(chunks.iter().all(|c| c.word_count() <= 500));
    assert_eq!(chunks.last().map(|c| c.end_word), Some(1_234));
}

proptest! {
    #[test]
    fn proptest_chunks_cover_every_word(
        word_count in 0usize..300,
        size in 1usize..40,
        overlap_seed in 0usize..40,
    ) {
        let overlap = overlap_seed % size;
        let (words, chunks) = spans(word_count, size, overlap);

        let mut covered = vec![false; word_count];
        for chunk in &chunks {
            prop_assert!(chunk.word_count() <= size);
            prop_assert_eq!(&chunk.text, &words[chunk.start_word..chunk.end_word].join(" "));
            for slot in &mut covered[chunk.start_word..chunk.end_word] {
                *slot = true;
            }
        }
        prop_assert!(covered.iter().all(|c| *c));
        prop_assert_eq!(chunks.is_empty(), word_count == 0);
    }

    #[test]
    fn proptest_neighbours_share_exactly_overlap_words(
        word_count in 1usize..300,
        size in 1usize..40,
        overlap_seed in 0usize..40,
    ) {
        let overlap = overlap_seed % size;
        let (_, chunks) = spans(word_count, size, overlap);

        for pair in chunks.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            prop_assert_eq!(prev.word_count(), size);
            prop_assert_eq!(prev.end_word - next.start_word, overlap);
        }
    }
}
