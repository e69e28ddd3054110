//! Property tests for chunk coverage and index search ordering.

use newsdesk_core::Document;
use newsdesk_rag::chunker::WindowChunker;
use newsdesk_rag::index::FlatL2Index;
use proptest::prelude::*;

/// Generate document bodies with a mix of ASCII and multibyte characters.
fn arb_body() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            proptest::char::range('a', 'z'),
            Just(' '),
            Just('é'),
            Just('→'),
            Just('。'),
        ],
        0..300,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Generate a (chunk_size, chunk_overlap) pair with overlap < size.
fn arb_window() -> impl Strategy<Value = (usize, usize)> {
    (2usize..60).prop_flat_map(|size| (Just(size), 0..size))
}

mod prop_chunk_coverage {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Every character of every document appears in some chunk, and
        /// consecutive chunks of one document overlap by exactly the
        /// configured number of characters (the last chunk may simply be
        /// shorter).
        #[test]
        fn chunks_cover_documents_with_exact_overlap(
            bodies in proptest::collection::vec(arb_body(), 1..4),
            (size, overlap) in arb_window(),
        ) {
            let documents: Vec<Document> = bodies
                .iter()
                .enumerate()
                .map(|(i, body)| Document::new(body.clone(), format!("doc-{i}")))
                .collect();

            let chunker = WindowChunker::new(size, overlap).unwrap();
            let chunks = chunker.chunk(&documents);

            // Positions form the sequence 0..N-1.
            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.position, i);
            }

            for document in &documents {
                let doc_chunks: Vec<_> =
                    chunks.iter().filter(|c| c.source_id == document.source_id).collect();

                if document.text.is_empty() {
                    prop_assert!(doc_chunks.is_empty());
                    continue;
                }

                // Reassembling the chunks minus their overlap reproduces
                // the document, which implies full coverage.
                let mut reassembled = String::new();
                for (i, chunk) in doc_chunks.iter().enumerate() {
                    if i == 0 {
                        reassembled.push_str(&chunk.text);
                    } else {
                        reassembled.extend(chunk.text.chars().skip(overlap));
                    }
                }
                prop_assert_eq!(&reassembled, &document.text);

                // Exact overlap between consecutive chunks.
                for pair in doc_chunks.windows(2) {
                    let a: Vec<char> = pair[0].text.chars().collect();
                    let b: Vec<char> = pair[1].text.chars().collect();
                    prop_assert!(b.len() >= overlap);
                    prop_assert_eq!(&a[a.len() - overlap..], &b[..overlap]);
                }

                // Every chunk respects the window, and only the last may
                // be shorter than a full window when the document is long
                // enough to need more than one.
                for chunk in &doc_chunks {
                    prop_assert!(chunk.text.chars().count() <= size);
                }
            }
        }
    }
}

mod prop_index_ordering {
    use super::*;

    const DIM: usize = 8;

    fn arb_vector() -> impl Strategy<Value = Vec<f32>> {
        proptest::collection::vec(-10.0f32..10.0, DIM)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Search returns `min(k, rows)` hits ordered by ascending
        /// distance with ties broken by ascending row position.
        #[test]
        fn results_ascend_with_stable_ties(
            rows in proptest::collection::vec(arb_vector(), 1..24),
            query in arb_vector(),
            k in 1usize..30,
        ) {
            let row_count = rows.len();
            let index = FlatL2Index::build(DIM, rows).unwrap();
            let hits = index.search(&query, k).unwrap();

            prop_assert_eq!(hits.len(), k.min(row_count));

            for pair in hits.windows(2) {
                prop_assert!(
                    pair[0].distance < pair[1].distance
                        || (pair[0].distance == pair[1].distance
                            && pair[0].position < pair[1].position),
                    "hits out of order: {:?} then {:?}",
                    pair[0],
                    pair[1],
                );
            }
        }
    }
}
