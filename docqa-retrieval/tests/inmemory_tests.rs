//! Property tests for in-memory index search ordering and filtering.

mod common;

use std::sync::Arc;

use common::MockEmbeddingProvider;
use docqa_retrieval::{InMemoryVectorIndex, VectorIndex};
use proptest::prelude::*;

const DIMS: usize = 16;

/// Generate a chunk text of random lowercase words.
fn arb_text() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,4}"
}

/// **Property: search ordering and top-k bound.**
/// For any set of indexed chunks and any query, results come back ordered by
/// non-decreasing distance, each distance lies in `[0, 2]`, and the result
/// count is at most `min(top_k, stored chunks)`.
mod prop_search_ordering {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_and_bounded_by_top_k(
            texts in proptest::collection::vec(arb_text(), 1..20),
            query in arb_text(),
            top_k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, stored) = rt.block_on(async {
                let provider = Arc::new(MockEmbeddingProvider::new(DIMS));
                let index = InMemoryVectorIndex::new(provider);
                let ids = index.add_chunks("doc", &texts, None).await.unwrap();
                let results = index.query(&query, top_k, None).await.unwrap();
                (results, ids.len())
            });

            prop_assert!(results.len() <= top_k);
            prop_assert!(results.len() <= stored);

            for result in &results {
                prop_assert!(
                    (-1e-5..=2.0 + 1e-5).contains(&result.distance),
                    "distance out of range: {}",
                    result.distance,
                );
            }

            for window in results.windows(2) {
                prop_assert!(
                    window[0].distance <= window[1].distance,
                    "results not in relevance order: {} > {}",
                    window[0].distance,
                    window[1].distance,
                );
            }
        }
    }
}

/// **Property: document filter correctness.**
/// For any split of chunks across two documents, a filter naming one document
/// never yields a result from the other.
mod prop_filter_correctness {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn filter_never_leaks_other_documents(
            texts_a in proptest::collection::vec(arb_text(), 0..10),
            texts_b in proptest::collection::vec(arb_text(), 0..10),
            query in arb_text(),
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, count_a) = rt.block_on(async {
                let provider = Arc::new(MockEmbeddingProvider::new(DIMS));
                let index = InMemoryVectorIndex::new(provider);
                index.add_chunks("A", &texts_a, None).await.unwrap();
                index.add_chunks("B", &texts_b, None).await.unwrap();
                let results =
                    index.query(&query, 50, Some(&["A".to_string()])).await.unwrap();
                (results, texts_a.len())
            });

            prop_assert_eq!(results.len(), count_a.min(50));
            for result in &results {
                prop_assert_eq!(result.document_name.as_str(), "A");
            }
        }
    }
}
