//! Product autocomplete tests: the two-character gate and backend queries.

use bodega_integration_tests::MockBackend;

#[tokio::test]
async fn short_terms_return_empty_without_a_request() {
    let backend = MockBackend::start().await;
    backend.seed_product(7, "Olive oil 1L", "OIL-1L").await;
    let client = backend.client();

    for term in ["", "o", " o "] {
        let results = client.search_products(term).await.expect("gated search");
        assert!(results.is_empty(), "term {term:?} should return nothing");
    }
    assert_eq!(backend.hits("products").await, 0);
}

#[tokio::test]
async fn two_characters_trigger_a_backend_search() {
    let backend = MockBackend::start().await;
    backend.seed_product(7, "Olive oil 1L", "OIL-1L").await;
    backend.seed_product(8, "Rice 5kg", "RICE-5").await;
    let client = backend.client();

    let results = client.search_products("ol").await.expect("search");
    assert_eq!(backend.hits("products").await, 1);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Olive oil 1L");
    assert_eq!(results[0].sku.as_deref(), Some("OIL-1L"));
}

#[tokio::test]
async fn search_matches_sku_too() {
    let backend = MockBackend::start().await;
    backend.seed_product(8, "Rice 5kg", "RICE-5").await;
    let client = backend.client();

    let results = client.search_products("RICE").await.expect("search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id.as_i32(), 8);
}

#[tokio::test]
async fn surrounding_whitespace_is_trimmed_before_the_gate() {
    let backend = MockBackend::start().await;
    backend.seed_product(7, "Olive oil 1L", "OIL-1L").await;
    let client = backend.client();

    let results = client.search_products("  ol  ").await.expect("search");
    assert_eq!(backend.hits("products").await, 1);
    assert_eq!(results.len(), 1);
}
