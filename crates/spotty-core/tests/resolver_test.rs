use std::sync::Arc;
use std::time::Duration;

use spotty_core::resolver::{ResolverConfig, TrackResolver};
use spotty_test_utils::{StubCatalog, track};

fn resolver(catalog: Arc<StubCatalog>) -> TrackResolver {
    TrackResolver::new(catalog, ResolverConfig::default())
}

#[tokio::test]
async fn concurrent_lookups_share_one_search() {
    let catalog = Arc::new(
        StubCatalog::new(vec![track("Yellow", 80), track("Yellow Submarine", 70)])
            .with_delay(Duration::from_millis(50)),
    );
    let resolver = resolver(Arc::clone(&catalog));

    let lookups = (0..16).map(|_| resolver.resolve("Yellow"));
    let results = futures::future::join_all(lookups).await;

    assert_eq!(catalog.calls_for("Yellow"), 1);
    assert_eq!(resolver.cached_terms(), 1);
    for matches in &results {
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Yellow");
    }
}

#[tokio::test]
async fn distinct_terms_resolve_independently_in_parallel() {
    let catalog = Arc::new(
        StubCatalog::new(vec![track("Yellow", 80), track("Blue", 60), track("Red", 40)])
            .with_delay(Duration::from_millis(20)),
    );
    let resolver = resolver(Arc::clone(&catalog));

    let terms = ["Yellow", "Blue", "Red", "Yellow", "Blue", "Red"];
    let results = futures::future::join_all(terms.iter().map(|t| resolver.resolve(t))).await;

    assert!(results.iter().all(|m| m.len() == 1));
    assert_eq!(catalog.total_calls(), 3);
    assert_eq!(resolver.external_queries(), 3);
}

#[tokio::test]
async fn each_term_searched_once_across_a_run() {
    let catalog = Arc::new(StubCatalog::new(vec![track("Help", 50)]));
    let resolver = resolver(Arc::clone(&catalog));

    for _ in 0..5 {
        resolver.resolve("Help").await;
        resolver.resolve("Missing").await;
    }

    assert_eq!(catalog.calls_for("Help"), 1);
    assert_eq!(catalog.calls_for("Missing"), 1);
}

#[tokio::test]
async fn failed_search_is_not_retried() {
    let catalog = Arc::new(
        StubCatalog::new(vec![track("Help", 50)]).with_failing_term("Help"),
    );
    let resolver = resolver(Arc::clone(&catalog));

    assert!(resolver.resolve("Help").await.is_empty());
    assert!(resolver.resolve("Help").await.is_empty());
    assert_eq!(catalog.calls_for("Help"), 1);
}

#[tokio::test]
async fn exact_match_ignores_partial_titles_from_search() {
    let catalog = Arc::new(StubCatalog::new(vec![
        track("Here Comes the Sun", 90),
        track("Sun", 30),
        track("SUN", 60),
    ]));
    let resolver = resolver(catalog);

    let matches = resolver.resolve("sun").await;
    let names: Vec<&str> = matches.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["SUN", "Sun"]);
}
