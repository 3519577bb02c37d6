
use agent_rollout::scheduler::EndpointResolver;
use test_harness::FakeCommandService;

#[tokio::test]
async fn test_resolve_marks_registered_ids() {
    let service = FakeCommandService::new()
        .with_registered(&["ws-1", "ws-3", "i-0abc"])
        .into_arc();
    let resolver = EndpointResolver::new(service.clone());

    let found = resolver.resolve(["ws-1", "ws-2"]).await.unwrap();

    assert_eq!(found.len(), 2);
    assert!(found["ws-1"]);
    assert!(!found["ws-2"]);
    assert!(!found.contains_key("ws-3"));
}

#[tokio::test]
async fn test_resolve_walks_every_page() {
    let service = FakeCommandService::new()
        .with_pages(vec![vec!["ws-1"], vec![], vec!["ws-2"], vec!["ws-3"]])
        .into_arc();
    let resolver = EndpointResolver::new(service.clone());

    let found = resolver.resolve(["ws-3", "ws-1", "ws-4"]).await.unwrap();

    assert_eq!(service.describe_calls(), 4);
    assert!(found["ws-1"]);
    assert!(found["ws-3"]);
    assert!(!found["ws-4"]);
}

#[tokio::test]
async fn test_resolve_is_idempotent() {
    let service = FakeCommandService::new()
        .with_pages(vec![vec!["ws-1"], vec!["ws-2"]])
        .into_arc();
    let resolver = EndpointResolver::new(service.clone());

    let first = resolver.resolve(["ws-1", "ws-2", "ws-5"]).await.unwrap();
    let second = resolver.resolve(["ws-1", "ws-2", "ws-5"]).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_resolve_collapses_duplicate_ids() {
    let service = FakeCommandService::new()
        .with_registered(&["ws-1"])
        .into_arc();
    let resolver = EndpointResolver::new(service.clone());

    let found = resolver.resolve(["ws-1", "ws-1"]).await.unwrap();

    assert_eq!(found.len(), 1);
    assert!(found["ws-1"]);
}

#[tokio::test]
async fn test_resolve_failure_is_fatal() {
    let service = FakeCommandService::new()
        .with_describe_error("AccessDeniedException")
        .into_arc();
    let resolver = EndpointResolver::new(service.clone());

    let err = resolver.resolve(["ws-1"]).await.unwrap_err();

    assert_eq!(err.operation, "DescribeInstanceInformation");
    assert_eq!(err.message, "AccessDeniedException");
}

#[tokio::test]
async fn test_resolve_empty_registry() {
    let service = FakeCommandService::new().into_arc();
    let resolver = EndpointResolver::new(service.clone());

    let found = resolver.resolve(["ws-1"]).await.unwrap();

    assert_eq!(service.describe_calls(), 1);
    assert!(!found["ws-1"]);
}
