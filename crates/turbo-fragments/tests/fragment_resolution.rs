//! Fragment resolution across catalog, localization and content query.

use serde_json::json;
use turbo_data::InMemoryGraphqlClient;
use turbo_fragments::prelude::*;
use turbo_fragments::query::{PN_CATEGORIES, PN_FRAGMENT_LOCATION, PN_PRODUCTS};

fn resolve(
    store: &InMemoryContentStore,
    client: &InMemoryGraphqlClient,
    config: &FragmentConfig,
    page: CurrentPage,
    request: RenderRequest,
) -> CommerceExperienceFragment {
    let provider = RouteParamsUrlProvider;
    CommerceExperienceFragment::resolve(ResolutionContext {
        page,
        request,
        config,
        identifiers: IdentifierResolver::new(&provider, Some(client)),
        services: ContentServices::from_store(store),
    })
}

#[test]
fn test_category_page_without_localization() {
    let store = InMemoryContentStore::new()
        .with_page("/content/venia/category-page")
        .with_experience_fragment("/content/experience-fragments/variant-a", "en", |node| {
            node.with_property(PN_CATEGORIES, "24")
        });
    let client = InMemoryGraphqlClient::new();
    let config = FragmentConfig::default();

    let fragment = resolve(
        &store,
        &client,
        &config,
        CurrentPage::new("/content/venia/category-page", PageKind::Category),
        RenderRequest::new("/c/24.html").with_param("uid", "24"),
    );

    assert_eq!(
        fragment.fragment_resource().map(Resource::path),
        Some("/content/experience-fragments/variant-a/en/jcr:content")
    );
    assert_eq!(fragment.name(), Some("variant-a"));
    assert_eq!(client.execute_count(), 0);

    let statements = store.executed_statements();
    assert_eq!(statements.len(), 1);
    assert!(statements[0].contains("ISDESCENDANTNODE('/content/experience-fragments')"));
    assert!(statements[0].contains("node.[cq:categories] = '24'"));
}

#[test]
fn test_product_slug_resolved_once_through_catalog() {
    let store = InMemoryContentStore::new()
        .with_page("/content/venia/us/en/products/product-page")
        .with_language_root("/content/venia/us/en")
        .with_experience_fragment("/content/experience-fragments/venia/us/en/bag-promo", "master", |node| {
            node.with_property(PN_PRODUCTS, "MB01#MB01-black")
        });
    let client = InMemoryGraphqlClient::new().with_response(json!({
        "data": { "products": { "items": [{ "sku": "MB01" }] } }
    }));
    let config = FragmentConfig::default();

    let fragment = resolve(
        &store,
        &client,
        &config,
        CurrentPage::new("/content/venia/us/en/products/product-page", PageKind::Product),
        RenderRequest::new("/p/joust-duffle-bag.html").with_param("url_key", "joust-duffle-bag"),
    );

    assert_eq!(fragment.name(), Some("bag-promo"));
    assert_eq!(client.execute_count(), 1);
    assert_eq!(
        client.last_query(),
        Some(r#"{products(filter:{url_key:{eq:"joust-duffle-bag"}}){items{sku}}}"#.to_string())
    );
    assert_eq!(
        fragment.query().map(FragmentQuery::scope),
        Some("/content/experience-fragments/venia/us/en")
    );
}

#[test]
fn test_unknown_product_resolves_nothing() {
    let store = InMemoryContentStore::new().with_page("/content/venia/product-page");
    let client = InMemoryGraphqlClient::new()
        .with_response(json!({ "data": { "products": { "items": [] } } }));
    let config = FragmentConfig::default();

    let fragment = resolve(
        &store,
        &client,
        &config,
        CurrentPage::new("/content/venia/product-page", PageKind::Product),
        RenderRequest::new("/p/gone.html").with_param("url_key", "gone"),
    );

    assert!(fragment.query().is_none());
    assert!(fragment.fragment_resource().is_none());
    assert!(store.executed_statements().is_empty());
}

#[test]
fn test_first_of_multiple_matches_wins() {
    let store = InMemoryContentStore::new()
        .with_page("/content/venia/product-page")
        .with_experience_fragment("/content/experience-fragments/second", "master", |node| {
            node.with_property(PN_PRODUCTS, "MB01")
        })
        .with_experience_fragment("/content/experience-fragments/first", "master", |node| {
            node.with_property(PN_PRODUCTS, "MB01")
        });
    let client = InMemoryGraphqlClient::new();
    let config = FragmentConfig::default();

    let fragment = resolve(
        &store,
        &client,
        &config,
        CurrentPage::new("/content/venia/product-page", PageKind::Product),
        RenderRequest::new("/p").with_param("sku", "MB01"),
    );

    assert_eq!(fragment.name(), Some("second"));
}

#[test]
fn test_fragment_location_from_config() {
    let store = InMemoryContentStore::new()
        .with_page("/content/venia/product-page")
        .with_experience_fragment("/content/experience-fragments/default", "master", |node| {
            node.with_property(PN_PRODUCTS, "MB01")
        })
        .with_experience_fragment("/content/experience-fragments/footer", "master", |node| {
            node.with_property(PN_PRODUCTS, "MB01")
                .with_property(PN_FRAGMENT_LOCATION, "footer")
        });
    let client = InMemoryGraphqlClient::new();
    let config = FragmentConfig::from_toml_str(r#"fragment_location = "footer""#).unwrap();

    let fragment = resolve(
        &store,
        &client,
        &config,
        CurrentPage::new("/content/venia/product-page", PageKind::Product),
        RenderRequest::new("/p").with_param("sku", "MB01"),
    );

    assert_eq!(fragment.name(), Some("footer"));
    assert_eq!(fragment.query().and_then(FragmentQuery::location), Some("footer"));
}

#[test]
fn test_live_copy_scope() {
    let store = InMemoryContentStore::new()
        .with_page("/content/venia-fr/products/product-page")
        .with_live_copy(LiveCopy::new("/content/venia", "/content/venia-fr"))
        .with_experience_fragment("/content/experience-fragments/venia", "master", |node| {
            node.with_property(PN_PRODUCTS, "MB01")
        })
        .with_experience_fragment("/content/experience-fragments/venia-fr/promo", "master", |node| {
            node.with_property(PN_PRODUCTS, "MB01")
        });
    let client = InMemoryGraphqlClient::new();
    let config = FragmentConfig::default();

    let fragment = resolve(
        &store,
        &client,
        &config,
        CurrentPage::new("/content/venia-fr/products/product-page", PageKind::Product),
        RenderRequest::new("/p").with_param("sku", "MB01"),
    );

    assert_eq!(fragment.name(), Some("promo"));
}

#[test]
fn test_storage_failure_leaves_fragment_empty() {
    let store = InMemoryContentStore::new()
        .with_page("/content/venia/product-page")
        .with_experience_fragment("/content/experience-fragments/promo", "master", |node| {
            node.with_property(PN_PRODUCTS, "MB01")
        })
        .failing_queries("repository offline");
    let client = InMemoryGraphqlClient::new();
    let config = FragmentConfig::default();

    let fragment = resolve(
        &store,
        &client,
        &config,
        CurrentPage::new("/content/venia/product-page", PageKind::Product),
        RenderRequest::new("/p").with_param("sku", "MB01"),
    );

    assert!(fragment.fragment_resource().is_none());
    assert!(fragment.name().is_none());
    assert!(fragment.query().is_some());
}

#[test]
fn test_without_client_only_canonical_identifiers_resolve() {
    let store = InMemoryContentStore::new()
        .with_page("/content/venia/category-page")
        .with_experience_fragment("/content/experience-fragments/men", "en", |node| {
            node.with_property(PN_CATEGORIES, "MTI=")
        });
    let config = FragmentConfig::default();
    let provider = RouteParamsUrlProvider;

    let by_path = CommerceExperienceFragment::resolve(ResolutionContext {
        page: CurrentPage::new("/content/venia/category-page", PageKind::Category),
        request: RenderRequest::new("/c/men.html").with_param("url_path", "men"),
        config: &config,
        identifiers: IdentifierResolver::<&InMemoryGraphqlClient>::new(&provider, None),
        services: ContentServices::from_store(&store),
    });
    assert!(by_path.fragment_resource().is_none());

    let by_uid = CommerceExperienceFragment::resolve(ResolutionContext {
        page: CurrentPage::new("/content/venia/category-page", PageKind::Category),
        request: RenderRequest::new("/c/men.html").with_param("uid", "MTI="),
        config: &config,
        identifiers: IdentifierResolver::<&InMemoryGraphqlClient>::new(&provider, None),
        services: ContentServices::from_store(&store),
    });
    assert_eq!(by_uid.name(), Some("men"));
}
