//! URL assembly properties
//!
//! Whatever slashes the configured fragments carry, routed URLs contain
//! exactly one separator between fragments.

use apiorm_route::url::append_template;
use apiorm_route::{ResourceOptions, Router, RouterConfig};
use proptest::prelude::*;

fn slashed(name: &'static str) -> impl Strategy<Value = String> {
    (0..3usize, 0..3usize).prop_map(move |(lead, trail)| {
        format!("{}{}{}", "/".repeat(lead), name, "/".repeat(trail))
    })
}

fn collection_url(config: RouterConfig) -> String {
    let mut router = Router::new(config);
    router.resource("User", ResourceOptions::default()).unwrap();
    let route = router.find("User", "all").unwrap();
    append_template(router.root(), route.url())
}

proptest! {
    #[test]
    fn prop_fragments_joined_with_single_separator(
        trailing in 0..3usize,
        path in slashed("api"),
        version in slashed("v1"),
    ) {
        let domain = format!("http://example.com{}", "/".repeat(trailing));
        let config = RouterConfig::new()
            .with_domain(domain)
            .with_path(path)
            .with_version(version);

        prop_assert_eq!(collection_url(config), "http://example.com/api/v1/users");
    }

    #[test]
    fn prop_host_relative_urls_have_no_double_slash(
        path in slashed("api"),
        version in slashed("v1"),
        with_version in any::<bool>(),
    ) {
        let mut config = RouterConfig::new().with_path(path);
        if with_version {
            config = config.with_version(version);
        }

        let url = collection_url(config);
        prop_assert!(url.starts_with("/api/"));
        prop_assert!(!url.contains("//"));
    }

    #[test]
    fn prop_scheme_relative_domain_preserved(trailing in 0..3usize, path in slashed("api")) {
        let domain = format!("//example.com{}", "/".repeat(trailing));
        let config = RouterConfig::new().with_domain(domain).with_path(path);

        prop_assert_eq!(collection_url(config), "//example.com/api/users");
    }
}

#[test]
fn no_fragments_gives_host_relative_path() {
    assert_eq!(collection_url(RouterConfig::new()), "/users");
}

#[test]
fn domain_with_trailing_slash() {
    let config = RouterConfig::new().with_domain("http://example.com/");
    assert_eq!(collection_url(config), "http://example.com/users");
}
