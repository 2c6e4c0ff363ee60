// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for building and querying properties.
//!
//! These tests exercise the builder end to end with real files, readers,
//! overrides and environment variables.

mod common;

use common::{EnvGuard, FailingSource, Fixtures};
use envaware::prelude::*;
use std::fs::File;

#[cfg(feature = "env")]
#[test]
fn test_override_resolves_against_environment() {
    let mut guard = EnvGuard::new();
    guard.set("ENVAWARE_IT_ENV1", "A long story with ENV1");

    let props = EnvAwareProperties::builder()
        .with_override("k1", "${ENVAWARE_IT_ENV1}")
        .build()
        .unwrap();

    assert_eq!(props.get("k1"), Some("A long story with ENV1"));
    assert_eq!(props.len(), 1);
}

#[test]
fn test_isolated_override_keeps_placeholder() {
    let mut guard = EnvGuard::new();
    guard.set("ENVAWARE_IT_ENV2", "unused");

    let props = EnvAwareProperties::builder()
        .disable_all_dotfiles()
        .disable_environment()
        .disable_process_properties()
        .with_override("k1", "${ENVAWARE_IT_ENV2}")
        .build()
        .unwrap();

    assert_eq!(props.get("k1"), Some("${ENVAWARE_IT_ENV2}"));
    assert_eq!(props.len(), 1);
}

#[test]
fn test_files_in_order() {
    let fixtures = Fixtures::layered();

    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_properties_file(fixtures.path("test1.properties"))
        .then_add_properties_file(fixtures.path("test2.properties"))
        .then_add_properties_file(fixtures.path("test3.properties"))
        .build()
        .unwrap();

    assert_eq!(props.len(), 6);
    assert_eq!(props.get("test1.k1"), Some("test1.v1"));
    assert_eq!(props.get("test1.k2"), Some("test1.v2"));
    assert_eq!(props.get("test2.k1"), Some("test2.v1"));
    assert_eq!(props.get("test2.k2"), Some("test2.v2"));
    assert_eq!(props.get("test3.k1"), Some("test3.v1"));
    assert_eq!(props.get("test3.k2"), Some("test3.v2"));
}

#[test]
fn test_files_reverse_order_with_duplicates() {
    let fixtures = Fixtures::layered();

    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_properties_files([
            fixtures.path("test3.properties"),
            fixtures.path("test1.properties"),
            fixtures.path("test1.properties"),
        ])
        .build()
        .unwrap();

    assert_eq!(props.len(), 6);
    assert_eq!(props.get("test1.k1"), Some("test1.v1.override.test3"));
    assert_eq!(props.get("test1.k2"), Some("test1.v2.override.test3"));
    assert_eq!(props.get("test2.k1"), Some("test2.v1.override.test3"));
    assert_eq!(props.get("test2.k2"), Some("test2.v2.override.test3"));
    assert_eq!(props.get("test3.k1"), Some("test3.v1"));
    assert_eq!(props.get("test3.k2"), Some("test3.v2"));
}

#[test]
fn test_mixed_file_and_reader_sources() {
    let fixtures = Fixtures::layered();

    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_properties_file(fixtures.path("test3.properties"))
        .then_add_file(fixtures.path("test2.properties"))
        .then_add_reader("test1", File::open(fixtures.path("test1.properties")).unwrap())
        .build()
        .unwrap();

    assert_eq!(props.len(), 6);
    assert_eq!(props.get("test1.k1"), Some("test1.v1.override.test3"));
    assert_eq!(props.get("test2.k2"), Some("test2.v2.override.test3"));
    assert_eq!(props.get("test3.k2"), Some("test3.v2"));
}

#[test]
fn test_nested_and_indirect_resolution() {
    let fixtures = Fixtures::new();
    let path = fixtures.write(
        "resolve.properties",
        "k1=v1\n\
         k2=value1\n\
         k2value1=k2\n\
         keyk2=found via key${k2}\n\
         keyvalue1=found via keyvalue1\n\
         chained=${keytest123}/${k9}\n",
    );

    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_properties_file(&path)
        .with_override("k9", "k9v")
        .with_override("test123", "test123")
        .with_override("keytest123", "${k1}")
        .build()
        .unwrap();

    assert_eq!(props.get("keytest123"), Some("v1"));
    assert_eq!(props.get("chained"), Some("v1/k9v"));
    assert_eq!(props.get("keyk2"), Some("found via keyvalue1"));
    // ${k2value1} -> k2, ${k2} -> value1
    assert_eq!(
        props.get_resolving("key${${k2value1}}").as_deref(),
        Some("found via keyvalue1")
    );
}

#[test]
fn test_circular_references_terminate() {
    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_map([
            ("key.1", "${key.2}"),
            ("key.2", "${key.1}"),
            ("self", "x${self}"),
            ("grow.a", "${grow.b}${grow.b}"),
            ("grow.b", "${grow.a}${grow.a}"),
            ("fine", "ok"),
        ])
        .build()
        .unwrap();

    assert_eq!(props.get("key.1"), Some("${key.2}"));
    assert_eq!(props.get("key.2"), Some("${key.1}"));
    assert_eq!(props.get("self"), Some("x${self}"));
    assert_eq!(props.get("grow.a"), Some("${grow.b}${grow.b}"));
    assert_eq!(props.get("fine"), Some("ok"));
}

#[test]
fn test_large_values_resolve() {
    let big = "x".repeat(2 * 1024 * 1024);
    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_map([("big", big.as_str()), ("ref", "${big}")])
        .build()
        .unwrap();
    assert_eq!(props.get("ref").map(str::len), Some(big.len()));

    let content = format!("big={}\nref=prefix-${{big}}\n", "y".repeat(1_100_000));
    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_reader("large", content.as_bytes())
        .build()
        .unwrap();
    let resolved = props.get("ref").unwrap();
    assert!(resolved.starts_with("prefix-yyy"));
    assert_eq!(resolved.len(), "prefix-".len() + 1_100_000);
}

#[test]
fn test_partitions() {
    let fixtures = Fixtures::new();
    let path = fixtures.write(
        "defaultp8.properties",
        "root.ns1.a=1\nroot.ns1.b=${root.ns2.c}\nroot.ns2.c=3\nother=4\n",
    );

    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_properties_file(&path)
        .build()
        .unwrap();

    let root = props.partition("root");
    assert_eq!(root.len(), 3);
    assert_eq!(root.get("ns1.b"), Some("3"));
    assert_eq!(root.store(), props.partition("root.").store());

    let ns1 = root.partition("ns1");
    assert_eq!(ns1.len(), 2);
    assert_eq!(ns1.get("a"), Some("1"));
    assert_eq!(ns1.get("b"), Some("3"));

    let ns2 = props.partition("root.").partition("ns2.");
    assert_eq!(ns2.len(), 1);
    assert_eq!(ns2.get("c"), Some("3"));
}

#[cfg(feature = "env")]
#[test]
fn test_environment_keys_are_placeholder_targets_only() {
    let mut guard = EnvGuard::new();
    guard.set("ENVAWARE_IT_HIDDEN", "/opt/hidden");
    guard.set("ENVAWARE_IT_SHADOWED", "from-env");

    let props = EnvAwareProperties::builder()
        .disable_all_dotfiles()
        .then_add_map([
            ("install.dir", "${ENVAWARE_IT_HIDDEN}/bin"),
            ("ENVAWARE_IT_SHADOWED", "from-file"),
        ])
        .build()
        .unwrap();

    assert_eq!(props.get("install.dir"), Some("/opt/hidden/bin"));
    assert_eq!(props.get("ENVAWARE_IT_HIDDEN"), None);
    assert_eq!(props.get("ENVAWARE_IT_SHADOWED"), Some("from-file"));
    assert_eq!(
        props.get_resolving("ENVAWARE_IT_HIDDEN").as_deref(),
        Some("/opt/hidden")
    );
}

#[cfg(feature = "env")]
#[test]
fn test_indirect_lookup_through_environment() {
    let mut guard = EnvGuard::new();
    guard.set("ENVAWARE_IT_PROFILE", "staging");

    let props = EnvAwareProperties::builder()
        .disable_all_dotfiles()
        .then_add_map([("db.staging.url", "jdbc://staging"), ("db.prod.url", "jdbc://prod")])
        .build()
        .unwrap();

    assert_eq!(
        props.get_resolving("db.${ENVAWARE_IT_PROFILE}.url").as_deref(),
        Some("jdbc://staging")
    );
}

#[test]
fn test_process_properties_in_values() {
    let props = EnvAwareProperties::builder()
        .disable_all_dotfiles()
        .disable_environment()
        .then_add_map([("app.os", "${os.name}-${os.arch}")])
        .build()
        .unwrap();

    let expected = format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH);
    assert_eq!(props.get("app.os"), Some(expected.as_str()));
    assert_eq!(props.get("os.name"), None);
}

#[cfg(feature = "env")]
#[test]
fn test_prefixed_environment_projection() {
    let mut guard = EnvGuard::new();
    guard.set("ENVAWARE_PROJ_DATABASE_URL", "jdbc://env");
    guard.set("ENVAWARE_PROJ_POOL__SIZE", "8");

    let props = EnvAwareProperties::builder()
        .isolated()
        .with_override("database.user", "admin")
        .then_add_prefixed_env("ENVAWARE_PROJ_", TranslatorFlavor::Default)
        .then_add_map([("database.url", "jdbc://file"), ("summary", "${database.url} x${pool_size}")])
        .build()
        .unwrap();

    assert_eq!(props.get("database.url"), Some("jdbc://env"));
    assert_eq!(props.get("pool_size"), Some("8"));
    assert_eq!(props.get("summary"), Some("jdbc://env x8"));
    assert_eq!(props.get("database.user"), Some("admin"));
}

#[cfg(feature = "env")]
#[test]
fn test_prefixed_hex_environment_projection() {
    let mut guard = EnvGuard::new();
    guard.set("ENVAWARE_HEXP_64617461626173652E75736572", "hex-user");

    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_prefixed_env("ENVAWARE_HEXP_", TranslatorFlavor::from_name(Some("HEX")))
        .build()
        .unwrap();

    assert_eq!(props.get("database.user"), Some("hex-user"));
}

#[cfg(feature = "env")]
#[test]
fn test_invalid_hex_name_fails_build() {
    let mut guard = EnvGuard::new();
    guard.set("ENVAWARE_BADHEXP_123", "x");

    let result = EnvAwareProperties::builder()
        .isolated()
        .then_add_prefixed_env("ENVAWARE_BADHEXP_", TranslatorFlavor::Hex)
        .build();

    assert!(matches!(result, Err(ConfigError::InvalidArgument { .. })));
}

#[test]
fn test_source_failure_propagates() {
    let result = EnvAwareProperties::builder()
        .isolated()
        .then_add_source(Box::new(FailingSource::default()))
        .build();

    assert!(matches!(result, Err(ConfigError::SourceError { .. })));
}

#[test]
fn test_malformed_file_reports_parse_error() {
    let fixtures = Fixtures::new();
    let path = fixtures.write("bad.properties", "good=1\nbad=\\u00zz\n");

    let result = EnvAwareProperties::builder()
        .isolated()
        .then_add_properties_file(&path)
        .build();

    match result {
        Err(ConfigError::ParseError { line, .. }) => assert_eq!(line, Some(2)),
        other => panic!("expected parse error, got {:?}", other.map(|p| p.to_string())),
    }
}

#[test]
fn test_from_paths_and_readers() {
    let fixtures = Fixtures::layered();

    let from_paths = EnvAwareProperties::from_paths([
        fixtures.path("missing.properties"),
        fixtures.path("test2.properties"),
    ])
    .unwrap();
    assert_eq!(from_paths.get("test1.k1"), Some("test1.v1.override.test2"));

    let from_readers = EnvAwareProperties::from_readers([
        File::open(fixtures.path("test1.properties")).unwrap(),
        File::open(fixtures.path("test2.properties")).unwrap(),
    ])
    .unwrap();
    assert_eq!(from_readers.get("test1.k1"), Some("test1.v1"));
    assert_eq!(from_readers.get("test2.k1"), Some("test2.v1"));
}

#[cfg(feature = "yaml")]
#[test]
fn test_yaml_and_properties_together() {
    let fixtures = Fixtures::new();
    let yaml = fixtures.write(
        "app.yaml",
        "server:\n  host: yaml.example.org\n  port: 8443\nendpoints:\n  - /a\n  - /b\n",
    );
    let props_path = fixtures.write(
        "app.properties",
        "server.port=9000\nserver.url=https://${server.host}:${server.port}${endpoints.1}\n",
    );

    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_properties_file(&props_path)
        .then_add_yaml_file(&yaml)
        .build()
        .unwrap();

    assert_eq!(props.get("server.url"), Some("https://yaml.example.org:9000/b"));
    assert_eq!(props.get("endpoints.0"), Some("/a"));
}

#[test]
fn test_post_build_updates_are_not_resolved() {
    let mut props = EnvAwareProperties::builder()
        .isolated()
        .then_add_map([("host", "localhost")])
        .build()
        .unwrap();

    props.set("url", "http://${host}");
    assert_eq!(props.get("url"), Some("http://${host}"));
    assert_eq!(props.get_resolving("url").as_deref(), Some("http://localhost"));

    props.remove("host");
    assert_eq!(props.get_resolving("url").as_deref(), Some("http://${host}"));
}

#[test]
fn test_serialize_store() {
    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_map([("b", "${a}"), ("a", "1")])
        .build()
        .unwrap();

    let json = serde_json::to_string(props.store()).unwrap();
    assert_eq!(json, r#"{"a":"1","b":"1"}"#);
}
