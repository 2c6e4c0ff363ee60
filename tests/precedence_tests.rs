// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration source precedence.

mod common;

use common::{EnvGuard, Fixtures};
use envaware::domain::SourceChain;
use envaware::prelude::*;

#[test]
fn test_precedence_override_over_files() {
    let fixtures = Fixtures::new();
    let first = fixtures.write("first.properties", "app.name=first\napp.port=1\n");
    let second = fixtures.write("second.properties", "app.name=second\napp.port=2\napp.mode=second\n");

    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_properties_file(&first)
        .then_add_properties_file(&second)
        .with_override("app.port", "9000")
        .build()
        .unwrap();

    assert_eq!(props.get("app.port"), Some("9000"));
    assert_eq!(props.get("app.name"), Some("first"));
    assert_eq!(props.get("app.mode"), Some("second"));
}

#[test]
#[cfg(feature = "yaml")]
fn test_precedence_properties_over_yaml() {
    let fixtures = Fixtures::new();
    let yaml = fixtures.write(
        "config.yaml",
        "server:\n  host: yaml-host\n  port: 8080\ndatabase:\n  name: yaml-db\n",
    );
    let properties = fixtures.write("config.properties", "server.port=9090\n");

    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_file(&properties)
        .then_add_file(&yaml)
        .build()
        .unwrap();

    assert_eq!(props.get("server.port"), Some("9090"));
    assert_eq!(props.get("server.host"), Some("yaml-host"));
    assert_eq!(props.get("database.name"), Some("yaml-db"));
}

#[test]
#[cfg(feature = "cli")]
fn test_precedence_cli_over_file() {
    let fixtures = Fixtures::new();
    let file = fixtures.write("app.properties", "server.port=8080\nserver.host=file-host\n");

    let props = EnvAwareProperties::builder()
        .isolated()
        .with_cli_args(["--server.port=9999", "-Dfeature.flag"])
        .then_add_properties_file(&file)
        .build()
        .unwrap();

    assert_eq!(props.get("server.port"), Some("9999"));
    assert_eq!(props.get("server.host"), Some("file-host"));
    assert_eq!(props.get("feature.flag"), Some(""));
}

#[test]
#[cfg(feature = "cli")]
fn test_override_beats_cli() {
    let props = EnvAwareProperties::builder()
        .isolated()
        .with_cli_args(["--mode", "cli"])
        .with_override("mode", "override")
        .build()
        .unwrap();

    assert_eq!(props.get("mode"), Some("override"));
}

#[test]
#[cfg(feature = "env")]
fn test_prefixed_env_beats_later_file() {
    let mut guard = EnvGuard::new();
    guard.set("ENVAWARE_PREC_SERVER_PORT", "7000");

    let fixtures = Fixtures::new();
    let file = fixtures.write("app.properties", "server.port=8080\nserver.host=localhost\n");

    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_prefixed_env("ENVAWARE_PREC_", TranslatorFlavor::Default)
        .then_add_properties_file(&file)
        .build()
        .unwrap();

    assert_eq!(props.get("server.port"), Some("7000"));
    assert_eq!(props.get("server.host"), Some("localhost"));
}

#[test]
#[cfg(feature = "env")]
fn test_fallback_environment_never_shadows_explicit_key() {
    let mut guard = EnvGuard::new();
    guard.set("ENVAWARE_PREC_PORT", "from-env");

    let props = EnvAwareProperties::builder()
        .disable_all_dotfiles()
        .then_add_map([("ENVAWARE_PREC_PORT", "from-map")])
        .build()
        .unwrap();

    assert_eq!(props.get("ENVAWARE_PREC_PORT"), Some("from-map"));
    assert_eq!(
        props.get_resolving("ENVAWARE_PREC_PORT").as_deref(),
        Some("from-map")
    );
}

#[test]
fn test_fallback_order() {
    let chain = SourceChain::new()
        .with_primary(Box::new(
            MapSource::new("file").with_value("out", "${shared}|${env.only}|${dot.only}"),
        ))
        .with_fallback(Box::new(
            MapSource::new("dotfile")
                .with_value("shared", "dotfile")
                .with_value("dot.only", "d"),
        ))
        .with_fallback(Box::new(
            MapSource::new("process-properties").with_value("shared", "props"),
        ))
        .with_fallback(Box::new(
            MapSource::new("env")
                .with_value("shared", "env")
                .with_value("env.only", "e"),
        ));

    let props = EnvAwareProperties::from_chain(&chain, PlaceholderResolver::new()).unwrap();

    assert_eq!(props.get("out"), Some("dotfile|e|d"));
    assert_eq!(props.len(), 1);
}

#[test]
fn test_process_properties_before_environment() {
    let mut guard = EnvGuard::new();
    // Same spelling as a process property; the process property wins.
    guard.set("os.name", "not-the-real-os");

    let props = EnvAwareProperties::builder()
        .disable_all_dotfiles()
        .then_add_map([("platform", "${os.name}")])
        .build()
        .unwrap();

    assert_eq!(props.get("platform"), Some(std::env::consts::OS));
}

#[test]
fn test_duplicate_sources_keep_first_value() {
    let fixtures = Fixtures::layered();

    let props = EnvAwareProperties::builder()
        .isolated()
        .then_add_properties_file(fixtures.path("test2.properties"))
        .then_add_properties_file(fixtures.path("test3.properties"))
        .then_add_properties_file(fixtures.path("test2.properties"))
        .build()
        .unwrap();

    assert_eq!(props.get("test1.k1"), Some("test1.v1.override.test2"));
    assert_eq!(props.get("test1.k2"), Some("test1.v2.override.test3"));
    assert_eq!(props.get("test2.k1"), Some("test2.v1"));
    assert_eq!(props.len(), 6);
}
