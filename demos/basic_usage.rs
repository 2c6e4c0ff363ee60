// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the envaware crate.
//!
//! This example demonstrates:
//! - Layering overrides, a properties file and the environment
//! - Nested and chained `${key}` placeholders
//! - Resolving lookups that reach environment variables
//! - Partitioning a configuration by namespace
//!
//! To run this example:
//! ```bash
//! export APP_PROFILE="staging"
//! cargo run --example basic_usage
//! ```

use envaware::prelude::*;
use std::fs;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== envaware: Basic Usage ===\n");

    let dir = std::env::temp_dir().join(format!("envaware-demo-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let file = dir.join("application.properties");
    fs::write(
        &file,
        "# demo configuration\n\
         app.name=Demo\n\
         app.home=${user.home}/.demo\n\
         db.staging.url=jdbc:postgresql://staging/demo\n\
         db.prod.url=jdbc:postgresql://prod/demo\n\
         db.pool.size=4\n\
         db.selected=db.${APP_PROFILE}.url\n\
         db.url=${${db.selected}}\n",
    )?;

    let props = EnvAwareProperties::builder()
        .with_override("db.pool.size", "16")
        .then_add_properties_file(&file)
        .disable_root_dotfile()
        .build()?;

    // Example 1: resolved values
    println!("--- Example 1: Resolved Values ---");
    println!("app.name     = {}", props.get_or("app.name", "unknown"));
    println!("app.home     = {}", props.get_or("app.home", "unknown"));
    println!("db.pool.size = {} (override)", props.get_or("db.pool.size", "1"));
    println!("db.url       = {}", props.get_or("db.url", "unresolved"));
    println!();

    // Example 2: resolving lookups
    println!("--- Example 2: Resolving Lookups ---");
    match props.get_resolving("db.${APP_PROFILE}.url") {
        Some(url) => println!("✓ profile url: {}", url),
        None => println!("✗ APP_PROFILE is not set to a known profile"),
    }
    println!(
        "HOME via environment: {}",
        props.get_resolving_or("HOME", "<unset>")
    );
    println!();

    // Example 3: partitions
    println!("--- Example 3: Partitions ---");
    let db = props.partition("db");
    for (key, value) in db.iter() {
        println!("  {} = {}", key, value);
    }
    println!();

    println!("All entries: {}", props);

    fs::remove_dir_all(&dir)?;
    Ok(())
}
