// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder for [`EnvAwareProperties`].
//!
//! The builder collects sources in precedence order. File and reader sources
//! are only loaded when [`build`](EnvAwarePropertiesBuilder::build) runs, so a
//! builder can be assembled up front and built later.

use crate::adapters::{
    MapSource, ProcessPropertiesAdapter, PropertiesFileAdapter, TranslatorFlavor, DOTFILE_NAME,
};
use crate::domain::{PlaceholderResolver, Result, SourceChain, DEFAULT_MAX_DEPTH};
use crate::ports::ConfigSource;
use crate::service::EnvAwareProperties;
use directories::BaseDirs;
use std::io::Read;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

/// A source queued on the builder.
#[derive(Debug)]
enum PendingSource {
    Ready(Box<dyn ConfigSource>),
    PropertiesFile(PathBuf),
    #[cfg(feature = "yaml")]
    YamlFile(PathBuf),
    File(PathBuf),
    Reader {
        name: String,
        content: std::io::Result<Vec<u8>>,
    },
    #[cfg(feature = "env")]
    PrefixedEnv {
        prefix: String,
        flavor: TranslatorFlavor,
    },
    PrefixedProcessProperties {
        prefix: String,
        flavor: TranslatorFlavor,
    },
}

impl PendingSource {
    fn load(self) -> Result<Box<dyn ConfigSource>> {
        let source: Box<dyn ConfigSource> = match self {
            PendingSource::Ready(source) => source,
            PendingSource::PropertiesFile(path) => Box::new(PropertiesFileAdapter::from_file(path)?),
            #[cfg(feature = "yaml")]
            PendingSource::YamlFile(path) => Box::new(crate::adapters::YamlFileAdapter::from_file(path)?),
            PendingSource::File(path) => return load_by_extension(path),
            PendingSource::Reader { name, content } => {
                let bytes = content.map_err(|e| {
                    crate::domain::ConfigError::source_failure(name.clone(), "Failed to read properties", e)
                })?;
                Box::new(PropertiesFileAdapter::from_reader(name, bytes.as_slice())?)
            }
            #[cfg(feature = "env")]
            PendingSource::PrefixedEnv { prefix, flavor } => {
                Box::new(crate::adapters::EnvVarAdapter::prefixed(&prefix, flavor)?)
            }
            PendingSource::PrefixedProcessProperties { prefix, flavor } => {
                Box::new(ProcessPropertiesAdapter::prefixed(&prefix, flavor)?)
            }
        };
        Ok(source)
    }
}

#[cfg(feature = "yaml")]
fn load_by_extension(path: PathBuf) -> Result<Box<dyn ConfigSource>> {
    use crate::adapters::{YamlFileAdapter, YamlParser};
    use crate::ports::ConfigParser;

    if YamlParser::new().supports_path(&path) {
        Ok(Box::new(YamlFileAdapter::from_file(path)?))
    } else {
        Ok(Box::new(PropertiesFileAdapter::from_file(path)?))
    }
}

#[cfg(not(feature = "yaml"))]
fn load_by_extension(path: PathBuf) -> Result<Box<dyn ConfigSource>> {
    Ok(Box::new(PropertiesFileAdapter::from_file(path)?))
}

/// Builder for constructing an [`EnvAwareProperties`].
///
/// The builder starts with an empty override map as its highest-precedence
/// source. Every `then_add_*` call appends a source with lower precedence
/// than all sources added before it. After the explicit sources come the
/// fallbacks, in this fixed order, each enabled by default:
///
/// 1. `.jproperties` in the current directory
/// 2. `.jproperties` in the home directory
/// 3. `.jproperties` in the filesystem root
/// 4. process properties (`user.home`, `os.name`, ...)
/// 5. environment variables
///
/// Fallback keys can be referenced from placeholders but never appear as
/// entries of the built configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use envaware::prelude::*;
///
/// # fn main() -> Result<()> {
/// let props = EnvAwareProperties::builder()
///     .with_override("mode", "test")
///     .then_add_properties_file("config/application.properties")
///     .then_add_properties_file("config/defaults.properties")
///     .disable_root_dotfile()
///     .build()?;
///
/// println!("{}", props.get_or("app.dir", "${user.home}/app"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EnvAwarePropertiesBuilder {
    overrides: MapSource,
    sources: Vec<PendingSource>,
    cwd_dotfile: bool,
    home_dotfile: bool,
    root_dotfile: bool,
    process_properties: bool,
    environment: bool,
    max_depth: usize,
}

impl EnvAwarePropertiesBuilder {
    /// Creates a builder with no sources and every fallback enabled.
    pub fn new() -> Self {
        Self {
            overrides: MapSource::new("overrides"),
            sources: Vec::new(),
            cwd_dotfile: true,
            home_dotfile: true,
            root_dotfile: true,
            process_properties: true,
            environment: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets an override. Overrides take precedence over every other source.
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key, value);
        self
    }

    /// Removes an override.
    pub fn delete_override(mut self, key: &str) -> Self {
        self.overrides.remove(key);
        self
    }

    /// Removes every override.
    pub fn clear_overrides(mut self) -> Self {
        self.overrides.clear();
        self
    }

    /// Appends an arbitrary source.
    pub fn then_add_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(PendingSource::Ready(source));
        self
    }

    /// Appends an in-memory map of string pairs.
    pub fn then_add_map<I, K, V>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = format!("map-{}", self.sources.len());
        let source = entries
            .into_iter()
            .fold(MapSource::new(name), |source, (k, v)| source.with_value(k, v));
        self.then_add_source(Box::new(source))
    }

    /// Appends a `.properties` file, read at build time.
    pub fn then_add_properties_file(mut self, path: impl AsRef<Path>) -> Self {
        self.sources
            .push(PendingSource::PropertiesFile(path.as_ref().to_path_buf()));
        self
    }

    /// Appends several `.properties` files, earlier files taking precedence.
    pub fn then_add_properties_files<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths
            .into_iter()
            .fold(self, |builder, path| builder.then_add_properties_file(path))
    }

    /// Appends `.properties` content from a reader.
    ///
    /// The reader is drained immediately; read and parse failures are
    /// reported by [`build`](Self::build).
    pub fn then_add_reader<R: Read>(mut self, name: impl Into<String>, mut reader: R) -> Self {
        let mut buf = Vec::new();
        let content = reader.read_to_end(&mut buf).map(|_| buf);
        self.sources.push(PendingSource::Reader {
            name: name.into(),
            content,
        });
        self
    }

    /// Appends a YAML file, read at build time.
    #[cfg(feature = "yaml")]
    pub fn then_add_yaml_file(mut self, path: impl AsRef<Path>) -> Self {
        self.sources
            .push(PendingSource::YamlFile(path.as_ref().to_path_buf()));
        self
    }

    /// Appends a file whose format is chosen by extension: `.yaml`/`.yml` as
    /// YAML (with the `yaml` feature), anything else as `.properties`.
    pub fn then_add_file(mut self, path: impl AsRef<Path>) -> Self {
        self.sources.push(PendingSource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Appends command-line overrides (`--key=value`, `--key value`,
    /// `-Dkey=value`).
    #[cfg(feature = "cli")]
    pub fn with_cli_args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        use crate::adapters::CommandLineAdapter;
        self.then_add_source(Box::new(CommandLineAdapter::from_args(args)))
    }

    /// Appends the environment variables starting with `prefix`, their names
    /// translated into keys.
    #[cfg(feature = "env")]
    pub fn then_add_prefixed_env(mut self, prefix: impl Into<String>, flavor: TranslatorFlavor) -> Self {
        self.sources.push(PendingSource::PrefixedEnv {
            prefix: prefix.into(),
            flavor,
        });
        self
    }

    /// Appends the process properties starting with `prefix`, their names
    /// translated into keys.
    pub fn then_add_prefixed_process_properties(
        mut self,
        prefix: impl Into<String>,
        flavor: TranslatorFlavor,
    ) -> Self {
        self.sources.push(PendingSource::PrefixedProcessProperties {
            prefix: prefix.into(),
            flavor,
        });
        self
    }

    /// Drops every appended source. Overrides are kept.
    pub fn remove_all(mut self) -> Self {
        self.sources.clear();
        self
    }

    /// Enables the `.jproperties` fallback in the current directory.
    pub fn enable_cwd_dotfile(mut self) -> Self {
        self.cwd_dotfile = true;
        self
    }

    /// Disables the `.jproperties` fallback in the current directory.
    pub fn disable_cwd_dotfile(mut self) -> Self {
        self.cwd_dotfile = false;
        self
    }

    /// Enables the `.jproperties` fallback in the home directory.
    pub fn enable_home_dotfile(mut self) -> Self {
        self.home_dotfile = true;
        self
    }

    /// Disables the `.jproperties` fallback in the home directory.
    pub fn disable_home_dotfile(mut self) -> Self {
        self.home_dotfile = false;
        self
    }

    /// Enables the `.jproperties` fallback in the filesystem root.
    pub fn enable_root_dotfile(mut self) -> Self {
        self.root_dotfile = true;
        self
    }

    /// Disables the `.jproperties` fallback in the filesystem root.
    pub fn disable_root_dotfile(mut self) -> Self {
        self.root_dotfile = false;
        self
    }

    /// Enables all three dotfile fallbacks.
    pub fn enable_all_dotfiles(self) -> Self {
        self.enable_cwd_dotfile().enable_home_dotfile().enable_root_dotfile()
    }

    /// Disables all three dotfile fallbacks.
    pub fn disable_all_dotfiles(self) -> Self {
        self.disable_cwd_dotfile().disable_home_dotfile().disable_root_dotfile()
    }

    /// Enables the process-properties fallback.
    pub fn enable_process_properties(mut self) -> Self {
        self.process_properties = true;
        self
    }

    /// Disables the process-properties fallback.
    pub fn disable_process_properties(mut self) -> Self {
        self.process_properties = false;
        self
    }

    /// Enables the environment fallback.
    pub fn enable_environment(mut self) -> Self {
        self.environment = true;
        self
    }

    /// Disables the environment fallback.
    pub fn disable_environment(mut self) -> Self {
        self.environment = false;
        self
    }

    /// Disables every fallback, so only explicit sources contribute.
    pub fn isolated(self) -> Self {
        self.disable_all_dotfiles()
            .disable_process_properties()
            .disable_environment()
    }

    /// Sets the placeholder resolution depth limit.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Loads every source and resolves the configuration.
    ///
    /// Fails with `SourceError` or `ParseError` if an explicit source cannot be
    /// loaded, and with `InvalidArgument` if an environment or process
    /// property name cannot be translated. Fallback dotfiles never fail the
    /// build.
    pub fn build(self) -> Result<EnvAwareProperties> {
        let mut chain = SourceChain::new();
        chain.push_primary(Box::new(self.overrides));

        for pending in self.sources {
            chain.push_primary(pending.load()?);
        }

        for path in dotfile_paths(self.cwd_dotfile, self.home_dotfile, self.root_dotfile) {
            if let Some(dotfile) = PropertiesFileAdapter::load_optional(&path) {
                tracing::debug!("Using dotfile {}", path.display());
                chain.push_fallback(Box::new(dotfile));
            }
        }

        if self.process_properties {
            chain.push_fallback(Box::new(ProcessPropertiesAdapter::new()));
        }

        #[cfg(feature = "env")]
        {
            if self.environment {
                chain.push_fallback(Box::new(crate::adapters::EnvVarAdapter::new()));
            }
        }
        #[cfg(not(feature = "env"))]
        {
            if self.environment {
                tracing::debug!("Environment fallback unavailable without the `env` feature");
            }
        }

        tracing::debug!(
            "Building properties from {} primary and {} fallback sources",
            chain.primary().len(),
            chain.fallback().len()
        );

        EnvAwareProperties::from_chain(&chain, PlaceholderResolver::with_max_depth(self.max_depth))
    }
}

impl Default for EnvAwarePropertiesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn dotfile_paths(cwd: bool, home: bool, root: bool) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if cwd {
        paths.push(PathBuf::from(DOTFILE_NAME));
    }
    if home {
        match BaseDirs::new() {
            Some(base) => paths.push(base.home_dir().join(DOTFILE_NAME)),
            None => tracing::debug!("No home directory, skipping home dotfile"),
        }
    }
    if root {
        paths.push(Path::new(MAIN_SEPARATOR_STR).join(DOTFILE_NAME));
    }
    paths
}
