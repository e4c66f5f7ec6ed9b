//! Service provider discovery.
//!
//! Providers are declared one class name per line in
//! `META-INF/services/<service>`. Text after `#` is a comment; blank lines
//! are ignored; repeated names are reported once.

use crate::codec;
use crate::loader::PathClassLoader;
use crate::modules::ModuleLayer;
use jct_core::traits::ResourceLoader;
use jct_core::{FsPath, Kind, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// Directory holding provider configuration files.
pub const SERVICES_DIR: &str = "META-INF/services";

/// One declared provider of a service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceProvider {
    class_name: String,
    declared_in: FsPath,
    module: Option<String>,
}

impl ServiceProvider {
    /// Returns the binary name of the provider class.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns the configuration file that declared this provider.
    #[must_use]
    pub const fn declared_in(&self) -> &FsPath {
        &self.declared_in
    }

    /// Returns the module that declared this provider, when loaded from a
    /// module layer.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }
}

#[derive(Debug, Clone)]
enum Source {
    Loader(Arc<PathClassLoader>),
    Layer(Arc<ModuleLayer>),
}

/// Lazily discovers the providers of one service.
///
/// # Examples
///
/// ```
/// use jct_memfs::TemporaryFileSystem;
/// use jct_paths::{PathClassLoader, ServiceLoader};
/// use std::sync::Arc;
///
/// let classes = TemporaryFileSystem::named("classes").unwrap();
/// classes
///     .create_file_lines(
///         "META-INF/services/org.example.Greeter",
///         ["# providers", "org.example.EnglishGreeter", "", "org.example.FrenchGreeter"],
///     )
///     .unwrap();
///
/// let loader = Arc::new(PathClassLoader::new(vec![classes.path().clone()]));
/// let services = ServiceLoader::load("org.example.Greeter", loader).unwrap();
/// let names: Vec<_> = services
///     .providers()
///     .unwrap()
///     .iter()
///     .map(|p| p.class_name().to_string())
///     .collect();
///
/// assert_eq!(names, vec!["org.example.EnglishGreeter", "org.example.FrenchGreeter"]);
/// ```
#[derive(Debug, Clone)]
pub struct ServiceLoader {
    service: String,
    source: Source,
}

impl ServiceLoader {
    /// Creates a loader that discovers providers through `loader`.
    ///
    /// # Errors
    ///
    /// Returns [`jct_core::Error::InvalidArgument`] if `service` is not a
    /// valid binary name.
    pub fn load(service: &str, loader: Arc<PathClassLoader>) -> Result<Self> {
        Self::new(service, Source::Loader(loader))
    }

    /// Creates a loader that discovers providers in the modules of `layer`.
    ///
    /// # Errors
    ///
    /// Returns [`jct_core::Error::InvalidArgument`] if `service` is not a
    /// valid binary name.
    pub fn load_in_layer(layer: Arc<ModuleLayer>, service: &str) -> Result<Self> {
        Self::new(service, Source::Layer(layer))
    }

    fn new(service: &str, source: Source) -> Result<Self> {
        codec::class_to_relative(service, Kind::Other)?;
        Ok(Self {
            service: service.to_string(),
            source,
        })
    }

    /// Returns the service's binary name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the class loader providers are discovered through.
    #[must_use]
    pub fn class_loader(&self) -> &Arc<PathClassLoader> {
        match &self.source {
            Source::Loader(loader) => loader,
            Source::Layer(layer) => layer.loader(),
        }
    }

    /// Returns the module layer, if this loader was created from one.
    #[must_use]
    pub const fn layer(&self) -> Option<&Arc<ModuleLayer>> {
        match &self.source {
            Source::Layer(layer) => Some(layer),
            Source::Loader(_) => None,
        }
    }

    /// Reads every provider configuration file visible to the class loader,
    /// in search order.
    ///
    /// # Errors
    ///
    /// Returns [`jct_core::Error::Io`] if a configuration file exists but
    /// cannot be read.
    pub fn providers(&self) -> Result<Vec<ServiceProvider>> {
        let resource = format!("{SERVICES_DIR}/{}", self.service);
        let mut seen = HashSet::new();
        let mut providers = Vec::new();

        for file in self.class_loader().find_resources(&resource) {
            let text = String::from_utf8_lossy(&file.read()?).into_owned();
            let module = self
                .layer()
                .and_then(|layer| layer.module_of(&file))
                .map(|module| module.name().to_string());

            for class_name in parse_provider_names(&text) {
                if seen.insert(class_name.to_string()) {
                    providers.push(ServiceProvider {
                        class_name: class_name.to_string(),
                        declared_in: file.clone(),
                        module: module.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            service = %self.service,
            count = providers.len(),
            "discovered service providers"
        );
        Ok(providers)
    }
}

/// Parses the provider names out of a configuration file.
fn parse_provider_names(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|line| line.split_once('#').map_or(line, |(before, _)| before).trim())
        .filter(|line| !line.is_empty())
}
