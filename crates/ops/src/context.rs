//! Operations context for dependency injection

use pyndex_config::Config;
use pyndex_errors::{Error, OpsError};
use pyndex_finder::PackageFinder;
use pyndex_net::NetClient;
use pyndex_store::PackageStore;

/// Operations context providing access to all system components
pub struct OpsCtx {
    /// Index storage
    pub store: PackageStore,
    /// Package finder over the configured index
    pub finder: PackageFinder,
    /// Network client
    pub net: NetClient,
    /// System configuration
    pub config: Config,
}

impl OpsCtx {
    /// Build a context straight from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the storage root cannot be resolved, the
    /// index URL is rejected, or the network client fails to initialize.
    pub fn from_config(config: Config) -> Result<Self, Error> {
        let root = config.storage_root()?;
        let finder = PackageFinder::new(&config.index.url, config.index.allow_insecure)?;
        let net = NetClient::new((&config.network).into())?;

        Ok(Self {
            store: PackageStore::new(&root),
            finder,
            net,
            config,
        })
    }
}

/// Builder for `OpsCtx`, used when components are constructed separately
/// (tests inject mock-backed finders and temp stores this way)
#[derive(Default)]
pub struct OpsCtxBuilder {
    store: Option<PackageStore>,
    finder: Option<PackageFinder>,
    net: Option<NetClient>,
    config: Option<Config>,
}

impl OpsCtxBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_store(mut self, store: PackageStore) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_finder(mut self, finder: PackageFinder) -> Self {
        self.finder = Some(finder);
        self
    }

    #[must_use]
    pub fn with_net(mut self, net: NetClient) -> Self {
        self.net = Some(net);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Assemble the context
    ///
    /// # Errors
    ///
    /// Returns `ContextCreationFailed` naming the first missing
    /// component.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let missing = |component: &str| OpsError::ContextCreationFailed {
            message: format!("missing component: {component}"),
        };

        Ok(OpsCtx {
            store: self.store.ok_or_else(|| missing("store"))?,
            finder: self.finder.ok_or_else(|| missing("finder"))?,
            net: self.net.ok_or_else(|| missing("net"))?,
            config: self.config.unwrap_or_default(),
        })
    }
}
