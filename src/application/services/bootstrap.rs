//! Bootstrap pipeline - from module discovery to a logged-in, running bot
//!
//! Stages run strictly one after another:
//! 1. discover modules from the catalog
//! 2. gate on declared defaults and sort by priority
//! 3. load configuration, keep operator-enabled modules, build collaborators
//! 4. authenticate the forum session
//! 5. refuse to go on without an identity, start modules, start notifications

use std::sync::Arc;

use crate::application::errors::{BotError, PluginError};
use crate::domain::entities::User;
use crate::domain::traits::{ForumConnector, ModuleContext, SockModule};
use crate::infrastructure::config::{Config, ConfigLoader};
use crate::infrastructure::plugins::{LoadedModule, ModuleCatalog, ModuleRegistry};

/// A bot that made it through every stage
pub struct StartedBot {
    /// Started modules, in priority order
    pub modules: Vec<Arc<dyn SockModule>>,
    pub config: Arc<Config>,
    pub user: User,
}

impl StartedBot {
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }
}

pub struct Bootstrap {
    catalog: ModuleCatalog,
    loader: Arc<dyn ConfigLoader>,
    config_source: String,
    connector: Arc<dyn ForumConnector>,
}

impl Bootstrap {
    pub fn new(
        catalog: ModuleCatalog,
        loader: Arc<dyn ConfigLoader>,
        config_source: impl Into<String>,
        connector: Arc<dyn ForumConnector>,
    ) -> Self {
        Self {
            catalog,
            loader,
            config_source: config_source.into(),
            connector,
        }
    }

    /// Run every stage. `BotError::LoginFailed` means no module was started.
    pub async fn run(self) -> Result<StartedBot, BotError> {
        // 1. discover
        let discovered = self.catalog.discover();

        // 2. gate and sort
        let registry = ModuleRegistry::load(discovered);

        // 3. configuration and collaborators
        let mut config = self.loader.load(registry.modules(), &self.config_source)?;
        let enabled = registry.filter_enabled(&config);
        let session = self.connector.session(&config)?;
        let notifier = self.connector.notifier(&config)?;

        // 4. authenticate
        config.user = session.authenticate().await?;

        // 5. start
        let user = config.user.clone().ok_or(BotError::LoginFailed)?;
        tracing::info!("Logged in as: {}", user.username);

        let ctx = ModuleContext::new(session, Arc::new(config));
        start_modules(&enabled, &ctx).await?;

        let modules: Vec<Arc<dyn SockModule>> = enabled.into_iter().map(|m| m.module).collect();
        notifier.begin(modules.clone(), ctx.clone()).await?;

        Ok(StartedBot {
            modules,
            config: ctx.config,
            user,
        })
    }
}

/// Call `begin` on each module, one at a time, in order
async fn start_modules(modules: &[LoadedModule], ctx: &ModuleContext) -> Result<(), BotError> {
    for loaded in modules {
        tracing::info!("Starting module: {}", loaded.name());
        loaded.module.begin(ctx).await.map_err(|e| PluginError::Begin {
            name: loaded.name().to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}
