//! Built-in modules

pub mod crypt;
pub mod notify_print;

pub use crypt::Crypt;
pub use notify_print::NotifyPrint;

use std::sync::Arc;

use crate::application::errors::PluginError;
use crate::domain::traits::RandomSource;
use crate::infrastructure::plugins::ModuleCatalog;

/// Catalog of every module compiled into this build
pub fn builtin_catalog(rng: Arc<dyn RandomSource>) -> Result<ModuleCatalog, PluginError> {
    let mut catalog = ModuleCatalog::new();
    catalog.register(NotifyPrint::new())?;
    catalog.register(Crypt::new(rng))?;
    Ok(catalog)
}
