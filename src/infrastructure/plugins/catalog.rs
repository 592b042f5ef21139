//! Module catalog - the explicit list of modules this build ships with

use std::sync::Arc;

use crate::application::errors::PluginError;
use crate::domain::traits::SockModule;

/// Modules in registration order
#[derive(Default, Clone)]
pub struct ModuleCatalog {
    entries: Vec<Arc<dyn SockModule>>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module; names must be unique
    pub fn register<M: SockModule + 'static>(&mut self, module: M) -> Result<(), PluginError> {
        self.register_arc(Arc::new(module))
    }

    pub fn register_arc(&mut self, module: Arc<dyn SockModule>) -> Result<(), PluginError> {
        let name = module.name().to_string();
        if self.entries.iter().any(|m| m.name() == name) {
            return Err(PluginError::Duplicate(name));
        }
        tracing::debug!("Registering module: {}", name);
        self.entries.push(module);
        Ok(())
    }

    /// Enumerate candidate modules, in registration order
    pub fn discover(&self) -> Vec<Arc<dyn SockModule>> {
        tracing::info!("Discovered {} modules", self.entries.len());
        self.entries.clone()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|m| m.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::NotifyPrint;

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = ModuleCatalog::new();
        catalog.register(NotifyPrint::new()).unwrap();
        let err = catalog.register(NotifyPrint::new()).unwrap_err();
        assert!(matches!(err, PluginError::Duplicate(name) if name == "NotifyPrint"));
        assert_eq!(catalog.len(), 1);
    }
}
