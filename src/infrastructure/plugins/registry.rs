//! Module registry - default-enablement gate and priority ordering

use std::sync::Arc;

use crate::domain::traits::{SockModule, DEFAULT_PRIORITY};
use crate::infrastructure::config::Config;

/// System module that is accepted without declaring a disabled default
pub const ALWAYS_ON_MODULE: &str = "NotifyPrint";

/// A module accepted by the registry, with its effective priority
#[derive(Clone)]
pub struct LoadedModule {
    pub module: Arc<dyn SockModule>,
    pub priority: i64,
}

impl LoadedModule {
    pub fn name(&self) -> &str {
        self.module.name()
    }
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("name", &self.name())
            .field("priority", &self.priority)
            .finish()
    }
}

/// Ordered list of modules that passed the default-enablement gate
#[derive(Debug, Default, Clone)]
pub struct ModuleRegistry {
    modules: Vec<LoadedModule>,
    ignored: Vec<String>,
}

impl ModuleRegistry {
    /// Gate and sort discovered modules.
    ///
    /// A module is accepted only if it declares `configuration` with
    /// `enabled: false`, or it is the always-on system module. Accepted
    /// modules are sorted by ascending priority; ties keep discovery order.
    pub fn load(discovered: Vec<Arc<dyn SockModule>>) -> Self {
        let mut modules = Vec::with_capacity(discovered.len());
        let mut ignored = Vec::new();
        for module in discovered {
            let defaults_off = module.configuration().is_some_and(|c| !c.enabled);
            if !defaults_off && module.name() != ALWAYS_ON_MODULE {
                tracing::warn!(
                    "Ignoring module: `{}` Does not default to disabled",
                    module.name()
                );
                ignored.push(module.name().to_string());
                continue;
            }
            tracing::info!("Loaded module: {} v{}", module.name(), module.version());
            let priority = module.priority().unwrap_or(DEFAULT_PRIORITY);
            modules.push(LoadedModule { module, priority });
        }
        // stable: equal priorities keep discovery order
        modules.sort_by_key(|m| m.priority);
        Self { modules, ignored }
    }

    pub fn modules(&self) -> &[LoadedModule] {
        &self.modules
    }

    /// Names turned away by the gate, in discovery order
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    pub fn names(&self) -> Vec<&str> {
        self.modules.iter().map(LoadedModule::name).collect()
    }

    /// Modules the operator enabled, still in priority order
    pub fn filter_enabled(&self, config: &Config) -> Vec<LoadedModule> {
        self.modules
            .iter()
            .filter(|m| {
                let enabled = config.module_enabled(m.name());
                if !enabled {
                    tracing::debug!("Module {} disabled by configuration", m.name());
                }
                enabled
            })
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::ModuleConfiguration;
    use crate::infrastructure::config::ModuleSettings;

    struct Stub {
        name: &'static str,
        priority: Option<i64>,
        configuration: Option<ModuleConfiguration>,
    }

    impl SockModule for Stub {
        fn name(&self) -> &str {
            self.name
        }

        fn version(&self) -> &str {
            "1.0"
        }

        fn priority(&self) -> Option<i64> {
            self.priority
        }

        fn configuration(&self) -> Option<ModuleConfiguration> {
            self.configuration
        }
    }

    fn off(name: &'static str, priority: Option<i64>) -> Arc<dyn SockModule> {
        Arc::new(Stub {
            name,
            priority,
            configuration: Some(ModuleConfiguration::disabled()),
        })
    }

    #[test]
    fn test_sort_is_stable() {
        let registry = ModuleRegistry::load(vec![
            off("A", Some(50)),
            off("B", Some(10)),
            off("C", Some(50)),
            off("D", Some(5)),
        ]);
        assert_eq!(registry.names(), vec!["D", "B", "A", "C"]);
    }

    #[test]
    fn test_missing_priority_defaults_to_50() {
        let registry = ModuleRegistry::load(vec![off("Late", Some(60)), off("Plain", None), off("Early", Some(49))]);
        assert_eq!(registry.names(), vec!["Early", "Plain", "Late"]);
        assert_eq!(registry.modules()[1].priority, DEFAULT_PRIORITY);
    }

    #[test]
    fn test_default_enablement_gate() {
        let no_config: Arc<dyn SockModule> = Arc::new(Stub {
            name: "Eager",
            priority: None,
            configuration: None,
        });
        let default_on: Arc<dyn SockModule> = Arc::new(Stub {
            name: "Pushy",
            priority: None,
            configuration: Some(ModuleConfiguration { enabled: true }),
        });
        let system: Arc<dyn SockModule> = Arc::new(Stub {
            name: ALWAYS_ON_MODULE,
            priority: None,
            configuration: None,
        });

        let registry = ModuleRegistry::load(vec![no_config, default_on, off("Polite", None), system]);
        assert_eq!(registry.names(), vec!["Polite", ALWAYS_ON_MODULE]);
        assert_eq!(registry.ignored(), ["Eager".to_string(), "Pushy".to_string()]);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_ignored_module_is_logged() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();
        let eager: Arc<dyn SockModule> = Arc::new(Stub {
            name: "Eager",
            priority: None,
            configuration: None,
        });

        tracing::subscriber::with_default(subscriber, || {
            ModuleRegistry::load(vec![eager, off("Polite", None)]);
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Ignoring module: `Eager` Does not default to disabled"));
        assert!(output.contains("Loaded module: Polite v1.0"));
    }

    #[test]
    fn test_filter_by_operator() {
        let registry = ModuleRegistry::load(vec![off("X", Some(30)), off("Y", Some(10))]);
        let mut config = Config::default();
        config.modules.insert("X".to_string(), ModuleSettings::enabled(true));
        config.modules.insert("Y".to_string(), ModuleSettings::enabled(false));

        let started: Vec<_> = registry.filter_enabled(&config).iter().map(|m| m.name().to_string()).collect();
        assert_eq!(started, vec!["X"]);
    }
}
