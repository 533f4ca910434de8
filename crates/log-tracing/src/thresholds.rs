use std::collections::HashMap;

use proven_log::Level;

/// Root threshold plus per-module overrides.
///
/// Module names are hierarchical: `net.dht` (or `net::dht`) falls back to
/// `net`, then to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Thresholds {
    root: Level,
    modules: HashMap<String, Level>,
}

impl Thresholds {
    pub(crate) fn new(root: Level) -> Self {
        Self {
            root,
            modules: HashMap::new(),
        }
    }

    pub(crate) fn set_module(&mut self, module: impl Into<String>, level: Level) {
        self.modules.insert(module.into(), level);
    }

    pub(crate) fn effective(&self, module: &str) -> Level {
        if self.modules.is_empty() {
            return self.root;
        }

        let mut name = module;
        loop {
            if let Some(level) = self.modules.get(name) {
                return *level;
            }
            match name.rfind(['.', ':']) {
                Some(pos) => name = name[..pos].trim_end_matches(':'),
                None => return self.root,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_only() {
        let thresholds = Thresholds::new(Level::Warning);
        assert_eq!(thresholds.effective("anything"), Level::Warning);
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let mut thresholds = Thresholds::new(Level::Error);
        thresholds.set_module("net", Level::Info);
        thresholds.set_module("net.dht", Level::Trace);

        assert_eq!(thresholds.effective("net"), Level::Info);
        assert_eq!(thresholds.effective("net.peer"), Level::Info);
        assert_eq!(thresholds.effective("net.dht.routing"), Level::Trace);
        assert_eq!(thresholds.effective("network"), Level::Error);
        assert_eq!(thresholds.effective(""), Level::Error);
    }

    #[test]
    fn test_rust_paths() {
        let mut thresholds = Thresholds::new(Level::Error);
        thresholds.set_module("node::net", Level::Debug);

        assert_eq!(thresholds.effective("node::net::dht"), Level::Debug);
        assert_eq!(thresholds.effective("node::disk"), Level::Error);
    }
}
