// Input configuration and remapping system

use super::action::{self, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys) to game actions
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Reverse mapping for quick lookups (action -> all sources)
    action_to_sources: HashMap<Action, Vec<InputSource>>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Configuration with the default key bindings
    pub fn with_defaults() -> Self {
        Self::from_bindings(action::default_bindings())
    }

    /// Bind an input source to an action, replacing whatever it was bound to
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.unbind_source(source);

        self.bindings.insert(source, action);
        self.action_to_sources
            .entry(action)
            .or_default()
            .push(source);
    }

    /// Unbind an input source
    pub fn unbind_source(&mut self, source: InputSource) {
        if let Some(action) = self.bindings.remove(&source) {
            if let Some(sources) = self.action_to_sources.get_mut(&action) {
                sources.retain(|s| *s != source);
                if sources.is_empty() {
                    self.action_to_sources.remove(&action);
                }
            }
        }
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Get all input sources bound to an action
    pub fn get_sources(&self, action: Action) -> Vec<InputSource> {
        self.action_to_sources
            .get(&action)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_bind_action() {
        let mut config = InputConfig::new();
        let source = InputSource::key(KeyCode::KeyJ);
        config.bind(source, Action::Attack);

        assert_eq!(config.get_action(source), Some(Action::Attack));
    }

    #[test]
    fn test_unbind_source() {
        let mut config = InputConfig::new();
        let source = InputSource::key(KeyCode::KeyA);
        config.bind(source, Action::MoveLeft);
        config.unbind_source(source);

        assert_eq!(config.get_action(source), None);
        assert!(config.get_sources(Action::MoveLeft).is_empty());
    }

    #[test]
    fn test_get_sources() {
        let config = InputConfig::with_defaults();

        let sources = config.get_sources(Action::MoveLeft);
        assert_eq!(sources.len(), 2);
        assert!(sources.contains(&InputSource::key(KeyCode::ArrowLeft)));
        assert!(sources.contains(&InputSource::key(KeyCode::KeyA)));
    }

    #[test]
    fn test_rebind_source() {
        let mut config = InputConfig::new();
        let source = InputSource::key(KeyCode::Space);

        config.bind(source, Action::Jump);
        config.bind(source, Action::Attack);

        assert_eq!(config.get_action(source), Some(Action::Attack));
        assert!(config.get_sources(Action::Jump).is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = InputConfig::with_defaults();
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::ArrowUp)),
            Some(Action::Jump)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Space)),
            Some(Action::Attack)
        );
        assert_eq!(config.get_action(InputSource::key(KeyCode::Escape)), None);
    }
}
