//! Protocols are data here, not types. Adding one means registering another
//! layout under its name, either from code or from the configuration file,
//! and selecting a parsing strategy is nothing more than a map lookup.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::config::Config;
use crate::layout::{FieldSpec, Layout};

/// Layout declaration as it appears in the configuration file
#[derive(Clone, Debug, Deserialize)]
struct LayoutDef {
    name: String,
    /// Defaults to `{name}_message`
    event: Option<String>,
    /// Defaults to `truncated_{name}_header`
    truncated_tag: Option<String>,
    fields: Vec<FieldSpec>,
}

/// Layouts keyed by protocol name
#[derive(Clone, Debug, Default)]
pub struct LayoutRegistry {
    layouts: HashMap<String, Layout>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a layout under its protocol name. Names are unique, a
    /// second registration under the same name is refused rather than
    /// silently replacing the first
    pub fn register(&mut self, layout: Layout) -> Result<()> {
        if self.layouts.contains_key(layout.name()) {
            return Err(anyhow!("layout '{}' is already registered", layout.name()));
        }

        self.layouts.insert(layout.name().to_string(), layout);
        Ok(())
    }

    /// Get the layout registered under a protocol name
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Layout> {
        self.layouts.get(name)
    }

    /// Get all registered protocol names, in no particular order
    pub fn names(&self) -> Vec<&str> {
        self.layouts.keys().map(|name| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Load custom layouts from the `layouts` array of the configuration
    /// file, returning how many were registered
    pub fn load(&mut self, cfg: &Config) -> Result<usize> {
        let defs = cfg.get_object("layouts");
        let defs = match defs {
            yaml_rust::Yaml::Array(defs) => defs,
            yaml_rust::Yaml::Null => {
                println!("no custom layouts to load");
                return Ok(0);
            }
            _ => {
                eprintln!("Couldn't load layouts, invalid value type or bad array value");
                return Err(anyhow!("Failed to load layouts"));
            }
        };

        let mut loaded = 0;
        for def in defs {
            let mut out_str = String::new();
            let mut emitter = yaml_rust::YamlEmitter::new(&mut out_str);
            emitter.dump(def)?;
            let LayoutDef {
                name,
                event,
                truncated_tag,
                fields,
            } = serde_yaml::from_str(&out_str)?;

            let event = event.unwrap_or_else(|| Layout::default_event(&name));
            let truncated_tag =
                truncated_tag.unwrap_or_else(|| Layout::default_truncated_tag(&name));
            self.register(Layout::with_events(&name, event, truncated_tag, fields)?)?;
            loaded += 1;
        }

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Yaml;
    use yaml_rust::YamlLoader;

    fn config_from_str(s: &str) -> Config {
        let mut config = Config::default();
        let docs = YamlLoader::load_from_str(s).unwrap();
        config.doc = Yaml(docs[0].clone());
        config
    }

    #[test]
    fn register_and_get() {
        let mut registry = LayoutRegistry::new();
        assert!(registry.is_empty());

        let layout = Layout::new("llc", vec![FieldSpec::byte("dsap", 14)]).unwrap();
        registry.register(layout).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("llc").unwrap().event(), "llc_message");
        assert!(registry.get("mpls").is_none());
    }

    #[test]
    fn duplicate_names_are_refused() {
        let mut registry = LayoutRegistry::new();
        registry
            .register(Layout::new("llc", vec![FieldSpec::byte("dsap", 14)]).unwrap())
            .unwrap();

        let other = Layout::new("llc", vec![FieldSpec::byte("ssap", 15)]).unwrap();
        assert!(registry.register(other).is_err());
        // the original registration is untouched
        assert_eq!(registry.get("llc").unwrap().fields()[0].name, "dsap");
    }

    #[test]
    fn load_layouts_from_config() {
        let cfg = config_from_str(
            r#"
layouts:
  - name: vlan
    fields:
      - { name: tci, offset: 14, width: 2 }
      - { name: etype, offset: 16, width: 2 }
  - name: bar
    event: bar_message
    truncated_tag: bar_ran_short
    fields:
      - { name: x, offset: 0, width: 1 }
  - name: qinq
    event: qinq_seen
    fields:
      - { name: outer, offset: 12, width: 2 }
"#,
        );

        let mut registry = LayoutRegistry::new();
        assert_eq!(registry.load(&cfg).unwrap(), 3);

        let vlan = registry.get("vlan").unwrap();
        assert_eq!(vlan.event(), "vlan_message");
        assert_eq!(vlan.truncated_tag(), "truncated_vlan_header");
        assert_eq!(vlan.required_bytes(), 18);

        let bar = registry.get("bar").unwrap();
        assert_eq!(bar.event(), "bar_message");
        assert_eq!(bar.truncated_tag(), "bar_ran_short");

        // explicit event combined with a name derived tag
        let qinq = registry.get("qinq").unwrap();
        assert_eq!(qinq.event(), "qinq_seen");
        assert_eq!(qinq.truncated_tag(), "truncated_qinq_header");
    }

    #[test]
    fn missing_layouts_key_loads_nothing() {
        let cfg = config_from_str("verbose: false");
        let mut registry = LayoutRegistry::new();
        assert_eq!(registry.load(&cfg).unwrap(), 0);
    }

    #[test]
    fn bad_layout_values_fail_the_load() {
        // width 0 passes deserialization and must be caught by validation
        let cfg = config_from_str(
            r#"
layouts:
  - name: broken
    fields:
      - { name: hole, offset: 3, width: 0 }
"#,
        );

        let mut registry = LayoutRegistry::new();
        assert!(registry.load(&cfg).is_err());
        assert!(registry.get("broken").is_none());
    }

    #[test]
    fn scalar_layouts_value_fails_the_load() {
        let cfg = config_from_str("layouts: 3");
        let mut registry = LayoutRegistry::new();
        assert!(registry.load(&cfg).is_err());
    }
}
