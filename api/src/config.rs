use std::sync::{atomic::AtomicBool, Arc};

#[derive(Default, Clone)]
pub struct Config {
    pub exit: Arc<AtomicBool>,
    /// Configuration file location
    pub fpath: String,
    pub verbose_mode: bool,
    pub quiet: bool,
    /// Print registered layouts and exit
    pub list_layouts: bool,
    /// Frame input file, one hex encoded frame per line
    pub input: String,
    /// Protocol layout applied to incoming frames
    pub layout: String,
    /// Builtin layout sets to register on startup
    pub builtin: Vec<String>,
    /// Whether truncation diagnostics are forwarded at all
    pub diagnostics: bool,
    pub event_channel_size: u32,
    pub diag_channel_size: u32,
    pub doc: Yaml,
}

impl Config {
    pub fn get_integer(&self, key: &str, default: i64, min: i64, max: i64) -> i64 {
        get_integer(self.doc.as_ref(), key, default, min, max)
    }

    pub fn get_str(&self, key: &str, default: &str) -> String {
        get_str(self.doc.as_ref(), key, default)
    }

    pub fn get_str_arr(&self, key: &str) -> Vec<String> {
        get_str_arr(self.doc.as_ref(), key)
    }

    pub fn get_boolean(&self, key: &str, default: bool) -> bool {
        get_boolean(self.doc.as_ref(), key, default)
    }

    pub fn get_object(&self, key: &str) -> &yaml_rust::Yaml {
        get_object(self.doc.as_ref(), key)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
/// Simple wrapper struct to implement Default trait for yaml_rust::Yaml
pub struct Yaml(pub yaml_rust::Yaml);

impl Default for Yaml {
    fn default() -> Self {
        Self(yaml_rust::Yaml::Null)
    }
}

impl AsRef<yaml_rust::Yaml> for Yaml {
    fn as_ref(&self) -> &yaml_rust::Yaml {
        &self.0
    }
}

impl AsMut<yaml_rust::Yaml> for Yaml {
    fn as_mut(&mut self) -> &mut yaml_rust::Yaml {
        &mut self.0
    }
}

fn get_str(doc: &yaml_rust::Yaml, key: &str, default: &str) -> String {
    match &doc[key] {
        yaml_rust::Yaml::String(s) => s.clone(),
        yaml_rust::Yaml::BadValue => {
            println!(
                "Option {} not found or bad string value, set {} to {}",
                key, key, default
            );
            default.to_string()
        }
        _ => {
            println!(
                "Wrong value type for {}, expecting string, set {} to {}",
                key, key, default
            );
            default.to_string()
        }
    }
}

fn get_boolean(doc: &yaml_rust::Yaml, key: &str, default: bool) -> bool {
    match doc[key] {
        yaml_rust::Yaml::Boolean(b) => b,
        yaml_rust::Yaml::BadValue => {
            println!(
                "Option {} not found or bad boolean value, set {} to {}",
                key, key, default
            );
            default
        }
        _ => {
            println!(
                "Wrong value type for {}, expecting boolean, set {} to {}",
                key, key, default
            );
            default
        }
    }
}

fn get_integer(doc: &yaml_rust::Yaml, key: &str, default: i64, min: i64, max: i64) -> i64 {
    match doc[key] {
        yaml_rust::Yaml::Integer(i) => {
            if i < min || i > max {
                println!(
                    "Option {} is less/greater than min/max value {}/{}, set {} to {}",
                    key, min, max, key, default
                );
                default
            } else {
                i
            }
        }
        yaml_rust::Yaml::BadValue => {
            println!(
                "Option {} not found or bad integer value, set {} to {}",
                key, key, default
            );
            default
        }
        _ => {
            println!(
                "Wrong value type for {}, expecting integer, set {} to {}",
                key, key, default
            );
            default
        }
    }
}

fn get_str_arr(doc: &yaml_rust::Yaml, key: &str) -> Vec<String> {
    let mut result = vec![];
    match &doc[key] {
        yaml_rust::Yaml::Array(a) => {
            for element in a {
                match element {
                    yaml_rust::Yaml::String(s) => result.push(String::from(s)),
                    yaml_rust::Yaml::BadValue => println!("Bad string value for {}'s element", key),
                    _ => println!("Wrong value type for {}'s element, expecting string", key),
                }
            }
        }
        yaml_rust::Yaml::BadValue => println!(
            "Option {} not found or bad array value, set {} to empty array",
            key, key
        ),
        _ => println!(
            "Wrong value type for {}, expecting array, set {} to empty array",
            key, key
        ),
    }
    result
}

fn get_object<'a>(doc: &'a yaml_rust::Yaml, key: &str) -> &'a yaml_rust::Yaml {
    match &doc[key] {
        yaml_rust::Yaml::BadValue => {
            eprintln!("{} not found, set {} to Null", key, key);
            &yaml_rust::Yaml::Null
        }
        obj => obj,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    fn config_from_str(s: &str) -> Config {
        let mut config = Config::default();
        let docs = YamlLoader::load_from_str(s).unwrap();
        config.doc = Yaml(docs[0].clone());
        config
    }

    #[test]
    fn get_integer_clamps_out_of_range_values() {
        let cfg = config_from_str("channel.event.size: 4\nchannel.diag.size: 2000000");
        // below min and above max both fall back to the default
        assert_eq!(cfg.get_integer("channel.event.size", 1024, 16, 1000000), 1024);
        assert_eq!(cfg.get_integer("channel.diag.size", 256, 16, 1000000), 256);
        // in range values pass through untouched
        assert_eq!(cfg.get_integer("channel.event.size", 1024, 1, 16), 4);
    }

    #[test]
    fn get_integer_defaults_when_missing_or_mistyped() {
        let cfg = config_from_str("layout: llc");
        assert_eq!(cfg.get_integer("channel.event.size", 1024, 16, 1000000), 1024);
        assert_eq!(cfg.get_integer("layout", 7, 0, 100), 7);
    }

    #[test]
    fn get_str_and_get_boolean_defaults() {
        let cfg = config_from_str("layout: snap\ndiagnostics.enabled: false");
        assert_eq!(cfg.get_str("layout", "llc"), "snap");
        assert_eq!(cfg.get_str("input", "frames.txt"), "frames.txt");
        assert!(!cfg.get_boolean("diagnostics.enabled", true));
        assert!(cfg.get_boolean("missing", true));
        // mistyped values fall back too
        assert!(cfg.get_boolean("layout", true));
    }

    #[test]
    fn get_str_arr_collects_strings_only() {
        let cfg = config_from_str("layouts.builtin:\n  - llc\n  - arp\n  - 3");
        assert_eq!(
            cfg.get_str_arr("layouts.builtin"),
            vec!["llc".to_string(), "arp".to_string()]
        );
        assert!(cfg.get_str_arr("missing").is_empty());
    }

    #[test]
    fn get_object_returns_null_for_missing_keys() {
        let cfg = config_from_str("layout: llc");
        assert_eq!(cfg.get_object("layouts"), &yaml_rust::Yaml::Null);
        assert!(matches!(cfg.get_object("layout"), yaml_rust::Yaml::String(_)));
    }
}
