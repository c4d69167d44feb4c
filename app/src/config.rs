use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use yaml_rust::YamlLoader;

use basile_api as api;
use api::config::Config;

use super::commands::CliArg;

/// Parse command line arguments and set configuration
pub fn parse_args(root_cmd: clap::App) -> Result<Config> {
    let mut config: Config = Default::default();

    let matches = root_cmd.get_matches();

    if let Some(config_file) = matches.value_of(CliArg::Config.as_str()) {
        config.fpath = config_file.to_string();
        parse_config_file(config_file, &mut config)?;
    }

    set_config_from_doc(&mut config);
    set_config_by_cli_args(&mut config, &matches);

    Ok(config)
}

fn parse_config_file(config_file: &str, config: &mut Config) -> Result<()> {
    let cfg_path = Path::new(config_file);
    if !cfg_path.exists() {
        eprintln!(
            "\"{}\" does not exist! Use default configuration instead",
            config_file
        );
        return Ok(());
    }

    let mut s = String::new();
    File::open(cfg_path)?.read_to_string(&mut s)?;

    // an empty or comment-only file yields zero documents
    let docs = YamlLoader::load_from_str(&s)?;
    if docs.is_empty() {
        eprintln!(
            "\"{}\" holds no configuration document, use default configuration instead",
            config_file
        );
        return Ok(());
    }

    let doc = &docs[0];
    config.doc = api::config::Yaml(doc.clone());

    Ok(())
}

/// Apply configuration file settings, falling back to defaults where the
/// file is silent. Runs on an empty document too, so a missing config file
/// still yields a usable configuration
fn set_config_from_doc(config: &mut Config) {
    config.event_channel_size = config.get_integer("channel.event.size", 1024, 16, 1000000) as u32;
    config.diag_channel_size = config.get_integer("channel.diag.size", 256, 16, 1000000) as u32;
    config.diagnostics = config.get_boolean("diagnostics.enabled", true);
    config.layout = config.get_str("layout", "llc");
    config.input = config.get_str("input", "");

    config.builtin = config.get_str_arr("layouts.builtin");
    if config.builtin.is_empty() {
        config.builtin = vec!["llc".to_string(), "arp".to_string()];
    }
}

/// Use command arguments overrides config file settings
fn set_config_by_cli_args(config: &mut Config, matches: &clap::ArgMatches) {
    config.quiet = matches.is_present(CliArg::Quiet.as_str());
    config.verbose_mode = matches.is_present(CliArg::Verbose.as_str());
    config.list_layouts = matches.is_present(CliArg::ListLayouts.as_str());

    if let Some(input) = matches.value_of(CliArg::Input.as_str()) {
        config.input = String::from(input);
    }

    if let Some(layout) = matches.value_of(CliArg::Layout.as_str()) {
        config.layout = String::from(layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_only_config_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("basile-comment-only.yml");
        std::fs::write(&path, "# nothing configured yet\n").unwrap();

        let mut config = Config::default();
        parse_config_file(path.to_str().unwrap(), &mut config).unwrap();
        assert_eq!(config.doc.as_ref(), &yaml_rust::Yaml::Null);

        set_config_from_doc(&mut config);
        assert_eq!(config.event_channel_size, 1024);
        assert_eq!(config.diag_channel_size, 256);
        assert_eq!(config.layout, "llc");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let mut config = Config::default();
        parse_config_file("no-such-file.yml", &mut config).unwrap();

        set_config_from_doc(&mut config);
        assert!(config.diagnostics);
        assert_eq!(config.builtin, vec!["llc".to_string(), "arp".to_string()]);
    }

    #[test]
    fn example_config_file_parses() {
        let mut config = Config::default();
        parse_config_file("../basile.example.yml", &mut config).unwrap();

        set_config_from_doc(&mut config);
        assert_eq!(config.event_channel_size, 1024);
        assert_eq!(config.layout, "llc");
        assert_eq!(config.input, "demos/llc.frames");
        assert_eq!(config.builtin, vec!["llc".to_string(), "arp".to_string()]);
    }
}
