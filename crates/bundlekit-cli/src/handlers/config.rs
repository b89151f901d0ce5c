//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Path => handle_config_path(output),
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
    }
}

/// Print the effective configuration
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = render_config(config, args.format)?;
    output.writeln(content.trim_end())
}

fn render_config(config: &Config, format: ConfigFormat) -> Result<String> {
    let content = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(content)
}

/// List the searched configuration files, marking those that exist
fn handle_config_path(output: &mut OutputWriter) -> Result<()> {
    for path in Config::default_config_paths() {
        let marker = if path.exists() { "✓" } else { "✗" };
        output.writeln(&format!("{} {}", marker, path.display()))?;
    }
    Ok(())
}

/// Write the default configuration as a file
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = args.path.unwrap_or_else(Config::project_config_path);

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use tempfile::TempDir;

    fn writer() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(std::io::sink()))
    }

    #[test]
    fn test_render_config_formats() {
        let config = Config::default();

        let toml = render_config(&config, ConfigFormat::Toml).unwrap();
        assert!(toml.contains("[validation]"));
        assert!(toml.contains("descriptor_file = \"entando.json\""));

        let json: serde_json::Value =
            serde_json::from_str(&render_config(&config, ConfigFormat::Json).unwrap()).unwrap();
        assert_eq!(json["output"]["format"], "human");

        let yaml = render_config(&config, ConfigFormat::Yaml).unwrap();
        assert!(yaml.contains("max_errors: 0"));
    }

    #[test]
    fn test_init_writes_and_respects_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".bundlekit.toml");

        handle_config_init(ConfigInitArgs { path: Some(path.clone()), force: false }, &mut writer()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());

        std::fs::write(&path, "[validation]\nmax_errors = 3\n").unwrap();
        handle_config_init(ConfigInitArgs { path: Some(path.clone()), force: false }, &mut writer()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap().validation.max_errors, 3);

        handle_config_init(ConfigInitArgs { path: Some(path.clone()), force: true }, &mut writer()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap().validation.max_errors, 0);
    }
}
