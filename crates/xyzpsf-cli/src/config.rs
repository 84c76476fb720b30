use crate::cli::{ConvertArgs, InspectArgs};
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use xyzpsf::core::connectivity::builder::DEFAULT_BOND_THRESHOLD;
use xyzpsf::core::io::psf::RowWrap;
use xyzpsf::workflows::convert::{self as core_config, ConvertConfig, ConvertConfigBuilder};

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialConnectivityConfig {
    #[serde(rename = "bond-threshold")]
    bond_threshold: Option<f64>,
    isolated: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    title: Option<String>,
    #[serde(rename = "row-wrap")]
    row_wrap: Option<RowWrap>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialMassesConfig {
    table: Option<PathBuf>,
}

/// Settings as read from a TOML file; every field may be absent.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConvertConfig {
    #[serde(rename = "fragment-id")]
    fragment_id: Option<i64>,
    connectivity: Option<PartialConnectivityConfig>,
    output: Option<PartialOutputConfig>,
    masses: Option<PartialMassesConfig>,
}

/// Final settings for the `convert` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSettings {
    pub convert: ConvertConfig,
    pub mass_table: Option<PathBuf>,
}

/// Final settings for the `inspect` command.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectSettings {
    pub bond_threshold: f64,
    pub mass_table: Option<PathBuf>,
}

impl PartialConvertConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` when given, otherwise starts from an empty configuration.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(self, args: &ConvertArgs) -> Result<ConvertSettings> {
        let connectivity = self.connectivity.unwrap_or_default();
        let output = self.output.unwrap_or_default();
        let masses = self.masses.unwrap_or_default();

        let fragment_id = args.id.or(self.fragment_id).ok_or_else(|| {
            CliError::Config(
                "A value for 'fragment-id' is required either in the config file or via --id."
                    .to_string(),
            )
        })?;

        let mut builder = ConvertConfigBuilder::new()
            .fragment_id(fragment_id)
            .bond_threshold(
                args.bond_threshold
                    .or(connectivity.bond_threshold)
                    .unwrap_or(DEFAULT_BOND_THRESHOLD),
            )
            .isolated(args.isolated || connectivity.isolated.unwrap_or(false));

        if let Some(title) = args.title.clone().or(output.title) {
            builder = builder.title(title);
        }
        if let Some(wrap) = args.row_wrap.or(output.row_wrap) {
            builder = builder.row_wrap(wrap);
        }

        let convert = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(ConvertSettings {
            convert,
            mass_table: args.mass_table.clone().or(masses.table),
        })
    }

    pub fn merge_with_inspect(self, args: &InspectArgs) -> Result<InspectSettings> {
        let connectivity = self.connectivity.unwrap_or_default();
        let masses = self.masses.unwrap_or_default();

        let bond_threshold = core_config::validate_bond_threshold(
            args.bond_threshold
                .or(connectivity.bond_threshold)
                .unwrap_or(DEFAULT_BOND_THRESHOLD),
        )
        .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(InspectSettings {
            bond_threshold,
            mass_table: args.mass_table.clone().or(masses.table),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn write_config_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn convert_args(extra: &[&str]) -> ConvertArgs {
        let mut argv = vec!["xyz2psf", "convert", "-f", "in.xyz"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Convert(args) => args,
            other => panic!("Expected 'convert' subcommand, got {:?}", other),
        }
    }

    fn inspect_args(extra: &[&str]) -> InspectArgs {
        let mut argv = vec!["xyz2psf", "inspect", "-f", "in.xyz"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Inspect(args) => args,
            other => panic!("Expected 'inspect' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn cli_only_uses_builtin_defaults() {
        let settings = PartialConvertConfig::default()
            .merge_with_cli(&convert_args(&["--id", "4"]))
            .unwrap();

        assert_eq!(settings.convert.psf.fragment_id, 4);
        assert_eq!(settings.convert.bond_threshold, DEFAULT_BOND_THRESHOLD);
        assert!(!settings.convert.psf.isolated);
        assert_eq!(settings.convert.psf.row_wrap, RowWrap::Legacy);
        assert!(settings.mass_table.is_none());
    }

    #[test]
    fn load_from_file_and_merge_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = write_config_file(
            &dir,
            "config.toml",
            r#"
        fragment-id = 7

        [connectivity]
        bond-threshold = 2.9
        isolated = true

        [output]
        title = "CdSe quantum dot"
        row-wrap = "complete"

        [masses]
        table = "masses.toml"
        "#,
        );

        let settings = PartialConvertConfig::from_file(&config_path)
            .unwrap()
            .merge_with_cli(&convert_args(&[]))
            .unwrap();

        assert_eq!(settings.convert.psf.fragment_id, 7);
        assert_eq!(settings.convert.bond_threshold, 2.9);
        assert!(settings.convert.psf.isolated);
        assert_eq!(settings.convert.psf.title, "CdSe quantum dot");
        assert_eq!(settings.convert.psf.row_wrap, RowWrap::Complete);
        assert_eq!(settings.mass_table, Some(PathBuf::from("masses.toml")));
    }

    #[test]
    fn cli_args_override_file_values() {
        let dir = tempdir().unwrap();
        let config_path = write_config_file(
            &dir,
            "override.toml",
            r#"
        fragment-id = 7 # Will be overridden
        [connectivity]
        bond-threshold = 2.9 # Will be overridden
        [output]
        row-wrap = "complete" # Will be overridden
        "#,
        );

        let settings = PartialConvertConfig::from_file(&config_path)
            .unwrap()
            .merge_with_cli(&convert_args(&[
                "--id",
                "1",
                "-t",
                "1.2",
                "--row-wrap",
                "legacy",
                "--mass-table",
                "local.toml",
            ]))
            .unwrap();

        assert_eq!(settings.convert.psf.fragment_id, 1);
        assert_eq!(settings.convert.bond_threshold, 1.2);
        assert_eq!(settings.convert.psf.row_wrap, RowWrap::Legacy);
        assert_eq!(settings.mass_table, Some(PathBuf::from("local.toml")));
    }

    #[test]
    fn missing_fragment_id_returns_error() {
        let result = PartialConvertConfig::default().merge_with_cli(&convert_args(&[]));
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("fragment-id")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_threshold_returns_error() {
        let result = PartialConvertConfig::default()
            .merge_with_cli(&convert_args(&["--id", "1", "-t", "-0.5"]));
        assert!(matches!(result, Err(CliError::Config(_))));

        let result = PartialConvertConfig::default().merge_with_inspect(&inspect_args(&["-t", "0"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let config_path = write_config_file(
            &dir,
            "unknown.toml",
            "[connectivity]\nbond-tresh = 1.6\n",
        );

        let result = PartialConvertConfig::from_file(&config_path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn invalid_row_wrap_in_file_is_rejected() {
        let dir = tempdir().unwrap();
        let config_path = write_config_file(&dir, "wrap.toml", "[output]\nrow-wrap = \"spiral\"\n");

        assert!(matches!(
            PartialConvertConfig::from_file(&config_path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let result = PartialConvertConfig::load_optional(Some(Path::new("/nonexistent/cfg.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
        assert!(PartialConvertConfig::load_optional(None).is_ok());
    }

    #[test]
    fn inspect_reads_threshold_from_file() {
        let dir = tempdir().unwrap();
        let config_path = write_config_file(
            &dir,
            "inspect.toml",
            "fragment-id = 2\n[connectivity]\nbond-threshold = 3.1\n",
        );

        let settings = PartialConvertConfig::from_file(&config_path)
            .unwrap()
            .merge_with_inspect(&inspect_args(&[]))
            .unwrap();
        assert_eq!(settings.bond_threshold, 3.1);
        assert!(settings.mass_table.is_none());
    }
}
