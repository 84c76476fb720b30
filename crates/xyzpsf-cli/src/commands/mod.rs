pub mod convert;
pub mod inspect;

use crate::error::{CliError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;
use xyzpsf::core::masses::MassTable;
use xyzpsf::workflows::convert::ConvertError;

/// Loads mass overrides when a table is configured; the standard table backs every lookup.
fn load_masses(path: Option<&Path>) -> Result<MassTable> {
    match path {
        Some(path) => {
            let table = MassTable::load(path)?;
            info!("Loaded {} mass override(s) from {:?}", table.len(), path);
            Ok(table)
        }
        None => Ok(MassTable::new()),
    }
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    info!("Loading input geometry from {:?}", path);
    let file = File::open(path).map_err(|e| {
        CliError::Argument(format!("Cannot open input file '{}': {}", path.display(), e))
    })?;
    Ok(BufReader::new(file))
}

/// Attaches the input path to geometry parse failures.
fn with_input_path(path: &Path) -> impl FnOnce(ConvertError) -> CliError + '_ {
    move |e| match e {
        ConvertError::Input(source) => CliError::FileParsing {
            path: path.to_path_buf(),
            source: source.into(),
        },
        other => CliError::Core(other),
    }
}
