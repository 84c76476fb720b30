use super::{load_masses, open_input, with_input_path};
use crate::cli::ConvertArgs;
use crate::config::PartialConvertConfig;
use crate::error::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info, warn};
use xyzpsf::core::io::psf::PsfFile;
use xyzpsf::workflows::convert;

pub fn run(args: ConvertArgs) -> Result<()> {
    let partial_config = PartialConvertConfig::load_optional(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_cli(&args)?;
    debug!("Resolved conversion settings: {:?}", settings);

    let masses = load_masses(settings.mass_table.as_deref())?;
    let mut reader = open_input(&args.file)?;
    let conversion = convert::prepare(&mut reader, &settings.convert, &masses)
        .map_err(with_input_path(&args.file))?;

    let topology = &conversion.topology;
    let atom_count = topology.atoms().len();
    info!("Read {} atom(s) from {:?}", atom_count, &args.file);
    if let Some(declared) = conversion.metadata.count_mismatch(atom_count) {
        warn!(
            "Header declares {} atom(s) but {} atom row(s) were read.",
            declared, atom_count
        );
    }

    let connectivity = topology.connectivity();
    info!(
        "Inferred {} bond(s), {} angle(s), {} dihedral(s) (threshold {}).",
        connectivity.bonds.len(),
        connectivity.angles.len(),
        connectivity.dihedrals.len(),
        settings.convert.bond_threshold
    );

    for section in PsfFile::lossy_sections(topology, &settings.convert.psf) {
        warn!(
            "{} rows use the legacy layout and do not list every entry exactly once; pass --row-wrap complete for a full listing.",
            section
        );
    }

    match &args.output {
        Some(path) => {
            info!("Writing topology to {:?}", path);
            let mut writer = BufWriter::new(File::create(path)?);
            conversion.write_to(&settings.convert, &mut writer)?;
            writer.flush()?;
        }
        None => {
            debug!("Writing topology to standard output.");
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            conversion.write_to(&settings.convert, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}
