use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// One continent's worth of inversion-set-builder inputs to outputs.
#[derive(Parser, Debug)]
#[command(name = "confluence")]
#[command(about = "Builds per-continent reach/node/inversion-set manifests from SWOT granules", long_about = None)]
#[command(version)]
pub struct Options {
    /// Run context: river or lake.
    #[arg(short = 'c', long, value_enum, default_value = "river")]
    pub context: Context,

    /// Index into the continent manifest file. `-235` reads
    /// `AWS_BATCH_JOB_ARRAY_INDEX` instead, for batch-array jobs.
    #[arg(short = 'i', long, default_value_t = -235)]
    pub index: i64,

    /// Name of the continent manifest file, resolved under `--directory`.
    #[arg(short = 'j', long, default_value = "continent.json")]
    pub jsonfile: String,

    /// Credential endpoint selector.
    #[arg(short = 'p', long, value_enum)]
    pub provider: Provider,

    /// Collection short name at the catalog.
    #[arg(short = 's', long)]
    pub shortname: String,

    /// `start,end` ISO-8601-Z temporal range.
    #[arg(short = 't', long)]
    pub temporalrange: String,

    /// Output directory for manifest JSON files.
    #[arg(short = 'd', long)]
    pub directory: PathBuf,

    /// Local granule directory, used when `--local` is set.
    #[arg(short = 'f', long)]
    pub shapefiledir: Option<PathBuf>,

    /// Read granules from `--shapefiledir` instead of the object store.
    #[arg(short = 'l', long)]
    pub local: bool,

    /// Use a simulated credential path instead of the Earthdata exchange.
    #[arg(short = 'o', long)]
    pub simulated: bool,

    /// JSON list of reach identifiers to restrict the run to.
    #[arg(short = 'u', long)]
    pub subsetfile: Option<PathBuf>,

    /// JSON list of pass numbers to restrict granule selection to.
    #[arg(short = 'a', long)]
    pub passlist: Option<PathBuf>,

    /// Path to a SWORD patch overlay file.
    #[arg(short = 'w', long)]
    pub swordpatch: Option<PathBuf>,

    /// Emit an HLS-tile manifest. Out of core scope; accepted and logged.
    #[arg(short = 'b', long)]
    pub hls: bool,

    /// Parameter-store KMS key identifier.
    #[arg(short = 'k', long)]
    pub ssmkey: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Context {
    River,
    Lake,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Provider {
    #[value(name = "POCLOUD")]
    Pocloud,
    Lpdaac,
    Ornldaac,
    Gesdisc,
}

impl Provider {
    pub fn credential_endpoint(&self) -> &'static str {
        match self {
            Self::Pocloud => "https://archive.podaac.earthdata.nasa.gov/s3credentials",
            Self::Lpdaac => "https://data.lpdaac.earthdatacloud.nasa.gov/s3credentials",
            Self::Ornldaac => "https://data.ornldaac.earthdata.nasa.gov/s3credentials",
            Self::Gesdisc => "https://data.gesdisc.earthdata.nasa.gov/s3credentials",
        }
    }

    pub fn catalog_provider_name(&self) -> &'static str {
        match self {
            Self::Pocloud => "POCLOUD",
            Self::Lpdaac => "LPDAAC_ECS",
            Self::Ornldaac => "ORNL_CLOUD",
            Self::Gesdisc => "GES_DISC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Options::command().debug_assert();
    }

    #[test]
    fn pocloud_endpoint_matches_the_original_configuration() {
        assert_eq!(Provider::Pocloud.credential_endpoint(), "https://archive.podaac.earthdata.nasa.gov/s3credentials");
    }
}
