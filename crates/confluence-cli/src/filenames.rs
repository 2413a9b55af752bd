use confluence_core::Continent;

/// SWORD version this run's reference database and shapefile sidecars are
/// expected to carry, mirroring `conf.py`'s hard-coded `sword_suffix`/
/// `sos_suffix` (there is no evidence any deployment varies this).
pub const SWORD_VERSION: &str = "v16";

pub fn sword_filename(continent: Continent) -> String {
    format!("{}_sword_{SWORD_VERSION}.nc", continent.lowercase())
}

pub fn sos_filename(continent: Continent) -> String {
    format!("{}_sword_{SWORD_VERSION}_SOS_priors.nc", continent.lowercase())
}
