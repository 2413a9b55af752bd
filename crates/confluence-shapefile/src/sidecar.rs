use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{Result, ShapefileError};

/// Reference-database version string recorded in a granule's `.xml` sidecar.
pub fn read_version_id(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut in_version_tag = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"VersionID" => in_version_tag = true,
            Ok(Event::Text(t)) if in_version_tag => {
                return Ok(t.unescape().map_err(|e| ShapefileError::Sidecar(e.to_string()))?.into_owned());
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"VersionID" => in_version_tag = false,
            Ok(Event::Eof) => {
                return Err(ShapefileError::Sidecar("sidecar XML has no VersionID element".to_string()))
            }
            Err(e) => return Err(ShapefileError::Sidecar(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
}

/// The shapefile stem's 6th underscore-delimited field, 0-indexed — the
/// pass number, per the reference implementation's filename convention
/// (the same positional scheme `CycleIndexer` uses for cycle/pass).
pub fn pass_number_from_filename(stem: &str) -> Option<&str> {
    stem.split('_').nth(6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_version_id_from_sidecar_xml() {
        let xml = b"<Granule><VersionID>C</VersionID></Granule>";
        assert_eq!(read_version_id(xml).unwrap(), "C");
    }

    #[test]
    fn missing_version_id_is_an_error() {
        let xml = b"<Granule></Granule>";
        assert!(read_version_id(xml).is_err());
    }

    #[test]
    fn pass_number_reads_the_seventh_underscore_field() {
        let stem = "SWOT_L2_HR_RiverSP_Reach_007_013_NA_20240101T000000_20240101T000100_PIC0_01";
        assert_eq!(pass_number_from_filename(stem), Some("013"));
    }
}
