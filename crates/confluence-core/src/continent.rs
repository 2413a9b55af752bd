use crate::error::{CoreError, Result};

/// The six continent codes the pipeline runs per, each owning one or more
/// granule-name codes (e.g. `NA` also covers Arctic and Greenland granules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Continent {
    Af,
    As,
    Eu,
    Na,
    Oc,
    Sa,
}

impl Continent {
    pub fn from_code(code: &str) -> Result<Self> {
        match code.to_ascii_uppercase().as_str() {
            "AF" => Ok(Self::Af),
            "AS" => Ok(Self::As),
            "EU" => Ok(Self::Eu),
            "NA" => Ok(Self::Na),
            "OC" => Ok(Self::Oc),
            "SA" => Ok(Self::Sa),
            other => Err(CoreError::Configuration(format!(
                "unknown continent code: {other}"
            ))),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Af => "AF",
            Self::As => "AS",
            Self::Eu => "EU",
            Self::Na => "NA",
            Self::Oc => "OC",
            Self::Sa => "SA",
        }
    }

    pub fn lowercase(&self) -> &'static str {
        match self {
            Self::Af => "af",
            Self::As => "as",
            Self::Eu => "eu",
            Self::Na => "na",
            Self::Oc => "oc",
            Self::Sa => "sa",
        }
    }

    /// Granule-name codes that belong to this continent.
    pub fn granule_codes(&self) -> &'static [&'static str] {
        match self {
            Self::Af => &["AF"],
            Self::As => &["AS", "SI"],
            Self::Eu => &["EU"],
            Self::Na => &["NA", "AR", "GR"],
            Self::Oc => &["AU"],
            Self::Sa => &["SA"],
        }
    }

    /// Does `granule_uri_or_name` carry one of this continent's codes?
    pub fn matches(&self, granule_uri_or_name: &str) -> bool {
        self.granule_codes()
            .iter()
            .any(|code| granule_uri_or_name.contains(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn na_covers_arctic_and_greenland() {
        let na = Continent::Na;
        assert!(na.matches("SWOT_L2_HR_RiverSP_Reach_..._NA_..._001.zip"));
        assert!(na.matches("..._AR_..."));
        assert!(na.matches("..._GR_..."));
        assert!(!na.matches("..._EU_..."));
    }

    #[test]
    fn from_code_is_case_insensitive() {
        assert_eq!(Continent::from_code("na").unwrap(), Continent::Na);
        assert!(Continent::from_code("zz").is_err());
    }
}
