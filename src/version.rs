//! On-disk version marker.
//!
//! Exactly one `version_<subset-id>_<major>.<minor>` file must exist at the
//! dataset root; it is read once at open time.
use std::path::Path;

use crate::error::Error;
use crate::subset::Subset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub subset: Subset,
    pub major: u32,
    pub minor: u32,
}

impl Version {
    /// Locates and parses the single `version_*` marker file under `root`.
    pub fn read(root: &Path) -> Result<Version, Error> {
        let pattern = root.join("version_*");
        let pattern = pattern
            .to_str()
            .ok_or_else(|| Error::Decode("non-utf8 dataset root path".to_string()))?;

        let mut matches: Vec<_> = glob::glob(pattern)
            .map_err(|e| Error::Decode(e.to_string()))?
            .filter_map(Result::ok)
            .collect();
        matches.sort();

        if matches.len() != 1 {
            return Err(Error::MissingShard(format!(
                "expected exactly one version marker under {root:?}, found {}",
                matches.len()
            )));
        }

        let file_name = matches[0]
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Decode("invalid version marker file name".to_string()))?;

        Self::parse_file_name(file_name)
    }

    fn parse_file_name(file_name: &str) -> Result<Version, Error> {
        let parts: Vec<&str> = file_name.split('_').collect();
        if parts.len() != 3 || parts[0] != "version" {
            return Err(Error::Decode(format!("invalid version marker: {file_name}")));
        }
        let subset_id = parts[1]
            .chars()
            .next()
            .ok_or_else(|| Error::Decode(format!("invalid version marker: {file_name}")))?;
        let subset = Subset::from_id(subset_id)
            .ok_or_else(|| Error::Decode(format!("unknown subset id: {subset_id}")))?;

        let (major_str, minor_str) = parts[2]
            .split_once('.')
            .ok_or_else(|| Error::Decode(format!("invalid version marker: {file_name}")))?;
        let major: u32 = major_str.parse()?;
        let minor: u32 = minor_str.parse()?;

        Ok(Version {
            subset,
            major,
            minor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_marker() {
        let version = Version::parse_file_name("version_A_1.2").unwrap();
        assert_eq!(version.subset, Subset::A);
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 2);
    }

    #[test]
    fn rejects_unknown_subset() {
        assert!(Version::parse_file_name("version_X_1.0").is_err());
    }

    #[test]
    fn rejects_malformed_marker() {
        assert!(Version::parse_file_name("notaversion").is_err());
    }

    #[test]
    fn read_requires_exactly_one_marker() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Version::read(dir.path()).is_err());

        std::fs::File::create(dir.path().join("version_B_1.0")).unwrap();
        let version = Version::read(dir.path()).unwrap();
        assert_eq!(version.subset, Subset::B);

        std::fs::File::create(dir.path().join("version_A_2.0")).unwrap();
        assert!(Version::read(dir.path()).is_err());
    }
}
