//! Flag oracle backed by a CMake cache file.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::debug;

use super::{fold, strip_negation, FlagInfo};
use crate::Result;

/// Prefix of the cache entries that define VM build flags.
const FLAG_PREFIX: &str = "J9VM_";

/// [`FlagInfo`] provider reading a `CMakeCache.txt`-format file.
///
/// Cache entries are `NAME:TYPE=VALUE` lines; blank lines and `#`/`//` comments are
/// ignored. Every entry whose name starts with `J9VM_` defines a flag (the name minus
/// the prefix); the flag is set when its value is one of CMake's true constants.
#[derive(Debug)]
pub struct CmakeFlagInfo {
    valid: BTreeSet<String>,
    set: BTreeSet<String>,
}

impl CmakeFlagInfo {
    /// Read flag information from a CMake cache file.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] when the cache file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading flags from CMake cache {}", path.display());
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    fn parse(text: &str) -> Self {
        let mut valid = BTreeSet::new();
        let mut set = BTreeSet::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let name = key.split_once(':').map_or(key, |(name, _type)| name);
            let Some(flag) = name.strip_prefix(FLAG_PREFIX) else {
                continue;
            };

            valid.insert(fold(flag));
            if is_true_constant(value) {
                set.insert(flag.to_string());
            }
        }

        CmakeFlagInfo { valid, set }
    }
}

impl FlagInfo for CmakeFlagInfo {
    fn is_flag_valid(&self, name: &str) -> bool {
        self.valid.contains(&fold(strip_negation(name)))
    }

    fn all_set_flags(&self) -> BTreeSet<String> {
        self.set.clone()
    }
}

/// CMake's true constants: `1`, `ON`, `YES`, `TRUE`, `Y`, case-insensitive.
fn is_true_constant(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_uppercase().as_str(),
        "1" | "ON" | "YES" | "TRUE" | "Y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CACHE: &str = "\
# This is the CMakeCache file.
// For build in directory: /builds/j9

CMAKE_BUILD_TYPE:STRING=Release
J9VM_OPT_METHOD_HANDLE:BOOL=ON
J9VM_OPT_REFLECT:BOOL=TRUE
J9VM_ENV_DATA64:BOOL=OFF
J9VM_GC_COMPRESSED_POINTERS:BOOL=0

EXTERNAL_LIB:FILEPATH=/usr/lib/libz.so
";

    #[test]
    fn only_prefixed_entries_define_flags() {
        let info = CmakeFlagInfo::parse(CACHE);
        assert!(info.is_flag_valid("opt_methodHandle"));
        assert!(info.is_flag_valid("env_data64"));
        assert!(!info.is_flag_valid("CMAKE_BUILD_TYPE"));
        assert!(!info.is_flag_valid("external_lib"));
    }

    #[test]
    fn negated_names_are_valid_when_the_flag_is() {
        let info = CmakeFlagInfo::parse(CACHE);
        assert!(info.is_flag_valid("!env_data64"));
        assert!(!info.is_flag_valid("!no_such_flag"));
    }

    #[test]
    fn set_flags_are_the_true_valued_entries() {
        let info = CmakeFlagInfo::parse(CACHE);
        let set = info.all_set_flags();
        assert!(set.contains("OPT_METHOD_HANDLE"));
        assert!(set.contains("OPT_REFLECT"));
        assert!(!set.contains("ENV_DATA64"));
        assert!(!set.contains("GC_COMPRESSED_POINTERS"));
    }

    #[test]
    fn from_file_reads_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CMakeCache.txt");
        std::fs::write(&path, CACHE).unwrap();

        let info = CmakeFlagInfo::from_file(&path).unwrap();
        assert!(info.is_flag_valid("opt_reflect"));

        assert!(CmakeFlagInfo::from_file(&dir.path().join("missing.txt")).is_err());
    }
}
