//! Flag oracle backed by a UMA build-spec directory.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::{fold, strip_negation, FlagInfo};
use crate::Result;

/// XML catalog of every flag name the build system knows.
const FLAG_CATALOG: &str = "j9.flags";

/// [`FlagInfo`] provider reading a UMA build-spec directory.
///
/// Two files participate: `<configDir>/j9.flags`, the catalog whose `<flag id="..">`
/// elements define the valid flag universe, and `<configDir>/<buildSpecId>.spec`, the
/// build spec whose `<flag id=".." value="true|false"/>` elements select the active set.
#[derive(Debug)]
pub struct UmaFlagInfo {
    valid: BTreeSet<String>,
    set: BTreeSet<String>,
}

impl UmaFlagInfo {
    /// Read flag information for one build spec out of `config_dir`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] when either file cannot be read,
    /// [`crate::Error::Xml`] when one is not well-formed, and
    /// [`crate::Error::Shape`] when a `<flag>` element has no `id`.
    pub fn from_spec(config_dir: &Path, build_spec_id: &str) -> Result<Self> {
        let catalog = config_dir.join(FLAG_CATALOG);
        debug!("Reading flag catalog from {}", catalog.display());
        let valid = flag_elements(&catalog)?
            .into_iter()
            .map(|(id, _)| fold(&id))
            .collect();

        let spec = config_dir.join(format!("{build_spec_id}.spec"));
        debug!("Reading build spec from {}", spec.display());
        let set = flag_elements(&spec)?
            .into_iter()
            .filter(|(_, value)| {
                value.as_deref().is_some_and(|v| v.eq_ignore_ascii_case("true"))
            })
            .map(|(id, _)| id)
            .collect();

        Ok(UmaFlagInfo { valid, set })
    }
}

impl FlagInfo for UmaFlagInfo {
    fn is_flag_valid(&self, name: &str) -> bool {
        self.valid.contains(&fold(strip_negation(name)))
    }

    fn all_set_flags(&self) -> BTreeSet<String> {
        self.set.clone()
    }
}

/// Collect the `(id, value)` attribute pairs of every `<flag>` element in the file,
/// at any nesting depth.
fn flag_elements(path: &Path) -> Result<Vec<(String, Option<String>)>> {
    let text = fs::read_to_string(path)?;
    let mut reader = Reader::from_str(&text);
    let mut flags = Vec::new();

    loop {
        let start = match reader.read_event()? {
            Event::Start(start) | Event::Empty(start) => start,
            Event::Eof => break,
            _ => continue,
        };
        if start.name().as_ref() != b"flag" {
            continue;
        }

        let mut id = None;
        let mut value = None;
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let text = attribute
                .decode_and_unescape_value(reader.decoder())
                .map_err(quick_xml::Error::from)?
                .into_owned();
            match attribute.key.as_ref() {
                b"id" => id = Some(text),
                b"value" => value = Some(text),
                _ => {}
            }
        }

        let id = id.ok_or_else(|| {
            shape_error!("flag element without id in {}", path.display())
        })?;
        flags.push((id, value));
    }

    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"<flags>
        <flag id="opt_methodHandle"/>
        <flag id="opt_reflect"/>
        <flag id="env_data64"/>
    </flags>"#;

    const SPEC: &str = r#"<spec id="linux_x86-64">
        <flags>
            <flag id="opt_methodHandle" value="true"/>
            <flag id="opt_reflect" value="false"/>
            <flag id="env_data64" value="true"/>
        </flags>
    </spec>"#;

    fn write_spec_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("j9.flags"), CATALOG).unwrap();
        fs::write(dir.path().join("linux_x86-64.spec"), SPEC).unwrap();
        dir
    }

    #[test]
    fn catalog_defines_the_valid_universe() {
        let dir = write_spec_dir();
        let info = UmaFlagInfo::from_spec(dir.path(), "linux_x86-64").unwrap();

        assert!(info.is_flag_valid("opt_methodHandle"));
        assert!(info.is_flag_valid("!opt_reflect"));
        assert!(!info.is_flag_valid("opt_panama"));
    }

    #[test]
    fn only_true_valued_spec_flags_are_set() {
        let dir = write_spec_dir();
        let info = UmaFlagInfo::from_spec(dir.path(), "linux_x86-64").unwrap();

        let set = info.all_set_flags();
        assert!(set.contains("opt_methodHandle"));
        assert!(set.contains("env_data64"));
        assert!(!set.contains("opt_reflect"));
    }

    #[test]
    fn missing_spec_file_is_an_error() {
        let dir = write_spec_dir();
        assert!(UmaFlagInfo::from_spec(dir.path(), "win_x86").is_err());
    }

    #[test]
    fn flag_without_id_is_a_shape_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("j9.flags"), r#"<flags><flag value="true"/></flags>"#)
            .unwrap();
        fs::write(dir.path().join("s.spec"), "<spec/>").unwrap();

        let err = UmaFlagInfo::from_spec(dir.path(), "s").unwrap_err();
        assert!(matches!(err, crate::Error::Shape { .. }));
    }
}
