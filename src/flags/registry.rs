//! Assignment of runtime bit values to the flag names observed in the input document.

use std::collections::btree_map::{BTreeMap, Entry};

use crate::Result;

/// Name of the synthetic flag that guards items carrying no `flags` attribute.
pub const DEFAULT_FLAG: &str = "default";

/// A runtime flag definition: an identifier, its power-of-two bit value, and how many
/// constant pool items referenced it.
#[derive(Debug)]
pub struct RuntimeFlag {
    name: String,
    value: u32,
    use_count: u32,
}

impl RuntimeFlag {
    /// The flag identifier as written in the input document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The flag's bit value. Distinct power of two per flag; `default` is always `0x1`.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// How many items referenced this flag (or, for `default`, carried no flag).
    pub fn use_count(&self) -> u32 {
        self.use_count
    }

    /// Render the C `#define` for this flag.
    ///
    /// The define name is the identifier uppercased, with an underscore inserted before
    /// every character that was originally uppercase; the value is unpadded lowercase
    /// hex. `ClassHooks` with value `0x8` becomes `#define JCL_RTFLAG__CLASS_HOOKS 0x8`.
    pub fn c_define(&self) -> String {
        let mut define = String::from("#define JCL_RTFLAG_");

        for c in self.name.chars() {
            if c.is_uppercase() {
                define.push('_');
            }
            define.extend(c.to_uppercase());
        }

        define.push_str(&format!(" 0x{:x}", self.value));
        define
    }
}

/// Owns the assignment of bit values to flag names.
///
/// Seeded with `default = 0x1`. The first observation of a new name takes the next
/// unassigned bit; assignment is monotonic for the rest of the run. Iteration is
/// lexicographic on flag name, which is the emission order of the header's runtime-flag
/// section.
#[derive(Debug)]
pub struct FlagRegistry {
    flags: BTreeMap<String, RuntimeFlag>,
    last_value: u32,
}

impl FlagRegistry {
    /// Create a registry holding only the seeded `default` flag.
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();
        flags.insert(
            DEFAULT_FLAG.to_string(),
            RuntimeFlag {
                name: DEFAULT_FLAG.to_string(),
                value: 0x1,
                use_count: 0,
            },
        );
        FlagRegistry { flags, last_value: 0x1 }
    }

    /// Record one item's flag reference.
    ///
    /// `name` is the flag name with any `!` already stripped; `None` counts the item
    /// against `default`. A name not seen before is assigned the next bit.
    ///
    /// # Errors
    /// Returns [`crate::Error::FlagOverflow`] when a new name would need a 33rd bit.
    pub fn observe(&mut self, name: Option<&str>) -> Result<()> {
        let name = name.unwrap_or(DEFAULT_FLAG);

        let flag = match self.flags.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                if self.last_value == 0x8000_0000 {
                    return Err(crate::Error::FlagOverflow(name.to_string()));
                }
                self.last_value <<= 1;
                entry.insert(RuntimeFlag {
                    name: name.to_string(),
                    value: self.last_value,
                    use_count: 0,
                })
            }
        };
        flag.use_count += 1;

        Ok(())
    }

    /// Look up a flag by name.
    pub fn get(&self, name: &str) -> Option<&RuntimeFlag> {
        self.flags.get(name)
    }

    /// All flags, in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = &RuntimeFlag> {
        self.flags.values()
    }

    /// Number of flags, including `default`.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the registry is empty. Never true in practice; `default` is seeded.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl Default for FlagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_seeded_with_bit_one() {
        let registry = FlagRegistry::new();
        let default = registry.get(DEFAULT_FLAG).unwrap();
        assert_eq!(default.value(), 0x1);
        assert_eq!(default.use_count(), 0);
    }

    #[test]
    fn bits_are_distinct_powers_of_two_in_observation_order() {
        let mut registry = FlagRegistry::new();
        registry.observe(Some("Foo")).unwrap();
        registry.observe(Some("Bar")).unwrap();
        registry.observe(Some("Foo")).unwrap();

        assert_eq!(registry.get("Foo").unwrap().value(), 0x2);
        assert_eq!(registry.get("Bar").unwrap().value(), 0x4);
        assert_eq!(registry.get("Foo").unwrap().use_count(), 2);

        let mut seen = std::collections::BTreeSet::new();
        for flag in registry.iter() {
            assert_eq!(flag.value().count_ones(), 1);
            assert!(seen.insert(flag.value()));
        }
    }

    #[test]
    fn unflagged_items_count_against_default() {
        let mut registry = FlagRegistry::new();
        registry.observe(None).unwrap();
        registry.observe(None).unwrap();
        assert_eq!(registry.get(DEFAULT_FLAG).unwrap().use_count(), 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn iteration_is_lexicographic() {
        let mut registry = FlagRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.observe(Some(name)).unwrap();
        }
        let names: Vec<&str> = registry.iter().map(RuntimeFlag::name).collect();
        assert_eq!(names, ["alpha", "default", "mid", "zeta"]);
    }

    #[test]
    fn define_inserts_underscore_before_original_uppercase() {
        let mut registry = FlagRegistry::new();
        registry.observe(Some("a")).unwrap();
        registry.observe(Some("b")).unwrap();
        registry.observe(Some("ClassHooks")).unwrap();

        let flag = registry.get("ClassHooks").unwrap();
        assert_eq!(flag.value(), 0x8);
        assert_eq!(flag.c_define(), "#define JCL_RTFLAG__CLASS_HOOKS 0x8");
    }

    #[test]
    fn default_define_has_no_inserted_underscore() {
        let registry = FlagRegistry::new();
        assert_eq!(
            registry.get(DEFAULT_FLAG).unwrap().c_define(),
            "#define JCL_RTFLAG_DEFAULT 0x1"
        );
    }

    #[test]
    fn define_value_is_unpadded_lowercase_hex() {
        let mut registry = FlagRegistry::new();
        let mut last = String::new();
        for i in 0..31 {
            let name = format!("flag{i:02}");
            registry.observe(Some(&name)).unwrap();
            last = name;
        }
        assert_eq!(
            registry.get(&last).unwrap().c_define(),
            format!("#define JCL_RTFLAG_FLAG30 0x{:x}", 0x8000_0000_u32)
        );
    }

    #[test]
    fn thirty_second_distinct_flag_overflows() {
        let mut registry = FlagRegistry::new();
        for i in 0..31 {
            registry.observe(Some(&format!("flag{i}"))).unwrap();
        }
        // Re-observing assigned names is still fine.
        registry.observe(Some("flag0")).unwrap();

        let err = registry.observe(Some("straw")).unwrap_err();
        assert!(matches!(err, crate::Error::FlagOverflow(_)));
    }
}
