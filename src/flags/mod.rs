//! Runtime build flags: the oracle interface, its two providers, and the registry that
//! assigns each flag its runtime bit.
//!
//! Constant pool items can be guarded by a `flags` attribute naming a single build flag,
//! optionally negated with a leading `!`. Which flag names exist and which are active in
//! the current build is decided by an external source of truth, abstracted here as
//! [`FlagInfo`]. Two interchangeable providers exist: [`CmakeFlagInfo`] backed by a
//! CMake cache file and [`UmaFlagInfo`] backed by a UMA build-spec directory.

use std::collections::BTreeSet;

mod cmake;
mod registry;
mod uma;

pub use cmake::CmakeFlagInfo;
pub use registry::{FlagRegistry, RuntimeFlag, DEFAULT_FLAG};
pub use uma::UmaFlagInfo;

/// External source of truth for build flags.
///
/// The core depends only on this interface: validity of a flag name used in the XML, and
/// the set of flags active in the current build.
pub trait FlagInfo {
    /// Whether `name` is a known flag. The name arrives raw from the XML `flags`
    /// attribute and may carry a leading `!`, which implementations strip before the
    /// lookup.
    fn is_flag_valid(&self, name: &str) -> bool;

    /// The flags active in the current build, in whatever spelling the backing store
    /// uses. Callers compare folded names, so the spelling does not matter.
    fn all_set_flags(&self) -> BTreeSet<String>;
}

/// Fold a flag name into the spelling-insensitive form used for all membership tests.
///
/// Build stores spell the same flag differently: `opt_methodHandle` in the XML and UMA
/// spec files, `OPT_METHOD_HANDLE` in a CMake cache. Uppercasing and dropping
/// underscores maps every spelling of a flag to the same key, and is idempotent.
pub(crate) fn fold(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Strip the negation marker from a raw `flags` attribute value.
pub(crate) fn strip_negation(name: &str) -> &str {
    name.strip_prefix('!').unwrap_or(name)
}
