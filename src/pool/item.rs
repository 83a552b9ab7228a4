//! Typed constant pool items and their emission behavior.

use std::collections::BTreeSet;

use strum::{Display, EnumIter, EnumString};

use super::constant_pool::{ClassSlots, ConstantPool};
use crate::flags;
use crate::Result;

/// The seven item kinds, tagged by their XML element names.
///
/// Element names are matched case-sensitively; `classref` is a kind token, `ClassRef`
/// is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum ItemKind {
    /// `classref` - a loadable class named by fully qualified name.
    #[strum(serialize = "classref")]
    ClassRef,
    /// `fieldref` - an instance field of a declared class.
    #[strum(serialize = "fieldref")]
    FieldRef,
    /// `staticfieldref` - a static field of a declared class.
    #[strum(serialize = "staticfieldref")]
    StaticFieldRef,
    /// `staticmethodref` - a static method of a declared class.
    #[strum(serialize = "staticmethodref")]
    StaticMethodRef,
    /// `virtualmethodref` - a virtually dispatched method of a declared class.
    #[strum(serialize = "virtualmethodref")]
    VirtualMethodRef,
    /// `specialmethodref` - an invokespecial target of a declared class.
    #[strum(serialize = "specialmethodref")]
    SpecialMethodRef,
    /// `interfacemethodref` - an interface method of a declared class.
    #[strum(serialize = "interfacemethodref")]
    InterfaceMethodRef,
}

impl ItemKind {
    /// Whether this kind is one of the four method reference flavors.
    pub fn is_method(self) -> bool {
        matches!(
            self,
            ItemKind::StaticMethodRef
                | ItemKind::VirtualMethodRef
                | ItemKind::SpecialMethodRef
                | ItemKind::InterfaceMethodRef
        )
    }

    /// The `J9CPTYPE_*` constant naming this kind in emitted slot initializers.
    /// The constants themselves are defined by `j9consts.h` on the VM side.
    pub fn cp_type(self) -> &'static str {
        match self {
            ItemKind::ClassRef => "J9CPTYPE_CLASS",
            ItemKind::FieldRef => "J9CPTYPE_FIELD",
            ItemKind::StaticFieldRef => "J9CPTYPE_STATIC_FIELD",
            ItemKind::StaticMethodRef => "J9CPTYPE_STATIC_METHOD",
            ItemKind::VirtualMethodRef => "J9CPTYPE_VIRTUAL_METHOD",
            ItemKind::SpecialMethodRef => "J9CPTYPE_SPECIAL_METHOD",
            ItemKind::InterfaceMethodRef => "J9CPTYPE_INTERFACE_METHOD",
        }
    }
}

/// Index of an interned class in the pool's class table.
///
/// Items reference their owning class through this index rather than by borrow, so no
/// item can outlive the table that names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassId(pub(crate) usize);

/// An interned class reference: a fully qualified class name, unique within a pool.
#[derive(Debug)]
pub struct ClassRef {
    name: String,
}

impl ClassRef {
    /// Canonicalize and intern a class name. Dotted names are stored with `/`
    /// separators, the form in which they are emitted.
    pub(crate) fn new(name: &str) -> Self {
        ClassRef { name: name.replace('.', "/") }
    }

    /// The canonical (slash-separated) class name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A flag predicate attached to an item: a single flag name with a polarity.
#[derive(Debug, Clone)]
pub struct FlagPredicate {
    name: String,
    negated: bool,
}

impl FlagPredicate {
    /// Parse the raw `flags` attribute text. A leading `!` marks the predicate
    /// negated; the remainder is the flag name.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('!') {
            Some(name) => FlagPredicate { name: name.to_string(), negated: true },
            None => FlagPredicate { name: raw.to_string(), negated: false },
        }
    }

    /// The flag name, without the negation marker.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the raw attribute value began with `!`.
    pub fn negated(&self) -> bool {
        self.negated
    }

    /// Whether the predicate holds against a folded active flag set: present for a
    /// positive predicate, absent for a negated one.
    pub(crate) fn satisfied_by(&self, active: &BTreeSet<String>) -> bool {
        active.contains(&flags::fold(&self.name)) != self.negated
    }
}

/// Inclusive Java version bounds declared by `minJava`/`maxJava` attributes.
/// Absent bounds are open.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionRange {
    min: Option<u32>,
    max: Option<u32>,
}

impl VersionRange {
    /// Build a range from optional bounds.
    pub fn new(min: Option<u32>, max: Option<u32>) -> Self {
        VersionRange { min, max }
    }

    /// Whether `version` falls within the bounds.
    pub fn contains(self, version: u32) -> bool {
        self.min.is_none_or(|min| version >= min) && self.max.is_none_or(|max| version <= max)
    }
}

/// The member payload shared by field and method reference kinds: the owning class,
/// the member name, and the JVM descriptor.
#[derive(Debug)]
pub struct MemberRef {
    pub(crate) class: ClassId,
    pub(crate) name: String,
    pub(crate) descriptor: String,
    /// Argument slot count derived from the descriptor; zero for fields.
    pub(crate) arg_slots: u32,
}

#[derive(Debug)]
enum ItemData {
    Class(ClassId),
    Member(MemberRef),
}

/// One constant pool item: a kind tag, version bounds, an optional flag predicate, and
/// the per-kind payload.
#[derive(Debug)]
pub struct PrimaryItem {
    kind: ItemKind,
    versions: VersionRange,
    predicate: Option<FlagPredicate>,
    data: ItemData,
}

impl PrimaryItem {
    pub(crate) fn new_class(
        class: ClassId,
        versions: VersionRange,
        predicate: Option<FlagPredicate>,
    ) -> Self {
        PrimaryItem { kind: ItemKind::ClassRef, versions, predicate, data: ItemData::Class(class) }
    }

    pub(crate) fn new_member(
        kind: ItemKind,
        member: MemberRef,
        versions: VersionRange,
        predicate: Option<FlagPredicate>,
    ) -> Self {
        PrimaryItem { kind, versions, predicate, data: ItemData::Member(member) }
    }

    /// The item's declared kind tag.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The item's flag predicate, if it carried a `flags` attribute.
    pub fn flag_predicate(&self) -> Option<&FlagPredicate> {
        self.predicate.as_ref()
    }

    /// The interned class when this item is a class reference.
    pub(crate) fn as_class(&self) -> Option<ClassId> {
        match &self.data {
            ItemData::Class(class) => Some(*class),
            ItemData::Member(_) => None,
        }
    }

    /// Whether the item participates in a build targeting `version`.
    pub fn applies_to(&self, version: u32) -> bool {
        self.versions.contains(version)
    }

    /// How many consecutive pool slots this item occupies.
    ///
    /// Every current kind occupies one slot, but emission and index assignment always
    /// ask rather than assume, so a kind can grow a second slot without touching them.
    pub fn slot_count(&self) -> usize {
        match self.data {
            ItemData::Class(_) | ItemData::Member(_) => 1,
        }
    }

    /// Render the item's slot initializer lines for the definition file, one line per
    /// slot.
    ///
    /// Each slot pairs a description word packed by the endian macros with a pointer to
    /// the item's UTF-8 data. Class slots carry the kind and the name length; member
    /// slots carry the owning class's slot index, the argument slot count, and the kind.
    ///
    /// # Errors
    /// Returns [`crate::Error::Shape`] when the owning class of a member was filtered
    /// out of the pool while the member survived.
    pub(crate) fn emit_slots(&self, pool: &ConstantPool, slots: &ClassSlots) -> Result<Vec<String>> {
        match &self.data {
            ItemData::Class(class) => {
                let name = pool.class_name(*class);
                Ok(vec![format!(
                    "\tBYTE_BYTE_WORD({}, 0, {}), (UDATA)\"{}\",",
                    self.kind.cp_type(),
                    name.len(),
                    name
                )])
            }
            ItemData::Member(member) => {
                let class_slot = slots.get(member.class).ok_or_else(|| {
                    shape_error!(
                        "class {} referenced by {} is not in the constant pool",
                        pool.class_name(member.class),
                        self.describe(pool)
                    )
                })?;
                Ok(vec![format!(
                    "\tWORD_BYTE_BYTE({}, {}, {}), (UDATA)\"{} {}\",",
                    class_slot,
                    member.arg_slots,
                    self.kind.cp_type(),
                    member.name,
                    member.descriptor
                )])
            }
        }
    }

    /// Render the `#define` that names this item's final slot index in the header.
    pub(crate) fn emit_index_macro(&self, pool: &ConstantPool, index: usize) -> String {
        let name = match &self.data {
            ItemData::Class(class) => {
                format!("J9VMCONSTANTPOOL_{}", macro_fragment(pool.class_name(*class)))
            }
            ItemData::Member(member) => format!(
                "J9VMCONSTANTPOOL_{}_{}",
                macro_fragment(pool.class_name(member.class)),
                macro_fragment(&member.name)
            ),
        };
        format!("#define {name} {index}")
    }

    /// Human-readable description of the item, used in slot comments and diagnostics.
    pub(crate) fn describe(&self, pool: &ConstantPool) -> String {
        match &self.data {
            ItemData::Class(class) => pool.class_name(*class).to_string(),
            ItemData::Member(member) => format!(
                "{}.{} {}",
                pool.class_name(member.class),
                member.name,
                member.descriptor
            ),
        }
    }
}

/// Reduce an identifier to its macro-name fragment: ASCII alphanumerics uppercased,
/// everything else (separators, `<`/`>` of `<init>`) dropped.
fn macro_fragment(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
