//! The pool container: interned classes plus the ordered item sequence.

use std::collections::btree_map::{BTreeMap, Entry};
use std::collections::BTreeSet;

use crate::flags;
use crate::Result;

use super::item::{ClassId, ClassRef, PrimaryItem};

/// An ordered constant pool.
///
/// The pool exclusively owns its items and the class table they reference. After
/// construction the only permitted mutation is [`ConstantPool::retain_applicable`];
/// filtering invalidates any index a caller held.
#[derive(Debug, Default)]
pub struct ConstantPool {
    classes: Vec<ClassRef>,
    class_index: BTreeMap<String, ClassId>,
    items: Vec<PrimaryItem>,
}

/// Post-filter slot index of each interned class's own pool item, used to resolve the
/// class word of member slots.
#[derive(Debug)]
pub(crate) struct ClassSlots(Vec<Option<usize>>);

impl ClassSlots {
    pub(crate) fn get(&self, class: ClassId) -> Option<usize> {
        self.0.get(class.0).copied().flatten()
    }
}

impl ConstantPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a class by name, canonicalizing separators.
    ///
    /// # Errors
    /// Returns [`crate::Error::DuplicateClass`] when the name was already interned.
    pub(crate) fn intern_class(&mut self, name: &str) -> Result<ClassId> {
        let class = ClassRef::new(name);
        let id = ClassId(self.classes.len());
        match self.class_index.entry(class.name().to_string()) {
            Entry::Occupied(_) => {
                return Err(crate::Error::DuplicateClass(class.name().to_string()))
            }
            Entry::Vacant(entry) => entry.insert(id),
        };
        self.classes.push(class);
        Ok(id)
    }

    /// Look up an interned class by name, accepting either separator form.
    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_index.get(&name.replace('.', "/")).copied()
    }

    /// The canonical name of an interned class.
    pub fn class_name(&self, class: ClassId) -> &str {
        self.classes[class.0].name()
    }

    pub(crate) fn push(&mut self, item: PrimaryItem) {
        self.items.push(item);
    }

    /// The pool items in declaration order.
    pub fn items(&self) -> &[PrimaryItem] {
        &self.items
    }

    /// Remove every item that does not apply to `version` or whose flag predicate is
    /// not satisfied by `active_flags`.
    ///
    /// This is the single mutation of the pool after construction. The relative order
    /// of surviving items is preserved.
    pub fn retain_applicable(&mut self, version: u32, active_flags: &BTreeSet<String>) {
        let active: BTreeSet<String> =
            active_flags.iter().map(|name| flags::fold(name)).collect();

        self.items.retain(|item| {
            item.applies_to(version)
                && item
                    .flag_predicate()
                    .is_none_or(|predicate| predicate.satisfied_by(&active))
        });
    }

    /// Total slot count of the pool, summing each item's own slot count.
    pub fn constant_pool_size(&self) -> usize {
        self.items.iter().map(PrimaryItem::slot_count).sum()
    }

    /// Map every interned class to the current slot index of its pool item.
    pub(crate) fn class_slot_index(&self) -> ClassSlots {
        let mut slots = vec![None; self.classes.len()];
        let mut index = 0;
        for item in &self.items {
            if let Some(class) = item.as_class() {
                slots[class.0] = Some(index);
            }
            index += item.slot_count();
        }
        ClassSlots(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_rejects_duplicates_across_separator_forms() {
        let mut pool = ConstantPool::new();
        pool.intern_class("java/lang/Object").unwrap();

        let err = pool.intern_class("java.lang.Object").unwrap_err();
        assert!(matches!(err, crate::Error::DuplicateClass(_)));
    }

    #[test]
    fn lookup_accepts_either_separator_form() {
        let mut pool = ConstantPool::new();
        let id = pool.intern_class("java.lang.String").unwrap();
        assert_eq!(pool.class_id("java/lang/String"), Some(id));
        assert_eq!(pool.class_id("java.lang.String"), Some(id));
        assert_eq!(pool.class_name(id), "java/lang/String");
        assert_eq!(pool.class_id("java/lang/Object"), None);
    }
}
