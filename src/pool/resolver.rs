//! Two-pass construction of a [`ConstantPool`] from the parsed document.

use std::str::FromStr;

use log::{debug, info};

use crate::flags::{FlagInfo, FlagRegistry};
use crate::xml::{Document, Element};
use crate::Result;

use super::constant_pool::ConstantPool;
use super::descriptor::{check_field_descriptor, method_argument_slots};
use super::item::{FlagPredicate, ItemKind, MemberRef, PrimaryItem, VersionRange};

/// Build the constant pool from the document's top-level elements.
///
/// The first pass interns every `classref` by name so that member references are always
/// resolvable regardless of declaration order. The second pass constructs the items in
/// document order, validates any `flags` attribute against the oracle, and feeds the
/// flag registry. The registry sees every item, including items a later applicability
/// filter may remove, so bit assignment does not depend on the active flag set.
///
/// # Errors
/// Fails hard on the first malformed element: a `classref` without `name`, a duplicate
/// class, an unknown element kind, a reference to an undeclared class, a missing
/// required attribute, a descriptor that does not scan, or a flag the oracle rejects.
pub fn resolve(
    document: &Document,
    flag_info: &dyn FlagInfo,
    registry: &mut FlagRegistry,
) -> Result<ConstantPool> {
    let mut pool = ConstantPool::new();

    // Find classref elements.
    for element in document.elements() {
        if ItemKind::from_str(element.name()) == Ok(ItemKind::ClassRef) {
            pool.intern_class(element.require_attribute("name")?)?;
        }
    }

    // Build constant pool.
    for element in document.elements() {
        let kind = ItemKind::from_str(element.name())
            .map_err(|_| crate::Error::UnknownElement(element.name().to_string()))?;

        let predicate = flag_predicate(element, flag_info)?;
        registry.observe(predicate.as_ref().map(FlagPredicate::name))?;

        let versions = version_range(element)?;
        let item = match kind {
            ItemKind::ClassRef => {
                let name = element.require_attribute("name")?;
                let class = pool.class_id(name).ok_or_else(|| crate::Error::UnknownClass {
                    class: name.to_string(),
                    element: element.name().to_string(),
                })?;
                PrimaryItem::new_class(class, versions, predicate)
            }
            _ => {
                let class_name = element.require_attribute("class")?;
                let class =
                    pool.class_id(class_name).ok_or_else(|| crate::Error::UnknownClass {
                        class: class_name.to_string(),
                        element: element.name().to_string(),
                    })?;
                let name = element.require_attribute("name")?.to_string();
                let descriptor = element.require_attribute("descriptor")?.to_string();

                let arg_slots = if kind.is_method() {
                    method_argument_slots(&descriptor)?
                } else {
                    check_field_descriptor(&descriptor)?;
                    0
                };

                PrimaryItem::new_member(
                    kind,
                    MemberRef { class, name, descriptor, arg_slots },
                    versions,
                    predicate,
                )
            }
        };
        pool.push(item);
    }

    info!("Found {} flags used, declaring runtime constants.", registry.len());
    for flag in registry.iter() {
        debug!("\t{} (useCount={})", flag.c_define(), flag.use_count());
    }

    Ok(pool)
}

/// Extract and validate the optional `flags` attribute of an element.
fn flag_predicate(
    element: &Element,
    flag_info: &dyn FlagInfo,
) -> Result<Option<FlagPredicate>> {
    match element.attribute("flags") {
        None => Ok(None),
        Some(raw) => {
            if !flag_info.is_flag_valid(raw) {
                return Err(crate::Error::InvalidFlag(raw.to_string()));
            }
            Ok(Some(FlagPredicate::parse(raw)))
        }
    }
}

fn version_range(element: &Element) -> Result<VersionRange> {
    Ok(VersionRange::new(
        version_bound(element, "minJava")?,
        version_bound(element, "maxJava")?,
    ))
}

fn version_bound(element: &Element, attribute: &str) -> Result<Option<u32>> {
    match element.attribute(attribute) {
        None => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|_| {
            shape_error!(
                "non-numeric {} value {} on {} element",
                attribute,
                text,
                element.name()
            )
        }),
    }
}
