//! The constant pool model: typed items, the pool container, and the resolver that
//! builds both from the parsed input document.
//!
//! Seven item kinds exist: class references, instance and static field references, and
//! four flavors of method references. Items are constructed in document order, guarded
//! by optional version bounds and flag predicates, and filtered once against the target
//! Java version and the active flag set before emission.

mod constant_pool;
mod descriptor;
mod item;
mod resolver;

pub use constant_pool::ConstantPool;
pub use item::{ClassId, ClassRef, FlagPredicate, ItemKind, MemberRef, PrimaryItem, VersionRange};
pub use resolver::resolve;
