//! Generation of the constant pool definition file (`j9vmconstantpool.c`).

use log::info;

use crate::pool::ConstantPool;
use crate::Result;

use super::blocks::{print_block, ENDIAN_MACROS, OPEN_DEFINITION};

/// Render the definition buffer for a filtered pool.
///
/// Structure: the autogeneration banner and mandatory includes, the endian-dispatch
/// macro block, then one slot initializer group per surviving item in pool order. Items
/// occupying several slots emit them contiguously.
///
/// # Errors
/// Returns [`crate::Error::Shape`] when a surviving member references a class whose
/// own entry was filtered out of the pool.
pub fn definition(pool: &ConstantPool, version: u32) -> Result<String> {
    info!("Generating JCL constant pool definitions for Java {version}");

    let mut out = String::new();
    print_block(&mut out, OPEN_DEFINITION);
    out.push('\n');
    print_block(&mut out, ENDIAN_MACROS);
    out.push('\n');

    out.push_str(&format!("/* JCL constant pool for Java {version} */\n"));
    out.push_str("const UDATA j9vmconstantpool[] = {\n");

    let class_slots = pool.class_slot_index();
    let mut index = 0;
    for item in pool.items() {
        out.push_str(&format!("\t/* {} = {} */\n", index, item.describe(pool)));
        for slot in item.emit_slots(pool, &class_slots)? {
            out.push_str(&slot);
            out.push('\n');
        }
        index += item.slot_count();
    }

    out.push_str("};\n");
    Ok(out)
}
