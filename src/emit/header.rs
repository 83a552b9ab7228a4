//! Generation of the constant pool header file (`j9vmconstantpool.h`).

use log::info;

use crate::flags::FlagRegistry;
use crate::pool::ConstantPool;

use super::blocks::{
    print_block, CLASS_MACROS, CLOSE_HEADER, FIELD_MACROS, INTERFACE_METHOD_MACROS,
    OPEN_HEADER, SPECIAL_METHOD_MACROS, STATIC_FIELD_MACROS, STATIC_METHOD_MACROS,
    VIRTUAL_METHOD_MACROS,
};

/// Render the header buffer for a filtered pool.
///
/// Structure: banner, inclusion guard and the ddr marker comment; the runtime-flag
/// defines in lexicographic name order; the seven fixed accessor macro blocks; one
/// symbolic index define per surviving item; the pool size define; the closing guard.
pub fn header(pool: &ConstantPool, registry: &FlagRegistry) -> String {
    info!("Generating header file");

    let mut out = String::new();
    print_block(&mut out, OPEN_HEADER);
    out.push('\n');

    out.push_str("/* Runtime flag definitions */\n");
    for flag in registry.iter() {
        out.push_str(&flag.c_define());
        out.push('\n');
    }
    out.push('\n');

    for block in [
        CLASS_MACROS,
        FIELD_MACROS,
        STATIC_FIELD_MACROS,
        STATIC_METHOD_MACROS,
        VIRTUAL_METHOD_MACROS,
        SPECIAL_METHOD_MACROS,
        INTERFACE_METHOD_MACROS,
    ] {
        print_block(&mut out, block);
        out.push('\n');
    }

    let mut index = 0;
    for item in pool.items() {
        out.push_str(&item.emit_index_macro(pool, index));
        out.push('\n');
        index += item.slot_count();
    }
    out.push('\n');

    out.push_str(&format!("#define J9VM_VMCONSTANTPOOL_SIZE {}\n", pool.constant_pool_size()));
    out.push('\n');
    print_block(&mut out, CLOSE_HEADER);

    out
}
