//! The fixed boilerplate blocks of both generated files.
//!
//! This text is part of the tool's ABI: downstream C code depends on the exact macro
//! names and signatures, so the blocks are reproduced verbatim and never derived.

pub(crate) const OPEN_DEFINITION: &[&str] = &[
    "/* Autogenerated file */",
    "",
    "#include \"j9.h\"",
    "#include \"j9consts.h\"",
];

pub(crate) const ENDIAN_MACROS: &[&str] = &[
    "#ifdef J9VM_ENV_LITTLE_ENDIAN",
    "",
    "/* U_16 U_8 U_8 */",
    "#define WORD_BYTE_BYTE(a, b, c) ( ((U_32)a) | ((U_32)b << 16) | ((U_32)c << 24) )",
    "/* U_8 U_8 U_8 U_8 */",
    "#define BYTE_BYTE_BYTE_BYTE(a, b, c, d) ( ((U_32)a) | ((U_32)b << 8) | ((U_32)c << 16) | ((U_32)d << 24) )",
    "/* U_8 U_8 U_16 */",
    "#define BYTE_BYTE_WORD(a, b, c) ( ((U_32)a) | ((U_32)b << 8) | ((U_32)c << 16) )",
    "/* U_16 U_16 */",
    "#define WORD_WORD(a, b) ( ((U_32)a ) | ((U_32)b << 16 ) )",
    "",
    "#else /* J9VM_ENV_LITTLE_ENDIAN */",
    "",
    "/* U_16 U_8 U_8 */",
    "#define WORD_BYTE_BYTE(a, b, c) ( ((U_32)a << 16) | ((U_32)b << 8) | ((U_32)c) )",
    "/* U_8 U_8 U_8 U_8 */",
    "#define BYTE_BYTE_BYTE_BYTE(a, b, c, d) ( ((U_32)a << 24) | ((U_32)b << 16) | ((U_32)c << 8) | ((U_32)d) )",
    "/* U_8 U_8 U_16 */",
    "#define BYTE_BYTE_WORD(a, b, c) ( ((U_32)a << 24) | ((U_32)b << 16) | ((U_32)c) )",
    "/* U_16 U_16 */",
    "#define WORD_WORD(a, b) ( ((U_32)a << 16) | ((U_32)b) )",
    "",
    "#endif /* J9VM_ENV_LITTLE_ENDIAN */",
];

pub(crate) const OPEN_HEADER: &[&str] = &[
    "/* Autogenerated header */",
    "",
    "#ifndef J9VM_CONSTANT_POOL_H",
    "#define J9VM_CONSTANT_POOL_H",
    "",
    "/* @ddr_namespace: map_to_type=J9VmconstantpoolConstants */",
];

pub(crate) const CLASS_MACROS: &[&str] = &[
    "#define J9VMCONSTANTPOOL_CLASSREF_AT(vm, index) ((J9RAMClassRef*)(&(vm)->jclConstantPool[(index)]))",
    "#define J9VMCONSTANTPOOL_CLASS_AT(vm, index) (J9VMCONSTANTPOOL_CLASSREF_AT(vm, index)->value == NULL \\",
    "\t? (vm)->internalVMFunctions->resolveKnownClass(vm, index) \\",
    "\t: J9VMCONSTANTPOOL_CLASSREF_AT(vm, index)->value)",
];

pub(crate) const FIELD_MACROS: &[&str] = &[
    "#define J9VMCONSTANTPOOL_AT(vm, index, kind) ((kind*)&(vm)->jclConstantPool[index])",
    "#define J9VMCONSTANTPOOL_FIELDREF_AT(vm, index) J9VMCONSTANTPOOL_AT(vm, index, J9RAMFieldRef)",
    "#define J9VMCONSTANTPOOL_FIELD_OFFSET(vm, index) (J9JAVAVM_OBJECT_HEADER_SIZE(vm) + J9VMCONSTANTPOOL_FIELDREF_AT(vm, index)->valueOffset)",
    "",
    "#if !defined(J9VM_ENV_LITTLE_ENDIAN) && !defined(J9VM_ENV_DATA64)",
    "#define J9VMCONSTANTPOOL_ADDRESS_OFFSET(vm, index) J9VMCONSTANTPOOL_FIELD_OFFSET(vm, index) + sizeof(UDATA)",
    "#else",
    "#define J9VMCONSTANTPOOL_ADDRESS_OFFSET(vm, index) J9VMCONSTANTPOOL_FIELD_OFFSET(vm, index)",
    "#endif",
];

pub(crate) const STATIC_FIELD_MACROS: &[&str] = &[
    "#define J9VMCONSTANTPOOL_STATICFIELDREF_AT(vm, index) J9VMCONSTANTPOOL_AT(vm, index, J9RAMStaticFieldRef)",
    "#define J9VMCONSTANTPOOL_STATICFIELD_ADDRESS(vm, index) (J9RAMSTATICFIELDREF_VALUEADDRESS(J9VMCONSTANTPOOL_STATICFIELDREF_AT(vm, index)))",
];

pub(crate) const STATIC_METHOD_MACROS: &[&str] = &[
    "#define J9VMCONSTANTPOOL_STATICMETHODREF_AT(vm, index) J9VMCONSTANTPOOL_AT(vm, index, J9RAMStaticMethodRef)",
    "#define J9VMCONSTANTPOOL_STATICMETHOD_AT(vm, index) (J9VMCONSTANTPOOL_STATICMETHODREF_AT(vm, index)->method)",
];

pub(crate) const VIRTUAL_METHOD_MACROS: &[&str] = &[
    "#define J9VMCONSTANTPOOL_VIRTUALMETHODREF_AT(vm, index) J9VMCONSTANTPOOL_AT(vm, index, J9RAMVirtualMethodRef)",
    "#define J9VMCONSTANTPOOL_VIRTUALMETHOD_AT(vm, index) (J9VMCONSTANTPOOL_VIRTUALMETHODREF_AT(vm, index)->methodIndexAndArgCount)",
];

pub(crate) const SPECIAL_METHOD_MACROS: &[&str] = &[
    "#define J9VMCONSTANTPOOL_SPECIALMETHODREF_AT(vm, index) J9VMCONSTANTPOOL_AT(vm, index, J9RAMSpecialMethodRef)",
    "#define J9VMCONSTANTPOOL_SPECIALMETHOD_AT(vm, index) (J9VMCONSTANTPOOL_SPECIALMETHODREF_AT(vm, index)->method)",
];

pub(crate) const INTERFACE_METHOD_MACROS: &[&str] = &[
    "#define J9VMCONSTANTPOOL_INTERFACEMETHODREF_AT(vm, index) J9VMCONSTANTPOOL_AT(vm, index, J9RAMInterfaceMethodRef)",
    "#define J9VMCONSTANTPOOL_INTERFACEMETHOD_AT(vm, index) (J9VMCONSTANTPOOL_INTERFACEMETHODREF_AT(vm, index)->methodIndexAndArgCount)",
];

pub(crate) const CLOSE_HEADER: &[&str] = &["#endif /* J9VM_CONSTANT_POOL_H */"];

/// Append a fixed block to the output buffer, one line per entry.
pub(crate) fn print_block(out: &mut String, block: &[&str]) {
    for line in block {
        out.push_str(line);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endian_branches_are_mutually_exclusive() {
        let opens = ENDIAN_MACROS.iter().filter(|l| l.starts_with("#ifdef")).count();
        let elses = ENDIAN_MACROS.iter().filter(|l| l.starts_with("#else")).count();
        let closes = ENDIAN_MACROS.iter().filter(|l| l.starts_with("#endif")).count();
        assert_eq!((opens, elses, closes), (1, 1, 1));
    }

    #[test]
    fn both_branches_define_the_same_macros() {
        let defines: Vec<&str> = ENDIAN_MACROS
            .iter()
            .filter(|l| l.starts_with("#define"))
            .map(|l| l.split_whitespace().nth(1).unwrap())
            .collect();
        let (first, second) = defines.split_at(defines.len() / 2);
        assert_eq!(first, second);
        assert!(first[0].starts_with("WORD_BYTE_BYTE"));
    }

    #[test]
    fn byte_packing_produces_identical_target_memory() {
        // BYTE_BYTE_BYTE_BYTE: every operand is one byte, so writing each branch's
        // value to memory in its target's order yields the same byte sequence.
        let le = 0x11_u32 | (0x22 << 8) | (0x33 << 16) | (0x44 << 24);
        let be = (0x11_u32 << 24) | (0x22 << 16) | (0x33 << 8) | 0x44;
        assert_eq!(le.to_le_bytes(), be.to_be_bytes());
        assert_eq!(le.to_le_bytes(), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn packing_formulas_round_trip_their_operands() {
        // Each branch must yield the operands back when its fields are extracted per
        // that target's layout; the word fields sit at the same byte offsets on both.
        let (a, b, c) = (0x1234_u32, 0x56_u32, 0x78_u32);
        let le = a | (b << 16) | (c << 24);
        let be = (a << 16) | (b << 8) | c;
        assert_eq!((le & 0xffff, (le >> 16) & 0xff, le >> 24), (a, b, c));
        assert_eq!(((be >> 16) & 0xffff, (be >> 8) & 0xff, be & 0xff), (a, b, c));

        let (a, b, c) = (0x12_u32, 0x34_u32, 0x5678_u32);
        let le = a | (b << 8) | (c << 16);
        let be = (a << 24) | (b << 16) | c;
        assert_eq!((le & 0xff, (le >> 8) & 0xff, le >> 16), (a, b, c));
        assert_eq!((be >> 24, (be >> 16) & 0xff, be & 0xffff), (a, b, c));

        let (a, b) = (0x1234_u32, 0x5678_u32);
        let le = a | (b << 16);
        let be = (a << 16) | b;
        assert_eq!((le & 0xffff, le >> 16), (a, b));
        assert_eq!((be >> 16, be & 0xffff), (a, b));
    }
}
