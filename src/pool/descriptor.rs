//! Shape checks for JVM field and method descriptors.
//!
//! The generator does not validate descriptors semantically; it only checks that they
//! scan as a descriptor at all, and derives the argument slot count that method
//! reference slots carry. `long` and `double` occupy two argument slots.

use crate::Result;

/// Check that `descriptor` scans as exactly one JVM field type.
///
/// # Errors
/// Returns [`crate::Error::InvalidDescriptor`] when it does not.
pub(crate) fn check_field_descriptor(descriptor: &str) -> Result<()> {
    let bytes = descriptor.as_bytes();
    let end = scan_type(bytes, 0).ok_or_else(|| invalid(descriptor))?;
    if end == bytes.len() {
        Ok(())
    } else {
        Err(invalid(descriptor))
    }
}

/// Check that `descriptor` scans as a JVM method descriptor and count its argument
/// slots.
///
/// # Errors
/// Returns [`crate::Error::InvalidDescriptor`] when the descriptor does not scan, or
/// when the slot count exceeds the VM limit of 255.
pub(crate) fn method_argument_slots(descriptor: &str) -> Result<u32> {
    let bytes = descriptor.as_bytes();
    if bytes.first() != Some(&b'(') {
        return Err(invalid(descriptor));
    }

    let mut pos = 1;
    let mut slots = 0_u32;
    while pos < bytes.len() && bytes[pos] != b')' {
        slots += match bytes[pos] {
            b'J' | b'D' => 2,
            _ => 1,
        };
        pos = scan_type(bytes, pos).ok_or_else(|| invalid(descriptor))?;
    }
    if pos >= bytes.len() || slots > 255 {
        return Err(invalid(descriptor));
    }

    // Return type: 'V' or a single field type, consuming the rest of the descriptor.
    pos += 1;
    let end = if bytes.get(pos) == Some(&b'V') {
        pos + 1
    } else {
        scan_type(bytes, pos).ok_or_else(|| invalid(descriptor))?
    };
    if end != bytes.len() {
        return Err(invalid(descriptor));
    }

    Ok(slots)
}

/// Scan one field type starting at `pos`; returns the position just past it.
fn scan_type(bytes: &[u8], pos: usize) -> Option<usize> {
    match bytes.get(pos)? {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => Some(pos + 1),
        b'L' => match bytes[pos..].iter().position(|&b| b == b';') {
            Some(semi) if semi > 1 => Some(pos + semi + 1),
            _ => None,
        },
        b'[' => scan_type(bytes, pos + 1),
        _ => None,
    }
}

fn invalid(descriptor: &str) -> crate::Error {
    crate::Error::InvalidDescriptor(descriptor.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_descriptors_scan() {
        for good in ["I", "J", "[B", "[[D", "Ljava/lang/String;", "[Ljava/lang/Object;"] {
            check_field_descriptor(good).unwrap();
        }
    }

    #[test]
    fn bad_field_descriptors_are_rejected() {
        for bad in ["", "II", "L;", "Ljava/lang/String", "X", "[", "()V"] {
            assert!(check_field_descriptor(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn argument_slots_count_wide_types_twice() {
        assert_eq!(method_argument_slots("()I").unwrap(), 0);
        assert_eq!(method_argument_slots("(I)V").unwrap(), 1);
        assert_eq!(method_argument_slots("(IJ)V").unwrap(), 3);
        assert_eq!(method_argument_slots("(Ljava/lang/String;[JD)V").unwrap(), 4);
        assert_eq!(method_argument_slots("([[I[D)J").unwrap(), 2);
    }

    #[test]
    fn bad_method_descriptors_are_rejected() {
        for bad in ["", "I", "(I", "(I)", "(I)VV", "()W", "(X)V", "()Ljava/lang"] {
            assert!(method_argument_slots(bad).is_err(), "accepted {bad:?}");
        }
    }
}
