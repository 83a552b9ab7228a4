use thiserror::Error;

macro_rules! shape_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Shape {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Shape {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this crate can potentially
/// return.
///
/// Every failure aborts the whole run: the generator never produces partial output. The
/// variants exist so that diagnostics can name the offending element, attribute, flag or
/// file, not so that callers can recover.
#[derive(Error, Debug)]
pub enum Error {
    /// The input document is not well-formed XML.
    ///
    /// Wraps the underlying `quick-xml` parse failure. No partial recovery is attempted;
    /// the run aborts with the parser's diagnostic.
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading the input document, a flag
    /// oracle's backing files, or writing the generated output.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// The input data has the wrong shape.
    ///
    /// Covers data-shape failures that do not fit a more specific variant, such as a
    /// non-numeric `minJava` attribute or a `<flag>` catalog entry without an id. The
    /// error records the source location where the malformation was detected.
    #[error("Malformed input - {file}:{line}: {message}")]
    Shape {
        /// The message to be printed for the Shape error
        message: String,
        /// The source file in which this error was detected
        file: &'static str,
        /// The source line in which this error was detected
        line: u32,
    },

    /// A required attribute is missing from an element.
    #[error("Missing {attribute} for {element} element")]
    MissingAttribute {
        /// The element the attribute was expected on
        element: String,
        /// The name of the missing attribute
        attribute: String,
    },

    /// The document contains an element whose tag is not one of the seven recognized kinds.
    #[error("Unrecognized node type: {0}")]
    UnknownElement(String),

    /// A member entry names a class that was never declared by a `classref` element.
    #[error("Reference to undeclared class {class} in {element} element")]
    UnknownClass {
        /// The class name that could not be resolved
        class: String,
        /// The element kind holding the reference
        element: String,
    },

    /// Two `classref` elements declare the same class name.
    #[error("Duplicate classref {0}")]
    DuplicateClass(String),

    /// A `flags` attribute names a flag the flag oracle does not know.
    #[error("Invalid flag used ->{0}")]
    InvalidFlag(String),

    /// Registering one more runtime flag would not fit in a 32-bit flag word.
    #[error("Runtime flag {0} does not fit in a 32-bit flag word")]
    FlagOverflow(String),

    /// A field or method descriptor fails the shape check.
    #[error("Malformed descriptor {0}")]
    InvalidDescriptor(String),
}
