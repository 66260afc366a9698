use strum::{Display, EnumIter, IntoStaticStr};

/// The JVM primitive types, plus `void` for return positions.
///
/// The `Display` form is the Java keyword, which is also what the reflective API
/// prints for primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum PrimitiveKind {
    /// `B`
    #[strum(serialize = "byte")]
    Byte,
    /// `C`
    #[strum(serialize = "char")]
    Char,
    /// `D`
    #[strum(serialize = "double")]
    Double,
    /// `F`
    #[strum(serialize = "float")]
    Float,
    /// `I`
    #[strum(serialize = "int")]
    Int,
    /// `J`
    #[strum(serialize = "long")]
    Long,
    /// `S`
    #[strum(serialize = "short")]
    Short,
    /// `Z`
    #[strum(serialize = "boolean")]
    Boolean,
    /// `V`, only valid as a method return type
    #[strum(serialize = "void")]
    Void,
}

impl PrimitiveKind {
    /// Map a base-type code to its kind. `V` is not a base type and yields `None`.
    ///
    /// ## Arguments
    /// * 'code' - The descriptor character
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'B' => Some(PrimitiveKind::Byte),
            b'C' => Some(PrimitiveKind::Char),
            b'D' => Some(PrimitiveKind::Double),
            b'F' => Some(PrimitiveKind::Float),
            b'I' => Some(PrimitiveKind::Int),
            b'J' => Some(PrimitiveKind::Long),
            b'S' => Some(PrimitiveKind::Short),
            b'Z' => Some(PrimitiveKind::Boolean),
            _ => None,
        }
    }

    /// The descriptor character of this kind
    #[must_use]
    pub fn code(self) -> char {
        match self {
            PrimitiveKind::Byte => 'B',
            PrimitiveKind::Char => 'C',
            PrimitiveKind::Double => 'D',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Void => 'V',
        }
    }

    /// The Java keyword for this kind
    #[must_use]
    pub fn keyword(self) -> &'static str {
        self.into()
    }
}
