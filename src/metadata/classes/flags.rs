//! Access and property flags of classes, fields and methods (JVMS 4.1, 4.5, 4.6).
//!
//! Several bits are overloaded by member kind: `0x0020` is `ACC_SYNCHRONIZED` on a
//! method and `ACC_SUPER` on a class, `0x0040` is `ACC_VOLATILE` on a field and
//! `ACC_BRIDGE` on a method, `0x0080` is `ACC_TRANSIENT` on a field and `ACC_VARARGS`
//! on a method. The modifier masks below select which reading applies.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Raw `access_flags` of a class, field or method
    pub struct AccessFlags: u16 {
        /// Declared public
        const PUBLIC = 0x0001;
        /// Declared private
        const PRIVATE = 0x0002;
        /// Declared protected
        const PROTECTED = 0x0004;
        /// Declared static
        const STATIC = 0x0008;
        /// Declared final
        const FINAL = 0x0010;
        /// Method: declared synchronized
        const SYNCHRONIZED = 0x0020;
        /// Class: treat superclass methods specially on `invokespecial`
        const SUPER = 0x0020;
        /// Field: declared volatile
        const VOLATILE = 0x0040;
        /// Method: compiler-generated bridge
        const BRIDGE = 0x0040;
        /// Field: declared transient
        const TRANSIENT = 0x0080;
        /// Method: declared with a variable number of arguments
        const VARARGS = 0x0080;
        /// Method: declared native
        const NATIVE = 0x0100;
        /// Class: is an interface
        const INTERFACE = 0x0200;
        /// Declared abstract
        const ABSTRACT = 0x0400;
        /// Method: floating-point mode is strict
        const STRICT = 0x0800;
        /// Not present in source code
        const SYNTHETIC = 0x1000;
        /// Class: declared as an annotation interface
        const ANNOTATION = 0x2000;
        /// Class or field: an enum or enum constant
        const ENUM = 0x4000;
    }
}

/// Modifiers that can appear in a class declaration
pub const CLASS_MODIFIERS: AccessFlags = AccessFlags::PUBLIC
    .union(AccessFlags::PROTECTED)
    .union(AccessFlags::PRIVATE)
    .union(AccessFlags::ABSTRACT)
    .union(AccessFlags::STATIC)
    .union(AccessFlags::FINAL)
    .union(AccessFlags::STRICT);

/// Modifiers that can appear in a field declaration
pub const FIELD_MODIFIERS: AccessFlags = AccessFlags::PUBLIC
    .union(AccessFlags::PROTECTED)
    .union(AccessFlags::PRIVATE)
    .union(AccessFlags::STATIC)
    .union(AccessFlags::FINAL)
    .union(AccessFlags::TRANSIENT)
    .union(AccessFlags::VOLATILE);

/// Modifiers that can appear in a method declaration
pub const METHOD_MODIFIERS: AccessFlags = AccessFlags::PUBLIC
    .union(AccessFlags::PROTECTED)
    .union(AccessFlags::PRIVATE)
    .union(AccessFlags::ABSTRACT)
    .union(AccessFlags::STATIC)
    .union(AccessFlags::FINAL)
    .union(AccessFlags::SYNCHRONIZED)
    .union(AccessFlags::NATIVE)
    .union(AccessFlags::STRICT);

/// The access modifiers alone
pub const ACCESS_MODIFIERS: AccessFlags = AccessFlags::PUBLIC
    .union(AccessFlags::PROTECTED)
    .union(AccessFlags::PRIVATE);

// Canonical keyword order of the reflective API
const MODIFIER_ORDER: [(AccessFlags, &str); 12] = [
    (AccessFlags::PUBLIC, "public"),
    (AccessFlags::PROTECTED, "protected"),
    (AccessFlags::PRIVATE, "private"),
    (AccessFlags::ABSTRACT, "abstract"),
    (AccessFlags::STATIC, "static"),
    (AccessFlags::FINAL, "final"),
    (AccessFlags::TRANSIENT, "transient"),
    (AccessFlags::VOLATILE, "volatile"),
    (AccessFlags::SYNCHRONIZED, "synchronized"),
    (AccessFlags::NATIVE, "native"),
    (AccessFlags::STRICT, "strictfp"),
    (AccessFlags::INTERFACE, "interface"),
];

impl AccessFlags {
    /// Space-separated modifier keywords in canonical order.
    ///
    /// Callers mask the flags with the modifier set of the member kind first, since
    /// overloaded bits would otherwise print under both readings.
    #[must_use]
    pub fn modifier_string(self) -> String {
        MODIFIER_ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, keyword)| *keyword)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns `true` if this is the flag set of an interface
    #[must_use]
    pub fn is_interface(self) -> bool {
        self.contains(AccessFlags::INTERFACE)
    }
}

/// Render a modifier prefix including its trailing space, or nothing.
///
/// A default interface method prints `default` after its access modifier and before
/// the remaining modifiers.
pub(crate) fn modifier_prefix(flags: AccessFlags, mask: AccessFlags, is_default: bool) -> String {
    let masked = flags & mask;
    let mut out = String::new();

    if !is_default {
        if !masked.is_empty() {
            out.push_str(&masked.modifier_string());
            out.push(' ');
        }
        return out;
    }

    let access = masked & ACCESS_MODIFIERS;
    if !access.is_empty() {
        out.push_str(&access.modifier_string());
        out.push(' ');
    }
    out.push_str("default ");
    let rest = masked - ACCESS_MODIFIERS;
    if !rest.is_empty() {
        out.push_str(&rest.modifier_string());
        out.push(' ');
    }
    out
}
