//! Type descriptors handed across the capability interface.
//!
//! The runtime describes a value's type with a small [`TypeDesc`] record built around
//! an ECMA-335 style element kind. The marshalling classifier consumes these records
//! without ever touching value contents.

use std::fmt;

/// Element kind of a managed type, with ECMA-335 element-type discriminants.
///
/// Only the kinds the boundary actually dispatches on are represented; the runtime
/// maps everything else to [`ElementKind::Class`], [`ElementKind::ValueType`] or
/// [`ElementKind::GenericInst`] as appropriate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementKind {
    /// No value (method return type only)
    Void = 0x01,
    /// Boolean
    Boolean = 0x02,
    /// UTF-16 code unit
    Char = 0x03,
    /// 8-bit signed integer
    I1 = 0x04,
    /// 8-bit unsigned integer
    U1 = 0x05,
    /// 16-bit signed integer
    I2 = 0x06,
    /// 16-bit unsigned integer
    U2 = 0x07,
    /// 32-bit signed integer
    I4 = 0x08,
    /// 32-bit unsigned integer
    U4 = 0x09,
    /// 64-bit signed integer
    I8 = 0x0A,
    /// 64-bit unsigned integer
    U8 = 0x0B,
    /// 32-bit floating point
    R4 = 0x0C,
    /// 64-bit floating point
    R8 = 0x0D,
    /// Managed string
    String = 0x0E,
    /// Non-reference (value) type
    ValueType = 0x11,
    /// Reference type
    Class = 0x12,
    /// Instantiated generic type
    GenericInst = 0x15,
    /// System.Object
    Object = 0x1C,
    /// Single-dimensional, zero-based array
    SzArray = 0x1D,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Descriptor of a runtime value's type, produced by the runtime's type capability.
///
/// Carries everything the marshalling classifier needs: the element kind, the
/// declaring namespace and name, the structural predicates that overlap (enum,
/// reference, delegate) and the element descriptor for single-dimensional arrays.
///
/// # Examples
///
/// ```rust
/// use hostbridge::runtime::typedesc::{ElementKind, TypeDesc};
///
/// let bytes = TypeDesc::sz_array(TypeDesc::primitive(ElementKind::U1));
/// assert_eq!(bytes.kind, ElementKind::SzArray);
/// assert_eq!(bytes.element.as_ref().unwrap().kind, ElementKind::U1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDesc {
    /// Element kind of the type
    pub kind: ElementKind,
    /// Declaring namespace (empty for primitives)
    pub namespace: String,
    /// Type name (empty for primitives)
    pub name: String,
    /// The type is an enumeration
    pub is_enum: bool,
    /// The type is a reference type
    pub is_reference: bool,
    /// The type implements the delegate capability
    pub is_delegate: bool,
    /// Element type for single-dimensional arrays
    pub element: Option<Box<TypeDesc>>,
}

impl TypeDesc {
    /// Descriptor for a primitive element kind.
    #[must_use]
    pub fn primitive(kind: ElementKind) -> Self {
        TypeDesc {
            kind,
            namespace: String::new(),
            name: String::new(),
            is_enum: false,
            is_reference: matches!(kind, ElementKind::String | ElementKind::Object),
            is_delegate: false,
            element: None,
        }
    }

    /// Descriptor for a reference type with the given namespace and name.
    #[must_use]
    pub fn class(namespace: &str, name: &str) -> Self {
        TypeDesc {
            kind: ElementKind::Class,
            namespace: namespace.to_string(),
            name: name.to_string(),
            is_enum: false,
            is_reference: true,
            is_delegate: false,
            element: None,
        }
    }

    /// Descriptor for a non-reference (value) type.
    #[must_use]
    pub fn value_type(namespace: &str, name: &str) -> Self {
        TypeDesc {
            kind: ElementKind::ValueType,
            namespace: namespace.to_string(),
            name: name.to_string(),
            is_enum: false,
            is_reference: false,
            is_delegate: false,
            element: None,
        }
    }

    /// Descriptor for an enumeration type.
    #[must_use]
    pub fn enumeration(namespace: &str, name: &str) -> Self {
        TypeDesc {
            is_enum: true,
            ..TypeDesc::value_type(namespace, name)
        }
    }

    /// Descriptor for a delegate type.
    #[must_use]
    pub fn delegate(namespace: &str, name: &str) -> Self {
        TypeDesc {
            is_delegate: true,
            ..TypeDesc::class(namespace, name)
        }
    }

    /// Descriptor for a single-dimensional, zero-based array of `element`.
    #[must_use]
    pub fn sz_array(element: TypeDesc) -> Self {
        TypeDesc {
            kind: ElementKind::SzArray,
            namespace: String::new(),
            name: String::new(),
            is_enum: false,
            is_reference: true,
            is_delegate: false,
            element: Some(Box::new(element)),
        }
    }
}
