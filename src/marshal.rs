//! Value classification for the host boundary.
//!
//! Before a runtime value crosses to the host, it is classified into a [`MarshalTag`]
//! telling the host how to decode it. Classification reads only the value's type
//! descriptor, never its contents; the one exception is null, which classifies as
//! [`MarshalTag::None`] regardless of declared type.
//!
//! The structural checks overlap - an enum is also a value type, a delegate is also
//! a reference type - so the check order is load-bearing: enum before value type
//! before delegate before task before the object fallback.

use strum::{EnumCount, EnumIter};

use crate::runtime::typedesc::{ElementKind, TypeDesc};

/// Namespace of the recognized asynchronous-result shapes.
const TASK_NAMESPACE: &str = "System.Threading.Tasks";

/// Closed classification of a runtime value, with stable wire discriminants.
///
/// The host decodes values by this tag alone. All signed and unsigned integer widths
/// share [`MarshalTag::Int`]: the host numeric channel cannot carry 64-bit integers
/// losslessly, which is a known, accepted limitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter)]
#[repr(u8)]
pub enum MarshalTag {
    /// No value (the input was null)
    None = 0,
    /// Any integer width, 8 to 64 bits, signed or unsigned
    Int = 1,
    /// 32- or 64-bit floating point
    Float = 2,
    /// Managed string
    String = 3,
    /// Non-reference (value) type
    ValueType = 4,
    /// Delegate
    Delegate = 5,
    /// Asynchronous-result shape (`Task` or `` Task`1 ``)
    Task = 6,
    /// Opaque object reference
    Object = 7,
    /// Boolean
    Bool = 8,
    /// Enumeration
    Enum = 9,
    /// Array of 8-bit signed elements
    ByteArray = 11,
    /// Array of 8-bit unsigned elements
    UByteArray = 12,
    /// Array of 16-bit signed elements
    ShortArray = 13,
    /// Array of 16-bit unsigned elements
    UShortArray = 14,
    /// Array of 32-bit signed elements
    IntArray = 15,
    /// Array of 32-bit unsigned elements
    UIntArray = 16,
    /// Array of 32-bit float elements
    FloatArray = 17,
    /// Array of 64-bit float elements
    DoubleArray = 18,
}

impl MarshalTag {
    /// The wire value of this tag.
    #[must_use]
    pub fn wire_value(self) -> u8 {
        self as u8
    }
}

/// Classify a value by its type descriptor.
///
/// `None` input (a null value) yields [`MarshalTag::None`], distinct from every
/// other tag. Classification is derived fresh on every call and depends only on
/// the descriptor, so every value sharing a runtime type gets the same tag.
///
/// # Examples
///
/// ```rust
/// use hostbridge::marshal::{classify, MarshalTag};
/// use hostbridge::runtime::typedesc::{ElementKind, TypeDesc};
///
/// assert_eq!(classify(None), MarshalTag::None);
/// assert_eq!(classify(Some(&TypeDesc::primitive(ElementKind::I4))), MarshalTag::Int);
///
/// let bytes = TypeDesc::sz_array(TypeDesc::primitive(ElementKind::U1));
/// assert_eq!(classify(Some(&bytes)), MarshalTag::UByteArray);
/// ```
#[must_use]
pub fn classify(desc: Option<&TypeDesc>) -> MarshalTag {
    let Some(desc) = desc else {
        return MarshalTag::None;
    };

    match desc.kind {
        ElementKind::Boolean => MarshalTag::Bool,
        ElementKind::I1
        | ElementKind::U1
        | ElementKind::I2
        | ElementKind::U2
        | ElementKind::I4
        | ElementKind::U4
        | ElementKind::I8
        | ElementKind::U8 => MarshalTag::Int,
        ElementKind::R4 | ElementKind::R8 => MarshalTag::Float,
        ElementKind::String => MarshalTag::String,
        ElementKind::SzArray => classify_array(desc),
        _ => classify_structural(desc),
    }
}

/// Typed-array tag by element kind; any other element shape decodes as an opaque
/// object, arrays-of-arrays and arrays-of-objects included.
fn classify_array(desc: &TypeDesc) -> MarshalTag {
    let Some(element) = desc.element.as_deref() else {
        return MarshalTag::Object;
    };
    match element.kind {
        ElementKind::U1 => MarshalTag::UByteArray,
        ElementKind::I1 => MarshalTag::ByteArray,
        ElementKind::U2 => MarshalTag::UShortArray,
        ElementKind::I2 => MarshalTag::ShortArray,
        ElementKind::U4 => MarshalTag::UIntArray,
        ElementKind::I4 => MarshalTag::IntArray,
        ElementKind::R4 => MarshalTag::FloatArray,
        ElementKind::R8 => MarshalTag::DoubleArray,
        _ => MarshalTag::Object,
    }
}

/// The ordered structural checks. A value can satisfy several of these predicates
/// at once; the order resolves the overlaps.
fn classify_structural(desc: &TypeDesc) -> MarshalTag {
    if desc.is_enum {
        return MarshalTag::Enum;
    }
    if !desc.is_reference {
        return MarshalTag::ValueType;
    }
    if desc.is_delegate {
        return MarshalTag::Delegate;
    }
    if is_task_shape(desc) {
        return MarshalTag::Task;
    }
    MarshalTag::Object
}

/// The two recognized asynchronous-result shapes, matched by namespace and exact
/// name: the non-generic form and the single-type-argument generic form.
fn is_task_shape(desc: &TypeDesc) -> bool {
    desc.namespace == TASK_NAMESPACE && (desc.name == "Task" || desc.name == "Task`1")
}
