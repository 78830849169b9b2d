//! The invocation gateway.
//!
//! Invokes a managed method through the runtime's reflection capability and converts
//! the outcome into a host-safe value: a normal return, or a stringified exception.
//! A managed exception never surfaces as a native fault.

use crate::runtime::{
    typedesc::ElementKind, DomainHandle, ManagedRuntime, MethodHandle, ObjectHandle, StringHandle,
};

/// Substituted when stringifying a captured exception itself throws.
pub const DOUBLE_FAULT_MESSAGE: &str = "Exception Double Fault";

/// Outcome of a managed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// The method returned normally; `None` for void methods
    Returned(Option<ObjectHandle>),
    /// The method threw; the handle is the stringified exception
    Threw(StringHandle),
}

impl InvokeOutcome {
    /// True if the invocation raised a managed exception.
    #[must_use]
    pub fn is_exception(&self) -> bool {
        matches!(self, InvokeOutcome::Threw(_))
    }
}

/// Invoke `method` with the given receiver and argument vector.
///
/// On an exception, the exception object is stringified through the runtime's
/// to-string capability; if that secondary call itself throws (the double fault),
/// both exceptions are discarded and the fixed [`DOUBLE_FAULT_MESSAGE`] is returned
/// instead, so the failure is neither swallowed nor allowed to cascade.
///
/// On a normal return from a void method the raw return slot is never read - its
/// contents are undefined - and `Returned(None)` is produced.
pub fn invoke<R: ManagedRuntime + ?Sized>(
    runtime: &R,
    root: DomainHandle,
    method: MethodHandle,
    receiver: Option<ObjectHandle>,
    args: &[Option<ObjectHandle>],
) -> InvokeOutcome {
    let raw = runtime.reflection_invoke(method, receiver, args);

    if let Some(exception) = raw.exception {
        let text = match runtime.try_to_string(exception) {
            Ok(text) => text,
            Err(_second_fault) => runtime.string_new(root, DOUBLE_FAULT_MESSAGE),
        };
        return InvokeOutcome::Threw(text);
    }

    if runtime.method_return_kind(method) == ElementKind::Void {
        return InvokeOutcome::Returned(None);
    }

    InvokeOutcome::Returned(raw.result)
}
