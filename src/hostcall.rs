//! Synchronous bridge into the host's expression evaluator.
//!
//! Managed code hands a string expression to the host, which evaluates it and
//! returns its stringified result or a thrown error. The call is fully blocking
//! from the runtime's point of view: the host cannot interleave its own
//! asynchronous work while it runs.
//!
//! Text crosses the boundary in the host's native encodings: UTF-8 on the way in,
//! 2-byte-per-unit UTF-16 on the way back. All buffers are owned values released
//! on every exit path, the exception paths included.

use widestring::U16String;

use crate::runtime::{DomainHandle, ManagedRuntime, StringHandle};

/// Substituted when the thrown host value has no string form.
pub const UNKNOWN_EXCEPTION_MESSAGE: &str = "unknown exception";

/// A value produced by the host evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostValue {
    /// The host produced no value (`null`/`undefined`)
    Undefined,
    /// The stringified result, in the host's UTF-16 text form
    Text(U16String),
}

/// An error thrown by the host evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostThrown {
    /// Stringified form of the thrown value; `None` when it has no string form
    pub text: Option<U16String>,
}

/// The host's expression evaluator capability.
///
/// The call is synchronous and non-suspending: it either returns a value or
/// throws. Stringification of non-null results is the host's responsibility;
/// [`HostValue::Text`] is already the final text.
pub trait HostEvaluator {
    /// Evaluate `expression` and return its stringified result.
    fn eval(&self, expression: &str) -> Result<HostValue, HostThrown>;
}

/// Outcome of one host-eval round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvalOutcome {
    /// The host returned; `None` when it produced no value
    Value(Option<StringHandle>),
    /// The host threw; the handle is the stringified error
    Threw(StringHandle),
}

impl HostEvalOutcome {
    /// True if the host threw.
    #[must_use]
    pub fn is_exception(&self) -> bool {
        matches!(self, HostEvalOutcome::Threw(_))
    }
}

/// Hand a managed string to the host evaluator and marshal the result back.
///
/// A `None` expression is a no-op yielding `Value(None)`. Otherwise the managed
/// string is decoded to UTF-8, evaluated, and the host's UTF-16 result is decoded
/// into a fresh managed string. A thrown host value with no string form becomes
/// the fixed [`UNKNOWN_EXCEPTION_MESSAGE`].
pub fn eval_on_host<R, H>(
    runtime: &R,
    root: DomainHandle,
    host: &H,
    expression: Option<StringHandle>,
) -> HostEvalOutcome
where
    R: ManagedRuntime + ?Sized,
    H: HostEvaluator + ?Sized,
{
    let Some(expression) = expression else {
        return HostEvalOutcome::Value(None);
    };

    let native = runtime.string_to_utf8(expression);
    match host.eval(&native) {
        Ok(HostValue::Undefined) => HostEvalOutcome::Value(None),
        Ok(HostValue::Text(text)) => {
            HostEvalOutcome::Value(Some(runtime.string_from_utf16(root, &text)))
        }
        Err(thrown) => {
            let text = thrown
                .text
                .unwrap_or_else(|| U16String::from_str(UNKNOWN_EXCEPTION_MESSAGE));
            HostEvalOutcome::Threw(runtime.string_from_utf16(root, &text))
        }
    }
}
