use thiserror::Error;

use crate::runtime::typedesc::ElementKind;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The boundary distinguishes expected absence (lookups returning `Option::None`), captured
/// managed or host exceptions (returned as data, never as an `Error`), and genuine operation
/// failures, which land here. Precondition violations caused by a build-time table mismatch
/// are not representable as errors and panic instead.
///
/// # Error Categories
///
/// ## Lifecycle Errors
/// - [`Error::RuntimeNotLoaded`] - Boundary operation issued before the runtime was started
/// - [`Error::AlreadyLoaded`] - The runtime was started a second time
/// - [`Error::RuntimeInit`] - Runtime bootstrap failure reported by the capability interface
///
/// ## Conversion Errors
/// - [`Error::TypeMismatch`] - A boxed value had the wrong shape for the requested conversion
/// - [`Error::Unrepresentable`] - The value cannot cross the host numeric channel losslessly
///
/// ## Build Configuration
/// - [`Error::NotSupported`] - Operation unavailable in this build configuration
///
/// # Examples
///
/// ```rust
/// use hostbridge::{Error, icall::IcallTable};
///
/// let table = IcallTable::new(&[]);
/// match table.symbol_for(noop as fn()) {
///     Err(Error::NotSupported) => {} // reverse lookup needs symbol data this build lacks
///     _ => unreachable!(),
/// }
/// fn noop() {}
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The operation is not supported in this build configuration.
    ///
    /// Used for the reverse internal-call symbol lookup, which requires symbol
    /// information that stripped builds do not carry. A legitimate design point,
    /// not a table corruption.
    #[error("Operation not supported in this build configuration")]
    NotSupported,

    /// A boundary operation was issued before `load_runtime` completed.
    ///
    /// Invocation, host-eval and accessor operations need the root context
    /// created at runtime start.
    #[error("The managed runtime has not been loaded yet")]
    RuntimeNotLoaded,

    /// `load_runtime` was called a second time.
    ///
    /// The bundle registry is finalized exactly once; a second start has no
    /// well-defined meaning and is rejected.
    #[error("The managed runtime was already loaded")]
    AlreadyLoaded,

    /// A boxed value had the wrong primitive shape for the requested conversion.
    ///
    /// # Fields
    ///
    /// * `expected` - What the converter can handle
    /// * `actual` - The element kind of the value that was supplied
    #[error("Type mismatch - expected {expected}, got {actual:?}")]
    TypeMismatch {
        /// What the converter accepts
        expected: &'static str,
        /// The element kind of the offending value
        actual: ElementKind,
    },

    /// The value cannot be represented on the host numeric channel.
    ///
    /// 64-bit integers are the known case: the host number type cannot carry
    /// them losslessly, so the conversion is refused rather than truncated.
    #[error("Value of kind {0:?} cannot cross the host numeric channel")]
    Unrepresentable(ElementKind),

    /// Runtime bootstrap failed.
    ///
    /// Wraps the diagnostic reported by the runtime's init capability.
    #[error("Runtime initialization failed: {0}")]
    RuntimeInit(String),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories or for wrapping
    /// capability-layer errors with additional context.
    #[error("{0}")]
    Error(String),
}
