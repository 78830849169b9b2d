//! # hostbridge Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! traits from the hostbridge library. Import this module to get quick access to
//! the essential types for driving the managed/host boundary.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all hostbridge operations
pub use crate::Error;

/// The result type used throughout hostbridge
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The host-facing boundary facade
pub use crate::boundary::Boundary;

// ================================================================================================
// Capability Interfaces
// ================================================================================================

/// The managed runtime capability trait and its handle types
pub use crate::runtime::{
    ArrayHandle, AssemblyHandle, ClassHandle, DomainHandle, InitFlags, LogRecord, LogSink,
    ManagedRuntime, MethodHandle, ObjectHandle, RawInvoke, ScalarValue, StringHandle,
};

/// Type descriptors consumed by the marshalling classifier
pub use crate::runtime::typedesc::{ElementKind, TypeDesc};

/// The host evaluator capability and its value shapes
pub use crate::hostcall::{HostEvalOutcome, HostEvaluator, HostThrown, HostValue};

// ================================================================================================
// Dispatch Tables
// ================================================================================================

/// Native call resolution over compiled-in tables
pub use crate::nativecall::{NativeCallResolver, NativeLibrary, NativeSymbol, RawNativeFn};

/// Token-indexed internal-call dispatch
pub use crate::icall::{IcallModule, IcallTable, IcallTarget};

/// Metadata token type
pub use crate::token::Token;

// ================================================================================================
// Marshalling and Invocation
// ================================================================================================

/// Value classification for host decoding
pub use crate::marshal::{classify, MarshalTag};

/// Managed invocation outcomes
pub use crate::invoke::{InvokeOutcome, DOUBLE_FAULT_MESSAGE};

/// Assembly bundling
pub use crate::bundle::{BundleRegistry, BundleSnapshot, BundledAssembly, Registration};
