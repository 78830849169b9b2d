//! The fixed capability interface to the managed runtime.
//!
//! The runtime proper (class loader, JIT/interpreter, GC) is an external collaborator.
//! Everything the boundary needs from it is expressed on the [`ManagedRuntime`] trait:
//! opaque handles come in, opaque handles go out, and no runtime-internal state ever
//! crosses into this crate. Embedders implement the trait once; tests implement it
//! with an in-memory mock.
//!
//! # Handles
//!
//! Handles are opaque 64-bit identities minted by the runtime implementation. A null
//! reference is always `Option::None`, never a zero handle - the boundary does not
//! use sentinel values.
//!
//! # Key Components
//!
//! - [`ManagedRuntime`] - the capability trait
//! - [`ScalarValue`] - unboxed primitive payloads
//! - [`LogRecord`] / [`default_log_sink`] - runtime log routing, including the fatal abort path
//! - [`InitFlags`] - runtime bootstrap options

pub mod typedesc;

use bitflags::bitflags;
use widestring::U16Str;

use crate::{
    bundle::BundleSnapshot,
    icall::IcallTable,
    nativecall::{NativeCallResolver, RawNativeFn},
    runtime::typedesc::{ElementKind, TypeDesc},
    Result,
};

macro_rules! handle_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $name(pub u64);
    };
}

handle_type!(
    /// Handle to the root execution context created once at runtime start
    DomainHandle
);
handle_type!(
    /// Handle to a loaded assembly
    AssemblyHandle
);
handle_type!(
    /// Handle to a managed class
    ClassHandle
);
handle_type!(
    /// Handle to a managed method
    MethodHandle
);
handle_type!(
    /// Handle to a managed object
    ObjectHandle
);
handle_type!(
    /// Handle to a managed string
    StringHandle
);
handle_type!(
    /// Handle to a managed array
    ArrayHandle
);

impl From<StringHandle> for ObjectHandle {
    fn from(s: StringHandle) -> Self {
        ObjectHandle(s.0)
    }
}

impl From<ArrayHandle> for ObjectHandle {
    fn from(a: ArrayHandle) -> Self {
        ObjectHandle(a.0)
    }
}

bitflags! {
    /// Options for runtime bootstrap.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct InitFlags: u32 {
        /// Enable the runtime's debugging support
        const ENABLE_DEBUGGING = 1;
        /// Internal calls are resolved through the compiled-in token index
        const LINK_ICALLS = 1 << 1;
        /// Ahead-of-time compiled modules are registered at start
        const AOT = 1 << 2;
    }
}

/// Unboxed payload of a boxed primitive value.
///
/// Produced by [`ManagedRuntime::unbox`]. `Other` covers every shape the unboxing
/// accessors refuse to touch (structs, pointers, and so on); the element kind is
/// kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    /// Boolean value
    Boolean(bool),
    /// 8-bit signed integer
    I1(i8),
    /// 8-bit unsigned integer
    U1(u8),
    /// 16-bit signed integer
    I2(i16),
    /// 16-bit unsigned integer
    U2(u16),
    /// 32-bit signed integer
    I4(i32),
    /// 32-bit unsigned integer
    U4(u32),
    /// 64-bit signed integer
    I8(i64),
    /// 64-bit unsigned integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// Any other shape, with its element kind
    Other(ElementKind),
}

impl ScalarValue {
    /// The element kind this payload was unboxed from.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            ScalarValue::Boolean(_) => ElementKind::Boolean,
            ScalarValue::I1(_) => ElementKind::I1,
            ScalarValue::U1(_) => ElementKind::U1,
            ScalarValue::I2(_) => ElementKind::I2,
            ScalarValue::U2(_) => ElementKind::U2,
            ScalarValue::I4(_) => ElementKind::I4,
            ScalarValue::U4(_) => ElementKind::U4,
            ScalarValue::I8(_) => ElementKind::I8,
            ScalarValue::U8(_) => ElementKind::U8,
            ScalarValue::R4(_) => ElementKind::R4,
            ScalarValue::R8(_) => ElementKind::R8,
            ScalarValue::Other(kind) => *kind,
        }
    }
}

/// A log record emitted by the runtime.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    /// Subsystem the record originates from
    pub domain: &'a str,
    /// Severity as reported by the runtime ("error", "warning", "info", ...)
    pub level: &'a str,
    /// The message text
    pub message: &'a str,
    /// Fatal records abort the process after printing
    pub fatal: bool,
}

/// Sink installed into the runtime's logging callback at start.
pub type LogSink = fn(&LogRecord<'_>);

/// Routes runtime log records through the `log` facade.
///
/// A fatal record is the runtime's only unrecoverable-error signal: the message is
/// printed to stderr and the process aborts immediately, with no unwinding and no
/// partial recovery. Every other record maps onto the matching `log` level.
pub fn default_log_sink(record: &LogRecord<'_>) {
    if record.fatal {
        eprintln!("{}", record.message);
        std::process::abort();
    }
    let target = record.domain;
    match record.level {
        "error" | "critical" => log::error!(target: "hostbridge::runtime", "[{target}] {}", record.message),
        "warning" => log::warn!(target: "hostbridge::runtime", "[{target}] {}", record.message),
        "debug" => log::debug!(target: "hostbridge::runtime", "[{target}] {}", record.message),
        _ => log::info!(target: "hostbridge::runtime", "[{target}] {}", record.message),
    }
}

/// Raw result of a reflection invoke: at most one of `result`/`exception` is
/// meaningful, and `exception` wins when both are set.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawInvoke {
    /// The raw return slot; undefined for void methods
    pub result: Option<ObjectHandle>,
    /// The thrown exception object, if any
    pub exception: Option<ObjectHandle>,
}

/// The fixed capability interface to the managed runtime.
///
/// All operations are synchronous and single-threaded; the trait requires `&self`
/// only, leaving interior state management to the implementation.
pub trait ManagedRuntime {
    /// Set a process-wide environment variable, overwriting any existing value.
    fn set_env(&self, name: &str, value: &str);

    /// Set a process-wide environment variable only if it is not already set.
    fn set_env_default(&self, name: &str, value: &str);

    /// Hand the finalized assembly bundle to the runtime's bundled-assembly loader.
    ///
    /// Called exactly once, at start.
    fn register_bundled_assemblies(&self, bundle: BundleSnapshot);

    /// Register debug symbol data for the named assembly.
    fn register_debug_symbols(&self, assembly_name: &str, data: &[u8]);

    /// Register a named internal call implementation.
    fn add_internal_call(&self, name: &str, func: RawNativeFn);

    /// Install the native-call fallback tables.
    ///
    /// The runtime consults the resolver in place of a dynamic loader whenever
    /// managed code performs a native call.
    fn install_native_fallback(&self, resolver: NativeCallResolver);

    /// Install the token-indexed internal-call dispatcher.
    ///
    /// The runtime consults the table before falling back to name-based
    /// resolution.
    fn install_icall_table(&self, table: IcallTable);

    /// Install the log sink the runtime reports through.
    fn install_log_sink(&self, sink: LogSink);

    /// Supply the argument vector for a subsequent entry-point invocation.
    fn set_main_args(&self, args: &[String]);

    /// Bootstrap the runtime and return the root execution context.
    ///
    /// # Errors
    /// Returns [`crate::Error::RuntimeInit`] if the runtime fails to start.
    fn init(&self, flags: InitFlags) -> Result<DomainHandle>;

    /// Load an assembly by name. `None` means the assembly is unknown.
    fn assembly_load(&self, name: &str) -> Option<AssemblyHandle>;

    /// Look up a class by namespace and name within an assembly.
    fn class_from_name(
        &self,
        assembly: AssemblyHandle,
        namespace: &str,
        name: &str,
    ) -> Option<ClassHandle>;

    /// Look up a method by name and argument count. Overload selection is by
    /// argument count only.
    fn method_from_name(
        &self,
        class: ClassHandle,
        name: &str,
        arg_count: i32,
    ) -> Option<MethodHandle>;

    /// The entry-point method of an assembly, if it has one.
    fn entry_point(&self, assembly: AssemblyHandle) -> Option<MethodHandle>;

    /// Invoke a method through the runtime's reflection capability.
    fn reflection_invoke(
        &self,
        method: MethodHandle,
        receiver: Option<ObjectHandle>,
        args: &[Option<ObjectHandle>],
    ) -> RawInvoke;

    /// Stringify an object via its managed `ToString`.
    ///
    /// # Errors
    /// Returns the secondary exception object if stringification itself throws.
    fn try_to_string(&self, obj: ObjectHandle) -> std::result::Result<StringHandle, ObjectHandle>;

    /// The declared return kind of a method.
    fn method_return_kind(&self, method: MethodHandle) -> ElementKind;

    /// The type descriptor of a value.
    fn type_of(&self, obj: ObjectHandle) -> TypeDesc;

    /// Unbox a boxed primitive into its scalar payload.
    fn unbox(&self, obj: ObjectHandle) -> ScalarValue;

    /// Allocate a managed string from UTF-8 text.
    fn string_new(&self, domain: DomainHandle, text: &str) -> StringHandle;

    /// Allocate a managed string from UTF-16 text.
    fn string_from_utf16(&self, domain: DomainHandle, text: &U16Str) -> StringHandle;

    /// Decode a managed string into owned UTF-8 text.
    fn string_to_utf8(&self, s: StringHandle) -> String;

    /// Number of elements in an array.
    fn array_length(&self, array: ArrayHandle) -> usize;

    /// Element at `index`. Bounds are enforced by the runtime itself.
    fn array_get(&self, array: ArrayHandle, index: usize) -> Option<ObjectHandle>;

    /// Allocate a new object array of the given length.
    fn array_new_object(&self, domain: DomainHandle, len: usize) -> ArrayHandle;

    /// Allocate a new string array of the given length.
    fn array_new_string(&self, domain: DomainHandle, len: usize) -> ArrayHandle;

    /// Store a reference into an object array through the runtime's reference-write
    /// path, preserving the collector's write-barrier invariants.
    fn array_store_ref(&self, array: ArrayHandle, index: usize, value: Option<ObjectHandle>);
}
