//! The host-facing boundary surface.
//!
//! [`Boundary`] owns the pieces of the interop layer - bundle registry, native call
//! resolver, internal-call dispatcher - together with the runtime and host
//! capabilities, and exposes the operations the host drives: assembly registration,
//! runtime start, load/find/invoke, string conversion, value classification, and
//! the unboxing and array accessors.
//!
//! The root execution context is created once by [`Boundary::load_runtime`] and held
//! here as an explicit value; there is no process-wide global. Everything is
//! single-threaded and synchronous: registration precedes start, and every
//! operation either completes or returns an error/exception-tagged result.

use crate::{
    bundle::{BundleRegistry, Registration},
    hostcall::{self, HostEvalOutcome, HostEvaluator},
    icall::{IcallTable, IcallTarget},
    invoke::{self, InvokeOutcome},
    marshal::{classify, MarshalTag},
    nativecall::{NativeCallResolver, NativeLibrary, RawNativeFn},
    runtime::{
        default_log_sink, typedesc::ElementKind, ArrayHandle, AssemblyHandle, ClassHandle,
        DomainHandle, InitFlags, ManagedRuntime, MethodHandle, ObjectHandle, ScalarValue,
        StringHandle,
    },
    token::Token,
    Error, Result,
};

/// Environment variable naming the runtime's log level; defaulted at start.
const LOG_LEVEL_ENV: &str = "HOSTBRIDGE_LOG_LEVEL";
/// Environment variable naming the runtime's log mask; defaulted at start.
const LOG_MASK_ENV: &str = "HOSTBRIDGE_LOG_MASK";
/// Environment variable naming the managed assembly probing path.
const MANAGED_PATH_ENV: &str = "HOSTBRIDGE_MANAGED_PATH";

/// The marshalling and dispatch boundary between the managed runtime and the host.
///
/// Created with the runtime and host capabilities plus the compiled-in native call
/// and internal-call tables. Lives through two phases: a registration phase
/// ([`Boundary::add_assembly`], [`Boundary::set_env`]) and, after
/// [`Boundary::load_runtime`], the interop phase.
///
/// # Examples
///
/// ```rust,ignore
/// use hostbridge::boundary::Boundary;
///
/// let mut boundary = Boundary::new(runtime, host, natives, icalls);
/// boundary.add_assembly("App.dll", image)?;
/// boundary.load_runtime("managed", false)?;
///
/// let asm = boundary.assembly_load(Some("App")).unwrap();
/// let class = boundary.assembly_find_class(asm, "App", "Program").unwrap();
/// let main = boundary.assembly_find_method(class, "Main", 0).unwrap();
/// let outcome = boundary.invoke_method(main, None, &[])?;
/// ```
#[derive(Debug)]
pub struct Boundary<R, H> {
    runtime: R,
    host: H,
    natives: NativeCallResolver,
    icalls: IcallTable,
    registry: Option<BundleRegistry>,
    root: Option<DomainHandle>,
}

impl<R: ManagedRuntime, H: HostEvaluator> Boundary<R, H> {
    /// Creates a boundary in the registration phase.
    #[must_use]
    pub fn new(runtime: R, host: H, natives: NativeCallResolver, icalls: IcallTable) -> Self {
        Boundary {
            runtime,
            host,
            natives,
            icalls,
            registry: Some(BundleRegistry::new()),
            root: None,
        }
    }

    /// The runtime capability.
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// The root execution context, once the runtime is loaded.
    #[must_use]
    pub fn root(&self) -> Option<DomainHandle> {
        self.root
    }

    fn require_root(&self) -> Result<DomainHandle> {
        self.root.ok_or(Error::RuntimeNotLoaded)
    }

    // ---- registration phase ----------------------------------------------------

    /// Register a named binary for bundling.
    ///
    /// Debug-symbol files are not bundled; their data is delegated to the runtime's
    /// symbol loader under the companion binary name.
    ///
    /// # Errors
    /// Returns [`Error::AlreadyLoaded`] once the runtime has started.
    pub fn add_assembly(&mut self, name: &str, data: impl Into<std::sync::Arc<[u8]>>) -> Result<()> {
        let registry = self.registry.as_mut().ok_or(Error::AlreadyLoaded)?;
        if let Registration::DebugSymbols {
            assembly_name,
            data,
        } = registry.register(name, data)
        {
            self.runtime.register_debug_symbols(&assembly_name, &data);
        }
        Ok(())
    }

    /// Set a process-wide environment variable, overwriting any existing value.
    pub fn set_env(&self, name: &str, value: &str) {
        self.runtime.set_env(name, value);
    }

    /// Supply the argument vector for a subsequent entry-point invocation.
    pub fn set_main_args(&self, args: &[String]) {
        self.runtime.set_main_args(args);
    }

    /// Register a named internal call implementation with the runtime.
    pub fn register_internal_call(&self, name: &str, func: RawNativeFn) {
        self.runtime.add_internal_call(name, func);
    }

    /// Start the managed runtime.
    ///
    /// Installs the native-call fallback and internal-call dispatch tables the
    /// runtime consults for native calls, finalizes the bundle registry (exactly
    /// once), hands the snapshot to the runtime's bundled-assembly loader,
    /// installs the log sink, and creates the root execution context. Log-level
    /// environment defaults are applied without overwriting values the embedder
    /// already set.
    ///
    /// # Errors
    /// Returns [`Error::AlreadyLoaded`] on a second call, or
    /// [`Error::RuntimeInit`] if runtime bootstrap fails.
    pub fn load_runtime(&mut self, managed_path: &str, debug: bool) -> Result<()> {
        let registry = self.registry.take().ok_or(Error::AlreadyLoaded)?;

        self.runtime.set_env_default(LOG_LEVEL_ENV, "debug");
        self.runtime.set_env_default(LOG_MASK_ENV, "gc");
        self.runtime.set_env_default(MANAGED_PATH_ENV, managed_path);

        self.runtime.install_native_fallback(self.natives);
        self.runtime.install_icall_table(self.icalls);

        let bundle = registry.finalize();
        if !bundle.is_empty() {
            self.runtime.register_bundled_assemblies(bundle);
        }

        self.runtime.install_log_sink(default_log_sink);

        let mut flags = InitFlags::LINK_ICALLS;
        if debug {
            flags |= InitFlags::ENABLE_DEBUGGING;
        }
        self.root = Some(self.runtime.init(flags)?);
        Ok(())
    }

    // ---- native call dispatch (runtime callbacks) ------------------------------

    /// Resolve a native library by name. Not-found feeds the runtime's fallback
    /// chain.
    #[must_use]
    pub fn resolve_library(&self, name: &str) -> Option<&'static NativeLibrary> {
        self.natives.resolve_library(name)
    }

    /// Resolve a symbol within a native library table.
    #[must_use]
    pub fn resolve_symbol(&self, library: &NativeLibrary, name: &str) -> Option<RawNativeFn> {
        self.natives.resolve_symbol(library, name)
    }

    /// Resolve an internal call by MethodDef token. A miss sends the runtime to
    /// name-based resolution.
    #[must_use]
    pub fn icall_lookup(&self, token: Token, module_name: &str) -> Option<IcallTarget> {
        self.icalls.lookup(token, module_name)
    }

    /// Reverse internal-call lookup.
    ///
    /// # Errors
    /// Always [`Error::NotSupported`] in this build configuration.
    pub fn icall_symbol_for(&self, func: RawNativeFn) -> Result<&'static str> {
        self.icalls.symbol_for(func)
    }

    // ---- interop phase ---------------------------------------------------------

    /// Load an assembly by name. A `None` name is a no-op returning `None`.
    #[must_use]
    pub fn assembly_load(&self, name: Option<&str>) -> Option<AssemblyHandle> {
        self.runtime.assembly_load(name?)
    }

    /// Find a class by namespace and name within an assembly.
    #[must_use]
    pub fn assembly_find_class(
        &self,
        assembly: AssemblyHandle,
        namespace: &str,
        name: &str,
    ) -> Option<ClassHandle> {
        self.runtime.class_from_name(assembly, namespace, name)
    }

    /// Find a method by name and argument count. Overload selection is by
    /// argument count only.
    #[must_use]
    pub fn assembly_find_method(
        &self,
        class: ClassHandle,
        name: &str,
        arg_count: i32,
    ) -> Option<MethodHandle> {
        self.runtime.method_from_name(class, name, arg_count)
    }

    /// The entry-point method of an assembly, if it has one.
    #[must_use]
    pub fn assembly_get_entry_point(&self, assembly: AssemblyHandle) -> Option<MethodHandle> {
        self.runtime.entry_point(assembly)
    }

    /// Invoke a managed method, capturing any exception as a stringified result.
    ///
    /// # Errors
    /// Returns [`Error::RuntimeNotLoaded`] before [`Boundary::load_runtime`].
    pub fn invoke_method(
        &self,
        method: MethodHandle,
        receiver: Option<ObjectHandle>,
        args: &[Option<ObjectHandle>],
    ) -> Result<InvokeOutcome> {
        let root = self.require_root()?;
        Ok(invoke::invoke(&self.runtime, root, method, receiver, args))
    }

    /// Evaluate an expression on the host, marshalling text both ways.
    ///
    /// # Errors
    /// Returns [`Error::RuntimeNotLoaded`] before [`Boundary::load_runtime`].
    pub fn eval_on_host(&self, expression: Option<StringHandle>) -> Result<HostEvalOutcome> {
        let root = self.require_root()?;
        Ok(hostcall::eval_on_host(
            &self.runtime,
            root,
            &self.host,
            expression,
        ))
    }

    // ---- strings ---------------------------------------------------------------

    /// Decode a managed string into owned UTF-8 text.
    #[must_use]
    pub fn string_get_utf8(&self, s: StringHandle) -> String {
        self.runtime.string_to_utf8(s)
    }

    /// Allocate a managed string from host-supplied UTF-8 text.
    ///
    /// # Errors
    /// Returns [`Error::RuntimeNotLoaded`] before [`Boundary::load_runtime`].
    pub fn string_from_host(&self, text: &str) -> Result<StringHandle> {
        let root = self.require_root()?;
        Ok(self.runtime.string_new(root, text))
    }

    // ---- classification --------------------------------------------------------

    /// Classify a value for host decoding. Null classifies as [`MarshalTag::None`].
    #[must_use]
    pub fn get_obj_type(&self, obj: Option<ObjectHandle>) -> MarshalTag {
        let desc = obj.map(|o| self.runtime.type_of(o));
        classify(desc.as_ref())
    }

    // ---- unboxing and array accessors ------------------------------------------

    /// Unbox a boxed value into the host integer channel.
    ///
    /// Supports boolean and the 8/16/32-bit widths. 64-bit integers cannot cross
    /// the host numeric channel; like every other unsupported shape, they log an
    /// error and yield 0 rather than a silently truncated value. Null yields 0.
    #[must_use]
    pub fn unbox_int(&self, obj: Option<ObjectHandle>) -> i32 {
        let Some(obj) = obj else { return 0 };
        match self.try_unbox_int(obj) {
            Ok(value) => value,
            Err(err) => {
                log::error!("unbox_int: {err}");
                0
            }
        }
    }

    /// Typed variant of [`Boundary::unbox_int`].
    ///
    /// # Errors
    /// Returns [`Error::Unrepresentable`] for 64-bit integers and
    /// [`Error::TypeMismatch`] for every non-integer shape.
    pub fn try_unbox_int(&self, obj: ObjectHandle) -> Result<i32> {
        match self.runtime.unbox(obj) {
            ScalarValue::Boolean(v) => Ok(i32::from(v)),
            ScalarValue::I1(v) => Ok(i32::from(v)),
            ScalarValue::U1(v) => Ok(i32::from(v)),
            ScalarValue::I2(v) => Ok(i32::from(v)),
            ScalarValue::U2(v) => Ok(i32::from(v)),
            ScalarValue::I4(v) => Ok(v),
            ScalarValue::U4(v) => Ok(v as i32),
            ScalarValue::I8(_) => Err(Error::Unrepresentable(ElementKind::I8)),
            ScalarValue::U8(_) => Err(Error::Unrepresentable(ElementKind::U8)),
            other => Err(Error::TypeMismatch {
                expected: "boolean or 8/16/32-bit integer",
                actual: other.kind(),
            }),
        }
    }

    /// Unbox a boxed value into the host float channel.
    ///
    /// Supports the 32- and 64-bit float widths only; anything else logs an error
    /// and yields 0. Null yields 0.
    #[must_use]
    pub fn unbox_float(&self, obj: Option<ObjectHandle>) -> f64 {
        let Some(obj) = obj else { return 0.0 };
        match self.try_unbox_float(obj) {
            Ok(value) => value,
            Err(err) => {
                log::error!("unbox_float: {err}");
                0.0
            }
        }
    }

    /// Typed variant of [`Boundary::unbox_float`].
    ///
    /// # Errors
    /// Returns [`Error::TypeMismatch`] for every non-float shape.
    pub fn try_unbox_float(&self, obj: ObjectHandle) -> Result<f64> {
        match self.runtime.unbox(obj) {
            ScalarValue::R4(v) => Ok(f64::from(v)),
            ScalarValue::R8(v) => Ok(v),
            other => Err(Error::TypeMismatch {
                expected: "32/64-bit float",
                actual: other.kind(),
            }),
        }
    }

    /// Number of elements in an array.
    #[must_use]
    pub fn array_length(&self, array: ArrayHandle) -> usize {
        self.runtime.array_length(array)
    }

    /// Element at `index`. Bounds are enforced by the runtime itself.
    #[must_use]
    pub fn array_get(&self, array: ArrayHandle, index: usize) -> Option<ObjectHandle> {
        self.runtime.array_get(array, index)
    }

    /// Allocate a new object array of the given length.
    ///
    /// # Errors
    /// Returns [`Error::RuntimeNotLoaded`] before [`Boundary::load_runtime`].
    pub fn obj_array_new(&self, len: usize) -> Result<ArrayHandle> {
        let root = self.require_root()?;
        Ok(self.runtime.array_new_object(root, len))
    }

    /// Store a reference into an object array. Goes through the runtime's
    /// reference-write path so the collector's write-barrier invariants hold.
    pub fn obj_array_set(&self, array: ArrayHandle, index: usize, value: Option<ObjectHandle>) {
        self.runtime.array_store_ref(array, index, value);
    }

    /// Allocate a new string array of the given length.
    ///
    /// # Errors
    /// Returns [`Error::RuntimeNotLoaded`] before [`Boundary::load_runtime`].
    pub fn string_array_new(&self, len: usize) -> Result<ArrayHandle> {
        let root = self.require_root()?;
        Ok(self.runtime.array_new_string(root, len))
    }

    // ---- termination -----------------------------------------------------------

    /// Terminate the process with the given exit code. No cleanup is performed.
    pub fn exit(&self, code: i32) -> ! {
        std::process::exit(code);
    }
}
