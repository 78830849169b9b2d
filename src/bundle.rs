//! In-memory assembly bundle registry.
//!
//! Bundled assemblies are supplied to the runtime from memory instead of from a
//! filesystem. The [`BundleRegistry`] collects them during the single-threaded
//! registration phase before runtime start; [`BundleRegistry::finalize`] transitions
//! to an immutable [`BundleSnapshot`] exactly once (enforced by move), which the
//! runtime's bundled-assembly loader consumes.
//!
//! Names carrying the debug-symbol suffix are not bundled: registration derives the
//! companion binary name and returns the data for delegation to the runtime's symbol
//! loader instead.

use std::sync::Arc;

/// File suffix identifying debug-symbol companions.
pub const DEBUG_SYMBOL_SUFFIX: &str = ".pdb";

/// A managed binary supplied to the runtime from memory.
#[derive(Debug, Clone)]
pub struct BundledAssembly {
    /// Assembly file name, e.g. `"mscorlib.dll"`
    pub name: String,
    /// The raw assembly image; never mutated after registration
    pub data: Arc<[u8]>,
}

impl BundledAssembly {
    /// Size of the assembly image in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Outcome of a single registration call.
#[derive(Debug, Clone)]
pub enum Registration {
    /// The entry was appended to the bundle list
    Bundled,
    /// The name carried the debug-symbol suffix; the data belongs to the runtime's
    /// symbol loader, keyed by the companion binary name
    DebugSymbols {
        /// Name of the binary these symbols describe, e.g. `"Foo.dll"`
        assembly_name: String,
        /// The raw symbol data
        data: Arc<[u8]>,
    },
}

/// Append-only registry of bundled assemblies, alive only until runtime start.
///
/// Duplicate names are preserved in registration order; the registry performs no
/// dedup. There is no unregister operation.
///
/// # Examples
///
/// ```rust
/// use hostbridge::bundle::BundleRegistry;
///
/// let mut registry = BundleRegistry::new();
/// registry.register("Foo.dll", vec![0u8; 500]);
/// let bundle = registry.finalize();
/// assert_eq!(bundle.assemblies().len(), 1);
/// assert_eq!(bundle.assemblies()[0].name, "Foo.dll");
/// ```
#[derive(Debug, Default)]
pub struct BundleRegistry {
    assemblies: Vec<BundledAssembly>,
}

impl BundleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        BundleRegistry::default()
    }

    /// Number of assemblies registered so far (symbol files excluded).
    #[must_use]
    pub fn count(&self) -> usize {
        self.assemblies.len()
    }

    /// Register a named binary.
    ///
    /// If `name` ends with the debug-symbol suffix (ASCII case-insensitive), nothing
    /// is bundled; the returned [`Registration::DebugSymbols`] names the companion
    /// binary the caller must route the data to. Otherwise the entry is appended to
    /// the bundle list.
    pub fn register(&mut self, name: &str, data: impl Into<Arc<[u8]>>) -> Registration {
        let data = data.into();
        if let Some(assembly_name) = debug_symbol_companion(name) {
            return Registration::DebugSymbols {
                assembly_name,
                data,
            };
        }
        self.assemblies.push(BundledAssembly {
            name: name.to_string(),
            data,
        });
        Registration::Bundled
    }

    /// Transition to the immutable snapshot consumed by runtime bootstrap.
    ///
    /// Consumes the registry; the registration phase is over.
    #[must_use]
    pub fn finalize(self) -> BundleSnapshot {
        BundleSnapshot {
            assemblies: self.assemblies.into_boxed_slice(),
        }
    }
}

/// Immutable, finalized sequence of bundled assemblies in registration order.
#[derive(Debug)]
pub struct BundleSnapshot {
    assemblies: Box<[BundledAssembly]>,
}

impl BundleSnapshot {
    /// The bundled assemblies, in registration order.
    #[must_use]
    pub fn assemblies(&self) -> &[BundledAssembly] {
        &self.assemblies
    }

    /// True if no assemblies were registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assemblies.is_empty()
    }
}

/// Derive the companion binary name for a debug-symbol file name.
///
/// `"Foo.pdb"` becomes `"Foo.dll"`; the suffix match is ASCII case-insensitive.
/// Returns `None` when `name` does not carry the suffix.
#[must_use]
pub fn debug_symbol_companion(name: &str) -> Option<String> {
    if name.len() < DEBUG_SYMBOL_SUFFIX.len() {
        return None;
    }
    let (stem, suffix) = name.split_at(name.len() - DEBUG_SYMBOL_SUFFIX.len());
    if !suffix.eq_ignore_ascii_case(DEBUG_SYMBOL_SUFFIX) {
        return None;
    }
    Some(format!("{stem}.dll"))
}
