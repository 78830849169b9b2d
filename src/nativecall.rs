//! Native call resolution without a dynamic loader.
//!
//! The runtime resolves native libraries and symbols against compiled-in tables
//! instead of a filesystem loader: [`NativeCallResolver::resolve_library`] stands in
//! for `dlopen`, [`NativeCallResolver::resolve_symbol`] for `dlsym`. Both are pure
//! lookups; a miss is an expected outcome surfaced to the runtime's own fallback
//! chain, not an error.

/// Opaque native entry point stored in the compiled-in tables.
///
/// The embedder casts to the true signature at the call boundary; this crate only
/// stores and returns the pointer.
pub type RawNativeFn = fn();

/// A named native function within a library table.
#[derive(Debug, Clone, Copy)]
pub struct NativeSymbol {
    /// Symbol name, matched case-sensitively
    pub name: &'static str,
    /// The entry point
    pub func: RawNativeFn,
}

/// A compiled-in native library: a name and its symbol table.
#[derive(Debug, Clone, Copy)]
pub struct NativeLibrary {
    /// Library name, matched case-sensitively
    pub name: &'static str,
    /// The symbol table; keys are unique
    pub symbols: &'static [NativeSymbol],
}

/// Name-indexed lookup over a small fixed set of compiled-in libraries.
///
/// # Examples
///
/// ```rust
/// use hostbridge::nativecall::{NativeCallResolver, NativeLibrary, NativeSymbol};
///
/// fn getpid_stub() {}
///
/// static LIBC: &[NativeSymbol] = &[NativeSymbol { name: "getpid", func: getpid_stub }];
/// static LIBRARIES: &[NativeLibrary] = &[NativeLibrary { name: "libc", symbols: LIBC }];
///
/// let resolver = NativeCallResolver::new(LIBRARIES);
/// let lib = resolver.resolve_library("libc").unwrap();
/// assert!(resolver.resolve_symbol(lib, "getpid").is_some());
/// assert!(resolver.resolve_symbol(lib, "fork").is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NativeCallResolver {
    libraries: &'static [NativeLibrary],
}

impl NativeCallResolver {
    /// Creates a resolver over the given compiled-in library set.
    #[must_use]
    pub const fn new(libraries: &'static [NativeLibrary]) -> Self {
        NativeCallResolver { libraries }
    }

    /// Resolve a library by name: linear scan, case-sensitive exact match, first
    /// match wins. `None` is a valid, expected outcome.
    #[must_use]
    pub fn resolve_library(&self, name: &str) -> Option<&'static NativeLibrary> {
        self.libraries.iter().find(|lib| lib.name == name)
    }

    /// Resolve a symbol within a library table: linear scan, first match wins.
    /// `None` is a valid, expected outcome.
    #[must_use]
    pub fn resolve_symbol(&self, library: &NativeLibrary, name: &str) -> Option<RawNativeFn> {
        library
            .symbols
            .iter()
            .find(|sym| sym.name == name)
            .map(|sym| sym.func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub_a() {}
    fn stub_b() {}

    static SYMS: &[NativeSymbol] = &[
        NativeSymbol {
            name: "alpha",
            func: stub_a,
        },
        NativeSymbol {
            name: "beta",
            func: stub_b,
        },
    ];
    static LIBRARIES: &[NativeLibrary] = &[
        NativeLibrary {
            name: "libSystem.Native",
            symbols: SYMS,
        },
        NativeLibrary {
            name: "libSystem.Globalization.Native",
            symbols: &[],
        },
    ];

    #[test]
    fn test_resolve_library_exact_match() {
        let resolver = NativeCallResolver::new(LIBRARIES);
        assert!(resolver.resolve_library("libSystem.Native").is_some());
        assert!(resolver.resolve_library("libsystem.native").is_none());
        assert!(resolver.resolve_library("libMissing").is_none());
    }

    #[test]
    fn test_resolve_symbol() {
        let resolver = NativeCallResolver::new(LIBRARIES);
        let lib = resolver.resolve_library("libSystem.Native").unwrap();
        assert!(resolver.resolve_symbol(lib, "alpha").is_some());
        assert!(resolver.resolve_symbol(lib, "beta").is_some());
        assert!(resolver.resolve_symbol(lib, "gamma").is_none());
    }

    #[test]
    fn test_empty_symbol_table() {
        let resolver = NativeCallResolver::new(LIBRARIES);
        let lib = resolver
            .resolve_library("libSystem.Globalization.Native")
            .unwrap();
        assert!(resolver.resolve_symbol(lib, "anything").is_none());
    }

    #[test]
    fn test_lookup_has_no_side_effects() {
        let resolver = NativeCallResolver::new(LIBRARIES);
        let lib = resolver.resolve_library("libSystem.Native").unwrap();
        let first = resolver.resolve_symbol(lib, "alpha");
        let second = resolver.resolve_symbol(lib, "alpha");
        assert_eq!(first.is_some(), second.is_some());
    }
}
