//! Internal call dispatch by metadata token.
//!
//! An internal call is a native function the runtime invokes in place of managed
//! bytecode for a specific method. Instead of per-symbol dynamic lookup, the
//! dispatcher binary-searches compiled-in per-module tables keyed by MethodDef
//! token index. A table miss is an expected outcome - the runtime falls back to
//! name-based resolution - but a method whose declaring module has no table at
//! all indicates a build-time mismatch between the tables and the runtime, and
//! panics.

use crate::{
    nativecall::RawNativeFn,
    token::Token,
    Error, Result,
};

/// Compiled-in internal-call index for one source module.
///
/// Three parallel arrays where positions correlate: `token_indexes` holds MethodDef
/// token indices sorted ascending, `uses_handles` the calling-convention flag per
/// entry, `funcs` the native entry point per entry.
#[derive(Debug, Clone, Copy)]
pub struct IcallModule {
    /// Name of the source module these entries belong to
    pub module: &'static str,
    /// MethodDef token indices, sorted ascending
    pub token_indexes: &'static [u32],
    /// Whether the entry uses the indirect ("handle") calling convention
    pub uses_handles: &'static [bool],
    /// Native entry point per entry
    pub funcs: &'static [RawNativeFn],
}

/// A resolved internal-call target.
#[derive(Debug, Clone, Copy)]
pub struct IcallTarget {
    /// The native entry point
    pub func: RawNativeFn,
    /// The entry uses the indirect ("handle") calling convention; threaded back to
    /// the runtime untouched
    pub uses_handles: bool,
}

/// Token-indexed internal-call dispatcher over a fixed set of module tables.
///
/// # Panics
///
/// Construction panics if any module's parallel arrays disagree in length or its
/// index array is not sorted ascending; [`IcallTable::lookup`] panics if the
/// method's declaring module has no table. Both indicate a build-time table
/// mismatch, not a runtime-data condition.
#[derive(Debug, Clone, Copy)]
pub struct IcallTable {
    modules: &'static [IcallModule],
}

impl IcallTable {
    /// Creates a dispatcher over the given module tables, validating their shape.
    #[must_use]
    pub fn new(modules: &'static [IcallModule]) -> Self {
        for module in modules {
            assert_eq!(
                module.token_indexes.len(),
                module.uses_handles.len(),
                "icall table '{}': parallel array length mismatch",
                module.module
            );
            assert_eq!(
                module.token_indexes.len(),
                module.funcs.len(),
                "icall table '{}': parallel array length mismatch",
                module.module
            );
            assert!(
                module.token_indexes.windows(2).all(|w| w[0] < w[1]),
                "icall table '{}': index array not sorted ascending",
                module.module
            );
        }
        IcallTable { modules }
    }

    /// Resolve the native implementation of a managed method.
    ///
    /// The token must be a non-null MethodDef token; its table-tag bits are stripped
    /// before the binary search. `None` means the token is not in the table and the
    /// caller falls back to symbol-name based resolution.
    ///
    /// # Panics
    ///
    /// Panics if `module_name` matches none of the compiled-in module tables.
    #[must_use]
    pub fn lookup(&self, token: Token, module_name: &str) -> Option<IcallTarget> {
        assert!(!token.is_null(), "icall lookup with null token");
        assert!(
            token.is_method_def(),
            "icall lookup with non-MethodDef token {token}"
        );

        let module = self
            .modules
            .iter()
            .find(|m| m.module == module_name)
            .unwrap_or_else(|| panic!("no internal call table for module '{module_name}'"));

        let pos = module.token_indexes.binary_search(&token.method_index()).ok()?;
        Some(IcallTarget {
            func: module.funcs[pos],
            uses_handles: module.uses_handles[pos],
        })
    }

    /// Reverse lookup: the symbol name of a native entry point.
    ///
    /// # Errors
    /// Always [`Error::NotSupported`]: this build configuration carries no symbol
    /// information for the internal-call tables.
    pub fn symbol_for(&self, _func: RawNativeFn) -> Result<&'static str> {
        Err(Error::NotSupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icall_one() {}
    fn icall_two() {}
    fn icall_three() {}

    static CORELIB: IcallModule = IcallModule {
        module: "corelib",
        token_indexes: &[3, 17, 250],
        uses_handles: &[false, true, false],
        funcs: &[icall_one, icall_two, icall_three],
    };
    static MODULES: &[IcallModule] = &[CORELIB];

    fn table() -> IcallTable {
        IcallTable::new(MODULES)
    }

    #[test]
    fn test_lookup_hit() {
        let target = table().lookup(Token(0x0600_0011), "corelib").unwrap();
        assert!(target.uses_handles);
        assert_eq!(target.func as usize, icall_two as usize);
    }

    #[test]
    fn test_lookup_miss_returns_none() {
        assert!(table().lookup(Token(0x0600_0004), "corelib").is_none());
    }

    #[test]
    fn test_lookup_deterministic() {
        let t = table();
        let a = t.lookup(Token(0x0600_00FA), "corelib").unwrap();
        let b = t.lookup(Token(0x0600_00FA), "corelib").unwrap();
        assert_eq!(a.func as usize, b.func as usize);
        assert_eq!(a.uses_handles, b.uses_handles);
        assert!(!a.uses_handles);
    }

    #[test]
    fn test_lookup_strips_table_tag() {
        // token 0x06000003 and index 3 refer to the same entry
        let target = table().lookup(Token(0x0600_0003), "corelib").unwrap();
        assert_eq!(target.func as usize, icall_one as usize);
    }

    #[test]
    #[should_panic(expected = "no internal call table")]
    fn test_unknown_module_panics() {
        let _ = table().lookup(Token(0x0600_0003), "unknown");
    }

    #[test]
    #[should_panic(expected = "null token")]
    fn test_null_token_panics() {
        let _ = table().lookup(Token(0), "corelib");
    }

    #[test]
    #[should_panic(expected = "non-MethodDef")]
    fn test_non_method_def_token_panics() {
        let _ = table().lookup(Token(0x0200_0003), "corelib");
    }

    #[test]
    fn test_symbol_for_not_supported() {
        assert!(matches!(
            table().symbol_for(icall_one as RawNativeFn),
            Err(Error::NotSupported)
        ));
    }

    #[test]
    #[should_panic(expected = "not sorted")]
    fn test_unsorted_table_rejected() {
        static BAD: IcallModule = IcallModule {
            module: "bad",
            token_indexes: &[5, 2],
            uses_handles: &[false, false],
            funcs: &[icall_one, icall_two],
        };
        static BAD_MODULES: &[IcallModule] = &[BAD];
        let _ = IcallTable::new(BAD_MODULES);
    }
}
