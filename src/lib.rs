// Copyright 2026 The hostbridge contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]

//! # hostbridge
//!
//! The marshalling and dispatch boundary between a managed object-oriented runtime
//! and a host scripting environment. The runtime proper (class loader,
//! JIT/interpreter, GC) and the host's own evaluator are external collaborators
//! reached through fixed capability traits; this crate owns everything that sits
//! between them:
//!
//! - **📦 Assembly bundling** - register assemblies from memory, no filesystem needed
//! - **🔍 Native call dispatch** - compiled-in library/symbol tables instead of a
//!   dynamic loader, plus token-indexed internal-call resolution
//! - **🏷️ Value classification** - a closed marshal-tag set telling the host how to
//!   decode any runtime value
//! - **⚡ Invocation gateway** - invoke managed methods with exceptions captured as
//!   host-safe string results, never native faults
//! - **🔁 Host-call bridge** - synchronous expression evaluation on the host with
//!   UTF-16 marshalling both ways
//!
//! ## Quick Start
//!
//! Add `hostbridge` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! hostbridge = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust,ignore
//! use hostbridge::prelude::*;
//!
//! let mut boundary = Boundary::new(runtime, host, natives, icalls);
//! boundary.add_assembly("App.dll", image)?;
//! boundary.load_runtime("managed", false)?;
//!
//! let asm = boundary.assembly_load(Some("App")).unwrap();
//! # Ok::<(), hostbridge::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `hostbridge` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`runtime`] - The fixed capability interface to the managed runtime
//! - [`bundle`] - In-memory assembly bundle registry
//! - [`nativecall`] / [`icall`] - Native call resolution and internal-call dispatch
//! - [`marshal`] - Value classification for the host
//! - [`invoke`] / [`hostcall`] - The two invocation directions across the boundary
//! - [`boundary`] - The host-facing facade tying everything together
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ## Execution Model
//!
//! The entire boundary is single-threaded and cooperative, sharing one logical
//! thread with the host event loop. Every operation is synchronous and blocking;
//! there is no cancellation and no retry. Failures are either absorbed into an
//! exception-tagged result or fatal: a fatal runtime log record prints its message
//! and aborts the process.

pub mod boundary;
pub mod bundle;
pub(crate) mod error;
pub mod hostcall;
pub mod icall;
pub mod invoke;
pub mod marshal;
pub mod nativecall;
pub mod prelude;
pub mod runtime;
pub mod token;

pub use error::Error;

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
