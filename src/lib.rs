// Copyright 2025 Johann Kempter
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

#![deny(missing_docs)]

//! # vmcpgen
//!
//! Build-time generator for the J9 VM's preloaded constant pool.
//!
//! The tool reads an XML description of the pool - classes, fields, static fields and
//! four flavors of method references - and emits the two C artifacts the VM build
//! consumes: `j9vmconstantpool.c`, defining the packed in-memory layout of the pool,
//! and `j9vmconstantpool.h`, exposing symbolic slot indices, accessor macros and the
//! runtime feature-flag bits.
//!
//! ## Pipeline
//!
//! ```text
//! vmconstantpool.xml -> Document -> resolve -> ConstantPool -> retain_applicable
//!                                                 |
//!                        FlagInfo oracle ---------+--> emit::definition / emit::header
//!                        (CMake cache or UMA spec)           |
//!                                                  write_if_changed
//! ```
//!
//! Items can be restricted to a Java version range (`minJava`/`maxJava`) and guarded by
//! a build flag (`flags="name"` or `flags="!name"`); whether a flag name is legal and
//! whether it is active in the current build is answered by a [`FlagInfo`] oracle. Each
//! flag name observed in the document is assigned a distinct power-of-two runtime bit
//! by the [`FlagRegistry`].
//!
//! Generation is deterministic: identical inputs produce byte-identical buffers, which
//! is what lets [`write_if_changed`] skip untouched outputs and keep incremental VM
//! builds quiet.

#[macro_use]
pub(crate) mod error;

pub mod emit;
pub mod flags;
pub mod pool;
pub mod writer;
pub mod xml;

pub use error::Error;
pub use flags::{CmakeFlagInfo, FlagInfo, FlagRegistry, UmaFlagInfo};
pub use pool::{resolve, ConstantPool};
pub use writer::write_if_changed;
pub use xml::Document;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
