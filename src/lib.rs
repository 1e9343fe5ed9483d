// Copyright (c) 2026 MCU-Debug Authors.
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

// Crate root: declare modules and control visibility
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod mi;
pub mod render;
pub mod resolver;
pub mod utils;
pub mod writer;

// Re-export commonly used API from the library for binaries/tests
pub use config::DebugConfiguration;
pub use error::{MiError, ScriptError};
pub use generator::{generate_scripts, GenerateOptions, GenerationReport};
pub use mi::DebuggerSession;
pub use render::{RenderedScript, ScriptFamily};
pub use resolver::{collect_addresses, write_listing, AddressEntry, AddressTable};
