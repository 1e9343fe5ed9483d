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

//! The subset of a VSCode `launch.json` configuration we understand.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ScriptError;
use crate::utils::resolve_workspace_folder;

pub const DEFAULT_ENTRY_POINT: &str = "main";
pub const DEFAULT_CWD: &str = ".";

/**
 * One entry of the `configurations` array. Field names follow the cortex-debug / cppdbg
 * launch.json keys. Everything except `name` is optional and unknown keys are ignored.
 */
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebugConfiguration {
    pub name: String,
    /** Target executable. cortex-debug calls this `executable`. */
    #[serde(default, alias = "executable")]
    pub program: Option<String>,
    /** Debugger to run. cortex-debug calls this `gdbPath`. */
    #[serde(default, alias = "gdbPath")]
    pub mi_debugger_path: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    /** OpenOCD `-f` files. A non-empty list selects the OpenOCD+GDB templates. */
    #[serde(default)]
    pub config_files: Vec<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    /** Hardware description file, passed to `set tdesc filename` */
    #[serde(default)]
    pub svd_file: Option<String>,
    #[serde(default)]
    pub run_to_entry_point: Option<String>,
    /** Probe bridge executable, `openocd` when absent */
    #[serde(default, rename = "serverpath")]
    pub server_path: Option<String>,
}

impl DebugConfiguration {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        DebugConfiguration::deserialize(value)
    }

    pub fn cwd(&self) -> &str {
        non_empty(&self.cwd).unwrap_or(DEFAULT_CWD)
    }

    pub fn entry_point(&self) -> &str {
        non_empty(&self.run_to_entry_point).unwrap_or(DEFAULT_ENTRY_POINT)
    }

    pub fn svd_file(&self) -> Option<&str> {
        non_empty(&self.svd_file)
    }

    /// Substitute `${workspaceFolder}` in every path-like field.
    pub fn resolved(&self, root: &Path) -> DebugConfiguration {
        let resolve = |p: &Option<String>| p.as_deref().map(|s| resolve_workspace_folder(s, root));
        DebugConfiguration {
            name: self.name.clone(),
            program: resolve(&self.program),
            mi_debugger_path: resolve(&self.mi_debugger_path),
            args: self.args.clone(),
            config_files: self
                .config_files
                .iter()
                .map(|f| resolve_workspace_folder(f, root))
                .collect(),
            cwd: resolve(&self.cwd),
            svd_file: resolve(&self.svd_file),
            run_to_entry_point: self.run_to_entry_point.clone(),
            server_path: resolve(&self.server_path),
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[derive(Deserialize, Debug, Default)]
struct LaunchFile {
    #[serde(default)]
    configurations: Option<Vec<Value>>,
}

/// Read `launch.json` and return the raw `configurations` array.
///
/// Entries are returned unparsed so that one malformed configuration can be
/// reported on its own instead of failing the whole file. An absent or `null`
/// array comes back empty.
pub fn load_configurations(path: &Path) -> Result<Vec<Value>, ScriptError> {
    if !path.exists() {
        return Err(ScriptError::ConfigNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| ScriptError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let launch: LaunchFile =
        serde_json::from_str(&text).map_err(|source| ScriptError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(launch.configurations.unwrap_or_default())
}
