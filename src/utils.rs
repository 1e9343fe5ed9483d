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

use std::env;
use std::path::{Path, PathBuf};

/// Cross debugger used when a configuration does not name one
pub const DEFAULT_GDB: &str = "arm-none-eabi-gdb";

/// Token VSCode substitutes with the folder that holds `.vscode/`
pub const WORKSPACE_FOLDER: &str = "${workspaceFolder}";

/// The workspace root is whatever directory the tool was started from.
pub fn workspace_root() -> std::io::Result<PathBuf> {
    env::current_dir()
}

/// Replace every `${workspaceFolder}` in `path` with `root`.
/// No check is made that the result exists.
pub fn resolve_workspace_folder(path: &str, root: &Path) -> String {
    if !path.contains(WORKSPACE_FOLDER) {
        return path.to_string();
    }
    // Scripts are shell text, so force forward slashes for the root part
    let root = root.to_string_lossy().replace('\\', "/");
    path.replace(WORKSPACE_FOLDER, &root)
}

/// File stem for a configuration's scripts: spaces become underscores.
pub fn script_stem(config_name: &str) -> String {
    config_name.replace(' ', "_")
}

pub fn launch_json_path(root: &Path) -> PathBuf {
    root.join(".vscode").join("launch.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_resolves_against_root() {
        let root = Path::new("/home/dev/fw");
        assert_eq!(
            resolve_workspace_folder("${workspaceFolder}/bin/app", root),
            "/home/dev/fw/bin/app"
        );
    }

    #[test]
    fn every_placeholder_is_replaced() {
        let root = Path::new("/w");
        assert_eq!(
            resolve_workspace_folder("${workspaceFolder}/a:${workspaceFolder}/b", root),
            "/w/a:/w/b"
        );
    }

    #[test]
    fn paths_without_placeholder_are_untouched() {
        assert_eq!(
            resolve_workspace_folder("build/app.elf", Path::new("/w")),
            "build/app.elf"
        );
    }

    #[test]
    fn stem_replaces_spaces() {
        assert_eq!(script_stem("Debug STM32 Board"), "Debug_STM32_Board");
    }
}
