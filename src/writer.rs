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

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::ScriptError;
use crate::render::RenderedScript;

/// rwxr-xr-x
pub const SCRIPT_MODE: u32 = 0o755;

pub struct ScriptWriter {
    output_dir: PathBuf,
}

impl ScriptWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory and its parents. Fine if it already exists.
    pub fn ensure_dir(&self) -> Result<(), ScriptError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ScriptError::Write {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// Write one script, overwriting any previous version, and mark it executable.
    pub fn write(&self, script: &RenderedScript) -> Result<PathBuf, ScriptError> {
        self.ensure_dir()?;
        let path = self.output_dir.join(&script.file_name);
        let wrap = |source: std::io::Error| ScriptError::Write {
            path: path.clone(),
            source,
        };

        fs::write(&path, &script.contents).map_err(wrap)?;
        if script.executable {
            set_executable(&path).map_err(wrap)?;
        }
        debug!("wrote {} ({} bytes)", path.display(), script.contents.len());
        Ok(path)
    }

    /// Write all scripts of one configuration. Stops at the first failure.
    pub fn write_all(&self, scripts: &[RenderedScript]) -> Result<Vec<PathBuf>, ScriptError> {
        scripts.iter().map(|s| self.write(s)).collect()
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(SCRIPT_MODE))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<()> {
    // No mode bits to set
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(name: &str, body: &str) -> RenderedScript {
        RenderedScript {
            file_name: name.to_string(),
            contents: body.to_string(),
            executable: true,
        }
    }

    #[test]
    fn creates_nested_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ScriptWriter::new(dir.path().join("a").join("b"));
        let path = writer.write(&script("x.sh", "#!/bin/bash\n")).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "#!/bin/bash\n");
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ScriptWriter::new(dir.path().join("out"));
        writer.ensure_dir().unwrap();
        writer.ensure_dir().unwrap();
        assert!(writer.output_dir().is_dir());
    }

    #[test]
    fn overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ScriptWriter::new(dir.path());
        writer.write(&script("x.sh", "old contents that are longer")).unwrap();
        let path = writer.write(&script("x.sh", "new")).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn scripts_are_0755() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = ScriptWriter::new(dir.path())
            .write(&script("x.sh", "#!/bin/bash\n"))
            .unwrap();
        let mode = fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn unwritable_target_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be
        let blocker = dir.path().join("out");
        fs::write(&blocker, "").unwrap();
        let err = ScriptWriter::new(&blocker)
            .write(&script("x.sh", ""))
            .unwrap_err();
        assert!(matches!(err, ScriptError::Write { .. }));
    }
}
