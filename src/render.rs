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

//! Shell script templates for the two launch flows we support.
//!
//! The direct flow assumes a gdb server is already listening on :3333 and just attaches
//! and loads symbols. The OpenOCD flow produces one script that starts the probe bridge and
//! another that attaches gdb, flashes, resets and runs to the entry point.
//!
//! Argument and path contents are pasted into the scripts verbatim. Nothing is quoted or
//! escaped, so a value containing shell metacharacters ends up interpreted by the shell.

use crate::config::DebugConfiguration;
use crate::error::ScriptError;
use crate::utils::{script_stem, DEFAULT_GDB};

pub const SHEBANG: &str = "#!/bin/bash";
pub const GDB_SERVER_PORT: &str = ":3333";
pub const DEFAULT_OPENOCD: &str = "openocd";

/// Role suffixes of the generated file names. Disjoint, so the two families never
/// produce the same name from different configuration names.
pub const ATTACH_SUFFIX: &str = "_attach";
pub const OPENOCD_SUFFIX: &str = "_openocd";
pub const GDB_SUFFIX: &str = "_gdb";

const CONTINUATION: &str = " \\\n    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedScript {
    pub file_name: String,
    pub contents: String,
    pub executable: bool,
}

impl RenderedScript {
    fn new(file_name: String, contents: String) -> Self {
        Self {
            file_name,
            contents,
            executable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScriptFamily {
    /// gdb attaches to an already running server
    #[value(name = "gdb")]
    DirectAttach,
    /// OpenOCD plus a flash/reset/break gdb session
    #[value(name = "openocd")]
    OpenOcd,
}

impl ScriptFamily {
    /// Configurations that name OpenOCD config files get the OpenOCD flow.
    pub fn select(config: &DebugConfiguration) -> Self {
        if config.config_files.is_empty() {
            ScriptFamily::DirectAttach
        } else {
            ScriptFamily::OpenOcd
        }
    }
}

/// Render every script for `config`. Paths must already be placeholder-resolved.
pub fn render(
    config: &DebugConfiguration,
    family: ScriptFamily,
) -> Result<Vec<RenderedScript>, ScriptError> {
    match family {
        ScriptFamily::DirectAttach => Ok(vec![render_direct_attach(config)?]),
        ScriptFamily::OpenOcd => {
            let (openocd, gdb) = render_openocd(config)?;
            Ok(vec![openocd, gdb])
        }
    }
}

fn required<'a>(
    config: &DebugConfiguration,
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, ScriptError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ScriptError::MissingField {
            config: config.name.clone(),
            field,
        })
}

pub fn render_direct_attach(config: &DebugConfiguration) -> Result<RenderedScript, ScriptError> {
    let gdb = required(config, &config.mi_debugger_path, "miDebuggerPath")?;
    let program = required(config, &config.program, "program")?;
    let arguments = config.args.join(" ");

    let contents = format!(
        "{SHEBANG}\n\
         # Debug script for {name}\n\
         \n\
         {gdb} \\\n    \
         --eval-command=\"target remote {GDB_SERVER_PORT}\" \\\n    \
         --eval-command=\"file {program}\" \\\n    \
         {arguments}\n",
        name = config.name,
    );
    Ok(RenderedScript::new(
        format!("{}{ATTACH_SUFFIX}.sh", script_stem(&config.name)),
        contents,
    ))
}

/// Ordered gdb command line. Each step is one line of the rendered script.
#[derive(Debug, Default)]
pub struct CommandList {
    lines: Vec<String>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn push_ex(self, command: impl AsRef<str>) -> Self {
        let line = format!("-ex \"{}\"", command.as_ref());
        self.push(line)
    }

    /// Add `-ex "<build(value)>"` only when `value` is present.
    pub fn push_ex_if_present<F>(self, value: Option<&str>, build: F) -> Self
    where
        F: FnOnce(&str) -> String,
    {
        match value {
            Some(v) => self.push_ex(build(v)),
            None => self,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// The gdb half of the OpenOCD flow, one entry per script line.
pub fn gdb_commands(config: &DebugConfiguration) -> Result<CommandList, ScriptError> {
    let program = required(config, &config.program, "program")?;
    let gdb = config
        .mi_debugger_path
        .as_deref()
        .filter(|g| !g.is_empty())
        .unwrap_or(DEFAULT_GDB);
    let cwd = config.cwd();

    Ok(CommandList::new()
        .push(format!("cd {cwd}"))
        .push(format!(
            "{gdb} {program} -ex \"target remote {GDB_SERVER_PORT}\""
        ))
        .push_ex_if_present(config.svd_file(), |svd| {
            format!("set tdesc filename {svd}")
        })
        .push_ex(format!("set auto-load safe-path {cwd}"))
        .push_ex("monitor reset halt")
        .push_ex("load")
        .push_ex(format!("break {}", config.entry_point()))
        .push_ex("continue"))
}

pub fn render_openocd(
    config: &DebugConfiguration,
) -> Result<(RenderedScript, RenderedScript), ScriptError> {
    let stem = script_stem(&config.name);
    let cwd = config.cwd();
    let openocd = config
        .server_path
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_OPENOCD);
    let files: String = config
        .config_files
        .iter()
        .map(|f| format!(" -f {f}"))
        .collect();

    let openocd_script = RenderedScript::new(
        format!("{stem}{OPENOCD_SUFFIX}.sh"),
        format!(
            "{SHEBANG}\n# OpenOCD script for {name}\n\ncd {cwd} && {openocd}{files}\n",
            name = config.name
        ),
    );

    let mut lines = gdb_commands(config)?.into_lines().into_iter();
    // First line is the `cd`, chained to gdb with && rather than a continuation
    let cd = lines.next().unwrap_or_default();
    let rest: Vec<String> = lines.collect();
    let gdb_script = RenderedScript::new(
        format!("{stem}{GDB_SUFFIX}.sh"),
        format!(
            "{SHEBANG}\n# GDB script for {name}\n\n{cd} && \\\n{body}\n",
            name = config.name,
            body = rest.join(CONTINUATION)
        ),
    );

    Ok((openocd_script, gdb_script))
}
