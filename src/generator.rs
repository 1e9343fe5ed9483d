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

//! Batch driver: launch.json in, one directory of shell scripts out.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::Value;

use crate::config::{load_configurations, DebugConfiguration};
use crate::error::ScriptError;
use crate::render::{render, RenderedScript, ScriptFamily};
use crate::utils::launch_json_path;
use crate::writer::ScriptWriter;

/// Relative to the workspace root unless given as an absolute path
pub const DEFAULT_OUTPUT_DIR: &str = "debug-scripts";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Force one template family for every configuration instead of picking per entry
    pub family: Option<ScriptFamily>,
    pub output_dir: PathBuf,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            family: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// What happened to one configuration. A failure here never stops the others.
#[derive(Debug)]
pub struct ConfigOutcome {
    pub name: String,
    pub result: Result<Vec<PathBuf>, ScriptError>,
}

#[derive(Debug)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub outcomes: Vec<ConfigOutcome>,
}

impl GenerationReport {
    pub fn failures(&self) -> impl Iterator<Item = &ConfigOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .flatten()
    }
}

/// Generate scripts for every configuration in `<root>/.vscode/launch.json`.
///
/// Returns `Err` only for conditions that stop the whole run: a missing or unreadable
/// launch.json, or one with no configurations. In the latter case nothing is created.
pub fn generate_scripts(
    root: &Path,
    options: &GenerateOptions,
) -> Result<GenerationReport, ScriptError> {
    let launch_json = launch_json_path(root);
    let entries = load_configurations(&launch_json)?;
    if entries.is_empty() {
        return Err(ScriptError::EmptyConfigurationList);
    }
    debug!(
        "{} configuration(s) in {}",
        entries.len(),
        launch_json.display()
    );

    let writer = ScriptWriter::new(root.join(&options.output_dir));
    let mut outcomes = Vec::with_capacity(entries.len());
    // File name -> configuration that wrote it in this run
    let mut claimed: HashMap<String, String> = HashMap::new();

    for (index, entry) in entries.iter().enumerate() {
        let name = entry_name(entry, index);
        let result = render_one(entry, &launch_json, root, options.family)
            .and_then(|scripts| {
                check_unclaimed(&scripts, &claimed)?;
                let paths = writer.write_all(&scripts)?;
                for script in &scripts {
                    claimed.insert(script.file_name.clone(), name.clone());
                }
                Ok(paths)
            });
        match &result {
            Ok(paths) => {
                for path in paths {
                    println!("Created {}", path.display());
                }
            }
            Err(e) => {
                warn!("skipping configuration '{}'", name);
                println!("Skipping {}: {}", name, e);
            }
        }
        outcomes.push(ConfigOutcome { name, result });
    }

    info!(
        "processed {} configuration(s) into {}",
        outcomes.len(),
        writer.output_dir().display()
    );
    Ok(GenerationReport {
        output_dir: writer.output_dir().to_path_buf(),
        outcomes,
    })
}

fn render_one(
    entry: &Value,
    launch_json: &Path,
    root: &Path,
    forced: Option<ScriptFamily>,
) -> Result<Vec<RenderedScript>, ScriptError> {
    let config = DebugConfiguration::from_value(entry)
        .map_err(|source| ScriptError::ConfigParse {
            path: launch_json.to_path_buf(),
            source,
        })?
        .resolved(root);
    let family = forced.unwrap_or_else(|| ScriptFamily::select(&config));
    debug!("'{}' uses the {:?} templates", config.name, family);

    render(&config, family)
}

fn check_unclaimed(
    scripts: &[RenderedScript],
    claimed: &HashMap<String, String>,
) -> Result<(), ScriptError> {
    match scripts
        .iter()
        .find_map(|s| claimed.get(&s.file_name).map(|owner| (s, owner)))
    {
        Some((script, owner)) => Err(ScriptError::DuplicateScript {
            file: script.file_name.clone(),
            claimed_by: owner.clone(),
        }),
        None => Ok(()),
    }
}

fn entry_name(entry: &Value, index: usize) -> String {
    entry
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("configuration #{}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unnamed_entries_get_a_positional_name() {
        assert_eq!(entry_name(&json!({ "name": "A" }), 0), "A");
        assert_eq!(entry_name(&json!({ "program": "x" }), 2), "configuration #3");
    }

    #[test]
    fn claimed_file_names_are_refused() {
        let script = RenderedScript {
            file_name: "A_B_attach.sh".into(),
            contents: String::new(),
            executable: true,
        };
        let mut claimed = HashMap::new();
        assert!(check_unclaimed(std::slice::from_ref(&script), &claimed).is_ok());

        claimed.insert("A_B_attach.sh".to_string(), "A B".to_string());
        match check_unclaimed(&[script], &claimed) {
            Err(ScriptError::DuplicateScript { file, claimed_by }) => {
                assert_eq!(file, "A_B_attach.sh");
                assert_eq!(claimed_by, "A B");
            }
            other => panic!("expected DuplicateScript, got {:?}", other),
        }
    }

    #[test]
    fn default_output_dir() {
        let opts = GenerateOptions::default();
        assert_eq!(opts.output_dir, PathBuf::from("debug-scripts"));
        assert!(opts.family.is_none());
    }
}
