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

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use log::debug;

use launch_debug_tools::generator::{generate_scripts, GenerateOptions, DEFAULT_OUTPUT_DIR};
use launch_debug_tools::render::ScriptFamily;
use launch_debug_tools::utils::workspace_root;

#[derive(Args, Debug)]
pub struct ScriptsArgs {
    /// Use one template family for every configuration (default: chosen per configuration)
    #[arg(short = 'f', long = "family", value_enum)]
    pub family: Option<ScriptFamily>,

    /// Output directory, relative to the workspace root
    #[arg(short = 'o', long = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

pub fn run(args: ScriptsArgs) -> Result<()> {
    println!("Starting to generate debug scripts...");
    let root = workspace_root()?;
    debug!("workspace root {}", root.display());

    let options = GenerateOptions {
        family: args.family,
        output_dir: args.output_dir,
    };

    // Missing or empty launch.json is reported, not a failure of the tool
    let report = match generate_scripts(&root, &options) {
        Ok(report) => report,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    let failed = report.failures().count();
    if failed == 0 {
        println!("Debug scripts generated in {}", report.output_dir.display());
    } else {
        println!(
            "Debug scripts generated in {} ({} of {} configuration(s) failed)",
            report.output_dir.display(),
            failed,
            report.outcomes.len()
        );
    }
    Ok(())
}
