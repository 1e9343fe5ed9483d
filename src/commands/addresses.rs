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

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use log::debug;

use launch_debug_tools::error::MiError;
use launch_debug_tools::mi::DebuggerSession;
use launch_debug_tools::resolver::{
    collect_addresses, parse_symbol_list, write_listing, DEFAULT_LISTING,
};
use launch_debug_tools::utils::DEFAULT_GDB;

#[derive(Args, Debug)]
pub struct AddressesArgs {
    /// gdb executable to drive
    #[arg(short = 'g', long = "gdb", default_value = DEFAULT_GDB)]
    pub gdb: String,

    /// Listing to write
    #[arg(short = 'o', long = "output", default_value = DEFAULT_LISTING)]
    pub output: PathBuf,
}

fn prompt(input: &mut impl BufRead, text: &str) -> Result<String> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn run(args: AddressesArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let target = prompt(&mut input, "File: ")?;
    if target.is_empty() {
        println!("Error! No file given");
        return Ok(());
    }

    let mut session = DebuggerSession::launch(&args.gdb)?;
    match session.load_file(&target) {
        Ok(()) => {}
        Err(e @ MiError::FileLoad { .. }) => {
            debug!("{}", e);
            println!("Error! File Not Found");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let line = prompt(&mut input, "Enter variables separated by spaces: ")?;
    let symbols = parse_symbol_list(&line);
    let table = collect_addresses(&mut session, &symbols)?;

    write_listing(&args.output, &table)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!(
        "Wrote {} of {} address(es) to {}",
        table.len(),
        symbols.len(),
        args.output.display()
    );
    if !table.unresolved().is_empty() {
        println!("Skipped: {}", table.unresolved().join(" "));
    }
    session.shutdown()?;
    Ok(())
}
