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

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, error};

use crate::error::{MiError, MiResult};
use crate::mi::{DebuggerSession, MiTransport};

pub const DEFAULT_LISTING: &str = "addresses.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressEntry {
    pub symbol: String,
    /// As gdb printed it; not parsed further
    pub address: String,
}

/// Resolved symbols in the order they were asked for, plus the ones that were
/// reported and skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressTable {
    entries: Vec<AddressEntry>,
    unresolved: Vec<String>,
}

impl AddressTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first address seen for a symbol.
    pub fn insert(&mut self, symbol: &str, address: &str) {
        if self.contains(symbol) {
            return;
        }
        self.entries.push(AddressEntry {
            symbol: symbol.to_string(),
            address: address.to_string(),
        });
    }

    /// Record a symbol that was reported and left out of the listing.
    pub fn mark_unresolved(&mut self, symbol: &str) {
        if !self.unresolved.iter().any(|s| s == symbol) {
            self.unresolved.push(symbol.to_string());
        }
    }

    /// Skipped symbols, in query order. Never written to the listing.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.iter().any(|e| e.symbol == symbol)
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.address.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AddressEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a whitespace separated symbol list, dropping repeats.
pub fn parse_symbol_list(line: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for sym in line.split_whitespace() {
        if !out.iter().any(|s| s == sym) {
            out.push(sym.to_string());
        }
    }
    out
}

/// Query every symbol in order. Symbols gdb cannot resolve, or whose reply cannot be
/// read, are reported and left out. Transport failures end the run.
pub fn collect_addresses<T: MiTransport>(
    session: &mut DebuggerSession<T>,
    symbols: &[String],
) -> MiResult<AddressTable> {
    let mut table = AddressTable::new();
    for symbol in symbols {
        if table.contains(symbol) || table.unresolved.contains(symbol) {
            continue;
        }
        match session.query(symbol) {
            Ok(address) => {
                debug!("{} -> {}", symbol, address);
                table.insert(symbol, &address);
            }
            Err(e @ MiError::SymbolUnresolved { .. }) => {
                println!("{}", e);
                table.mark_unresolved(symbol);
            }
            Err(e @ MiError::MalformedReply { .. }) => {
                error!("{}", e);
                println!("Could not read the address of {}", symbol);
                table.mark_unresolved(symbol);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(table)
}

/// Write `name address` lines, replacing any existing file.
pub fn write_listing(path: &Path, table: &AddressTable) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for entry in table.iter() {
        writeln!(w, "{} {}", entry.symbol, entry.address)?;
    }
    w.flush()
}
