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

//! GDB/MI output records.
//!
//! Every line gdb writes in MI mode is one of:
//!   `[token]^class[,results]`  result record, ends a command
//!   `[token]*class[,results]`  exec async, `+` status async, `=` notify async
//!   `~"text"`, `@"text"`, `&"text"`  console, target and log streams
//!   `(gdb)`  the prompt
//! Anything else is inferior output that leaked onto gdb's stdout.
//!
//! Result values are parsed into a tree so callers look fields up by name
//! (`value`, `msg`, ...) instead of picking tokens out of free text.

use regex::Regex;
use std::sync::OnceLock;

pub const PROMPT: &str = "(gdb)";

static RECORD_RE: OnceLock<Regex> = OnceLock::new();

fn record_re() -> &'static Regex {
    RECORD_RE.get_or_init(|| {
        Regex::new(r"^(\d*)([\^*+=~@&])(.*)$").expect("MI record pattern is a valid regex")
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum MiValue {
    Const(String),
    Tuple(Vec<(String, MiValue)>),
    /// Lists of results (`[a=1,b=2]`) are kept as one single-entry tuple per result
    List(Vec<MiValue>),
}

impl MiValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MiValue::Const(s) => Some(s),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&MiValue> {
        match self {
            MiValue::Tuple(fields) => lookup(fields, key),
            _ => None,
        }
    }
}

fn lookup<'a>(fields: &'a [(String, MiValue)], key: &str) -> Option<&'a MiValue> {
    fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultClass {
    Done,
    Running,
    Connected,
    Error,
    Exit,
}

impl ResultClass {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "done" => Some(ResultClass::Done),
            "running" => Some(ResultClass::Running),
            "connected" => Some(ResultClass::Connected),
            "error" => Some(ResultClass::Error),
            "exit" => Some(ResultClass::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub class: ResultClass,
    pub results: Vec<(String, MiValue)>,
    /// The line as received, for diagnostics
    pub raw: String,
}

impl ResultRecord {
    pub fn is_error(&self) -> bool {
        self.class == ResultClass::Error
    }

    pub fn get(&self, key: &str) -> Option<&MiValue> {
        lookup(&self.results, key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MiValue::as_str)
    }

    /// The `msg` field of an `^error` record
    pub fn error_message(&self) -> &str {
        self.get_str("msg").unwrap_or("unknown error")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Console,
    Target,
    Log,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MiLine {
    Result(ResultRecord),
    Stream {
        kind: StreamKind,
        text: String,
    },
    /// `*`, `+` or `=` record. Nothing here waits on them, so only the class is kept
    Async(String),
    Prompt,
    Other(String),
}

pub fn parse_line(line: &str) -> MiLine {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim_end() == PROMPT {
        return MiLine::Prompt;
    }
    let Some(caps) = record_re().captures(line) else {
        return MiLine::Other(line.to_string());
    };
    // caps[1] is the optional command token; commands are sent untokened
    let body = &caps[3];

    match &caps[2] {
        "~" | "@" | "&" => {
            let kind = match &caps[2] {
                "~" => StreamKind::Console,
                "@" => StreamKind::Target,
                _ => StreamKind::Log,
            };
            let mut cursor = Cursor::new(body);
            match cursor.c_string() {
                Some(text) => MiLine::Stream { kind, text },
                None => MiLine::Other(line.to_string()),
            }
        }
        "^" => {
            let (class, rest) = split_class(body);
            let Some(class) = ResultClass::parse(class) else {
                return MiLine::Other(line.to_string());
            };
            // A result list we cannot parse still carries a usable class
            let results = rest.and_then(parse_results).unwrap_or_default();
            MiLine::Result(ResultRecord {
                class,
                results,
                raw: line.to_string(),
            })
        }
        _ => {
            let (class, _) = split_class(body);
            MiLine::Async(class.to_string())
        }
    }
}

fn split_class(body: &str) -> (&str, Option<&str>) {
    match body.split_once(',') {
        Some((class, rest)) => (class, Some(rest)),
        None => (body, None),
    }
}

/// Parse `a=..,b=..` up to the end of the input.
pub fn parse_results(text: &str) -> Option<Vec<(String, MiValue)>> {
    let mut cursor = Cursor::new(text);
    let mut out = Vec::new();
    loop {
        out.push(cursor.result()?);
        if !cursor.eat(',') {
            break;
        }
    }
    cursor.at_end().then_some(out)
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn result(&mut self) -> Option<(String, MiValue)> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '=' {
                break;
            }
            if !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
                return None;
            }
            self.bump();
        }
        let key = self.text[start..self.pos].to_string();
        if key.is_empty() || !self.eat('=') {
            return None;
        }
        Some((key, self.value()?))
    }

    fn value(&mut self) -> Option<MiValue> {
        match self.peek()? {
            '"' => self.c_string().map(MiValue::Const),
            '{' => self.tuple(),
            '[' => self.list(),
            _ => None,
        }
    }

    fn tuple(&mut self) -> Option<MiValue> {
        self.eat('{');
        let mut fields = Vec::new();
        if self.eat('}') {
            return Some(MiValue::Tuple(fields));
        }
        loop {
            fields.push(self.result()?);
            if self.eat('}') {
                return Some(MiValue::Tuple(fields));
            }
            if !self.eat(',') {
                return None;
            }
        }
    }

    fn list(&mut self) -> Option<MiValue> {
        self.eat('[');
        let mut items = Vec::new();
        if self.eat(']') {
            return Some(MiValue::List(items));
        }
        loop {
            let item = match self.peek()? {
                '"' | '{' | '[' => self.value()?,
                _ => {
                    let (k, v) = self.result()?;
                    MiValue::Tuple(vec![(k, v)])
                }
            };
            items.push(item);
            if self.eat(']') {
                return Some(MiValue::List(items));
            }
            if !self.eat(',') {
                return None;
            }
        }
    }

    fn c_string(&mut self) -> Option<String> {
        if !self.eat('"') {
            return None;
        }
        let mut out = String::new();
        loop {
            match self.bump()? {
                '"' => return Some(out),
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    other => out.push(other),
                },
                c => out.push(c),
            }
        }
    }
}

/// Quote a string as an MI c-string argument.
pub fn mi_quote(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    for ch in arg.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
