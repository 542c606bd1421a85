// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use std::{env, fs, process};

use teeny_classfile::ClassFile;
use teeny_heap::Heap;

const MAIN_METHOD_NAME: &str = "main";
const MAIN_METHOD_DESCRIPTOR: &str = "([Ljava/lang/String;)V";

fn main() {
    if let Err(message) = run() {
        eprintln!("{message}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let path = parse_args()?;
    let bytes = fs::read(&path).map_err(|err| format!("failed to read {path}: {err}"))?;
    let class = ClassFile::parse(&bytes).map_err(|err| err.to_string())?;

    let method = class
        .find_method(MAIN_METHOD_NAME, MAIN_METHOD_DESCRIPTOR)
        .ok_or_else(|| format!("no {MAIN_METHOD_NAME}{MAIN_METHOD_DESCRIPTOR} method found"))?;

    // main's single reference parameter (the `String[] args` the JVM spec
    // mandates) is never populated: this VM has no notion of command-line
    // arguments reaching the interpreted program, only a placeholder slot.
    let parameter_count = method.parameter_count().map_err(|err| err.to_string())?;
    let arguments = vec![0; parameter_count as usize];

    let mut heap = Heap::new();
    teeny_runtime::execute(&class, method, &arguments, &mut heap).map_err(|err| err.to_string())?;
    Ok(())
}

fn parse_args() -> Result<String, String> {
    let mut args = env::args().skip(1);
    match (args.next(), args.next()) {
        (Some(path), None) => Ok(path),
        _ => Err("USAGE: teeny <class file>".to_owned()),
    }
}
