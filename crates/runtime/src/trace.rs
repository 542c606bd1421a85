// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! Instruction tracing gated by the `TEENY_TRACE` environment variable.
//! There is no logging crate in this workspace, so this mirrors the
//! bare `eprintln!` diagnostics the rest of the stack uses.

use std::sync::OnceLock;

fn enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var_os("TEENY_TRACE").is_some())
}

pub fn instruction(pc: usize, name: &str) {
    if enabled() {
        eprintln!("{pc:04x}: {name}");
    }
}
