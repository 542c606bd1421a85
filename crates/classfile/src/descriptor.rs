// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! Parameter-count extraction from a JVM method descriptor, e.g.
//! `"(ILjava/lang/String;[I)I"`. Only the parameter count is needed by the
//! interpreter; the return type is not otherwise inspected.

use crate::error::ClassFileError;

pub fn parameter_count(descriptor: &str) -> Result<u16, ClassFileError> {
    let body = descriptor
        .strip_prefix('(')
        .and_then(|rest| rest.split(')').next())
        .ok_or_else(|| {
            ClassFileError::new(format!("malformed method descriptor: {descriptor:?}"))
        })?;

    let mut count = 0u16;
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '[' => continue, // array prefix: the element type that follows still counts once
            'L' => {
                for inner in chars.by_ref() {
                    if inner == ';' {
                        break;
                    }
                }
                count += 1;
            }
            'B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z' => count += 1,
            other => {
                return Err(ClassFileError::new(format!(
                    "unrecognized descriptor character {other:?} in {descriptor:?}"
                )))
            }
        }
    }
    Ok(count)
}
