// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! `invokestatic`: the only way this VM calls another method, which
//! makes it the only source of recursion (e.g. a factorial computed by a
//! method calling itself). The callee runs in its own [`Frame`]; only
//! the heap is shared between caller and callee.

use teeny_classfile::ClassFile;
use teeny_heap::Heap;

use super::constants::read_u16;
use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::machine::{self, Step};

pub fn invokestatic(
    frame: &mut Frame,
    code: &[u8],
    class: &ClassFile,
    heap: &mut Heap,
) -> Result<Step, InterpreterError> {
    let index = read_u16(code, frame.pc + 1)?;
    let callee = class.find_method_from_index(index)?;
    let parameter_count = callee.parameter_count()?;

    let mut arguments = vec![0; parameter_count as usize];
    for slot in arguments.iter_mut().rev() {
        *slot = frame.pop()?;
    }

    if let Some(result) = machine::run_frame(class, callee, &arguments, heap)? {
        frame.push(result)?;
    }
    Ok(Step::Next(3))
}
