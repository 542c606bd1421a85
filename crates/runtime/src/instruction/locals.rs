// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! Local variable slot access: `iload`/`aload`, their fixed-index `_N`
//! forms, `istore`/`astore`, and `iinc`. References and ints share one
//! local slot representation (both are just `i32`), so `iload` and
//! `aload` are the same operation under different mnemonics.

use super::constants::read_u8;
use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::machine::Step;

pub fn load(frame: &mut Frame, code: &[u8]) -> Result<Step, InterpreterError> {
    let index = read_u8(code, frame.pc + 1)?;
    let value = frame.local(index as u16)?;
    frame.push(value)?;
    Ok(Step::Next(2))
}

pub fn load_n(frame: &mut Frame, index: u16) -> Result<Step, InterpreterError> {
    let value = frame.local(index)?;
    frame.push(value)?;
    Ok(Step::Next(1))
}

pub fn store(frame: &mut Frame, code: &[u8]) -> Result<Step, InterpreterError> {
    let index = read_u8(code, frame.pc + 1)?;
    let value = frame.pop()?;
    frame.set_local(index as u16, value)?;
    Ok(Step::Next(2))
}

pub fn store_n(frame: &mut Frame, index: u16) -> Result<Step, InterpreterError> {
    let value = frame.pop()?;
    frame.set_local(index, value)?;
    Ok(Step::Next(1))
}

pub fn iinc(frame: &mut Frame, code: &[u8]) -> Result<Step, InterpreterError> {
    let index = read_u8(code, frame.pc + 1)?;
    let increment = read_u8(code, frame.pc + 2)? as i8;
    let current = frame.local(index as u16)?;
    frame.set_local(index as u16, current.wrapping_add(increment as i32))?;
    Ok(Step::Next(3))
}
