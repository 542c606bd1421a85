// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! Unconditional control transfer (`goto`) and method exit
//! (`ireturn`/`areturn`/`return`).

use super::constants::read_i16;
use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::machine::Step;

pub fn goto(frame: &mut Frame, code: &[u8]) -> Result<Step, InterpreterError> {
    let offset = read_i16(code, frame.pc + 1)?;
    let target = frame.pc as i64 + offset as i64;
    usize::try_from(target)
        .map(Step::Jump)
        .map_err(|_| InterpreterError::new("branch target out of range"))
}

pub fn ireturn(frame: &mut Frame) -> Result<Step, InterpreterError> {
    Ok(Step::Return(Some(frame.pop()?)))
}

pub fn areturn(frame: &mut Frame) -> Result<Step, InterpreterError> {
    Ok(Step::Return(Some(frame.pop()?)))
}

pub fn return_(_frame: &mut Frame) -> Result<Step, InterpreterError> {
    Ok(Step::Return(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goto_jumps_unconditionally() {
        let mut frame = Frame::new(0, 8);
        let code = [0xa7, 0x00, 0x03];
        assert!(matches!(goto(&mut frame, &code).unwrap(), Step::Jump(3)));
    }

    #[test]
    fn ireturn_pops_the_result() {
        let mut frame = Frame::new(0, 8);
        frame.push(42).unwrap();
        assert!(matches!(ireturn(&mut frame).unwrap(), Step::Return(Some(42))));
    }

    #[test]
    fn return_produces_no_result() {
        let mut frame = Frame::new(0, 8);
        assert!(matches!(return_(&mut frame).unwrap(), Step::Return(None)));
    }
}
