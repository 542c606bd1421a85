// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! Pushing literal values: `iconst_*`, `bipush`, `sipush`, `ldc`, and `dup`.

use teeny_classfile::ClassFile;

use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::machine::Step;

pub fn iconst(frame: &mut Frame, opcode_byte: u8) -> Result<Step, InterpreterError> {
    frame.push(opcode_byte as i32 - 3)?;
    Ok(Step::Next(1))
}

pub fn bipush(frame: &mut Frame, code: &[u8]) -> Result<Step, InterpreterError> {
    let byte = read_u8(code, frame.pc + 1)? as i8;
    frame.push(byte as i32)?;
    Ok(Step::Next(2))
}

pub fn sipush(frame: &mut Frame, code: &[u8]) -> Result<Step, InterpreterError> {
    let value = read_i16(code, frame.pc + 1)?;
    frame.push(value as i32)?;
    Ok(Step::Next(3))
}

pub fn ldc(frame: &mut Frame, code: &[u8], class: &ClassFile) -> Result<Step, InterpreterError> {
    let index = read_u8(code, frame.pc + 1)?;
    let value = class.constant_pool.get_integer(index as u16)?;
    frame.push(value)?;
    Ok(Step::Next(2))
}

pub fn dup(frame: &mut Frame) -> Result<Step, InterpreterError> {
    frame.dup()?;
    Ok(Step::Next(1))
}

pub(crate) fn read_u8(code: &[u8], at: usize) -> Result<u8, InterpreterError> {
    code.get(at)
        .copied()
        .ok_or_else(|| InterpreterError::new("instruction operand ran past end of code"))
}

pub(crate) fn read_i16(code: &[u8], at: usize) -> Result<i16, InterpreterError> {
    let high = read_u8(code, at)?;
    let low = read_u8(code, at + 1)?;
    Ok(i16::from_be_bytes([high, low]))
}

pub(crate) fn read_u16(code: &[u8], at: usize) -> Result<u16, InterpreterError> {
    let high = read_u8(code, at)?;
    let low = read_u8(code, at + 1)?;
    Ok(u16::from_be_bytes([high, low]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iconst_derives_the_value_from_the_opcode_byte() {
        let mut frame = Frame::new(0, 8);
        iconst(&mut frame, 0x02).unwrap(); // iconst_m1
        assert_eq!(frame.pop().unwrap(), -1);

        iconst(&mut frame, 0x08).unwrap(); // iconst_5
        assert_eq!(frame.pop().unwrap(), 5);
    }

    #[test]
    fn bipush_sign_extends_a_single_byte() {
        let mut frame = Frame::new(0, 8);
        let code = [0x10, 0xff]; // bipush -1
        bipush(&mut frame, &code).unwrap();
        assert_eq!(frame.pop().unwrap(), -1);
    }

    #[test]
    fn sipush_reads_a_big_endian_signed_short() {
        let mut frame = Frame::new(0, 8);
        let code = [0x11, 0xff, 0x00]; // sipush -256
        sipush(&mut frame, &code).unwrap();
        assert_eq!(frame.pop().unwrap(), -256);
    }
}
