// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! Bitwise and shift operators: `ishl`, `ishr`, `iushr`, `iand`, `ior`,
//! `ixor`. Unlike the real JVM (which always masks the shift count to its
//! low 5 bits), a negative shift count here is treated as a fatal error —
//! matching the educational VM this interpreter's behavior is modeled on.

use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::machine::Step;

pub fn ishl(frame: &mut Frame) -> Result<Step, InterpreterError> {
    shift(frame, |value, count| value.wrapping_shl(count))
}

pub fn ishr(frame: &mut Frame) -> Result<Step, InterpreterError> {
    shift(frame, |value, count| value.wrapping_shr(count))
}

pub fn iushr(frame: &mut Frame) -> Result<Step, InterpreterError> {
    shift(frame, |value, count| {
        ((value as u32).wrapping_shr(count)) as i32
    })
}

pub fn iand(frame: &mut Frame) -> Result<Step, InterpreterError> {
    binary(frame, |a, b| a & b)
}

pub fn ior(frame: &mut Frame) -> Result<Step, InterpreterError> {
    binary(frame, |a, b| a | b)
}

pub fn ixor(frame: &mut Frame) -> Result<Step, InterpreterError> {
    binary(frame, |a, b| a ^ b)
}

fn binary(frame: &mut Frame, op: fn(i32, i32) -> i32) -> Result<Step, InterpreterError> {
    let b = frame.pop()?;
    let a = frame.pop()?;
    frame.push(op(a, b))?;
    Ok(Step::Next(1))
}

fn shift(frame: &mut Frame, op: fn(i32, u32) -> i32) -> Result<Step, InterpreterError> {
    let count = frame.pop()?;
    let value = frame.pop()?;
    if count < 0 {
        return Err(InterpreterError::new("negative shift amount"));
    }
    frame.push(op(value, (count & 0x1f) as u32))?;
    Ok(Step::Next(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ishl_shifts_left() {
        let mut frame = Frame::new(0, 8);
        frame.push(1).unwrap();
        frame.push(4).unwrap();
        ishl(&mut frame).unwrap();
        assert_eq!(frame.pop().unwrap(), 16);
    }

    #[test]
    fn iushr_fills_with_zero_regardless_of_sign() {
        let mut frame = Frame::new(0, 8);
        frame.push(-1).unwrap();
        frame.push(28).unwrap();
        iushr(&mut frame).unwrap();
        assert_eq!(frame.pop().unwrap(), 0xf);
    }

    #[test]
    fn ishr_sign_extends() {
        let mut frame = Frame::new(0, 8);
        frame.push(-1).unwrap();
        frame.push(28).unwrap();
        ishr(&mut frame).unwrap();
        assert_eq!(frame.pop().unwrap(), -1);
    }

    #[test]
    fn negative_shift_amount_is_rejected() {
        let mut frame = Frame::new(0, 8);
        frame.push(1).unwrap();
        frame.push(-1).unwrap();
        assert!(ishl(&mut frame).is_err());
    }
}
