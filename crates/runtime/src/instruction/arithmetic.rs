// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! Integer arithmetic: `iadd`, `isub`, `imul`, `idiv`, `irem`, `ineg`.
//! Results wrap on overflow, matching JVM two's-complement int semantics.
//! Division and remainder by zero are fatal: there is no JVM-style
//! exception mechanism here, so they are reported as interpreter errors.

use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::machine::Step;

pub fn iadd(frame: &mut Frame) -> Result<Step, InterpreterError> {
    binary(frame, i32::wrapping_add)
}

pub fn isub(frame: &mut Frame) -> Result<Step, InterpreterError> {
    binary(frame, i32::wrapping_sub)
}

pub fn imul(frame: &mut Frame) -> Result<Step, InterpreterError> {
    binary(frame, i32::wrapping_mul)
}

pub fn idiv(frame: &mut Frame) -> Result<Step, InterpreterError> {
    let divisor = frame.pop()?;
    let dividend = frame.pop()?;
    if divisor == 0 {
        return Err(InterpreterError::new("division by zero"));
    }
    frame.push(dividend.wrapping_div(divisor))?;
    Ok(Step::Next(1))
}

pub fn irem(frame: &mut Frame) -> Result<Step, InterpreterError> {
    let divisor = frame.pop()?;
    let dividend = frame.pop()?;
    if divisor == 0 {
        return Err(InterpreterError::new("division by zero"));
    }
    frame.push(dividend.wrapping_rem(divisor))?;
    Ok(Step::Next(1))
}

pub fn ineg(frame: &mut Frame) -> Result<Step, InterpreterError> {
    let value = frame.pop()?;
    frame.push(value.wrapping_neg())?;
    Ok(Step::Next(1))
}

fn binary(frame: &mut Frame, op: fn(i32, i32) -> i32) -> Result<Step, InterpreterError> {
    let b = frame.pop()?;
    let a = frame.pop()?;
    frame.push(op(a, b))?;
    Ok(Step::Next(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_two_operands() {
        let mut frame = Frame::new(0, 8);
        frame.push(2).unwrap();
        frame.push(3).unwrap();
        iadd(&mut frame).unwrap();
        assert_eq!(frame.pop().unwrap(), 5);
    }

    #[test]
    fn subtracts_in_stack_order() {
        let mut frame = Frame::new(0, 8);
        frame.push(10).unwrap();
        frame.push(3).unwrap();
        isub(&mut frame).unwrap();
        assert_eq!(frame.pop().unwrap(), 7);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let mut frame = Frame::new(0, 8);
        frame.push(1).unwrap();
        frame.push(0).unwrap();
        assert!(idiv(&mut frame).is_err());
    }

    #[test]
    fn negation_wraps_at_i32_min() {
        let mut frame = Frame::new(0, 8);
        frame.push(i32::MIN).unwrap();
        ineg(&mut frame).unwrap();
        assert_eq!(frame.pop().unwrap(), i32::MIN);
    }
}
