// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! `System.out.println(int)`, modeled as two intrinsic instructions the
//! way javac actually emits it:
//!
//! ```text
//! getstatic   #1   // java/lang/System.out
//! <push the int argument>
//! invokevirtual #2 // java/io/PrintStream.println(I)V
//! ```
//!
//! `getstatic` never resolves a real field — there is no object model for
//! `System.out` here — so it is a no-op. `invokevirtual` is the only
//! instruction in this VM that can target a virtual method, and the only
//! one it ever targets is `println`, so it is implemented directly as a
//! print rather than by resolving and interpreting a `PrintStream` class.

use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::machine::Step;

pub fn getstatic() -> Result<Step, InterpreterError> {
    Ok(Step::Next(3))
}

pub fn invokevirtual(frame: &mut Frame) -> Result<Step, InterpreterError> {
    let value = frame.pop()?;
    println!("{value}");
    Ok(Step::Next(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getstatic_advances_past_its_operand_without_touching_the_stack() {
        let mut frame = Frame::new(0, 8);
        frame.push(1).unwrap();
        getstatic().unwrap();
        assert_eq!(frame.pop().unwrap(), 1);
    }

    #[test]
    fn invokevirtual_consumes_the_printed_value() {
        let mut frame = Frame::new(0, 8);
        frame.push(7).unwrap();
        invokevirtual(&mut frame).unwrap();
        assert!(frame.pop().is_err());
    }
}
