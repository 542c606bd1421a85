// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! The only heap-allocated object this VM knows: one-dimensional `int`
//! arrays. `newarray`'s `atype` operand is read and discarded — every
//! array this interpreter allocates holds `i32` elements, so the element
//! type is never anything but "int" in practice.

use teeny_heap::Heap;

use super::constants::read_u8;
use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::machine::Step;

pub fn newarray(frame: &mut Frame, code: &[u8], heap: &mut Heap) -> Result<Step, InterpreterError> {
    let _atype = read_u8(code, frame.pc + 1)?;
    let length = frame.pop()?;
    let reference = heap.allocate(length)?;
    frame.push(reference)?;
    Ok(Step::Next(2))
}

pub fn arraylength(frame: &mut Frame, heap: &Heap) -> Result<Step, InterpreterError> {
    let reference = frame.pop()?;
    frame.push(heap.length(reference)?)?;
    Ok(Step::Next(1))
}

pub fn iaload(frame: &mut Frame, heap: &Heap) -> Result<Step, InterpreterError> {
    let index = frame.pop()?;
    let reference = frame.pop()?;
    frame.push(heap.load(reference, index)?)?;
    Ok(Step::Next(1))
}

pub fn iastore(frame: &mut Frame, heap: &mut Heap) -> Result<Step, InterpreterError> {
    let value = frame.pop()?;
    let index = frame.pop()?;
    let reference = frame.pop()?;
    heap.store(reference, index, value)?;
    Ok(Step::Next(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newarray_allocates_on_the_heap_and_pushes_the_reference() {
        let mut frame = Frame::new(0, 8);
        let mut heap = Heap::new();
        frame.push(3).unwrap();
        let code = [0xbc, 10]; // newarray int
        newarray(&mut frame, &code, &mut heap).unwrap();
        let reference = frame.pop().unwrap();
        assert_eq!(heap.length(reference).unwrap(), 3);
    }

    #[test]
    fn iastore_then_iaload_round_trips_an_element() {
        let mut frame = Frame::new(0, 8);
        let mut heap = Heap::new();
        let reference = heap.allocate(2).unwrap();

        frame.push(reference).unwrap();
        frame.push(1).unwrap();
        frame.push(99).unwrap();
        iastore(&mut frame, &mut heap).unwrap();

        frame.push(reference).unwrap();
        frame.push(1).unwrap();
        iaload(&mut frame, &heap).unwrap();
        assert_eq!(frame.pop().unwrap(), 99);
    }

    #[test]
    fn arraylength_reads_the_allocated_size() {
        let mut frame = Frame::new(0, 8);
        let mut heap = Heap::new();
        let reference = heap.allocate(5).unwrap();
        frame.push(reference).unwrap();
        arraylength(&mut frame, &heap).unwrap();
        assert_eq!(frame.pop().unwrap(), 5);
    }
}
