// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! The fetch-decode-execute loop. Dispatch is a single `match` over
//! [`Opcode`] rather than the function-pointer table the rest of this
//! stack favors — this VM's opcode set is small and sparse enough
//! (compared to a full instruction set) that a table buys indirection
//! without buying clarity.

use teeny_classfile::{ClassFile, Method};
use teeny_heap::Heap;
use teeny_types::opcode::Opcode;

use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::instruction::{arithmetic, arrays, bitwise, calls, comparison, constants, control_flow, io, locals};
use crate::trace;

pub(crate) enum Step {
    /// Advance the program counter by this many bytes.
    Next(usize),
    /// Set the program counter to this absolute address.
    Jump(usize),
    /// Return from the current method with this value, if any.
    Return(Option<i32>),
}

/// Runs `method` to completion and returns its result, if any.
pub fn execute(
    class: &ClassFile,
    method: &Method,
    arguments: &[i32],
    heap: &mut Heap,
) -> Result<Option<i32>, InterpreterError> {
    run_frame(class, method, arguments, heap)
}

pub(crate) fn run_frame(
    class: &ClassFile,
    method: &Method,
    arguments: &[i32],
    heap: &mut Heap,
) -> Result<Option<i32>, InterpreterError> {
    let mut frame = Frame::new(method.max_locals, method.max_stack);
    for (index, value) in arguments.iter().enumerate() {
        frame.set_local(index as u16, *value)?;
    }

    let code = &method.code;
    loop {
        let opcode_byte = *code
            .get(frame.pc)
            .ok_or_else(|| InterpreterError::new("program counter ran past end of method body"))?;
        let opcode = Opcode::try_from(opcode_byte)
            .map_err(|byte| InterpreterError::new(format!("unsupported opcode byte 0x{byte:02x}")))?;

        trace::instruction(frame.pc, opcode.name());

        let step = dispatch(opcode, opcode_byte, &mut frame, code, class, heap)?;
        match step {
            Step::Next(width) => frame.pc += width,
            Step::Jump(target) => frame.pc = target,
            Step::Return(value) => return Ok(value),
        }
    }
}

fn dispatch(
    opcode: Opcode,
    opcode_byte: u8,
    frame: &mut Frame,
    code: &[u8],
    class: &ClassFile,
    heap: &mut Heap,
) -> Result<Step, InterpreterError> {
    use Opcode::*;

    match opcode {
        nop => Ok(Step::Next(1)),

        iconst_m1 | iconst_0 | iconst_1 | iconst_2 | iconst_3 | iconst_4 | iconst_5 => {
            constants::iconst(frame, opcode_byte)
        }
        bipush => constants::bipush(frame, code),
        sipush => constants::sipush(frame, code),
        ldc => constants::ldc(frame, code, class),
        dup => constants::dup(frame),

        iload | aload => locals::load(frame, code),
        iload_0 | aload_0 => locals::load_n(frame, 0),
        iload_1 | aload_1 => locals::load_n(frame, 1),
        iload_2 | aload_2 => locals::load_n(frame, 2),
        iload_3 | aload_3 => locals::load_n(frame, 3),
        istore | astore => locals::store(frame, code),
        istore_0 | astore_0 => locals::store_n(frame, 0),
        istore_1 | astore_1 => locals::store_n(frame, 1),
        istore_2 | astore_2 => locals::store_n(frame, 2),
        istore_3 | astore_3 => locals::store_n(frame, 3),
        iinc => locals::iinc(frame, code),

        iaload => arrays::iaload(frame, heap),
        iastore => arrays::iastore(frame, heap),
        newarray => arrays::newarray(frame, code, heap),
        arraylength => arrays::arraylength(frame, heap),

        iadd => arithmetic::iadd(frame),
        isub => arithmetic::isub(frame),
        imul => arithmetic::imul(frame),
        idiv => arithmetic::idiv(frame),
        irem => arithmetic::irem(frame),
        ineg => arithmetic::ineg(frame),

        ishl => bitwise::ishl(frame),
        ishr => bitwise::ishr(frame),
        iushr => bitwise::iushr(frame),
        iand => bitwise::iand(frame),
        ior => bitwise::ior(frame),
        ixor => bitwise::ixor(frame),

        ifeq => comparison::ifeq(frame, code),
        ifne => comparison::ifne(frame, code),
        iflt => comparison::iflt(frame, code),
        ifge => comparison::ifge(frame, code),
        ifgt => comparison::ifgt(frame, code),
        ifle => comparison::ifle(frame, code),
        if_icmpeq => comparison::if_icmpeq(frame, code),
        if_icmpne => comparison::if_icmpne(frame, code),
        if_icmplt => comparison::if_icmplt(frame, code),
        if_icmpge => comparison::if_icmpge(frame, code),
        if_icmpgt => comparison::if_icmpgt(frame, code),
        if_icmple => comparison::if_icmple(frame, code),
        goto => control_flow::goto(frame, code),

        ireturn => control_flow::ireturn(frame),
        areturn => control_flow::areturn(frame),
        return_ => control_flow::return_(frame),

        getstatic => io::getstatic(),
        invokevirtual => io::invokevirtual(frame),
        invokestatic => calls::invokestatic(frame, code, class, heap),
    }
}
