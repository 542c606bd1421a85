// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use std::any::Any;
use std::fmt::Display;

use teeny_classfile::ClassFileError;
use teeny_heap::HeapError;
use teeny_types::RuntimeError;

#[derive(Debug)]
pub struct InterpreterError {
    message: String,
}

impl InterpreterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for InterpreterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "interpreter error: {}", self.message)
    }
}

impl RuntimeError for InterpreterError {
    fn get_message(&self) -> &str {
        &self.message
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<ClassFileError> for InterpreterError {
    fn from(err: ClassFileError) -> Self {
        InterpreterError::new(err.get_message().to_owned())
    }
}

impl From<HeapError> for InterpreterError {
    fn from(err: HeapError) -> Self {
        InterpreterError::new(err.get_message().to_owned())
    }
}
