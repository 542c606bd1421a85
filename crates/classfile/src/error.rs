// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use std::any::Any;
use std::fmt::Display;

use teeny_types::RuntimeError;

#[derive(Debug)]
pub struct ClassFileError {
    message: String,
}

impl ClassFileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ClassFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "class file error: {}", self.message)
    }
}

impl RuntimeError for ClassFileError {
    fn get_message(&self) -> &str {
        &self.message
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<std::io::Error> for ClassFileError {
    fn from(err: std::io::Error) -> Self {
        ClassFileError::new(format!("failed to read class file: {err}"))
    }
}
