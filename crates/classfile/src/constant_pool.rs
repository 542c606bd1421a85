// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use crate::error::ClassFileError;

/// One entry of the class-level constant pool.
///
/// Only the tags this VM subset needs to interpret are fully modeled
/// (`Utf8`, `Integer`, `Class`, `NameAndType`, `Methodref`). Tags that belong
/// to out-of-scope features (instance fields, strings, floats, 64-bit
/// constants) are parsed only far enough to know their byte width, so the
/// reader can skip past them and keep the 1-based indexing of the
/// surrounding entries intact; their payload is discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Utf8(String),
    Integer(i32),
    Class { name_index: u16 },
    NameAndType { name_index: u16, descriptor_index: u16 },
    Methodref { class_index: u16, name_and_type_index: u16 },
    /// Anything not listed above (`Fieldref`, `InterfaceMethodref`,
    /// `String`, `Float`, `Long`, `Double`, ...), plus the unused slot that
    /// follows every `Long`/`Double` entry (JVMS §4.4.5).
    Unused,
}

#[derive(Debug, Clone)]
pub struct ConstantPool {
    /// 1-based: `entries[0]` is `Constant::Unused` and is never addressed.
    entries: Vec<Constant>,
}

impl ConstantPool {
    pub fn new(entries: Vec<Constant>) -> Self {
        Self { entries }
    }

    fn entry(&self, index: u16) -> Result<&Constant, ClassFileError> {
        self.entries
            .get(index as usize)
            .filter(|c| !matches!(c, Constant::Unused))
            .ok_or_else(|| {
                ClassFileError::new(format!("constant pool index {index} is not usable"))
            })
    }

    pub fn get_utf8(&self, index: u16) -> Result<&str, ClassFileError> {
        match self.entry(index)? {
            Constant::Utf8(s) => Ok(s.as_str()),
            other => Err(ClassFileError::new(format!(
                "constant pool index {index} is not a Utf8 entry: {other:?}"
            ))),
        }
    }

    pub fn get_integer(&self, index: u16) -> Result<i32, ClassFileError> {
        match self.entry(index)? {
            Constant::Integer(v) => Ok(*v),
            other => Err(ClassFileError::new(format!(
                "constant pool index {index} is not an Integer entry: {other:?}"
            ))),
        }
    }

    fn get_class_name(&self, index: u16) -> Result<&str, ClassFileError> {
        match self.entry(index)? {
            Constant::Class { name_index } => self.get_utf8(*name_index),
            other => Err(ClassFileError::new(format!(
                "constant pool index {index} is not a Class entry: {other:?}"
            ))),
        }
    }

    fn get_name_and_type(&self, index: u16) -> Result<(&str, &str), ClassFileError> {
        match self.entry(index)? {
            Constant::NameAndType {
                name_index,
                descriptor_index,
            } => Ok((self.get_utf8(*name_index)?, self.get_utf8(*descriptor_index)?)),
            other => Err(ClassFileError::new(format!(
                "constant pool index {index} is not a NameAndType entry: {other:?}"
            ))),
        }
    }

    /// Resolves a `Methodref` entry to the `(name, descriptor)` of the
    /// method it names. This VM supports only single-class programs, so the
    /// referenced class is not re-resolved; the caller looks the method up
    /// in the current class by name and descriptor.
    pub fn get_method_ref(&self, index: u16) -> Result<(&str, &str), ClassFileError> {
        match self.entry(index)? {
            Constant::Methodref {
                name_and_type_index,
                ..
            } => self.get_name_and_type(*name_and_type_index),
            other => Err(ClassFileError::new(format!(
                "constant pool index {index} is not a Methodref entry: {other:?}"
            ))),
        }
    }

    /// Exposed for diagnostics: the class a `Methodref` targets, by name.
    pub fn get_method_ref_class_name(&self, index: u16) -> Result<&str, ClassFileError> {
        match self.entry(index)? {
            Constant::Methodref { class_index, .. } => self.get_class_name(*class_index),
            other => Err(ClassFileError::new(format!(
                "constant pool index {index} is not a Methodref entry: {other:?}"
            ))),
        }
    }
}
