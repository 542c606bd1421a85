// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use crate::constant_pool::ConstantPool;
use crate::error::ClassFileError;
use crate::method::Method;

/// A loaded class file, reduced to what the interpreter needs: the
/// constant pool and the methods declared directly on the class. Only
/// single-class programs are supported, so there is no notion of a
/// superclass or of resolving a method reference to a different class.
#[derive(Debug)]
pub struct ClassFile {
    pub constant_pool: ConstantPool,
    pub methods: Vec<Method>,
}

impl ClassFile {
    pub fn find_method(&self, name: &str, descriptor: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }

    /// Resolves a `Methodref` constant pool entry (as used by
    /// `invokestatic`) to the method it names within this class.
    pub fn find_method_from_index(&self, index: u16) -> Result<&Method, ClassFileError> {
        let (name, descriptor) = self.constant_pool.get_method_ref(index)?;
        self.find_method(name, descriptor).ok_or_else(|| {
            let class_name = self
                .constant_pool
                .get_method_ref_class_name(index)
                .unwrap_or("?");
            ClassFileError::new(format!("no such method: {class_name}.{name}{descriptor}"))
        })
    }
}
