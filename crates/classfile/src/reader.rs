// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! Parses the real JVM class-file wire format (JVMS §4), restricted to the
//! subset this interpreter executes. Sections the interpreter never reads
//! (interfaces, fields, most attributes) are walked structurally — their
//! lengths are honored so the cursor lands correctly on the next section —
//! but their contents are discarded.

use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt};

use crate::class_file::ClassFile;
use crate::constant_pool::{Constant, ConstantPool};
use crate::error::ClassFileError;
use crate::method::Method;

const MAGIC: u32 = 0xCAFE_BABE;

const TAG_UTF8: u8 = 1;
const TAG_INTEGER: u8 = 3;
const TAG_FLOAT: u8 = 4;
const TAG_LONG: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_CLASS: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_FIELDREF: u8 = 9;
const TAG_METHODREF: u8 = 10;
const TAG_INTERFACE_METHODREF: u8 = 11;
const TAG_NAME_AND_TYPE: u8 = 12;

const ATTR_CODE: &str = "Code";

impl ClassFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassFileError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::parse(&bytes)
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, ClassFileError> {
        let mut cursor = Cursor::new(bytes);

        let magic = cursor.read_u32::<BigEndian>()?;
        if magic != MAGIC {
            return Err(ClassFileError::new(
                "not a class file: bad magic number",
            ));
        }
        let _minor_version = cursor.read_u16::<BigEndian>()?;
        let _major_version = cursor.read_u16::<BigEndian>()?;

        let constant_pool = read_constant_pool(&mut cursor)?;

        let _access_flags = cursor.read_u16::<BigEndian>()?;
        let _this_class = cursor.read_u16::<BigEndian>()?;
        let _super_class = cursor.read_u16::<BigEndian>()?;

        let interfaces_count = cursor.read_u16::<BigEndian>()?;
        for _ in 0..interfaces_count {
            let _interface_index = cursor.read_u16::<BigEndian>()?;
        }

        skip_fields_or_unused_attributes(&mut cursor)?; // fields (out of scope)

        let methods = read_methods(&mut cursor, &constant_pool)?;

        skip_attributes(&mut cursor)?; // class attributes (e.g. SourceFile)

        Ok(ClassFile {
            constant_pool,
            methods,
        })
    }
}

fn read_constant_pool(cursor: &mut Cursor<&[u8]>) -> Result<ConstantPool, ClassFileError> {
    let constant_pool_count = cursor.read_u16::<BigEndian>()?;
    let mut entries = Vec::with_capacity(constant_pool_count as usize);
    entries.push(Constant::Unused); // index 0 is never addressed

    let mut index = 1u16;
    while index < constant_pool_count {
        let tag = cursor.read_u8()?;
        let constant = match tag {
            TAG_UTF8 => {
                let length = cursor.read_u16::<BigEndian>()?;
                let mut buf = vec![0u8; length as usize];
                cursor.read_exact(&mut buf)?;
                Constant::Utf8(String::from_utf8_lossy(&buf).into_owned())
            }
            TAG_INTEGER => Constant::Integer(cursor.read_i32::<BigEndian>()?),
            TAG_FLOAT => {
                let _ = cursor.read_u32::<BigEndian>()?;
                Constant::Unused
            }
            TAG_CLASS => Constant::Class {
                name_index: cursor.read_u16::<BigEndian>()?,
            },
            TAG_STRING => {
                let _string_index = cursor.read_u16::<BigEndian>()?;
                Constant::Unused
            }
            TAG_FIELDREF | TAG_INTERFACE_METHODREF => {
                let _class_index = cursor.read_u16::<BigEndian>()?;
                let _name_and_type_index = cursor.read_u16::<BigEndian>()?;
                Constant::Unused
            }
            TAG_METHODREF => Constant::Methodref {
                class_index: cursor.read_u16::<BigEndian>()?,
                name_and_type_index: cursor.read_u16::<BigEndian>()?,
            },
            TAG_NAME_AND_TYPE => Constant::NameAndType {
                name_index: cursor.read_u16::<BigEndian>()?,
                descriptor_index: cursor.read_u16::<BigEndian>()?,
            },
            TAG_LONG | TAG_DOUBLE => {
                let _high = cursor.read_u32::<BigEndian>()?;
                let _low = cursor.read_u32::<BigEndian>()?;
                // 8-byte constants occupy two constant-pool slots (JVMS §4.4.5).
                entries.push(Constant::Unused);
                index += 1;
                Constant::Unused
            }
            other => {
                return Err(ClassFileError::new(format!(
                    "unsupported constant pool tag {other} at index {index}"
                )))
            }
        };
        entries.push(constant);
        index += 1;
    }

    Ok(ConstantPool::new(entries))
}

/// Skips a `fields`/`interfaces`-style table, or a class-level
/// `attributes` table, whichever the cursor is currently positioned at:
/// both share the layout `count:u16` followed by `count` member entries of
/// `access_flags:u16 name_index:u16 descriptor_index:u16
/// attributes_count:u16 attributes[]`. Used for the two sections this VM
/// never reads (fields, and the class's own trailing attributes).
fn skip_fields_or_unused_attributes(cursor: &mut Cursor<&[u8]>) -> Result<(), ClassFileError> {
    let count = cursor.read_u16::<BigEndian>()?;
    for _ in 0..count {
        let _access_flags = cursor.read_u16::<BigEndian>()?;
        let _name_index = cursor.read_u16::<BigEndian>()?;
        let _descriptor_index = cursor.read_u16::<BigEndian>()?;
        skip_attributes(cursor)?;
    }
    Ok(())
}

fn skip_attributes(cursor: &mut Cursor<&[u8]>) -> Result<(), ClassFileError> {
    let attributes_count = cursor.read_u16::<BigEndian>()?;
    for _ in 0..attributes_count {
        let _attribute_name_index = cursor.read_u16::<BigEndian>()?;
        let length = cursor.read_u32::<BigEndian>()?;
        let mut discard = vec![0u8; length as usize];
        cursor.read_exact(&mut discard)?;
    }
    Ok(())
}

fn read_methods(
    cursor: &mut Cursor<&[u8]>,
    constant_pool: &ConstantPool,
) -> Result<Vec<Method>, ClassFileError> {
    let methods_count = cursor.read_u16::<BigEndian>()?;
    let mut methods = Vec::with_capacity(methods_count as usize);

    for _ in 0..methods_count {
        let _access_flags = cursor.read_u16::<BigEndian>()?;
        let name_index = cursor.read_u16::<BigEndian>()?;
        let descriptor_index = cursor.read_u16::<BigEndian>()?;

        let name = constant_pool.get_utf8(name_index)?.to_owned();
        let descriptor = constant_pool.get_utf8(descriptor_index)?.to_owned();

        let attributes_count = cursor.read_u16::<BigEndian>()?;
        let mut code_attribute = None;
        for _ in 0..attributes_count {
            let attribute_name_index = cursor.read_u16::<BigEndian>()?;
            let attribute_length = cursor.read_u32::<BigEndian>()?;
            let attribute_name = constant_pool.get_utf8(attribute_name_index)?;

            if attribute_name == ATTR_CODE {
                code_attribute = Some(read_code_attribute(cursor)?);
            } else {
                let mut discard = vec![0u8; attribute_length as usize];
                cursor.read_exact(&mut discard)?;
            }
        }

        let (max_stack, max_locals, code) = code_attribute.ok_or_else(|| {
            ClassFileError::new(format!("method {name}{descriptor} has no Code attribute"))
        })?;

        methods.push(Method {
            name,
            descriptor,
            max_stack,
            max_locals,
            code,
        });
    }

    Ok(methods)
}

/// Reads the body of a `Code` attribute (JVMS §4.7.3), i.e. everything
/// after the already-consumed `attribute_name_index`/`attribute_length`.
fn read_code_attribute(cursor: &mut Cursor<&[u8]>) -> Result<(u16, u16, Vec<u8>), ClassFileError> {
    let max_stack = cursor.read_u16::<BigEndian>()?;
    let max_locals = cursor.read_u16::<BigEndian>()?;
    let code_length = cursor.read_u32::<BigEndian>()?;
    let mut code = vec![0u8; code_length as usize];
    cursor.read_exact(&mut code)?;

    let exception_table_length = cursor.read_u16::<BigEndian>()?;
    for _ in 0..exception_table_length {
        let mut discard = [0u8; 8];
        cursor.read_exact(&mut discard)?;
    }

    skip_attributes(cursor)?; // e.g. LineNumberTable, LocalVariableTable

    Ok((max_stack, max_locals, code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_u16(buf: &mut Vec<u8>, v: u16) {
        buf.extend_from_slice(&v.to_be_bytes());
    }

    fn push_u32(buf: &mut Vec<u8>, v: u32) {
        buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Builds the bytes of a single-method class file:
    /// `static void <name>()` whose body is `code`.
    fn build_minimal_class(method_name: &str, descriptor: &str, code: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        push_u32(&mut buf, MAGIC);
        push_u16(&mut buf, 0); // minor
        push_u16(&mut buf, 52); // major (Java 8)

        // constant pool: 1=Utf8(method_name) 2=Utf8(descriptor) 3=Utf8("Code")
        push_u16(&mut buf, 4); // constant_pool_count = count + 1
        for s in [method_name, descriptor, "Code"] {
            buf.push(TAG_UTF8);
            push_u16(&mut buf, s.len() as u16);
            buf.extend_from_slice(s.as_bytes());
        }

        push_u16(&mut buf, 0x0021); // access_flags
        push_u16(&mut buf, 0); // this_class (unused by the reader)
        push_u16(&mut buf, 0); // super_class
        push_u16(&mut buf, 0); // interfaces_count
        push_u16(&mut buf, 0); // fields_count

        push_u16(&mut buf, 1); // methods_count
        push_u16(&mut buf, 0x0009); // access_flags: public static
        push_u16(&mut buf, 1); // name_index
        push_u16(&mut buf, 2); // descriptor_index
        push_u16(&mut buf, 1); // attributes_count
        push_u16(&mut buf, 3); // attribute_name_index -> "Code"
        let code_attr_body_len = 2 + 2 + 4 + code.len() + 2 + 2;
        push_u32(&mut buf, code_attr_body_len as u32);
        push_u16(&mut buf, 4); // max_stack
        push_u16(&mut buf, 4); // max_locals
        push_u32(&mut buf, code.len() as u32);
        buf.extend_from_slice(code);
        push_u16(&mut buf, 0); // exception_table_length
        push_u16(&mut buf, 0); // attributes_count (of Code)

        push_u16(&mut buf, 0); // class attributes_count
        buf
    }

    #[test]
    fn parses_a_minimal_class_file() {
        let bytes = build_minimal_class("main", "([Ljava/lang/String;)V", &[0xb1]); // return
        let class = ClassFile::parse(&bytes).unwrap();
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].name, "main");
        assert_eq!(class.methods[0].code, vec![0xb1]);
    }

    /// Any real `javac`-compiled class file carries a `SourceFile`
    /// attribute at the class level (JVMS §4.7.10), not an empty
    /// attributes table. This is the shape `skip_fields_or_unused_attributes`
    /// used to misparse.
    #[test]
    fn parses_a_class_file_with_a_trailing_source_file_attribute() {
        let mut buf = Vec::new();
        push_u32(&mut buf, MAGIC);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 52);

        push_u16(&mut buf, 6); // constant_pool_count
        for s in ["main", "([Ljava/lang/String;)V", "Code", "SourceFile", "Main.java"] {
            buf.push(TAG_UTF8);
            push_u16(&mut buf, s.len() as u16);
            buf.extend_from_slice(s.as_bytes());
        }

        push_u16(&mut buf, 0x0021);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0); // fields_count

        let code = [0xb1u8];
        push_u16(&mut buf, 1); // methods_count
        push_u16(&mut buf, 0x0009);
        push_u16(&mut buf, 1); // name_index -> "main"
        push_u16(&mut buf, 2); // descriptor_index
        push_u16(&mut buf, 1); // attributes_count
        push_u16(&mut buf, 3); // attribute_name_index -> "Code"
        let code_attr_body_len = 2 + 2 + 4 + code.len() + 2 + 2;
        push_u32(&mut buf, code_attr_body_len as u32);
        push_u16(&mut buf, 4);
        push_u16(&mut buf, 4);
        push_u32(&mut buf, code.len() as u32);
        buf.extend_from_slice(&code);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);

        // class attributes: one SourceFile attribute, shaped as a plain
        // attribute_info (name_index:u16, length:u32, info[length]), NOT
        // the field_info-wrapped shape the reader used to expect here.
        push_u16(&mut buf, 1); // class attributes_count
        push_u16(&mut buf, 4); // attribute_name_index -> "SourceFile"
        push_u32(&mut buf, 2); // attribute_length
        push_u16(&mut buf, 5); // sourcefile_index -> "Main.java"

        let class = ClassFile::parse(&buf).unwrap();
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].name, "main");
    }

    #[test]
    fn rejects_bad_magic() {
        let err = ClassFile::parse(&[0, 0, 0, 0]).unwrap_err();
        assert!(err.to_string().contains("magic"));
    }
}
