//! Deep, human-readable dumps of payloads.
//!
//! The dump walks the value through its `Serialize` impl and writes every
//! field as `name: (type) value`, nesting records with indentation:
//!
//! ```text
//! (Thing) {
//!     SomeField: (String) "a value",
//!     Nested: (Option) Some((NestedThing) {
//!         NestedField1: (i64) 10,
//!     }),
//! }
//! ```
//!
//! If the walk fails the pretty `Debug` form is used instead, so a dump is
//! always produced. Dumps are for display only and are never parsed back.

use serde::ser::{self, Serialize};
use std::fmt::{self, Debug, Display, Write as _};

/// Render a deep, human-readable dump of `value`.
pub fn deep_dump<T>(value: &T) -> String
where
    T: Serialize + Debug + ?Sized,
{
    let mut dumper = Dumper::default();
    match value.serialize(&mut dumper) {
        Ok(()) => {
            dumper.out.push('\n');
            dumper.out
        }
        Err(e) => {
            tracing::debug!(error = %e, "typed dump failed, using Debug rendering");
            debug_dump(value)
        }
    }
}

/// Pretty `Debug` rendering prefixed with the Rust type name.
pub fn debug_dump<T>(value: &T) -> String
where
    T: Debug + ?Sized,
{
    format!("({}) {:#?}\n", std::any::type_name::<T>(), value)
}

#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct DumpError(String);

impl ser::Error for DumpError {
    fn custom<T: Display>(msg: T) -> Self {
        DumpError(msg.to_string())
    }
}

#[derive(Default)]
struct Dumper {
    out: String,
    indent: usize,
}

impl Dumper {
    fn scalar(&mut self, ty: &str, value: impl Display) -> Result<(), DumpError> {
        let _ = write!(self.out, "({ty}) {value}");
        Ok(())
    }

    fn open<'a>(&'a mut self, label: fmt::Arguments<'_>, close: &'static str) -> Compound<'a> {
        let _ = self.out.write_fmt(label);
        self.indent += 1;
        Compound { dumper: self, items: 0, close }
    }

    fn new_line(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }
}

struct Compound<'a> {
    dumper: &'a mut Dumper,
    items: usize,
    close: &'static str,
}

impl Compound<'_> {
    fn element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), DumpError> {
        self.dumper.new_line();
        value.serialize(&mut *self.dumper)?;
        self.dumper.out.push(',');
        self.items += 1;
        Ok(())
    }

    fn field<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), DumpError> {
        self.dumper.new_line();
        self.dumper.out.push_str(key);
        self.dumper.out.push_str(": ");
        value.serialize(&mut *self.dumper)?;
        self.dumper.out.push(',');
        self.items += 1;
        Ok(())
    }

    fn finish(self) -> Result<(), DumpError> {
        self.dumper.indent -= 1;
        if self.items > 0 {
            self.dumper.new_line();
        }
        self.dumper.out.push_str(self.close);
        Ok(())
    }
}

impl<'a> ser::Serializer for &'a mut Dumper {
    type Ok = ();
    type Error = DumpError;
    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Compound<'a>;
    type SerializeMap = Compound<'a>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Compound<'a>;

    fn serialize_bool(self, v: bool) -> Result<(), DumpError> {
        self.scalar("bool", v)
    }
    fn serialize_i8(self, v: i8) -> Result<(), DumpError> {
        self.scalar("i8", v)
    }
    fn serialize_i16(self, v: i16) -> Result<(), DumpError> {
        self.scalar("i16", v)
    }
    fn serialize_i32(self, v: i32) -> Result<(), DumpError> {
        self.scalar("i32", v)
    }
    fn serialize_i64(self, v: i64) -> Result<(), DumpError> {
        self.scalar("i64", v)
    }
    fn serialize_i128(self, v: i128) -> Result<(), DumpError> {
        self.scalar("i128", v)
    }
    fn serialize_u8(self, v: u8) -> Result<(), DumpError> {
        self.scalar("u8", v)
    }
    fn serialize_u16(self, v: u16) -> Result<(), DumpError> {
        self.scalar("u16", v)
    }
    fn serialize_u32(self, v: u32) -> Result<(), DumpError> {
        self.scalar("u32", v)
    }
    fn serialize_u64(self, v: u64) -> Result<(), DumpError> {
        self.scalar("u64", v)
    }
    fn serialize_u128(self, v: u128) -> Result<(), DumpError> {
        self.scalar("u128", v)
    }
    fn serialize_f32(self, v: f32) -> Result<(), DumpError> {
        self.scalar("f32", v)
    }
    fn serialize_f64(self, v: f64) -> Result<(), DumpError> {
        self.scalar("f64", v)
    }
    fn serialize_char(self, v: char) -> Result<(), DumpError> {
        self.scalar("char", format_args!("{v:?}"))
    }
    fn serialize_str(self, v: &str) -> Result<(), DumpError> {
        self.scalar("String", format_args!("{v:?}"))
    }
    fn serialize_bytes(self, v: &[u8]) -> Result<(), DumpError> {
        self.scalar("bytes", format_args!("(len={}) {v:02x?}", v.len()))
    }
    fn serialize_none(self) -> Result<(), DumpError> {
        self.scalar("Option", "None")
    }
    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), DumpError> {
        self.out.push_str("(Option) Some(");
        value.serialize(&mut *self)?;
        self.out.push(')');
        Ok(())
    }
    fn serialize_unit(self) -> Result<(), DumpError> {
        self.scalar("()", "()")
    }
    fn serialize_unit_struct(self, name: &'static str) -> Result<(), DumpError> {
        self.scalar(name, name)
    }
    fn serialize_unit_variant(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<(), DumpError> {
        self.scalar(name, variant)
    }
    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<(), DumpError> {
        let _ = write!(self.out, "({name}) ");
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), DumpError> {
        let _ = write!(self.out, "({name}) {variant}(");
        value.serialize(&mut *self)?;
        self.out.push(')');
        Ok(())
    }
    fn serialize_seq(self, len: Option<usize>) -> Result<Compound<'a>, DumpError> {
        Ok(match len {
            Some(len) => self.open(format_args!("(seq) (len={len}) ["), "]"),
            None => self.open(format_args!("(seq) ["), "]"),
        })
    }
    fn serialize_tuple(self, len: usize) -> Result<Compound<'a>, DumpError> {
        Ok(self.open(format_args!("(tuple) (len={len}) ("), ")"))
    }
    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, DumpError> {
        Ok(self.open(format_args!("({name}) ("), ")"))
    }
    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, DumpError> {
        Ok(self.open(format_args!("({name}) {variant}("), ")"))
    }
    fn serialize_map(self, len: Option<usize>) -> Result<Compound<'a>, DumpError> {
        Ok(match len {
            Some(len) => self.open(format_args!("(map) (len={len}) {{"), "}"),
            None => self.open(format_args!("(map) {{"), "}"),
        })
    }
    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Compound<'a>, DumpError> {
        Ok(self.open(format_args!("({name}) {{"), "}"))
    }
    fn serialize_struct_variant(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, DumpError> {
        Ok(self.open(format_args!("({name}) {variant} {{"), "}"))
    }
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = ();
    type Error = DumpError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), DumpError> {
        self.element(value)
    }
    fn end(self) -> Result<(), DumpError> {
        self.finish()
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = ();
    type Error = DumpError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), DumpError> {
        self.element(value)
    }
    fn end(self) -> Result<(), DumpError> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = ();
    type Error = DumpError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), DumpError> {
        self.element(value)
    }
    fn end(self) -> Result<(), DumpError> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for Compound<'_> {
    type Ok = ();
    type Error = DumpError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), DumpError> {
        self.element(value)
    }
    fn end(self) -> Result<(), DumpError> {
        self.finish()
    }
}

impl ser::SerializeMap for Compound<'_> {
    type Ok = ();
    type Error = DumpError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), DumpError> {
        self.dumper.new_line();
        key.serialize(&mut *self.dumper)?;
        self.dumper.out.push_str(": ");
        Ok(())
    }
    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), DumpError> {
        value.serialize(&mut *self.dumper)?;
        self.dumper.out.push(',');
        self.items += 1;
        Ok(())
    }
    fn end(self) -> Result<(), DumpError> {
        self.finish()
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = ();
    type Error = DumpError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), DumpError> {
        self.field(key, value)
    }
    fn end(self) -> Result<(), DumpError> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for Compound<'_> {
    type Ok = ();
    type Error = DumpError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), DumpError> {
        self.field(key, value)
    }
    fn end(self) -> Result<(), DumpError> {
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Serialize, Serializer};
    use std::collections::BTreeMap;

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct NestedThing {
        nested_field1: i64,
        nested_thing2: String,
    }

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Thing {
        some_field: String,
        nested: Option<Box<NestedThing>>,
    }

    #[derive(Debug, Serialize)]
    enum Shape {
        Point,
        Circle { radius: f64 },
    }

    #[derive(Debug)]
    struct Opaque {
        reason: &'static str,
    }

    impl Serialize for Opaque {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(ser::Error::custom(self.reason))
        }
    }

    fn thing() -> Thing {
        Thing {
            some_field: "a value".to_string(),
            nested: Some(Box::new(NestedThing {
                nested_field1: 10,
                nested_thing2: "some value".to_string(),
            })),
        }
    }

    #[test]
    fn dump_shows_field_types_recursively() {
        let dump = deep_dump(&thing());
        assert!(dump.starts_with("(Thing) {"));
        assert!(dump.contains("SomeField: (String) \"a value\","));
        assert!(dump.contains("Nested: (Option) Some((NestedThing) {"));
        assert!(dump.contains("        NestedField1: (i64) 10,"));
        assert!(dump.contains("NestedThing2: (String) \"some value\","));
        assert!(dump.ends_with("}),\n}\n"));
    }

    #[test]
    fn dump_covers_collections_and_enums() {
        let mut counts = BTreeMap::new();
        counts.insert("a", 1u32);
        let dump = deep_dump(&(vec![Shape::Point, Shape::Circle { radius: 0.5 }], counts));
        assert!(dump.contains("(seq) (len=2) ["));
        assert!(dump.contains("(Shape) Point,"));
        assert!(dump.contains("(Shape) Circle {"));
        assert!(dump.contains("radius: (f64) 0.5,"));
        assert!(dump.contains("(String) \"a\": (u32) 1,"));
    }

    #[test]
    fn empty_records_close_on_one_line() {
        let dump = deep_dump(&Vec::<u8>::new());
        assert_eq!(dump, "(seq) (len=0) []\n");
    }

    #[test]
    fn dump_of_unsized_value_is_not_empty() {
        assert_eq!(deep_dump(""), "(String) \"\"\n");
    }

    #[test]
    fn failing_serialize_falls_back_to_debug() {
        let dump = deep_dump(&Opaque { reason: "will not describe itself" });
        assert!(dump.contains("Opaque"));
        assert!(dump.contains("reason: \"will not describe itself\""));
        assert_eq!(dump, debug_dump(&Opaque { reason: "will not describe itself" }));
    }
}
