// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use serde_json::Map;

use super::STObject;
use crate::codec::{
    BinaryParser, BinarySerializer, BytesSink, CodecError, Field, SerializedType, Type,
};

/// One element of an STArray: an object wrapped in an object-typed field, e.g. `Memo`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayEntry {
    field: Field,
    object: STObject,
}

impl ArrayEntry {
    pub fn new(field: Field, object: STObject) -> Result<Self, CodecError> {
        if field == Field::ObjectEndMarker {
            return Err(CodecError::NotSerializable(field));
        }
        if field.field_type() != Type::STObject {
            return Err(CodecError::TypeMismatch {
                field,
                expected: Type::STObject,
            });
        }
        Ok(ArrayEntry { field, object })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn object(&self) -> &STObject {
        &self.object
    }

    pub fn into_object(self) -> STObject {
        self.object
    }
}

/// An ordered list of wrapped objects, terminated on the wire by `ArrayEndMarker`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct STArray(Vec<ArrayEntry>);

impl STArray {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, entry: ArrayEntry) {
        self.0.push(entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArrayEntry> {
        self.0.iter()
    }
}

impl From<Vec<ArrayEntry>> for STArray {
    fn from(entries: Vec<ArrayEntry>) -> Self {
        STArray(entries)
    }
}

impl SerializedType for STArray {
    const TYPE: Type = Type::STArray;

    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        let mut ser = BinarySerializer::new(sink);
        for entry in &self.0 {
            ser.add_value(entry.field, &entry.object)?;
        }
        Ok(())
    }

    /// Arrays only occur nested, so they always run up to their end marker.
    fn from_parser(parser: &mut BinaryParser, _hint: Option<usize>) -> Result<Self, CodecError> {
        let mut entries = Vec::new();
        loop {
            let offset = parser.pos();
            let field = parser.read_field_header()?;
            if field == Field::ArrayEndMarker {
                break;
            }
            if field.field_type() != Type::STObject || field == Field::ObjectEndMarker {
                return Err(CodecError::decode(
                    Type::STArray.name(),
                    offset,
                    format!("{} cannot wrap an array element", field),
                ));
            }
            let object = STObject::from_parser(parser, None)?;
            entries.push(ArrayEntry { field, object });
        }
        Ok(STArray(entries))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.0
                .iter()
                .map(|e| {
                    let mut m = Map::new();
                    m.insert(e.field.name().to_owned(), e.object.to_json());
                    serde_json::Value::Object(m)
                })
                .collect(),
        )
    }

    fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
        let name = Type::STArray.name();
        let items = json
            .as_array()
            .ok_or_else(|| CodecError::json(name, "expected array"))?;
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let wrapper = item
                .as_object()
                .filter(|m| m.len() == 1)
                .ok_or_else(|| CodecError::json(name, "elements must be single-key objects"))?;
            for (key, inner) in wrapper {
                let field =
                    Field::by_name(key).ok_or_else(|| CodecError::UnknownFieldName(key.clone()))?;
                entries.push(ArrayEntry::new(field, STObject::from_json(inner)?)?);
            }
        }
        Ok(STArray(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::basics::Blob;
    use serde_json::json;

    fn memo(data: &[u8]) -> ArrayEntry {
        let mut obj = STObject::new();
        obj.put(Field::MemoData, Blob::from(data)).unwrap();
        ArrayEntry::new(Field::Memo, obj).unwrap()
    }

    #[test]
    fn wire_layout() {
        let arr = STArray::from(vec![memo(&[1]), memo(&[2, 3])]);
        let bytes = arr.to_bytes().unwrap();
        assert_eq!(
            bytes,
            vec![0xea, 0x7d, 1, 1, 0xe1, 0xea, 0x7d, 2, 2, 3, 0xe1]
        );

        let mut terminated = bytes.clone();
        terminated.push(0xf1);
        let mut p = BinaryParser::new(&terminated);
        assert_eq!(STArray::from_parser(&mut p, None).unwrap(), arr);
        assert!(p.at_end());
    }

    #[test]
    fn wrapper_must_be_object_field() {
        assert!(ArrayEntry::new(Field::Fee, STObject::new()).is_err());
        let bytes = [0x24, 0, 0, 0, 1, 0xf1];
        let mut p = BinaryParser::new(&bytes);
        assert!(matches!(
            STArray::from_parser(&mut p, None),
            Err(CodecError::Decode { offset: 0, .. })
        ));
    }

    #[test]
    fn json() {
        let arr = STArray::from(vec![memo(&[0xab])]);
        let j = arr.to_json();
        assert_eq!(j, json!([{"Memo": {"MemoData": "AB"}}]));
        assert_eq!(STArray::from_json(&j).unwrap(), arr);
        assert!(STArray::from_json(&json!([{"Memo": {}, "Signer": {}}])).is_err());
        assert!(STArray::from_json(&json!([{"Fee": {}}])).is_err());
    }
}
