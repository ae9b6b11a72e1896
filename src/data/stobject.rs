// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::collections::BTreeMap;

use serde_json::Map;

use super::basics::{AccountId, Amount, Blob};
use super::{STArray, Value};
use crate::codec::{
    BinaryParser, BinarySerializer, BytesSink, CodecError, Field, SerializedType, Type,
};
use crate::crypto::Hash256;
use crate::protocol::{LedgerEntryType, TransactionType};

macro_rules! copy_getter {
    ($name:ident, $variant:ident, $t:ty) => {
        pub fn $name(&self, field: Field) -> Option<$t> {
            match self.fields.get(&field) {
                Some(Value::$variant(v)) => Some(*v),
                _ => None,
            }
        }
    };
}

macro_rules! ref_getter {
    ($name:ident, $variant:ident, $t:ty) => {
        pub fn $name(&self, field: Field) -> Option<&$t> {
            match self.fields.get(&field) {
                Some(Value::$variant(v)) => Some(v),
                _ => None,
            }
        }
    };
}

/// A field-keyed container of typed values, the shape of transactions and ledger entries.
///
/// Members are kept ordered by combined field code, so iteration order is the canonical wire
/// order no matter in which order fields were inserted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct STObject {
    fields: BTreeMap<Field, Value>,
}

impl STObject {
    pub fn new() -> Self {
        Default::default()
    }

    /// An object holding only its transaction type tag.
    pub fn with_transaction_type(tx_type: TransactionType) -> Self {
        let mut obj = STObject::new();
        obj.fields.insert(Field::TransactionType, Value::from(tx_type));
        obj
    }

    /// An object holding only its ledger entry type tag.
    pub fn with_ledger_entry_type(entry_type: LedgerEntryType) -> Self {
        let mut obj = STObject::new();
        obj.fields.insert(Field::LedgerEntryType, Value::from(entry_type));
        obj
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sets a field, returning its previous value.
    /// Fails if the value's type differs from the type the field is declared with.
    pub fn put(&mut self, field: Field, value: impl Into<Value>) -> Result<Option<Value>, CodecError> {
        let value = value.into();
        if value.value_type() != field.field_type() {
            return Err(CodecError::TypeMismatch {
                field,
                expected: field.field_type(),
            });
        }
        Ok(self.fields.insert(field, value))
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.fields.get(&field)
    }

    pub fn has(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn remove(&mut self, field: Field) -> Option<Value> {
        self.fields.remove(&field)
    }

    /// Iterates over the members in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &Value)> {
        self.fields.iter().map(|(f, v)| (*f, v))
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.keys().copied()
    }

    copy_getter!(get_u8, UInt8, u8);
    copy_getter!(get_u16, UInt16, u16);
    copy_getter!(get_u32, UInt32, u32);
    copy_getter!(get_u64, UInt64, u64);
    copy_getter!(get_hash256, Hash256, Hash256);
    copy_getter!(get_account_id, AccountId, AccountId);
    copy_getter!(get_amount, Amount, Amount);
    ref_getter!(get_blob, Blob, Blob);
    ref_getter!(get_object, Object, STObject);
    ref_getter!(get_array, Array, STArray);

    /// The transaction type tag, if set and known.
    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.get_u16(Field::TransactionType)
            .and_then(TransactionType::from_code)
    }

    /// The ledger entry type tag, if set and known.
    pub fn ledger_entry_type(&self) -> Option<LedgerEntryType> {
        self.get_u16(Field::LedgerEntryType)
            .and_then(LedgerEntryType::from_code)
    }

    /// Writes the serialized members that `include` accepts, in canonical order.
    /// The filter applies to this object's own members only; nested objects are written whole.
    pub fn to_bytes_filtered(
        &self,
        sink: &mut dyn BytesSink,
        include: &dyn Fn(Field) -> bool,
    ) -> Result<(), CodecError> {
        let mut ser = BinarySerializer::new(sink);
        for (field, value) in self.iter() {
            if field.is_serialized() && include(field) {
                ser.add_value(field, value)?;
            }
        }
        Ok(())
    }

    /// Writes only the fields covered by a transaction signature.
    pub fn to_signing_bytes(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        self.to_bytes_filtered(sink, &|f: Field| f.is_signing_field())
    }
}

impl SerializedType for STObject {
    const TYPE: Type = Type::STObject;

    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        self.to_bytes_filtered(sink, &|_| true)
    }

    /// With a hint the object is top-level and spans exactly that many bytes.
    /// Without one it is nested and runs up to its end marker.
    fn from_parser(parser: &mut BinaryParser, hint: Option<usize>) -> Result<Self, CodecError> {
        let end = hint.map(|len| parser.pos() + len);
        let mut obj = STObject::new();
        let mut previous: Option<Field> = None;
        loop {
            if let Some(end) = end {
                if parser.pos() >= end {
                    break;
                }
            }
            let offset = parser.pos();
            let field = parser.read_field_header()?;
            match field {
                Field::ObjectEndMarker if end.is_none() => break,
                Field::ObjectEndMarker | Field::ArrayEndMarker => {
                    return Err(CodecError::decode(
                        Type::STObject.name(),
                        offset,
                        format!("unexpected {}", field),
                    ));
                }
                _ => {}
            }
            if let Some(prev) = previous {
                if field <= prev {
                    return Err(CodecError::decode(
                        Type::STObject.name(),
                        offset,
                        format!("{} follows {} out of canonical order", field, prev),
                    ));
                }
            }
            let value = Value::read(parser, field)?;
            obj.fields.insert(field, value);
            previous = Some(field);
        }
        Ok(obj)
    }

    fn to_json(&self) -> serde_json::Value {
        let map: Map<String, serde_json::Value> = self
            .iter()
            .map(|(f, v)| (f.name().to_owned(), v.to_json(f)))
            .collect();
        serde_json::Value::Object(map)
    }

    fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
        let map = json
            .as_object()
            .ok_or_else(|| CodecError::json(Type::STObject.name(), "expected object"))?;
        let mut obj = STObject::new();
        for (name, value) in map {
            let field =
                Field::by_name(name).ok_or_else(|| CodecError::UnknownFieldName(name.clone()))?;
            obj.put(field, Value::from_json(field, value)?)?;
        }
        Ok(obj)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use maplit::hashmap;
    use rand::seq::SliceRandom;
    use rand::thread_rng;
    use serde_json::json;

    use super::*;
    use crate::codec::{decode, decode_hex};
    use crate::data::ArrayEntry;

    fn members() -> Vec<(Field, Value)> {
        vec![
            (Field::TransactionType, Value::from(TransactionType::Payment)),
            (Field::Flags, Value::UInt32(0x8000_0000)),
            (Field::Sequence, Value::UInt32(1)),
            (Field::Amount, Value::Amount(Amount::Native(1_000_000))),
            (Field::Fee, Value::Amount(Amount::Native(10))),
            (Field::SigningPubKey, Value::Blob(Blob(vec![0xed; 33]))),
            (Field::Account, Value::AccountId(AccountId([0x0a; 20]))),
            (Field::Destination, Value::AccountId(AccountId([0x0b; 20]))),
        ]
    }

    fn payment() -> STObject {
        let mut obj = STObject::new();
        for (f, v) in members() {
            obj.put(f, v).unwrap();
        }
        obj
    }

    #[test]
    fn layout() {
        let mut obj = STObject::new();
        obj.put(Field::Sequence, 1u32).unwrap();
        obj.put(Field::TransactionType, TransactionType::Payment).unwrap();
        obj.put(Field::Fee, Amount::Native(10)).unwrap();
        assert_eq!(
            obj.to_bytes().unwrap(),
            vec![
                0x12, 0, 0, // TransactionType
                0x24, 0, 0, 0, 1, // Sequence
                0x68, 0x40, 0, 0, 0, 0, 0, 0, 10, // Fee
            ]
        );
    }

    #[test]
    fn round_trip() {
        let obj = payment();
        let bytes = obj.to_bytes().unwrap();
        let decoded: STObject = decode(&bytes).unwrap();
        assert_eq!(decoded, obj);
        assert_eq!(decoded.to_bytes().unwrap(), bytes);
        assert_eq!(decode_hex::<STObject>(&obj.to_hex().unwrap()).unwrap(), obj);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let expected = payment().to_bytes().unwrap();
        let mut rng = thread_rng();
        for _ in 0..20 {
            let mut m = members();
            m.shuffle(&mut rng);
            let mut obj = STObject::new();
            for (f, v) in m {
                obj.put(f, v).unwrap();
            }
            assert_eq!(obj.to_bytes().unwrap(), expected);
        }

        let map: HashMap<Field, Value> = members().into_iter().collect();
        let mut obj = STObject::new();
        for (f, v) in map {
            obj.put(f, v).unwrap();
        }
        assert_eq!(obj.to_bytes().unwrap(), expected);
    }

    #[test]
    fn put_replaces() {
        let mut obj = STObject::new();
        let updates = hashmap! {
            Field::Sequence => 1u32,
            Field::LastLedgerSequence => 10u32,
        };
        for (f, v) in &updates {
            assert_eq!(obj.put(*f, *v).unwrap(), None);
        }
        assert_eq!(
            obj.put(Field::Sequence, 2u32).unwrap(),
            Some(Value::UInt32(1))
        );
        assert_eq!(obj.remove(Field::LastLedgerSequence), Some(Value::UInt32(10)));
        assert_eq!(obj.fields().collect::<Vec<_>>(), vec![Field::Sequence]);
    }

    #[test]
    fn unknown_field() {
        let bytes = [0x12, 0, 0, 0x2f, 0, 0, 0, 0];
        assert_eq!(
            decode::<STObject>(&bytes),
            Err(CodecError::UnknownField((2 << 16) | 15))
        );
    }

    #[test]
    fn type_mismatch() {
        let mut obj = STObject::new();
        assert_eq!(
            obj.put(Field::Fee, 10u32),
            Err(CodecError::TypeMismatch {
                field: Field::Fee,
                expected: Type::Amount
            })
        );
        assert!(obj.is_empty());
    }

    #[test]
    fn meta_fields_are_not_written() {
        let mut obj = STObject::new();
        obj.put(Field::Sequence, 5u32).unwrap();
        let plain = obj.to_bytes().unwrap();
        obj.put(Field::Index, Hash256([1; 32])).unwrap();
        assert_eq!(obj.to_bytes().unwrap(), plain);
        assert!(obj.has(Field::Index));
    }

    #[test]
    fn signing_bytes_skip_signature() {
        let mut obj = payment();
        let mut before: Vec<u8> = Vec::new();
        obj.to_signing_bytes(&mut before).unwrap();
        obj.put(Field::TxnSignature, Blob(vec![1; 64])).unwrap();
        let mut after: Vec<u8> = Vec::new();
        obj.to_signing_bytes(&mut after).unwrap();
        assert_eq!(before, after);
        assert_ne!(obj.to_bytes().unwrap(), before);
    }

    #[test]
    fn nested_containers() {
        let mut memo = STObject::new();
        memo.put(Field::MemoData, Blob(vec![0xab])).unwrap();
        let mut memos = STArray::new();
        memos.push(ArrayEntry::new(Field::Memo, memo).unwrap());

        let mut obj = STObject::new();
        obj.put(Field::Memos, memos).unwrap();
        obj.put(Field::Sequence, 2u32).unwrap();

        let bytes = obj.to_bytes().unwrap();
        assert_eq!(
            bytes,
            vec![
                0x24, 0, 0, 0, 2, // Sequence
                0xf9, // Memos
                0xea, // Memo
                0x7d, 1, 0xab, // MemoData
                0xe1, // end of Memo
                0xf1, // end of Memos
            ]
        );
        assert_eq!(decode::<STObject>(&bytes).unwrap(), obj);
    }

    #[test]
    fn stray_end_marker() {
        assert!(matches!(
            decode::<STObject>(&[0x24, 0, 0, 0, 2, 0xe1]),
            Err(CodecError::Decode { offset: 5, .. })
        ));
        assert!(matches!(
            decode::<STObject>(&[0xf1]),
            Err(CodecError::Decode { offset: 0, .. })
        ));
    }

    #[test]
    fn non_canonical_order() {
        let bytes = [0x24, 0, 0, 0, 2, 0x12, 0, 0];
        assert!(matches!(
            decode::<STObject>(&bytes),
            Err(CodecError::Decode { offset: 5, .. })
        ));
        let dup = [0x24, 0, 0, 0, 2, 0x24, 0, 0, 0, 3];
        assert!(decode::<STObject>(&dup).is_err());
        // Flags with a needlessly escaped type id
        let escaped = [0x02, 0x02, 0, 0, 0, 5];
        assert!(matches!(
            decode::<STObject>(&escaped),
            Err(CodecError::Decode { offset: 0, .. })
        ));
        assert_eq!(
            decode::<STObject>(&[0x22, 0, 0, 0, 5]).unwrap().get_u32(Field::Flags),
            Some(5)
        );
    }

    #[test]
    fn truncated_nested_object() {
        // Memo without its end marker
        let bytes = [0xea, 0x7d, 1, 0xab];
        assert!(matches!(
            decode::<STObject>(&bytes),
            Err(CodecError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn json() {
        let obj = payment();
        let j = obj.to_json();
        assert_eq!(j["TransactionType"], json!("Payment"));
        assert_eq!(j["Fee"], json!("10"));
        assert_eq!(j["Sequence"], json!(1));
        assert_eq!(j.as_object().unwrap().len(), obj.len());
        assert_eq!(STObject::from_json(&j).unwrap(), obj);
    }

    #[test]
    fn json_errors() {
        assert_eq!(
            STObject::from_json(&json!({"Bogus": 1})),
            Err(CodecError::UnknownFieldName("Bogus".to_owned()))
        );
        assert!(STObject::from_json(&json!({"Sequence": "x"})).is_err());
        assert!(STObject::from_json(&json!([])).is_err());
    }

    #[test]
    fn typed_getters() {
        let obj = payment();
        assert_eq!(obj.get_u32(Field::Sequence), Some(1));
        assert_eq!(obj.get_u16(Field::Sequence), None);
        assert_eq!(obj.get_amount(Field::Fee), Some(Amount::Native(10)));
        assert_eq!(obj.get_account_id(Field::Account), Some(AccountId([0x0a; 20])));
        assert_eq!(obj.get_blob(Field::SigningPubKey).map(Blob::len), Some(33));
        assert_eq!(obj.transaction_type(), Some(TransactionType::Payment));
        assert_eq!(obj.ledger_entry_type(), None);
    }
}
