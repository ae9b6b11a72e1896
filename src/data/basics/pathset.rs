// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use serde_json::{Map, Value};

use super::{AccountId, Currency};
use crate::codec::{BinaryParser, BytesSink, CodecError, SerializedType, Type};

const TYPE_ACCOUNT: u8 = 0x01;
const TYPE_CURRENCY: u8 = 0x10;
const TYPE_ISSUER: u8 = 0x20;
const PATH_SEPARATOR: u8 = 0xff;
const PATHSET_END: u8 = 0x00;

/// One step of a payment path. At least one of the members is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PathHop {
    pub account: Option<AccountId>,
    pub currency: Option<Currency>,
    pub issuer: Option<AccountId>,
}

impl PathHop {
    pub fn account(account: AccountId) -> Self {
        PathHop {
            account: Some(account),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.account.is_none() && self.currency.is_none() && self.issuer.is_none()
    }

    fn type_byte(&self) -> u8 {
        let mut t = 0;
        if self.account.is_some() {
            t |= TYPE_ACCOUNT;
        }
        if self.currency.is_some() {
            t |= TYPE_CURRENCY;
        }
        if self.issuer.is_some() {
            t |= TYPE_ISSUER;
        }
        t
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(a) = &self.account {
            map.insert("account".to_owned(), a.to_json());
        }
        if let Some(c) = &self.currency {
            map.insert("currency".to_owned(), c.to_json());
        }
        if let Some(i) = &self.issuer {
            map.insert("issuer".to_owned(), i.to_json());
        }
        Value::Object(map)
    }

    fn from_json(json: &Value) -> Result<Self, CodecError> {
        let map = json
            .as_object()
            .ok_or_else(|| CodecError::json(Type::PathSet.name(), "path hop must be an object"))?;
        let hop = PathHop {
            account: map.get("account").map(AccountId::from_json).transpose()?,
            currency: map.get("currency").map(Currency::from_json).transpose()?,
            issuer: map.get("issuer").map(AccountId::from_json).transpose()?,
        };
        if hop.is_empty() {
            return Err(CodecError::EmptyPathHop);
        }
        Ok(hop)
    }
}

pub type Path = Vec<PathHop>;

/// Alternative payment paths, each a sequence of hops.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PathSet(pub Vec<Path>);

impl SerializedType for PathSet {
    const TYPE: Type = Type::PathSet;

    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        for (i, path) in self.0.iter().enumerate() {
            if path.is_empty() {
                return Err(CodecError::EmptyPath);
            }
            if i > 0 {
                sink.add_byte(PATH_SEPARATOR);
            }
            for hop in path {
                if hop.is_empty() {
                    return Err(CodecError::EmptyPathHop);
                }
                sink.add_byte(hop.type_byte());
                if let Some(a) = &hop.account {
                    a.to_bytes_sink(sink)?;
                }
                if let Some(c) = &hop.currency {
                    c.to_bytes_sink(sink)?;
                }
                if let Some(i) = &hop.issuer {
                    i.to_bytes_sink(sink)?;
                }
            }
        }
        sink.add_byte(PATHSET_END);
        Ok(())
    }

    fn from_parser(parser: &mut BinaryParser, _hint: Option<usize>) -> Result<Self, CodecError> {
        let mut paths = Vec::new();
        let mut path = Path::new();
        loop {
            let offset = parser.pos();
            match parser.read_u8()? {
                PATHSET_END if path.is_empty() && !paths.is_empty() => {
                    return Err(CodecError::decode(
                        Type::PathSet.name(),
                        offset,
                        "path set ends with an empty path",
                    ));
                }
                PATHSET_END => break,
                PATH_SEPARATOR if path.is_empty() => {
                    return Err(CodecError::decode(
                        Type::PathSet.name(),
                        offset,
                        "separator follows an empty path",
                    ));
                }
                PATH_SEPARATOR => paths.push(std::mem::take(&mut path)),
                t if t & !(TYPE_ACCOUNT | TYPE_CURRENCY | TYPE_ISSUER) != 0 => {
                    return Err(CodecError::decode(
                        Type::PathSet.name(),
                        offset,
                        format!("invalid hop type {:#04x}", t),
                    ));
                }
                t => {
                    let mut hop = PathHop::default();
                    if t & TYPE_ACCOUNT != 0 {
                        hop.account = Some(AccountId::from_parser(parser, None)?);
                    }
                    if t & TYPE_CURRENCY != 0 {
                        hop.currency = Some(Currency::from_parser(parser, None)?);
                    }
                    if t & TYPE_ISSUER != 0 {
                        hop.issuer = Some(AccountId::from_parser(parser, None)?);
                    }
                    path.push(hop);
                }
            }
        }
        if !path.is_empty() {
            paths.push(path);
        }
        Ok(PathSet(paths))
    }

    fn to_json(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|p| Value::Array(p.iter().map(PathHop::to_json).collect()))
                .collect(),
        )
    }

    fn from_json(json: &Value) -> Result<Self, CodecError> {
        let err = || CodecError::json(Type::PathSet.name(), "expected array of arrays");
        let paths = json.as_array().ok_or_else(err)?;
        let mut out = Vec::with_capacity(paths.len());
        for p in paths {
            let hops = p.as_array().ok_or_else(err)?;
            if hops.is_empty() {
                return Err(CodecError::EmptyPath);
            }
            out.push(hops.iter().map(PathHop::from_json).collect::<Result<Path, _>>()?);
        }
        Ok(PathSet(out))
    }
}
