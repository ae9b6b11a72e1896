// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

/// Declares a closed code enumeration with a bidirectional code/name table.
///
/// The code lookup table is built once on first use and shared read-only afterwards.
/// Unknown codes and names yield `None`, since peers may speak a newer protocol version.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $enum:ident: $repr:ty {
            $( $(#[$vmeta:meta])* $name:ident = $code:expr $(=> $msg:literal)? ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $enum {
            $( $(#[$vmeta])* $name ),*
        }

        impl $enum {
            /// Every member, in declaration order.
            pub const ALL: &'static [$enum] = &[ $( $enum::$name ),* ];

            /// The numeric code used on the wire.
            pub fn code(&self) -> $repr {
                match self {
                    $( $enum::$name => $code ),*
                }
            }

            /// The stable name used in the JSON projection.
            pub fn name(&self) -> &'static str {
                match self {
                    $( $enum::$name => stringify!($name) ),*
                }
            }

            /// Human readable description, where one exists.
            pub fn description(&self) -> Option<&'static str> {
                match self {
                    $( $enum::$name => closed_enum!(@msg $($msg)?) ),*
                }
            }

            pub fn from_code(code: $repr) -> Option<Self> {
                lazy_static::lazy_static! {
                    static ref BY_CODE: std::collections::HashMap<$repr, $enum> =
                        $enum::ALL.iter().map(|m| (m.code(), *m)).collect();
                }
                BY_CODE.get(&code).copied()
            }

            pub fn from_name(name: &str) -> Option<Self> {
                lazy_static::lazy_static! {
                    static ref BY_NAME: std::collections::HashMap<&'static str, $enum> =
                        $enum::ALL.iter().map(|m| (m.name(), *m)).collect();
                }
                BY_NAME.get(name).copied()
            }

            /// Projects the member to its JSON name.
            pub fn to_json(&self) -> serde_json::Value {
                serde_json::Value::String(self.name().to_owned())
            }
        }

        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
    (@msg) => { None };
    (@msg $msg:literal) => { Some($msg) };
}
