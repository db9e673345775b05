//! `define_port_error!` declares a storage error enum and a snake_case
//! constructor per variant.
//!
//! Every variant carries named fields. Constructor parameters take
//! `impl Into<FieldType>` so call sites can pass `&str` for `String` fields:
//!
//! ```ignore
//! define_port_error! {
//!     pub enum LookupError {
//!         Missing { key: String } => "no row for {key}",
//!     }
//! }
//! let err = LookupError::missing("shoes");
//! ```

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;
