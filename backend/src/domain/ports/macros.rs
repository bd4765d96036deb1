//! Helper macro for port errors that carry a single diagnostic message.
//!
//! Every variant holds one `message` field and gets a snake_case constructor
//! accepting `impl Into<String>`. The enum also gains `kind()` (the
//! constructor name) and `message()` accessors.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { message: String },
            )*
        }

        impl $name {
            ::paste::paste! {
                $(
                    /// Create this error from adapter text.
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                )*

                /// Short lowercase label of the failure class.
                pub fn kind(&self) -> &'static str {
                    match self {
                        $(Self::$variant { .. } => stringify!([<$variant:snake>]),)*
                    }
                }
            }

            /// Diagnostic text supplied by the adapter.
            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant { message } => message,)*
                }
            }
        }
    };
}

pub(crate) use define_port_error;
