//! `define_port_error!` builds a `thiserror` enum for a port together with
//! snake_case constructors that accept `impl Into<T>` for every field.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    define_port_error! {
        pub enum SampleStoreError {
            Offline { message: String } => "store offline: {message}",
            Retries { attempts: u32 } => "gave up after {attempts} attempts",
            Missing { entity: String, id: Uuid } => "{entity} {id} missing",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SampleStoreError::offline("pool exhausted");
        assert_eq!(err.to_string(), "store offline: pool exhausted");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let err = SampleStoreError::retries(3_u32);
        assert_eq!(err, SampleStoreError::Retries { attempts: 3 });
    }

    #[test]
    fn mixed_fields_render_in_order() {
        let err = SampleStoreError::missing("courier", Uuid::nil());
        assert_eq!(
            err.to_string(),
            "courier 00000000-0000-0000-0000-000000000000 missing"
        );
    }
}
