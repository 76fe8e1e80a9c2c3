/// Declares plain data structs whose fields are all public.
///
/// Field attributes (docs, serde hints) are forwarded as written.
#[macro_export]
macro_rules! pub_fields_struct {
    {
        $(
            $(#[$($attr:tt)*])*
            struct $name:ident {
                $(
                    $(#[$($field_attr:tt)*])*
                    $field:ident: $t:ty,
                )*
            }
        )*
    } => {
        $(
            $(#[$($attr)*])*
            pub struct $name {
                $(
                    $(#[$($field_attr)*])*
                    pub $field: $t,
                )*
            }
        )*
    }
}

#[cfg(test)]
mod tests {
    pub_fields_struct! {
        #[derive(Debug, Default, PartialEq)]
        struct Pair {
            /// left side
            left: u8,
            right: String,
        }
    }

    #[test]
    fn fields_are_public() {
        let pair = Pair {
            left: 1,
            right: "r".to_string(),
        };

        assert_eq!(pair.left, 1);
        assert_eq!(pair.right, "r");
        assert_ne!(pair, Pair::default());
    }
}
