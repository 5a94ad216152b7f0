//! UUID-backed identifier newtypes shared by the entities.

/// Declare a `Copy` identifier wrapping a [`uuid::Uuid`].
macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Parse a textual UUID, tolerating surrounding whitespace.
            ///
            /// # Errors
            /// Returns the parse error when the input is not a UUID.
            pub fn parse(raw: &str) -> Result<Self, ::uuid::Error> {
                ::uuid::Uuid::parse_str(raw.trim()).map(Self)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_entity_id! {
    /// Stable user identifier.
    UserId
}

define_entity_id! {
    /// Stable organization identifier.
    OrganizationId
}

define_entity_id! {
    /// Stable test entity identifier.
    TestEntityId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ")]
    #[case("3FA85F64-5717-4562-B3FC-2C963F66AFA6")]
    fn parse_accepts_uuid_text(#[case] raw: &str) {
        let id = UserId::parse(raw).expect("valid uuid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("3fa85f64-5717-4562-b3fc")]
    fn parse_rejects_non_uuid_text(#[case] raw: &str) {
        assert!(OrganizationId::parse(raw).is_err());
    }

    #[rstest]
    fn serialises_as_bare_string() {
        let id = TestEntityId::from_uuid(uuid::Uuid::nil());
        let value = serde_json::to_value(id).expect("serialise id");
        assert_eq!(value, serde_json::json!("00000000-0000-0000-0000-000000000000"));
    }
}
