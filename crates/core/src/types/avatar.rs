//! Avatar choices.
//!
//! Avatars are picked from a fixed set of images shipped with the client;
//! there is no upload path. On the wire an avatar is its image path.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not one of the known avatar paths.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown avatar: {0}")]
pub struct AvatarError(pub String);

/// One of the predefined profile avatars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Avatar {
    #[default]
    #[serde(rename = "/images/avatar-1.jpg")]
    One,
    #[serde(rename = "/images/avatar-2.jpg")]
    Two,
    #[serde(rename = "/images/avatar-3.jpg")]
    Three,
    #[serde(rename = "/images/avatar-4.jpg")]
    Four,
}

impl Avatar {
    /// Every avatar, in display order.
    pub const ALL: [Self; 4] = [Self::One, Self::Two, Self::Three, Self::Four];

    /// Image path of this avatar, relative to the client's origin.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::One => "/images/avatar-1.jpg",
            Self::Two => "/images/avatar-2.jpg",
            Self::Three => "/images/avatar-3.jpg",
            Self::Four => "/images/avatar-4.jpg",
        }
    }

    /// One-based position of this avatar in [`Avatar::ALL`].
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl std::str::FromStr for Avatar {
    type Err = AvatarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|avatar| avatar.path() == s)
            .ok_or_else(|| AvatarError(s.to_owned()))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Avatar {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Avatar {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Avatar {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.path(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_option() {
        assert_eq!(Avatar::default(), Avatar::ALL[0]);
    }

    #[test]
    fn test_from_str_matches_path() {
        for avatar in Avatar::ALL {
            assert_eq!(avatar.path().parse::<Avatar>().unwrap(), avatar);
        }
        assert!("/images/avatar-5.jpg".parse::<Avatar>().is_err());
        assert!("".parse::<Avatar>().is_err());
    }

    #[test]
    fn test_serde_uses_path() {
        let json = serde_json::to_string(&Avatar::Three).unwrap();
        assert_eq!(json, "\"/images/avatar-3.jpg\"");

        let parsed: Avatar = serde_json::from_str("\"/images/avatar-2.jpg\"").unwrap();
        assert_eq!(parsed, Avatar::Two);

        assert!(serde_json::from_str::<Avatar>("\"https://evil.example/x.png\"").is_err());
    }

    #[test]
    fn test_number() {
        let numbers: Vec<u8> = Avatar::ALL.into_iter().map(Avatar::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }
}
