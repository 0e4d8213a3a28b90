#![forbid(unsafe_code)]

pub mod ids {
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Username(String);

    impl Username {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, UsernameError> {
            let value = value.into();
            validate_username(&value)?;
            Ok(Self(value))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum UsernameError {
        Empty,
        TooLong,
        InvalidFirstChar,
        InvalidChar { ch: char, index: usize },
    }

    fn validate_username(value: &str) -> Result<(), UsernameError> {
        if value.is_empty() {
            return Err(UsernameError::Empty);
        }
        if value.len() > 128 {
            return Err(UsernameError::TooLong);
        }
        let mut chars = value.chars();
        let Some(first) = chars.next() else {
            return Err(UsernameError::Empty);
        };
        if !first.is_ascii_alphanumeric() {
            return Err(UsernameError::InvalidFirstChar);
        }
        for (index, ch) in value.chars().enumerate() {
            if index == 0 {
                continue;
            }
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-' | '@') {
                continue;
            }
            return Err(UsernameError::InvalidChar { ch, index });
        }
        Ok(())
    }

    /// Product identifier as stored in cart contents. No catalog lookup is
    /// performed anywhere; any i64 is representable.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ProductId(i64);

    impl ProductId {
        pub fn new(value: i64) -> Self {
            Self(value)
        }

        pub fn as_i64(self) -> i64 {
            self.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ids::{ProductId, Username, UsernameError};

    #[test]
    fn username_validation() {
        assert_eq!(Username::try_new("").unwrap_err(), UsernameError::Empty);
        assert_eq!(
            Username::try_new("a".repeat(129)).unwrap_err(),
            UsernameError::TooLong
        );
        assert_eq!(
            Username::try_new("_alice").unwrap_err(),
            UsernameError::InvalidFirstChar
        );
        assert_eq!(
            Username::try_new("al ice").unwrap_err(),
            UsernameError::InvalidChar { ch: ' ', index: 2 }
        );
        assert!(Username::try_new("alice").is_ok());
        assert!(Username::try_new("alice.b-2@shop").is_ok());
    }

    #[test]
    fn product_id_is_transparent() {
        assert_eq!(ProductId::new(42).as_i64(), 42);
        assert_eq!(ProductId::new(-1), ProductId::new(-1));
    }
}
