/// Text-backed enum stored as a lowercase TEXT column guarded by a CHECK constraint.
///
/// Generates `as_str`, `Display`, `FromStr` and `TryFrom<String>`; the latter is what
/// `#[sqlx(try_from = "String")]` uses when decoding rows.
macro_rules! text_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::models::ParseEnumError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::models::ParseEnumError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub mod comment;
pub mod company;
pub mod data_request;
pub mod facebook_request;
pub mod holiday;
pub mod session;
pub mod user;

pub use comment::{Category, Comment, CommentWithAuthor, NewComment};
pub use company::{Company, CompanyStatus, CompanyUpdate, CompanyWithCategory, NewCompany};
pub use data_request::{DataRequest, NewDataRequest, RequestStatus};
pub use facebook_request::{FacebookDataRequest, NewFacebookDataRequest};
pub use holiday::{Holiday, HolidayUpdate, NewHoliday};
pub use session::Session;
pub use user::{NewUser, Role, User, UserUpdate};

/// Returned when a text column or input holds a value outside a closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl std::fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}
