/// A user column guarded by a unique constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Username,
    Email,
    EmployeeId,
    Unknown,
}

impl UserField {
    /// Map a violated constraint name (e.g. `users_email_key`) to the column it guards.
    pub fn from_constraint(constraint: Option<&str>) -> Self {
        match constraint {
            Some(c) if c.contains("username") => UserField::Username,
            Some(c) if c.contains("employee_id") => UserField::EmployeeId,
            Some(c) if c.contains("email") => UserField::Email,
            _ => UserField::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::Username => "username",
            UserField::Email => "email",
            UserField::EmployeeId => "employee id",
            UserField::Unknown => "unknown field",
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Duplicate { field: UserField, value: String },
    Database(sqlx::Error),
}

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate { .. })
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Duplicate { field, value } if value.is_empty() => {
                write!(f, "User with this {} already exists", field.as_str())
            }
            StoreError::Duplicate { field, value } => {
                write!(f, "User with {} '{value}' already exists", field.as_str())
            }
            StoreError::Database(err) => write!(f, "Database Error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err),
            StoreError::Duplicate { .. } => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}
