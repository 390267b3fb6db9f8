//! User DTOs.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Email, Password, Username, ValueObjectError},
    usecase::RegisterUserInput,
};

/// Public user information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Registration form; both passwords are write-only
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

impl TryFrom<RegistrationRequest> for RegisterUserInput {
    type Error = ValueObjectError;

    fn try_from(request: RegistrationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: Username::new(request.username)?,
            email: Email::new(request.email)?,
            password: Password::new(request.password)?,
            password_confirmation: Password::new(request.password2)?,
        })
    }
}
