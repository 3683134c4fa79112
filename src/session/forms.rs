use crate::models::Role;
use crate::session::SessionError;

const MOBILE_DIGITS: usize = 10;

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub mobile: String,
    /// Sign in with a fingerprint scan instead of an OTP.
    pub fingerprint: bool
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), SessionError> {
        validate_mobile(&self.mobile)
    }
}

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub role: Role,
    pub fingerprint: bool
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.name.trim().chars().count() < 2 {
            return Err(SessionError::InvalidName);
        }

        validate_email(&self.email)?;
        validate_mobile(&self.mobile)
    }
}

fn validate_mobile(mobile: &str) -> Result<(), SessionError> {
    let mobile = mobile.trim();

    if mobile.len() != MOBILE_DIGITS || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(SessionError::InvalidMobile(mobile.to_string()));
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), SessionError> {
    let email = email.trim();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false
    };

    if !valid {
        return Err(SessionError::InvalidEmail(email.to_string()));
    }

    Ok(())
}
