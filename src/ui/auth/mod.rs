//! Password-based account screens: login, sign-up and the local reset flow.
//!
//! All of them are plain forms; this module builds them and turns a filled
//! form into a request or the alert text explaining what is missing.

use crate::api::Registration;
use crate::ui::form::{FormState, TextField};

pub const LOGIN_MISSING: &str = "Please enter both email and password";
pub const SIGNUP_MISSING: &str = "All fields are required.";
pub const EMAIL_MISSING: &str = "Please enter your email.";
pub const ANSWER_MISSING: &str = "Please enter your answer.";
pub const PASSWORD_MISSING: &str = "Password cannot be empty.";

pub fn login_form() -> FormState {
    FormState::new(vec![TextField::new("Email"), TextField::masked("Password")])
}

pub fn create_account_form() -> FormState {
    FormState::new(vec![
        TextField::new("Email"),
        TextField::masked("Password"),
        TextField::new("Security question"),
        TextField::new("Security answer"),
    ])
}

pub fn forgot_password_form() -> FormState {
    FormState::new(vec![TextField::new("Email")])
}

pub fn security_answer_form() -> FormState {
    FormState::new(vec![TextField::new("Answer")])
}

pub fn reset_password_form() -> FormState {
    FormState::new(vec![TextField::masked("New password")])
}

/// Email (trimmed) and password from the login form.
pub fn login_request(form: &FormState) -> Result<(String, String), &'static str> {
    let email = form.value(0).trim();
    let password = form.value(1);
    if email.is_empty() || password.is_empty() {
        return Err(LOGIN_MISSING);
    }
    Ok((email.to_string(), password.to_string()))
}

pub fn registration_request(form: &FormState) -> Result<Registration, &'static str> {
    if form.any_blank() {
        return Err(SIGNUP_MISSING);
    }
    Ok(Registration {
        email: form.value(0).trim().to_string(),
        password: form.value(1).to_string(),
        security_question: form.value(2).trim().to_string(),
        security_answer: form.value(3).trim().to_string(),
    })
}

pub fn single_value(form: &FormState, missing: &'static str) -> Result<String, &'static str> {
    let value = form.value(0).trim();
    if value.is_empty() {
        return Err(missing);
    }
    Ok(value.to_string())
}
