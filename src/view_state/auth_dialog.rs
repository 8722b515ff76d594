//! Sign-in dialog.

use thiserror::Error;

use crate::widgets::InputBox;

/// Minimum password length accepted by sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

pub const SIGNUP_SUCCESS: &str = "Account created! You can now sign in.";
pub const MAGIC_LINK_SENT: &str = "Check your email for the magic link!";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFormError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
    MagicLink,
}

impl AuthMode {
    pub fn next(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::MagicLink,
            AuthMode::MagicLink => AuthMode::Login,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign In",
            AuthMode::Signup => "Create Account",
            AuthMode::MagicLink => "Magic Link",
        }
    }

    pub fn needs_password(&self) -> bool {
        !matches!(self, AuthMode::MagicLink)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthDialogField {
    #[default]
    Email,
    Password,
}

/// What a submitted dialog asks the auth client to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login { email: String, password: String },
    Signup { email: String, password: String },
    MagicLink { email: String },
}

#[derive(Debug, Clone, Default)]
pub struct AuthDialogState {
    pub mode: AuthMode,
    pub email: InputBox,
    pub password: InputBox,
    pub focus: AuthDialogField,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl AuthDialogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch mode, clearing messages.
    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.error = None;
        self.success = None;
        if !mode.needs_password() {
            self.focus = AuthDialogField::Email;
        }
    }

    pub fn cycle_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AuthDialogField::Email if self.mode.needs_password() => AuthDialogField::Password,
            _ => AuthDialogField::Email,
        };
    }

    pub fn focused_input(&mut self) -> &mut InputBox {
        match self.focus {
            AuthDialogField::Email => &mut self.email,
            AuthDialogField::Password => &mut self.password,
        }
    }

    pub fn validate(&self) -> Result<AuthRequest, AuthFormError> {
        let email = self.email.trimmed().to_string();
        if email.is_empty() {
            return Err(AuthFormError::EmailRequired);
        }
        let password = self.password.get_content().to_string();
        match self.mode {
            AuthMode::MagicLink => Ok(AuthRequest::MagicLink { email }),
            _ if password.is_empty() => Err(AuthFormError::PasswordRequired),
            AuthMode::Signup if password.chars().count() < MIN_PASSWORD_LEN => {
                Err(AuthFormError::PasswordTooShort)
            }
            AuthMode::Signup => Ok(AuthRequest::Signup { email, password }),
            AuthMode::Login => Ok(AuthRequest::Login { email, password }),
        }
    }

    /// Start a request. `None` while one is running or the form is invalid.
    pub fn begin_submit(&mut self) -> Option<AuthRequest> {
        if self.loading {
            return None;
        }
        self.success = None;
        match self.validate() {
            Ok(request) => {
                self.loading = true;
                self.error = None;
                Some(request)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub fn failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Sign-up worked: back to login with the password cleared.
    pub fn signed_up(&mut self) {
        self.loading = false;
        self.set_mode(AuthMode::Login);
        self.password.clear();
        self.success = Some(SIGNUP_SUCCESS.to_string());
    }

    pub fn link_sent(&mut self) {
        self.loading = false;
        self.success = Some(MAGIC_LINK_SENT.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog(mode: AuthMode, email: &str, password: &str) -> AuthDialogState {
        let mut dialog = AuthDialogState::new();
        dialog.set_mode(mode);
        dialog.email.set_content(email.to_string());
        dialog.password.set_content(password.to_string());
        dialog
    }

    #[test]
    fn test_signup_password_length() {
        let short = dialog(AuthMode::Signup, "a@b.c", "12345");
        assert_eq!(short.validate(), Err(AuthFormError::PasswordTooShort));

        let ok = dialog(AuthMode::Signup, "a@b.c", "123456");
        assert!(matches!(ok.validate(), Ok(AuthRequest::Signup { .. })));
    }

    #[test]
    fn test_login_accepts_short_password() {
        let login = dialog(AuthMode::Login, " a@b.c ", "x");
        assert_eq!(
            login.validate(),
            Ok(AuthRequest::Login {
                email: "a@b.c".to_string(),
                password: "x".to_string()
            })
        );
    }

    #[test]
    fn test_magic_link_ignores_password() {
        let magic = dialog(AuthMode::MagicLink, "a@b.c", "");
        assert_eq!(
            magic.validate(),
            Ok(AuthRequest::MagicLink {
                email: "a@b.c".to_string()
            })
        );
    }

    #[test]
    fn test_signup_success_switches_to_login() {
        let mut d = dialog(AuthMode::Signup, "a@b.c", "secret1");
        assert!(d.begin_submit().is_some());
        assert!(d.begin_submit().is_none());
        d.signed_up();
        assert_eq!(d.mode, AuthMode::Login);
        assert_eq!(d.success.as_deref(), Some(SIGNUP_SUCCESS));
        assert!(d.password.is_empty());
        assert!(!d.loading);
    }

    #[test]
    fn test_mode_switch_clears_messages() {
        let mut d = dialog(AuthMode::Login, "", "");
        d.begin_submit();
        assert_eq!(d.error.as_deref(), Some("Email is required"));
        d.cycle_mode();
        assert!(d.error.is_none());
    }
}
