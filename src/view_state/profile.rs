//! Profile page and its edit form.

use chrono::NaiveDate;
use thiserror::Error;

use super::step_selection;
use crate::auth::Session;
use crate::models::text_utils::{email_local_part, format_long_date};
use crate::models::{Post, Profile, ProfileUpdate};
use crate::widgets::InputBox;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Birthday must be a date like 1990-06-15")]
    InvalidBirthday,
    #[error("Birthday cannot be in the future")]
    FutureBirthday,
}

/// Parse an optional `YYYY-MM-DD` birthday. Blank clears it.
pub fn parse_birthday(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>, ProfileError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ProfileError::InvalidBirthday)?;
    if date > today {
        return Err(ProfileError::FutureBirthday);
    }
    Ok(Some(date))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Name,
    Birthday,
}

/// Edit form values checked and ready to save.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEdit {
    pub update: ProfileUpdate,
    pub name: String,
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    /// Stored profile; `None` when it does not exist or failed to load
    pub profile: Option<Profile>,
    /// Identity email, used when the profile row is missing
    pub email: String,
    /// Identity creation time, used when the profile row is missing
    pub identity_created_at: Option<String>,
    pub loading_profile: bool,
    pub posts: Vec<Post>,
    pub loading_posts: bool,
    pub selected: usize,
    pub editing: bool,
    pub edit_name: InputBox,
    pub edit_birthday: InputBox,
    pub focus: ProfileField,
    pub saving: bool,
    pub save_error: Option<String>,
}

impl ProfileState {
    /// Fresh state for `session`, with both loads pending.
    pub fn for_session(session: &Session) -> Self {
        Self {
            email: session.email().unwrap_or_default().to_string(),
            identity_created_at: session.user.created_at.clone(),
            loading_profile: true,
            loading_posts: true,
            ..Self::default()
        }
    }

    pub fn name(&self) -> String {
        match &self.profile {
            Some(profile) => profile.display_name(),
            None => email_local_part(&self.email).to_string(),
        }
    }

    pub fn email(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.email.as_str())
            .filter(|e| !e.is_empty())
            .unwrap_or(&self.email)
    }

    pub fn birthday(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.birthday.as_deref())
    }

    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.profile.as_ref().and_then(|p| p.age_on(today))
    }

    /// `January 2, 2024`, from the profile or else the identity.
    pub fn member_since(&self) -> Option<String> {
        self.profile
            .as_ref()
            .map(|p| p.created_at.as_str())
            .filter(|c| !c.is_empty())
            .or(self.identity_created_at.as_deref())
            .map(format_long_date)
    }

    pub fn set_profile(&mut self, profile: Option<Profile>) {
        self.profile = profile;
        self.loading_profile = false;
    }

    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.loading_posts = false;
        self.selected = self.selected.min(self.posts.len().saturating_sub(1));
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.selected = step_selection(self.selected, self.posts.len(), delta);
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.selected)
    }

    pub fn start_editing(&mut self) {
        self.edit_name = InputBox::with_content(self.name());
        self.edit_birthday = InputBox::with_content(self.birthday().unwrap_or_default());
        self.focus = ProfileField::Name;
        self.save_error = None;
        self.editing = true;
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
        self.save_error = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ProfileField::Name => ProfileField::Birthday,
            ProfileField::Birthday => ProfileField::Name,
        };
    }

    pub fn focused_input(&mut self) -> &mut InputBox {
        match self.focus {
            ProfileField::Name => &mut self.edit_name,
            ProfileField::Birthday => &mut self.edit_birthday,
        }
    }

    /// Start saving the edit form.
    ///
    /// `None` while a save is running or when the birthday is invalid
    /// (the message is left in `save_error`).
    pub fn begin_save(&mut self, today: NaiveDate) -> Option<ProfileEdit> {
        if self.saving {
            return None;
        }
        let birthday = match parse_birthday(self.edit_birthday.get_content(), today) {
            Ok(date) => date.map(|d| d.format("%Y-%m-%d").to_string()),
            Err(err) => {
                self.save_error = Some(err.to_string());
                return None;
            }
        };
        let name = self.edit_name.trimmed().to_string();
        let email = Some(self.email().to_string()).filter(|e| !e.is_empty());

        self.saving = true;
        self.save_error = None;
        Some(ProfileEdit {
            update: ProfileUpdate {
                name: Some(name.clone()),
                email,
                avatar_url: None,
                birthday: birthday.clone(),
            },
            name,
            birthday,
        })
    }

    pub fn saved(&mut self, profile: Profile) {
        self.profile = Some(profile);
        self.saving = false;
        self.editing = false;
    }

    pub fn save_failed(&mut self, message: String) {
        self.saving = false;
        self.save_error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn session() -> Session {
        Session {
            user: AuthUser {
                id: "u1".to_string(),
                email: Some("ada@example.com".to_string()),
                created_at: Some("2023-01-05T00:00:00Z".to_string()),
                ..AuthUser::default()
            },
            ..Session::default()
        }
    }

    #[test]
    fn test_parse_birthday() {
        assert_eq!(parse_birthday("  ", today()), Ok(None));
        assert_eq!(
            parse_birthday("1990-06-15", today()),
            Ok(NaiveDate::from_ymd_opt(1990, 6, 15))
        );
        assert_eq!(parse_birthday("15/06/1990", today()), Err(ProfileError::InvalidBirthday));
        assert_eq!(parse_birthday("1990-02-30", today()), Err(ProfileError::InvalidBirthday));
        assert_eq!(parse_birthday("2030-01-01", today()), Err(ProfileError::FutureBirthday));
    }

    #[test]
    fn test_falls_back_to_identity() {
        let state = ProfileState::for_session(&session());
        assert_eq!(state.name(), "ada");
        assert_eq!(state.email(), "ada@example.com");
        assert!(state.member_since().unwrap().contains("2023"));
    }

    #[test]
    fn test_edit_and_save() {
        let mut state = ProfileState::for_session(&session());
        state.start_editing();
        state.edit_name.set_content("  Ada L.  ".to_string());
        state.edit_birthday.set_content("1990-06-15".to_string());

        let edit = state.begin_save(today()).unwrap();
        assert_eq!(edit.update.name.as_deref(), Some("Ada L."));
        assert_eq!(edit.update.email.as_deref(), Some("ada@example.com"));
        assert_eq!(edit.update.birthday.as_deref(), Some("1990-06-15"));
        assert!(state.begin_save(today()).is_none());

        state.saved(Profile {
            id: "u1".to_string(),
            name: Some("Ada L.".to_string()),
            birthday: edit.birthday,
            ..Profile::default()
        });
        assert!(!state.editing);
        assert_eq!(state.age_on(today()), Some(34));
    }

    #[test]
    fn test_invalid_birthday_blocks_save() {
        let mut state = ProfileState::for_session(&session());
        state.start_editing();
        state.edit_birthday.set_content("soon".to_string());
        assert!(state.begin_save(today()).is_none());
        assert!(!state.saving);
        assert_eq!(
            state.save_error.as_deref(),
            Some("Birthday must be a date like 1990-06-15")
        );
    }
}
