//! Author profiles stored in the `users` table.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::text_utils::email_local_part;
use super::{deserialize_id, deserialize_nullable_bool, deserialize_nullable_string};

/// Profile row. `id` equals the auth identity id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_bool")]
    pub is_admin: bool,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub created_at: String,
}

impl Profile {
    /// Name, else the email local part.
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| email_local_part(&self.email).to_string())
    }

    pub fn birthday_date(&self) -> Option<NaiveDate> {
        self.birthday
            .as_deref()
            .and_then(|b| NaiveDate::parse_from_str(b.trim(), "%Y-%m-%d").ok())
    }

    /// Age in whole years on `today`.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        age_on(self.birthday_date()?, today)
    }
}

/// Whole years between `birth` and `today`; `None` for future birthdays.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Row inserted for a newly seen identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub avatar_url: Option<String>,
}

impl NewProfile {
    /// Name defaults to the email local part.
    pub fn new(id: &str, email: &str, name: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email_local_part(email));
        Self {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            is_admin: false,
            avatar_url: None,
        }
    }
}

/// Profile edit. `birthday` is always written, `None` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<Option<String>>,
    pub birthday: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let birth = date("1990-06-15");
        assert_eq!(age_on(birth, date("2024-06-14")), Some(33));
        assert_eq!(age_on(birth, date("2024-06-15")), Some(34));
        assert_eq!(age_on(birth, date("1980-01-01")), None);
    }

    #[test]
    fn test_profile_age_requires_valid_birthday() {
        let mut profile = Profile {
            birthday: Some("not-a-date".to_string()),
            ..Profile::default()
        };
        assert_eq!(profile.age_on(date("2024-01-01")), None);

        profile.birthday = Some("2000-01-01".to_string());
        assert_eq!(profile.age_on(date("2024-01-01")), Some(24));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let profile = Profile {
            email: "grace@example.com".to_string(),
            name: Some(" ".to_string()),
            ..Profile::default()
        };
        assert_eq!(profile.display_name(), "grace");
    }

    #[test]
    fn test_new_profile_defaults_name() {
        let p = NewProfile::new("u1", "grace@example.com", None);
        assert_eq!(p.name, "grace");
        assert!(!p.is_admin);

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["avatar_url"], serde_json::Value::Null);
    }

    #[test]
    fn test_update_always_writes_birthday() {
        let update = ProfileUpdate {
            name: Some("Grace".to_string()),
            ..ProfileUpdate::default()
        };
        let json = serde_json::to_value(update).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Grace", "birthday": null}));
    }
}
