//! Domain DTOs for the reqres users API.
//!
//! # Design
//! These mirror the upstream JSON shapes but are defined independently of the
//! mock-server crate; integration tests catch schema drift. Envelope fields
//! other than `data` (`support` and the pagination counters) are typed as
//! `Option` so an upstream that omits them still decodes.

use serde::{Deserialize, Deserializer, Serialize};

/// A single user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

/// Promotional block reqres attaches to read responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Support {
    pub url: String,
    pub text: String,
}

/// Response of `GET /users/{id}`: the user wrapped in a `data` envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SingleUser {
    pub data: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<Support>,
}

/// Response of `GET /users?page=n`. `data` keeps upstream order; every
/// pagination field is passed through only when upstream sends it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub data: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<Support>,
}

/// Request payload for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub job: String,
}

/// Echo returned by `POST /users`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatedUser {
    pub id: i64,
    pub name: Option<String>,
    pub job: Option<String>,
    pub created_at: Option<String>,
}

/// Wire form of the creation echo, before the `id` presence check.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedUserBody {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

impl CreatedUserBody {
    pub(crate) fn into_created(self) -> Option<CreatedUser> {
        Some(CreatedUser {
            id: self.id?,
            name: self.name,
            job: self.job,
            created_at: self.created_at,
        })
    }
}

/// reqres echoes ids as strings (`"id": "583"`); accept numbers, whole
/// floats (`3.0`) and numeric strings of either form.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    let id = match Option::<RawId>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawId::Integer(id)) => Some(id),
        Some(RawId::Float(value)) => whole_number(value),
        Some(RawId::Text(text)) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole_number))
        }
    };
    id.map(Some)
        .ok_or_else(|| serde::de::Error::custom("user id is not an integer"))
}

/// `Some` only for finite, fraction-free values that fit in an `i64`.
fn whole_number(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_user_decodes_without_support() {
        let user: SingleUser = serde_json::from_str(
            r#"{"data":{"id":2,"email":"janet.weaver@reqres.in","first_name":"Janet","last_name":"Weaver","avatar":"https://reqres.in/img/faces/2-image.jpg"}}"#,
        )
        .unwrap();
        assert_eq!(user.data.id, 2);
        assert!(user.support.is_none());
    }

    #[test]
    fn page_without_data_is_empty() {
        let page: UserPage = serde_json::from_str(r#"{"page":3,"per_page":6,"total":12}"#).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.page, Some(3));
        assert_eq!(page.total_pages, None);
    }

    #[test]
    fn page_with_only_data_has_no_metadata() {
        let page: UserPage = serde_json::from_str(
            r#"{"data":[{"id":2,"email":"don.henley@eagle.com","first_name":"Don","last_name":"Henley","avatar":"https://reqres.in/img/faces/2-image.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!((page.page, page.per_page, page.total, page.total_pages), (None, None, None, None));

        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("page").is_none());
    }

    #[test]
    fn created_body_accepts_string_id_and_camel_case_timestamp() {
        let body: CreatedUserBody = serde_json::from_str(
            r#"{"name":"Joe Walsh","job":"Guitarist","id":"583","createdAt":"2025-01-27T20:06:20.926Z"}"#,
        )
        .unwrap();
        let created = body.into_created().unwrap();
        assert_eq!(created.id, 583);
        assert_eq!(created.created_at.as_deref(), Some("2025-01-27T20:06:20.926Z"));
    }

    #[test]
    fn created_body_accepts_numeric_id() {
        let body: CreatedUserBody =
            serde_json::from_str(r#"{"id":3,"created_at":"2025-01-27T20:06:20.926Z"}"#).unwrap();
        assert_eq!(body.into_created().unwrap().id, 3);
    }

    #[test]
    fn created_body_accepts_whole_float_id() {
        let body: CreatedUserBody = serde_json::from_str(r#"{"id":3.0}"#).unwrap();
        assert_eq!(body.id, Some(3));

        let body: CreatedUserBody = serde_json::from_str(r#"{"id":"3.0"}"#).unwrap();
        assert_eq!(body.id, Some(3));
    }

    #[test]
    fn created_body_rejects_fractional_or_out_of_range_id() {
        assert!(serde_json::from_str::<CreatedUserBody>(r#"{"id":3.5}"#).is_err());
        assert!(serde_json::from_str::<CreatedUserBody>(r#"{"id":"3.5"}"#).is_err());
        assert!(serde_json::from_str::<CreatedUserBody>(r#"{"id":1e300}"#).is_err());
        assert!(serde_json::from_str::<CreatedUserBody>(r#"{"id":"NaN"}"#).is_err());
    }

    #[test]
    fn created_body_without_id_yields_none() {
        let body: CreatedUserBody = serde_json::from_str(r#"{"name":"Joe Walsh"}"#).unwrap();
        assert!(body.into_created().is_none());

        let body: CreatedUserBody = serde_json::from_str(r#"{"id":null}"#).unwrap();
        assert!(body.into_created().is_none());
    }

    #[test]
    fn created_body_rejects_non_numeric_id() {
        let result: Result<CreatedUserBody, _> = serde_json::from_str(r#"{"id":"abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn new_user_serializes_name_and_job() {
        let json = serde_json::to_value(NewUser {
            name: "Joe Walsh".to_string(),
            job: "Guitarist".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"name": "Joe Walsh", "job": "Guitarist"}));
    }
}
