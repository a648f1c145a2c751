//! User model and service.
//!
//! Users are employees as exposed to people managing the account: name,
//! phone number, email and categories are always present, and the external
//! id is free-form text.

use serde::{Deserialize, Deserializer, Serialize};

use super::employee::{EMPLOYEES, EMPLOYEE_COST_CENTERS, EMPLOYEE_FIELDS};
use super::{is_false, is_zero, CostCenter};
use crate::client::Client;
use crate::context::Context;
use crate::error::Result;
use crate::filter::{resolve_filter, Filter};

/// Phone of a [`User`]. The number is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPhone {
    #[serde(default)]
    pub number: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
}

/// An existing user of the 99 corporate account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub phone: UserPhone,

    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub national_id: String,

    /// Sent as text. The employee endpoints answer with a number, so both
    /// forms are read.
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "string_or_number"
    )]
    pub external_id: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub supervisor_id: i64,

    #[serde(default, skip_serializing_if = "is_false")]
    pub enabled: bool,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExternalId {
    Text(String),
    Int(i64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ExternalId>::deserialize(deserializer)? {
        Some(ExternalId::Text(text)) => text,
        Some(ExternalId::Int(n)) => n.to_string(),
        Some(ExternalId::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Body of user create requests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRequest<'a> {
    employee: &'a User,
    #[serde(skip_serializing_if = "is_false")]
    send_welcome_email: bool,
}

/// User operations. Obtained from [`Client::users`].
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a Client,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List users. Accepts the same filter keys as employees.
    #[tracing::instrument(skip(self, ctx, filter))]
    pub async fn find(&self, ctx: &Context, filter: Option<&Filter>) -> Result<Vec<User>> {
        let query = resolve_filter(filter, EMPLOYEE_FIELDS);
        let users: Option<Vec<User>> = self.client.get(ctx, &EMPLOYEES.query(&query)).await?;
        Ok(users.unwrap_or_default())
    }

    /// Register a user, optionally sending the welcome email.
    #[tracing::instrument(skip(self, ctx, user))]
    pub async fn create(
        &self,
        ctx: &Context,
        user: &User,
        send_welcome_email: bool,
    ) -> Result<User> {
        let body = UserRequest {
            employee: user,
            send_welcome_email,
        };
        let created: Option<User> = self.client.post(ctx, &EMPLOYEES.path(), &body).await?;
        Ok(created.unwrap_or_default())
    }

    /// Cost centers the user can bill rides to.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn cost_centers(&self, ctx: &Context, user_id: i64) -> Result<Vec<CostCenter>> {
        let path = EMPLOYEE_COST_CENTERS.format(&[&user_id]);
        let cost_centers: Option<Vec<CostCenter>> = self.client.get(ctx, &path).await?;
        Ok(cost_centers.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_external_id_accepts_number_or_text() {
        let numeric: User = serde_json::from_str(r#"{"externalId":55091}"#).unwrap();
        assert_eq!(numeric.external_id, "55091");

        let text: User = serde_json::from_str(r#"{"externalId":"ms-126"}"#).unwrap();
        assert_eq!(text.external_id, "ms-126");

        let null: User = serde_json::from_str(r#"{"externalId":null}"#).unwrap();
        assert_eq!(null.external_id, "");

        assert!(serde_json::from_str::<User>(r#"{"externalId":true}"#).is_err());
    }

    #[test]
    fn test_user_mandatory_fields_always_sent() {
        let json = serde_json::to_string(&User::default()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"","phone":{"number":""},"email":"","categories":[]}"#
        );
    }

    #[test]
    fn test_user_request_omits_false_welcome_email() {
        let user = User {
            name: "Ana".to_string(),
            ..Default::default()
        };
        let quiet = UserRequest {
            employee: &user,
            send_welcome_email: false,
        };
        let json = serde_json::to_value(&quiet).unwrap();
        assert!(json.get("sendWelcomeEmail").is_none());

        let loud = UserRequest {
            employee: &user,
            send_welcome_email: true,
        };
        let json = serde_json::to_value(&loud).unwrap();
        assert_eq!(json["sendWelcomeEmail"], true);
        assert_eq!(json["employee"]["name"], "Ana");
    }

    #[test]
    fn test_user_deserialize() {
        let json = r#"{"id":7,"name":"Ana","phone":{"number":"11988887777","country":"BRA"},"email":"ana@empresa.com.br","externalId":"A-7","categories":["pop99"]}"#;
        let user: User = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(user.id, 7);
        assert_eq!(user.external_id, "A-7");
        assert_eq!(user.phone.country, "BRA");
    }
}
