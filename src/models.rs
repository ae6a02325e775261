// meals_backend/src/models.rs
use crate::schema::{meals, users};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use rocket::serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Identifiable, Selectable, Serialize, Debug, PartialEq, Clone)]
#[diesel(table_name = users)]
#[serde(crate = "rocket::serde")]
pub struct User {
    pub id: Uuid,
    #[serde(skip_serializing)] // Session token must never appear in a response body
    pub session_id: String,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub id: Uuid,
    pub session_id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Queryable, Identifiable, Selectable, Associations, Serialize, Deserialize, Debug, PartialEq, Clone)]
#[diesel(belongs_to(User))]
#[diesel(table_name = meals)]
#[serde(crate = "rocket::serde")]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    /// Occurrence time as epoch milliseconds, not the row's creation time.
    pub date: i64,
    pub is_on_diet: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = meals)]
pub struct NewMeal<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub date: i64,
    pub is_on_diet: bool,
}

// Full-row replacement for PUT; partial updates are not supported.
#[derive(AsChangeset)]
#[diesel(table_name = meals)]
pub struct MealChangeset<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub date: i64,
    pub is_on_diet: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

// Shared body for POST /meals and PUT /meals/<id>; all fields mandatory.
#[derive(Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct MealPayload {
    pub name: String,
    pub description: String,
    pub date: MealDate,
    #[serde(rename = "isOnDiet")]
    pub is_on_diet: bool,
}

/// Meal occurrence time as supplied by the client: either epoch milliseconds
/// or a timestamp string.
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "rocket::serde", untagged)]
pub enum MealDate {
    Epoch(i64),
    Text(String),
}

impl MealDate {
    /// Normalizes to the stored representation, epoch milliseconds.
    ///
    /// Accepted string forms: RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
    /// timestamp (read as UTC), or a bare `YYYY-MM-DD` date (midnight UTC).
    pub fn to_epoch_millis(&self) -> Result<i64, chrono::ParseError> {
        match self {
            MealDate::Epoch(millis) => Ok(*millis),
            MealDate::Text(text) => {
                if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                    return Ok(dt.timestamp_millis());
                }
                if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
                    return Ok(dt.and_utc().timestamp_millis());
                }
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .map(|d| d.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct MealsResponse {
    pub meals: Vec<Meal>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct MealResponse {
    pub meal: Meal,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct MetricsResponse {
    pub total_meals: i64,
    pub total_meals_on_diet: i64,
    pub total_meals_off_diet: i64,
    pub best_on_diet_sequence: i64,
}
