use crate::db::PgPool;
use crate::models::{CreateUserRequest, NewUser, User};
use crate::SESSION_COOKIE;
use diesel::prelude::*;
use rocket::http::{Cookie, CookieJar};
use rocket::time::Duration;
use rocket::State;
use uuid::Uuid;

use super::error::ServiceError;

const SESSION_COOKIE_MAX_AGE_DAYS: i64 = 7;

/// Create a user, adopting the caller's existing `sessionId` cookie as the
/// account's session token or issuing a fresh one when none is present.
pub fn create_user(
    pool: &State<PgPool>,
    cookies: &CookieJar<'_>,
    create_req: &CreateUserRequest,
) -> Result<(), ServiceError> {
    use crate::schema::users::dsl::*;

    let mut conn = pool.get()?;

    let session_token = match cookies.get(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            let token = Uuid::new_v4().to_string();
            cookies.add(
                Cookie::build((SESSION_COOKIE, token.clone()))
                    .path("/")
                    .max_age(Duration::days(SESSION_COOKIE_MAX_AGE_DAYS)),
            );
            token
        }
    };

    // Check if the email is already registered
    let existing_user = users
        .filter(email.eq(&create_req.email))
        .select(User::as_select())
        .first::<User>(&mut conn)
        .optional()?;

    if existing_user.is_some() {
        return Err(ServiceError::Conflict(format!(
            "email '{}' already exists",
            create_req.email
        )));
    }

    let new_user = NewUser {
        id: Uuid::new_v4(),
        session_id: &session_token,
        name: &create_req.name,
        email: &create_req.email,
    };

    diesel::insert_into(users)
        .values(&new_user)
        .execute(&mut conn)?;

    Ok(())
}
