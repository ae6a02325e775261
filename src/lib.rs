use diesel::prelude::*;
use rocket::http::{CookieJar, Status};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{catch, catchers, delete, get, post, put, routes, Responder, State};
use uuid::Uuid;

pub mod db;
pub mod models;
pub mod schema;
pub mod services;

use db::PgPool;
use models::{
    CreateUserRequest, MealPayload, MealResponse, MealsResponse, MetricsResponse, User,
};
use services::error::ServiceError;

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "sessionId";

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ErrorDetail {
    pub error: String,
}

#[derive(Responder, Debug)]
pub enum ApiError {
    #[response(status = 400)]
    BadRequest(Json<ErrorDetail>),
    #[response(status = 404)]
    NotFound(Json<ErrorDetail>),
    #[response(status = 422)]
    UnprocessableEntity(Json<ErrorDetail>),
    #[response(status = 500)]
    InternalError(Json<ErrorDetail>),
}

/// Request guard resolving the `sessionId` cookie to its user row.
///
/// The stored token must equal the cookie value exactly. The lookup runs on
/// every request; there is no server-side session cache.
pub struct AuthenticatedUser(pub User);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let pool = match req.rocket().state::<PgPool>() {
            Some(pool) => pool,
            None => return Outcome::Forward(Status::InternalServerError),
        };

        let token = match req.cookies().get(SESSION_COOKIE) {
            Some(cookie) => cookie.value().to_string(),
            None => return Outcome::Forward(Status::Unauthorized),
        };

        match lookup_session_user(pool, &token) {
            Ok(Some(user)) => Outcome::Success(AuthenticatedUser(user)),
            Ok(None) => Outcome::Forward(Status::Unauthorized),
            Err(_) => Outcome::Forward(Status::InternalServerError),
        }
    }
}

fn lookup_session_user(pool: &PgPool, token: &str) -> Result<Option<User>, ServiceError> {
    use schema::users::dsl::*;
    let mut conn = pool.get()?;

    let user = users
        .filter(session_id.eq(token))
        .select(User::as_select())
        .first::<User>(&mut conn)
        .optional()?;

    Ok(user)
}

#[post("/", data = "<create_req>")]
pub fn create_user(
    pool: &State<PgPool>,
    cookies: &CookieJar<'_>,
    create_req: Json<CreateUserRequest>,
) -> Result<Status, ApiError> {
    services::users::create_user(pool, cookies, &create_req)?;
    Ok(Status::Created)
}

#[get("/")]
pub fn list_meals(
    pool: &State<PgPool>,
    user: AuthenticatedUser,
) -> Result<Json<MealsResponse>, ApiError> {
    let meals = services::meals::list_meals(pool, &user.0)?;
    Ok(Json(MealsResponse { meals }))
}

#[get("/metrics")]
pub fn get_metrics(
    pool: &State<PgPool>,
    user: AuthenticatedUser,
) -> Result<Json<MetricsResponse>, ApiError> {
    let metrics = services::metrics::get_metrics(pool, &user.0)?;
    Ok(Json(metrics))
}

#[get("/<meal_id>")]
pub fn get_meal(
    pool: &State<PgPool>,
    user: AuthenticatedUser,
    meal_id: Uuid,
) -> Result<Json<MealResponse>, ApiError> {
    let meal = services::meals::get_meal(pool, &user.0, meal_id)?;
    Ok(Json(MealResponse { meal }))
}

#[post("/", data = "<payload>")]
pub fn create_meal(
    pool: &State<PgPool>,
    user: AuthenticatedUser,
    payload: Json<MealPayload>,
) -> Result<Status, ApiError> {
    services::meals::create_meal(pool, &user.0, &payload)?;
    Ok(Status::Created)
}

#[put("/<meal_id>", data = "<payload>")]
pub fn update_meal(
    pool: &State<PgPool>,
    user: AuthenticatedUser,
    meal_id: Uuid,
    payload: Json<MealPayload>,
) -> Result<Status, ApiError> {
    services::meals::update_meal(pool, &user.0, meal_id, &payload)?;
    Ok(Status::NoContent)
}

#[delete("/<meal_id>")]
pub fn delete_meal(
    pool: &State<PgPool>,
    user: AuthenticatedUser,
    meal_id: Uuid,
) -> Result<Status, ApiError> {
    services::meals::delete_meal(pool, &user.0, meal_id)?;
    Ok(Status::NoContent)
}

fn user_routes() -> Vec<rocket::Route> {
    routes![create_user]
}

fn meal_routes() -> Vec<rocket::Route> {
    routes![list_meals, get_metrics, get_meal, create_meal, update_meal, delete_meal]
}

#[catch(401)]
fn unauthorized_catcher() -> Json<ErrorDetail> {
    Json(ErrorDetail {
        error: "unauthorized".to_string(),
    })
}

#[catch(500)]
fn internal_server_error_catcher() -> Json<ErrorDetail> {
    Json(ErrorDetail {
        error: "internal server error".to_string(),
    })
}

// This function can be used by main.rs to launch the server
// and by tests to get a Rocket instance.
pub fn rocket_instance(pool: PgPool) -> rocket::Rocket<rocket::Build> {
    rocket::build()
        .attach(db::stage(pool))
        .mount("/users", user_routes())
        .mount("/meals", meal_routes())
        .register("/", catchers![unauthorized_catcher, internal_server_error_catcher])
}
