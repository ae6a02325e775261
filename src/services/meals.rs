use crate::db::PgPool;
use crate::models::{Meal, MealChangeset, MealPayload, NewMeal, User};
use chrono::Utc;
use diesel::prelude::*;
use rocket::State;
use uuid::Uuid;

use super::error::ServiceError;

// Every query below filters by owner inside the statement itself; a meal is
// never fetched by id alone with the owner compared afterwards in application
// code.

pub fn list_meals(pool: &State<PgPool>, owner: &User) -> Result<Vec<Meal>, ServiceError> {
    use crate::schema::meals::dsl::*;
    let mut conn = pool.get()?;

    let items = meals
        .filter(user_id.eq(owner.id))
        .order(date.asc())
        .select(Meal::as_select())
        .load::<Meal>(&mut conn)?;

    Ok(items)
}

pub fn get_meal(pool: &State<PgPool>, owner: &User, meal_id: Uuid) -> Result<Meal, ServiceError> {
    use crate::schema::meals::dsl::*;
    let mut conn = pool.get()?;

    let item = meals
        .filter(id.eq(meal_id).and(user_id.eq(owner.id)))
        .select(Meal::as_select())
        .first::<Meal>(&mut conn)
        .optional()?;

    item.ok_or_else(|| ServiceError::NotFound("meal not found".to_string()))
}

pub fn create_meal(
    pool: &State<PgPool>,
    owner: &User,
    payload: &MealPayload,
) -> Result<(), ServiceError> {
    use crate::schema::meals::dsl::*;
    let mut conn = pool.get()?;

    let occurred_at = normalized_date(payload)?;
    let new_meal = NewMeal {
        id: Uuid::new_v4(),
        user_id: owner.id,
        name: &payload.name,
        description: &payload.description,
        date: occurred_at,
        is_on_diet: payload.is_on_diet,
    };

    diesel::insert_into(meals)
        .values(&new_meal)
        .execute(&mut conn)?;

    Ok(())
}

pub fn update_meal(
    pool: &State<PgPool>,
    owner: &User,
    meal_id: Uuid,
    payload: &MealPayload,
) -> Result<(), ServiceError> {
    use crate::schema::meals::dsl::*;
    let mut conn = pool.get()?;

    let occurred_at = normalized_date(payload)?;
    let changes = MealChangeset {
        name: &payload.name,
        description: &payload.description,
        date: occurred_at,
        is_on_diet: payload.is_on_diet,
        updated_at: Utc::now().naive_utc(),
    };

    // Single statement; all mutable fields replaced together.
    let updated = diesel::update(meals.filter(id.eq(meal_id).and(user_id.eq(owner.id))))
        .set(&changes)
        .execute(&mut conn)?;

    if updated == 0 {
        return Err(ServiceError::NotFound("meal not found".to_string()));
    }

    Ok(())
}

pub fn delete_meal(
    pool: &State<PgPool>,
    owner: &User,
    meal_id: Uuid,
) -> Result<(), ServiceError> {
    use crate::schema::meals::dsl::*;
    let mut conn = pool.get()?;

    let deleted = diesel::delete(meals.filter(id.eq(meal_id).and(user_id.eq(owner.id))))
        .execute(&mut conn)?;

    if deleted == 0 {
        return Err(ServiceError::NotFound("meal not found".to_string()));
    }

    Ok(())
}

fn normalized_date(payload: &MealPayload) -> Result<i64, ServiceError> {
    payload
        .date
        .to_epoch_millis()
        .map_err(|e| ServiceError::InvalidInput(format!("invalid meal date: {e}")))
}
