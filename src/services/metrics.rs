use crate::db::PgPool;
use crate::models::{MetricsResponse, User};
use diesel::prelude::*;
use rocket::State;

use super::error::ServiceError;

/// Adherence metrics over the caller's entire meal history.
pub fn get_metrics(pool: &State<PgPool>, owner: &User) -> Result<MetricsResponse, ServiceError> {
    use crate::schema::meals::dsl::*;
    let mut conn = pool.get()?;

    // Newest first; created_at breaks ties between meals sharing an
    // occurrence timestamp.
    let flags = meals
        .filter(user_id.eq(owner.id))
        .order((date.desc(), created_at.desc()))
        .select(is_on_diet)
        .load::<bool>(&mut conn)?;

    Ok(compute_metrics(&flags))
}

/// One pass over the time-ordered diet flags: total counts plus the longest
/// contiguous on-diet run.
fn compute_metrics(flags: &[bool]) -> MetricsResponse {
    let mut meals_on_diet = 0i64;
    let mut best_sequence = 0i64;
    let mut current_sequence = 0i64;

    for &on_diet in flags {
        if on_diet {
            meals_on_diet += 1;
            current_sequence += 1;
            best_sequence = best_sequence.max(current_sequence);
        } else {
            current_sequence = 0;
        }
    }

    MetricsResponse {
        total_meals: flags.len() as i64,
        total_meals_on_diet: meals_on_diet,
        total_meals_off_diet: flags.len() as i64 - meals_on_diet,
        best_on_diet_sequence: best_sequence,
    }
}
