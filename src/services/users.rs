use actix_web::{get, post, web, HttpResponse};
use log::{debug, error};

use crate::{
    db::users::{insert_new_user, select_users},
    models::user::AddUserQuery,
    AppState,
};

#[post("/add_user")]
pub async fn add_user(
    state: web::Data<AppState>,
    query: Option<web::Query<AddUserQuery>>,
) -> HttpResponse {
    // A query string that fails to deserialize counts as a missing name.
    let name = match query.as_ref().and_then(|q| q.name()) {
        Some(n) => n,
        None => return HttpResponse::BadRequest().body("Send name query param please"),
    };

    match insert_new_user(state.db.as_ref(), name).await {
        Ok(id) => {
            debug!("Inserted user {:?} with id {:?}", name, id);
            HttpResponse::Ok().body("OK")
        }
        Err(why) => {
            error!("Error inserting user: {}", why);
            HttpResponse::InternalServerError().body("Error")
        }
    }
}

#[get("/users")]
pub async fn users(state: web::Data<AppState>) -> HttpResponse {
    match select_users(state.db.as_ref()).await {
        Ok(listed) => HttpResponse::Ok().json(listed),
        Err(why) => {
            error!("Error fetching users: {}", why);
            HttpResponse::InternalServerError().finish()
        }
    }
}
