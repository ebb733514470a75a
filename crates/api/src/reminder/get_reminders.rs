use crate::{error::MediscanError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use mediscan_api_structs::get_reminders::*;
use mediscan_infra::MediscanContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<MediscanContext>,
) -> Result<HttpResponse, MediscanError> {
    let user = protect_route(&http_req, &ctx).await?;

    let mut reminders = ctx
        .repos
        .reminders
        .find_by_user(&user.id)
        .await
        .map_err(|_| MediscanError::InternalError)?;
    // Newest first
    reminders.sort_by(|r1, r2| r2.created.cmp(&r1.created));

    Ok(HttpResponse::Ok().json(APIResponse::new(reminders)))
}
