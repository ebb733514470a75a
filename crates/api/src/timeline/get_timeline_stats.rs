use super::parse_timeline_filter;
use crate::{error::MediscanError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use mediscan_api_structs::get_timeline_stats::*;
use mediscan_domain::timeline::compute_stats;
use mediscan_infra::MediscanContext;

pub async fn get_timeline_stats_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<MediscanContext>,
) -> Result<HttpResponse, MediscanError> {
    let user = protect_route(&http_req, &ctx).await?;
    let filter = parse_timeline_filter(&query_params)?;

    let events = ctx
        .repos
        .medical_events
        .find_by_user(&user.id, &filter)
        .await
        .map_err(|_| MediscanError::InternalError)?;

    Ok(HttpResponse::Ok().json(APIResponse::new(compute_stats(&events))))
}
