use crate::{error::MediscanError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use mediscan_api_structs::calculate_bmi::*;
use mediscan_domain::Bmi;
use mediscan_infra::MediscanContext;

pub async fn calculate_bmi_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<MediscanContext>,
) -> Result<HttpResponse, MediscanError> {
    protect_route(&http_req, &ctx).await?;

    let bmi = Bmi::compute(body.height, body.weight).ok_or_else(|| {
        MediscanError::BadClientData("Height and weight must be positive numbers".into())
    })?;

    Ok(HttpResponse::Ok().json(APIResponse {
        bmi: (bmi.value * 100.0).round() / 100.0,
        category: bmi.category,
    }))
}
