use crate::shared::usecase::{execute, UseCase};
use crate::{error::MediscanError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use mediscan_api_structs::add_vitals::*;
use mediscan_domain::{User, Vital};
use mediscan_infra::MediscanContext;

pub async fn add_vitals_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<MediscanContext>,
) -> Result<HttpResponse, MediscanError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = AddVitalsUseCase {
        user,
        vitals: body.0.vitals,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(MediscanError::from)
}

#[derive(Debug)]
pub struct AddVitalsUseCase {
    pub user: User,
    pub vitals: Vec<VitalBody>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for MediscanError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddVitalsUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "AddVitals";

    async fn execute(&mut self, ctx: &MediscanContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let mut user = self.user.clone();
        user.vitals
            .extend(std::mem::take(&mut self.vitals).into_iter().map(|v| Vital {
                date: v.date.unwrap_or(now),
                weight: v.weight,
                blood_pressure: v.blood_pressure,
                sugar: v.sugar,
            }));

        ctx.repos
            .users
            .save(&user)
            .await
            .map(|_| user)
            .map_err(|_| UseCaseError::StorageError)
    }
}
