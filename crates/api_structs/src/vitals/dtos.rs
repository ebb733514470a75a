use mediscan_domain::{User, Vital, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalDTO {
    pub date: i64,
    pub weight: Option<f64>,
    pub blood_pressure: Option<String>,
    pub sugar: Option<f64>,
}

impl VitalDTO {
    pub fn new(vital: Vital) -> Self {
        Self {
            date: vital.date,
            weight: vital.weight,
            blood_pressure: vital.blood_pressure,
            sugar: vital.sugar,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub email: String,
    pub name: Option<String>,
    pub vitals: Vec<VitalDTO>,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            vitals: user.vitals.into_iter().map(VitalDTO::new).collect(),
        }
    }
}
