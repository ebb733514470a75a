use crate::dtos::UserDTO;
use mediscan_domain::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct ProfileResponse {
    pub user: UserDTO,
}

impl ProfileResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

pub mod get_profile {
    use super::*;

    pub type APIResponse = ProfileResponse;
}

pub mod add_vitals {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VitalBody {
        /// Defaults to the time of the request
        #[serde(default)]
        pub date: Option<i64>,
        #[serde(default)]
        pub weight: Option<f64>,
        #[serde(default)]
        pub blood_pressure: Option<String>,
        #[serde(default)]
        pub sugar: Option<f64>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        pub vitals: Vec<VitalBody>,
    }

    pub type APIResponse = ProfileResponse;
}

pub mod calculate_bmi {
    use super::*;
    use mediscan_domain::BmiCategory;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        /// Centimeters
        pub height: f64,
        /// Kilograms
        pub weight: f64,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        /// Rounded to two decimals
        pub bmi: f64,
        pub category: BmiCategory,
    }
}
