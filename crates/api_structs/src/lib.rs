mod reminder;
mod status;
mod timeline;
mod vitals;

pub mod dtos {
    pub use crate::reminder::dtos::*;
    pub use crate::timeline::dtos::*;
    pub use crate::vitals::dtos::*;
}

pub use crate::reminder::api::*;
pub use crate::status::api::*;
pub use crate::timeline::api::*;
pub use crate::vitals::api::*;
