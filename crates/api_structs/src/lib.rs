mod feedback;
mod registration;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::feedback::dtos::*;
    pub use crate::registration::dtos::*;
    pub use crate::reminder::dtos::*;
}

pub use crate::feedback::api::*;
pub use crate::registration::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
