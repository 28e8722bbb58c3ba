pub mod announcement;
mod batch;
mod constants;
mod error;
pub mod fcm;
pub mod message;
mod model;
pub mod srv;
#[cfg(test)]
pub mod testing;
pub mod user;
mod util;

pub use announcement::{fan_out, on_announcement_created};
pub use batch::*;
pub use constants::*;
pub use error::*;
pub use fcm::{AccessTokenSource, DispatchGateway, FcmGateway, StaticToken};
pub use message::build_message;
pub use model::*;
pub use srv::AppState;
pub use user::{Directory, FirestoreDirectory};
pub use util::*;
