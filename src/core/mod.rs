pub mod catalog;
pub mod query;
pub mod sync;
pub mod zones;

pub use crate::domain::model::{NewSight, Sight, SightId};
pub use crate::domain::ports::{SightFetcher, SightStore, Storage};
pub use crate::utils::error::Result;
