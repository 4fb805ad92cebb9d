mod countries;
mod health;
mod search;

pub use countries::{get_country, list_countries};
pub use health::health_check;
pub use search::search;
