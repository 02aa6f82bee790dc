pub mod current_client;
pub mod forecast_client;
pub mod history_client;
pub mod map_client;
