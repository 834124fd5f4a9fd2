pub mod api_traits;
pub mod http_client;
