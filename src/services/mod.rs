pub mod greeting_api;
pub mod preview;
pub mod timer;

pub use greeting_api::GreetingApi;
