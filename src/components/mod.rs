pub mod create_greeting;
pub mod effects;
pub mod not_found;
pub mod photo_previews;
pub mod stages;
pub mod view_greeting;

pub use create_greeting::CreateGreetingScreen;
pub use not_found::NotFoundScreen;
pub use view_greeting::ViewGreetingScreen;
