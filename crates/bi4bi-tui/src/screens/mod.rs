//! Wizard screens. Each screen is a [`Component`](crate::component::Component)
//! owned by the app and rendered according to the navigation state.

mod choose_tool;
mod configure;
mod home;

pub use choose_tool::ChooseToolScreen;
pub use configure::ConfigureScreen;
pub use home::HomeScreen;
