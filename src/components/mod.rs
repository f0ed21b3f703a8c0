pub mod channel_manager;
pub mod icon;
pub mod nav_bar;
pub mod notification;
pub mod router;
pub mod top;

pub use channel_manager::ChannelManager;
pub use nav_bar::NavBar;
pub use notification::Notification;
pub use top::Top;
