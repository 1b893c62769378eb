pub mod artist;
pub mod gateway;
pub mod live;
pub mod resolve;
pub mod session;

pub use gateway::{ContentGateway, ContentstackGateway, GatewayError};
pub use live::{LiveEditChannel, Subscription};
pub use session::PageSession;
