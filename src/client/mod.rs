pub mod gateway;
pub mod tester_talk_client;

pub use gateway::{error_detail, ApiGateway};
pub use tester_talk_client::TalkClient;
