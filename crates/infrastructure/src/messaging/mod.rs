pub mod channel_publisher;
pub mod json_lines_publisher;

pub use channel_publisher::ChannelEventPublisher;
pub use json_lines_publisher::JsonLinesPublisher;
