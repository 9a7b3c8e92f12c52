pub mod codec;
pub mod dispatcher;
pub mod messages;
pub mod ws;
