pub mod message;

pub use message::FileMessageRepository;
