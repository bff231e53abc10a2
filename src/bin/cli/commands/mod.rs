pub mod export;
pub mod preview;
pub mod verify;
