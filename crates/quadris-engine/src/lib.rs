pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Why a transition left the game state unchanged.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
)]
pub enum TransitionError {
    #[display("the game is over")]
    GameOver,
    #[display("piece collides with the board or a wall")]
    Collision,
    #[display("no kick offset fits the rotated piece")]
    KicksExhausted,
}
