pub mod animation;
pub mod controller;
pub mod human;
pub mod opponent_wait;
pub mod summary;

pub use animation::AnimationSequencer;
pub use controller::Player;
pub use human::{Activation, HumanPlayer};
pub use opponent_wait::{OpponentWaitNotifier, WaitPhase};
pub use summary::{GameSummary, Outcome};
