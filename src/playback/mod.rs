pub(crate) mod clock;
pub(crate) mod player;
pub(crate) mod stage;
pub(crate) mod state;
