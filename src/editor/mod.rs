/// Pointer gesture state machine.
pub mod gesture;
/// The editing session tying model, controller, loader and renderer together.
pub mod session;
