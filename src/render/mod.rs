/// Turning processed series into screen geometry.
///
/// `projector` maps values to pixels; `frame` runs the transform chain for
/// every visible column and emits draw commands for the UI to play back.

pub mod frame;
pub mod projector;
