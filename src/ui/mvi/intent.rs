/// Something that happened to a screen: a key the user pressed or the
/// result of a command coming back from the effects worker.
pub trait Intent: Send + 'static {}
