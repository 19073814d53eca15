/// Everything a screen needs to render. `Default` is the freshly mounted
/// state, so the `App` can move it out with `std::mem::take`.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
