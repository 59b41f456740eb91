pub mod action;
pub mod input;
pub mod module;
pub mod overlay;
pub mod viewport;

pub use action::Action;
pub use input::{PointerBus, PointerEvent, PointerSubscription, SubscriptionId};
pub use module::Module;
pub use overlay::{rect_contains, Overlay, Presentation};
pub use viewport::{Viewport, CELL_WIDTH, DEFAULT_NARROW_BREAKPOINT};
