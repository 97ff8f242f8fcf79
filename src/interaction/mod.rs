mod hit;
mod hover;

pub use hit::{HitRegistry, HitShape, HoverTarget, TooltipLine, TooltipSpec};
pub use hover::{HoverChange, HoverController, HoverState};
