//! Morph animation between the scatter cloud and the tree
//!
//! Per frame each group relaxes its morph state toward the selected
//! target, eases it, blends every element between its two static
//! positions and layers kind-specific idle motion on top.

mod easing;
mod morph_state;
mod tumble;
mod motion;
mod engine;

pub use easing::{Easing, ease, ease_in_out_cubic};
pub use morph_state::{MorphState, MorphTarget};
pub use tumble::TumbleClock;
pub use motion::{
    Transform, MotionPhase, MotionRule, display_color, ribbon_pulse, micro_twinkle,
    foliage_motion, ornament_motion, micro_light_motion, ribbon_motion, star_motion,
};
pub use engine::{
    GroupId, GroupFrame, StarOutput, MorphEngine, animate_element, evaluate_foliage_vertex,
};
