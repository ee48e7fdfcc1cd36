//! Smooth page scrolling.
//!
//! Key presses and wheel ticks are batched into a pending delta and drained
//! once per frame, so holding `j` produces one continuous glide instead of a
//! queue of tiny animations.
//!
//! - `config`: duration and frame-rate helpers over [`ScrollConfig`]
//! - `animation`: the row-based scroll controller
//!
//! ```ignore
//! let mut animator = ScrollAnimator::new(config.ui.scroll.clone());
//! animator.scroll_by(10);
//! let row = animator.update(max_scroll);
//! ```

pub mod animation;
pub mod config;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
