// Components module - reusable UI building blocks
//
// Shell components are rendered on every frame:
// - Title bar: app name, loading spinner, likes counter
// - Hint bar: key reminders for the current screen
//
// Feed components:
// - Card: one excerpt with like marker and expand hint
// - Toast: transient feedback overlay

pub mod card;
pub mod hint_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
