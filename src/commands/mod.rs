mod from;
mod new;
mod pack;

pub use from::*;
pub use new::*;
pub use pack::*;
