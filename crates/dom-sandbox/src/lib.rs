pub mod document;
pub mod errors;
pub mod framework;
pub mod input;
pub mod mount;

pub use document::{DocumentBody, DocumentLease, Element, Node, SharedDocument};
pub use errors::MountError;
pub use framework::{Framework, FrameworkElement, FrameworkRenderer, RenderError, RenderedOutput};
pub use input::{contains_markup, prepare, CheckInput, Markup, PreparedInput};
pub use mount::{mount, mount_prepared, Mounted, MountedRoot, Ownership};
