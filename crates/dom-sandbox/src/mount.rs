use a11y_core_types::NodeId;
use serde::Serialize;
use tracing::{debug, warn};

use crate::document::{DocumentBody, DocumentLease, Element, Node};
use crate::errors::MountError;
use crate::framework::FrameworkRenderer;
use crate::input::{prepare, CheckInput, PreparedInput};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    /// The caller attached the element; the sandbox leaves it alone.
    Borrowed,
    /// The sandbox mutated the body and undoes it on restore.
    Owned,
}

/// Snapshot of the mounted root handed to the rule engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MountedRoot {
    pub node_id: NodeId,
    pub tag_name: String,
    pub outer_html: String,
    pub ownership: Ownership,
}

impl MountedRoot {
    fn of(element: &Element, ownership: Ownership) -> Self {
        Self {
            node_id: element.id(),
            tag_name: element.tag_name().to_string(),
            outer_html: element.outer_html(),
            ownership,
        }
    }
}

#[derive(Debug)]
enum Restore {
    Borrowed,
    ReplaceBody(Vec<Node>),
    RemoveContainer(NodeId),
}

/// A mounted input together with its undo action.
///
/// Holds the document lease until restored, so no other check can touch
/// the body in between. Restoring happens exactly once: either through
/// [`Mounted::restore`] or, failing that, when the value is dropped.
#[derive(Debug)]
pub struct Mounted {
    lease: DocumentLease,
    root: MountedRoot,
    restore: Option<Restore>,
}

impl Mounted {
    pub fn root(&self) -> &MountedRoot {
        &self.root
    }

    pub fn ownership(&self) -> Ownership {
        self.root.ownership
    }

    pub fn document(&self) -> &DocumentBody {
        &self.lease
    }

    /// Undoes the mount and releases the document lease.
    pub fn restore(mut self) {
        self.run_restore();
    }

    fn run_restore(&mut self) {
        let Some(restore) = self.restore.take() else {
            return;
        };
        match restore {
            Restore::Borrowed => {}
            Restore::ReplaceBody(children) => self.lease.replace_children(children),
            Restore::RemoveContainer(id) => {
                if self.lease.remove_child(id).is_none() {
                    warn!(node = %id, "mounted container vanished before restore");
                }
            }
        }
        debug!(node = %self.root.node_id, ownership = ?self.root.ownership, "document restored");
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if self.restore.is_some() {
            warn!(node = %self.root.node_id, "mount dropped before restore; restoring now");
            self.run_restore();
        }
    }
}

/// Validates `input` and mounts it. Validation errors leave the document
/// untouched.
pub fn mount(
    lease: DocumentLease,
    input: CheckInput,
    renderer: Option<&dyn FrameworkRenderer>,
) -> Result<Mounted, MountError> {
    let prepared = prepare(input, renderer)?;
    Ok(mount_prepared(lease, prepared))
}

pub fn mount_prepared(mut lease: DocumentLease, input: PreparedInput) -> Mounted {
    match input {
        PreparedInput::Element(element) => {
            if let Some(attached) = lease.element(element.id()) {
                let root = MountedRoot::of(attached, Ownership::Borrowed);
                debug!(node = %root.node_id, "mounting borrowed element");
                return Mounted {
                    lease,
                    root,
                    restore: Some(Restore::Borrowed),
                };
            }
            let snapshot = lease.snapshot();
            let root = MountedRoot::of(&element, Ownership::Owned);
            lease.append_element(element);
            debug!(node = %root.node_id, "mounted detached element");
            Mounted {
                lease,
                root,
                restore: Some(Restore::ReplaceBody(snapshot)),
            }
        }
        PreparedInput::Markup(markup) => {
            let container = Element::new("div").with_inner_html(markup.into_inner());
            let root = MountedRoot::of(&container, Ownership::Owned);
            let id = lease.append_element(container);
            debug!(node = %id, "mounted markup container");
            Mounted {
                lease,
                root,
                restore: Some(Restore::RemoveContainer(id)),
            }
        }
    }
}
