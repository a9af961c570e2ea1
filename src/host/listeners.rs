use std::collections::BTreeMap;
use std::rc::Rc;

use crate::dom::document::NodeId;
use crate::foundation::core::Viewport;
use crate::host::environment::Host;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

pub type ResizeCallback = Rc<dyn Fn(&mut Host, Viewport)>;
pub type PointerCallback = Rc<dyn Fn(&mut Host, NodeId)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Enter,
    Leave,
}

pub(crate) struct PointerListener {
    pub(crate) node: NodeId,
    pub(crate) kind: PointerKind,
    pub(crate) cb: PointerCallback,
}

/// Registered listeners, keyed by a shared id sequence so an id never names two listeners.
#[derive(Default)]
pub(crate) struct Listeners {
    next: u64,
    pub(crate) resize: BTreeMap<ListenerId, ResizeCallback>,
    pub(crate) pointer: BTreeMap<ListenerId, PointerListener>,
}

impl Listeners {
    pub(crate) fn next_id(&mut self) -> ListenerId {
        self.next = self.next.saturating_add(1);
        ListenerId(self.next)
    }

    pub(crate) fn resize_snapshot(&self) -> Vec<(ListenerId, ResizeCallback)> {
        self.resize
            .iter()
            .map(|(&id, cb)| (id, Rc::clone(cb)))
            .collect()
    }

    pub(crate) fn pointer_snapshot(
        &self,
        node: NodeId,
        kind: PointerKind,
    ) -> Vec<(ListenerId, PointerCallback)> {
        self.pointer
            .iter()
            .filter(|(_, l)| l.node == node && l.kind == kind)
            .map(|(&id, l)| (id, Rc::clone(&l.cb)))
            .collect()
    }
}
