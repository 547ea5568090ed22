use glam::Quat;
use slotmap::{SlotMap, new_key_type};
use vrhand_core::{HandError, Result};

use crate::joint::JointSpec;

new_key_type! {
    /// Handle to a node of a [`Rig`].
    pub struct NodeKey;
}

/// A node of the authoring hierarchy.
///
/// Nodes carry only what the hand needs: hierarchy, the local rotation the
/// pose sink reads, and an optional joint definition used by joint
/// auto-detection.
#[derive(Debug, Clone)]
pub struct RigNode {
    pub name: String,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,

    /// Local rotation, written back by [`Hand::write_pose`](crate::Hand::write_pose).
    pub rotation: Quat,

    /// Present when this node is a finger joint.
    pub joint: Option<JointSpec>,
}

impl RigNode {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            rotation: Quat::IDENTITY,
            joint: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Children in insertion order. Joint auto-detection scans them in this order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn is_joint(&self) -> bool {
        self.joint.is_some()
    }
}

/// Arena holding the skeletal hierarchy of one or more hands.
///
/// The rig is produced by the authoring side (importers, editors, code) and
/// only read by the runtime, except for [`RigNode::rotation`] which the hand
/// writes back every frame.
#[derive(Debug, Default)]
pub struct Rig {
    nodes: SlotMap<NodeKey, RigNode>,
}

impl Rig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub fn create_node(&mut self, name: &str) -> NodeKey {
        self.nodes.insert(RigNode::new(name))
    }

    /// Creates a node already carrying a joint definition.
    pub fn create_joint(&mut self, name: &str, spec: JointSpec) -> NodeKey {
        let mut node = RigNode::new(name);
        node.rotation = spec.rest_rotation;
        node.joint = Some(spec);
        self.nodes.insert(node)
    }

    /// Creates a node and attaches it under `parent`.
    pub fn add_to_parent(&mut self, name: &str, parent: NodeKey) -> Result<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return Err(HandError::UnknownNode);
        }
        let key = self.create_node(name);
        self.attach(key, parent);
        Ok(key)
    }

    /// Makes `child` the last child of `parent`, detaching it from any
    /// previous parent.
    ///
    /// Attaching a node to itself or to one of its own descendants is
    /// refused, which keeps the rig a forest.
    pub fn attach(&mut self, child: NodeKey, parent: NodeKey) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::error!("Node not found during attach!");
            return;
        }
        if self.is_descendant_of(parent, child) {
            log::warn!("Cannot attach a node under its own descendant!");
            return;
        }

        self.detach(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Removes `child` from its parent's children, making it a root.
    pub fn detach(&mut self, child: NodeKey) {
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent
            && let Some(n) = self.nodes.get_mut(p)
            && let Some(i) = n.children.iter().position(|&x| x == child)
        {
            n.children.remove(i);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = None;
        }
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&RigNode> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut RigNode> {
        self.nodes.get_mut(key)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Turns an existing node into a joint, resetting its rotation to the
    /// joint's rest rotation.
    pub fn set_joint(&mut self, key: NodeKey, spec: JointSpec) -> Result<()> {
        let node = self.nodes.get_mut(key).ok_or(HandError::UnknownNode)?;
        node.rotation = spec.rest_rotation;
        node.joint = Some(spec);
        Ok(())
    }

    /// First node with the given name, in arena order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.nodes
            .iter()
            .find_map(|(key, node)| (node.name == name).then_some(key))
    }

    /// Whether `node` lies strictly below `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, node: NodeKey, ancestor: NodeKey) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.nodes.get(key).and_then(|n| n.parent);
        }
        false
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &RigNode)> {
        self.nodes.iter()
    }
}
