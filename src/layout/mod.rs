mod enclose;
mod siblings;

use eframe::egui::{Pos2, pos2};

use crate::hierarchy::{NodeKey, OrgTree, RoleNode};

use self::enclose::Lcg;
use self::siblings::pack_siblings;

const PADDING_PASSES: usize = 32;
const PADDING_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Circle {
    x: f64,
    y: f64,
    r: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackBounds {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LaidOutNode {
    pub key: NodeKey,
    pub parent: Option<usize>,
    pub depth: u8,
    pub weight: u32,
    pub center: Pos2,
    pub radius: f32,
}

/// Laid-out nodes in depth-first pre-order; the root is always first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedTree {
    pub nodes: Vec<LaidOutNode>,
}

pub trait LayoutProvider {
    fn pack(&self, tree: &OrgTree, bounds: PackBounds) -> PackedTree;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CirclePacker;

impl LayoutProvider for CirclePacker {
    fn pack(&self, tree: &OrgTree, bounds: PackBounds) -> PackedTree {
        let extent = f64::from(bounds.width.min(bounds.height)).max(0.0);
        let center = Circle {
            x: f64::from(bounds.width) / 2.0,
            y: f64::from(bounds.height) / 2.0,
            r: extent / 2.0,
        };

        let mut root = PackNode::from_tree(tree);
        root.assign_leaf_radii();

        let mut random = Lcg::default();
        root.pack_children(0.0, &mut random);

        if !(root.circle.r > 0.0 && root.circle.r.is_finite()) {
            root.collapse_onto(center);
            return root.flatten();
        }

        let padding = f64::from(bounds.padding).max(0.0);
        if padding > 0.0 && extent > 0.0 {
            root.pack_padded(padding, extent, &mut random);
        }

        let scale = extent / (2.0 * root.circle.r);
        root.circle.x = center.x;
        root.circle.y = center.y;
        root.circle.r *= scale;
        root.translate_children(scale);

        root.flatten()
    }
}

struct PackNode {
    key: NodeKey,
    weight: u32,
    circle: Circle,
    children: Vec<PackNode>,
}

impl PackNode {
    fn from_tree(tree: &OrgTree) -> Self {
        let circles = tree
            .circles
            .iter()
            .enumerate()
            .map(|(circle_index, circle)| {
                let roles = circle
                    .roles
                    .iter()
                    .enumerate()
                    .map(|(role_index, _)| {
                        Self::leaf(
                            NodeKey::Role {
                                circle: circle_index,
                                role: role_index,
                            },
                            RoleNode::WEIGHT,
                        )
                    })
                    .collect();
                Self::branch(NodeKey::Circle(circle_index), circle.weight(), roles)
            })
            .collect();

        Self::branch(NodeKey::Root, tree.weight(), circles)
    }

    fn leaf(key: NodeKey, weight: u32) -> Self {
        Self {
            key,
            weight,
            circle: Circle::default(),
            children: Vec::new(),
        }
    }

    fn branch(key: NodeKey, weight: u32, mut children: Vec<PackNode>) -> Self {
        // Heaviest first; ties keep their incoming order.
        children.sort_by(|a, b| b.weight.cmp(&a.weight));
        Self {
            children,
            ..Self::leaf(key, weight)
        }
    }

    fn assign_leaf_radii(&mut self) {
        if self.children.is_empty() {
            self.circle.r = f64::from(self.weight).sqrt();
        }
        for child in &mut self.children {
            child.assign_leaf_radii();
        }
    }

    fn pack_children(&mut self, padding: f64, random: &mut Lcg) {
        if self.children.is_empty() {
            return;
        }

        for child in &mut self.children {
            child.pack_children(padding, random);
        }

        let mut circles = self
            .children
            .iter()
            .map(|child| Circle {
                r: child.circle.r + padding,
                ..child.circle
            })
            .collect::<Vec<_>>();
        let enclosing = pack_siblings(&mut circles, random);

        for (child, packed) in self.children.iter_mut().zip(&circles) {
            child.circle.x = packed.x;
            child.circle.y = packed.y;
        }
        self.circle.r = enclosing + padding;
    }

    /// Inflating siblings by `p` leaves a `2p` gap, which the final scale
    /// `extent / 2r` turns into `p * extent / r` canvas units. The root radius
    /// grows with `p`, so `p = padding * r(p) / extent` is found by iteration.
    fn pack_padded(&mut self, padding: f64, extent: f64, random: &mut Lcg) {
        let mut pad = padding * self.circle.r / extent;
        for _ in 0..PADDING_PASSES {
            self.pack_children(pad, random);
            let next = padding * self.circle.r / extent;
            if (next - pad).abs() <= PADDING_TOLERANCE * pad {
                break;
            }
            pad = next;
        }
    }

    fn translate_children(&mut self, scale: f64) {
        let origin = self.circle;
        for child in &mut self.children {
            child.circle.x = origin.x + scale * child.circle.x;
            child.circle.y = origin.y + scale * child.circle.y;
            child.circle.r *= scale;
            child.translate_children(scale);
        }
    }

    fn collapse_onto(&mut self, center: Circle) {
        self.circle = center;
        for child in &mut self.children {
            child.collapse_onto(Circle { r: 0.0, ..center });
        }
    }

    fn flatten(self) -> PackedTree {
        let mut nodes = Vec::new();
        self.flatten_into(None, &mut nodes);
        PackedTree { nodes }
    }

    fn flatten_into(self, parent: Option<usize>, nodes: &mut Vec<LaidOutNode>) {
        let index = nodes.len();
        nodes.push(LaidOutNode {
            key: self.key,
            parent,
            depth: self.key.depth(),
            weight: self.weight,
            center: pos2(self.circle.x as f32, self.circle.y as f32),
            radius: self.circle.r.max(0.0) as f32,
        });
        for child in self.children {
            child.flatten_into(Some(index), nodes);
        }
    }
}
