use eframe::egui::pos2;

use crate::hierarchy::{NodeKey, OrgTree, build_tree};
use crate::layout::{LaidOutNode, LayoutProvider, PackBounds, PackedTree};
use crate::notion::{CircleRecord, PersonRef, RoleRecord};

pub(super) struct FixedLayout;

impl LayoutProvider for FixedLayout {
    fn pack(&self, _tree: &OrgTree, _bounds: PackBounds) -> PackedTree {
        let node = |key: NodeKey, parent, x, y, radius| LaidOutNode {
            key,
            parent,
            depth: key.depth(),
            weight: 1,
            center: pos2(x, y),
            radius,
        };
        PackedTree {
            nodes: vec![
                node(NodeKey::Root, None, 380.0, 280.0, 280.0),
                node(NodeKey::Circle(0), Some(0), 380.0, 280.0, 200.0),
                node(NodeKey::Role { circle: 0, role: 0 }, Some(1), 300.0, 280.0, 60.0),
                node(NodeKey::Role { circle: 0, role: 1 }, Some(1), 460.0, 280.0, 60.0),
            ],
        }
    }
}

pub(super) fn tree() -> OrgTree {
    let circles = [CircleRecord {
        circle_id: "1".to_owned(),
        name: "Core".to_owned(),
        purpose: Some("Keep things running".to_owned()),
        projects: Some("Atlas".to_owned()),
        ..CircleRecord::default()
    }];
    let roles = [
        RoleRecord {
            role_id: "r1".to_owned(),
            name: "Lead".to_owned(),
            circle_id: "1".to_owned(),
            purpose: Some("Sets direction".to_owned()),
            responsibilities: Some("- Align priorities - Assign roles".to_owned()),
            people: vec![
                PersonRef {
                    id: "u-1".to_owned(),
                    title: Some("Ana".to_owned()),
                },
                PersonRef {
                    id: "u-2".to_owned(),
                    title: None,
                },
            ],
            page_id: Some("1f2e-33aa".to_owned()),
            ..RoleRecord::default()
        },
        RoleRecord {
            role_id: "r2".to_owned(),
            name: "Scribe".to_owned(),
            circle_id: "1".to_owned(),
            ..RoleRecord::default()
        },
    ];
    build_tree(&circles, &roles)
}
