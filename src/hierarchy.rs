use serde_json::Value;
use thiserror::Error;

use crate::notion::{CircleRecord, InvalidRecord, RoleRecord, decode_circles, decode_roles};

pub const ROOT_LABEL: &str = "Organization";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("invalid {dataset} data: {reason}")]
    InvalidInput {
        dataset: &'static str,
        reason: String,
    },
}

impl HierarchyError {
    fn invalid(dataset: &'static str, record: InvalidRecord) -> Self {
        Self::InvalidInput {
            dataset,
            reason: record.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrgTree {
    pub label: String,
    pub circles: Vec<CircleNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircleNode {
    pub record: CircleRecord,
    pub roles: Vec<RoleNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleNode {
    pub record: RoleRecord,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Root,
    Circle(usize),
    Role { circle: usize, role: usize },
}

impl NodeKey {
    pub fn depth(self) -> u8 {
        match self {
            Self::Root => 0,
            Self::Circle(_) => 1,
            Self::Role { .. } => 2,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
    Root(&'a OrgTree),
    Circle(&'a CircleNode),
    Role(&'a RoleNode),
}

impl NodeRef<'_> {
    pub fn name(&self) -> &str {
        match self {
            Self::Root(tree) => &tree.label,
            Self::Circle(circle) => &circle.record.name,
            Self::Role(role) => &role.record.name,
        }
    }
}

impl RoleNode {
    pub const WEIGHT: u32 = 1;
}

impl CircleNode {
    pub fn weight(&self) -> u32 {
        self.roles.len() as u32 * RoleNode::WEIGHT
    }
}

impl OrgTree {
    pub fn weight(&self) -> u32 {
        self.circles.iter().map(CircleNode::weight).sum()
    }

    pub fn role_count(&self) -> usize {
        self.circles.iter().map(|circle| circle.roles.len()).sum()
    }

    pub fn node(&self, key: NodeKey) -> Option<NodeRef<'_>> {
        match key {
            NodeKey::Root => Some(NodeRef::Root(self)),
            NodeKey::Circle(circle) => self.circles.get(circle).map(NodeRef::Circle),
            NodeKey::Role { circle, role } => self
                .circles
                .get(circle)
                .and_then(|circle| circle.roles.get(role))
                .map(NodeRef::Role),
        }
    }
}

/// Trimmed, optionally signed leading digits: `" 12 "` and `"12.0"` are both
/// `12`. Text without leading digits never matches anything.
pub fn normalize_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let value = unsigned[..digits].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

pub fn build_tree(circles: &[CircleRecord], roles: &[RoleRecord]) -> OrgTree {
    let role_keys = roles
        .iter()
        .map(|role| normalize_id(&role.circle_id))
        .collect::<Vec<_>>();

    let circles = circles
        .iter()
        .map(|circle| {
            let key = normalize_id(&circle.circle_id);
            let roles = roles
                .iter()
                .zip(&role_keys)
                .filter(|(_, role_key)| key.is_some() && **role_key == key)
                .map(|(role, _)| RoleNode {
                    record: role.clone(),
                })
                .collect();

            CircleNode {
                record: circle.clone(),
                roles,
            }
        })
        .collect();

    OrgTree {
        label: ROOT_LABEL.to_owned(),
        circles,
    }
}

pub fn build_tree_from_values(circles: &Value, roles: &Value) -> Result<OrgTree, HierarchyError> {
    let circles = circles
        .as_array()
        .ok_or_else(|| not_a_list("circles", circles))?;
    let roles = roles.as_array().ok_or_else(|| not_a_list("roles", roles))?;

    let circles = decode_circles(circles).map_err(|error| HierarchyError::invalid("circles", error))?;
    let roles = decode_roles(roles).map_err(|error| HierarchyError::invalid("roles", error))?;

    Ok(build_tree(&circles, &roles))
}

fn not_a_list(dataset: &'static str, value: &Value) -> HierarchyError {
    let found = match value {
        Value::Object(_) => "an object",
        Value::Null => "null",
        _ => "a scalar",
    };
    HierarchyError::InvalidInput {
        dataset,
        reason: format!("expected a list of records, found {found}"),
    }
}
