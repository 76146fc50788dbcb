//! Role classification: Input / Output / Intermediate from edge topology.

use hashbrown::{HashMap, HashSet};

use crate::model::{ObjectId, RelationshipRecord, Role};

/// Disjoint role assignment for every id referenced by a relationship set.
///
/// Iteration follows the order in which ids first appear across the
/// records (subject before object), so downstream output is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleSets {
    order: Vec<ObjectId>,
    roles: HashMap<ObjectId, Role>,
}

impl RoleSets {
    pub fn role_of(&self, id: &str) -> Option<Role> {
        self.roles.get(id).copied()
    }

    /// All classified ids with their role, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, Role)> + '_ {
        self.order.iter().map(move |id| (id, self.roles[id]))
    }

    /// Ids holding `role`, in first-seen order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &ObjectId> + '_ {
        self.iter().filter(move |(_, r)| *r == role).map(|(id, _)| id)
    }

    pub fn input(&self) -> impl Iterator<Item = &ObjectId> + '_ { self.with_role(Role::Input) }
    pub fn output(&self) -> impl Iterator<Item = &ObjectId> + '_ { self.with_role(Role::Output) }
    pub fn intermediate(&self) -> impl Iterator<Item = &ObjectId> + '_ { self.with_role(Role::Intermediate) }

    pub fn len(&self) -> usize { self.order.len() }
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Keep only ids accepted by `keep` (e.g. present in the object lookup).
    pub fn restrict_to(mut self, keep: impl Fn(&ObjectId) -> bool) -> Self {
        let roles = &mut self.roles;
        self.order.retain(|id| {
            let kept = keep(id);
            if !kept {
                roles.remove(id);
            }
            kept
        });
        self
    }
}

/// Partition every referenced id into exactly one role.
///
/// An id that never appears as an object is Input; one that never appears
/// as a subject is Output; anything else is Intermediate, and Intermediate
/// wins whenever an id qualifies for more than one role. Ids on both ends
/// of a self-loop record are forced Intermediate.
pub fn classify_roles(records: &[RelationshipRecord]) -> RoleSets {
    let all_subjects: HashSet<&ObjectId> = records.iter().map(|r| &r.subject_id).collect();
    let all_objects: HashSet<&ObjectId> = records.iter().map(|r| &r.object_id).collect();

    let mut input: HashSet<&ObjectId> = HashSet::new();
    let mut output: HashSet<&ObjectId> = HashSet::new();
    let mut intermediate: HashSet<&ObjectId> = HashSet::new();
    let mut order: Vec<&ObjectId> = Vec::new();
    let mut seen: HashSet<&ObjectId> = HashSet::new();

    for rec in records {
        for id in [&rec.subject_id, &rec.object_id] {
            if seen.insert(id) {
                order.push(id);
            }
        }

        if rec.is_self_loop() {
            intermediate.insert(&rec.subject_id);
            continue;
        }

        if all_objects.contains(&rec.subject_id) {
            intermediate.insert(&rec.subject_id);
        } else {
            input.insert(&rec.subject_id);
        }

        if all_subjects.contains(&rec.object_id) {
            intermediate.insert(&rec.object_id);
        } else {
            output.insert(&rec.object_id);
        }
    }

    // Precedence pass.
    input.retain(|id| !intermediate.contains(id));
    output.retain(|id| !intermediate.contains(id));

    let mut roles = HashMap::with_capacity(order.len());
    for id in &order {
        let role = if intermediate.contains(id) {
            Role::Intermediate
        } else if input.contains(id) {
            Role::Input
        } else {
            debug_assert!(output.contains(id));
            Role::Output
        };
        roles.insert((*id).clone(), role);
    }

    RoleSets {
        order: order.into_iter().cloned().collect(),
        roles,
    }
}
