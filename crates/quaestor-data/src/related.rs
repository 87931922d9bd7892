use serde::{Deserialize, Serialize};

/// Reference to the event or project a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum EntityRef {
    Event(u32),
    Project(u32),
}

impl EntityRef {
    pub fn kind(&self) -> &'static str {
        match self {
            EntityRef::Event(_) => "event",
            EntityRef::Project(_) => "project",
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            EntityRef::Event(id) => *id,
            EntityRef::Project(id) => *id,
        }
    }

    /// Rebuild a reference from its stored kind and id columns.
    pub fn from_parts(kind: &str, id: u32) -> Option<Self> {
        match kind {
            "event" => Some(EntityRef::Event(id)),
            "project" => Some(EntityRef::Project(id)),
            _ => None,
        }
    }
}

/// Target of a contribution. Unlike a transaction reference the
/// target is always present; the organization itself is the
/// catch-all and carries no id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ContributionTarget {
    Event(u32),
    Project(u32),
    #[default]
    Organization,
}

impl ContributionTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            ContributionTarget::Event(_) => "event",
            ContributionTarget::Project(_) => "project",
            ContributionTarget::Organization => "organization",
        }
    }

    pub fn id(&self) -> Option<u32> {
        match self {
            ContributionTarget::Event(id) => Some(*id),
            ContributionTarget::Project(id) => Some(*id),
            ContributionTarget::Organization => None,
        }
    }

    pub fn from_parts(kind: &str, id: Option<u32>) -> Option<Self> {
        match (kind, id) {
            ("event", Some(id)) => Some(ContributionTarget::Event(id)),
            ("project", Some(id)) => Some(ContributionTarget::Project(id)),
            ("organization", _) => Some(ContributionTarget::Organization),
            _ => None,
        }
    }

    /// The transaction-side reference for this target, if there is one.
    pub fn as_entity_ref(&self) -> Option<EntityRef> {
        match self {
            ContributionTarget::Event(id) => Some(EntityRef::Event(*id)),
            ContributionTarget::Project(id) => Some(EntityRef::Project(*id)),
            ContributionTarget::Organization => None,
        }
    }
}

impl From<EntityRef> for ContributionTarget {
    fn from(entity: EntityRef) -> Self {
        match entity {
            EntityRef::Event(id) => ContributionTarget::Event(id),
            EntityRef::Project(id) => ContributionTarget::Project(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ref_parts() {
        let entity = EntityRef::Project(23);
        assert_eq!(entity.kind(), "project");
        assert_eq!(entity.id(), 23);
        assert_eq!(EntityRef::from_parts("project", 23), Some(entity));
        assert_eq!(EntityRef::from_parts("organization", 23), None);
    }

    #[test]
    fn test_target_parts() {
        let target = ContributionTarget::from_parts("organization", None).unwrap();
        assert_eq!(target, ContributionTarget::Organization);
        assert_eq!(target.id(), None);
        assert_eq!(target.as_entity_ref(), None);

        let target = ContributionTarget::from_parts("event", Some(5)).unwrap();
        assert_eq!(target.as_entity_ref(), Some(EntityRef::Event(5)));
        assert_eq!(ContributionTarget::from_parts("event", None), None);
    }
}
