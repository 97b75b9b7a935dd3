//! Static assignee roster.
//!
//! Tasks reference assignees by id only. The roster is fixed reference data;
//! lookups never fail, they fall back to a placeholder name.

use super::AssigneeId;

/// Display name used when a task has no assignee.
pub const UNASSIGNED: &str = "Unassigned";

/// Display name used when an assignee id is not on the roster.
pub const UNKNOWN_ASSIGNEE: &str = "Unknown";

/// A roster member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignee {
    /// Roster identifier referenced by tasks.
    pub id: &'static str,
    /// Full display name.
    pub name: &'static str,
    /// Avatar image URL.
    pub avatar: &'static str,
    /// Contact address, if published.
    pub email: Option<&'static str>,
}

const MEMBERS: [Assignee; 6] = [
    Assignee {
        id: "1",
        name: "John Doe",
        avatar: "https://i.pravatar.cc/150?img=1",
        email: Some("john.doe@company.com"),
    },
    Assignee {
        id: "2",
        name: "Jane Smith",
        avatar: "https://i.pravatar.cc/150?img=2",
        email: Some("jane.smith@company.com"),
    },
    Assignee {
        id: "3",
        name: "Mike Johnson",
        avatar: "https://i.pravatar.cc/150?img=3",
        email: Some("mike.johnson@company.com"),
    },
    Assignee {
        id: "4",
        name: "Sarah Williams",
        avatar: "https://i.pravatar.cc/150?img=4",
        email: Some("sarah.williams@company.com"),
    },
    Assignee {
        id: "5",
        name: "Alex Chen",
        avatar: "https://i.pravatar.cc/150?img=5",
        email: Some("alex.chen@company.com"),
    },
    Assignee {
        id: "6",
        name: "Emily Rodriguez",
        avatar: "https://i.pravatar.cc/150?img=6",
        email: Some("emily.rodriguez@company.com"),
    },
];

/// Read-only view over the roster members.
#[derive(Debug, Clone, Copy)]
pub struct AssigneeRoster {
    members: &'static [Assignee],
}

impl AssigneeRoster {
    /// Returns the built-in roster.
    #[must_use]
    pub const fn builtin() -> Self {
        Self { members: &MEMBERS }
    }

    /// Returns every roster member in roster order.
    #[must_use]
    pub const fn members(&self) -> &'static [Assignee] {
        self.members
    }

    /// Finds a member by id.
    #[must_use]
    pub fn lookup(&self, id: &AssigneeId) -> Option<&'static Assignee> {
        self.members.iter().find(|member| member.id == id.as_str())
    }

    /// Returns the members whose ids appear in `ids`, in roster order.
    #[must_use]
    pub fn lookup_many(&self, ids: &[AssigneeId]) -> Vec<&'static Assignee> {
        self.members
            .iter()
            .filter(|member| ids.iter().any(|id| id.as_str() == member.id))
            .collect()
    }

    /// Resolves a display name, degrading to a placeholder.
    #[must_use]
    pub fn display_name(&self, id: Option<&AssigneeId>) -> &'static str {
        match id {
            None => UNASSIGNED,
            Some(assignee_id) => self
                .lookup(assignee_id)
                .map_or(UNKNOWN_ASSIGNEE, |member| member.name),
        }
    }
}

impl Default for AssigneeRoster {
    fn default() -> Self {
        Self::builtin()
    }
}
