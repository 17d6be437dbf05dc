//! Causal links between acts.
//!
//! A link records why one act affects the validity of another. The engine
//! stores links alongside their acts and drops them when either end is
//! removed. It never infers link content itself; links are added by callers.

use std::fmt;

use storyline_foundation::{ActId, LinkId};

/// How the source act relates to the target act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkType {
    /// The source makes the target possible.
    Enables,
    /// The source makes the target impossible.
    Prevents,
    /// The source needs the target to have happened.
    Requires,
    /// The two acts cannot both hold.
    Conflicts,
    /// The source causes the target to happen.
    Triggers,
}

impl LinkType {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enables => "ENABLES",
            Self::Prevents => "PREVENTS",
            Self::Requires => "REQUIRES",
            Self::Conflicts => "CONFLICTS",
            Self::Triggers => "TRIGGERS",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which state field ties the two acts together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dependency {
    /// A person's location.
    Position,
    /// An item's owner.
    Ownership,
    /// What a person knows.
    Knowledge,
    /// Whether an entity exists at all.
    Existence,
}

impl Dependency {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Ownership => "ownership",
            Self::Knowledge => "knowledge",
            Self::Existence => "existence",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, directed relation between two acts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CausalLink {
    /// Link identity.
    pub id: LinkId,
    /// The act the link originates from.
    pub from_act_id: ActId,
    /// The act the link points to.
    pub to_act_id: ActId,
    /// The relation.
    pub link_type: LinkType,
    /// Human-readable explanation.
    pub description: String,
    /// The state field involved.
    pub dependency: Dependency,
}

impl CausalLink {
    /// Creates a link with an empty description.
    #[must_use]
    pub fn new(
        id: impl Into<LinkId>,
        from_act_id: impl Into<ActId>,
        to_act_id: impl Into<ActId>,
        link_type: LinkType,
        dependency: Dependency,
    ) -> Self {
        Self {
            id: id.into(),
            from_act_id: from_act_id.into(),
            to_act_id: to_act_id.into(),
            link_type,
            description: String::new(),
            dependency,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns true if the link starts or ends at `act`.
    #[must_use]
    pub fn touches(&self, act: &ActId) -> bool {
        &self.from_act_id == act || &self.to_act_id == act
    }
}

impl fmt::Display for CausalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} (via {})",
            self.from_act_id, self.link_type, self.to_act_id, self.dependency
        )
    }
}
