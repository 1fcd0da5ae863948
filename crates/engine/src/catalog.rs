//! Static registry of recipient organizations.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// A recipient organization.
///
/// Catalog entries are fixed at construction time; nothing in the engine
/// mutates or removes one at runtime. Ledger records copy the display name
/// instead of holding a reference, so a future catalog edit can never
/// rewrite history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Estimated people helped per currency unit donated.
    pub impact_per_unit: f64,
    /// Transparency rating in percent.
    pub transparency_score: u8,
}

/// Read-only organization lookup.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    organizations: Vec<Organization>,
}

impl Catalog {
    pub fn new(organizations: Vec<Organization>) -> Self {
        Self { organizations }
    }

    /// The built-in organization set.
    pub fn builtin() -> Self {
        Self::new(vec![
            Organization {
                id: "clean-water".to_string(),
                name: "Clean Water Initiative".to_string(),
                description: "Providing clean drinking water to rural communities".to_string(),
                impact_per_unit: 5.0,
                transparency_score: 98,
            },
            Organization {
                id: "education".to_string(),
                name: "Education for All".to_string(),
                description: "Building schools and providing educational resources".to_string(),
                impact_per_unit: 2.0,
                transparency_score: 95,
            },
            Organization {
                id: "healthcare".to_string(),
                name: "Healthcare Access".to_string(),
                description: "Mobile clinics and medical supplies for underserved areas"
                    .to_string(),
                impact_per_unit: 3.0,
                transparency_score: 97,
            },
        ])
    }

    /// Look up an organization by id.
    ///
    /// Components must resolve an id here before embedding it in any record.
    pub fn organization(&self, id: &str) -> ResultEngine<&Organization> {
        self.organizations
            .iter()
            .find(|org| org.id == id)
            .ok_or_else(|| EngineError::UnknownOrganization(id.to_string()))
    }

    /// All organizations, in catalog order.
    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }
}
