use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resource categories in display-precedence order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceCategory {
    VehicleService,
    PersonnelService,
    Vehicle,
    Personnel,
    Other,
}

impl ResourceCategory {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ResourceCategory::VehicleService => "Vehicle services",
            ResourceCategory::PersonnelService => "Personnel services",
            ResourceCategory::Vehicle => "Vehicles",
            ResourceCategory::Personnel => "Personnel",
            ResourceCategory::Other => "Other",
        }
    }
}

/// A schedulable row owner (vehicle, person, pool member). Supplied by
/// the host's master data; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub category: ResourceCategory,
    pub pool_id: Option<String>,
    /// Explicit display name for the pool; overrides the generated
    /// group label when present.
    pub pool_name: Option<String>,
}

/// Composite grouping key: resources share a group when both category
/// and pool match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub category: ResourceCategory,
    pub pool_id: Option<String>,
}

/// One collapsible band of the row list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    pub key: GroupKey,
    pub label: String,
    /// Member resource ids, sorted by resource name.
    pub resource_ids: Vec<String>,
    pub collapsed: bool,
}

/// Partitions resources into sorted, collapsible groups.
///
/// Groups sort by category precedence then label; members sort by name.
/// Collapsed groups keep their header entry but hosts lay out no rows
/// for them.
#[must_use]
pub fn group_resources(
    resources: &[Resource],
    collapsed: &HashSet<GroupKey>,
) -> Vec<ResourceGroup> {
    let mut buckets: IndexMap<GroupKey, Vec<&Resource>> = IndexMap::new();
    for resource in resources {
        let key = GroupKey {
            category: resource.category,
            pool_id: resource.pool_id.clone(),
        };
        buckets.entry(key).or_default().push(resource);
    }

    let mut groups: Vec<ResourceGroup> = buckets
        .into_iter()
        .map(|(key, mut members)| {
            members.sort_by(|left, right| left.name.cmp(&right.name));
            let label = group_label(&key, &members);
            ResourceGroup {
                collapsed: collapsed.contains(&key),
                resource_ids: members.iter().map(|resource| resource.id.clone()).collect(),
                key,
                label,
            }
        })
        .collect();

    groups.sort_by(|left, right| {
        left.key
            .category
            .cmp(&right.key.category)
            .then_with(|| left.label.cmp(&right.label))
    });
    groups
}

fn group_label(key: &GroupKey, members: &[&Resource]) -> String {
    if let Some(name) = members
        .iter()
        .find_map(|resource| resource.pool_name.as_deref())
    {
        return name.to_owned();
    }

    match &key.pool_id {
        Some(pool_id) => format!("{} · {pool_id}", key.category.display_name()),
        None => key.category.display_name().to_owned(),
    }
}
