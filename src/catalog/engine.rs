//! Filtering and grouping over the catalog
//!
//! Pure derivations: the display result is recomputed in full from the
//! catalog and the selection whenever either changes.

#![allow(dead_code)] // get/flatten - group lookups not yet exposed by a command

use indexmap::IndexMap;
use serde::Serialize;

use super::Agent;
use super::filter::FilterSelection;

/// Group name for agents with no category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Agents grouped by category, groups in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategorizedResult<'a> {
    groups: IndexMap<String, Vec<&'a Agent>>,
}

impl<'a> CategorizedResult<'a> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Number of agents across all groups
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, category: &str) -> Option<&[&'a Agent]> {
        self.groups.get(category).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a Agent])> {
        self.groups.iter().map(|(name, agents)| (name.as_str(), agents.as_slice()))
    }

    /// Concatenate the groups back into a single sequence
    pub fn flatten(&self) -> Vec<&'a Agent> {
        self.groups.values().flatten().copied().collect()
    }
}

/// Agents matching every constrained field of `selection`, in catalog order
pub fn filter_agents<'a>(catalog: &'a [Agent], selection: &FilterSelection) -> Vec<&'a Agent> {
    catalog.iter().filter(|agent| selection.matches(agent)).collect()
}

/// Partition agents by category, keeping relative input order within a group
pub fn group_by_category<'a, I>(agents: I) -> CategorizedResult<'a>
where
    I: IntoIterator<Item = &'a Agent>,
{
    let mut groups: IndexMap<String, Vec<&'a Agent>> = IndexMap::new();
    for agent in agents {
        let category = if agent.category.is_empty() {
            UNCATEGORIZED
        } else {
            agent.category.as_str()
        };
        groups.entry(category.to_string()).or_default().push(agent);
    }
    CategorizedResult { groups }
}

/// `group_by_category(filter_agents(catalog, selection))`
pub fn categorize<'a>(catalog: &'a [Agent], selection: &FilterSelection) -> CategorizedResult<'a> {
    group_by_category(filter_agents(catalog, selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::Dimension;

    fn agent(id: &str, category: &str, access: &str, pricing: &str, industry: &str) -> Agent {
        Agent {
            id: id.to_string(),
            name: format!("Agent {}", id),
            category: category.to_string(),
            access_model: access.to_string(),
            pricing_model: pricing.to_string(),
            industry: industry.to_string(),
            ..Default::default()
        }
    }

    fn sample_catalog() -> Vec<Agent> {
        vec![
            agent("1", "Chat", "Free", "Freemium", "Retail"),
            agent("2", "Coding", "Paid", "Subscription", "Software"),
            agent("3", "Chat", "Paid", "Subscription", "Retail"),
            agent("4", "", "Free", "Free", "Education"),
            agent("5", "Coding", "Free", "Freemium", "Software"),
            agent("6", "Research", "API", "Usage", "Legal"),
        ]
    }

    fn ids(agents: &[&Agent]) -> Vec<String> {
        agents.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_unconstrained_selection_returns_full_catalog_in_order() {
        let catalog = sample_catalog();
        let result = filter_agents(&catalog, &FilterSelection::new());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_every_returned_agent_satisfies_constraints() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new();
        selection.set_filter(Dimension::AccessModel, "Free");
        selection.set_filter(Dimension::PricingModel, "Freemium");

        let result = filter_agents(&catalog, &selection);
        assert_eq!(ids(&result), vec!["1", "5"]);

        for agent in &catalog {
            let included = result.iter().any(|a| a.id == agent.id);
            let satisfies = agent.access_model == "Free" && agent.pricing_model == "Freemium";
            assert_eq!(included, satisfies, "agent {}", agent.id);
        }
    }

    #[test]
    fn test_all_four_dimensions_combine_with_and() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new();
        selection.set_filter(Dimension::AccessModel, "Paid");
        selection.set_filter(Dimension::PricingModel, "Subscription");
        selection.set_filter(Dimension::Category, "Chat");
        selection.set_filter(Dimension::Industry, "Retail");

        assert_eq!(ids(&filter_agents(&catalog, &selection)), vec!["3"]);
    }

    #[test]
    fn test_group_by_category_partitions_exactly() {
        let catalog = sample_catalog();
        let grouped = group_by_category(&catalog);

        assert_eq!(grouped.total(), catalog.len());
        for agent in &catalog {
            let hits = grouped
                .iter()
                .filter(|(_, agents)| agents.iter().any(|a| a.id == agent.id))
                .count();
            assert_eq!(hits, 1, "agent {} should be in exactly one group", agent.id);
        }
    }

    #[test]
    fn test_group_order_and_fallback() {
        let catalog = sample_catalog();
        let grouped = group_by_category(&catalog);

        let names: Vec<&str> = grouped.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Chat", "Coding", UNCATEGORIZED, "Research"]);
        assert_eq!(ids(grouped.get("Chat").unwrap()), vec!["1", "3"]);
        assert_eq!(ids(grouped.get("Coding").unwrap()), vec!["2", "5"]);
        assert_eq!(ids(grouped.get(UNCATEGORIZED).unwrap()), vec!["4"]);
    }

    #[test]
    fn test_regrouping_flattened_result_is_stable() {
        let catalog = sample_catalog();
        let grouped = group_by_category(&catalog);
        let regrouped = group_by_category(grouped.flatten());
        assert_eq!(grouped, regrouped);
    }

    #[test]
    fn test_access_model_filter_groups_single_chat_agent() {
        let catalog = vec![agent("1", "Chat", "Free", "", ""), agent("2", "Chat", "Paid", "", "")];
        let mut selection = FilterSelection::new();
        selection.set_filter(Dimension::AccessModel, "Free");

        let filtered = filter_agents(&catalog, &selection);
        assert_eq!(ids(&filtered), vec!["1"]);

        let grouped = group_by_category(filtered);
        assert_eq!(grouped.len(), 1);
        assert_eq!(ids(grouped.get("Chat").unwrap()), vec!["1"]);
    }

    #[test]
    fn test_value_outside_option_set_yields_empty_result() {
        let catalog = sample_catalog();
        let mut selection = FilterSelection::new();
        selection.set_filter(Dimension::Category, "Robotics");

        assert!(filter_agents(&catalog, &selection).is_empty());
        let grouped = categorize(&catalog, &selection);
        assert!(grouped.is_empty());
        assert_eq!(grouped.total(), 0);
    }

    #[test]
    fn test_empty_catalog() {
        let grouped = categorize(&[], &FilterSelection::new());
        assert!(grouped.is_empty());
    }

    #[test]
    fn test_categorized_result_serializes_as_map() {
        let catalog = vec![agent("1", "Chat", "Free", "", "")];
        let grouped = group_by_category(&catalog);
        let json = serde_json::to_value(&grouped).unwrap();
        assert_eq!(json["Chat"][0]["_id"], "1");
    }
}
