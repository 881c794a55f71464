//! Filter selection state
//!
//! Each of the four dimensions is either unset (shown as its sentinel label)
//! or holds one concrete value. Dimensions are independent: setting one never
//! touches or constrains another.

#![allow(dead_code)] // reset_all - no command clears a whole selection yet

use serde::Serialize;

use super::{Agent, FilterOptionSet};

/// A categorical field agents can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    AccessModel,
    PricingModel,
    Category,
    Industry,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::AccessModel,
        Dimension::PricingModel,
        Dimension::Category,
        Dimension::Industry,
    ];

    /// Placeholder shown when the dimension imposes no constraint
    pub fn sentinel(&self) -> &'static str {
        match self {
            Dimension::AccessModel => "Model",
            Dimension::PricingModel => "Pricing",
            Dimension::Category => "Category",
            Dimension::Industry => "Industry",
        }
    }

    /// Human-readable heading
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::AccessModel => "Access Model",
            Dimension::PricingModel => "Pricing Model",
            Dimension::Category => "Categories",
            Dimension::Industry => "Industries",
        }
    }

    /// The agent field this dimension compares against
    pub fn value_of<'a>(&self, agent: &'a Agent) -> &'a str {
        match self {
            Dimension::AccessModel => &agent.access_model,
            Dimension::PricingModel => &agent.pricing_model,
            Dimension::Category => &agent.category,
            Dimension::Industry => &agent.industry,
        }
    }

    /// Name used on the command line, both as `--<flag>` and as a dimension argument
    pub fn flag(&self) -> &'static str {
        match self {
            Dimension::AccessModel => "access",
            Dimension::PricingModel => "pricing",
            Dimension::Category => "category",
            Dimension::Industry => "industry",
        }
    }

    /// The allowed values for this dimension
    pub fn options<'a>(&self, options: &'a FilterOptionSet) -> &'a [String] {
        match self {
            Dimension::AccessModel => &options.access_models,
            Dimension::PricingModel => &options.pricing_models,
            Dimension::Category => &options.categories,
            Dimension::Industry => &options.industries,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.flag())
    }
}

impl std::str::FromStr for Dimension {
    type Err = eyre::Error;

    fn from_str(s: &str) -> eyre::Result<Self> {
        match s.to_lowercase().as_str() {
            "access" | "access-model" | "accessmodel" => Ok(Dimension::AccessModel),
            "pricing" | "pricing-model" | "pricingmodel" => Ok(Dimension::PricingModel),
            "category" => Ok(Dimension::Category),
            "industry" => Ok(Dimension::Industry),
            _ => eyre::bail!(
                "Unknown filter dimension: {}. Supported: access, pricing, category, industry",
                s
            ),
        }
    }
}

/// Currently selected value per dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    access_model: Option<String>,
    pricing_model: Option<String>,
    category: Option<String>,
    industry: Option<String>,
}

impl FilterSelection {
    /// A selection with every dimension unset
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, dimension: Dimension) -> &mut Option<String> {
        match dimension {
            Dimension::AccessModel => &mut self.access_model,
            Dimension::PricingModel => &mut self.pricing_model,
            Dimension::Category => &mut self.category,
            Dimension::Industry => &mut self.industry,
        }
    }

    /// Select `value` for one dimension.
    ///
    /// Values outside the current option set are accepted as-is and will
    /// simply match no agents. Passing the dimension's sentinel label unsets it.
    pub fn set_filter(&mut self, dimension: Dimension, value: impl Into<String>) {
        let value = value.into();
        let slot = self.slot_mut(dimension);
        if value == dimension.sentinel() {
            *slot = None;
        } else {
            *slot = Some(value);
        }
    }

    pub fn reset_filter(&mut self, dimension: Dimension) {
        *self.slot_mut(dimension) = None;
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// The concrete value for a dimension, `None` when unset
    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::AccessModel => self.access_model.as_deref(),
            Dimension::PricingModel => self.pricing_model.as_deref(),
            Dimension::Category => self.category.as_deref(),
            Dimension::Industry => self.industry.as_deref(),
        }
    }

    /// The value to display for a dimension (its sentinel when unset)
    pub fn display_value(&self, dimension: Dimension) -> &str {
        self.get(dimension).unwrap_or(dimension.sentinel())
    }

    /// Constrained dimensions and their values
    pub fn active(&self) -> impl Iterator<Item = (Dimension, &str)> + '_ {
        Dimension::ALL
            .into_iter()
            .filter_map(move |dim| self.get(dim).map(|value| (dim, value)))
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active().next().is_none()
    }

    /// Flat AND over the constrained dimensions, exact case-sensitive equality
    pub fn matches(&self, agent: &Agent) -> bool {
        self.active().all(|(dim, value)| dim.value_of(agent) == value)
    }
}
