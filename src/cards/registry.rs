//! Card template lookup.
//!
//! The `CardRegistry` holds the flat list of templates supplied by the
//! host's content system and turns template ids into card instances.
//! Templates are stored behind `Arc` so every instance shares one copy.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardTemplate, CardType, TemplateId};
use super::instance::CardInstance;
use crate::core::{InstanceId, PlayerId, Zone};
use crate::error::{Result, RulesError};

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use shield_duel::cards::{CardRegistry, CardTemplate, CardType, TemplateId};
///
/// let mut registry = CardRegistry::new();
/// registry.register(
///     CardTemplate::new(TemplateId::new(1), "Aqua Surfer", CardType::Creature)
///         .with_cost(6)
///         .with_power(2000)
///         .with_ability("shield-trigger"),
/// );
///
/// let found = registry.get(TemplateId::new(1)).unwrap();
/// assert_eq!(found.name, "Aqua Surfer");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    templates: FxHashMap<TemplateId, Arc<CardTemplate>>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a flat template list.
    ///
    /// Panics on duplicate template ids.
    pub fn from_templates(templates: impl IntoIterator<Item = CardTemplate>) -> Self {
        let mut registry = Self::new();
        for template in templates {
            registry.register(template);
        }
        registry
    }

    /// Register a template.
    ///
    /// Panics if a template with the same id already exists.
    pub fn register(&mut self, template: CardTemplate) {
        if self.templates.contains_key(&template.id) {
            panic!("Template with ID {} already registered", template.id);
        }
        self.templates.insert(template.id, Arc::new(template));
    }

    #[must_use]
    pub fn get(&self, id: TemplateId) -> Option<&Arc<CardTemplate>> {
        self.templates.get(&id)
    }

    /// Look up a template, failing with `UnknownTemplate`.
    pub fn require(&self, id: TemplateId) -> Result<&Arc<CardTemplate>> {
        self.templates.get(&id).ok_or(RulesError::UnknownTemplate(id))
    }

    #[must_use]
    pub fn contains(&self, id: TemplateId) -> bool {
        self.templates.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardTemplate>> {
        self.templates.values()
    }

    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &Arc<CardTemplate>> {
        self.templates.values().filter(move |t| t.card_type == card_type)
    }

    /// Create a fresh instance of a template.
    ///
    /// Shield-trigger eligibility is read from the template's rules text
    /// once, here, using `trigger_marker`.
    pub fn instantiate(
        &self,
        template: TemplateId,
        id: InstanceId,
        owner: PlayerId,
        zone: Zone,
        trigger_marker: &str,
    ) -> Result<CardInstance> {
        let template = Arc::clone(self.require(template)?);
        let can_trigger = template.has_trigger_marker(trigger_marker);
        Ok(CardInstance::new(id, template, owner, zone).with_shield_trigger(can_trigger))
    }
}
