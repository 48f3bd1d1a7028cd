use super::countries::{CountryCatalog, DEFAULT_EUROPE_COUNTRIES, DEFAULT_WORLD_EXTRAS};
use super::states::{is_state, DEFAULT_STATES, US_STATES};
use std::collections::HashSet;

/// The geographic view the user is looking at. Each scope knows its catalog,
/// its store key, and how the renderer should project it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    UsStates,
    World,
    Europe,
}

impl Scope {
    pub fn parse(value: &str) -> Option<Scope> {
        match value.to_lowercase().as_str() {
            "us" | "usa" | "states" => Some(Scope::UsStates),
            "world" => Some(Scope::World),
            "europe" => Some(Scope::Europe),
            _ => None,
        }
    }

    /// Key under which this scope's visited list is persisted. World and Europe
    /// share one list; the reconciler keeps it consistent across the two.
    pub fn store_key(&self) -> &'static str {
        match self {
            Scope::UsStates => "visited_states",
            Scope::World | Scope::Europe => "visited_countries",
        }
    }

    /// The catalog shown and edited in this scope, in display order.
    pub fn regions(&self, countries: &CountryCatalog) -> Vec<String> {
        match self {
            Scope::UsStates => US_STATES.iter().map(ToString::to_string).collect(),
            Scope::World => countries.world.clone(),
            Scope::Europe => countries.europe.clone(),
        }
    }

    /// First-run preselection, filtered against the full catalog so a stale
    /// default never enters the store.
    pub fn default_selection(&self, countries: &CountryCatalog) -> Vec<String> {
        match self {
            Scope::UsStates => DEFAULT_STATES
                .iter()
                .filter(|code| is_state(code))
                .map(ToString::to_string)
                .collect(),
            Scope::World => {
                let world: HashSet<&str> = countries.world.iter().map(String::as_str).collect();
                DEFAULT_EUROPE_COUNTRIES
                    .iter()
                    .chain(DEFAULT_WORLD_EXTRAS.iter())
                    .filter(|country| world.contains(**country))
                    .map(ToString::to_string)
                    .collect()
            }
            Scope::Europe => {
                let world: HashSet<&str> = countries.world.iter().map(String::as_str).collect();
                DEFAULT_EUROPE_COUNTRIES
                    .iter()
                    .filter(|country| world.contains(**country))
                    .map(ToString::to_string)
                    .collect()
            }
        }
    }

    pub fn projection(&self) -> &'static str {
        match self {
            Scope::UsStates => "usa",
            Scope::World => "world",
            Scope::Europe => "europe",
        }
    }

    pub fn location_mode(&self) -> &'static str {
        match self {
            Scope::UsStates => "USA-states",
            Scope::World | Scope::Europe => "country names",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Scope::UsStates => "States I Have Visited",
            Scope::World | Scope::Europe => "Countries I Have Visited",
        }
    }
}
