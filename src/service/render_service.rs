use crate::catalog::countries::CountryCatalog;
use crate::catalog::scope::Scope;
use crate::db::selection::SelectionStore;
use crate::prelude::*;
use crate::render::frame::choropleth_frame;
use crate::select::reconcile::{filter_to_catalog, reconcile_countries, reconcile_states, same_set};
use crate::select::stats;
use serde_json::Value;
use std::collections::HashSet;

pub struct RenderOutput {
    pub frame: Value,
    pub summary: String,
    /// Full persisted list after this cycle, including regions hidden by the
    /// current scope.
    pub visited: Vec<String>,
}

/// One read-modify-write render pass: load the persisted selection, drop stale
/// identifiers, apply the user's edit (or seed defaults on first run),
/// reconcile, persist iff the set changed, and build the frame and stat line.
pub async fn run_render_cycle<S>(
    store: &S,
    countries: &CountryCatalog,
    scope: Scope,
    edit: Option<Vec<String>>,
) -> Result<RenderOutput>
where
    S: SelectionStore + ?Sized,
{
    let visible = scope.regions(countries);
    let full_catalog = match scope {
        Scope::UsStates => visible.clone(),
        Scope::World | Scope::Europe => countries.world.clone(),
    };
    let key = scope.store_key();

    let stored = store.get(key).await?;
    let first_run = stored.is_none();
    let persisted = filter_to_catalog(&stored.unwrap_or_default(), &full_catalog);

    let visible_set: HashSet<&str> = visible.iter().map(String::as_str).collect();
    let edit = match edit {
        Some(edit) => edit,
        None if first_run => scope.default_selection(countries),
        None => persisted
            .iter()
            .filter(|region| visible_set.contains(region.as_str()))
            .cloned()
            .collect(),
    };

    let (selection, updated) = match scope {
        Scope::UsStates => {
            let states = reconcile_states(&edit);
            let updated = match same_set(&states, &persisted) {
                true => None,
                false => Some(states.clone()),
            };
            (states, updated)
        }
        Scope::World | Scope::Europe => {
            let selection = filter_to_catalog(&edit, &visible);
            (selection, reconcile_countries(&persisted, &visible, &edit))
        }
    };

    if let Some(value) = &updated {
        // The current render stays correct even if persistence fails; only
        // future-session durability is lost.
        if let Err(e) = store.set(key, value).await {
            tracing::warn!("Failed to persist {}: {}", key, e);
        }
    }

    let summary = stats::summary(scope, selection.len(), visible.len());
    let frame = choropleth_frame(scope, &visible, &selection);

    Ok(RenderOutput {
        frame,
        summary,
        visited: updated.unwrap_or(persisted),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::states::DEFAULT_STATES;
    use crate::db::selection::MemorySelectionStore;

    fn list(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn catalog() -> CountryCatalog {
        CountryCatalog {
            world: list(&["France", "Germany", "Spain", "Japan", "United States"]),
            europe: list(&["France", "Germany", "Spain"]),
        }
    }

    #[tokio::test]
    async fn first_run_seeds_state_defaults() {
        let store = MemorySelectionStore::new();
        let output = run_render_cycle(&store, &catalog(), Scope::UsStates, None)
            .await
            .unwrap();

        assert_eq!(output.visited, list(&DEFAULT_STATES));
        assert_eq!(
            store.get("visited_states").await.unwrap(),
            Some(list(&DEFAULT_STATES))
        );
        assert!(output.summary.contains("31 out of 50"));
        assert!(output.summary.contains("62.0%"));
    }

    #[tokio::test]
    async fn europe_edit_preserves_hidden_countries() {
        let store = MemorySelectionStore::seeded("visited_countries", &list(&["Japan", "France"]));
        let output = run_render_cycle(
            &store,
            &catalog(),
            Scope::Europe,
            Some(list(&["France", "Germany"])),
        )
        .await
        .unwrap();

        assert_eq!(output.visited, list(&["Japan", "France", "Germany"]));
        assert_eq!(
            store.get("visited_countries").await.unwrap(),
            Some(list(&["Japan", "France", "Germany"]))
        );
        assert_eq!(output.summary, "You have visited 2 countries.");
    }

    #[tokio::test]
    async fn deselecting_everything_only_clears_the_visible_scope() {
        let store = MemorySelectionStore::seeded("visited_countries", &list(&["Japan", "France"]));
        let output = run_render_cycle(&store, &catalog(), Scope::Europe, Some(Vec::new()))
            .await
            .unwrap();

        assert_eq!(output.visited, list(&["Japan"]));
        assert_eq!(output.summary, "You have visited 0 countries.");
    }

    #[tokio::test]
    async fn repeated_edit_writes_once() {
        let store = MemorySelectionStore::seeded("visited_countries", &list(&["Japan"]));
        let edit = list(&["France"]);

        run_render_cycle(&store, &catalog(), Scope::Europe, Some(edit.clone()))
            .await
            .unwrap();
        run_render_cycle(&store, &catalog(), Scope::Europe, Some(edit))
            .await
            .unwrap();

        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn render_without_an_edit_never_writes() {
        let store = MemorySelectionStore::seeded("visited_countries", &list(&["Atlantis", "Spain"]));
        let output = run_render_cycle(&store, &catalog(), Scope::World, None)
            .await
            .unwrap();

        assert_eq!(output.visited, list(&["Spain"]));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn stale_entries_are_purged_by_the_next_edit() {
        let store = MemorySelectionStore::seeded("visited_countries", &list(&["Atlantis", "Spain"]));
        run_render_cycle(
            &store,
            &catalog(),
            Scope::World,
            Some(list(&["Spain", "France"])),
        )
        .await
        .unwrap();

        assert_eq!(
            store.get("visited_countries").await.unwrap(),
            Some(list(&["Spain", "France"]))
        );
    }

    #[tokio::test]
    async fn state_edit_is_filtered_to_valid_codes() {
        let store = MemorySelectionStore::new();
        let output = run_render_cycle(
            &store,
            &catalog(),
            Scope::UsStates,
            Some(list(&["CA", "ZZ"])),
        )
        .await
        .unwrap();

        assert_eq!(output.visited, list(&["CA"]));
        assert_eq!(
            store.get("visited_states").await.unwrap(),
            Some(list(&["CA"]))
        );
    }

    #[tokio::test]
    async fn frame_covers_the_visible_catalog() {
        let store = MemorySelectionStore::new();
        let output = run_render_cycle(&store, &catalog(), Scope::Europe, Some(list(&["Spain"])))
            .await
            .unwrap();

        let rows = output.frame["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        let visited: Vec<u64> = rows
            .iter()
            .map(|row| row["visited"].as_u64().unwrap())
            .collect();
        assert_eq!(visited, [0, 0, 1]);
    }
}
