use crate::catalog::scope::Scope;
use serde_json::{json, Value};
use std::collections::HashSet;

const UNVISITED_COLOR: &str = "#f0f2f6";
const VISITED_STATE_COLOR: &str = "#00cc96";
const VISITED_COUNTRY_COLOR: &str = "#636efa";

/// Build the choropleth frame consumed by the external renderer: one row per
/// catalog region with a 0/1 visited flag, plus the projection parameters.
pub fn choropleth_frame(scope: Scope, regions: &[String], selection: &[String]) -> Value {
    let selection: HashSet<&str> = selection.iter().map(String::as_str).collect();
    let rows: Vec<Value> = regions
        .iter()
        .map(|region| {
            json!({
                "region": region,
                "visited": u8::from(selection.contains(region.as_str())),
            })
        })
        .collect();

    let visited_color = match scope {
        Scope::UsStates => VISITED_STATE_COLOR,
        Scope::World | Scope::Europe => VISITED_COUNTRY_COLOR,
    };

    json!({
        "title": scope.title(),
        "scope": scope.projection(),
        "locationmode": scope.location_mode(),
        "colorscale": [UNVISITED_COLOR, visited_color],
        "height": 800,
        "rows": rows,
    })
}
