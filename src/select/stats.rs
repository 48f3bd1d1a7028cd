use crate::catalog::scope::Scope;

/// Stat line shown under the map. States get a fraction with a percentage,
/// country scopes a raw count.
pub fn summary(scope: Scope, visited: usize, total: usize) -> String {
    match scope {
        Scope::UsStates => {
            let percent = if total == 0 {
                0.0
            } else {
                visited as f64 / total as f64 * 100.0
            };
            format!(
                "You have visited {} out of {} states ({:.1}%).",
                visited, total, percent
            )
        }
        Scope::World | Scope::Europe => {
            format!("You have visited {} countries.", visited)
        }
    }
}
