//! Alias chain resolution.

use crate::host::DocumentHost;
use crate::model::Variable;
use std::collections::HashSet;
use tracing::debug;

/// Collect every variable reachable from `variable_id` through alias modes.
///
/// Depth-first over the adjacency relation variable -> alias targets, in
/// mode order, returning variables in discovery order without duplicates.
/// A visited set bounds the walk: re-reaching a variable stops that branch,
/// so cyclic chains terminate. Ids that no longer resolve contribute
/// nothing.
pub fn resolve_aliases<'a, H: DocumentHost + ?Sized>(
    host: &'a H,
    variable_id: &str,
) -> Vec<&'a Variable> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut collected = Vec::new();
    let mut stack = vec![variable_id.to_string()];

    while let Some(id) = stack.pop() {
        if !visited.insert(id.clone()) {
            debug!("Alias chain revisits {}, stopping branch", id);
            continue;
        }

        let Some(variable) = host.variable_by_id(&id) else {
            debug!("Alias target {} not found", id);
            continue;
        };
        collected.push(variable);

        // Reverse so the first mode's target is walked first
        let targets: Vec<&str> = variable.alias_targets().collect();
        for target in targets.into_iter().rev() {
            if !visited.contains(target) {
                stack.push(target.to_string());
            }
        }
    }

    collected
}
