// File: src/core/merger.rs
use crate::core::quantity::{format_item_name, parse_item_name, ParsedItem};
use crate::core::types::{Checklist, ChecklistItem};
use std::collections::HashMap;
use tracing::debug;

/// What the merge wants done to the target checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Rename an existing target item to carry the new total.
    SetName { item_id: String, name: String },
    /// Add a new item to the target checklist.
    Create { name: String },
}

struct Accumulated {
    base: String,
    quantity: u32,
}

/// Folds every unchecked item of `sources` into the target checklist.
///
/// Items are matched by their lower-cased base name. Quantities of matches
/// are summed; a match already in the target is renamed with its own casing
/// kept, anything else is created using the casing first seen. Checked
/// source items are treated as not needed. Actions come out in the order
/// their base names were first seen.
pub fn merge(target: &[ChecklistItem], sources: &[Checklist]) -> Vec<MergeAction> {
    let mut existing: HashMap<String, (&ChecklistItem, ParsedItem)> = HashMap::new();
    for item in target {
        let parsed = parse_item_name(&item.name);
        existing
            .entry(parsed.base.to_lowercase())
            .or_insert((item, parsed));
    }

    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, Accumulated> = HashMap::new();
    for item in sources.iter().flat_map(|checklist| &checklist.items) {
        if item.is_complete() {
            debug!(item = %item.name, "skipping checked item");
            continue;
        }
        let parsed = parse_item_name(&item.name);
        let key = parsed.base.to_lowercase();
        match totals.get_mut(&key) {
            Some(acc) => {
                acc.quantity = acc.quantity.saturating_add(parsed.quantity);
                debug!(item = %item.name, total = acc.quantity, "merging duplicate item");
            }
            None => {
                order.push(key.clone());
                totals.insert(
                    key,
                    Accumulated {
                        base: parsed.base,
                        quantity: parsed.quantity,
                    },
                );
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| {
            let acc = totals.remove(&key)?;
            let action = match existing.get(&key) {
                Some((item, parsed)) => MergeAction::SetName {
                    item_id: item.id.clone(),
                    name: format_item_name(&parsed.base, parsed.quantity.saturating_add(acc.quantity)),
                },
                None => MergeAction::Create {
                    name: format_item_name(&acc.base, acc.quantity),
                },
            };
            Some(action)
        })
        .collect()
}
