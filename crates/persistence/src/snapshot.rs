//! JSON snapshot export and field-by-field import.

use crate::PersistError;
use serde_json::{Map, Value};
use sim_core::PlayerState;
use tracing::debug;

/// Snapshot of `state` with ledger and timeline cut to the last `tail` entries.
pub fn export_value(state: &PlayerState, tail: usize) -> Result<Value, PersistError> {
    Ok(serde_json::to_value(state.with_tails(tail))?)
}

pub fn export_json(state: &PlayerState, tail: usize) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(&export_value(state, tail)?)?)
}

/// Overlay an imported snapshot onto `current`.
///
/// Objects merge key by key, so any field missing from `json` (at any depth)
/// keeps its current value. `null` never overwrites. Arrays and scalars
/// present in the snapshot replace the current value.
pub fn merge_import(current: &PlayerState, json: &str) -> Result<PlayerState, PersistError> {
    let incoming: Value = serde_json::from_str(json)?;
    let Value::Object(patch) = incoming else {
        return Err(PersistError::NotAnObject);
    };
    let mut base = serde_json::to_value(current)?;
    if let Value::Object(target) = &mut base {
        debug!(fields = patch.len(), "merging snapshot");
        merge_object(target, patch);
    }
    Ok(serde_json::from_value(base)?)
}

fn merge_object(target: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        if value.is_null() {
            continue;
        }
        match target.get_mut(&key) {
            Some(Value::Object(inner)) if value.is_object() => {
                if let Value::Object(sub) = value {
                    merge_object(inner, sub);
                }
            }
            Some(slot) => *slot = value,
            None => {
                target.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state() -> PlayerState {
        let mut s = PlayerState::with_balances(1_000.0, 500.0);
        s.reputation = 7.0;
        s.profile.name = "Ada".into();
        s
    }

    #[test]
    fn partial_snapshot_keeps_other_fields() {
        let merged = merge_import(&state(), r#"{"wallet": 42.5, "profile": {"goal": "Boat"}}"#)
            .unwrap();
        assert_eq!(merged.wallet, 42.5);
        assert_eq!(merged.savings, 500.0);
        assert_eq!(merged.reputation, 7.0);
        assert_eq!(merged.profile.name, "Ada");
        assert_eq!(merged.profile.goal, "Boat");
    }

    #[test]
    fn nulls_do_not_clobber() {
        let merged = merge_import(&state(), r#"{"savings": null}"#).unwrap();
        assert_eq!(merged.savings, 500.0);
    }

    #[test]
    fn rejects_non_objects_and_garbage() {
        assert!(matches!(merge_import(&state(), "[1,2]"), Err(PersistError::NotAnObject)));
        assert!(matches!(merge_import(&state(), "{oops"), Err(PersistError::Json(_))));
        assert!(matches!(
            merge_import(&state(), r#"{"wallet": "lots"}"#),
            Err(PersistError::Json(_))
        ));
    }

    #[test]
    fn export_trims_tails() {
        let mut s = state();
        for i in 0..10 {
            s.push_timeline(format!("t{i}"), 100);
        }
        let v = export_value(&s, 3).unwrap();
        assert_eq!(v["timeline"].as_array().map(Vec::len), Some(3));
        let back = merge_import(&PlayerState::default(), &export_json(&s, 3).unwrap()).unwrap();
        assert_eq!(back.wallet, 1_000.0);
        assert_eq!(back.timeline.len(), 3);
    }

    proptest! {
        #[test]
        fn patch_touches_only_named_fields(wallet in 0u32..10_000_000, goal in "[a-z]{1,12}") {
            let base = state();
            let json = format!(r#"{{"wallet": {wallet}, "profile": {{"goal": "{goal}"}}}}"#);
            let merged = merge_import(&base, &json).unwrap();
            let mut expected = base.clone();
            expected.wallet = f64::from(wallet);
            expected.profile.goal = goal;
            prop_assert_eq!(merged, expected);
        }
    }
}
