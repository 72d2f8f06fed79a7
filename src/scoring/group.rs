//! Group (house) event expansion
//!
//! Group events are judged once per house. After ranking, every registered
//! member of a house receives that house's outcome unchanged.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::error::{ScoringError, ScoringResult};
use super::types::ScoreRow;

/// House name -> admission numbers registered for the event
pub type RosterMembership = BTreeMap<String, BTreeSet<String>>;

/// Fan ranked house rows out to one row per member, keyed by admission number.
///
/// Houses with an empty member set produce nothing. A house present on only
/// one side (ranked rows vs. membership) is a data inconsistency and fails.
pub fn expand_to_members(
    ranked_houses: &[ScoreRow],
    membership: &RosterMembership,
) -> ScoringResult<Vec<ScoreRow>> {
    let by_house: HashMap<&str, &ScoreRow> = ranked_houses
        .iter()
        .map(|row| (row.key.as_str(), row))
        .collect();

    let unjudged: Vec<&str> = membership
        .keys()
        .map(String::as_str)
        .filter(|house| !by_house.contains_key(house))
        .collect();
    if !unjudged.is_empty() {
        return Err(ScoringError::Validation(format!(
            "registered houses missing from judging: {}",
            unjudged.join(", ")
        )));
    }

    let unregistered: Vec<&str> = ranked_houses
        .iter()
        .map(|row| row.key.as_str())
        .filter(|house| !membership.contains_key(*house))
        .collect();
    if !unregistered.is_empty() {
        return Err(ScoringError::Validation(format!(
            "judged houses without registered members: {}",
            unregistered.join(", ")
        )));
    }

    let mut owner: HashMap<&str, &str> = HashMap::new();
    let mut members = Vec::new();
    for house_row in ranked_houses {
        let Some(admission_numbers) = membership.get(&house_row.key) else {
            continue;
        };
        for admission_number in admission_numbers {
            if let Some(other) = owner.insert(admission_number.as_str(), house_row.key.as_str()) {
                return Err(ScoringError::Validation(format!(
                    "{} is registered under both {} and {}",
                    admission_number, other, house_row.key
                )));
            }
            members.push(ScoreRow {
                key: admission_number.clone(),
                ..house_row.clone()
            });
        }
    }

    Ok(members)
}
