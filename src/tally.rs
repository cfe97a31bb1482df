use std::collections::HashMap;

use crate::{warn_time, Error, Result};

/// Results of one municipality or precinct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub name: String,
    pub voters: u64,
    pub envelopes: u64,
    pub valid_votes: u64,
    /// Party name -> votes.
    pub party_votes: HashMap<String, u64>,
}

/// Sums the precinct tallies of a single municipality into one tally.
/// The name is taken from the first precinct; absent parties count as zero.
///
/// All precincts are expected to belong to the same municipality. Disagreeing names are
/// reported but do not stop the merge. A sum that doesn't fit a `u64` is an error.
pub fn combine(precincts: &[Tally]) -> Result<Tally> {
    let (first, rest) = precincts.split_first().ok_or(Error::EmptyAggregate)?;

    let mut combined = Tally {
        name: first.name.clone(),
        ..Default::default()
    };
    if let Some(other) = rest.iter().find(|t| t.name != first.name) {
        warn_time!(
            "combining precincts of different municipalities: '{}' and '{}'",
            first.name,
            other.name
        );
    }

    let add = |total: &mut u64, votes: u64| -> Result<()> {
        *total = total
            .checked_add(votes)
            .ok_or_else(|| Error::CountOverflow(first.name.clone()))?;
        Ok(())
    };
    for precinct in precincts {
        add(&mut combined.voters, precinct.voters)?;
        add(&mut combined.envelopes, precinct.envelopes)?;
        add(&mut combined.valid_votes, precinct.valid_votes)?;
        for (party, votes) in &precinct.party_votes {
            add(combined.party_votes.entry(party.clone()).or_insert(0), *votes)?;
        }
    }
    Ok(combined)
}

/// Municipality code -> tally, iterated in insertion order.
/// Inserting a code that is already present replaces its tally but keeps its position.
#[derive(Debug, Default)]
pub struct Municipalities {
    entries: Vec<(String, Tally)>,
    index: HashMap<String, usize>,
}

impl Municipalities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the replaced tally if the code was already present.
    pub fn insert(&mut self, code: String, tally: Tally) -> Option<Tally> {
        if let Some(&i) = self.index.get(&code) {
            return Some(std::mem::replace(&mut self.entries[i].1, tally));
        }
        self.index.insert(code.clone(), self.entries.len());
        self.entries.push((code, tally));
        None
    }

    pub fn get(&self, code: &str) -> Option<&Tally> {
        self.index.get(code).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tally)> {
        self.entries.iter().map(|(code, tally)| (code.as_str(), tally))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn tally(name: &str, counts: [u64; 3], parties: &[(&str, u64)]) -> Tally {
    Tally {
        name: name.into(),
        voters: counts[0],
        envelopes: counts[1],
        valid_votes: counts[2],
        party_votes: parties.iter().map(|(p, v)| (p.to_string(), *v)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_sums_fields_and_unions_parties() {
        let p1 = tally("Obec", [100, 90, 88], &[("Alpha", 50), ("Beta", 38)]);
        let p2 = tally("Obec", [120, 110, 108], &[("Alpha", 60), ("Gamma", 48)]);

        let combined = combine(&[p1, p2]).unwrap();
        assert_eq!(
            combined,
            tally(
                "Obec",
                [220, 200, 196],
                &[("Alpha", 110), ("Beta", 38), ("Gamma", 48)]
            )
        );
    }

    #[test]
    fn combine_single_is_identity() {
        let t = tally("Obec", [300, 250, 245], &[("Alpha", 100), ("Beta", 145)]);
        assert_eq!(combine(std::slice::from_ref(&t)).unwrap(), t);
    }

    #[test]
    fn combine_order_does_not_change_sums() {
        let a = tally("Obec", [1, 2, 3], &[("A", 1)]);
        let b = tally("Obec", [10, 20, 30], &[("A", 2), ("B", 5)]);
        let c = tally("Obec", [100, 200, 300], &[("C", 7)]);

        let abc = combine(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let cba = combine(&[c.clone(), b.clone(), a.clone()]).unwrap();
        let nested = combine(&[combine(&[a, b]).unwrap(), c]).unwrap();

        assert_eq!(abc, cba);
        assert_eq!(abc, nested);
    }

    #[test]
    fn combine_takes_first_name() {
        let a = tally("First", [0, 0, 0], &[]);
        let b = tally("Second", [0, 0, 0], &[]);
        assert_eq!(combine(&[a, b]).unwrap().name, "First");
    }

    #[test]
    fn combine_overflow_is_an_error() {
        let a = tally("Obec", [u64::MAX, 0, 0], &[]);
        let b = tally("Obec", [1, 0, 0], &[]);
        assert!(matches!(combine(&[a, b]), Err(Error::CountOverflow(name)) if name == "Obec"));

        let a = tally("Obec", [0, 0, 0], &[("Alpha", u64::MAX)]);
        let b = tally("Obec", [0, 0, 0], &[("Alpha", 2)]);
        assert!(matches!(combine(&[a, b]), Err(Error::CountOverflow(_))));
    }

    #[test]
    fn combine_up_to_u64_max_is_fine() {
        let a = tally("Obec", [u64::MAX - 1, 0, 0], &[("Alpha", u64::MAX - 5)]);
        let b = tally("Obec", [1, 0, 0], &[("Alpha", 5)]);
        let combined = combine(&[a, b]).unwrap();
        assert_eq!(combined.voters, u64::MAX);
        assert_eq!(combined.party_votes["Alpha"], u64::MAX);
    }

    #[test]
    fn combine_empty_is_an_error() {
        assert!(matches!(combine(&[]), Err(Error::EmptyAggregate)));
    }

    #[test]
    fn reinserting_a_code_overwrites_in_place() {
        let mut map = Municipalities::new();
        assert!(map.insert("1".into(), tally("One", [1, 1, 1], &[])).is_none());
        map.insert("2".into(), tally("Two", [2, 2, 2], &[]));
        let old = map.insert("1".into(), tally("One again", [3, 3, 3], &[]));

        assert_eq!(old.unwrap().name, "One");
        assert_eq!(map.len(), 2);
        let order: Vec<_> = map.iter().map(|(code, t)| (code, t.name.as_str())).collect();
        assert_eq!(order, vec![("1", "One again"), ("2", "Two")]);
        assert_eq!(map.get("2").unwrap().voters, 2);
    }
}
