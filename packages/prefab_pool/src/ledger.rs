use std::collections::VecDeque;
use std::mem;

use foldhash::{HashMap, HashMapExt};

use crate::{InstanceId, TemplateId};

/// The bookkeeping of a [`PrefabPool`][crate::PrefabPool]: which instances are parked in which
/// free-list and which checked out instance came from which template.
///
/// An instance is either in a free-list or in the ownership index, never both. The methods here
/// are the only way to move an instance between the two, which keeps that invariant in one place.
#[derive(Debug)]
pub(crate) struct Ledger {
    /// Inactive instances available for reuse, per template, oldest first.
    ///
    /// An empty list is a valid state and is distinct from the template having no list at all.
    free_lists: HashMap<TemplateId, VecDeque<InstanceId>>,

    /// Checked out instances and the template each was created from.
    owners: HashMap<InstanceId, TemplateId>,
}

/// The outcome of popping from a free-list.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Popped {
    /// The front-most live entry, if the free-list had one.
    pub(crate) instance: Option<InstanceId>,

    /// How many stale entries were discarded ahead of it.
    pub(crate) stale: usize,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self {
            free_lists: HashMap::new(),
            owners: HashMap::new(),
        }
    }

    pub(crate) fn has_free_list(&self, template: TemplateId) -> bool {
        self.free_lists.contains_key(&template)
    }

    pub(crate) fn free_len(&self, template: TemplateId) -> Option<usize> {
        self.free_lists.get(&template).map(VecDeque::len)
    }

    pub(crate) fn live_len(&self) -> usize {
        self.owners.len()
    }

    pub(crate) fn template_of(&self, instance: InstanceId) -> Option<TemplateId> {
        self.owners.get(&instance).copied()
    }

    pub(crate) fn templates(&self) -> impl Iterator<Item = TemplateId> + '_ {
        self.free_lists.keys().copied()
    }

    /// Whether the ledger tracks no instances at all. Empty free-lists do not count.
    pub(crate) fn is_empty(&self) -> bool {
        self.owners.is_empty() && self.free_lists.values().all(VecDeque::is_empty)
    }

    /// Registers the initial free-list of a template.
    ///
    /// # Panics
    ///
    /// Panics if the template already has a free-list or if any of the entries is checked out.
    pub(crate) fn insert_free_list(&mut self, template: TemplateId, entries: VecDeque<InstanceId>) {
        assert!(
            entries.iter().all(|entry| !self.owners.contains_key(entry)),
            "a checked out instance cannot be placed in a free-list"
        );

        let previous = self.free_lists.insert(template, entries);
        assert!(
            previous.is_none(),
            "template {template} already has a free-list"
        );
    }

    /// Pops entries from the front of the template's free-list until a live one is found.
    ///
    /// Stale entries are dropped from the list and counted. A template without a free-list yields
    /// nothing.
    pub(crate) fn pop_free(
        &mut self,
        template: TemplateId,
        mut is_alive: impl FnMut(InstanceId) -> bool,
    ) -> Popped {
        let mut stale: usize = 0;

        let Some(free) = self.free_lists.get_mut(&template) else {
            return Popped {
                instance: None,
                stale,
            };
        };

        while let Some(candidate) = free.pop_front() {
            if is_alive(candidate) {
                return Popped {
                    instance: Some(candidate),
                    stale,
                };
            }

            stale = stale.saturating_add(1);
        }

        Popped {
            instance: None,
            stale,
        }
    }

    /// Records that the instance has been handed out on behalf of the template.
    ///
    /// # Panics
    ///
    /// Panics if the instance is already checked out.
    pub(crate) fn check_out(&mut self, instance: InstanceId, template: TemplateId) {
        let previous = self.owners.insert(instance, template);
        assert!(
            previous.is_none(),
            "instance {instance} is already checked out"
        );
    }

    /// Moves a checked out instance to the back of its template's free-list, creating the
    /// free-list if the template does not have one yet.
    ///
    /// Returns the template the instance belongs to, or `None` if the instance is not checked out.
    pub(crate) fn check_in(&mut self, instance: InstanceId) -> Option<TemplateId> {
        let template = self.owners.remove(&instance)?;

        self.free_lists
            .entry(template)
            .or_default()
            .push_back(instance);

        Some(template)
    }

    /// Empties the template's free-list, returning the entries it held.
    ///
    /// The free-list itself stays registered. Returns `None` if the template has no free-list.
    pub(crate) fn take_free(&mut self, template: TemplateId) -> Option<VecDeque<InstanceId>> {
        self.free_lists.get_mut(&template).map(mem::take)
    }

    /// Forgets everything, returning all parked instances and all checked out instances.
    pub(crate) fn take_all(&mut self) -> (Vec<InstanceId>, Vec<InstanceId>) {
        let free = mem::take(&mut self.free_lists)
            .into_values()
            .flatten()
            .collect();
        let live = mem::take(&mut self.owners).into_keys().collect();

        (free, live)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use new_zealand::nz;

    use super::*;

    const HERO: TemplateId = TemplateId::new(1);
    const ROCK: TemplateId = TemplateId::new(2);

    fn instance(index: u32) -> InstanceId {
        InstanceId::new(index, nz!(1))
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = Ledger::new();

        assert!(ledger.is_empty());
        assert!(!ledger.has_free_list(HERO));
        assert_eq!(ledger.free_len(HERO), None);
        assert_eq!(ledger.live_len(), 0);
    }

    #[test]
    fn empty_free_list_is_distinct_from_absent() {
        let mut ledger = Ledger::new();
        ledger.insert_free_list(HERO, VecDeque::new());

        assert!(ledger.has_free_list(HERO));
        assert_eq!(ledger.free_len(HERO), Some(0));
        assert!(ledger.is_empty());
    }

    #[test]
    #[should_panic]
    fn second_free_list_for_template_panics() {
        let mut ledger = Ledger::new();
        ledger.insert_free_list(HERO, VecDeque::new());
        ledger.insert_free_list(HERO, VecDeque::new());
    }

    #[test]
    fn pop_free_is_fifo() {
        let mut ledger = Ledger::new();
        ledger.insert_free_list(HERO, VecDeque::from([instance(1), instance(2)]));

        let popped = ledger.pop_free(HERO, |_| true);

        assert_eq!(popped.instance, Some(instance(1)));
        assert_eq!(popped.stale, 0);
        assert_eq!(ledger.free_len(HERO), Some(1));
    }

    #[test]
    fn pop_free_discards_stale_entries_ahead_of_live_one() {
        let mut ledger = Ledger::new();
        ledger.insert_free_list(
            HERO,
            VecDeque::from([instance(1), instance(2), instance(3), instance(4)]),
        );

        let popped = ledger.pop_free(HERO, |candidate| candidate.index() >= 3);

        assert_eq!(
            popped,
            Popped {
                instance: Some(instance(3)),
                stale: 2,
            }
        );
        assert_eq!(ledger.free_len(HERO), Some(1));
    }

    #[test]
    fn pop_free_exhausts_list_of_only_stale_entries() {
        let mut ledger = Ledger::new();
        ledger.insert_free_list(HERO, VecDeque::from([instance(1), instance(2)]));

        let popped = ledger.pop_free(HERO, |_| false);

        assert_eq!(popped.instance, None);
        assert_eq!(popped.stale, 2);
        assert_eq!(ledger.free_len(HERO), Some(0));
    }

    #[test]
    fn pop_free_without_list_yields_nothing() {
        let mut ledger = Ledger::new();

        let popped = ledger.pop_free(ROCK, |_| true);

        assert_eq!(popped.instance, None);
        assert_eq!(popped.stale, 0);
        assert!(!ledger.has_free_list(ROCK));
    }

    #[test]
    fn check_in_returns_instance_to_back_of_its_list() {
        let mut ledger = Ledger::new();
        ledger.insert_free_list(HERO, VecDeque::from([instance(1)]));
        ledger.check_out(instance(2), HERO);

        assert_eq!(ledger.template_of(instance(2)), Some(HERO));
        assert_eq!(ledger.check_in(instance(2)), Some(HERO));
        assert_eq!(ledger.template_of(instance(2)), None);

        assert_eq!(ledger.pop_free(HERO, |_| true).instance, Some(instance(1)));
        assert_eq!(ledger.pop_free(HERO, |_| true).instance, Some(instance(2)));
    }

    #[test]
    fn check_in_creates_missing_free_list() {
        let mut ledger = Ledger::new();
        ledger.check_out(instance(5), ROCK);

        assert!(!ledger.has_free_list(ROCK));
        assert_eq!(ledger.check_in(instance(5)), Some(ROCK));
        assert_eq!(ledger.free_len(ROCK), Some(1));
    }

    #[test]
    fn check_in_of_unknown_instance_changes_nothing() {
        let mut ledger = Ledger::new();

        assert_eq!(ledger.check_in(instance(9)), None);
        assert!(ledger.templates().next().is_none());
    }

    #[test]
    #[should_panic]
    fn double_check_out_panics() {
        let mut ledger = Ledger::new();
        ledger.check_out(instance(1), HERO);
        ledger.check_out(instance(1), HERO);
    }

    #[test]
    #[should_panic]
    fn checked_out_instance_cannot_seed_free_list() {
        let mut ledger = Ledger::new();
        ledger.check_out(instance(1), HERO);
        ledger.insert_free_list(ROCK, VecDeque::from([instance(1)]));
    }

    #[test]
    fn take_free_leaves_empty_list_behind() {
        let mut ledger = Ledger::new();
        ledger.insert_free_list(HERO, VecDeque::from([instance(1), instance(2)]));
        ledger.check_out(instance(3), HERO);

        let taken = ledger.take_free(HERO).expect("HERO has a free-list");

        assert_eq!(taken, VecDeque::from([instance(1), instance(2)]));
        assert_eq!(ledger.free_len(HERO), Some(0));
        assert_eq!(ledger.template_of(instance(3)), Some(HERO));
        assert_eq!(ledger.take_free(ROCK), None);
    }

    #[test]
    fn take_all_clears_everything() {
        let mut ledger = Ledger::new();
        ledger.insert_free_list(HERO, VecDeque::from([instance(1)]));
        ledger.insert_free_list(ROCK, VecDeque::from([instance(2)]));
        ledger.check_out(instance(3), ROCK);

        let (mut free, live) = ledger.take_all();
        free.sort();

        assert_eq!(free, vec![instance(1), instance(2)]);
        assert_eq!(live, vec![instance(3)]);
        assert!(ledger.is_empty());
        assert!(!ledger.has_free_list(HERO));
    }
}
