use crate::classify::Classification;
use crate::config::ScreenProfile;
use crate::layout::DividerPool;
use crate::widget::{OwnedWidgetRef, WidgetHost};

/// Everything one pass touched, kept until the next pass undoes it.
#[derive(Debug, Clone)]
pub struct PassLedger<W> {
    refs: Vec<OwnedWidgetRef<W>>,
    junk: Vec<OwnedWidgetRef<W>>,
}

impl<W: Clone> From<&Classification<W>> for PassLedger<W> {
    fn from(classification: &Classification<W>) -> Self {
        let refs = classification
            .sets
            .iter()
            .flat_map(|set| set.refs().cloned())
            .collect();
        Self {
            refs,
            junk: classification.junk.clone(),
        }
    }
}

impl<W> PassLedger<W> {
    pub fn len(&self) -> usize {
        self.refs.len() + self.junk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty() && self.junk.is_empty()
    }
}

pub struct SnapshotRestorer<'a> {
    profile: &'a ScreenProfile,
}

impl<'a> SnapshotRestorer<'a> {
    pub fn new(profile: &'a ScreenProfile) -> Self {
        Self { profile }
    }

    /// Puts every widget the previous pass touched back to its captured
    /// state, hides dividers and resets the scroll height.
    pub fn restore<H>(
        &self,
        host: &mut H,
        container: H::Handle,
        ledger: Option<&PassLedger<H::Handle>>,
        dividers: &mut DividerPool<H::Handle>,
        original_scroll: Option<i32>,
    ) where
        H: WidgetHost,
    {
        if let Some(ledger) = ledger {
            for widget in &ledger.refs {
                widget.restore(host, self.profile.item_width);
            }
            for junk in &ledger.junk {
                junk.restore_x(host);
            }
        }

        dividers.hide_all(host);

        if let Some(height) = original_scroll {
            host.set_scroll_height(container, height);
            host.revalidate_scroll(container);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::config::{ShadingPalette, StorageConfig};
    use crate::filter::FilterState;
    use crate::layout::LayoutEngine;
    use crate::widget::{SimulatedHost, Slot, WidgetId};

    fn pass(
        host: &mut SimulatedHost,
        profile: &ScreenProfile,
        dividers: &mut DividerPool<WidgetId>,
    ) -> PassLedger<WidgetId> {
        let container = host.sets_container().unwrap();
        let children: Vec<_> = host
            .children(container)
            .into_iter()
            .filter(|c| !dividers.contains(c))
            .collect();
        let mut classification = Classifier::new(profile).classify(host, &children).unwrap();
        classification.park_junk(host, profile.junk_parked_x);
        let palette = ShadingPalette::from_config(&StorageConfig::default());
        LayoutEngine::new(profile, palette).layout(
            host,
            container,
            &mut classification.sets,
            &FilterState::default(),
            dividers,
        );
        PassLedger::from(&classification)
    }

    #[test]
    fn restore_returns_every_widget_to_its_capture() {
        let mut host = SimulatedHost::new("Treasure Chest").with_scroll_height(420);
        let a = host.push_set("A", &[Slot::Stored, Slot::Empty]);
        let junk = host.push_junk();
        let b = host.push_set("B", &[Slot::Stored]);
        let c = host.push_set("C", &[Slot::Stored; 6]);

        let tracked: Vec<_> = [a.all(), b.all(), c.all(), vec![junk]].concat();
        let before: Vec<_> = tracked.iter().map(|&w| host.widget(w).clone()).collect();

        let profile = ScreenProfile::default();
        let mut dividers = DividerPool::default();
        let ledger = pass(&mut host, &profile, &mut dividers);
        assert_eq!(host.widget(junk).x, -100);
        assert_eq!(dividers.len(), 1);
        assert_eq!(ledger.len(), tracked.len());

        let container = host.sets_container().unwrap();
        SnapshotRestorer::new(&profile).restore(
            &mut host,
            container,
            Some(&ledger),
            &mut dividers,
            Some(420),
        );

        for (widget, original) in tracked.iter().zip(&before) {
            let mut restored = host.widget(*widget).clone();
            restored.revalidations = original.revalidations;
            assert_eq!(&restored, original, "widget {widget:?}");
        }
        assert_eq!(host.scroll_height(container), 420);
        assert!(dividers.len() == 1);
    }

    #[test]
    fn restore_without_ledger_only_resets_decorations() {
        let mut host = SimulatedHost::new("Treasure Chest").with_scroll_height(90);
        host.push_set("A", &[Slot::Stored]);
        let profile = ScreenProfile::default();
        let container = host.sets_container().unwrap();
        let before = host.fingerprint();

        SnapshotRestorer::new(&profile).restore(
            &mut host,
            container,
            None,
            &mut DividerPool::default(),
            Some(90),
        );
        assert_eq!(host.fingerprint(), before);
    }
}
