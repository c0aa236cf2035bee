use crate::classify::FillState;
use crate::filter::FilterState;
use crate::widget::WidgetHost;

/// Handles of the three filter checkboxes shown above the sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterControls<W> {
    empty: W,
    partial: W,
    full: W,
}

impl<W: Copy> FilterControls<W> {
    pub fn install<H>(host: &mut H, filters: &FilterState) -> Self
    where
        H: WidgetHost<Handle = W>,
    {
        Self {
            empty: host.create_filter_control(FillState::Empty, filters.shows(FillState::Empty)),
            partial: host
                .create_filter_control(FillState::Partial, filters.shows(FillState::Partial)),
            full: host.create_filter_control(FillState::Full, filters.shows(FillState::Full)),
        }
    }

    pub fn handle(&self, fill: FillState) -> W {
        match fill {
            FillState::Empty => self.empty,
            FillState::Partial => self.partial,
            FillState::Full => self.full,
        }
    }

    pub fn set_visible<H>(&self, host: &mut H, visible: bool)
    where
        H: WidgetHost<Handle = W>,
    {
        for fill in FillState::ALL {
            let control = self.handle(fill);
            host.set_hidden(control, !visible);
            host.revalidate(control);
        }
    }

    /// Brings every checkbox in line with the current flags.
    pub fn sync<H>(&self, host: &mut H, filters: &FilterState)
    where
        H: WidgetHost<Handle = W>,
    {
        for fill in FillState::ALL {
            host.set_filter_control_checked(self.handle(fill), filters.shows(fill));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryStore;
    use crate::widget::SimulatedHost;

    #[test]
    fn install_reflects_flags() {
        let mut host = SimulatedHost::new("Toy Box");
        let mut filters = FilterState::default();
        filters.toggle(FillState::Partial, &mut MemoryStore::new()).unwrap();

        let controls = FilterControls::install(&mut host, &filters);
        assert_eq!(host.controls().len(), 3);
        assert_eq!(host.control(FillState::Partial).map(|c| c.checked), Some(false));
        assert_eq!(host.control(FillState::Full).map(|c| c.checked), Some(true));

        controls.set_visible(&mut host, false);
        assert!(host.widget(controls.handle(FillState::Empty)).hidden);

        filters.show_all();
        controls.sync(&mut host, &filters);
        assert_eq!(host.control(FillState::Partial).map(|c| c.checked), Some(true));
    }
}
