use eframe::egui::{Slider, Ui};

use crate::domain::Horizon;
use crate::ui::config::UI_TEXT;
use crate::ui::styles::UiStyleExt;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizonEvent {
    Changed(Horizon),
}

/// The forecast length slider
pub struct HorizonPanel {
    horizon: Horizon,
    max_horizon: Option<usize>,
}

impl HorizonPanel {
    pub fn new(horizon: Horizon, max_horizon: Option<usize>) -> Self {
        Self {
            horizon,
            max_horizon,
        }
    }
}

impl Panel for HorizonPanel {
    type Event = HorizonEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<HorizonEvent> {
        let mut events = Vec::new();

        let mut days = self.horizon.days();
        let response = ui.add(
            Slider::new(&mut days, Horizon::range())
                .integer()
                .text(UI_TEXT.slider_label)
                .suffix(UI_TEXT.slider_suffix),
        );

        // The slider owns the bounds; clamped() only restates them
        let new_horizon = Horizon::clamped(days);
        if response.changed() && new_horizon != self.horizon {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Horizon changed: {} -> {}", self.horizon, new_horizon);
            }
            self.horizon = new_horizon;
            events.push(HorizonEvent::Changed(new_horizon));
        }

        if let Some(max) = self.max_horizon {
            if max < Horizon::MAX.steps() {
                ui.label_warning(format!(
                    "{} {}{}",
                    UI_TEXT.horizon_cap_prefix, max, UI_TEXT.slider_suffix
                ));
            }
        }

        events
    }
}
