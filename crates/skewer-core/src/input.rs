use crate::error::TransformError;
use crate::preset::{PresetTable, Trigger};
use crate::shape::ShapeState;

/// Discrete input as seen by the transform engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A raw trigger id. Ids without a preset are ignored.
    Trigger(u8),
    Quit,
}

/// What happened to one event.
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
    Applied(Trigger),
    Ignored,
    /// The preset stopped part way; the working points hold the partial result.
    Failed(TransformError),
    Quit,
}

/// Routes input events onto presets of a [`PresetTable`].
#[derive(Clone, Debug)]
pub struct InputDispatcher {
    presets: PresetTable,
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new(PresetTable::standard())
    }
}

impl InputDispatcher {
    pub fn new(presets: PresetTable) -> Self {
        Self { presets }
    }

    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    pub fn dispatch(&self, state: &mut ShapeState, event: InputEvent) -> Dispatch {
        let id = match event {
            InputEvent::Quit => return Dispatch::Quit,
            InputEvent::Trigger(id) => id,
        };
        let Some(preset) = self.presets.get_id(id) else {
            log::debug!("trigger {id} has no preset; ignoring");
            return Dispatch::Ignored;
        };
        match state.apply_preset(preset) {
            Ok(()) => {
                log::debug!("applied preset {preset}");
                Dispatch::Applied(preset.trigger)
            }
            Err(e) => {
                log::warn!("preset {} failed: {e}", preset.trigger);
                Dispatch::Failed(e)
            }
        }
    }

    /// Process a batch in arrival order, stopping at the first `Quit`.
    ///
    /// Every preset resets to the baseline first, so the last applied trigger
    /// determines the final shape.
    pub fn dispatch_all(
        &self,
        state: &mut ShapeState,
        events: impl IntoIterator<Item = InputEvent>,
    ) -> Vec<Dispatch> {
        let mut out = Vec::new();
        for event in events {
            let d = self.dispatch(state, event);
            let quit = d == Dispatch::Quit;
            out.push(d);
            if quit {
                break;
            }
        }
        out
    }
}
