use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// A reusable piece of the screen.
///
/// Parents pass data in through public fields (props); a component may keep
/// private presentation state such as scroll offsets or cached heights.
///
/// `render` takes `&mut self` so that state can be refreshed during the draw
/// pass, the same way ratatui's `StatefulWidget` threads its state through.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal input.
pub trait EventHandler {
    /// What the component reports back to its parent.
    type Event;

    /// Consume a `TuiEvent`, optionally producing a higher-level event.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
