use crossterm::event::Event;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// State changed since the last draw.
    Render,
    Terminal(Event),
}
