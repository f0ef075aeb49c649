/// Keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    PauseToggle,
    Confirm,
    Impulse,
}

/// Presentation-layer events, already translated into world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    Key(Key),
    PointerDown { x: f32, y: f32 },
    Resize { width: f32, height: f32 },
}

/// Source of pending events, drained once per frame in arrival order.
pub trait EventSource {
    fn drain(&mut self) -> anyhow::Result<Vec<InputEvent>>;
}
