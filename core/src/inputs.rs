use bitflags::bitflags;
use heapless::FnvIndexMap;

bitflags! {
    /// The pad's button bits as the demo reads them, one poll per frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u16 {
        const UP          = 1 << 0;
        const DOWN        = 1 << 1;
        const LEFT        = 1 << 2;
        const RIGHT       = 1 << 3;
        const LEFT_SHIFT  = 1 << 4;
        const RIGHT_SHIFT = 1 << 5;
        const A           = 1 << 6;
        const B           = 1 << 7;
        const C           = 1 << 8;
        const START       = 1 << 9;
        /// The stop/cancel face button.
        const X           = 1 << 10;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerButton {
    Up,
    Down,
    Left,
    Right,
    LeftShift,
    RightShift,
    A,
    B,
    C,
    Start,
    X,
}

impl ControllerButton {
    pub const fn mask(self) -> Buttons {
        match self {
            ControllerButton::Up => Buttons::UP,
            ControllerButton::Down => Buttons::DOWN,
            ControllerButton::Left => Buttons::LEFT,
            ControllerButton::Right => Buttons::RIGHT,
            ControllerButton::LeftShift => Buttons::LEFT_SHIFT,
            ControllerButton::RightShift => Buttons::RIGHT_SHIFT,
            ControllerButton::A => Buttons::A,
            ControllerButton::B => Buttons::B,
            ControllerButton::C => Buttons::C,
            ControllerButton::Start => Buttons::START,
            ControllerButton::X => Buttons::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    JustPressed,
    Pressed,
    JustReleased,
    Released,
}

impl KeyState {
    pub fn is_pressed(self) -> bool {
        matches!(self, KeyState::JustPressed | KeyState::Pressed)
    }

    /// The state one poll later, absent new host events.
    pub fn update(self) -> Self {
        match self {
            KeyState::JustPressed => KeyState::Pressed,
            KeyState::JustReleased => KeyState::Released,
            other => other,
        }
    }
}

/// The one polled controller port. The host records button transitions with
/// [`ControlPad::set_input_state`]; the demo reads the resolved bitmask once
/// per frame with [`ControlPad::poll`].
#[derive(Debug, Default)]
pub struct ControlPad {
    input_state: FnvIndexMap<ControllerButton, KeyState, 16>,
}

impl ControlPad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input_state(&mut self, button: ControllerButton, state: KeyState) {
        self.input_state.insert(button, state).expect("pad map full");
    }

    /// Resolve the current button mask and advance the edge states.
    pub fn poll(&mut self) -> Buttons {
        let mut bits = Buttons::empty();
        for (button, state) in self.input_state.iter_mut() {
            if state.is_pressed() {
                bits |= button.mask();
            }
            *state = state.update();
        }
        bits
    }
}
