// Character state machine

/// The character's discrete animation/behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Standing still on ground
    #[default]
    Stand,
    /// Moving horizontally on ground
    Walk,
    /// In the air
    Jump,
    /// Playing the one-shot attack animation
    Attack,
}

impl CharacterState {
    /// Check if the state accepts movement input
    pub fn accepts_movement(&self) -> bool {
        !matches!(self, Self::Attack)
    }

    /// Check if the animation for this state loops
    pub fn is_looping(&self) -> bool {
        !matches!(self, Self::Attack)
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Stand => "stand",
            Self::Walk => "walk",
            Self::Jump => "jump",
            Self::Attack => "attack",
        }
    }
}

/// Direction the character is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Horizontal scale applied when drawing (1 = unflipped)
    pub fn scale_x(&self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }
}

/// Something that happened during a tick and may change the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// Attack key went down
    AttackPressed { grounded: bool },
    /// The attack animation ran its full length
    AttackFinished { horizontal_held: bool },
    /// Jump launched from the ground
    Jumped,
    /// Horizontal input moved the character
    Moved { grounded: bool },
    /// No horizontal input this tick
    NoInput { grounded: bool },
    /// Character is in the air without having jumped (walked off a ledge)
    Airborne,
}

/// Compute the next state for an event.
///
/// Attack ignores every event except its own expiry, and can only be
/// entered from the ground.
pub fn transition(current: CharacterState, event: MotionEvent) -> CharacterState {
    use CharacterState::*;

    match (current, event) {
        (Attack, MotionEvent::AttackFinished { horizontal_held: true }) => Walk,
        (Attack, MotionEvent::AttackFinished { horizontal_held: false }) => Stand,
        (Attack, _) => Attack,

        (_, MotionEvent::AttackPressed { grounded: true }) => Attack,
        (state, MotionEvent::AttackPressed { grounded: false }) => state,
        (state, MotionEvent::AttackFinished { .. }) => state,

        (_, MotionEvent::Jumped) => Jump,
        (_, MotionEvent::Moved { grounded: true }) => Walk,
        (state, MotionEvent::Moved { grounded: false }) => state,
        (_, MotionEvent::NoInput { grounded: true }) => Stand,
        (state, MotionEvent::NoInput { grounded: false }) => state,
        (_, MotionEvent::Airborne) => Jump,
    }
}
