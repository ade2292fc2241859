//! Discrete side-effect signals emitted by a simulation step.

/// Fire-and-forget sound triggers. The step only emits them; whoever plays
/// them must not feed anything back into the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// One per weapon discharge, regardless of bullet count.
    Shoot,
    /// The player took damage.
    Hit,
    /// An enemy was destroyed, by gunfire or by ramming the player.
    Explosion,
    /// A power-up was collected.
    PowerUp,
}

impl SoundCue {
    pub fn tag(self) -> &'static str {
        match self {
            SoundCue::Shoot => "shoot",
            SoundCue::Hit => "hit",
            SoundCue::Explosion => "explosion",
            SoundCue::PowerUp => "powerup",
        }
    }
}
