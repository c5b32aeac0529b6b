//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! `SoundEffect` and its event mapping are platform-free; the player itself
//! only exists on wasm32.

use crate::sim::{GameEvent, PowerUpKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle (pitch climbs with the combo)
    PaddleHit { combo: u32 },
    /// Full-meter return
    PowerHit,
    /// Ball hits top/bottom wall
    WallHit,
    /// Countdown beep
    CountdownBeep,
    /// Ball served
    Serve,
    /// Combo milestone reached
    Combo,
    /// Power-up appeared
    PowerUpSpawn,
    /// Power-up collected
    PowerUpCollect(PowerUpKind),
    /// Goal
    Score,
    /// Match decided
    GameOver,
    /// Pause / resume
    Pause,
    /// Menu button activated
    MenuClick,
}

impl SoundEffect {
    /// Sound for a simulation event (if any)
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match *event {
            GameEvent::CountdownTick(_) => Some(SoundEffect::CountdownBeep),
            GameEvent::RallyStart => Some(SoundEffect::Serve),
            GameEvent::PaddleHit { power: true, .. } => Some(SoundEffect::PowerHit),
            GameEvent::PaddleHit { combo, .. } => Some(SoundEffect::PaddleHit { combo }),
            GameEvent::ComboMilestone { .. } => Some(SoundEffect::Combo),
            GameEvent::WallHit => Some(SoundEffect::WallHit),
            GameEvent::PowerUpSpawned(_) => Some(SoundEffect::PowerUpSpawn),
            GameEvent::PowerUpExpired(_) => None,
            GameEvent::PowerUpCollected { kind, .. } => Some(SoundEffect::PowerUpCollect(kind)),
            GameEvent::PointScored { .. } => Some(SoundEffect::Score),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::Paused | GameEvent::Resumed => Some(SoundEffect::Pause),
        }
    }

    /// Base pitch of a paddle hit, rising a semitone per combo step (capped)
    pub fn paddle_pitch(combo: u32) -> f32 {
        const BASE: f32 = 220.0;
        BASE * 2f32.powf(combo.min(12) as f32 / 12.0)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;
    use crate::sim::PowerUpKind;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: settings.master_volume,
                sfx_volume: settings.sfx_volume,
                muted: settings.muted,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        pub fn is_muted(&self) -> bool {
            self.muted
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::PaddleHit { combo } => self.play_paddle_hit(ctx, vol, combo),
                SoundEffect::PowerHit => self.play_power_hit(ctx, vol),
                SoundEffect::WallHit => self.play_wall_hit(ctx, vol),
                SoundEffect::CountdownBeep => self.blip(ctx, vol * 0.25, 660.0, OscillatorType::Square, 0.08),
                SoundEffect::Serve => self.play_serve(ctx, vol),
                SoundEffect::Combo => self.play_arpeggio(ctx, vol, &[523.0, 659.0, 784.0, 1046.0], 0.06),
                SoundEffect::PowerUpSpawn => self.blip(ctx, vol * 0.15, 880.0, OscillatorType::Sine, 0.12),
                SoundEffect::PowerUpCollect(kind) => self.play_pickup(ctx, vol, kind),
                SoundEffect::Score => self.play_score(ctx, vol),
                SoundEffect::GameOver => self.play_arpeggio(ctx, vol, &[392.0, 523.0, 659.0, 784.0, 1046.0], 0.12),
                SoundEffect::Pause => self.blip(ctx, vol * 0.2, 330.0, OscillatorType::Triangle, 0.1),
                SoundEffect::MenuClick => self.blip(ctx, vol * 0.2, 520.0, OscillatorType::Triangle, 0.05),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(&self, ctx: &AudioContext, freq: f32, osc_type: OscillatorType) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Single short tone with exponential decay
        fn blip(&self, ctx: &AudioContext, level: f32, freq: f32, osc_type: OscillatorType, length: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(level, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + length).ok();

            osc.start().ok();
            osc.stop_with_when(t + length + 0.02).ok();
        }

        /// Paddle hit - short thump, higher with each return
        fn play_paddle_hit(&self, ctx: &AudioContext, vol: f32, combo: u32) {
            let freq = SoundEffect::paddle_pitch(combo);
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.09).ok();
            osc.frequency().set_value_at_time(freq, t).ok();
            osc.frequency().exponential_ramp_to_value_at_time(freq * 0.5, t + 0.09).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Power hit - bass boom plus a bright crack
        fn play_power_hit(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.45, t).ok();
                gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.3).ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency().exponential_ramp_to_value_at_time(40.0, t + 0.3).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.35).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 1800.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.08).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.1).ok();
            }
        }

        /// Wall hit - higher ping
        fn play_wall_hit(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, vol * 0.25, 440.0, OscillatorType::Sine, 0.07);
        }

        /// Serve - whoosh up
        fn play_serve(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.2).ok();
            osc.frequency().set_value_at_time(200.0, t).ok();
            osc.frequency().exponential_ramp_to_value_at_time(880.0, t + 0.15).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Pickup - rising chirp, colored by kind
        fn play_pickup(&self, ctx: &AudioContext, vol: f32, kind: PowerUpKind) {
            let (from, to) = match kind {
                PowerUpKind::Speed => (600.0, 1600.0),
                PowerUpKind::Multi => (400.0, 1200.0),
                PowerUpKind::Combo => (700.0, 1400.0),
                PowerUpKind::Grow => (300.0, 600.0),
            };
            let Some((osc, gain)) = self.create_osc(ctx, from, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.2).ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency().exponential_ramp_to_value_at_time(to, t + 0.12).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Goal - descending buzz
        fn play_score(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 520.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.45).ok();
            osc.frequency().set_value_at_time(520.0, t).ok();
            osc.frequency().exponential_ramp_to_value_at_time(130.0, t + 0.4).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        /// Notes played one after another
        fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, notes: &[f32], step: f64) {
            for (i, freq) in notes.iter().enumerate() {
                let delay = i as f64 * step;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.25).ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }
}
