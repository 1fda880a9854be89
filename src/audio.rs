//! Audio system using Web Audio API
//!
//! Background music and sound effects are synthesized from oscillators, so
//! there are no asset files to fetch.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::FrameEvents;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player spread fired
    Shot,
    /// An enemy fired
    EnemyShot,
    /// Enemy destroyed
    Explosion,
    /// Player lost
    GameOver,
}

/// Oscillators making up the running music loop
struct MusicVoices {
    oscillators: Vec<OscillatorNode>,
}

impl MusicVoices {
    fn stop(self) {
        for osc in self.oscillators {
            osc.stop().ok();
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music_gain: Option<GainNode>,
    music: Option<MusicVoices>,
    /// Set on the first input of a session, cleared by `reset_music`
    music_started: bool,
    /// Mute already folded in
    music_volume: f32,
    sfx_volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }

        let music_gain = ctx.as_ref().and_then(|ctx| {
            let gain = ctx.create_gain().ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;
            Some(gain)
        });

        let mut audio = Self {
            ctx,
            music_gain,
            music: None,
            music_started: false,
            music_volume: 0.0,
            sfx_volume: 0.0,
        };
        audio.apply_settings(settings);
        audio
    }

    /// Pick up changed volumes or mute; the drone keeps playing
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.music_volume = settings.effective_music_volume();
        self.sfx_volume = settings.effective_sfx_volume();
        if let Some(gain) = &self.music_gain {
            gain.gain().set_value(self.music_volume * 0.25);
        }
    }

    /// Resume audio context (required after user gesture)
    fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Start the music once per session; later calls are no-ops
    pub fn start_music(&mut self) {
        if self.music_started {
            return;
        }
        self.music_started = true;
        self.resume();

        let (Some(ctx), Some(out)) = (&self.ctx, &self.music_gain) else {
            return;
        };
        self.music = Self::build_music(ctx, out);
        if self.music.is_some() {
            log::info!("Music started");
        }
    }

    /// Slow two-voice drone with a wobbling lead
    fn build_music(ctx: &AudioContext, out: &GainNode) -> Option<MusicVoices> {
        let bass = ctx.create_oscillator().ok()?;
        bass.set_type(OscillatorType::Triangle);
        bass.frequency().set_value(110.0);
        bass.connect_with_audio_node(out).ok()?;

        let lead = ctx.create_oscillator().ok()?;
        lead.set_type(OscillatorType::Sine);
        lead.frequency().set_value(330.0);
        let lead_gain = ctx.create_gain().ok()?;
        lead_gain.gain().set_value(0.4);
        lead.connect_with_audio_node(&lead_gain).ok()?;
        lead_gain.connect_with_audio_node(out).ok()?;

        // LFO sweeping the lead's pitch
        let lfo = ctx.create_oscillator().ok()?;
        lfo.set_type(OscillatorType::Sine);
        lfo.frequency().set_value(0.5);
        let depth = ctx.create_gain().ok()?;
        depth.gain().set_value(40.0);
        lfo.connect_with_audio_node(&depth).ok()?;
        depth.connect_with_audio_param(&lead.frequency()).ok()?;

        for osc in [&bass, &lead, &lfo] {
            osc.start().ok()?;
        }
        Some(MusicVoices {
            oscillators: vec![bass, lead, lfo],
        })
    }

    /// Silence the music (game over)
    pub fn stop_music(&mut self) {
        if let Some(voices) = self.music.take() {
            voices.stop();
            log::info!("Music stopped");
        }
    }

    /// Stop and rewind so the next input starts it from the beginning
    pub fn reset_music(&mut self) {
        self.stop_music();
        self.music_started = false;
    }

    /// Play the effects for one frame's events
    pub fn play_events(&self, events: &FrameEvents) {
        if events.spread_fired {
            self.play(SoundEffect::Shot);
        }
        if events.enemy_shots > 0 {
            self.play(SoundEffect::EnemyShot);
        }
        if events.enemies_destroyed > 0 {
            self.play(SoundEffect::Explosion);
        }
        if events.game_over {
            self.play(SoundEffect::GameOver);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.sfx_volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };
        self.resume();

        match effect {
            SoundEffect::Shot => self.play_shot(ctx, vol),
            SoundEffect::EnemyShot => self.play_enemy_shot(ctx, vol),
            SoundEffect::Explosion => self.play_explosion(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Player shot - short high blip
    fn play_shot(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.08, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.06)
            .ok();
        osc.frequency().set_value_at_time(900.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(500.0, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }

    /// Enemy shot - lower buzz
    fn play_enemy_shot(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.12, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(150.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.12).ok();
    }

    /// Explosion - boom!
    fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(100.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(30.0, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.5).ok();

        // High frequency crack
        if let Some((osc2, gain2)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
            gain2.gain().set_value_at_time(vol * 0.2, t).ok();
            gain2
                .gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc2.start().ok();
            osc2.stop_with_when(t + 0.15).ok();
        }
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}
