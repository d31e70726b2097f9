//! Note output for reflection events
//!
//! Reflection events become note messages for two instruments: a sampler
//! whose channel picks the sample (never released) and a lead synth playing
//! the sequence pitch, released once its gate runs out.

use std::collections::BTreeMap;

use crate::consts::GATE_TICKS;
use crate::sim::{EventSink, ReflectionEvent};

/// Full note-on velocity
pub const MAX_VELOCITY: u8 = 0x7f;

/// Which instrument a message targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrument {
    /// Drum sampler, one sample per channel
    Sampler,
    /// Monophonic lead synth
    Lead,
}

/// A note command for one instrument. Velocity 0 is a note-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteMessage {
    pub instrument: Instrument,
    pub channel: u8,
    pub note: u8,
    pub velocity: u8,
}

impl NoteMessage {
    pub fn is_note_off(&self) -> bool {
        self.velocity == 0
    }
}

/// Destination for note messages (device port, log, test recorder)
pub trait NoteOutput {
    fn send(&mut self, message: NoteMessage);
}

impl NoteOutput for Vec<NoteMessage> {
    fn send(&mut self, message: NoteMessage) {
        self.push(message);
    }
}

/// Writes every message to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOutput;

impl NoteOutput for LogOutput {
    fn send(&mut self, message: NoteMessage) {
        if message.is_note_off() {
            log::debug!("{:?} note off {}", message.instrument, message.note);
        } else {
            log::info!(
                "{:?} ch {} note {} vel {}",
                message.instrument,
                message.channel,
                message.note,
                message.velocity
            );
        }
    }
}

/// Event sink that plays notes and releases lead notes after a gate
pub struct NoteScheduler<O: NoteOutput> {
    output: O,
    gate_ticks: u32,
    /// Sounding lead notes -> ticks left before release
    gates: BTreeMap<u8, u32>,
    volume: f32,
    muted: bool,
}

impl<O: NoteOutput> NoteScheduler<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            gate_ticks: GATE_TICKS,
            gates: BTreeMap::new(),
            volume: 1.0,
            muted: false,
        }
    }

    pub fn with_gate_ticks(mut self, gate_ticks: u32) -> Self {
        self.gate_ticks = gate_ticks;
        self
    }

    /// Set volume (0.0 - 1.0), scales note-on velocity
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Mute/unmute. Muted events are dropped; pending releases still go out.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn velocity(&self) -> u8 {
        (MAX_VELOCITY as f32 * self.volume).round() as u8
    }

    /// Count down lead gates; call once per tick after the regions moved
    pub fn service(&mut self) {
        let mut released = Vec::new();
        for (&note, remaining) in self.gates.iter_mut() {
            if *remaining == 0 {
                released.push(note);
            } else {
                *remaining -= 1;
            }
        }
        for note in released {
            self.gates.remove(&note);
            self.output.send(NoteMessage {
                instrument: Instrument::Lead,
                channel: 0,
                note,
                velocity: 0,
            });
        }
    }

    /// Lead notes still held
    pub fn sounding(&self) -> impl Iterator<Item = u8> + '_ {
        self.gates.keys().copied()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }
}

impl<O: NoteOutput> EventSink for NoteScheduler<O> {
    fn emit(&mut self, event: ReflectionEvent) {
        let velocity = self.velocity();
        if self.muted || velocity == 0 {
            return;
        }
        match event {
            ReflectionEvent::Voice { channel } => self.output.send(NoteMessage {
                instrument: Instrument::Sampler,
                channel: channel & 0x0f,
                note: 0,
                velocity,
            }),
            ReflectionEvent::Sequence { pitch } => {
                let note = pitch & 0x7f;
                self.output.send(NoteMessage {
                    instrument: Instrument::Lead,
                    channel: 0,
                    note,
                    velocity,
                });
                self.gates.insert(note, self.gate_ticks);
            }
        }
    }
}
