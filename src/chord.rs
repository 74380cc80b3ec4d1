//! Chord generator: every note on/off is expanded into one note per semitone
//! offset.

use crate::event::MidiEvent;
use crate::processor::EventProcessor;

/// Offsets used when none are configured (major triad).
pub const DEFAULT_SEMITONES: [i32; 3] = [0, 4, 7];

/// Drop repeated offsets, keeping the first occurrence of each.
pub fn dedup_semitones(semitones: &[i32]) -> Vec<i32> {
    let mut out = Vec::with_capacity(semitones.len());
    for &s in semitones {
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

/// Shift `note` by `semitones`, or `None` if the result leaves 0..=127.
pub fn shift_note(note: u8, semitones: i32) -> Option<u8> {
    (note as i32)
        .checked_add(semitones)
        .and_then(|n| u8::try_from(n).ok())
        .filter(|&n| n <= 127)
}

pub struct ChordProcessor {
    semitones: Vec<i32>,
}

impl ChordProcessor {
    pub fn new(semitones: &[i32]) -> Self {
        Self {
            semitones: dedup_semitones(semitones),
        }
    }

    pub fn semitones(&self) -> &[i32] {
        &self.semitones
    }

    fn expand(&self, note: u8, make: impl Fn(u8) -> MidiEvent) -> Vec<MidiEvent> {
        self.semitones
            .iter()
            .filter_map(|&s| match shift_note(note, s) {
                Some(n) => Some(make(n)),
                None => {
                    log::warn!("Note {} out of range, discarding", note as i64 + s as i64);
                    None
                }
            })
            .collect()
    }
}

impl Default for ChordProcessor {
    fn default() -> Self {
        Self::new(&DEFAULT_SEMITONES)
    }
}

impl EventProcessor for ChordProcessor {
    fn process(&mut self, event: MidiEvent) -> Vec<MidiEvent> {
        match event {
            MidiEvent::NoteOn {
                channel,
                note,
                velocity,
            } => {
                log::info!("Producing chord for {}", event);
                self.expand(note, |note| MidiEvent::NoteOn {
                    channel,
                    note,
                    velocity,
                })
            }
            MidiEvent::NoteOff {
                channel,
                note,
                velocity,
            } => {
                log::info!("Producing note offs for {}", event);
                self.expand(note, |note| MidiEvent::NoteOff {
                    channel,
                    note,
                    velocity,
                })
            }
            other => {
                log::debug!("Passing event {}", other);
                vec![other]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(events: &[MidiEvent]) -> Vec<u8> {
        events
            .iter()
            .map(|e| match e {
                MidiEvent::NoteOn { note, .. } | MidiEvent::NoteOff { note, .. } => *note,
                _ => panic!("Expected a note event"),
            })
            .collect()
    }

    #[test]
    fn test_major_triad() {
        let mut chord = ChordProcessor::default();
        let out = chord.process(MidiEvent::NoteOn {
            channel: 2,
            note: 60,
            velocity: 100,
        });
        assert_eq!(notes(&out), vec![60, 64, 67]);
        assert!(out
            .iter()
            .all(|e| matches!(e, MidiEvent::NoteOn { channel: 2, velocity: 100, .. })));
    }

    #[test]
    fn test_note_off_expands_too() {
        let mut chord = ChordProcessor::new(&[0, -12]);
        let out = chord.process(MidiEvent::NoteOff {
            channel: 0,
            note: 48,
            velocity: 64,
        });
        assert_eq!(notes(&out), vec![48, 36]);
        assert!(matches!(out[1], MidiEvent::NoteOff { velocity: 64, .. }));
    }

    #[test]
    fn test_out_of_range_notes_are_dropped() {
        let mut chord = ChordProcessor::default();
        let out = chord.process(MidiEvent::NoteOn {
            channel: 0,
            note: 122,
            velocity: 1,
        });
        assert_eq!(notes(&out), vec![122, 126]);

        let mut low = ChordProcessor::new(&[-5, 0]);
        let out = low.process(MidiEvent::NoteOn {
            channel: 0,
            note: 3,
            velocity: 1,
        });
        assert_eq!(notes(&out), vec![3]);
    }

    #[test]
    fn test_duplicate_offsets_behave_like_unique() {
        let dup = ChordProcessor::new(&[0, 4, 0, 7]);
        assert_eq!(dup.semitones(), &[0, 4, 7]);
    }

    #[test]
    fn test_other_events_pass_through() {
        let mut chord = ChordProcessor::default();
        let cc = MidiEvent::ControlChange {
            channel: 0,
            control: 64,
            value: 127,
        };
        assert_eq!(chord.process(cc.clone()), vec![cc]);
    }

    #[test]
    fn test_shift_note_bounds() {
        assert_eq!(shift_note(127, 0), Some(127));
        assert_eq!(shift_note(127, 1), None);
        assert_eq!(shift_note(0, -1), None);
        assert_eq!(shift_note(10, 5), Some(15));
    }
}
