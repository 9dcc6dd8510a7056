mod narrator;

pub use narrator::{ConsoleSpeech, Narrator, FALLBACK_ANNOUNCEMENT};
