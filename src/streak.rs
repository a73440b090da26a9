use rand::seq::SliceRandom;
use rand::Rng;

/// Streak length at which feedback starts showing
pub const STREAK_THRESHOLD: u32 = 2;

// Tiers grow in enthusiasm (or scorn) with streak depth.
const CHEERS: &[&[&str]] = &[
    &["Nice ear!", "Good one!", "You hear it!"],
    &["On a roll!", "Three for three!", "Sharp listening!"],
    &["Unstoppable!", "Your tongue knows the way!", "Pronunciation pro!"],
    &["LEGENDARY EARS!", "Are you a phonetician?", "Flawless path-finding!"],
];

const JEERS: &[&[&str]] = &[
    &["Listen again...", "Not quite.", "Say it out loud first."],
    &["Are you guessing?", "Your ears need coffee.", "Hmm, wrong sound again."],
    &["Tongue between the teeth!", "That maze is laughing at you.", "Try humming it."],
    &["Did you mute your brain?", "Even the walls know that one.", "Please, just stop guessing."],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Cheer,
    Jeer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: &'static str,
}

/// Pick a message for the current streaks, or None below the threshold.
pub fn select_feedback<R: Rng + ?Sized>(
    rng: &mut R,
    correct_streak: u32,
    incorrect_streak: u32,
) -> Option<Feedback> {
    let (kind, streak, pool) = if correct_streak >= STREAK_THRESHOLD {
        (FeedbackKind::Cheer, correct_streak, CHEERS)
    } else if incorrect_streak >= STREAK_THRESHOLD {
        (FeedbackKind::Jeer, incorrect_streak, JEERS)
    } else {
        return None;
    };

    let tier = ((streak - STREAK_THRESHOLD) as usize).min(pool.len() - 1);
    pool[tier]
        .choose(rng)
        .map(|&message| Feedback { kind, message })
}
