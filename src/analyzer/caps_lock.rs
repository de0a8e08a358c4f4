//! Caps-lock run detection
//!
//! A run is a stretch of uppercase letters, possibly separated by spaces,
//! that is long enough to be typed with caps lock instead of holding shift
//! for every letter.

/// Classification of one character against the run around it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapsLockRun {
    /// The surrounding run reaches the threshold
    pub is_run: bool,
    /// Character is the run's first capital
    pub is_first: bool,
    /// Character is the run's last capital
    pub is_last: bool,
    /// Capitals in the surrounding window, spaces excluded
    pub letters: usize,
}

impl CapsLockRun {
    /// First and last at once, only reachable with a threshold of 1
    pub fn is_single(&self) -> bool {
        self.is_first && self.is_last
    }
}

fn extends_run(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch == ' '
}

/// Capitals and spaces around a capital, bounded by char indices of its
/// first and last capital
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapsLockWindow {
    pub first: usize,
    pub last: usize,
    /// Capitals in the window, spaces excluded
    pub letters: usize,
}

impl CapsLockWindow {
    /// Window around the capital at char `index`, which starts at byte `byte` of `text`
    pub fn around(text: &str, index: usize, byte: usize) -> Self {
        let mut window = Self {
            first: index,
            last: index,
            letters: 1,
        };

        let mut at = index;
        for ch in text[..byte].chars().rev().take_while(|&c| extends_run(c)) {
            at -= 1;
            if ch.is_ascii_uppercase() {
                window.first = at;
                window.letters += 1;
            }
        }

        let mut at = index;
        for ch in text[byte..].chars().skip(1).take_while(|&c| extends_run(c)) {
            at += 1;
            if ch.is_ascii_uppercase() {
                window.last = at;
                window.letters += 1;
            }
        }

        window
    }

    /// Whether the capital at char `index` belongs to this window
    pub fn contains(&self, index: usize) -> bool {
        (self.first..=self.last).contains(&index)
    }

    /// Classify the capital at char `index` against the window
    pub fn classify(&self, index: usize, threshold: usize) -> CapsLockRun {
        let is_run = self.letters >= threshold.max(1);
        CapsLockRun {
            is_run,
            is_first: is_run && self.first == index,
            is_last: is_run && self.last == index,
            letters: self.letters,
        }
    }
}

/// Classify the character at char `index` of `text` against the caps-lock
/// run around it.
///
/// The window grows in both directions through capitals and spaces. It
/// qualifies when it holds at least `threshold` capitals.
pub fn detect_caps_lock_run(text: &str, index: usize, threshold: usize) -> CapsLockRun {
    match text.char_indices().nth(index) {
        Some((byte, ch)) if ch.is_ascii_uppercase() => {
            CapsLockWindow::around(text, index, byte).classify(index, threshold)
        }
        _ => CapsLockRun::default(),
    }
}
