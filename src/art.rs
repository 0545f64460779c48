// Gallows frames, one per wrong attempt.

pub const FRAMES: [&str; 7] = [
    r"
  +---+
  |   |
      |
      |
      |
      |
=========",
    r"
  +---+
  |   |
  O   |
      |
      |
      |
=========",
    r"
  +---+
  |   |
  O   |
  |   |
      |
      |
=========",
    r"
  +---+
  |   |
  O   |
 /|   |
      |
      |
=========",
    r"
  +---+
  |   |
  O   |
 /|\  |
      |
      |
=========",
    r"
  +---+
  |   |
  O   |
 /|\  |
 /    |
      |
=========",
    r"
  +---+
  |   |
  O   |
 /|\  |
 / \  |
      |
=========",
];

/// Frame for the given attempt count, holding on the last frame once the
/// count runs past it.
pub fn frame(attempts: u32) -> &'static str {
    let index = usize::try_from(attempts).unwrap_or(usize::MAX);
    FRAMES[index.min(FRAMES.len() - 1)]
}
