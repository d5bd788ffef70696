use std::time::Duration;

pub const TYPE_SPEED: Duration = Duration::from_millis(70);
pub const DELETE_SPEED: Duration = Duration::from_millis(45);
pub const HOLD: Duration = Duration::from_millis(900);

pub const ROLES: [&str; 5] = [
    "Data Analyst",
    "MIS Executive",
    "Excel Specialist",
    "Power Query Expert",
    "React.js",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    /// Delay before the next tick.
    pub next: Duration,
}

/// Types each role one character at a time, holds, deletes it, then moves on.
#[derive(Debug, Clone)]
pub struct TypingAnimator {
    roles: Vec<Vec<char>>,
    role_index: usize,
    char_index: usize,
    deleting: bool,
}

impl TypingAnimator {
    /// Empty roles are skipped, `None` if nothing is left to type.
    pub fn new<I, R>(roles: I) -> Option<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        let roles: Vec<Vec<char>> = roles
            .into_iter()
            .map(|role| role.as_ref().chars().collect::<Vec<_>>())
            .filter(|role| !role.is_empty())
            .collect();

        if roles.is_empty() {
            return None;
        }

        Some(Self {
            roles,
            role_index: 0,
            char_index: 0,
            deleting: false,
        })
    }

    pub fn role_index(&self) -> usize {
        self.role_index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn text(&self) -> String {
        self.roles[self.role_index][..self.char_index].iter().collect()
    }

    pub fn tick(&mut self) -> Frame {
        let length = self.roles[self.role_index].len();

        if !self.deleting {
            self.char_index += 1;

            if self.char_index == length {
                self.deleting = true;
                return Frame {
                    text: self.text(),
                    next: HOLD,
                };
            }
        } else {
            self.char_index -= 1;

            if self.char_index == 0 {
                self.deleting = false;
                self.role_index = (self.role_index + 1) % self.roles.len();
            }
        }

        Frame {
            text: self.text(),
            next: if self.deleting { DELETE_SPEED } else { TYPE_SPEED },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_holds_and_deletes() {
        let mut animator = TypingAnimator::new(["abc", "de"]).unwrap();

        let frames: Vec<_> = (0..7).map(|_| animator.tick()).collect();
        let texts: Vec<_> = frames.iter().map(|f| f.text.as_str()).collect();
        let delays: Vec<_> = frames.iter().map(|f| f.next).collect();

        assert_eq!(texts, vec!["a", "ab", "abc", "ab", "a", "", "d"]);
        assert_eq!(
            delays,
            vec![
                TYPE_SPEED,
                TYPE_SPEED,
                HOLD,
                DELETE_SPEED,
                DELETE_SPEED,
                TYPE_SPEED,
                TYPE_SPEED
            ]
        );
        assert_eq!(animator.role_index(), 1);
    }

    #[test]
    fn test_length_rises_then_falls_within_bounds() {
        let mut animator = TypingAnimator::new(ROLES).unwrap();

        for role in ROLES {
            let limit = role.chars().count();
            let mut lengths = Vec::new();

            loop {
                let frame = animator.tick();
                lengths.push(frame.text.chars().count());
                if frame.text.is_empty() {
                    break;
                }
            }

            assert!(lengths.iter().all(|&len| len <= limit));
            let peak = lengths.iter().position(|&len| len == limit).unwrap();
            assert!(lengths[..=peak].windows(2).all(|w| w[0] <= w[1]));
            assert!(lengths[peak..].windows(2).all(|w| w[0] >= w[1]));
        }

        assert_eq!(animator.role_index(), 0);
    }

    #[test]
    fn test_multibyte_roles() {
        let mut animator = TypingAnimator::new(["né"]).unwrap();

        assert_eq!(animator.tick().text, "n");
        assert_eq!(animator.tick().text, "né");
    }

    #[test]
    fn test_nothing_to_type() {
        assert!(TypingAnimator::new(Vec::<String>::new()).is_none());
        assert!(TypingAnimator::new(["", ""]).is_none());
    }
}
