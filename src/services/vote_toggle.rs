use crate::models::common::VoteType;

/// Result of applying one vote request to a user's existing vote in a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    /// The vote the user holds afterwards; `None` means the vote was toggled off.
    pub record: Option<VoteType>,
    pub likes_delta: i32,
    pub dislikes_delta: i32,
}

fn delta_for(vote: VoteType, sign: i32) -> (i32, i32) {
    match vote {
        VoteType::Like => (sign, 0),
        VoteType::Dislike => (0, sign),
    }
}

pub fn resolve(existing: Option<VoteType>, incoming: VoteType) -> VoteOutcome {
    match existing {
        Some(prev) if prev == incoming => {
            let (likes_delta, dislikes_delta) = delta_for(prev, -1);
            VoteOutcome {
                record: None,
                likes_delta,
                dislikes_delta,
            }
        }
        Some(prev) => {
            let (l_out, d_out) = delta_for(prev, -1);
            let (l_in, d_in) = delta_for(incoming, 1);
            VoteOutcome {
                record: Some(incoming),
                likes_delta: l_out + l_in,
                dislikes_delta: d_out + d_in,
            }
        }
        None => {
            let (likes_delta, dislikes_delta) = delta_for(incoming, 1);
            VoteOutcome {
                record: Some(incoming),
                likes_delta,
                dislikes_delta,
            }
        }
    }
}

/// Counter pair that never drops below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub likes: i32,
    pub dislikes: i32,
}

impl Tally {
    pub fn apply(self, outcome: &VoteOutcome) -> Tally {
        Tally {
            likes: (self.likes + outcome.likes_delta).max(0),
            dislikes: (self.dislikes + outcome.dislikes_delta).max(0),
        }
    }
}
