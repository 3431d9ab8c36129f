//! Points leaderboard.

use serde::{Deserialize, Serialize};

use crate::storage::UserRecord;

/// One ranked row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: usize,
    pub email: String,
    pub points: i64,
    pub is_current_user: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Highest-ranked entries, at most `size` of them
    pub top: Vec<LeaderboardEntry>,
    /// The requesting user's own row, wherever it ranks
    pub current_user: Option<LeaderboardEntry>,
}

impl Leaderboard {
    /// Rank `users` by points (descending, ties by email).
    pub fn build(users: &[UserRecord], current_user_id: &str, size: usize) -> Self {
        let mut sorted: Vec<&UserRecord> = users.iter().collect();
        sorted.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.email.cmp(&b.email)));

        let entries: Vec<LeaderboardEntry> = sorted
            .into_iter()
            .enumerate()
            .map(|(index, user)| LeaderboardEntry {
                rank: index + 1,
                email: user.email.clone(),
                points: user.points,
                is_current_user: user.id == current_user_id,
            })
            .collect();

        let current_user = entries.iter().find(|e| e.is_current_user).cloned();
        let top = entries.into_iter().take(size).collect();

        Self { top, current_user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(n: usize, points: i64) -> UserRecord {
        let mut u = UserRecord::new(format!("user-{n}"), format!("user{n}@example.com"), Utc::now());
        u.points = points;
        u
    }

    #[test]
    fn ranks_by_points_descending() {
        let users = vec![user(1, 150), user(2, 1250), user(3, 25)];
        let board = Leaderboard::build(&users, "user-1", 10);

        let emails: Vec<_> = board.top.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(
            emails,
            vec!["user2@example.com", "user1@example.com", "user3@example.com"]
        );
        assert_eq!(board.top[0].rank, 1);
        let me = board.current_user.unwrap();
        assert_eq!(me.rank, 2);
        assert!(me.is_current_user);
    }

    #[test]
    fn current_user_outside_top_is_still_reported() {
        let users: Vec<_> = (0..12).map(|n| user(n, 1000 - n as i64 * 10)).collect();
        let board = Leaderboard::build(&users, "user-11", 10);
        assert_eq!(board.top.len(), 10);
        assert!(board.top.iter().all(|e| !e.is_current_user));
        assert_eq!(board.current_user.unwrap().rank, 12);
    }

    #[test]
    fn ties_break_by_email() {
        let users = vec![user(9, 50), user(3, 50)];
        let board = Leaderboard::build(&users, "nobody", 10);
        assert_eq!(board.top[0].email, "user3@example.com");
        assert_eq!(board.top[1].rank, 2);
        assert!(board.current_user.is_none());
    }
}
