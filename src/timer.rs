//! Deferred tasks on the frame clock.
//!
//! Tasks are keyed by a token. Cancelling removes the task, so a token held by
//! someone else simply never fires.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct Scheduled<T> {
    token: TimerToken,
    due_ms: u64,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    next_token: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler {
            next_token: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, task: T) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.push(Scheduled {
            token,
            due_ms: now_ms.saturating_add(delay_ms),
            task,
        });
        token
    }

    /// Returns true if the task was still pending.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.token != token);
        self.pending.len() != before
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|s| s.token == token)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every task due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<(TimerToken, T)> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due_ms <= now_ms {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|s| (s.due_ms, s.token.0));
        due.into_iter().map(|s| (s.token, s.task)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_when_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0, 100, "restart");
        assert!(scheduler.take_due(99).is_empty());
        let fired = scheduler.take_due(100);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, "restart");
        assert!(scheduler.is_empty());
    }

    #[test]
    fn cancelled_token_never_fires() {
        let mut scheduler = Scheduler::new();
        let token = scheduler.schedule(0, 10, 1);
        assert!(scheduler.is_pending(token));
        assert!(scheduler.cancel(token));
        assert!(!scheduler.cancel(token));
        assert!(scheduler.take_due(1_000).is_empty());
    }

    #[test]
    fn due_tasks_come_out_in_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0, 30, 'c');
        scheduler.schedule(0, 10, 'a');
        scheduler.schedule(0, 20, 'b');
        let order: Vec<char> = scheduler.take_due(50).into_iter().map(|(_, t)| t).collect();
        assert_eq!(order, vec!['a', 'b', 'c']);
    }

    #[test]
    fn tokens_are_unique() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.schedule(0, 5, ());
        let b = scheduler.schedule(0, 5, ());
        assert_ne!(a, b);
        assert_eq!(scheduler.len(), 2);
    }
}
