//! Timed work queue keyed on simulation milliseconds

/// Items waiting for a simulation time. Order among items due at the same
/// time follows insertion order.
#[derive(Debug, Clone)]
pub struct Schedule<T> {
    entries: Vec<(f64, T)>,
}

impl<T> Default for Schedule<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Schedule<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at_ms: f64, item: T) {
        self.entries.push((at_ms, item));
    }

    /// Remove and return everything due at or before `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(at, _)| *at <= now_ms);
        self.entries = pending;
        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter().map(|(_, item)| item).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_due_in_time_order() {
        let mut schedule = Schedule::new();
        schedule.schedule(300.0, "c");
        schedule.schedule(100.0, "a");
        schedule.schedule(900.0, "late");
        schedule.schedule(200.0, "b");

        assert!(schedule.take_due(50.0).is_empty());
        assert_eq!(schedule.take_due(300.0), vec!["a", "b", "c"]);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.take_due(1e9), vec!["late"]);
        assert!(schedule.is_empty());
    }
}
