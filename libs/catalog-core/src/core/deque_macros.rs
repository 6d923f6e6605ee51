/// Pops the only element and checks it against the pattern
#[macro_export]
macro_rules! assert_deque_single_matches {
    ($deque:expr, $pattern:pat if $condition:expr) => {{
        let deque = &mut $deque;
        assert_eq!(deque.len(), 1, "expected exactly one queued notification");
        assert!(matches!(deque.pop_front(), Some($pattern) if $condition));
    }};
    ($deque:expr, $pattern:pat) => {{
        let deque = &mut $deque;
        assert_eq!(deque.len(), 1, "expected exactly one queued notification");
        assert!(matches!(deque.pop_front(), Some($pattern)));
    }};
}

/// Drains the deque and compares it with expected values, front to back
#[macro_export]
macro_rules! assert_deque_drained_eq {
    ($deque:expr, [$($expected:expr),* $(,)?]) => {{
        let deque = &mut $deque;
        let drained: Vec<_> = deque.drain(..).collect();
        assert_eq!(drained, vec![$($expected),*]);
    }};
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    #[test]
    fn test_assert_deque_single_matches() {
        let mut deque = VecDeque::new();
        deque.push_back("Matrix");

        assert_deque_single_matches!(deque, "Matrix");
        assert!(deque.is_empty());
    }

    #[test]
    fn test_assert_deque_single_matches_with_condition() {
        let mut deque = VecDeque::new();
        deque.push_back(10);

        assert_deque_single_matches!(deque, x if x == 10);
    }

    #[test]
    #[should_panic]
    fn test_assert_deque_single_matches_wrong_length() {
        let mut deque = VecDeque::new();
        deque.push_back(10);
        deque.push_back(20);

        assert_deque_single_matches!(deque, 10);
    }

    #[test]
    fn test_assert_deque_drained_eq() {
        let mut deque = VecDeque::new();
        deque.push_back("o1");
        deque.push_back("o3");

        assert_deque_drained_eq!(deque, ["o1", "o3"]);
        assert!(deque.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_assert_deque_drained_eq_wrong_order() {
        let mut deque = VecDeque::new();
        deque.push_back("o1");
        deque.push_back("o3");

        assert_deque_drained_eq!(deque, ["o3", "o1"]);
    }
}
