use std::sync::*;

//
// LifetimeHook
//

/// Hook that may replace a computed max-age.
///
/// Hooks are registered on the layer in an explicit order; each sees the
/// previous hook's output as its candidate, while `original` stays fixed at
/// the pre-hook value for the whole chain.
///
/// Hooks are trusted collaborators: a panicking hook is an integration error
/// and is not caught here.
pub trait LifetimeHook: Send + Sync {
    /// Return the replacement max-age in seconds.
    ///
    /// Returning `candidate` unchanged is valid.
    fn alter(&self, candidate: u64, original: u64) -> u64;
}

impl<FunctionT> LifetimeHook for FunctionT
where
    FunctionT: Fn(u64, u64) -> u64 + Send + Sync,
{
    fn alter(&self, candidate: u64, original: u64) -> u64 {
        self(candidate, original)
    }
}

/// Ordered lifetime hooks.
pub type LifetimeHooks = Vec<Arc<dyn LifetimeHook>>;

/// Run a candidate max-age through all hooks in registration order.
///
/// With no hooks registered the candidate is returned unchanged.
pub fn apply_hooks(hooks: &[Arc<dyn LifetimeHook>], candidate: u64) -> u64 {
    let original = candidate;
    let mut candidate = candidate;
    for hook in hooks {
        candidate = hook.alter(candidate, original);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_hooks_is_identity() {
        assert_eq!(apply_hooks(&[], 300), 300);
        assert_eq!(apply_hooks(&[], 0), 0);
    }

    #[test]
    fn hooks_compose_in_order() {
        let hooks: LifetimeHooks = vec![
            Arc::new(|candidate: u64, original: u64| {
                assert_eq!(original, 5);
                candidate * 2
            }),
            Arc::new(|candidate: u64, original: u64| {
                assert_eq!(original, 5);
                candidate + 1
            }),
        ];

        assert_eq!(apply_hooks(&hooks, 5), 11);
    }

    #[test]
    fn original_stays_fixed_across_the_chain() {
        let hooks: LifetimeHooks = vec![
            Arc::new(|_candidate: u64, _original: u64| 0),
            Arc::new(|_candidate: u64, original: u64| original),
        ];

        assert_eq!(apply_hooks(&hooks, 42), 42);
    }

    struct Cap(u64);

    impl LifetimeHook for Cap {
        fn alter(&self, candidate: u64, _original: u64) -> u64 {
            candidate.min(self.0)
        }
    }

    #[test]
    fn hook_objects_and_closures_mix() {
        let hooks: LifetimeHooks = vec![
            Arc::new(|candidate: u64, _original: u64| candidate * 10),
            Arc::new(Cap(600)),
        ];

        assert_eq!(apply_hooks(&hooks, 100), 600);
        assert_eq!(apply_hooks(&hooks, 10), 100);
    }
}
