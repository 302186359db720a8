/// A sequence of states observed along one search branch, with the actions
/// that lead from each state to the next.
///
/// Invariant: `states.len() == actions.len() + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan<S, A> {
    states: Vec<S>,
    actions: Vec<A>,
}

impl<S, A> Plan<S, A> {
    pub fn new(initial: S) -> Self {
        Plan {
            states: vec![initial],
            actions: Vec::new(),
        }
    }

    /// Extends the plan with `action`, which leads to `state`.
    pub fn push(&mut self, action: A, state: S) {
        self.actions.push(action);
        self.states.push(state);
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    pub fn first_state(&self) -> &S {
        &self.states[0]
    }

    pub fn last_state(&self) -> &S {
        &self.states[self.states.len() - 1]
    }

    /// Number of actions in the plan.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
