//! This module provides ways to tweak a [`MockSource`](crate::mock_source::MockSource), so that some of its calls fail during a test

use std::collections::HashMap;

use crate::error::{Error, Result};

/// The calls of a [`TaskSource`](crate::traits::TaskSource)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Call {
    List,
    Create,
    Update,
    Delete,
}

impl Call {
    const ALL: [Call; 4] = [Call::List, Call::Create, Call::Update, Call::Delete];
}

/// Remaining outcomes of a call: it first succeeds `successes` times, then fails `failures` times, then always succeeds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Plan {
    successes: u32,
    failures: u32,
}

/// Describes which calls of a mocked source fail, and when.
///
/// Calls that have not been planned always succeed.
#[derive(Clone, Debug, Default)]
pub struct MockBehaviour {
    plans: HashMap<Call, Plan>,
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails at once, `n_fails` times each
    pub fn fail_now(n_fails: u32) -> Self {
        Call::ALL.iter()
            .fold(Self::new(), |behaviour, &call| behaviour.failing(call, n_fails))
    }

    /// `call` fails `n_fails` times from now on
    pub fn failing(self, call: Call, n_fails: u32) -> Self {
        self.failing_after(call, 0, n_fails)
    }

    /// `call` succeeds `n_successes` times, then fails `n_fails` times
    pub fn failing_after(mut self, call: Call, n_successes: u32, n_fails: u32) -> Self {
        self.plans.insert(call, Plan { successes: n_successes, failures: n_fails });
        self
    }

    /// Consume the next planned outcome for `call`
    pub fn check(&mut self, call: Call) -> Result<()> {
        let plan = match self.plans.get_mut(&call) {
            None => return Ok(()),
            Some(plan) => plan,
        };

        if plan.successes > 0 {
            plan.successes -= 1;
            Ok(())
        } else if plan.failures > 0 {
            plan.failures -= 1;
            log::debug!("Mock behaviour: failing a {:?} call ({} more to fail)", call, plan.failures);
            Err(Error::Mocked(format!("{:?} call failed on purpose", call)))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unplanned_calls_succeed() {
        let mut behaviour = MockBehaviour::new();
        for _ in 0..5 {
            assert!(behaviour.check(Call::List).is_ok());
            assert!(behaviour.check(Call::Delete).is_ok());
        }
    }

    #[test]
    fn fail_now_fails_every_call() {
        let mut behaviour = MockBehaviour::fail_now(2);
        assert!(behaviour.check(Call::List).is_err());
        assert!(behaviour.check(Call::Create).is_err());
        assert!(behaviour.check(Call::Create).is_err());
        assert!(behaviour.check(Call::Create).is_ok());
        assert!(behaviour.check(Call::List).is_err());
        assert!(behaviour.check(Call::List).is_ok());
        assert!(behaviour.check(Call::Update).is_err());
    }

    #[test]
    fn successes_come_first() {
        let mut behaviour = MockBehaviour::new().failing_after(Call::Update, 1, 2);
        assert!(behaviour.check(Call::Update).is_ok());
        assert!(behaviour.check(Call::Update).is_err());
        assert!(behaviour.check(Call::Update).is_err());
        assert!(behaviour.check(Call::Update).is_ok());
        assert!(behaviour.check(Call::Delete).is_ok());
    }
}
