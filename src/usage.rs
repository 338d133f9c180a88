//! Free-post gate for sessions without their own API key

use log::debug;
use serde::{Deserialize, Serialize};

/// Per-session generation counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounter
{   pub count: u32
  , pub limit: u32
  , pub has_overriding_credential: bool
}

/// Outcome of one gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision
{   pub allowed: bool
  , pub count_after: u32
}

impl UsageCounter
{   /// Fresh counter for a new session
    pub fn new(limit: u32) -> Self
    {   UsageCounter
        {   count: 0
          , limit
          , has_overriding_credential: false
        }
    }

    pub fn is_permitted(&self) -> bool
    {   self.has_overriding_credential || self.count < self.limit
    }

    /// Check and charge one generation. Only a permitted attempt
    /// without a credential moves the count.
    pub fn try_consume(&mut self) -> GateDecision
    {   if self.has_overriding_credential
        {   debug!("Gate open: overriding credential");
            return GateDecision
            {   allowed: true
              , count_after: self.count
            };
        }

        if !self.is_permitted()
        {   debug!(
              "Gate closed: {} of {} free posts used",
              self.count, self.limit
            );
            return GateDecision
            {   allowed: false
              , count_after: self.count
            };
        }

        self.count += 1;
        debug!("Free posts remaining: {}", self.remaining());
        GateDecision
        {   allowed: true
          , count_after: self.count
        }
    }

    pub fn remaining(&self) -> u32
    {   self.limit.saturating_sub(self.count)
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn test_exhausted_counter_is_refused()
    {   let mut counter = UsageCounter
        {   count: 3
          , limit: 3
          , has_overriding_credential: false
        };
        let decision = counter.try_consume();
        assert!(!decision.allowed);
        assert_eq!(decision.count_after, 3);
        assert_eq!(counter.count, 3);
    }

    #[test]
    fn test_three_then_refused()
    {   let mut counter = UsageCounter::new(3);
        for expected in 1..=3
        {   let decision = counter.try_consume();
            assert!(decision.allowed);
            assert_eq!(decision.count_after, expected);
        }
        assert_eq!(counter.count, 3);
        assert_eq!(counter.remaining(), 0);
        assert!(!counter.try_consume().allowed);
        assert_eq!(counter.count, 3);
    }

    #[test]
    fn test_credential_never_mutates()
    {   for (count, limit) in [(0, 0), (0, 3), (3, 3), (9, 2)]
        {   let mut counter = UsageCounter
            {   count
              , limit
              , has_overriding_credential: true
            };
            for _ in 0..5
            {   let decision = counter.try_consume();
                assert!(decision.allowed);
                assert_eq!(decision.count_after, count);
            }
            assert_eq!(counter.count, count);
        }
    }

    #[test]
    fn test_zero_limit_refuses_first()
    {   let mut counter = UsageCounter::new(0);
        assert!(!counter.is_permitted());
        assert!(!counter.try_consume().allowed);
        assert_eq!(counter.count, 0);
    }

    #[test]
    fn test_decision_matches_is_permitted()
    {   for (count, limit, credential) in
          [(0, 1, false), (1, 1, false), (5, 1, true), (2, 4, false)]
        {   let mut counter = UsageCounter
            {   count
              , limit
              , has_overriding_credential: credential
            };
            let permitted = counter.is_permitted();
            assert_eq!(counter.try_consume().allowed, permitted);
        }
    }
}
