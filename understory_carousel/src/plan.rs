// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition requests and their resolution into plans.
//!
//! Relative requests wrap around the ends of the panel sequence. Absolute
//! requests infer their direction by comparing indices.
//!
//! ```
//! use understory_carousel::plan::{TransitionRequest, TravelDirection, resolve};
//!
//! // Next from the last of three panels wraps to the first, still travelling forward.
//! let plan = resolve(TransitionRequest::Next, 2, 3).unwrap();
//! assert_eq!((plan.from, plan.to), (2, 0));
//! assert_eq!(plan.direction, TravelDirection::Forward);
//!
//! // Jumping backwards.
//! let plan = resolve(TransitionRequest::To(0), 2, 3).unwrap();
//! assert_eq!(plan.direction, TravelDirection::Backward);
//!
//! // Jumping to the current panel is not a transition.
//! assert!(resolve(TransitionRequest::To(2), 2, 3).is_none());
//! ```

/// A request to change the active panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionRequest {
    /// The following panel, wrapping to the first.
    Next,
    /// The preceding panel, wrapping to the last.
    Prev,
    /// A specific panel.
    To(usize),
}

/// Which way a transition travels.
///
/// Slide effects use this to choose the edge the incoming panel enters from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TravelDirection {
    /// Towards later panels.
    Forward,
    /// Towards earlier panels.
    Backward,
}

impl TravelDirection {
    /// `-1.0` for backward travel, `1.0` for forward.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// A resolved transition between two distinct panels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionPlan {
    /// Outgoing panel.
    pub from: usize,
    /// Incoming panel.
    pub to: usize,
    /// Travel direction.
    pub direction: TravelDirection,
}

/// Resolves `request` against the active panel `from` of `count` panels.
///
/// Returns `None` when there is nothing to animate: fewer than two panels,
/// `from` or an absolute target out of range, or a target equal to `from`.
#[must_use]
pub fn resolve(request: TransitionRequest, from: usize, count: usize) -> Option<TransitionPlan> {
    if count < 2 || from >= count {
        return None;
    }
    let (to, direction) = match request {
        TransitionRequest::Next => ((from + 1) % count, TravelDirection::Forward),
        TransitionRequest::Prev => ((from + count - 1) % count, TravelDirection::Backward),
        TransitionRequest::To(target) => {
            if target >= count || target == from {
                return None;
            }
            let direction = if target > from {
                TravelDirection::Forward
            } else {
                TravelDirection::Backward
            };
            (target, direction)
        }
    };
    Some(TransitionPlan {
        from,
        to,
        direction,
    })
}
