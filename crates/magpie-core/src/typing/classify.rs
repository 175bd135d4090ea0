//! Receiver classification, the query the restriction engine asks.

use tracing::trace;

use crate::syntax::ast::{ExprId, Expression};

use super::bridge::{CheckerBridge, TypeMatch, TypeProvider};
use super::infer::TypeInferencer;
use super::tag::TypeTag;

/// Confidence of a classification answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrength {
    /// The receiver is definitely of the target class.
    Exact,
    /// The receiver type is indeterminate and the caller opted into
    /// treating unknown receivers as matches. Fixes derived from an
    /// aggressive match must be offered as suggestions, never applied
    /// automatically.
    Aggressive,
    NoMatch,
}

impl MatchStrength {
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchStrength::NoMatch)
    }
}

/// Decides whether a member-access receiver is of a target class.
///
/// Two strategies: resolved type information through a
/// [`TypeProvider`] when the host wired one up, otherwise syntactic
/// inference. The strategy is fixed at construction; the `aggressive`
/// flag is per query because rules can override it individually.
pub struct ReceiverClassifier<'a> {
    inferencer: &'a TypeInferencer<'a>,
    bridge: Option<CheckerBridge<'a>>,
}

impl<'a> ReceiverClassifier<'a> {
    pub fn new(inferencer: &'a TypeInferencer<'a>, provider: Option<&'a dyn TypeProvider>) -> Self {
        Self {
            inferencer,
            bridge: provider.map(CheckerBridge::new),
        }
    }

    /// Classify the receiver of a member access. `member` is the id of
    /// the access node itself, `receiver` its object operand.
    pub fn classify(
        &self,
        member: ExprId,
        receiver: &Expression,
        target: TypeTag,
        aggressive: bool,
    ) -> MatchStrength {
        if let Some(tag) = literal_receiver_tag(receiver) {
            return known(tag, target);
        }
        let strength = match &self.bridge {
            Some(bridge) => match bridge.classify(member, target) {
                TypeMatch::Match => MatchStrength::Exact,
                TypeMatch::NoMatch => MatchStrength::NoMatch,
                TypeMatch::Indeterminate => unknown(aggressive),
            },
            None => match self.inferencer.infer(receiver) {
                Some(tag) => known(tag, target),
                None => unknown(aggressive),
            },
        };
        trace!(
            "receiver of expression {} classified {:?} against {:?}",
            member.0,
            strength,
            target
        );
        strength
    }
}

fn known(tag: TypeTag, target: TypeTag) -> MatchStrength {
    if tag == target {
        MatchStrength::Exact
    } else {
        MatchStrength::NoMatch
    }
}

fn unknown(aggressive: bool) -> MatchStrength {
    if aggressive {
        MatchStrength::Aggressive
    } else {
        MatchStrength::NoMatch
    }
}

/// Receiver shapes whose class is evident without any inference. These
/// short-circuit before either strategy runs.
fn literal_receiver_tag(receiver: &Expression) -> Option<TypeTag> {
    match receiver.unwrap_transparent() {
        Expression::Array(_) => Some(TypeTag::Array),
        Expression::RegExp(_) => Some(TypeTag::RegExp),
        Expression::String(_) | Expression::Template(_) => Some(TypeTag::String),
        Expression::Function(_) | Expression::Arrow(_) => Some(TypeTag::Function),
        _ => None,
    }
}
